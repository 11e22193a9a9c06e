//! ContentRegistry resource providing HashMap lookups for loaded content.

use bevy::prelude::*;
use std::collections::HashMap;

use super::data::*;

/// Central registry for loaded game content, keyed by id.
#[derive(Resource, Debug, Default)]
pub struct ContentRegistry {
    pub dialogues: HashMap<String, DialogueScript>,
}

impl ContentRegistry {
    pub fn dialogue(&self, id: &str) -> Option<&DialogueScript> {
        self.dialogues.get(id)
    }

    /// Returns a summary of loaded content counts for logging.
    pub fn summary(&self) -> String {
        let lines: usize = self.dialogues.values().map(|d| d.lines.len()).sum();
        format!(
            "ContentRegistry loaded:\n\
             - Dialogue scripts: {}\n\
             - Dialogue lines: {}",
            self.dialogues.len(),
            lines
        )
    }
}
