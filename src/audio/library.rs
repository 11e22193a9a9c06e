//! Audio domain: the cue manifest and loaded cue handles.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Shape of `cues.json`: cue id to asset path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CueManifest {
    pub schema_version: u32,
    pub cues: HashMap<String, String>,
}

#[derive(Debug)]
pub struct CueManifestError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for CueManifestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.file, self.message)
    }
}

pub fn parse_cue_manifest(content: &str, file: &str) -> Result<CueManifest, CueManifestError> {
    serde_json::from_str(content).map_err(|e| CueManifestError {
        file: file.to_string(),
        message: e.to_string(),
    })
}

pub(crate) fn read_cue_manifest(path: &Path) -> Result<CueManifest, CueManifestError> {
    let file = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| CueManifestError {
        file: file.clone(),
        message: e.to_string(),
    })?;
    parse_cue_manifest(&content, &file)
}

/// Loaded cues by id. Ids that were requested but never loaded are
/// remembered so each is only reported once.
#[derive(Resource, Debug, Default)]
pub struct CueLibrary {
    cues: HashMap<String, Handle<AudioSource>>,
    reported_missing: HashSet<String>,
}

impl CueLibrary {
    pub fn insert(&mut self, id: impl Into<String>, handle: Handle<AudioSource>) {
        self.cues.insert(id.into(), handle);
    }

    pub fn get(&self, id: &str) -> Option<&Handle<AudioSource>> {
        self.cues.get(id)
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Returns true the first time `id` is reported missing.
    pub fn note_missing(&mut self, id: &str) -> bool {
        self.reported_missing.insert(id.to_string())
    }
}
