//! Content domain: RON-backed dialogue scripts and gameplay tuning.

mod data;
mod loader;
mod registry;
mod validation;

pub use data::{
    BlipDefaults, BlipMode, CombatDefaults, DataFile, DialogueDefaults, DialogueLine,
    DialogueScript, GameplayDefaults, PlayerDefaults, WeaponDefaults,
};
pub use loader::{
    ContentLoadError, LoadedContent, load_all_content, parse_data_file, parse_single_file,
    register_dialogues,
};
pub use registry::ContentRegistry;
pub use validation::{ValidationError, fall_back_invalid_sections, validate_content};

use bevy::prelude::*;
use std::path::Path;

/// Directory holding the RON content files, relative to the working directory
pub const CONTENT_DIR: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<GameplayDefaults>()
            .register_type::<DialogueScript>()
            .init_resource::<ContentRegistry>()
            .init_resource::<GameplayDefaults>()
            .add_systems(PreStartup, load_content);
    }
}

fn load_content(mut commands: Commands) {
    let mut loaded = load_all_content(Path::new(CONTENT_DIR));

    for err in &loaded.errors {
        error!("{}", err);
    }
    if !loaded.errors.is_empty() {
        warn!(
            "{} content file(s) failed to load, falling back to built-in defaults",
            loaded.errors.len()
        );
    }

    let invalid = fall_back_invalid_sections(&mut loaded.defaults);
    for err in &invalid {
        warn!("{}", err);
    }
    if !invalid.is_empty() {
        warn!("Invalid tuning sections were replaced with built-in defaults");
    }

    for err in validate_content(&loaded.registry, &loaded.defaults) {
        warn!("{}", err);
    }

    info!("{}", loaded.registry.summary());

    commands.insert_resource(loaded.registry);
    commands.insert_resource(loaded.defaults);
}
