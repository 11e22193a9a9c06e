//! Core domain: camera setup and the shared gameplay pause gate.

mod resources;
mod systems;

pub use resources::{GameplayPaused, PauseSource, gameplay_active, pause_menu_closed};

use bevy::prelude::*;

use crate::core::systems::setup_camera;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameplayPaused>()
            .add_systems(Startup, setup_camera);
    }
}
