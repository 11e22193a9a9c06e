//! Core domain: scene-wide setup.

use bevy::prelude::*;

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
