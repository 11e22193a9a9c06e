//! Movement domain: player spawn and top-down locomotion.

mod bootstrap;
mod components;
mod resources;
mod systems;

pub use components::{Facing, GameLayer, MovementState, Player};
pub use resources::{MovementInput, MovementTuning};

use bevy::prelude::*;

use crate::core::gameplay_active;
use crate::movement::bootstrap::spawn_player;
use crate::movement::systems::{apply_movement, read_input, update_facing};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .add_systems(Startup, spawn_player)
            .add_systems(
                Update,
                (read_input, (apply_movement, update_facing).run_if(gameplay_active)).chain(),
            )
            .add_systems(
                Update,
                stop_player_while_paused.run_if(not(gameplay_active)),
            );
    }
}

/// Keep the player from drifting while gameplay is paused
fn stop_player_while_paused(mut query: Query<&mut avian2d::prelude::LinearVelocity, With<Player>>) {
    for mut velocity in &mut query {
        velocity.0 = Vec2::ZERO;
    }
}
