//! Combat domain: input resources.

use bevy::prelude::*;

/// Per-frame combat input, sampled once by `read_combat_input`.
#[derive(Resource, Debug, Default)]
pub struct CombatInput {
    pub fire: bool,
    pub reload: bool,
    /// World-space point the player is aiming at
    pub aim: Option<Vec2>,
    pub test_damage: bool,
    pub test_heal: bool,
    pub test_shield: bool,
    pub test_kill: bool,
}
