//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Walls and props that block movement
    Wall,
    /// Player character
    Player,
    /// Hostile or target characters
    Enemy,
    /// Sensors (pickups, triggers) - should not block movement
    Sensor,
    /// Player projectiles (damage enemies)
    PlayerProjectile,
}

#[derive(Component, Debug)]
pub struct Player;

#[derive(Component, Debug, Default)]
pub struct MovementState {
    pub facing: Facing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// Facing implied by a horizontal input, or `None` when the axis is idle.
    pub fn from_axis(x: f32) -> Option<Self> {
        if x > 0.1 {
            Some(Facing::Right)
        } else if x < -0.1 {
            Some(Facing::Left)
        } else {
            None
        }
    }
}
