//! Movement domain: top-down locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::Incapacitated;
use crate::movement::{Facing, MovementInput, MovementState, MovementTuning, Player};

/// Move `current` toward `target` by at most `max_delta`.
pub(crate) fn approach(current: Vec2, target: Vec2, max_delta: f32) -> Vec2 {
    let diff = target - current;
    let dist = diff.length();
    if dist <= max_delta || dist == 0.0 {
        target
    } else {
        current + diff / dist * max_delta
    }
}

pub(crate) fn apply_movement(
    time: Res<Time>,
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    mut query: Query<&mut LinearVelocity, (With<Player>, Without<Incapacitated>)>,
) {
    let dt = time.delta_secs();

    for mut velocity in &mut query {
        let target = input.axis * tuning.max_speed;
        let rate = if input.axis == Vec2::ZERO {
            tuning.decel
        } else {
            tuning.accel
        };
        velocity.0 = approach(velocity.0, target, rate * dt);
    }
}

pub(crate) fn update_facing(
    input: Res<MovementInput>,
    mut query: Query<(&mut MovementState, &mut Sprite), (With<Player>, Without<Incapacitated>)>,
) {
    let Some(facing) = Facing::from_axis(input.axis.x) else {
        return;
    };

    for (mut state, mut sprite) in &mut query {
        state.facing = facing;
        sprite.flip_x = facing == Facing::Left;
    }
}
