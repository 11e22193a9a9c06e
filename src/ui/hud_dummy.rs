//! UI domain: world-space health bars over training dummies.

use bevy::prelude::*;

use crate::combat::{BossEncounter, Health, Incapacitated, TrainingDummy};

const DUMMY_HEALTHBAR_WIDTH: f32 = 40.0;
const DUMMY_HEALTHBAR_HEIGHT: f32 = 6.0;
const DUMMY_HEALTHBAR_OFFSET_Y: f32 = 10.0;

/// Background of a dummy's health bar
#[derive(Component)]
pub struct DummyHealthBar {
    pub owner: Entity,
}

/// Fill of a dummy's health bar
#[derive(Component)]
pub struct DummyHealthBarFill {
    pub owner: Entity,
}

pub(crate) fn spawn_dummy_healthbars(
    mut commands: Commands,
    // Bosses get the screen-space bar instead
    dummy_query: Query<Entity, (Added<TrainingDummy>, Without<BossEncounter>)>,
) {
    for owner in &dummy_query {
        commands.spawn((
            DummyHealthBar { owner },
            Sprite {
                color: Color::srgba(0.1, 0.1, 0.1, 0.8),
                custom_size: Some(Vec2::new(
                    DUMMY_HEALTHBAR_WIDTH + 2.0,
                    DUMMY_HEALTHBAR_HEIGHT + 2.0,
                )),
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, 5.0),
        ));

        commands.spawn((
            DummyHealthBarFill { owner },
            Sprite {
                color: Color::srgb(0.8, 0.2, 0.2),
                custom_size: Some(Vec2::new(DUMMY_HEALTHBAR_WIDTH, DUMMY_HEALTHBAR_HEIGHT)),
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, 6.0),
        ));
    }
}

fn bar_anchor(transform: &Transform, sprite: &Sprite) -> Vec2 {
    let height = sprite.custom_size.map(|s| s.y).unwrap_or(32.0);
    Vec2::new(
        transform.translation.x,
        transform.translation.y + height / 2.0 + DUMMY_HEALTHBAR_OFFSET_Y,
    )
}

pub(crate) fn update_dummy_healthbars(
    dummy_query: Query<
        (&Transform, &Health, &Sprite, Has<Incapacitated>),
        With<TrainingDummy>,
    >,
    mut bar_query: Query<
        (&DummyHealthBar, &mut Transform, &mut Visibility),
        Without<TrainingDummy>,
    >,
    mut fill_query: Query<
        (&DummyHealthBarFill, &mut Transform, &mut Sprite, &mut Visibility),
        (Without<TrainingDummy>, Without<DummyHealthBar>),
    >,
) {
    for (bar, mut bar_transform, mut visibility) in &mut bar_query {
        let Ok((transform, _, sprite, down)) = dummy_query.get(bar.owner) else {
            continue;
        };
        let anchor = bar_anchor(transform, sprite);
        bar_transform.translation.x = anchor.x;
        bar_transform.translation.y = anchor.y;
        *visibility = if down {
            Visibility::Hidden
        } else {
            Visibility::Inherited
        };
    }

    for (fill, mut fill_transform, mut fill_sprite, mut visibility) in &mut fill_query {
        let Ok((transform, health, sprite, down)) = dummy_query.get(fill.owner) else {
            continue;
        };
        let anchor = bar_anchor(transform, sprite);
        let fill_width = DUMMY_HEALTHBAR_WIDTH * health.percent();

        // Left-aligned within the background
        fill_transform.translation.x = anchor.x - (DUMMY_HEALTHBAR_WIDTH - fill_width) / 2.0;
        fill_transform.translation.y = anchor.y;
        fill_sprite.custom_size = Some(Vec2::new(fill_width.max(0.0), DUMMY_HEALTHBAR_HEIGHT));
        *visibility = if down {
            Visibility::Hidden
        } else {
            Visibility::Inherited
        };
    }
}

pub(crate) fn cleanup_dummy_healthbars(
    mut commands: Commands,
    dummy_query: Query<(), With<TrainingDummy>>,
    bar_query: Query<(Entity, &DummyHealthBar)>,
    fill_query: Query<(Entity, &DummyHealthBarFill)>,
) {
    for (entity, bar) in &bar_query {
        if !dummy_query.contains(bar.owner) {
            commands.entity(entity).despawn();
        }
    }
    for (entity, fill) in &fill_query {
        if !dummy_query.contains(fill.owner) {
            commands.entity(entity).despawn();
        }
    }
}
