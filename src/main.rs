mod audio;
mod combat;
mod content;
mod core;
mod dialogue;
mod movement;
mod ui;

use avian2d::prelude::*;
use bevy::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Ashfall".to_string(),
                resolution: (1280, 720).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        .insert_resource(Gravity(Vec2::ZERO))
        .add_plugins((
            core::CorePlugin,
            content::ContentPlugin,
            audio::AudioPlugin,
            movement::MovementPlugin,
            combat::CombatPlugin,
            dialogue::DialoguePlugin,
            ui::UiPlugin,
        ))
        .run();
}
