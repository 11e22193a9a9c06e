//! UI domain: flashes when the player takes damage, recovers or picks up coins.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::combat::{VitalsChange, VitalsChangedEvent};
use crate::content::GameplayDefaults;
use crate::movement::Player;

/// Below this alpha an overlay is hidden
const FLASH_CUTOFF: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Damage,
    Heal,
    Shield,
    /// Flash over the coin counter icon
    Coin,
}

impl FlashKind {
    pub fn for_change(change: VitalsChange) -> Option<Self> {
        match change {
            VitalsChange::HealthDamaged | VitalsChange::ShieldDamaged => Some(FlashKind::Damage),
            VitalsChange::Healed => Some(FlashKind::Heal),
            VitalsChange::ShieldRestored => Some(FlashKind::Shield),
            VitalsChange::Revived => None,
        }
    }

    fn tint(self) -> Color {
        match self {
            FlashKind::Damage => Color::srgb(0.8, 0.1, 0.1),
            FlashKind::Heal => Color::srgb(0.2, 0.8, 0.3),
            FlashKind::Shield => Color::srgb(0.3, 0.55, 0.95),
            FlashKind::Coin => Color::srgb(1.0, 0.95, 0.6),
        }
    }

    /// Alpha of the overlay at full strength. Screen flashes never go opaque.
    pub fn peak_alpha(self) -> f32 {
        match self {
            FlashKind::Coin => 1.0,
            FlashKind::Damage | FlashKind::Heal | FlashKind::Shield => 0.35,
        }
    }
}

#[derive(Component, Debug)]
pub struct FlashOverlay {
    pub kind: FlashKind,
    pub alpha: f32,
}

/// Ease towards zero by `rate * dt` of the remaining alpha, snapping to zero
/// under the cutoff.
pub fn fade_alpha(alpha: f32, rate: f32, dt: f32) -> f32 {
    let next = alpha * (1.0 - (rate * dt).clamp(0.0, 1.0));
    if next < FLASH_CUTOFF { 0.0 } else { next }
}

pub(crate) fn spawn_flash_overlays(mut commands: Commands) {
    // The coin flash lives on the wallet HUD
    for kind in [FlashKind::Damage, FlashKind::Heal, FlashKind::Shield] {
        commands.spawn((
            FlashOverlay { kind, alpha: 0.0 },
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
            BackgroundColor(kind.tint().with_alpha(0.0)),
            Visibility::Hidden,
            ZIndex(50),
        ));
    }
}

pub(crate) fn trigger_flashes(
    player_query: Query<(), With<Player>>,
    mut vitals_events: MessageReader<VitalsChangedEvent>,
    mut overlays: Query<&mut FlashOverlay>,
) {
    for event in vitals_events.read() {
        if !player_query.contains(event.entity) {
            continue;
        }
        let Some(kind) = FlashKind::for_change(event.change) else {
            continue;
        };
        for mut overlay in &mut overlays {
            if overlay.kind == kind {
                overlay.alpha = 1.0;
            }
        }
    }
}

pub(crate) fn fade_flashes(
    time: Res<Time>,
    defaults: Res<GameplayDefaults>,
    mut overlays: Query<(&mut FlashOverlay, &mut BackgroundColor, &mut Visibility)>,
) {
    let dt = time.delta_secs();
    let rate = defaults.combat.damage_flash_fade_rate;

    for (mut overlay, mut bg_color, mut visibility) in &mut overlays {
        if overlay.alpha <= 0.0 {
            *visibility = Visibility::Hidden;
            continue;
        }
        bg_color.0 = overlay
            .kind
            .tint()
            .with_alpha(overlay.alpha * overlay.kind.peak_alpha());
        *visibility = Visibility::Inherited;
        overlay.alpha = fade_alpha(overlay.alpha, rate, dt);
    }
}
