//! UI domain: coin counter with a flash over its icon on pickup.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::combat::{CoinsCollectedEvent, PlayerWallet};
use crate::ui::feedback::{FlashKind, FlashOverlay};
use crate::ui::hud_player::{PLAYER_BAR_HEIGHT, PLAYER_HUD_PADDING};

/// Below the two vitals bars and the ammo line
const COIN_DISPLAY_TOP: f32 = PLAYER_HUD_PADDING + (PLAYER_BAR_HEIGHT + 6.0) * 2.0 + 26.0;
const COIN_ICON_SIZE: f32 = 16.0;

/// Marker for the coin display UI container
#[derive(Component)]
pub struct CoinDisplayUI;

/// Marker for the coin amount text
#[derive(Component)]
pub struct CoinAmountText;

pub(crate) fn spawn_coin_display(mut commands: Commands) {
    commands
        .spawn((
            CoinDisplayUI,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(PLAYER_HUD_PADDING),
                top: Val::Px(COIN_DISPLAY_TOP),
                flex_direction: FlexDirection::Row,
                align_items: AlignItems::Center,
                column_gap: Val::Px(8.0),
                ..default()
            },
        ))
        .with_children(|parent| {
            // Coin icon (gold square) with the pickup flash on top
            parent
                .spawn((
                    Node {
                        width: Val::Px(COIN_ICON_SIZE),
                        height: Val::Px(COIN_ICON_SIZE),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.9, 0.75, 0.2)),
                ))
                .with_child((
                    FlashOverlay {
                        kind: FlashKind::Coin,
                        alpha: 0.0,
                    },
                    Node {
                        position_type: PositionType::Absolute,
                        width: Val::Percent(100.0),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                    BackgroundColor(Color::NONE),
                    Visibility::Hidden,
                ));

            parent.spawn((
                CoinAmountText,
                Text::new("0"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.85, 0.5)),
            ));
        });
}

pub(crate) fn update_coin_display(
    wallet: Res<PlayerWallet>,
    mut query: Query<&mut Text, With<CoinAmountText>>,
) {
    if wallet.is_changed() {
        for mut text in &mut query {
            **text = format!("{}", wallet.coins);
        }
    }
}

pub(crate) fn flash_coin_icon(
    mut coin_events: MessageReader<CoinsCollectedEvent>,
    mut overlays: Query<&mut FlashOverlay>,
) {
    if coin_events.read().count() == 0 {
        return;
    }
    for mut overlay in &mut overlays {
        if overlay.kind == FlashKind::Coin {
            overlay.alpha = 1.0;
        }
    }
}
