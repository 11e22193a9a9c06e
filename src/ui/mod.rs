//! UI domain: in-run HUD elements, dialogue box, pause menu and death flow.

mod death;
mod dialogue_box;
mod feedback;
mod hud_boss;
mod hud_dummy;
mod hud_player;
mod hud_wallet;
mod pause;

pub use death::PlayerDeathState;
pub use hud_boss::BossHud;

use bevy::prelude::*;

use crate::ui::death::{clear_death_screen, detect_player_death, handle_retry_button};
use crate::ui::dialogue_box::{
    handle_continue_button, spawn_dialogue_box, update_dialogue_box, update_dialogue_portrait,
};
use crate::ui::feedback::{fade_flashes, spawn_flash_overlays, trigger_flashes};
use crate::ui::hud_dummy::{
    cleanup_dummy_healthbars, spawn_dummy_healthbars, update_dummy_healthbars,
};
use crate::ui::hud_boss::{fade_boss_hud, spawn_boss_hud, track_boss_encounter, update_boss_bar};
use crate::ui::hud_player::{spawn_player_hud, update_ammo_text, update_player_bars};
use crate::ui::hud_wallet::{flash_coin_icon, spawn_coin_display, update_coin_display};
use crate::ui::pause::toggle_pause_menu;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerDeathState>()
            .init_resource::<BossHud>()
            .add_systems(
                Startup,
                (
                    spawn_player_hud,
                    spawn_flash_overlays,
                    spawn_coin_display,
                    spawn_boss_hud,
                    spawn_dialogue_box,
                ),
            )
            .add_systems(
                Update,
                (
                    update_player_bars,
                    update_ammo_text,
                    (trigger_flashes, flash_coin_icon, fade_flashes).chain(),
                    update_coin_display,
                    (track_boss_encounter, fade_boss_hud, update_boss_bar).chain(),
                    spawn_dummy_healthbars,
                    update_dummy_healthbars,
                    cleanup_dummy_healthbars,
                    update_dialogue_box,
                    update_dialogue_portrait,
                    handle_continue_button,
                    detect_player_death,
                    handle_retry_button,
                    clear_death_screen,
                    toggle_pause_menu,
                ),
            );
    }
}
