//! Data definitions for all RON content files.
//!
//! These structs mirror the structure in assets/data/*.ron and are used
//! for deserialization. Every tuning struct has a `Default` so a missing or
//! partial file still yields a playable game.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// Common wrapper for RON files with schema_version and items
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

// ============================================================================
// Dialogue scripts (dialogues.ron)
// ============================================================================

/// A speaker and the lines they say, in order. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Reflect)]
pub struct DialogueScript {
    pub id: String,
    pub speaker: String,
    pub lines: Vec<DialogueLine>,
}

impl DialogueScript {
    pub fn new<I, L>(id: impl Into<String>, speaker: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<DialogueLine>,
    {
        Self {
            id: id.into(),
            speaker: speaker.into(),
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// One line of dialogue, optionally paired with a portrait shown while it plays.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Reflect)]
pub struct DialogueLine {
    pub text: String,
    #[serde(default)]
    pub portrait: Option<String>,
}

impl DialogueLine {
    pub fn with_portrait(text: impl Into<String>, portrait: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            portrait: Some(portrait.into()),
        }
    }
}

impl From<&str> for DialogueLine {
    fn from(text: &str) -> Self {
        Self {
            text: text.to_string(),
            portrait: None,
        }
    }
}

impl From<String> for DialogueLine {
    fn from(text: String) -> Self {
        Self {
            text,
            portrait: None,
        }
    }
}

// ============================================================================
// Gameplay defaults (gameplay_defaults.ron)
// ============================================================================

#[derive(Resource, Debug, Clone, Deserialize, Serialize, Reflect)]
#[serde(default)]
pub struct GameplayDefaults {
    pub schema_version: u32,
    pub player: PlayerDefaults,
    pub combat: CombatDefaults,
    pub weapon: WeaponDefaults,
    pub dialogue: DialogueDefaults,
}

impl Default for GameplayDefaults {
    fn default() -> Self {
        Self {
            schema_version: 1,
            player: PlayerDefaults::default(),
            combat: CombatDefaults::default(),
            weapon: WeaponDefaults::default(),
            dialogue: DialogueDefaults::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
#[serde(default)]
pub struct PlayerDefaults {
    pub max_health: f32,
    pub max_shield: f32,
    pub move_speed: f32,
}

impl Default for PlayerDefaults {
    fn default() -> Self {
        Self {
            max_health: 10.0,
            max_shield: 5.0,
            move_speed: 260.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
#[serde(default)]
pub struct CombatDefaults {
    /// How fast flash overlays fade back to transparent (per second)
    pub damage_flash_fade_rate: f32,
    /// How fast HUD bars chase their target fill (per second)
    pub bar_lerp_rate: f32,
    /// Damage dealt to the player by the dev test key
    pub test_damage_amount: f32,
    /// Seconds before a training dummy gets back up
    pub dummy_respawn_delay: f32,
}

impl Default for CombatDefaults {
    fn default() -> Self {
        Self {
            damage_flash_fade_rate: 5.0,
            bar_lerp_rate: 10.0,
            test_damage_amount: 1.0,
            dummy_respawn_delay: 3.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
#[serde(default)]
pub struct WeaponDefaults {
    pub name: String,
    pub magazine_size: u32,
    pub fire_cooldown: f32,
    pub projectile_speed: f32,
    pub projectile_damage: f32,
    pub projectile_lifetime: f32,
}

impl Default for WeaponDefaults {
    fn default() -> Self {
        Self {
            name: "Sidearm".to_string(),
            magazine_size: 12,
            fire_cooldown: 0.25,
            projectile_speed: 720.0,
            projectile_damage: 2.0,
            projectile_lifetime: 1.2,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
#[serde(default)]
pub struct DialogueDefaults {
    /// Pause before the first character of each line
    pub initial_delay: f32,
    /// Pause between characters
    pub char_interval: f32,
    /// If true, advance input while a line is still typing completes it instantly
    pub allow_skip: bool,
    /// If set, a finished line moves on by itself after this many seconds
    pub auto_advance_delay: Option<f32>,
    pub blips: BlipDefaults,
}

impl Default for DialogueDefaults {
    fn default() -> Self {
        Self {
            initial_delay: 0.35,
            char_interval: 0.03,
            allow_skip: false,
            auto_advance_delay: None,
            blips: BlipDefaults::default(),
        }
    }
}

/// How the pitch of a text blip is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Reflect, Default)]
pub enum BlipMode {
    /// Uniform pitch in range, single cue
    Random,
    /// Uniform pitch in range, cue picked from two variants
    RandomVariants,
    /// Pitch derived from the character, so the same letter always sounds the same
    #[default]
    CharacterHash,
}

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
#[serde(default)]
pub struct BlipDefaults {
    pub enabled: bool,
    /// A blip plays on every Nth revealed character
    pub frequency_level: u32,
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub volume: f32,
    pub mode: BlipMode,
}

impl Default for BlipDefaults {
    fn default() -> Self {
        Self {
            enabled: true,
            frequency_level: 3,
            min_pitch: 0.85,
            max_pitch: 1.10,
            volume: 0.65,
            mode: BlipMode::CharacterHash,
        }
    }
}
