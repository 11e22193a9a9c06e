//! Dialogue domain: text blip cue and pitch selection.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::content::{BlipDefaults, BlipMode};

pub const CUE_TEXT: &str = "TextSound";
pub const CUE_TEXT_ALT: &str = "TextSound1";
pub const CUE_TEXT_LOW: &str = "TextSound3";
pub const CUE_TEXT_HIGH: &str = "TextSound4";

/// A request to play one typing sound.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlip {
    pub cue: &'static str,
    pub pitch: f32,
    pub volume: f32,
}

/// Stable hash of a character: the code unit mirrored into the high half.
pub fn char_hash(c: char) -> u32 {
    let code = c as u32;
    code | (code << 16)
}

/// Pitch derived from the character alone, in hundredths within `[min, max)`.
/// Returns `None` when the range is narrower than one hundredth.
pub fn character_pitch(c: char, min_pitch: f32, max_pitch: f32) -> Option<f32> {
    let min = (min_pitch * 100.0) as i32;
    let max = (max_pitch * 100.0) as i32;
    let range = max - min;
    if range <= 0 {
        return None;
    }
    let offset = (char_hash(c) % range as u32) as i32;
    Some((min + offset) as f32 / 100.0)
}

fn random_pitch<R: Rng + ?Sized>(rng: &mut R, config: &BlipDefaults) -> f32 {
    let (lo, hi) = if config.min_pitch <= config.max_pitch {
        (config.min_pitch, config.max_pitch)
    } else {
        (config.max_pitch, config.min_pitch)
    };
    rng.random_range(lo..=hi)
}

/// Choose cue and pitch for the blip played on `c`.
pub fn blip_for<R: Rng + ?Sized>(c: char, config: &BlipDefaults, rng: &mut R) -> TextBlip {
    let (cue, pitch) = match config.mode {
        BlipMode::Random => (CUE_TEXT, random_pitch(rng, config)),
        BlipMode::RandomVariants => {
            let cue = [CUE_TEXT, CUE_TEXT_ALT]
                .choose(rng)
                .copied()
                .unwrap_or(CUE_TEXT);
            (cue, random_pitch(rng, config))
        }
        BlipMode::CharacterHash => match character_pitch(c, config.min_pitch, config.max_pitch) {
            Some(pitch) => {
                let cue = [CUE_TEXT, CUE_TEXT_LOW, CUE_TEXT_HIGH]
                    .choose(rng)
                    .copied()
                    .unwrap_or(CUE_TEXT);
                (cue, pitch)
            }
            None => (CUE_TEXT, config.min_pitch),
        },
    };

    TextBlip {
        cue,
        pitch,
        volume: config.volume,
    }
}
