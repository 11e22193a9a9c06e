//! Validation for loaded content and tuning values.

use super::data::*;
use super::registry::ContentRegistry;

/// A validation error with context about what failed.
#[derive(Debug)]
pub struct ValidationError {
    pub source_type: &'static str,
    pub source_id: String,
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} '{}' has invalid field '{}': {}",
            self.source_type, self.source_id, self.field, self.message
        )
    }
}

/// Helper macro for checking a condition holds
macro_rules! check {
    ($errors:expr, $cond:expr, $source_type:expr, $source_id:expr, $field:expr, $message:expr) => {
        if !$cond {
            $errors.push(ValidationError {
                source_type: $source_type,
                source_id: $source_id.to_string(),
                field: $field,
                message: $message.to_string(),
            });
        }
    };
}

/// Validate dialogue scripts and gameplay tuning.
/// Returns a list of validation errors, empty if everything is usable.
pub fn validate_content(
    registry: &ContentRegistry,
    defaults: &GameplayDefaults,
) -> Vec<ValidationError> {
    let mut errors = validate_dialogues(registry);
    errors.extend(validate_player(&defaults.player));
    errors.extend(validate_combat(&defaults.combat));
    errors.extend(validate_weapon(&defaults.weapon));
    errors.extend(validate_dialogue_tuning(&defaults.dialogue));
    errors
}

/// Reset every tuning section that fails validation to its built-in default.
/// Returns the errors that caused a reset.
pub fn fall_back_invalid_sections(defaults: &mut GameplayDefaults) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let player = validate_player(&defaults.player);
    if !player.is_empty() {
        defaults.player = PlayerDefaults::default();
        errors.extend(player);
    }
    let combat = validate_combat(&defaults.combat);
    if !combat.is_empty() {
        defaults.combat = CombatDefaults::default();
        errors.extend(combat);
    }
    let weapon = validate_weapon(&defaults.weapon);
    if !weapon.is_empty() {
        defaults.weapon = WeaponDefaults::default();
        errors.extend(weapon);
    }
    let dialogue = validate_dialogue_tuning(&defaults.dialogue);
    if !dialogue.is_empty() {
        defaults.dialogue = DialogueDefaults::default();
        errors.extend(dialogue);
    }

    errors
}

fn non_negative(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn validate_dialogues(registry: &ContentRegistry) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (id, script) in &registry.dialogues {
        check!(errors, !id.is_empty(), "Dialogue", id, "id", "must not be empty");
        check!(
            errors,
            !script.speaker.trim().is_empty(),
            "Dialogue",
            id,
            "speaker",
            "must not be empty"
        );
        for line in &script.lines {
            if let Some(portrait) = &line.portrait {
                check!(
                    errors,
                    !portrait.is_empty(),
                    "Dialogue",
                    id,
                    "portrait",
                    "must be a path when present"
                );
            }
        }
    }

    errors
}

fn validate_player(player: &PlayerDefaults) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    check!(
        errors,
        positive(player.max_health),
        "Defaults",
        "player",
        "max_health",
        "must be positive"
    );
    check!(
        errors,
        non_negative(player.max_shield),
        "Defaults",
        "player",
        "max_shield",
        "must not be negative"
    );
    check!(
        errors,
        non_negative(player.move_speed),
        "Defaults",
        "player",
        "move_speed",
        "must not be negative"
    );
    errors
}

fn validate_combat(combat: &CombatDefaults) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    check!(
        errors,
        positive(combat.damage_flash_fade_rate),
        "Defaults",
        "combat",
        "damage_flash_fade_rate",
        "must be positive"
    );
    check!(
        errors,
        positive(combat.bar_lerp_rate),
        "Defaults",
        "combat",
        "bar_lerp_rate",
        "must be positive"
    );
    check!(
        errors,
        positive(combat.test_damage_amount),
        "Defaults",
        "combat",
        "test_damage_amount",
        "must be positive"
    );
    check!(
        errors,
        non_negative(combat.dummy_respawn_delay),
        "Defaults",
        "combat",
        "dummy_respawn_delay",
        "must not be negative"
    );
    errors
}

fn validate_weapon(weapon: &WeaponDefaults) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    check!(
        errors,
        weapon.magazine_size > 0,
        "Defaults",
        "weapon",
        "magazine_size",
        "must be at least 1"
    );
    check!(
        errors,
        non_negative(weapon.fire_cooldown),
        "Defaults",
        "weapon",
        "fire_cooldown",
        "must not be negative"
    );
    check!(
        errors,
        positive(weapon.projectile_speed),
        "Defaults",
        "weapon",
        "projectile_speed",
        "must be positive"
    );
    check!(
        errors,
        positive(weapon.projectile_damage),
        "Defaults",
        "weapon",
        "projectile_damage",
        "must be positive"
    );
    check!(
        errors,
        positive(weapon.projectile_lifetime),
        "Defaults",
        "weapon",
        "projectile_lifetime",
        "must be positive"
    );
    errors
}

fn validate_dialogue_tuning(dialogue: &DialogueDefaults) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    check!(
        errors,
        non_negative(dialogue.initial_delay),
        "Defaults",
        "dialogue",
        "initial_delay",
        "must not be negative"
    );
    check!(
        errors,
        non_negative(dialogue.char_interval),
        "Defaults",
        "dialogue",
        "char_interval",
        "must not be negative"
    );
    if let Some(delay) = dialogue.auto_advance_delay {
        check!(
            errors,
            non_negative(delay),
            "Defaults",
            "dialogue",
            "auto_advance_delay",
            "must not be negative"
        );
    }

    let blips = &dialogue.blips;
    check!(
        errors,
        blips.frequency_level >= 1,
        "Defaults",
        "dialogue.blips",
        "frequency_level",
        "must be at least 1"
    );
    // NaN fails the comparison as well
    check!(
        errors,
        blips.min_pitch.is_finite()
            && blips.max_pitch.is_finite()
            && blips.min_pitch <= blips.max_pitch,
        "Defaults",
        "dialogue.blips",
        "min_pitch",
        "must be finite and not exceed max_pitch"
    );
    check!(
        errors,
        non_negative(blips.volume),
        "Defaults",
        "dialogue.blips",
        "volume",
        "must not be negative"
    );
    errors
}
