//! Dialogue domain: tests for sequencing, reveal timing and blips.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::blips::{CUE_TEXT, CUE_TEXT_ALT, CUE_TEXT_HIGH, CUE_TEXT_LOW};
use super::systems::update_dialogue;
use super::{
    BlipRng, DialogueAdvanceRequest, DialogueClosedEvent, DialogueDisplayEvent, DialoguePhase,
    DialoguePortraitEvent, DialogueRejection, DialogueSequencer, DialogueSignal, DialogueTrigger,
    RevealTimer, StartDialogueEvent, blip_for, char_hash, character_pitch, nearest_trigger,
};
use crate::audio::PlayCueEvent;
use crate::content::{
    BlipDefaults, BlipMode, ContentRegistry, DialogueDefaults, DialogueLine, DialogueScript,
    register_dialogues,
};
use crate::core::{GameplayPaused, PauseSource};

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(7)
}

fn quiet_tuning() -> DialogueDefaults {
    DialogueDefaults {
        blips: BlipDefaults {
            enabled: false,
            ..BlipDefaults::default()
        },
        ..DialogueDefaults::default()
    }
}

/// Tick with a step large enough to release one character every call.
fn reveal_all(sequencer: &mut DialogueSequencer, rng: &mut ChaCha8Rng) -> Vec<DialogueSignal> {
    let mut signals = Vec::new();
    for _ in 0..256 {
        if sequencer.phase() != DialoguePhase::Revealing {
            break;
        }
        signals.extend(sequencer.tick(1.0, rng));
    }
    signals
}

// -----------------------------------------------------------------------------
// RevealTimer tests
// -----------------------------------------------------------------------------

#[test]
fn test_reveal_timer_waits_initial_delay() {
    let mut timer = RevealTimer::new(0.5, 0.25);
    assert!(!timer.tick(0.25));
    assert!(timer.tick(0.25));
    assert!(!timer.tick(0.125));
    assert!(timer.tick(0.125));
}

#[test]
fn test_reveal_timer_one_char_per_tick() {
    let mut timer = RevealTimer::new(0.0, 0.01);
    // A long frame still releases a single character
    assert!(timer.tick(1.0));
    assert!(timer.tick(0.0));
    assert_eq!(timer.next_char_at, 0.02);
}

// -----------------------------------------------------------------------------
// Sequencer tests
// -----------------------------------------------------------------------------

#[test]
fn test_idle_sequencer_rejects_advance() {
    let mut sequencer = DialogueSequencer::default();
    assert_eq!(sequencer.phase(), DialoguePhase::Idle);
    assert_eq!(
        sequencer.request_advance(),
        Err(DialogueRejection::NoActiveSession)
    );
    assert_eq!(sequencer.advance(), Err(DialogueRejection::NoActiveSession));
    assert!(sequencer.tick(1.0, &mut rng()).is_empty());
}

#[test]
fn test_empty_script_closes_immediately() {
    let mut sequencer = DialogueSequencer::default();
    let script = DialogueScript::new("empty", "Nobody", Vec::<&str>::new());

    let signals = sequencer.start(&script);
    assert_eq!(
        signals,
        vec![
            DialogueSignal::Opened {
                speaker: "Nobody".to_string()
            },
            DialogueSignal::Closed,
        ]
    );
    assert_eq!(sequencer.phase(), DialoguePhase::Closed);
    assert!(!sequencer.is_displaying());
    assert_eq!(sequencer.advance(), Err(DialogueRejection::EmptyQueue));
}

#[test]
fn test_two_line_script_flow() {
    let mut rng = rng();
    let mut sequencer = DialogueSequencer::new(quiet_tuning());
    let script = DialogueScript::new("greet", "Smith", ["Hi", "Bye"]);

    sequencer.start(&script);
    assert_eq!(sequencer.current_line(), Some("Hi"));
    assert_eq!(sequencer.speaker(), "Smith");
    assert_eq!(sequencer.phase(), DialoguePhase::Revealing);
    assert!(sequencer.is_displaying());
    assert!(sequencer.has_more());

    reveal_all(&mut sequencer, &mut rng);
    assert_eq!(sequencer.phase(), DialoguePhase::LineComplete);
    assert_eq!(sequencer.revealed_text(), "Hi");

    sequencer.request_advance().unwrap();
    assert_eq!(sequencer.current_line(), Some("Bye"));
    assert_eq!(sequencer.revealed_len(), 0);
    assert!(!sequencer.has_more());

    reveal_all(&mut sequencer, &mut rng);
    let signals = sequencer.request_advance().unwrap();
    assert_eq!(signals, vec![DialogueSignal::Closed]);
    assert_eq!(sequencer.phase(), DialoguePhase::Closed);
    assert_eq!(sequencer.current_line(), None);
}

#[test]
fn test_input_ignored_mid_reveal() {
    let mut rng = rng();
    let mut sequencer = DialogueSequencer::new(quiet_tuning());
    sequencer.start(&DialogueScript::new("a", "A", ["Hello", "Again"]));

    sequencer.tick(1.0, &mut rng);
    assert_eq!(sequencer.revealed_text(), "H");

    assert_eq!(
        sequencer.request_advance(),
        Err(DialogueRejection::RevealInProgress)
    );
    assert_eq!(sequencer.current_line(), Some("Hello"));
    assert_eq!(sequencer.revealed_text(), "H");
}

#[test]
fn test_skip_completes_line_when_allowed() {
    let mut rng = rng();
    let tuning = DialogueDefaults {
        allow_skip: true,
        ..quiet_tuning()
    };
    let mut sequencer = DialogueSequencer::new(tuning);
    sequencer.start(&DialogueScript::new("a", "A", ["Hello", "Again"]));
    sequencer.tick(1.0, &mut rng);

    let signals = sequencer.request_advance().unwrap();
    assert_eq!(
        signals,
        vec![
            DialogueSignal::TextRevealed {
                text: "Hello".to_string()
            },
            DialogueSignal::LineCompleted,
        ]
    );
    assert_eq!(sequencer.phase(), DialoguePhase::LineComplete);

    sequencer.request_advance().unwrap();
    assert_eq!(sequencer.current_line(), Some("Again"));
}

#[test]
fn test_cursor_monotonic_and_resets_on_line_change() {
    let mut rng = rng();
    let mut sequencer = DialogueSequencer::new(quiet_tuning());
    sequencer.start(&DialogueScript::new("a", "A", ["abc", "de"]));

    let mut last = sequencer.revealed_len();
    assert_eq!(last, 0);
    while sequencer.phase() == DialoguePhase::Revealing {
        sequencer.tick(0.2, &mut rng);
        assert!(sequencer.revealed_len() >= last);
        last = sequencer.revealed_len();
    }
    assert_eq!(last, 3);

    sequencer.request_advance().unwrap();
    assert_eq!(sequencer.revealed_len(), 0);
}

#[test]
fn test_reveal_emits_growing_prefixes() {
    let mut rng = rng();
    let mut sequencer = DialogueSequencer::new(quiet_tuning());
    let signals = sequencer.start(&DialogueScript::new("a", "A", ["Hé!"]));
    assert!(signals.contains(&DialogueSignal::TextRevealed {
        text: String::new()
    }));

    let texts: Vec<String> = reveal_all(&mut sequencer, &mut rng)
        .into_iter()
        .filter_map(|signal| match signal {
            DialogueSignal::TextRevealed { text } => Some(text),
            _ => None,
        })
        .collect();
    assert_eq!(texts, vec!["H", "Hé", "Hé!"]);
}

#[test]
fn test_advance_restarts_reveal() {
    let mut rng = rng();
    let mut sequencer = DialogueSequencer::new(quiet_tuning());
    sequencer.start(&DialogueScript::new("a", "A", ["first line", "second"]));
    sequencer.tick(1.0, &mut rng);
    sequencer.tick(1.0, &mut rng);

    // Programmatic advance cuts the current reveal short
    sequencer.advance().unwrap();
    assert_eq!(sequencer.current_line(), Some("second"));
    assert_eq!(sequencer.revealed_len(), 0);

    // Fresh initial delay applies to the new line
    assert!(sequencer.tick(0.1, &mut rng).is_empty());
    assert_eq!(sequencer.revealed_len(), 0);
}

#[test]
fn test_new_tuning_waits_for_next_line() {
    let mut rng = rng();
    let mut sequencer = DialogueSequencer::new(quiet_tuning());
    sequencer.start(&DialogueScript::new("a", "A", ["Hi", "Yo"]));
    sequencer.tick(0.4, &mut rng);
    assert_eq!(sequencer.revealed_len(), 1);

    sequencer.set_tuning(DialogueDefaults {
        initial_delay: 5.0,
        ..quiet_tuning()
    });

    // The line in flight keeps its old pace
    sequencer.tick(0.4, &mut rng);
    assert_eq!(sequencer.phase(), DialoguePhase::LineComplete);

    sequencer.request_advance().unwrap();
    sequencer.tick(1.0, &mut rng);
    assert_eq!(sequencer.current_line(), Some("Yo"));
    assert_eq!(sequencer.revealed_len(), 0);
}

#[test]
fn test_restart_discards_previous_session() {
    let mut sequencer = DialogueSequencer::new(quiet_tuning());
    sequencer.start(&DialogueScript::new("a", "A", ["one", "two", "three"]));
    sequencer.start(&DialogueScript::new("b", "B", ["only"]));

    assert_eq!(sequencer.speaker(), "B");
    assert_eq!(sequencer.current_line(), Some("only"));
    assert_eq!(sequencer.pending_len(), 0);
}

#[test]
fn test_empty_line_completes_without_ticks() {
    let mut sequencer = DialogueSequencer::new(quiet_tuning());
    sequencer.start(&DialogueScript::new("a", "A", ["", "next"]));
    assert_eq!(sequencer.phase(), DialoguePhase::LineComplete);

    sequencer.request_advance().unwrap();
    assert_eq!(sequencer.current_line(), Some("next"));
}

#[test]
fn test_auto_advance_after_delay() {
    let mut rng = rng();
    let tuning = DialogueDefaults {
        auto_advance_delay: Some(2.0),
        ..quiet_tuning()
    };
    let mut sequencer = DialogueSequencer::new(tuning);
    sequencer.start(&DialogueScript::new("a", "A", ["Hi", "Bye"]));
    reveal_all(&mut sequencer, &mut rng);

    assert!(sequencer.tick(1.5, &mut rng).is_empty());
    let signals = sequencer.tick(1.0, &mut rng);
    assert!(matches!(
        signals.first(),
        Some(DialogueSignal::LineStarted { index: 1, .. })
    ));
    assert_eq!(sequencer.current_line(), Some("Bye"));
}

#[test]
fn test_line_portraits_are_signalled() {
    let mut sequencer = DialogueSequencer::new(quiet_tuning());
    let script = DialogueScript::new(
        "a",
        "A",
        [
            DialogueLine::with_portrait("look", "portraits/a.png"),
            DialogueLine::from("plain"),
        ],
    );

    let signals = sequencer.start(&script);
    assert!(signals.contains(&DialogueSignal::LineStarted {
        index: 0,
        portrait: Some("portraits/a.png".to_string()),
    }));
}

#[test]
fn test_blips_follow_frequency() {
    let mut rng = rng();
    let tuning = DialogueDefaults {
        blips: BlipDefaults {
            frequency_level: 3,
            ..BlipDefaults::default()
        },
        ..DialogueDefaults::default()
    };
    let mut sequencer = DialogueSequencer::new(tuning);
    sequencer.start(&DialogueScript::new("a", "A", ["abcdefg"]));

    let blips = reveal_all(&mut sequencer, &mut rng)
        .into_iter()
        .filter(|signal| matches!(signal, DialogueSignal::Blip(_)))
        .count();
    // Characters 0, 3 and 6
    assert_eq!(blips, 3);
}

// -----------------------------------------------------------------------------
// Blip tests
// -----------------------------------------------------------------------------

#[test]
fn test_char_hash_mirrors_code_unit() {
    assert_eq!(char_hash('a'), 97 | (97 << 16));
    assert_eq!(char_hash('\0'), 0);
}

#[test]
fn test_character_pitch_is_deterministic() {
    let pitch = character_pitch('a', 0.85, 1.10).unwrap();
    assert!((pitch - 0.99).abs() < 1e-6);
    assert_eq!(character_pitch('a', 0.85, 1.10), Some(pitch));
    assert_eq!(character_pitch('a', 1.0, 1.0), None);

    for c in "The quick brown fox".chars() {
        let pitch = character_pitch(c, 0.85, 1.10).unwrap();
        assert!((0.85..1.10).contains(&pitch));
    }
}

#[test]
fn test_blip_modes() {
    let mut rng = rng();
    let mut config = BlipDefaults::default();

    config.mode = BlipMode::Random;
    for _ in 0..50 {
        let blip = blip_for('x', &config, &mut rng);
        assert_eq!(blip.cue, CUE_TEXT);
        assert!(blip.pitch >= config.min_pitch && blip.pitch <= config.max_pitch);
        assert_eq!(blip.volume, config.volume);
    }

    config.mode = BlipMode::RandomVariants;
    for _ in 0..50 {
        let blip = blip_for('x', &config, &mut rng);
        assert!(blip.cue == CUE_TEXT || blip.cue == CUE_TEXT_ALT);
    }

    config.mode = BlipMode::CharacterHash;
    for _ in 0..50 {
        let blip = blip_for('a', &config, &mut rng);
        assert!([CUE_TEXT, CUE_TEXT_LOW, CUE_TEXT_HIGH].contains(&blip.cue));
        assert!((blip.pitch - 0.99).abs() < 1e-6);
    }

    config.max_pitch = config.min_pitch;
    let blip = blip_for('a', &config, &mut rng);
    assert_eq!(blip.cue, CUE_TEXT);
    assert_eq!(blip.pitch, config.min_pitch);
}

// -----------------------------------------------------------------------------
// Trigger tests
// -----------------------------------------------------------------------------

#[test]
fn test_nearest_trigger_in_range() {
    let near = DialogueTrigger {
        script_id: "near".to_string(),
        radius: 50.0,
    };
    let far = DialogueTrigger {
        script_id: "far".to_string(),
        radius: 50.0,
    };
    let wide = DialogueTrigger {
        script_id: "wide".to_string(),
        radius: 500.0,
    };

    let triggers = [
        (Vec2::new(30.0, 0.0), &near),
        (Vec2::new(100.0, 0.0), &far),
        (Vec2::new(40.0, 0.0), &wide),
    ];
    let picked = nearest_trigger(Vec2::ZERO, triggers).map(|t| t.script_id.as_str());
    assert_eq!(picked, Some("near"));

    let picked = nearest_trigger(Vec2::new(1000.0, 0.0), triggers);
    assert!(picked.is_none());
}

// -----------------------------------------------------------------------------
// System tests
// -----------------------------------------------------------------------------

/// Dialogue box updates and closings seen by the test
#[derive(Resource, Default)]
struct BoxLog {
    displays: Vec<DialogueDisplayEvent>,
    portraits: Vec<Option<String>>,
    closed: usize,
}

fn record_box(
    mut log: ResMut<BoxLog>,
    mut displays: MessageReader<DialogueDisplayEvent>,
    mut portraits: MessageReader<DialoguePortraitEvent>,
    mut closed: MessageReader<DialogueClosedEvent>,
) {
    log.displays.extend(displays.read().cloned());
    log.portraits.extend(portraits.read().map(|e| e.portrait.clone()));
    log.closed += closed.read().count();
}

fn dialogue_app() -> App {
    let mut registry = ContentRegistry::default();
    register_dialogues(
        &mut registry,
        vec![DialogueScript::new("greet", "Smith", ["Hi", "Bye"])],
        "dialogues.ron",
    );
    // One character per frame even with a zero frame time
    let tuning = DialogueDefaults {
        initial_delay: 0.0,
        char_interval: 0.0,
        ..quiet_tuning()
    };

    let mut app = App::new();
    app.insert_resource(registry)
        .insert_resource(DialogueSequencer::new(tuning))
        .insert_resource(BlipRng(rng()))
        .init_resource::<GameplayPaused>()
        .init_resource::<Time>()
        .init_resource::<BoxLog>()
        .add_message::<StartDialogueEvent>()
        .add_message::<DialogueAdvanceRequest>()
        .add_message::<DialogueDisplayEvent>()
        .add_message::<DialoguePortraitEvent>()
        .add_message::<DialogueClosedEvent>()
        .add_message::<PlayCueEvent>()
        .add_systems(Update, update_dialogue)
        .add_systems(PostUpdate, record_box);
    app
}

fn last_display(app: &App) -> DialogueDisplayEvent {
    let log = app.world().resource::<BoxLog>();
    log.displays.last().cloned().expect("a display update")
}

fn dialogue_paused(app: &App) -> bool {
    app.world()
        .resource::<GameplayPaused>()
        .is_paused_by(PauseSource::Dialogue)
}

#[test]
fn test_dialogue_session_drives_box_and_pause() {
    let mut app = dialogue_app();

    app.world_mut().write_message(StartDialogueEvent {
        script_id: "greet".to_string(),
    });
    app.update();
    assert!(dialogue_paused(&app));
    assert_eq!(app.world().resource::<BoxLog>().portraits, vec![None]);
    let shown = last_display(&app);
    assert_eq!(shown.speaker, "Smith");
    assert_eq!(shown.text, "H");
    assert!(shown.is_open);
    assert!(shown.has_more);

    app.update();
    assert_eq!(last_display(&app).text, "Hi");

    app.world_mut().write_message(DialogueAdvanceRequest);
    app.update();
    let shown = last_display(&app);
    assert_eq!(shown.text, "B");
    assert!(!shown.has_more);

    app.update();
    app.update();
    assert_eq!(last_display(&app).text, "Bye");
    assert!(dialogue_paused(&app));

    app.world_mut().write_message(DialogueAdvanceRequest);
    app.update();
    let shown = last_display(&app);
    assert!(!shown.is_open);
    assert!(!shown.has_more);
    assert_eq!(app.world().resource::<BoxLog>().closed, 1);
    assert!(!dialogue_paused(&app));
    assert_eq!(
        app.world().resource::<DialogueSequencer>().phase(),
        DialoguePhase::Closed
    );
}

#[test]
fn test_unknown_script_leaves_sequencer_idle() {
    let mut app = dialogue_app();

    app.world_mut().write_message(StartDialogueEvent {
        script_id: "missing".to_string(),
    });
    app.update();

    assert_eq!(
        app.world().resource::<DialogueSequencer>().phase(),
        DialoguePhase::Idle
    );
    assert!(!dialogue_paused(&app));
    assert!(app.world().resource::<BoxLog>().displays.is_empty());
}
