//! Dialogue domain: the dialogue sequencer state machine.

use bevy::prelude::*;
use rand::Rng;
use std::collections::VecDeque;

use crate::content::{DialogueDefaults, DialogueLine, DialogueScript};
use crate::dialogue::blips::{TextBlip, blip_for};
use crate::dialogue::reveal::RevealTimer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialoguePhase {
    /// No script has been started yet
    #[default]
    Idle,
    /// Current line is being typed out
    Revealing,
    /// Current line is fully shown, waiting for input
    LineComplete,
    /// Session ended; waits for the next start
    Closed,
}

/// Why a dialogue request was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueRejection {
    /// The session already ran out of lines
    EmptyQueue,
    /// Nothing was ever started
    NoActiveSession,
    /// Input arrived while the line is still typing
    RevealInProgress,
}

impl std::fmt::Display for DialogueRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DialogueRejection::EmptyQueue => write!(f, "no lines left in the session"),
            DialogueRejection::NoActiveSession => write!(f, "no dialogue has been started"),
            DialogueRejection::RevealInProgress => write!(f, "line is still being revealed"),
        }
    }
}

/// Something the presentation and audio layers should hear about.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogueSignal {
    Opened { speaker: String },
    LineStarted { index: usize, portrait: Option<String> },
    TextRevealed { text: String },
    Blip(TextBlip),
    LineCompleted,
    Closed,
}

/// Plays dialogue scripts one line at a time, typing each line out on a timer.
#[derive(Resource, Debug)]
pub struct DialogueSequencer {
    tuning: DialogueDefaults,
    speaker: String,
    pending: VecDeque<DialogueLine>,
    current: Option<DialogueLine>,
    /// Index of the next line to dequeue within the script
    next_index: usize,
    revealed_chars: usize,
    revealed_bytes: usize,
    line_chars: usize,
    phase: DialoguePhase,
    reveal: RevealTimer,
    complete_elapsed: f32,
}

impl Default for DialogueSequencer {
    fn default() -> Self {
        Self::new(DialogueDefaults::default())
    }
}

impl DialogueSequencer {
    pub fn new(tuning: DialogueDefaults) -> Self {
        let reveal = RevealTimer::new(tuning.initial_delay, tuning.char_interval);
        Self {
            tuning,
            speaker: String::new(),
            pending: VecDeque::new(),
            current: None,
            next_index: 0,
            revealed_chars: 0,
            revealed_bytes: 0,
            line_chars: 0,
            phase: DialoguePhase::Idle,
            reveal,
            complete_elapsed: 0.0,
        }
    }

    /// Replace the tuning. A line already being typed keeps its reveal
    /// timings; the next line picks up the new ones.
    pub fn set_tuning(&mut self, tuning: DialogueDefaults) {
        self.tuning = tuning;
    }

    pub fn phase(&self) -> DialoguePhase {
        self.phase
    }

    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    pub fn current_line(&self) -> Option<&str> {
        self.current.as_ref().map(|line| line.text.as_str())
    }

    /// The part of the current line shown so far.
    pub fn revealed_text(&self) -> &str {
        self.current
            .as_ref()
            .map(|line| &line.text[..self.revealed_bytes])
            .unwrap_or("")
    }

    /// Characters of the current line shown so far.
    pub fn revealed_len(&self) -> usize {
        self.revealed_chars
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn has_more(&self) -> bool {
        !self.pending.is_empty()
    }

    /// True while a line is on screen.
    pub fn is_displaying(&self) -> bool {
        matches!(
            self.phase,
            DialoguePhase::Revealing | DialoguePhase::LineComplete
        )
    }

    /// Begin a script, discarding whatever session was running.
    pub fn start(&mut self, script: &DialogueScript) -> Vec<DialogueSignal> {
        self.pending.clear();
        self.pending.extend(script.lines.iter().cloned());
        self.speaker = script.speaker.clone();
        self.current = None;
        self.next_index = 0;

        let mut signals = vec![DialogueSignal::Opened {
            speaker: self.speaker.clone(),
        }];
        signals.extend(self.next_line());
        signals
    }

    /// Move to the next line, cancelling any reveal in flight.
    pub fn advance(&mut self) -> Result<Vec<DialogueSignal>, DialogueRejection> {
        match self.phase {
            DialoguePhase::Idle => Err(DialogueRejection::NoActiveSession),
            DialoguePhase::Closed => Err(DialogueRejection::EmptyQueue),
            DialoguePhase::Revealing | DialoguePhase::LineComplete => Ok(self.next_line()),
        }
    }

    /// Handle the player asking to continue.
    ///
    /// A line still typing ignores the request unless skipping is enabled,
    /// in which case it is shown in full and the next request moves on.
    pub fn request_advance(&mut self) -> Result<Vec<DialogueSignal>, DialogueRejection> {
        match self.phase {
            DialoguePhase::Idle => Err(DialogueRejection::NoActiveSession),
            DialoguePhase::Closed => Err(DialogueRejection::EmptyQueue),
            DialoguePhase::Revealing if self.tuning.allow_skip => Ok(self.skip_to_end()),
            DialoguePhase::Revealing => Err(DialogueRejection::RevealInProgress),
            DialoguePhase::LineComplete => Ok(self.next_line()),
        }
    }

    /// Advance the clock by `dt` seconds.
    pub fn tick<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) -> Vec<DialogueSignal> {
        match self.phase {
            DialoguePhase::Revealing => {
                if self.reveal.tick(dt) {
                    self.reveal_next_char(rng)
                } else {
                    Vec::new()
                }
            }
            DialoguePhase::LineComplete => {
                let Some(delay) = self.tuning.auto_advance_delay else {
                    return Vec::new();
                };
                self.complete_elapsed += dt;
                if self.complete_elapsed >= delay {
                    self.next_line()
                } else {
                    Vec::new()
                }
            }
            DialoguePhase::Idle | DialoguePhase::Closed => Vec::new(),
        }
    }

    fn next_line(&mut self) -> Vec<DialogueSignal> {
        let Some(line) = self.pending.pop_front() else {
            return self.close();
        };

        let index = self.next_index;
        self.next_index += 1;
        self.line_chars = line.text.chars().count();
        self.revealed_chars = 0;
        self.revealed_bytes = 0;
        self.reveal = RevealTimer::new(self.tuning.initial_delay, self.tuning.char_interval);
        self.phase = DialoguePhase::Revealing;

        let mut signals = vec![
            DialogueSignal::LineStarted {
                index,
                portrait: line.portrait.clone(),
            },
            DialogueSignal::TextRevealed {
                text: String::new(),
            },
        ];
        self.current = Some(line);

        if self.line_chars == 0 {
            signals.extend(self.complete_line());
        }
        signals
    }

    fn reveal_next_char<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<DialogueSignal> {
        let Some(line) = self.current.as_ref() else {
            return self.complete_line();
        };
        let Some(c) = line.text[self.revealed_bytes..].chars().next() else {
            return self.complete_line();
        };

        let index = self.revealed_chars;
        self.revealed_chars += 1;
        self.revealed_bytes += c.len_utf8();

        let mut signals = vec![DialogueSignal::TextRevealed {
            text: self.revealed_text().to_string(),
        }];

        let blips = &self.tuning.blips;
        let every = blips.frequency_level.max(1) as usize;
        if blips.enabled && index % every == 0 {
            signals.push(DialogueSignal::Blip(blip_for(c, blips, rng)));
        }

        if self.revealed_chars >= self.line_chars {
            signals.extend(self.complete_line());
        }
        signals
    }

    fn skip_to_end(&mut self) -> Vec<DialogueSignal> {
        if let Some(line) = self.current.as_ref() {
            self.revealed_bytes = line.text.len();
            self.revealed_chars = self.line_chars;
        }
        let mut signals = vec![DialogueSignal::TextRevealed {
            text: self.revealed_text().to_string(),
        }];
        signals.extend(self.complete_line());
        signals
    }

    fn complete_line(&mut self) -> Vec<DialogueSignal> {
        self.phase = DialoguePhase::LineComplete;
        self.complete_elapsed = 0.0;
        vec![DialogueSignal::LineCompleted]
    }

    fn close(&mut self) -> Vec<DialogueSignal> {
        self.phase = DialoguePhase::Closed;
        self.current = None;
        self.revealed_chars = 0;
        self.revealed_bytes = 0;
        self.line_chars = 0;
        vec![DialogueSignal::Closed]
    }
}
