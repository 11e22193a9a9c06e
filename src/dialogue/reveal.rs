//! Dialogue domain: the per-character reveal clock.

/// Time-driven clock for typing out a line.
///
/// The first character is due after `initial_delay`, each later one
/// `interval` after the previous. A tick releases at most one character.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealTimer {
    pub elapsed: f32,
    pub next_char_at: f32,
    pub interval: f32,
}

impl RevealTimer {
    pub fn new(initial_delay: f32, interval: f32) -> Self {
        Self {
            elapsed: 0.0,
            next_char_at: initial_delay,
            interval,
        }
    }

    /// Returns true if a character is due this tick.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed >= self.next_char_at {
            self.next_char_at += self.interval;
            true
        } else {
            false
        }
    }
}
