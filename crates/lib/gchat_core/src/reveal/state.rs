//! Pure reveal state machine.
//!
//! `revealed_text` is always a prefix of `full_text` and grows by exactly one
//! `char` per tick. No timers live here; see [`super::controller`].

/// Coarse phase derived from [`RevealState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    /// No text to reveal.
    Idle,
    /// Ticks are appending characters.
    Revealing,
    /// `revealed_text == full_text`; terminal until the text changes.
    Complete,
}

/// Result of assigning a new full text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assigned {
    /// Same text as before; nothing changed.
    Unchanged,
    /// Text set to empty; back to idle.
    Cleared,
    /// New non-empty text; a fresh reveal begins.
    Started,
}

/// Result of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// One more character was revealed.
    Advanced(char),
    /// Nothing left to reveal; the reveal stopped on this tick.
    Completed,
    /// Not revealing; the tick had no effect.
    Idle,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealState {
    full_text: String,
    revealed_text: String,
    is_revealing: bool,
    /// Bumped on every change of `full_text`.
    generation: u64,
}

impl RevealState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    pub fn revealed_text(&self) -> &str {
        &self.revealed_text
    }

    pub fn is_revealing(&self) -> bool {
        self.is_revealing
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> RevealPhase {
        if self.full_text.is_empty() {
            RevealPhase::Idle
        } else if self.is_revealing {
            RevealPhase::Revealing
        } else {
            RevealPhase::Complete
        }
    }

    /// Replaces the full text.
    ///
    /// A new non-empty text discards whatever was revealed so far and starts
    /// over from empty. An empty text returns to idle.
    pub fn assign(&mut self, text: impl Into<String>) -> Assigned {
        let text = text.into();
        if text == self.full_text {
            return Assigned::Unchanged;
        }

        self.generation += 1;
        self.revealed_text.clear();
        self.is_revealing = !text.is_empty();
        self.full_text = text;

        if self.is_revealing {
            Assigned::Started
        } else {
            Assigned::Cleared
        }
    }

    /// Advances the reveal by one character, or completes it.
    pub fn tick(&mut self) -> Tick {
        if !self.is_revealing {
            return Tick::Idle;
        }

        match self.full_text[self.revealed_text.len()..].chars().next() {
            Some(c) => {
                self.revealed_text.push(c);
                Tick::Advanced(c)
            }
            None => {
                self.is_revealing = false;
                Tick::Completed
            }
        }
    }
}
