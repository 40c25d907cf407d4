//! Terminal rendering of the reveal state.
//!
//! Only the newly revealed suffix is written on each update, so a coalesced
//! `watch` notification still prints every character exactly once.

use std::io::{self, Write};

use gchat_core::reveal::RevealState;
use tokio::sync::watch;

pub const ANSWER_PREFIX: &str = "Gemini> ";
pub const PROMPT_PREFIX: &str = "You> ";

pub struct Renderer<W> {
    out: W,
    generation: u64,
    /// Bytes of `revealed_text` already written.
    printed: usize,
    line_open: bool,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            generation: 0,
            printed: 0,
            line_open: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes whatever changed since the previous call.
    ///
    /// Returns `true` when this call finished an answer line.
    pub fn render(&mut self, state: &RevealState) -> io::Result<bool> {
        if state.generation() != self.generation {
            // Superseded or cleared mid-line.
            if self.line_open {
                writeln!(self.out)?;
                self.line_open = false;
            }
            self.generation = state.generation();
            self.printed = 0;
            if !state.full_text().is_empty() {
                write!(self.out, "{ANSWER_PREFIX}")?;
                self.line_open = true;
            }
        }

        if !self.line_open {
            self.out.flush()?;
            return Ok(false);
        }

        let revealed = state.revealed_text();
        if revealed.len() > self.printed {
            write!(self.out, "{}", &revealed[self.printed..])?;
            self.printed = revealed.len();
        }

        let finished = !state.is_revealing();
        if finished {
            writeln!(self.out)?;
            self.line_open = false;
        }
        self.out.flush()?;
        Ok(finished)
    }

    /// Renders updates until `expected` is fully revealed.
    ///
    /// Returns immediately for an empty `expected`, which is never revealed.
    pub async fn follow_until(
        &mut self,
        rx: &mut watch::Receiver<RevealState>,
        expected: &str,
    ) -> io::Result<()> {
        if expected.is_empty() {
            return Ok(());
        }
        loop {
            let state = rx.borrow_and_update().clone();
            self.render(&state)?;
            if state.full_text() == expected && !state.is_revealing() {
                return Ok(());
            }
            if rx.changed().await.is_err() {
                return Ok(());
            }
        }
    }

    pub fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "{PROMPT_PREFIX}")?;
        self.out.flush()
    }
}
