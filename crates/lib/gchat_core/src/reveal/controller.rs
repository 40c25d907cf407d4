//! Reveal controller: owns the [`RevealState`] and its timer.
//!
//! All mutations go through [`RevealController::handle`], driven by the
//! controller's own event loop ([`RevealController::run`]). Consumers hold a
//! [`RevealHandle`] to assign new text and observe the state through a
//! `watch` channel; they never mutate it directly.
//!
//! At most one timer is active. Assigning new text drops the current
//! [`TimerHandle`] (which aborts its task) before a new one is started, and
//! ticks already queued from an older generation are discarded.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tracing::{debug, trace};

use super::state::{Assigned, RevealState, Tick};
use super::timer::{IntervalTimer, TimerHandle};

/// Message-style input to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealEvent {
    /// Replace the full text.
    SetFullText(String),
    /// Timer tick for the given generation.
    Tick { generation: u64 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RevealError {
    #[error("reveal controller has shut down")]
    Closed,
}

/// Consumer side of a [`RevealController`].
#[derive(Debug, Clone)]
pub struct RevealHandle {
    commands: mpsc::UnboundedSender<String>,
    state: watch::Receiver<RevealState>,
}

impl RevealHandle {
    /// Hands a new full text to the controller.
    pub fn set_full_text(&self, text: impl Into<String>) -> Result<(), RevealError> {
        self.commands
            .send(text.into())
            .map_err(|_| RevealError::Closed)
    }

    /// Clears the full text, cancelling any reveal in progress.
    pub fn clear(&self) -> Result<(), RevealError> {
        self.set_full_text(String::new())
    }

    /// A receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<RevealState> {
        self.state.clone()
    }

    /// Current state.
    pub fn snapshot(&self) -> RevealState {
        self.state.borrow().clone()
    }
}

pub struct RevealController {
    interval: Duration,
    timer: Option<TimerHandle>,
    commands: mpsc::UnboundedReceiver<String>,
    ticks_tx: mpsc::UnboundedSender<RevealEvent>,
    ticks_rx: mpsc::UnboundedReceiver<RevealEvent>,
    state: watch::Sender<RevealState>,
}

impl RevealController {
    /// Creates an idle controller ticking every `interval`.
    pub fn new(interval: Duration) -> (Self, RevealHandle) {
        let (commands_tx, commands) = mpsc::unbounded_channel();
        let (ticks_tx, ticks_rx) = mpsc::unbounded_channel();
        let (state, state_rx) = watch::channel(RevealState::new());

        let controller = Self {
            interval,
            timer: None,
            commands,
            ticks_tx,
            ticks_rx,
            state,
        };
        let handle = RevealHandle {
            commands: commands_tx,
            state: state_rx,
        };
        (controller, handle)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Generation of the active timer, if any.
    pub fn active_timer(&self) -> Option<u64> {
        self.timer.as_ref().map(TimerHandle::generation)
    }

    pub fn state(&self) -> RevealState {
        self.state.borrow().clone()
    }

    /// Applies one event.
    pub fn handle(&mut self, event: RevealEvent) {
        match event {
            RevealEvent::SetFullText(text) => self.assign(text),
            RevealEvent::Tick { generation } => self.tick(generation),
        }
    }

    /// Processes events until every [`RevealHandle`] is dropped and the
    /// current reveal, if any, has finished.
    pub async fn run(mut self) {
        let mut commands_open = true;
        loop {
            if !commands_open && self.timer.is_none() {
                break;
            }
            tokio::select! {
                command = self.commands.recv(), if commands_open => match command {
                    Some(text) => self.handle(RevealEvent::SetFullText(text)),
                    None => commands_open = false,
                },
                Some(event) = self.ticks_rx.recv() => self.handle(event),
            }
        }
        debug!("reveal controller stopped");
    }

    fn assign(&mut self, text: String) {
        let mut assigned = Assigned::Unchanged;
        self.state.send_if_modified(|state| {
            assigned = state.assign(text);
            assigned != Assigned::Unchanged
        });

        match assigned {
            Assigned::Unchanged => {}
            Assigned::Cleared => {
                self.timer = None;
                debug!("reveal cleared");
            }
            Assigned::Started => {
                let generation = self.state.borrow().generation();
                // Cancel the old timer before the new one exists.
                self.timer = None;
                self.timer = Some(IntervalTimer::start(
                    self.interval,
                    generation,
                    self.ticks_tx.clone(),
                ));
                debug!(generation, "reveal started");
            }
        }
    }

    fn tick(&mut self, generation: u64) {
        if self.active_timer() != Some(generation) {
            trace!(generation, "dropping stale tick");
            return;
        }

        let mut outcome = Tick::Idle;
        self.state.send_if_modified(|state| {
            outcome = state.tick();
            outcome != Tick::Idle
        });

        if outcome == Tick::Completed {
            self.timer = None;
            debug!(generation, "reveal complete");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::{DEFAULT_REVEAL_INTERVAL, RevealPhase};

    /// Drives the controller by hand, without waiting on the timer.
    fn tick_n(controller: &mut RevealController, n: usize) {
        let generation = controller.state().generation();
        for _ in 0..n {
            controller.handle(RevealEvent::Tick { generation });
        }
    }

    #[tokio::test(start_paused = true)]
    async fn set_text_starts_one_timer() {
        let (mut controller, _handle) = RevealController::new(DEFAULT_REVEAL_INTERVAL);
        assert_eq!(controller.active_timer(), None);

        controller.handle(RevealEvent::SetFullText("Hi".into()));
        let state = controller.state();
        assert_eq!(state.phase(), RevealPhase::Revealing);
        assert_eq!(controller.active_timer(), Some(state.generation()));
    }

    #[tokio::test(start_paused = true)]
    async fn manual_ticks_reveal_then_stop_timer() {
        let (mut controller, _handle) = RevealController::new(DEFAULT_REVEAL_INTERVAL);
        controller.handle(RevealEvent::SetFullText("Hi!".into()));

        tick_n(&mut controller, 3);
        assert_eq!(controller.state().revealed_text(), "Hi!");
        assert!(controller.state().is_revealing());
        assert!(controller.active_timer().is_some());

        tick_n(&mut controller, 1);
        assert!(!controller.state().is_revealing());
        assert_eq!(controller.active_timer(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn replacing_text_replaces_timer() {
        let (mut controller, _handle) = RevealController::new(DEFAULT_REVEAL_INTERVAL);
        controller.handle(RevealEvent::SetFullText("first".into()));
        let first = controller.active_timer().unwrap();
        tick_n(&mut controller, 2);

        controller.handle(RevealEvent::SetFullText("second".into()));
        let second = controller.active_timer().unwrap();
        assert_ne!(first, second);
        assert_eq!(controller.state().revealed_text(), "");

        // Late ticks from the first reveal are ignored.
        controller.handle(RevealEvent::Tick { generation: first });
        assert_eq!(controller.state().revealed_text(), "");

        tick_n(&mut controller, 1);
        assert_eq!(controller.state().revealed_text(), "s");
    }

    #[tokio::test(start_paused = true)]
    async fn clearing_cancels_timer() {
        let (mut controller, _handle) = RevealController::new(DEFAULT_REVEAL_INTERVAL);
        controller.handle(RevealEvent::SetFullText("abc".into()));
        tick_n(&mut controller, 1);

        controller.handle(RevealEvent::SetFullText(String::new()));
        assert_eq!(controller.active_timer(), None);
        assert_eq!(controller.state().phase(), RevealPhase::Idle);
        assert_eq!(controller.state().revealed_text(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn run_reveals_to_completion() {
        let (controller, handle) = RevealController::new(DEFAULT_REVEAL_INTERVAL);
        let task = tokio::spawn(controller.run());
        let mut rx = handle.subscribe();

        handle.set_full_text("Hi there!").unwrap();
        let done = rx
            .wait_for(|s| s.full_text() == "Hi there!" && !s.is_revealing())
            .await
            .unwrap()
            .clone();
        assert_eq!(done.revealed_text(), "Hi there!");
        assert_eq!(done.phase(), RevealPhase::Complete);

        drop(handle);
        drop(rx);
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn run_takes_one_interval_per_char() {
        let interval = Duration::from_millis(30);
        let (controller, handle) = RevealController::new(interval);
        tokio::spawn(controller.run());
        let mut rx = handle.subscribe();

        let start = tokio::time::Instant::now();
        handle.set_full_text("abcd").unwrap();
        rx.wait_for(|s| s.revealed_text() == "abcd").await.unwrap();
        assert_eq!(start.elapsed(), interval * 4);

        rx.wait_for(|s| !s.is_revealing()).await.unwrap();
        assert_eq!(start.elapsed(), interval * 5);
    }

    #[tokio::test(start_paused = true)]
    async fn second_text_mid_reveal_never_interleaves() {
        let (controller, handle) = RevealController::new(DEFAULT_REVEAL_INTERVAL);
        tokio::spawn(controller.run());
        let mut rx = handle.subscribe();

        handle.set_full_text("AAAAAAAAAA").unwrap();
        rx.wait_for(|s| s.revealed_text().len() >= 3).await.unwrap();

        handle.set_full_text("bbbbb").unwrap();
        loop {
            rx.changed().await.unwrap();
            let state = rx.borrow_and_update().clone();
            if state.full_text() == "bbbbb" {
                assert!(!state.revealed_text().contains('A'));
                assert!("bbbbb".starts_with(state.revealed_text()));
                if !state.is_revealing() {
                    assert_eq!(state.revealed_text(), "bbbbb");
                    break;
                }
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn run_finishes_reveal_after_handles_drop() {
        let (controller, handle) = RevealController::new(DEFAULT_REVEAL_INTERVAL);
        let mut rx = handle.subscribe();
        let task = tokio::spawn(controller.run());

        handle.set_full_text("bye").unwrap();
        drop(handle);
        task.await.unwrap();

        let state = rx.borrow().clone();
        assert_eq!(state.revealed_text(), "bye");
        assert!(!state.is_revealing());
    }

    #[test]
    fn set_text_after_shutdown_fails() {
        let (controller, handle) = RevealController::new(DEFAULT_REVEAL_INTERVAL);
        drop(controller);
        assert_eq!(handle.set_full_text("x"), Err(RevealError::Closed));
    }
}
