//! Typewriter-style incremental reveal of a response text.
//!
//! - [`state`]: the pure Idle / Revealing / Complete state machine.
//! - [`timer`]: the cancellable interval timer that produces ticks.
//! - [`controller`]: the single owner tying both together.

pub mod controller;
pub mod state;
pub mod timer;

pub use controller::{RevealController, RevealError, RevealEvent, RevealHandle};
pub use state::{Assigned, RevealPhase, RevealState, Tick};
pub use timer::{DEFAULT_REVEAL_INTERVAL, IntervalTimer, TimerHandle};
