//! Repeating tick timer for the reveal controller.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use super::controller::RevealEvent;

/// Default delay between two revealed characters.
pub const DEFAULT_REVEAL_INTERVAL: Duration = Duration::from_millis(30);

/// Shortest accepted tick period.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Handle to a running [`IntervalTimer`]. Dropping it stops the timer.
#[derive(Debug)]
pub struct TimerHandle {
    generation: u64,
    task: JoinHandle<()>,
}

impl TimerHandle {
    /// Generation the timer was started for.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Emits [`RevealEvent::Tick`] into a channel at a fixed period.
///
/// The first tick fires one full period after start.
pub struct IntervalTimer;

impl IntervalTimer {
    /// Spawns the timer task on the current Tokio runtime.
    pub fn start(
        period: Duration,
        generation: u64,
        sink: mpsc::UnboundedSender<RevealEvent>,
    ) -> TimerHandle {
        let period = period.max(MIN_INTERVAL);
        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if sink.send(RevealEvent::Tick { generation }).is_err() {
                    break;
                }
            }
        });
        TimerHandle { generation, task }
    }
}
