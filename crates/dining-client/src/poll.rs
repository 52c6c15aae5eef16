//! Fixed-rate background ticker.
//!
//! [`PollScheduler::start`] spawns a task that calls `on_tick` once per
//! interval, measured from the start time rather than from the end of the
//! previous tick. `on_tick` must not block; the usual callback just kicks off
//! a [`StatusFetcher::revalidate`](crate::StatusFetcher::revalidate).

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

pub const DEFAULT_POLL_INTERVAL: Duration =
    Duration::from_millis(dining_core::DEFAULT_POLL_INTERVAL_MS);

pub struct PollScheduler;

impl PollScheduler {
    /// Starts ticking. The first tick fires one full `interval` after start.
    ///
    /// The returned handle owns the timer: stopping or dropping it cancels
    /// every future tick. Must be called from within a tokio runtime.
    pub fn start<F>(interval: Duration, mut on_tick: F) -> PollHandle
    where
        F: FnMut() + Send + 'static,
    {
        // tokio rejects a zero period
        let period = interval.max(Duration::from_millis(1));
        let first_tick = Instant::now() + period;
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(first_tick, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
            let mut fired: u64 = 0;
            loop {
                ticker.tick().await;
                fired += 1;
                tracing::trace!(tick = fired, "poll tick");
                on_tick();
            }
        });
        tracing::debug!(interval_ms = period.as_millis(), "poll scheduler started");
        PollHandle { task: Some(task) }
    }
}

/// Cancel handle for a running [`PollScheduler`].
#[derive(Debug)]
pub struct PollHandle {
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Cancels the timer. No tick fires after this returns.
    pub fn stop(mut self) {
        self.cancel();
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("poll scheduler stopped");
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
