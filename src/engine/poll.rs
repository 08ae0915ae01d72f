//! Cancellable poll schedule.
//!
//! A [`PollHandle`] exists only while a countdown runs. The engine owns it
//! and drops it on every transition out of the running state, so a poll
//! that was already due can never reach the engine afterwards.

use tokio::time::{sleep_until, Duration, Instant};
use tracing::trace;

/// Fixed cadence of the countdown poll.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Owned schedule for the periodic poll.
///
/// The handle only waits; the engine reports the current instant from its
/// own clock after each poll so the schedule never reads a second clock.
#[derive(Debug)]
pub struct PollHandle {
    period: Duration,
    next: Instant,
}

impl PollHandle {
    /// Schedules the first poll one period after `now`.
    #[must_use]
    pub fn new(now: Instant, period: Duration) -> Self {
        Self {
            period,
            next: now + period,
        }
    }

    /// Waits for the scheduled poll.
    ///
    /// Cancel safe: the schedule only moves in [`PollHandle::advance`].
    pub async fn wait(&self) {
        sleep_until(self.next).await;
    }

    /// Moves the schedule one period on from the poll that just fired.
    ///
    /// Missed polls are skipped rather than fired in a burst.
    pub fn advance(&mut self, now: Instant) {
        self.next += self.period;
        if self.next <= now {
            trace!("Skipping missed polls");
            self.next = now + self.period;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_poll_is_one_period_out() {
        let start = Instant::now();
        let handle = PollHandle::new(start, POLL_INTERVAL);

        handle.wait().await;
        assert_eq!(Instant::now() - start, Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_advance_moves_by_period() {
        let start = Instant::now();
        let mut handle = PollHandle::new(start, POLL_INTERVAL);

        handle.wait().await;
        handle.advance(Instant::now());
        handle.wait().await;

        assert_eq!(Instant::now() - start, Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_advance_skips_missed_polls() {
        let start = Instant::now();
        let mut handle = PollHandle::new(start, POLL_INTERVAL);

        // The caller's clock says ten seconds passed since the first poll
        handle.advance(start + Duration::from_secs(10));
        handle.wait().await;

        assert_eq!(Instant::now() - start, Duration::from_secs(11));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_wait_keeps_schedule() {
        let start = Instant::now();
        let handle = PollHandle::new(start, Duration::from_secs(5));

        let early = tokio::time::timeout(Duration::from_secs(2), handle.wait()).await;
        assert!(early.is_err());

        handle.wait().await;
        assert_eq!(Instant::now() - start, Duration::from_secs(5));
    }
}
