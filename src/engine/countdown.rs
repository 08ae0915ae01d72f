//! Countdown engine for the focus timer.
//!
//! This module provides the core timer functionality:
//! - start / pause / reset / set-duration transitions
//! - Remaining time derived from an absolute end instant, not tick counting
//! - A single `Expired` event per completed run

use tokio::sync::mpsc;
use tokio::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::clock::{Clock, SystemClock};
use super::error::{EngineError, InvalidDurationReason};
use super::poll::{PollHandle, POLL_INTERVAL};
use crate::types::CountdownSnapshot;

// ============================================================================
// TimerEvent
// ============================================================================

/// Events emitted by the countdown engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// A countdown started or resumed
    Started {
        /// Remaining seconds at the moment of starting
        remaining_seconds: u32,
    },
    /// The countdown was paused
    Paused,
    /// The configured duration was restored
    Reset,
    /// The remaining time was recomputed or replaced
    RemainingChanged {
        /// Remaining seconds
        remaining_seconds: u32,
    },
    /// The countdown reached zero
    Expired,
}

// ============================================================================
// CountdownEngine
// ============================================================================

/// Owns the authoritative remaining-time state and its transitions.
pub struct CountdownEngine<C: Clock = SystemClock> {
    clock: C,
    /// Last duration passed to `set_duration` (or the initial default)
    configured_seconds: u32,
    /// Remaining time; authoritative while stopped, derived while running
    remaining_seconds: u32,
    /// Instant at which the running countdown reaches zero
    end: Option<Instant>,
    /// Present exactly while running
    poll: Option<PollHandle>,
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl<C: Clock> CountdownEngine<C> {
    /// Creates an engine loaded with `default_seconds`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDuration` if `default_seconds` is zero.
    pub fn new(
        default_seconds: u32,
        clock: C,
        event_tx: mpsc::UnboundedSender<TimerEvent>,
    ) -> Result<Self, EngineError> {
        if default_seconds == 0 {
            return Err(EngineError::InvalidDuration {
                seconds: 0,
                reason: InvalidDurationReason::NotPositive,
            });
        }

        Ok(Self {
            clock,
            configured_seconds: default_seconds,
            remaining_seconds: default_seconds,
            end: None,
            poll: None,
            event_tx,
        })
    }

    /// Stages a new duration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDuration` if `seconds` is zero or the engine is
    /// running. The state is left unchanged in both cases.
    pub fn set_duration(&mut self, seconds: u32) -> Result<(), EngineError> {
        if seconds == 0 {
            return Err(EngineError::InvalidDuration {
                seconds,
                reason: InvalidDurationReason::NotPositive,
            });
        }
        if self.is_running() {
            return Err(EngineError::InvalidDuration {
                seconds,
                reason: InvalidDurationReason::WhileRunning,
            });
        }

        self.configured_seconds = seconds;
        self.remaining_seconds = seconds;
        debug!("Duration set to {}s", seconds);

        self.emit(TimerEvent::RemainingChanged {
            remaining_seconds: seconds,
        });
        Ok(())
    }

    /// Starts or resumes the countdown.
    ///
    /// Returns false (and leaves the end instant untouched) if the engine
    /// is already running. A countdown that has expired is re-armed with
    /// the configured duration.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }

        if self.remaining_seconds == 0 {
            self.remaining_seconds = self.configured_seconds;
        }

        let now = self.clock.now();
        self.end = Some(now + Duration::from_secs(u64::from(self.remaining_seconds)));
        self.poll = Some(PollHandle::new(now, POLL_INTERVAL));
        info!("Countdown started with {}s remaining", self.remaining_seconds);

        self.emit(TimerEvent::Started {
            remaining_seconds: self.remaining_seconds,
        });
        true
    }

    /// Pauses the countdown, freezing the last computed remaining time.
    ///
    /// Returns false if the engine was not running.
    pub fn pause(&mut self) -> bool {
        if !self.stop_polling() {
            return false;
        }

        info!("Countdown paused at {}s", self.remaining_seconds);
        self.emit(TimerEvent::Paused);
        true
    }

    /// Pauses and restores the last configured duration.
    pub fn reset(&mut self) {
        self.pause();
        self.remaining_seconds = self.configured_seconds;
        debug!("Countdown reset to {}s", self.configured_seconds);

        self.emit(TimerEvent::Reset);
        self.emit(TimerEvent::RemainingChanged {
            remaining_seconds: self.remaining_seconds,
        });
    }

    /// Recomputes the remaining time from the end instant.
    ///
    /// Returns the new remaining seconds, or `None` when the engine is not
    /// running (in which case nothing happens).
    pub fn poll(&mut self) -> Option<u32> {
        let end = self.end.filter(|_| self.poll.is_some())?;

        let left = end.saturating_duration_since(self.clock.now());
        let remaining = ceil_secs(left);
        self.remaining_seconds = remaining;
        self.emit(TimerEvent::RemainingChanged {
            remaining_seconds: remaining,
        });

        if remaining == 0 {
            self.stop_polling();
            info!("Countdown expired");
            self.emit(TimerEvent::Expired);
        }

        Some(remaining)
    }

    /// Waits until the next scheduled poll.
    ///
    /// Never resolves while the engine is stopped, so it can sit in a
    /// `select!` next to other event sources.
    pub async fn next_poll(&mut self) {
        let Self { poll, clock, .. } = self;
        match poll.as_mut() {
            Some(handle) => {
                handle.wait().await;
                handle.advance(clock.now());
            }
            None => std::future::pending().await,
        }
    }

    /// Returns the remaining seconds as of the last computation.
    #[must_use]
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Returns the last configured duration in seconds.
    #[must_use]
    pub fn configured_seconds(&self) -> u32 {
        self.configured_seconds
    }

    /// Returns true while a countdown is active.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.poll.is_some()
    }

    /// Returns the instant the running countdown reaches zero.
    #[must_use]
    pub fn end_instant(&self) -> Option<Instant> {
        self.end
    }

    /// Returns a serializable copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> CountdownSnapshot {
        CountdownSnapshot {
            remaining_seconds: self.remaining_seconds,
            configured_seconds: self.configured_seconds,
            running: self.is_running(),
        }
    }

    /// Drops the poll schedule. Returns false if there was none.
    fn stop_polling(&mut self) -> bool {
        if self.poll.take().is_none() {
            return false;
        }
        self.end = None;
        true
    }

    fn emit(&self, event: TimerEvent) {
        if self.event_tx.send(event).is_err() {
            warn!("Timer event receiver dropped, discarding {:?}", event);
        }
    }
}

/// Whole seconds, rounded up.
fn ceil_secs(d: Duration) -> u32 {
    let secs = d.as_secs() + u64::from(d.subsec_nanos() > 0);
    u32::try_from(secs).unwrap_or(u32::MAX)
}

// ============================================================================
// Tests
// ============================================================================
