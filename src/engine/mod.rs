//! Countdown engine for the focus timer.
//!
//! - `countdown`: the engine and its events
//! - `clock`: time sources (system and manual)
//! - `poll`: the cancellable 1-second poll schedule
//! - `error`: engine error types

pub mod clock;
pub mod countdown;
pub mod error;
pub mod poll;

pub use clock::{Clock, ManualClock, SystemClock};
pub use countdown::{CountdownEngine, TimerEvent};
pub use error::{EngineError, InvalidDurationReason};
pub use poll::{PollHandle, POLL_INTERVAL};
