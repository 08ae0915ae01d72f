//! Interactive terminal application.
//!
//! - `input`: key bindings per screen mode
//! - `controller`: wires user actions and engine events to the engine,
//!   sound, notifications and backdrop
//! - `ui`: composes frames as text
//! - `terminal`: raw-mode guard, input thread and the event loop

pub mod controller;
pub mod input;
pub mod terminal;
pub mod ui;

pub use controller::App;
pub use input::{map_key, Action, Mode};
pub use terminal::{run, InputEvent, Screen, TerminalGuard};
pub use ui::{compose, Frame};
