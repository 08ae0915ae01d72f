//! Terminal front end.
//!
//! Runs the application on one task: a `tokio::select!` loop over engine
//! polls, engine events, input from a reader thread, the animation ticker
//! and Ctrl-C. The terminal is put into raw mode on an alternate screen and
//! restored when the guard drops, including on error paths.

use std::io::{self, Write};
use std::thread;

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyEvent};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
};
use crossterm::{execute, queue};
use tokio::sync::mpsc;
use tokio::time::{Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::controller::App;
use super::input::{map_key, Action};
use super::ui::{compose, Frame};
use crate::engine::{Clock, TimerEvent};
use crate::types::Theme;

/// How long the reader thread waits for input before checking for shutdown.
const INPUT_POLL: std::time::Duration = std::time::Duration::from_millis(100);

/// Terminal input forwarded from the reader thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Resize(u16, u16),
}

// ============================================================================
// TerminalGuard
// ============================================================================

/// Raw mode and alternate screen, undone on drop.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let guard = Self;
        execute!(io::stdout(), EnterAlternateScreen, Hide)
            .context("failed to enter alternate screen")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = execute!(io::stdout(), ResetColor, Show, LeaveAlternateScreen) {
            warn!("Failed to leave alternate screen: {}", e);
        }
        if let Err(e) = disable_raw_mode() {
            warn!("Failed to disable raw mode: {}", e);
        }
    }
}

// ============================================================================
// Input
// ============================================================================

/// Reads terminal events on a plain thread and forwards them.
///
/// The thread exits once the receiver is dropped or reading fails.
pub fn spawn_input_reader(tx: mpsc::UnboundedSender<InputEvent>) -> io::Result<()> {
    thread::Builder::new()
        .name("input-reader".to_string())
        .spawn(move || {
            while !tx.is_closed() {
                match event::poll(INPUT_POLL) {
                    Ok(false) => continue,
                    Ok(true) => {}
                    Err(e) => {
                        warn!("Failed to poll terminal input: {}", e);
                        break;
                    }
                }

                let input = match event::read() {
                    Ok(Event::Key(key)) => InputEvent::Key(key),
                    Ok(Event::Resize(w, h)) => InputEvent::Resize(w, h),
                    Ok(_) => continue,
                    Err(e) => {
                        warn!("Failed to read terminal input: {}", e);
                        break;
                    }
                };
                if tx.send(input).is_err() {
                    break;
                }
            }
            debug!("Input reader stopped");
        })?;
    Ok(())
}

// ============================================================================
// Screen
// ============================================================================

/// Writes composed frames to an output.
pub struct Screen<W: Write> {
    out: W,
    last_title: Option<String>,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_title: None,
        }
    }

    /// Draws a frame, updating the window title only when it changed.
    pub fn draw(&mut self, frame: &Frame, theme: Theme) -> io::Result<()> {
        if self.last_title.as_deref() != Some(frame.title.as_str()) {
            queue!(self.out, SetTitle(&frame.title))?;
            self.last_title = Some(frame.title.clone());
        }

        let (r, g, b) = theme.background_rgb();
        queue!(
            self.out,
            SetBackgroundColor(Color::Rgb { r, g, b }),
            SetForegroundColor(foreground(theme))
        )?;
        for (row, line) in frame.lines.iter().enumerate() {
            let row = u16::try_from(row).unwrap_or(u16::MAX);
            queue!(self.out, MoveTo(0, row), Print(line))?;
        }
        queue!(self.out, ResetColor)?;

        self.out.flush()
    }

    /// Rings the terminal bell.
    pub fn bell(&mut self) -> io::Result<()> {
        self.out.write_all(b"\x07")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn foreground(theme: Theme) -> Color {
    match theme {
        Theme::Snow => Color::Rgb {
            r: 0xf5,
            g: 0xf5,
            b: 0xf5,
        },
        Theme::Leaves => Color::Rgb {
            r: 0xe1,
            g: 0x8a,
            b: 0x3c,
        },
    }
}

// ============================================================================
// Event loop
// ============================================================================

/// Runs the interactive timer until the user quits.
///
/// Returns the application so the caller can report the final state.
pub async fn run<C: Clock>(
    mut app: App<C>,
    mut events: mpsc::UnboundedReceiver<TimerEvent>,
    frame_interval: Duration,
    autostart: bool,
) -> Result<App<C>> {
    let _guard = TerminalGuard::enter()?;
    let mut screen = Screen::new(io::stdout());

    let (mut width, mut height) = terminal::size().context("failed to read terminal size")?;
    app.resize(width, height);

    let (input_tx, mut input_rx) = mpsc::unbounded_channel();
    spawn_input_reader(input_tx).context("failed to start input reader")?;

    let mut frames = tokio::time::interval(frame_interval);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    if autostart {
        app.start();
    }
    info!("Timer screen opened");

    while !app.should_quit() {
        tokio::select! {
            _ = app.engine_mut().next_poll() => {
                app.poll();
            }
            Some(event) = events.recv() => {
                app.handle_event(event);
            }
            Some(input) = input_rx.recv() => match input {
                InputEvent::Key(key) => {
                    if let Some(action) = map_key(app.mode(), key) {
                        app.handle_action(action);
                    }
                }
                InputEvent::Resize(w, h) => {
                    (width, height) = (w, h);
                    app.resize(w, h);
                }
            },
            _ = frames.tick() => {
                app.step_frame();
            }
            _ = &mut ctrl_c => {
                app.handle_action(Action::Quit);
            }
        }

        if app.take_bell() {
            screen.bell().context("failed to ring bell")?;
        }
        screen
            .draw(&compose(&app, width, height), app.theme())
            .context("failed to draw frame")?;
    }

    // The reader thread notices the closed channel on its next poll.
    drop(input_rx);
    info!("Timer screen closed");
    Ok(app)
}
