//! Frame composition.
//!
//! Builds the screen as plain text rows: the backdrop first, then the
//! countdown and any dialog drawn centred on top. Drawing the rows to the
//! terminal is left to [`super::terminal`].

use super::controller::App;
use super::input::Mode;
use crate::display::{format_time, window_title};
use crate::engine::Clock;
use crate::entry::TimeUnit;

const HELP: &str = "space start/pause  r reset  c custom  t theme  m music  q quit";
const ENTRY_HELP: &str = "0-9 digits  h/m/s unit  enter set  esc cancel";
const TIME_UP_TEXT: &str = "Time's up! Take a break.";

/// One composed screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub lines: Vec<String>,
    pub title: String,
}

/// Composes the screen for a `width` x `height` terminal.
pub fn compose<C: Clock>(app: &App<C>, width: u16, height: u16) -> Frame {
    let (w, h) = (usize::from(width), usize::from(height));
    let mut canvas = Canvas::from_rows(app.backdrop().render(), w, h);

    let engine = app.engine();
    let remaining = engine.remaining_seconds();
    let mid = h / 2;

    canvas.center(mid.saturating_sub(2), &format!("[ {} ]", format_time(remaining)));
    canvas.center(
        mid,
        status_text(engine.is_running(), remaining, engine.configured_seconds()),
    );
    canvas.center(mid + 2, &presets_text(app.presets()));

    let footer = format!(
        "{}   theme: {}  music: {}",
        HELP,
        app.theme().as_str(),
        if app.music_on() { "on" } else { "off" }
    );
    canvas.center(h.saturating_sub(1), &footer);

    match app.mode() {
        Mode::Normal => {}
        Mode::CustomEntry => {
            let mut body = vec![
                "Set custom time".to_string(),
                String::new(),
                entry_fields(app),
                String::new(),
            ];
            body.push(app.message().unwrap_or_default().to_string());
            body.push(ENTRY_HELP.to_string());
            canvas.dialog(mid, &body);
        }
        Mode::TimeUp => {
            let body = vec![
                TIME_UP_TEXT.to_string(),
                String::new(),
                "[ OK ]".to_string(),
            ];
            canvas.dialog(mid, &body);
        }
    }

    Frame {
        lines: canvas.into_lines(),
        title: window_title(remaining),
    }
}

fn status_text(running: bool, remaining: u32, configured: u32) -> &'static str {
    if running {
        "running"
    } else if remaining == 0 {
        "done"
    } else if remaining == configured {
        "ready"
    } else {
        "paused"
    }
}

fn presets_text(presets: &[u32]) -> String {
    presets
        .iter()
        .enumerate()
        .map(|(i, m)| format!("{}: {}m", i + 1, m))
        .collect::<Vec<_>>()
        .join("   ")
}

/// `01 hr  >25< min  00 sec`, marking the selected unit.
fn entry_fields<C: Clock>(app: &App<C>) -> String {
    let entry = app.entry();
    [TimeUnit::Hours, TimeUnit::Minutes, TimeUnit::Seconds]
        .into_iter()
        .map(|unit| {
            let value = entry.value(unit);
            if unit == entry.unit() {
                format!(">{:02}< {}", value, unit.label())
            } else {
                format!(" {:02}  {}", value, unit.label())
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// A grid of cells with text overlay helpers.
struct Canvas {
    width: usize,
    rows: Vec<Vec<char>>,
}

impl Canvas {
    /// Builds a canvas from rendered rows, padding or cutting to size.
    fn from_rows(rows: Vec<String>, width: usize, height: usize) -> Self {
        let mut grid: Vec<Vec<char>> = rows
            .into_iter()
            .take(height)
            .map(|row| {
                let mut cells: Vec<char> = row.chars().take(width).collect();
                cells.resize(width, ' ');
                cells
            })
            .collect();
        grid.resize(height, vec![' '; width]);

        Self { width, rows: grid }
    }

    /// Writes `text` centred on `row`, clearing the cells it covers.
    fn center(&mut self, row: usize, text: &str) {
        let Some(cells) = self.rows.get_mut(row) else {
            return;
        };
        let chars: Vec<char> = text.chars().take(self.width).collect();
        let start = (self.width - chars.len()) / 2;
        cells[start..start + chars.len()].copy_from_slice(&chars);
    }

    /// Draws a bordered box centred around `mid`.
    fn dialog(&mut self, mid: usize, body: &[String]) {
        let inner = body.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 2;
        let border = format!("+{}+", "-".repeat(inner));

        let mut lines = Vec::with_capacity(body.len() + 2);
        lines.push(border.clone());
        for line in body {
            let pad = inner - line.chars().count();
            let left = pad / 2;
            lines.push(format!(
                "|{}{}{}|",
                " ".repeat(left),
                line,
                " ".repeat(pad - left)
            ));
        }
        lines.push(border);

        let top = mid.saturating_sub(lines.len() / 2);
        for (i, line) in lines.iter().enumerate() {
            self.center(top + i, line);
        }
    }

    fn into_lines(self) -> Vec<String> {
        self.rows
            .into_iter()
            .map(|row| row.into_iter().collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::input::Action;
    use crate::effects::{Backdrop, LeavesEffect, SnowEffect};
    use crate::engine::{CountdownEngine, ManualClock};
    use crate::types::Theme;
    use tokio::sync::mpsc;

    fn app(seconds: u32) -> App<ManualClock> {
        let (tx, _rx) = mpsc::unbounded_channel();
        let engine = CountdownEngine::new(seconds, ManualClock::new(), tx).unwrap();
        let backdrop = Backdrop::from_effects(
            Theme::Snow,
            SnowEffect::with_seed(80, 24, 1),
            LeavesEffect::with_seed(80, 24, 2),
        );
        App::new(engine, backdrop, vec![25, 15, 5])
    }

    fn contains(frame: &Frame, text: &str) -> bool {
        frame.lines.iter().any(|l| l.contains(text))
    }

    #[test]
    fn test_frame_size() {
        let frame = compose(&app(1500), 80, 24);
        assert_eq!(frame.lines.len(), 24);
        assert!(frame.lines.iter().all(|l| l.chars().count() == 80));
    }

    #[test]
    fn test_countdown_and_title() {
        let frame = compose(&app(1500), 80, 24);
        assert!(contains(&frame, "[ 25:00 ]"));
        assert!(contains(&frame, "ready"));
        assert!(contains(&frame, "1: 25m"));
        assert_eq!(frame.title, "25:00 - Focus");
    }

    #[test]
    fn test_hours_shown() {
        let frame = compose(&app(3725), 80, 24);
        assert!(contains(&frame, "[ 01:02:05 ]"));
        assert_eq!(frame.title, "01:02:05 - Focus");
    }

    #[test]
    fn test_custom_entry_dialog() {
        let mut app = app(60);
        app.handle_action(Action::OpenCustomEntry);
        app.handle_action(Action::EntryDigit(4));
        app.handle_action(Action::EntryDigit(5));

        let frame = compose(&app, 80, 24);
        assert!(contains(&frame, "Set custom time"));
        assert!(contains(&frame, ">45< min"));
    }

    #[test]
    fn test_custom_entry_message() {
        let mut app = app(60);
        app.handle_action(Action::OpenCustomEntry);
        app.handle_action(Action::EntrySubmit);

        let frame = compose(&app, 80, 24);
        assert!(contains(&frame, "Please set a time greater than 0."));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut app = app(60);
        app.handle_action(Action::OpenCustomEntry);

        let frame = compose(&app, 5, 2);
        assert_eq!(frame.lines.len(), 2);

        let frame = compose(&app, 0, 0);
        assert!(frame.lines.is_empty());
    }
}
