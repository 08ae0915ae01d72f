//! Focus Timer CLI - a Pomodoro countdown for the terminal
//!
//! Run `focus-timer run` to open the timer. Presets, a custom time dialog,
//! an alarm with desktop notification on expiry, optional background music
//! and two animated themes are available from the keyboard.

use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tokio::sync::mpsc;
use tokio::time::Duration;

use focus_timer::app::{self, App};
use focus_timer::cli::{Cli, Commands, RunArgs};
use focus_timer::display::Display;
use focus_timer::effects::Backdrop;
use focus_timer::engine::{CountdownEngine, SystemClock};
use focus_timer::notification::{DesktopNotifier, NotificationSender};
use focus_timer::sound::player_from_config;
use focus_timer::AppConfig;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so they never mix with the timer screen or JSON output.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Run(args)) => {
            run_timer(cli.config.as_deref(), &args).await?;
        }
        Some(Commands::Config) => {
            let config = AppConfig::load(cli.config.as_deref())?;
            Display::show_config(&config).context("failed to serialize config")?;
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Opens the interactive timer.
async fn run_timer(config_path: Option<&Path>, args: &RunArgs) -> Result<()> {
    let mut config = AppConfig::load(config_path)?;
    args.apply(&mut config);

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let engine = CountdownEngine::new(args.initial_seconds(&config), SystemClock, event_tx)
        .context("invalid initial duration")?;

    let sound = player_from_config(&config.sound);
    let notifier: Rc<dyn NotificationSender> = Rc::new(DesktopNotifier::new(config.notifications));

    let app = App::new(engine, Backdrop::new(config.theme, 0, 0), config.presets.clone())
        .with_sound(sound)
        .with_notifier(notifier)
        .with_music(config.sound.music);

    let frame_interval = Duration::from_millis(config.frame_interval_ms);
    let app = app::run(app, event_rx, frame_interval, args.autostart).await?;

    let engine = app.engine();
    Display::show_session_end(engine.remaining_seconds(), engine.is_running());
    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
