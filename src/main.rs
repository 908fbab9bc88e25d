//! # alien-console CLI Entry Point
//!
//! Shows the splash screen, then the personal terminal, on the full terminal.
//!
//! ## Usage
//!
//! ```bash
//! # Use the per-user or system-wide config
//! alien-console
//!
//! # Use a specific config file
//! alien-console ./console/config.json
//!
//! # Log everything to the log file
//! ALIEN_CONSOLE_LOG=trace alien-console
//! ```
//!
//! ## Key Bindings
//!
//! - `Up` / `k` - Select the previous folder
//! - `Down` / `j` - Select the next folder
//! - `Left` / `h` - Scroll the content up one line
//! - `Right` / `l` - Scroll the content down one line
//! - `q` / `Q` / `Esc` / `Ctrl+c` - Quit
//!
//! ## Exit Status
//!
//! 0 after quitting normally. 1 on any failure, with a traceback written to
//! stderr once the terminal has been restored.

use alien_console::config::{self, Params};
use alien_console::logging;
use alien_console::ui::splash::Sleeper;
use alien_console::ui::{
    CrosstermKeyReader, KeyReader, PersonalTerminal, Splash, TerminalSurface, ThreadSleeper,
};
use alien_console::ResultExt;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::Rng;
use ratatui::backend::{Backend, CrosstermBackend};
use std::io;
use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;

type ConsoleSurface = TerminalSurface<CrosstermBackend<io::Stdout>>;

/// alien-console - a personal terminal with a splash screen
#[derive(Parser, Debug)]
#[command(name = "alien-console")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A personal terminal: splash screen, folders and scrollable content", long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Logging is best effort; the console works without it
    if let Err(err) = logging::init() {
        eprintln!("Warning: logging disabled: {err}");
    }

    // Set up panic hook to ensure terminal is restored on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal_mode();
        original_hook(panic_info);
    }));

    let result = run_application(args);

    // Restore panic hook
    let _ = panic::take_hook();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn run_application(args: Args) -> Result<()> {
    // Every file is read before the terminal changes mode
    let params = config::load(args.config)?;

    let mut surface = setup_terminal()?;

    let run_result = run_screens(
        &mut surface,
        params,
        &mut ThreadSleeper,
        &mut rand::thread_rng(),
        &mut CrosstermKeyReader,
    );

    // Restore terminal (always runs, even if the screens failed)
    let cleanup_result = cleanup_terminal(&mut surface);

    run_result?;
    cleanup_result?;

    Ok(())
}

/// Splash first, then the personal terminal until the user quits.
fn run_screens<B, Z, R, K>(
    surface: &mut TerminalSurface<B>,
    params: Params,
    sleeper: &mut Z,
    rng: &mut R,
    keys: &mut K,
) -> alien_console::Result<()>
where
    B: Backend,
    Z: Sleeper,
    R: Rng,
    K: KeyReader,
{
    let splash = Splash::new(&params.splash, &*surface).mark("preparing splash screen")?;
    splash
        .run(surface, sleeper, rng)
        .mark("running splash screen")?;

    let mut terminal =
        PersonalTerminal::new(params.entries, &*surface).mark("preparing personal terminal")?;
    terminal
        .run(surface, keys)
        .mark("running personal terminal")
}

/// Switch to raw mode on the alternate screen
fn setup_terminal() -> Result<ConsoleSurface> {
    enable_raw_mode().context("Failed to enable raw mode")?;

    let surface = enter_alternate_screen();
    if surface.is_err() {
        restore_terminal_mode();
    }
    surface
}

fn enter_alternate_screen() -> Result<ConsoleSurface> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide).context("Failed to enter alternate screen")?;
    let surface = TerminalSurface::new(CrosstermBackend::new(stdout))?;
    Ok(surface)
}

/// Best-effort restore for paths that cannot report errors
fn restore_terminal_mode() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

/// Clean up terminal state
fn cleanup_terminal(surface: &mut ConsoleSurface) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;

    execute!(surface.terminal_mut().backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;

    surface
        .terminal_mut()
        .show_cursor()
        .context("Failed to show cursor")?;

    Ok(())
}

/// Print a traceback for library errors, the cause chain for anything else.
fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<alien_console::Error>() {
        Some(err) => eprint!("{}", err.report()),
        None => eprintln!("Error: {err:?}"),
    }
}
