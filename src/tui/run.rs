//! TUI main loop.
//!
//! This module provides the main entry point for running the interactive TUI.
//! It handles terminal setup, the event loop, persistence side effects, and
//! cleanup on exit.
//!
//! # Terminal Management
//!
//! The TUI takes over the terminal by:
//! - Enabling raw mode (unbuffered input, no echo)
//! - Entering the alternate screen buffer
//! - Hiding the cursor
//!
//! All these changes are reverted on exit, including on panic.
//!
//! # Event Loop
//!
//! The main loop follows this pattern:
//! 1. Render the current state
//! 2. Poll for events with a timeout and apply the resulting action
//! 3. Execute persistence the app flagged (save or reset)
//! 4. Periodically check the progress file for writes by other instances
//! 5. Limit frame rate to ~60 FPS

use std::io::{self, Stdout};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use thiserror::Error;

use super::app::App;
use super::events::EventHandler;
use super::theme::Theme;
use super::ui::render;
use crate::progress::ProgressStore;

/// Frame rate limit: 60 FPS = ~16.67ms per frame.
/// Using 16ms for slightly conservative timing.
const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Event poll timeout: Use the frame duration for responsive rendering.
const POLL_TIMEOUT: Duration = Duration::from_millis(16);

/// How often to stat the progress file for writes by other instances.
const EXTERNAL_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Error type for TUI operations.
#[derive(Debug, Error)]
pub enum TuiError {
    /// I/O error from terminal operations.
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),

    /// Event handling error.
    #[error("event error: {0}")]
    Event(#[from] super::events::EventError),

    /// The TUI was interrupted by a shutdown signal.
    #[error("interrupted by shutdown signal")]
    Interrupted,
}

/// Result type for TUI operations.
pub type TuiResult<T> = Result<T, TuiError>;

/// Type alias for the terminal backend.
type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

/// Run the interactive TUI.
///
/// Takes over the terminal and runs the interface until the user quits or an
/// error occurs. The store executes every persistence side effect the app
/// flags: saving after progress mutations, wiping the file on a confirmed
/// reset, and adopting external writes.
///
/// # Terminal Restoration
///
/// The terminal is always restored to its original state, even on error or
/// panic.
///
/// # Errors
///
/// Returns `TuiError::Io` for terminal I/O errors, `TuiError::Event` for
/// event handling errors, and `TuiError::Interrupted` if the shutdown flag
/// was raised (Ctrl+C outside raw mode).
pub fn run_tui(
    app: &mut App,
    store: &mut ProgressStore,
    event_handler: &EventHandler,
    theme: Theme,
    shutdown_flag: Option<Arc<AtomicBool>>,
) -> TuiResult<()> {
    // Set up panic hook to restore terminal on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before showing panic message
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    let result = run_tui_inner(app, store, event_handler, theme, shutdown_flag);

    // Restore the original panic hook
    let _ = panic::take_hook();

    result
}

/// Inner function that runs the TUI loop.
///
/// Separated from `run_tui` so terminal cleanup happens on every exit path.
fn run_tui_inner(
    app: &mut App,
    store: &mut ProgressStore,
    event_handler: &EventHandler,
    theme: Theme,
    shutdown_flag: Option<Arc<AtomicBool>>,
) -> TuiResult<()> {
    let mut terminal = setup_terminal()?;

    let mut last_render = Instant::now();
    let mut last_external_poll = Instant::now();
    let mut interrupted = false;

    loop {
        // Check for external shutdown signal
        if let Some(ref flag) = shutdown_flag {
            if flag.load(Ordering::SeqCst) {
                log::info!("Shutdown signal received, exiting TUI");
                interrupted = true;
                break;
            }
        }

        if app.should_quit() {
            log::debug!("App requested quit");
            break;
        }

        terminal.draw(|frame| render(frame, app, &theme, event_handler.bindings()))?;

        // Poll for events with timeout
        if let Some(action) = event_handler.poll(POLL_TIMEOUT)? {
            app.handle_action(action);
            run_pending_persistence(app, store);
        }

        // Notice writes from other instances (last writer wins)
        if last_external_poll.elapsed() >= EXTERNAL_POLL_INTERVAL {
            if let Some(state) = store.poll_external_change() {
                app.merge_external(state);
            }
            last_external_poll = Instant::now();
        }

        // Frame rate limiting
        let elapsed = last_render.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
        last_render = Instant::now();
    }

    restore_terminal()?;

    if interrupted {
        return Err(TuiError::Interrupted);
    }

    log::info!("TUI exited normally");
    Ok(())
}

/// Execute the persistence side effects the app flagged during an action.
///
/// Failures surface in the error overlay instead of killing the session; the
/// in-memory state stays authoritative and the next mutation retries.
fn run_pending_persistence(app: &mut App, store: &mut ProgressStore) {
    if app.take_pending_reset() {
        if let Err(e) = store.reset(app.progress_mut()) {
            log::warn!("Progress reset failed: {e:#}");
            app.set_error(format!("Could not reset progress: {e:#}"));
        }
        app.refresh_stats();
        return;
    }

    if app.take_pending_save() {
        if let Err(e) = store.save(app.progress()) {
            log::warn!("Progress save failed: {e:#}");
            app.set_error(format!("Could not save progress: {e:#}"));
        }
    }
}

/// Set up the terminal for TUI mode.
fn setup_terminal() -> TuiResult<Terminal> {
    log::debug!("Setting up terminal for TUI");

    // Enable raw mode (no line buffering, no echo)
    terminal::enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    log::debug!("Terminal setup complete");
    Ok(terminal)
}

/// Restore the terminal to its original state.
fn restore_terminal() -> TuiResult<()> {
    log::debug!("Restoring terminal");

    let _ = terminal::disable_raw_mode();

    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen, cursor::Show);

    log::debug!("Terminal restored");
    Ok(())
}
