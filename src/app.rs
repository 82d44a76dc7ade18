//! Application orchestration.
//!
//! `run_app` wires the pieces together: logging, bank loading, progress
//! loading and reconciliation, then either a non-interactive subcommand
//! (`stats`, `reset`) or the interactive TUI.

use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::bank::{load_bank, QuestionBank};
use crate::cli::{Cli, Commands, ResetArgs, StatsArgs, ThemeArg};
use crate::config::Config;
use crate::error::ExitCode;
use crate::logging::init_logging;
use crate::progress::{ProgressState, ProgressStore};
use crate::stats::Stats;
use crate::tui::{run_tui, App, EventHandler, KeyBindings, Theme, TuiError};

/// Run the application and return the exit code.
///
/// # Errors
///
/// Returns an error for unrecoverable failures: an unusable question bank
/// (`BankError`, mapped to exit code 2 in `main`), broken keybinding
/// configuration, or terminal I/O failures.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    init_logging(cli.verbose, cli.quiet);

    let bank = load_bank(cli.bank.as_deref())?;

    let mut store = match &cli.progress_file {
        Some(path) => ProgressStore::new(path.clone()),
        None => ProgressStore::from_default_path()?,
    };
    let mut progress = store.load();
    reconcile_progress(&mut progress, &bank, &mut store);

    match cli.command {
        Some(Commands::Stats(ref args)) => run_stats(args, &bank, &progress),
        Some(Commands::Reset(ref args)) => run_reset(args, &mut store, &mut progress),
        None => run_interactive(cli, bank, progress, store),
    }
}

/// Drop progress entries whose ids vanished from the bank, and persist the
/// pruned state so the file matches what the user sees.
fn reconcile_progress(progress: &mut ProgressState, bank: &QuestionBank, store: &mut ProgressStore) {
    let pruned = progress.retain_known(bank);
    if pruned == 0 {
        return;
    }

    log::warn!("Pruned {pruned} progress entries for questions no longer in the bank");
    if let Err(e) = store.save(progress) {
        // Not fatal: the in-memory state is already pruned and the next
        // regular save writes it through
        log::warn!("Could not persist pruned progress: {e:#}");
    }
}

/// `quizdrill stats`: print aggregated progress and exit.
fn run_stats(args: &StatsArgs, bank: &QuestionBank, progress: &ProgressState) -> Result<ExitCode> {
    let stats = Stats::compute(bank, progress);

    if args.json {
        let json = serde_json::to_string_pretty(&stats).context("failed to serialize stats")?;
        println!("{json}");
    } else {
        println!("{stats}");
    }

    Ok(ExitCode::Success)
}

/// `quizdrill reset`: wipe completed/starred after confirmation.
fn run_reset(
    args: &ResetArgs,
    store: &mut ProgressStore,
    progress: &mut ProgressState,
) -> Result<ExitCode> {
    if !args.yes && !confirm_on_stdin("Reset completed and starred questions? [y/N] ")? {
        println!("Reset cancelled.");
        return Ok(ExitCode::Success);
    }

    store.reset(progress)?;
    println!("Progress reset. Saved positions were kept.");
    Ok(ExitCode::Success)
}

/// Ask a yes/no question on the terminal. Anything but y/yes is a no.
fn confirm_on_stdin(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    io::stdout().flush().context("failed to flush stdout")?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read confirmation")?;

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Run the interactive TUI until the user quits.
fn run_interactive(
    cli: Cli,
    bank: QuestionBank,
    progress: ProgressState,
    mut store: ProgressStore,
) -> Result<ExitCode> {
    let mut config = Config::load();

    // CLI flags override the stored preferences and become the new defaults
    let mut config_changed = false;
    if let Some(theme) = cli.theme {
        config_changed |= config.theme != theme;
        config.theme = theme;
    }
    if let Some(profile) = cli.keybindings {
        config_changed |= config.keybindings != profile;
        config.keybindings = profile;
    }
    if config_changed {
        if let Err(e) = config.save() {
            log::debug!("Could not persist config: {e:#}");
        }
    }

    let bindings = KeyBindings::from_profile_with_custom(config.keybindings, &config.custom_bindings)
        .context("invalid custom keybindings in config")?;
    let event_handler = EventHandler::with_bindings(bindings);

    let theme = match config.theme {
        ThemeArg::Auto => Theme::auto(),
        ThemeArg::Dark => Theme::dark(),
        ThemeArg::Light => Theme::light(),
    };

    let shutdown_flag = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&shutdown_flag);
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    })
    .context("failed to install Ctrl+C handler")?;

    let mut app = App::new(bank, progress, cli.mode, cli.decks);

    match run_tui(
        &mut app,
        &mut store,
        &event_handler,
        theme,
        Some(shutdown_flag),
    ) {
        Ok(()) => Ok(ExitCode::Success),
        Err(TuiError::Interrupted) => {
            log::info!("Interrupted by user");
            Ok(ExitCode::Interrupted)
        }
        Err(e) => Err(e.into()),
    }
}
