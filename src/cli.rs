//! Command-line interface definitions for quizdrill.
//!
//! This module defines all CLI arguments, subcommands, and options using the
//! clap derive API. Running without a subcommand starts the interactive TUI;
//! `stats` and `reset` are non-interactive helpers for scripting.
//!
//! # Example
//!
//! ```bash
//! # Start the TUI
//! quizdrill
//!
//! # Jump straight into a deck-mode session
//! quizdrill --mode deck --deck "Networking" --deck "Rust"
//!
//! # Print progress stats as JSON
//! quizdrill stats --json
//!
//! # Wipe completed/starred without the TUI
//! quizdrill reset --yes
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::session::SessionMode;
use crate::tui::KeybindingProfile;

/// Terminal flashcard/quiz trainer.
///
/// quizdrill studies a question bank embedded in the binary (or a JSON file
/// given with --bank), tracks completed and starred questions, and resumes
/// every mode/deck combination at its last viewed question.
#[derive(Debug, Parser)]
#[command(name = "quizdrill")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Report fatal errors as JSON on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Question bank JSON file to use instead of the embedded bank
    #[arg(long, value_name = "PATH", global = true)]
    pub bank: Option<PathBuf>,

    /// Progress file path (default: platform data directory)
    #[arg(long, value_name = "PATH", global = true)]
    pub progress_file: Option<PathBuf>,

    /// Study mode preselected on the setup screen
    #[arg(short, long, value_enum, default_value_t = SessionMode::Deck)]
    pub mode: SessionMode,

    /// Preselect a deck (repeatable; order is study order)
    #[arg(short, long = "deck", value_name = "LABEL")]
    pub decks: Vec<String>,

    /// Color theme for the TUI
    #[arg(long, value_enum, value_name = "THEME")]
    pub theme: Option<ThemeArg>,

    /// Keybinding profile for the TUI
    #[arg(long, value_enum, value_name = "PROFILE")]
    pub keybindings: Option<KeybindingProfile>,

    /// Subcommand; none starts the interactive TUI
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Non-interactive subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print progress statistics and exit
    Stats(StatsArgs),
    /// Reset completed and starred questions
    Reset(ResetArgs),
}

/// Arguments for the stats subcommand.
#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Emit stats as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the reset subcommand.
#[derive(Debug, Args)]
pub struct ResetArgs {
    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// TUI theme selection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ThemeArg {
    /// Detect from the terminal environment, falling back to dark.
    #[default]
    Auto,
    /// High-contrast dark palette.
    Dark,
    /// High-contrast light palette.
    Light,
}

impl std::fmt::Display for ThemeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ThemeArg::Auto => "auto",
            ThemeArg::Dark => "dark",
            ThemeArg::Light => "light",
        };
        write!(f, "{name}")
    }
}
