//! Terminal User Interface module.
//!
//! The interactive study interface, built on ratatui with a crossterm
//! backend.
//!
//! # Architecture
//!
//! The TUI follows a unidirectional data flow:
//! 1. Events are captured from the terminal (crossterm)
//! 2. Events are translated to [`Action`]s by the active [`KeyBindings`]
//! 3. Actions modify the [`App`] state
//! 4. The UI renders from the current [`App`] state
//!
//! Persistence side effects (saving progress, resetting the file) are
//! signalled by the app through pending flags and executed by the run loop,
//! which also polls the progress file for writes from other instances.

pub mod app;
pub mod events;
pub mod keybindings;
pub mod run;
pub mod theme;
pub mod ui;

// Re-export commonly used types
pub use app::{Action, App, Screen};
pub use events::{EventError, EventHandler};
pub use keybindings::{KeyBindings, KeybindingError, KeybindingProfile};
pub use run::{run_tui, TuiError};
pub use theme::Theme;
