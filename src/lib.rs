//! quizdrill - Terminal Flashcards
//!
//! A cross-platform terminal flashcard trainer. Questions live in decks in a
//! JSON bank (embedded in the binary, or supplied with `--bank`); study
//! progress (completed questions, starred questions, per-session resume
//! positions) persists as JSON in the platform data directory and is shared
//! last-writer-wins between concurrently running instances.

pub mod app;
pub mod bank;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod progress;
pub mod session;
pub mod stats;
pub mod tui;

pub use app::run_app;
