//! TUI event handling with crossterm.
//!
//! Polls the terminal for input and translates key events to [`Action`]s
//! through the active [`KeyBindings`]. Resize events fall through silently;
//! the next draw picks up the new size.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event};
use thiserror::Error;

use super::app::Action;
use super::keybindings::KeyBindings;

/// Error type for event handling.
#[derive(Debug, Error)]
pub enum EventError {
    /// I/O error while polling or reading terminal events.
    #[error("event I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Translates terminal events into actions.
#[derive(Debug, Clone, Default)]
pub struct EventHandler {
    bindings: KeyBindings,
}

impl EventHandler {
    /// Create an event handler with the default (Universal) bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an event handler with specific keybindings.
    #[must_use]
    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    /// The bindings in use, for rendering key hints.
    #[must_use]
    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Poll for the next action, waiting at most `timeout`.
    ///
    /// Returns `Ok(None)` when no event arrived in time, when the event was
    /// not a key press, or when the key is unbound.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Io`] if polling or reading from the terminal
    /// fails.
    pub fn poll(&self, timeout: Duration) -> Result<Option<Action>, EventError> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => {
                let action = self.bindings.resolve(&key);
                if let Some(action) = action {
                    log::trace!("Key {key:?} resolved to {action:?}");
                }
                Ok(action)
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::keybindings::KeybindingProfile;

    #[test]
    fn test_default_handler_uses_universal_profile() {
        let handler = EventHandler::new();
        assert_eq!(handler.bindings().profile(), KeybindingProfile::Universal);
    }

    #[test]
    fn test_with_bindings_keeps_profile() {
        let bindings = KeyBindings::from_profile(KeybindingProfile::Vim);
        let handler = EventHandler::with_bindings(bindings);
        assert_eq!(handler.bindings().profile(), KeybindingProfile::Vim);
    }

    #[test]
    fn test_event_error_display() {
        let err = EventError::Io(io::Error::other("boom"));
        assert!(err.to_string().contains("event I/O error"));
    }
}
