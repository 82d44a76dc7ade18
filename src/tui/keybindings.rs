//! Keybinding configuration for the TUI.
//!
//! Supports multiple profiles and custom key mappings layered on top of a
//! profile. The default profile (Universal) answers to both vim-style keys
//! AND arrow keys simultaneously.
//!
//! # Profiles
//!
//! - [`KeybindingProfile::Universal`]: Both vim-style AND arrow keys (default)
//! - [`KeybindingProfile::Vim`]: Vim-style keys only (hjkl)
//! - [`KeybindingProfile::Standard`]: Arrow keys and standard shortcuts only
//!
//! # Example
//!
//! ```
//! use quizdrill::tui::keybindings::{KeyBindings, KeybindingProfile};
//! use quizdrill::tui::Action;
//! use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
//!
//! let bindings = KeyBindings::from_profile(KeybindingProfile::Universal);
//!
//! // Both 'j' and Down arrow move the deck cursor down
//! let j_key = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
//! let down_key = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
//!
//! assert_eq!(bindings.resolve(&j_key), Some(Action::NavigateDown));
//! assert_eq!(bindings.resolve(&down_key), Some(Action::NavigateDown));
//! ```

use std::collections::HashMap;

use clap::ValueEnum;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::Action;

/// Keybinding profile presets.
///
/// Each profile defines a complete set of keybindings tailored for
/// different navigation styles.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Hash,
    ValueEnum,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum KeybindingProfile {
    /// Universal profile: Supports BOTH vim-style AND arrow key navigation.
    ///
    /// The recommended default; works regardless of the user's preferred
    /// navigation style.
    #[default]
    Universal,

    /// Vim profile: Vim-style navigation using hjkl keys.
    ///
    /// Familiar to vim/neovim users. Does not include arrow key navigation.
    Vim,

    /// Standard profile: Arrow keys and standard shortcuts only.
    ///
    /// Familiar to users of traditional GUI applications. Does not include
    /// vim-style navigation.
    Standard,
}

impl KeybindingProfile {
    /// Get the display name for the profile.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Universal => "Universal (Vim + Arrow keys)",
            Self::Vim => "Vim (hjkl)",
            Self::Standard => "Standard (Arrow keys)",
        }
    }

    /// Get all available profiles.
    #[must_use]
    pub fn all() -> &'static [KeybindingProfile] {
        &[Self::Universal, Self::Vim, Self::Standard]
    }
}

impl std::fmt::Display for KeybindingProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Universal => "universal",
            Self::Vim => "vim",
            Self::Standard => "standard",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for KeybindingProfile {
    type Err = KeybindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "universal" => Ok(Self::Universal),
            "vim" => Ok(Self::Vim),
            "standard" | "arrows" | "arrow" => Ok(Self::Standard),
            _ => Err(KeybindingError::InvalidProfile(s.to_string())),
        }
    }
}

/// Error type for keybinding operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum KeybindingError {
    /// Invalid profile name.
    #[error("Unknown keybinding profile: '{0}'. Valid profiles: universal, vim, standard")]
    InvalidProfile(String),

    /// Invalid key specification.
    #[error("Invalid key specification: '{0}'. Examples: 'j', 'Ctrl+c', 'Down', 'Space', 'F1'")]
    InvalidKeySpec(String),

    /// Invalid action name.
    #[error("Unknown action: '{0}'. Valid actions: {}", Action::all_names().join(", "))]
    InvalidAction(String),
}

/// Keybinding configuration mapping actions to key events.
///
/// Maps each [`Action`] to a list of [`KeyEvent`]s that can trigger it.
/// Multiple keys can trigger the same action, but a given key triggers at
/// most one action.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    /// The profile these bindings are based on.
    profile: KeybindingProfile,

    /// Mapping from actions to the key events that trigger them.
    action_keys: HashMap<Action, Vec<KeyEvent>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_profile(KeybindingProfile::Universal)
    }
}

impl KeyBindings {
    /// Create keybindings from a specific profile.
    #[must_use]
    pub fn from_profile(profile: KeybindingProfile) -> Self {
        let action_keys = match profile {
            KeybindingProfile::Universal => Self::universal_bindings(),
            KeybindingProfile::Vim => Self::vim_bindings(),
            KeybindingProfile::Standard => Self::standard_bindings(),
        };

        Self {
            profile,
            action_keys,
        }
    }

    /// Get the keybinding profile.
    #[must_use]
    pub fn profile(&self) -> KeybindingProfile {
        self.profile
    }

    /// Resolve a key event to an action.
    ///
    /// Returns `Some(Action)` if the key event is bound to an action,
    /// or `None` if the key is not mapped.
    ///
    /// Key release events are ignored (some terminals send these); only
    /// key press events are matched.
    #[must_use]
    pub fn resolve(&self, key: &KeyEvent) -> Option<Action> {
        if key.kind != crossterm::event::KeyEventKind::Press {
            return None;
        }

        for (action, keys) in &self.action_keys {
            if keys.iter().any(|k| Self::key_matches(k, key)) {
                return Some(*action);
            }
        }

        None
    }

    /// Check if a key event matches a target key event.
    ///
    /// Matches code and modifiers, ignoring kind and state.
    fn key_matches(target: &KeyEvent, actual: &KeyEvent) -> bool {
        target.code == actual.code && target.modifiers == actual.modifiers
    }

    /// Get the keys bound to a specific action.
    ///
    /// Returns an empty slice if the action is not bound.
    #[must_use]
    pub fn keys_for_action(&self, action: &Action) -> &[KeyEvent] {
        self.action_keys
            .get(action)
            .map_or(&[], |keys| keys.as_slice())
    }

    /// Get a human-readable string for the first key bound to an action.
    ///
    /// Useful for displaying hints in the UI footer.
    #[must_use]
    pub fn key_hint(&self, action: &Action) -> String {
        self.keys_for_action(action)
            .first()
            .map_or_else(String::new, Self::format_key)
    }

    /// Format a key event as a human-readable string.
    #[must_use]
    pub fn format_key(key: &KeyEvent) -> String {
        let mut parts = Vec::new();

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl");
        }
        if key.modifiers.contains(KeyModifiers::ALT) {
            parts.push("Alt");
        }
        if key.modifiers.contains(KeyModifiers::SHIFT) {
            parts.push("Shift");
        }

        let key_name = match key.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::PageUp => "PgUp".to_string(),
            KeyCode::PageDown => "PgDn".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "Shift+Tab".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Delete => "Delete".to_string(),
            KeyCode::F(n) => format!("F{n}"),
            _ => "?".to_string(),
        };

        if parts.is_empty() {
            key_name
        } else {
            parts.push(&key_name);
            parts.join("+")
        }
    }

    /// Parse a key specification string into a KeyEvent.
    ///
    /// Supports formats like:
    /// - Simple keys: "j", "k", "Space", "Enter", "Esc"
    /// - Arrow keys: "Up", "Down", "Left", "Right"
    /// - Special keys: "PageUp", "PgDn", "Home", "End"
    /// - Function keys: "F1" through "F12"
    /// - With modifiers: "Ctrl+c", "Alt+j", "Ctrl+Shift+a"
    ///
    /// # Errors
    ///
    /// Returns `KeybindingError::InvalidKeySpec` if the specification
    /// cannot be parsed.
    pub fn parse_key(spec: &str) -> Result<KeyEvent, KeybindingError> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Err(KeybindingError::InvalidKeySpec(spec.to_string()));
        }

        // Split on '+' but handle the '+' key itself
        let parts: Vec<&str> = if spec == "+" {
            vec!["+"]
        } else {
            spec.split('+').map(str::trim).collect()
        };

        let mut modifiers = KeyModifiers::NONE;
        let mut key_part = None;

        for (i, part) in parts.iter().enumerate() {
            let lower = part.to_lowercase();
            match lower.as_str() {
                "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                "alt" | "meta" | "option" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => {
                    // This should be the actual key (last part)
                    if i != parts.len() - 1 {
                        return Err(KeybindingError::InvalidKeySpec(format!(
                            "'{spec}' - unexpected modifier position for '{part}'"
                        )));
                    }
                    key_part = Some(*part);
                }
            }
        }

        let key_str = key_part.ok_or_else(|| {
            KeybindingError::InvalidKeySpec(format!("'{spec}' - missing key after modifiers"))
        })?;

        let code = Self::parse_key_code(key_str)
            .ok_or_else(|| KeybindingError::InvalidKeySpec(spec.to_string()))?;

        Ok(KeyEvent::new(code, modifiers))
    }

    /// Parse a key code from a string.
    fn parse_key_code(s: &str) -> Option<KeyCode> {
        let lower = s.to_lowercase();

        // Function keys first (F1-F12)
        if let Some(rest) = lower.strip_prefix('f') {
            if let Ok(n) = rest.parse::<u8>() {
                if (1..=12).contains(&n) {
                    return Some(KeyCode::F(n));
                }
            }
        }

        match lower.as_str() {
            // Single printable chars
            _ if s.len() == 1 && s.chars().next().map(|c| c.is_ascii()).unwrap_or(false) => {
                Some(KeyCode::Char(s.chars().next()?))
            }

            // Special named keys
            "space" | "spc" => Some(KeyCode::Char(' ')),
            "enter" | "return" | "ret" | "cr" => Some(KeyCode::Enter),
            "esc" | "escape" => Some(KeyCode::Esc),
            "tab" => Some(KeyCode::Tab),
            "backtab" | "shifttab" => Some(KeyCode::BackTab),
            "backspace" | "bs" => Some(KeyCode::Backspace),
            "delete" | "del" => Some(KeyCode::Delete),
            "insert" | "ins" => Some(KeyCode::Insert),

            // Arrow keys
            "up" | "uparrow" => Some(KeyCode::Up),
            "down" | "downarrow" => Some(KeyCode::Down),
            "left" | "leftarrow" => Some(KeyCode::Left),
            "right" | "rightarrow" => Some(KeyCode::Right),

            // Navigation keys
            "pageup" | "pgup" | "page_up" => Some(KeyCode::PageUp),
            "pagedown" | "pgdn" | "pgdown" | "page_down" => Some(KeyCode::PageDown),
            "home" => Some(KeyCode::Home),
            "end" => Some(KeyCode::End),

            _ => None,
        }
    }

    /// Parse an action name from a string.
    ///
    /// # Errors
    ///
    /// Returns `KeybindingError::InvalidAction` if the name is not recognized.
    pub fn parse_action(name: &str) -> Result<Action, KeybindingError> {
        name.parse::<Action>()
            .map_err(|_| KeybindingError::InvalidAction(name.to_string()))
    }

    /// Merge custom keybindings with profile defaults.
    ///
    /// Custom bindings are added to the existing bindings for each action
    /// rather than replacing them, so profile defaults stay usable. A key
    /// claimed by a custom binding is removed from every other action so the
    /// override wins.
    ///
    /// # Errors
    ///
    /// Returns an error if any action name or key specification is invalid.
    pub fn with_custom_overrides(
        mut self,
        custom: &HashMap<String, Vec<String>>,
    ) -> Result<Self, KeybindingError> {
        for (action_name, key_specs) in custom {
            let action = Self::parse_action(action_name)?;

            for key_spec in key_specs {
                let key_event = Self::parse_key(key_spec)?;

                for (other_action, other_keys) in &mut self.action_keys {
                    if *other_action != action {
                        other_keys.retain(|k| !Self::key_matches(k, &key_event));
                    }
                }

                self.action_keys.entry(action).or_default().push(key_event);
            }
        }

        Ok(self)
    }

    /// Create keybindings from a profile with custom overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if any custom binding is invalid.
    pub fn from_profile_with_custom(
        profile: KeybindingProfile,
        custom: &HashMap<String, Vec<String>>,
    ) -> Result<Self, KeybindingError> {
        Self::from_profile(profile).with_custom_overrides(custom)
    }

    // =========================================================================
    // Profile Binding Definitions
    // =========================================================================

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    /// Bindings shared by every profile: confirm/cancel, flashcard actions,
    /// reset, quit.
    fn common_bindings() -> HashMap<Action, Vec<KeyEvent>> {
        let mut bindings = HashMap::new();

        bindings.insert(
            Action::CycleMode,
            vec![
                Self::key(KeyCode::Tab, KeyModifiers::NONE),
                Self::key(KeyCode::Char('m'), KeyModifiers::NONE),
            ],
        );

        bindings.insert(
            Action::ToggleSelect,
            vec![Self::key(KeyCode::Char(' '), KeyModifiers::NONE)],
        );

        bindings.insert(
            Action::ShowAnswer,
            vec![Self::key(KeyCode::Char('a'), KeyModifiers::NONE)],
        );

        bindings.insert(
            Action::ToggleStar,
            vec![
                Self::key(KeyCode::Char('s'), KeyModifiers::NONE),
                Self::key(KeyCode::Char('*'), KeyModifiers::NONE),
            ],
        );

        bindings.insert(
            Action::ResetProgress,
            vec![Self::key(KeyCode::Char('r'), KeyModifiers::NONE)],
        );

        bindings.insert(
            Action::Confirm,
            vec![Self::key(KeyCode::Enter, KeyModifiers::NONE)],
        );

        bindings.insert(
            Action::Cancel,
            vec![Self::key(KeyCode::Esc, KeyModifiers::NONE)],
        );

        bindings.insert(
            Action::Quit,
            vec![
                Self::key(KeyCode::Char('q'), KeyModifiers::NONE),
                Self::key(KeyCode::Char('c'), KeyModifiers::CONTROL),
            ],
        );

        bindings
    }

    /// Universal bindings: Both vim-style AND arrow keys.
    fn universal_bindings() -> HashMap<Action, Vec<KeyEvent>> {
        let mut bindings = Self::common_bindings();

        bindings.insert(
            Action::NavigateDown,
            vec![
                Self::key(KeyCode::Char('j'), KeyModifiers::NONE),
                Self::key(KeyCode::Down, KeyModifiers::NONE),
            ],
        );

        bindings.insert(
            Action::NavigateUp,
            vec![
                Self::key(KeyCode::Char('k'), KeyModifiers::NONE),
                Self::key(KeyCode::Up, KeyModifiers::NONE),
            ],
        );

        bindings.insert(
            Action::NextQuestion,
            vec![
                Self::key(KeyCode::Char('n'), KeyModifiers::NONE),
                Self::key(KeyCode::Char('l'), KeyModifiers::NONE),
                Self::key(KeyCode::Right, KeyModifiers::NONE),
            ],
        );

        bindings.insert(
            Action::PreviousQuestion,
            vec![
                Self::key(KeyCode::Char('p'), KeyModifiers::NONE),
                Self::key(KeyCode::Char('h'), KeyModifiers::NONE),
                Self::key(KeyCode::Left, KeyModifiers::NONE),
            ],
        );

        bindings
    }

    /// Vim-style bindings: hjkl navigation without arrow keys.
    fn vim_bindings() -> HashMap<Action, Vec<KeyEvent>> {
        let mut bindings = Self::common_bindings();

        bindings.insert(
            Action::NavigateDown,
            vec![Self::key(KeyCode::Char('j'), KeyModifiers::NONE)],
        );

        bindings.insert(
            Action::NavigateUp,
            vec![Self::key(KeyCode::Char('k'), KeyModifiers::NONE)],
        );

        bindings.insert(
            Action::NextQuestion,
            vec![Self::key(KeyCode::Char('l'), KeyModifiers::NONE)],
        );

        bindings.insert(
            Action::PreviousQuestion,
            vec![Self::key(KeyCode::Char('h'), KeyModifiers::NONE)],
        );

        bindings
    }

    /// Standard bindings: Arrow keys without vim-style navigation.
    fn standard_bindings() -> HashMap<Action, Vec<KeyEvent>> {
        let mut bindings = Self::common_bindings();

        bindings.insert(
            Action::NavigateDown,
            vec![Self::key(KeyCode::Down, KeyModifiers::NONE)],
        );

        bindings.insert(
            Action::NavigateUp,
            vec![Self::key(KeyCode::Up, KeyModifiers::NONE)],
        );

        bindings.insert(
            Action::NextQuestion,
            vec![
                Self::key(KeyCode::Right, KeyModifiers::NONE),
                Self::key(KeyCode::PageDown, KeyModifiers::NONE),
            ],
        );

        bindings.insert(
            Action::PreviousQuestion,
            vec![
                Self::key(KeyCode::Left, KeyModifiers::NONE),
                Self::key(KeyCode::PageUp, KeyModifiers::NONE),
            ],
        );

        bindings
    }
}
