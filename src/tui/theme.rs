//! TUI theming support.
//!
//! The `Theme` struct defines the color palette used by every screen. Dark
//! and light palettes are provided, plus an automatic mode that sniffs the
//! terminal environment.

use ratatui::style::Color;

/// A collection of colors used for TUI components.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub danger: Color,
    pub success: Color,
    pub star: Color,
    pub dim: Color,
    pub normal: Color,
    pub inverted_fg: Color,
}

impl Theme {
    /// Create a high-contrast dark theme (default).
    ///
    /// Palette:
    /// - Primary: Cyan (headers, borders)
    /// - Secondary: Magenta (selections, active mode)
    /// - Danger: Red (errors, reset confirmation)
    /// - Success: Green (completed questions, progress)
    /// - Star: Yellow (starred questions)
    /// - Dim: DarkGray (secondary text, hints)
    /// - Normal: White (main text)
    /// - Inverted FG: Black (text on colored background)
    pub fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            secondary: Color::Magenta,
            danger: Color::Red,
            success: Color::Green,
            star: Color::Yellow,
            dim: Color::DarkGray,
            normal: Color::White,
            inverted_fg: Color::Black,
        }
    }

    /// Create a high-contrast light theme.
    pub fn light() -> Self {
        Self {
            primary: Color::Blue,
            secondary: Color::Magenta,
            danger: Color::Red,
            success: Color::Green,
            star: Color::Rgb(166, 110, 0),
            dim: Color::Gray,
            normal: Color::Black,
            inverted_fg: Color::White,
        }
    }

    /// Detect terminal theme or return dark theme as default.
    pub fn auto() -> Self {
        if is_light_terminal() {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Check if this is a light theme.
    pub fn is_light(&self) -> bool {
        self.normal == Color::Black
    }
}

/// Simple heuristic to detect if the terminal is light-themed.
///
/// Checks common environment variables used by some terminal emulators.
fn is_light_terminal() -> bool {
    // COLORFGBG is set by some terminals (e.g. rxvt, xterm, konsole).
    // Format is "fg;bg", where bg is typically an index 0-15.
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        let parts: Vec<&str> = colorfgbg.split(';').collect();
        if let Some(bg) = parts.last() {
            if let Ok(bg_num) = bg.parse::<u32>() {
                // 0=black, 7=gray, 15=white; 8 is usually dark gray
                return bg_num >= 7 && bg_num != 8;
            }
        }
    }

    false // Default to dark if unsure
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_dark() {
        let theme = Theme::default();
        assert!(!theme.is_light());
        assert_eq!(theme.normal, Color::White);
    }

    #[test]
    fn test_light_detection() {
        assert!(Theme::light().is_light());
        assert!(!Theme::dark().is_light());
    }
}
