//! Theme system for consistent UI colors across dark and light modes.

use ratatui::style::Color;

use crate::config::ThemeMode;

/// Semantic color theme for the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Primary color for borders and titles
    pub primary: Color,
    /// Accent color for the gallery cursor and focus states
    pub accent: Color,
    /// Marker color for the selected color
    pub success: Color,
    /// Color for unavailable catalogs
    pub warning: Color,

    /// Primary text content color
    pub text: Color,
    /// Muted text color for help text and disabled items
    pub text_muted: Color,

    /// Main background color
    pub background: Color,
    /// Cursor row background
    pub highlight_bg: Color,
}

impl Theme {
    /// Resolves a theme from the configured mode; `Auto` follows the OS.
    #[must_use]
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Auto => Self::detect(),
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Detects the OS theme and returns the matching Theme.
    #[must_use]
    pub fn detect() -> Self {
        Self::for_os_mode(dark_light::detect())
    }

    fn for_os_mode(mode: Result<dark_light::Mode, dark_light::Error>) -> Self {
        match mode {
            Ok(dark_light::Mode::Light) => Self::light(),
            // Fall back to dark theme for dark mode, unspecified, or errors
            Ok(dark_light::Mode::Dark | dark_light::Mode::Unspecified) | Err(_) => Self::dark(),
        }
    }

    /// Creates a dark theme optimized for dark terminal backgrounds.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            accent: Color::Yellow,
            success: Color::Green,
            warning: Color::Yellow,

            text: Color::White,
            text_muted: Color::DarkGray,

            background: Color::Black,
            highlight_bg: Color::DarkGray,
        }
    }

    /// Creates a light theme optimized for light terminal backgrounds.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::Blue,
            accent: Color::Rgb(180, 100, 0), // Dark orange for visibility
            success: Color::Rgb(0, 128, 0),
            warning: Color::Rgb(200, 100, 0),

            text: Color::Black,
            text_muted: Color::Gray,

            background: Color::White,
            highlight_bg: Color::Rgb(230, 230, 230),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}
