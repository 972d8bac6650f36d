//! Color and unicode aware decoration of level names, logger names and the
//! checked marker.
//!
//! All functions are pure: they read a [`DisplayConfig`] and return a new
//! string. ANSI styling comes from [`owo_colors`].

use owo_colors::{OwoColorize, Style};

use crate::level::Level;

/// Check glyph used by `checked` messages.
pub const CHECK_GLYPH: &str = "\u{2713}";

/// Marker used instead of [`CHECK_GLYPH`] when unicode is disabled.
pub const CHECKED_TEXT: &str = "(CHECKED)";

/// Display switches shared by every logger handle.
///
/// Testing mode always forces colors off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    colors_enabled: bool,
    unicode_disabled: bool,
    testing_mode: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::new(true, false, false)
    }
}

impl DisplayConfig {
    pub const fn new(colors_enabled: bool, unicode_disabled: bool, testing_mode: bool) -> Self {
        Self {
            colors_enabled: colors_enabled && !testing_mode,
            unicode_disabled,
            testing_mode,
        }
    }

    /// Plain output: no colors, no unicode.
    pub const fn plain() -> Self {
        Self::new(false, true, false)
    }

    pub const fn colors_enabled(&self) -> bool {
        self.colors_enabled
    }

    pub const fn unicode_disabled(&self) -> bool {
        self.unicode_disabled
    }

    pub const fn testing_mode(&self) -> bool {
        self.testing_mode
    }

    /// Toggle colors. Ignored while in testing mode.
    pub fn set_colors_enabled(&mut self, enabled: bool) {
        self.colors_enabled = enabled && !self.testing_mode;
    }

    pub fn set_unicode_disabled(&mut self, disabled: bool) {
        self.unicode_disabled = disabled;
    }
}

/// Style for one of the nine canonical levels, `None` for custom levels.
pub fn level_style(level: Level) -> Option<Style> {
    let style = match level.value() {
        60 => Style::new().underline().yellow().on_red(),
        59 => Style::new().blink().white().on_red(),
        50 => Style::new().bold().white().on_red(),
        40 => Style::new().underline().white().on_red(),
        30 => Style::new().bold().black().on_yellow(),
        20 => Style::new().bold().green(),
        10 => Style::new().reversed().black().on_cyan(),
        5 => Style::new().bold().bright_black(),
        1 => Style::new().reversed().black().on_white(),
        _ => return None,
    };
    Some(style)
}

const LOGGER_STYLE: Style = Style::new().bold().bright_black();
const CHECKED_STYLE: Style = Style::new().green();

/// The level's name, styled when colors are enabled.
pub fn decorate_level_name(level: Level, config: &DisplayConfig) -> String {
    match level_style(level) {
        Some(style) if config.colors_enabled() => level.name().style(style).to_string(),
        _ => level.name().to_string(),
    }
}

/// A logger name, in a neutral style when colors are enabled.
pub fn decorate_logger_name(name: &str, config: &DisplayConfig) -> String {
    if config.colors_enabled() {
        name.style(LOGGER_STYLE).to_string()
    } else {
        name.to_string()
    }
}

/// Prefix for `checked` messages.
///
/// - unicode disabled → `(CHECKED)`, colors or not
/// - unicode allowed, colors off → plain check glyph
/// - unicode allowed, colors on → green check glyph
pub fn checked_marker(config: &DisplayConfig) -> String {
    if config.unicode_disabled() {
        CHECKED_TEXT.to_string()
    } else if config.colors_enabled() {
        CHECK_GLYPH.style(CHECKED_STYLE).to_string()
    } else {
        CHECK_GLYPH.to_string()
    }
}
