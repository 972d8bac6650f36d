//! Configuration management with environment and TOML file support.
//!
//! Merges settings from four sources (highest precedence first):
//! 1. CLI flags (binary only)
//! 2. Config file (`--config`, `$LOGME_CONFIG`, or
//!    `$XDG_CONFIG_HOME/logme/config.toml`)
//! 3. Environment indicators (`DEBUG_LEVEL`, `IDONTWANTCOLORS`, `NO_COLOR`,
//!    `TESTING`, `DISABLE_UNICODE`)
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::{Cli, ColorMode};
use crate::engine::DEFAULT_TIMESTAMP_FORMAT;
use crate::error::LogmeError;
use crate::factory::CHECK_ACTION;
use crate::level::Level;
use crate::render::DisplayConfig;

/// Initial verbosity name.
pub const ENV_DEBUG_LEVEL: &str = "DEBUG_LEVEL";
/// Presence disables colors.
pub const ENV_NO_COLORS: &str = "IDONTWANTCOLORS";
/// Presence enables testing mode (no colors, no timestamps).
pub const ENV_TESTING: &str = "TESTING";
/// Presence replaces unicode glyphs with plain text.
pub const ENV_DISABLE_UNICODE: &str = "DISABLE_UNICODE";
/// Explicit config file path.
pub const ENV_CONFIG: &str = "LOGME_CONFIG";

/// Runtime configuration merged from defaults, environment, config file and
/// CLI arguments.
///
/// Use [`Config::from_env`] in libraries, [`Config::from_cli`] in the binary,
/// or [`Config::default`] in tests.
#[derive(Debug, Clone)]
pub struct Config {
    /// Working threshold for new loggers.
    pub level: Level,
    pub colors_enabled: bool,
    pub unicode_disabled: bool,
    /// Forces colors off and drops timestamps from stream output.
    pub testing_mode: bool,
    /// strftime-compatible timestamp layout for stream output.
    pub timestamp_format: String,
    /// Logger namespaces that follow the application threshold.
    pub own_packages: Vec<String>,
    /// Extra namespaces pinned at WARNING, on top of the built-in list.
    pub noisy_packages: Vec<String>,
    /// Threshold for every logger that is not own.
    pub external_level: Level,
    /// Current action; `check` escalates `checked` messages.
    pub action: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: Level::VERY_VERBOSE,
            colors_enabled: true,
            unicode_disabled: false,
            testing_mode: false,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            own_packages: Vec::new(),
            noisy_packages: Vec::new(),
            external_level: Level::WARNING,
            action: None,
        }
    }
}

impl Config {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(|key| {
            std::env::var_os(key).map(|v| v.to_string_lossy().into_owned())
        })
    }

    /// Defaults overlaid with whatever `lookup` returns for each variable.
    ///
    /// An unknown `DEBUG_LEVEL` keeps the default.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(level) = lookup(ENV_DEBUG_LEVEL).and_then(|s| Level::from_str_loose(&s)) {
            config.level = level;
        }
        if lookup(ENV_NO_COLORS).is_some() || lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            config.colors_enabled = false;
        }
        if lookup(ENV_TESTING).is_some() {
            config.testing_mode = true;
            config.colors_enabled = false;
        }
        if lookup(ENV_DISABLE_UNICODE).is_some() {
            config.unicode_disabled = true;
        }
        config
    }

    /// Build a [`Config`] from CLI arguments, loading the config file if present.
    ///
    /// Merge precedence: CLI flags > config file > environment > defaults.
    pub fn from_cli(cli: &Cli) -> Result<Self, LogmeError> {
        let mut config = Self::from_env();

        let config_path = cli
            .config
            .clone()
            .or_else(|| std::env::var_os(ENV_CONFIG).map(PathBuf::from))
            .unwrap_or_else(Self::default_config_path);

        if config_path.exists() {
            config.load_file(&config_path)?;
        }

        match cli.color {
            ColorMode::Always => config.colors_enabled = !config.testing_mode,
            ColorMode::Never => config.colors_enabled = false,
            ColorMode::Auto => {}
        }
        if let Some(level) = cli.level {
            config.level = level;
        }
        for package in &cli.own_package {
            if !config.own_packages.contains(package) {
                config.own_packages.push(package.clone());
            }
        }
        if cli.check {
            config.action = Some(CHECK_ACTION.to_string());
        }

        Ok(config)
    }

    /// Default config file path: `$XDG_CONFIG_HOME/logme/config.toml` or `~/.config/logme/config.toml`.
    fn default_config_path() -> PathBuf {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(xdg).join("logme").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("logme")
                .join("config.toml")
        } else {
            PathBuf::from(".config/logme/config.toml")
        }
    }

    /// Overlay the TOML file at `path`.
    pub fn load_file(&mut self, path: &Path) -> Result<(), LogmeError> {
        let file_config = FileConfig::load(path)?;
        self.apply_file_config(file_config)
    }

    /// The display switches this configuration resolves to.
    pub fn display(&self) -> DisplayConfig {
        DisplayConfig::new(self.colors_enabled, self.unicode_disabled, self.testing_mode)
    }

    /// Timestamp layout for stream sinks; `None` in testing mode.
    pub fn sink_timestamp_format(&self) -> Option<String> {
        (!self.testing_mode).then(|| self.timestamp_format.clone())
    }

    /// Apply settings from a parsed config file.
    fn apply_file_config(&mut self, file: FileConfig) -> Result<(), LogmeError> {
        if let Some(level) = file.level {
            self.level = parse_level(&level)?;
        }
        if let Some(colors) = file.colors {
            self.colors_enabled = colors;
        }
        if let Some(unicode) = file.unicode {
            self.unicode_disabled = !unicode;
        }
        if let Some(testing) = file.testing {
            self.testing_mode = testing;
        }
        if self.testing_mode {
            self.colors_enabled = false;
        }
        if let Some(format) = file.timestamp_format {
            self.timestamp_format = format;
        }

        if let Some(routing) = file.routing {
            if let Some(own) = routing.own_packages {
                self.own_packages = own;
            }
            if let Some(noisy) = routing.noisy_packages {
                self.noisy_packages = noisy;
            }
            if let Some(level) = routing.external_level {
                self.external_level = parse_level(&level)?;
            }
        }
        Ok(())
    }
}

fn parse_level(name: &str) -> Result<Level, LogmeError> {
    Level::from_str_loose(name).ok_or_else(|| LogmeError::Config(format!("unknown level '{name}'")))
}

/// Config file structure (TOML deserialization).
#[derive(Debug, Deserialize)]
struct FileConfig {
    level: Option<String>,
    colors: Option<bool>,
    unicode: Option<bool>,
    testing: Option<bool>,
    timestamp_format: Option<String>,
    routing: Option<RoutingConfig>,
}

#[derive(Debug, Deserialize)]
struct RoutingConfig {
    own_packages: Option<Vec<String>>,
    noisy_packages: Option<Vec<String>>,
    external_level: Option<String>,
}

impl FileConfig {
    fn load(path: &Path) -> Result<Self, LogmeError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LogmeError::Config(format!("cannot read config file {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}
