//! Error types for `logme`.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Only programming-time
//! defects and configuration problems are errors; emitting a record never is.

use thiserror::Error;

/// Errors that can occur in `logme`.
#[derive(Debug, Error)]
pub enum LogmeError {
    /// A level was registered with a numeric value already in use.
    #[error("level {name} ({value}) collides with already registered level {existing}")]
    DuplicateLevel {
        name: &'static str,
        value: i32,
        existing: &'static str,
    },

    /// `exit_critical` was asked to terminate with a status below 1.
    #[error("cannot exit with code {0}: exit codes must be at least 1")]
    InvalidExitCode(i32),

    /// A credential pattern does not expose exactly one capture group.
    #[error("credential pattern {name} must have exactly one capture group, found {groups}")]
    InvalidPattern { name: String, groups: usize },

    /// A credential pattern failed to compile.
    #[error("invalid credential pattern: {0}")]
    Regex(#[from] regex::Error),

    /// Configuration error (unreadable config file, unknown level name).
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML deserialization error.
    #[error("config file error: {0}")]
    Toml(#[from] toml::de::Error),
}
