//! Command-line argument definitions for `logme`.
//!
//! Uses [`clap`] derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::level::Level;

/// Redact structured payloads read from stdin.
///
/// Each stdin line is treated as one payload. JSON objects are written back
/// as compact JSON with sensitive fields obscured, non-string values dropped
/// and long values truncated. Anything else is passed through with embedded
/// credentials obscured. Diagnostics go to stderr.
#[derive(Debug, Parser)]
#[command(name = "logme", version, about, long_about = None)]
pub struct Cli {
    /// Control color in diagnostic output.
    ///
    /// `auto` enables colors only when stderr is a TTY and no
    /// colors-disabled indicator is set.
    #[arg(short = 'c', long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Verbosity of diagnostic output.
    #[arg(short = 'l', long, value_parser = parse_level_arg)]
    pub level: Option<Level>,

    /// Path to configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Logger namespace that follows the requested verbosity (repeatable).
    #[arg(short = 'p', long)]
    pub own_package: Vec<String>,

    /// Run in check mode: check confirmations are reported at INFO.
    #[arg(long)]
    pub check: bool,

    /// Terminate with status 3 on the first line that is not a JSON object.
    #[arg(short = 's', long)]
    pub strict: bool,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Enable colors only when stderr is a TTY.
    Auto,
    /// Always enable colors.
    Always,
    /// Never enable colors.
    Never,
}

/// Parse level argument as case-insensitive string.
fn parse_level_arg(s: &str) -> Result<Level, String> {
    Level::from_str_loose(s).ok_or_else(|| {
        format!(
            "invalid level '{s}': expected one of very_verbose, verbose, debug, info, warning, error, critical, print_stack, exit"
        )
    })
}
