//! Logger handles with the extended severity methods.
//!
//! [`ExtendedLog`] carries the level-specific behavior (`checked`, `fail`,
//! `exit_critical`, ...) as provided methods over a handful of primitives, so
//! anything that can gate, emit and flush gets the whole surface.
//! [`Logger`] is the implementation handed out by
//! [`LoggerFactory`](crate::factory::LoggerFactory).

use std::backtrace::Backtrace;
use std::convert::Infallible;
use std::io::{self, Write};
use std::sync::Arc;

use serde::Serialize;

use crate::engine::{Channel, Engine, Record};
use crate::error::LogmeError;
use crate::factory::Settings;
use crate::level::Level;
use crate::render::{self, DisplayConfig};

/// Prefix for [`ExtendedLog::fail`] messages.
pub const FAIL_MARKER: &str = "(FAIL)";

/// The extended logging interface.
pub trait ExtendedLog {
    fn is_enabled_for(&self, level: Level) -> bool;

    /// Emit `message` at `level` if enabled.
    fn log(&self, level: Level, message: &str);

    /// Display switches in effect right now.
    fn display(&self) -> DisplayConfig;

    /// `true` while the process runs in check mode.
    fn check_mode(&self) -> bool;

    /// Flush every sink the records may be buffered in.
    fn flush(&self);

    fn very_verbose(&self, message: &str) {
        self.log(Level::VERY_VERBOSE, message);
    }

    fn verbose(&self, message: &str) {
        self.log(Level::VERBOSE, message);
    }

    fn debug(&self, message: &str) {
        self.log(Level::DEBUG, message);
    }

    fn info(&self, message: &str) {
        self.log(Level::INFO, message);
    }

    fn warning(&self, message: &str) {
        self.log(Level::WARNING, message);
    }

    fn error(&self, message: &str) {
        self.log(Level::ERROR, message);
    }

    fn critical(&self, message: &str) {
        self.log(Level::CRITICAL, message);
    }

    /// Level used by [`checked`](Self::checked): INFO in check mode,
    /// VERBOSE otherwise.
    fn checked_level(&self) -> Level {
        if self.check_mode() {
            Level::INFO
        } else {
            Level::VERBOSE
        }
    }

    /// Report a successful check, prefixed with a check mark.
    fn checked(&self, message: &str) {
        let level = self.checked_level();
        if self.is_enabled_for(level) {
            let marker = render::checked_marker(&self.display());
            self.log(level, &format!("{marker} {message}"));
        }
    }

    /// Like [`checked`](Self::checked) but always with the plain text marker.
    fn checked_simple(&self, message: &str) {
        self.log(
            self.checked_level(),
            &format!("{}\t{message}", render::CHECKED_TEXT),
        );
    }

    fn fail(&self, message: &str) {
        self.error(&format!("{FAIL_MARKER}\t{message}"));
    }

    /// Write `message` straight to stdout, bypassing the sinks, when DEBUG
    /// is enabled.
    fn print(&self, message: &str) {
        let _ = self.print_to(&mut io::stdout().lock(), message);
    }

    /// [`print`](Self::print) into any writer.
    fn print_to(&self, out: &mut dyn Write, message: &str) -> io::Result<()> {
        if self.is_enabled_for(Level::DEBUG) {
            writeln!(out, "{message}")?;
        }
        Ok(())
    }

    /// Log at PRINT_STACK followed by the current backtrace.
    fn print_stack(&self, message: &str) {
        if self.is_enabled_for(Level::PRINT_STACK) {
            let trace = Backtrace::force_capture();
            self.log(Level::PRINT_STACK, &format!("{message}\n{trace}"));
        }
    }

    /// Pretty-print any serializable value at DEBUG.
    fn pretty<T>(&self, value: &T, prefix: Option<&str>)
    where
        T: Serialize + ?Sized,
        Self: Sized,
    {
        if !self.is_enabled_for(Level::DEBUG) {
            return;
        }
        let body = serde_json::to_string_pretty(value)
            .unwrap_or_else(|e| format!("<unserializable value: {e}>"));
        match prefix {
            Some(prefix) => self.debug(&format!("PRETTY PRINT [{prefix}]\n{body}")),
            None => self.debug(&body),
        }
    }

    /// Log at PROCESS_EXIT, flush, and terminate the process with `code`.
    ///
    /// The record is level-gated, the exit is not. Codes below 1 are
    /// rejected with [`LogmeError::InvalidExitCode`] and nothing happens.
    fn exit_critical(&self, code: i32, message: Option<&str>) -> Result<Infallible, LogmeError> {
        if code < 1 {
            return Err(LogmeError::InvalidExitCode(code));
        }
        if let Some(message) = message {
            self.log(Level::PROCESS_EXIT, message);
        }
        self.flush();
        std::process::exit(code)
    }

    /// Alias of [`exit_critical`](Self::exit_critical).
    fn exit(&self, code: i32, message: Option<&str>) -> Result<Infallible, LogmeError> {
        self.exit_critical(code, message)
    }
}

/// A named handle bound to one engine channel.
///
/// Cloning is cheap. Every clone, and every handle for the same name, shares
/// the channel threshold and the factory [`Settings`], so display and mode
/// changes reach handles that were issued earlier.
#[derive(Debug, Clone)]
pub struct Logger {
    channel: Arc<Channel>,
    engine: Arc<Engine>,
    settings: Arc<Settings>,
}

impl Logger {
    pub(crate) fn new(channel: Arc<Channel>, engine: Arc<Engine>, settings: Arc<Settings>) -> Self {
        Self {
            channel,
            engine,
            settings,
        }
    }

    pub fn name(&self) -> &str {
        self.channel.name()
    }

    pub fn threshold(&self) -> Level {
        self.channel.threshold()
    }

    pub fn set_threshold(&self, level: Level) {
        self.channel.set_threshold(level);
    }

    /// The logger name as it is shown in output right now.
    pub fn display_name(&self) -> String {
        render::decorate_logger_name(self.name(), &self.display())
    }
}

impl ExtendedLog for Logger {
    fn is_enabled_for(&self, level: Level) -> bool {
        self.channel.is_enabled_for(level)
    }

    fn log(&self, level: Level, message: &str) {
        if !self.is_enabled_for(level) {
            return;
        }
        let display = self.display();
        let record = Record {
            level,
            level_label: render::decorate_level_name(level, &display),
            logger: self.name().to_string(),
            logger_label: render::decorate_logger_name(self.name(), &display),
            message: message.to_string(),
            timestamp: jiff::Timestamp::now(),
        };
        self.engine.dispatch(&record);
    }

    fn display(&self) -> DisplayConfig {
        self.settings.display()
    }

    fn check_mode(&self) -> bool {
        self.settings.is_check_mode()
    }

    fn flush(&self) {
        self.engine.flush();
    }
}
