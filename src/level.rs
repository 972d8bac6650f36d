//! Extended severity taxonomy with registration and enable checks.
//!
//! On top of the conventional DEBUG..CRITICAL set this adds two chattier
//! levels below DEBUG ([`Level::VERY_VERBOSE`], [`Level::VERBOSE`]) and two
//! above CRITICAL ([`Level::PRINT_STACK`] and the terminal
//! [`Level::PROCESS_EXIT`]).

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use parking_lot::RwLock;

use crate::error::LogmeError;

/// A named severity level.
///
/// Ordering, equality and hashing only look at [`value`](Self::value):
/// a higher value is more severe. Names are display labels.
#[derive(Debug, Clone, Copy)]
pub struct Level {
    name: &'static str,
    value: i32,
    terminal: bool,
}

impl Level {
    pub const VERY_VERBOSE: Self = Self::new("VERY_VERBOSE", 1);
    pub const VERBOSE: Self = Self::new("VERBOSE", 5);
    pub const DEBUG: Self = Self::new("DEBUG", 10);
    pub const INFO: Self = Self::new("INFO", 20);
    pub const WARNING: Self = Self::new("WARNING", 30);
    pub const ERROR: Self = Self::new("ERROR", 40);
    pub const CRITICAL: Self = Self::new("CRITICAL", 50);
    pub const PRINT_STACK: Self = Self::new("PRINT_STACK", 59);
    /// Emitted right before the process terminates.
    pub const PROCESS_EXIT: Self = Self {
        name: "EXIT",
        value: 60,
        terminal: true,
    };

    /// The canonical taxonomy, lowest to highest severity.
    pub const CANONICAL: [Self; 9] = [
        Self::VERY_VERBOSE,
        Self::VERBOSE,
        Self::DEBUG,
        Self::INFO,
        Self::WARNING,
        Self::ERROR,
        Self::CRITICAL,
        Self::PRINT_STACK,
        Self::PROCESS_EXIT,
    ];

    /// A non-terminal level.
    pub const fn new(name: &'static str, value: i32) -> Self {
        Self {
            name,
            value,
            terminal: false,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn value(&self) -> i32 {
        self.value
    }

    /// `true` only for the process-exit level.
    pub const fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Parse a canonical level name, case-insensitive.
    ///
    /// Accepts `-` or `_` separators and the usual aliases. Returns `None`
    /// for unrecognized strings; custom levels are resolved through
    /// [`LevelRegistry::lookup`].
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "very_verbose" | "vv" => Some(Self::VERY_VERBOSE),
            "verbose" => Some(Self::VERBOSE),
            "debug" | "dbg" => Some(Self::DEBUG),
            "info" | "information" => Some(Self::INFO),
            "warning" | "warn" => Some(Self::WARNING),
            "error" | "err" => Some(Self::ERROR),
            "critical" | "crit" | "fatal" => Some(Self::CRITICAL),
            "print_stack" => Some(Self::PRINT_STACK),
            "exit" | "critical_exit" | "process_exit" => Some(Self::PROCESS_EXIT),
            _ => None,
        }
    }
}

impl PartialEq for Level {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Level {}

impl Hash for Level {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl PartialOrd for Level {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Level {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// `true` iff `level` is at least as severe as `threshold`.
pub fn is_enabled(threshold: Level, level: Level) -> bool {
    level.value >= threshold.value
}

/// The set of levels known to the process.
///
/// Starts with [`Level::CANONICAL`]. Values are unique; a registered level is
/// never removed or changed.
#[derive(Debug)]
pub struct LevelRegistry {
    levels: RwLock<Vec<Level>>,
}

impl Default for LevelRegistry {
    fn default() -> Self {
        Self {
            levels: RwLock::new(Level::CANONICAL.to_vec()),
        }
    }
}

impl LevelRegistry {
    /// Add a level to the taxonomy.
    ///
    /// Fails with [`LogmeError::DuplicateLevel`] when its numeric value is
    /// already taken.
    pub fn register(&self, level: Level) -> Result<(), LogmeError> {
        let mut levels = self.levels.write();
        if let Some(existing) = levels.iter().find(|l| l.value == level.value) {
            return Err(LogmeError::DuplicateLevel {
                name: level.name,
                value: level.value,
                existing: existing.name,
            });
        }
        let pos = levels.partition_point(|l| l.value < level.value);
        levels.insert(pos, level);
        Ok(())
    }

    /// Resolve a level name: canonical names and aliases first, then any
    /// registered level whose name matches case-insensitively.
    pub fn lookup(&self, name: &str) -> Option<Level> {
        Level::from_str_loose(name).or_else(|| {
            self.levels
                .read()
                .iter()
                .find(|l| l.name.eq_ignore_ascii_case(name.trim()))
                .copied()
        })
    }

    pub fn by_value(&self, value: i32) -> Option<Level> {
        self.levels.read().iter().find(|l| l.value == value).copied()
    }

    /// All known levels, lowest to highest severity.
    pub fn levels(&self) -> Vec<Level> {
        self.levels.read().clone()
    }
}
