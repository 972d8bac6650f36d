//! Process-wide logger factory and the settings it shares with every handle.
//!
//! A [`LoggerFactory`] is normally built once from a [`Config`] and passed
//! around by reference; [`LoggerFactory::global`] offers the same thing as a
//! lazily initialized static for code that cannot thread one through.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use crate::config::Config;
use crate::engine::{Engine, StreamSink};
use crate::error::LogmeError;
use crate::level::{Level, LevelRegistry};
use crate::logger::{ExtendedLog, Logger};
use crate::render::DisplayConfig;
use crate::router::{LevelRouter, RoutingRule};

/// Action name that escalates `checked` messages to INFO.
pub const CHECK_ACTION: &str = "check";

static GLOBAL: OnceLock<LoggerFactory> = OnceLock::new();

/// State shared by the factory and every [`Logger`] it issued.
///
/// Mutations are last-writer-wins; a log call racing a change sees either
/// the old or the new value.
#[derive(Debug)]
pub struct Settings {
    display: RwLock<DisplayConfig>,
    log_level: RwLock<Level>,
    action: RwLock<Option<String>>,
    levels: LevelRegistry,
}

impl Settings {
    fn new(display: DisplayConfig, log_level: Level, action: Option<String>) -> Self {
        Self {
            display: RwLock::new(display),
            log_level: RwLock::new(log_level),
            action: RwLock::new(action),
            levels: LevelRegistry::default(),
        }
    }

    pub fn display(&self) -> DisplayConfig {
        *self.display.read()
    }

    pub fn log_level(&self) -> Level {
        *self.log_level.read()
    }

    pub fn action(&self) -> Option<String> {
        self.action.read().clone()
    }

    pub fn is_check_mode(&self) -> bool {
        self.action.read().as_deref() == Some(CHECK_ACTION)
    }

    pub fn levels(&self) -> &LevelRegistry {
        &self.levels
    }
}

/// Issues named [`Logger`] handles and owns the process-wide settings.
pub struct LoggerFactory {
    engine: Arc<Engine>,
    settings: Arc<Settings>,
    router: LevelRouter,
    own_packages: BTreeSet<String>,
    external_level: Level,
    routing: RwLock<Option<RoutingRule>>,
    loggers: RwLock<HashMap<String, Logger>>,
}

impl std::fmt::Debug for LoggerFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerFactory")
            .field("engine", &self.engine)
            .field("settings", &self.settings)
            .field("loggers", &self.loggers.read().len())
            .finish_non_exhaustive()
    }
}

impl LoggerFactory {
    /// A factory writing to stderr.
    pub fn new(config: &Config) -> Self {
        let engine = Arc::new(Engine::new());
        engine.attach(Arc::new(StreamSink::stderr(config.sink_timestamp_format())));
        Self::with_engine(config, engine)
    }

    /// A factory on top of an existing engine and its sinks.
    pub fn with_engine(config: &Config, engine: Arc<Engine>) -> Self {
        let settings = Settings::new(config.display(), config.level, config.action.clone());
        Self {
            engine,
            settings: Arc::new(settings),
            router: LevelRouter::new(config.noisy_packages.iter().cloned()),
            own_packages: config.own_packages.iter().cloned().collect(),
            external_level: config.external_level,
            routing: RwLock::new(None),
            loggers: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide factory, built from the environment on first use.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(|| Self::new(&Config::from_env()))
    }

    /// Initialize the process-wide factory from `config`.
    ///
    /// If it already exists, the existing instance is returned and `config`
    /// is ignored.
    pub fn init_global(config: &Config) -> &'static Self {
        GLOBAL.get_or_init(|| Self::new(config))
    }

    pub fn engine(&self) -> &Arc<Engine> {
        &self.engine
    }

    pub fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    /// The handle for `name`, created at the working threshold on first request.
    pub fn get_logger(&self, name: &str) -> Logger {
        if let Some(logger) = self.loggers.read().get(name) {
            return logger.clone();
        }
        let mut loggers = self.loggers.write();
        loggers
            .entry(name.to_string())
            .or_insert_with(|| {
                let channel = self.engine.channel(name, self.settings.log_level());
                Logger::new(channel, Arc::clone(&self.engine), Arc::clone(&self.settings))
            })
            .clone()
    }

    /// Change the working threshold for loggers created from now on.
    ///
    /// `level` wins if given, otherwise DEBUG when `enabled`, INFO when not.
    /// Returns the new working threshold.
    pub fn set_debug(&self, enabled: bool, level: Option<Level>) -> Level {
        let new_level = match (enabled, level) {
            (_, Some(level)) => level,
            (true, None) => Level::DEBUG,
            (false, None) => Level::INFO,
        };
        *self.settings.log_level.write() = new_level;
        new_level
    }

    pub fn log_level(&self) -> Level {
        self.settings.log_level()
    }

    /// Set or clear the current action; [`CHECK_ACTION`] escalates `checked`.
    pub fn set_action(&self, action: Option<&str>) {
        *self.settings.action.write() = action.map(str::to_string);
    }

    pub fn display(&self) -> DisplayConfig {
        self.settings.display()
    }

    /// Modify the display switches seen by every handle.
    pub fn update_display(&self, f: impl FnOnce(&mut DisplayConfig)) {
        f(&mut *self.settings.display.write());
    }

    pub fn levels(&self) -> &LevelRegistry {
        self.settings.levels()
    }

    pub fn register_level(&self, level: Level) -> Result<(), LogmeError> {
        self.settings.levels.register(level)
    }

    /// The rule applied by the most recent routing call, if any.
    pub fn routing(&self) -> Option<RoutingRule> {
        self.routing.read().clone()
    }

    /// Route every known logger: `package` and the configured own packages
    /// run at `app_level` (default: the working threshold), everything else
    /// at the external level.
    pub fn apply_global_threshold(&self, package: Option<&str>, app_level: Option<Level>) -> Level {
        let mut own = self.own_packages.clone();
        if let Some(package) = package.filter(|p| !p.is_empty()) {
            own.insert(package.to_string());
        }
        let app_level = app_level.unwrap_or_else(|| self.log_level());
        self.apply_routing(RoutingRule {
            own_package_prefixes: own,
            external_threshold: self.external_level,
            app_threshold: app_level,
        });
        app_level
    }

    /// Apply an explicit rule and remember it.
    pub fn apply_routing(&self, rule: RoutingRule) {
        self.router.apply_global_threshold(&self.engine, &rule);
        *self.routing.write() = Some(rule);
    }

    pub fn flush(&self) {
        self.engine.flush();
    }

    /// Forward records from the `log` facade into this factory.
    pub fn install_log_bridge(&'static self) -> Result<(), log::SetLoggerError> {
        log::set_logger(self)?;
        log::set_max_level(log::LevelFilter::Trace);
        Ok(())
    }
}

/// Map a `log` facade level onto the extended taxonomy.
pub const fn from_log_level(level: log::Level) -> Level {
    match level {
        log::Level::Trace => Level::VERY_VERBOSE,
        log::Level::Debug => Level::DEBUG,
        log::Level::Info => Level::INFO,
        log::Level::Warn => Level::WARNING,
        log::Level::Error => Level::ERROR,
    }
}

/// `log` targets use `::` paths; channels use dots.
fn channel_name(target: &str) -> String {
    target.replace("::", ".")
}

impl log::Log for LoggerFactory {
    /// Unknown targets are judged against the working threshold without
    /// creating a channel for them.
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        let level = from_log_level(metadata.level());
        match self.engine.get(&channel_name(metadata.target())) {
            Some(channel) => channel.is_enabled_for(level),
            None => crate::level::is_enabled(self.log_level(), level),
        }
    }

    fn log(&self, record: &log::Record<'_>) {
        let logger = self.get_logger(&channel_name(record.target()));
        let level = from_log_level(record.level());
        if logger.is_enabled_for(level) {
            logger.log(level, &record.args().to_string());
        }
    }

    fn flush(&self) {
        self.engine.flush();
    }
}
