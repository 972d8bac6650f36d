//! `logme`: extended severity levels, colorized rendering, payload
//! redaction and threshold routing on top of a named-logger engine.
//!
//! The crate adds levels around the conventional set (`VERY_VERBOSE`,
//! `VERBOSE`, `PRINT_STACK` and a process-terminating `EXIT`), decorates
//! level and logger names for terminals, scrubs passwords and tokens out of
//! structured payloads before they are logged, and routes thresholds so that
//! an application's own loggers stay verbose while noisy dependencies are
//! held at WARNING.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use logme::engine::{Engine, MemorySink};
//! use logme::{Config, ExtendedLog, Level, LoggerFactory, Redactor};
//!
//! let engine = Arc::new(Engine::new());
//! let sink = Arc::new(MemorySink::new());
//! engine.attach(sink.clone());
//!
//! let factory = LoggerFactory::with_engine(&Config::default(), engine);
//! let log = factory.get_logger("app.server");
//! factory.apply_global_threshold(Some("app"), Some(Level::DEBUG));
//!
//! let payload = Redactor::default().scrub(br#"{"password":"hunter2","user":"bob"}"#);
//! log.info(&payload.to_log_string());
//!
//! assert_eq!(sink.lines()[0].1, r#"{"password":"****","user":"bob"}"#);
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod factory;
pub mod fields;
pub mod level;
pub mod logger;
pub mod redact;
pub mod render;
pub mod router;

// Re-export primary API types for convenience.
pub use config::Config;
pub use error::LogmeError;
pub use factory::LoggerFactory;
pub use level::{Level, LevelRegistry, is_enabled};
pub use logger::{ExtendedLog, Logger};
pub use redact::{CredentialPattern, Redactor, Scrubbed};
pub use render::DisplayConfig;
pub use router::{LevelRouter, RoutingRule};
