//! Named-logger engine: channel registry, sinks and record dispatch.
//!
//! This is the plain severity-based facility the rest of the crate builds
//! on. It knows nothing about colors, redaction or routing policy; it only
//! stores per-channel thresholds and fans records out to attached sinks.
//!
//! # Thread Safety
//!
//! The channel map and sink list sit behind `parking_lot::RwLock`s. A
//! threshold is a single word-sized cell; readers see either the old or the
//! new value while it is being changed.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::level::{self, Level};

/// Timestamp layout used by [`StreamSink`] unless configured otherwise.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Name under which the root channel is handed out. The empty name maps
/// to it as well.
pub const ROOT_CHANNEL: &str = "root";

fn is_root(name: &str) -> bool {
    name.is_empty() || name == ROOT_CHANNEL
}

/// A single log event on its way to the sinks.
#[derive(Debug, Clone)]
pub struct Record {
    pub level: Level,
    /// Level name as it should be displayed (may carry ANSI styling).
    pub level_label: String,
    /// Plain channel name.
    pub logger: String,
    /// Channel name as it should be displayed (may carry ANSI styling).
    pub logger_label: String,
    pub message: String,
    pub timestamp: jiff::Timestamp,
}

/// A named logger identity with its own threshold.
#[derive(Debug)]
pub struct Channel {
    name: String,
    threshold: RwLock<Level>,
}

impl Channel {
    fn new(name: impl Into<String>, threshold: Level) -> Self {
        Self {
            name: name.into(),
            threshold: RwLock::new(threshold),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn threshold(&self) -> Level {
        *self.threshold.read()
    }

    pub fn set_threshold(&self, level: Level) {
        *self.threshold.write() = level;
    }

    pub fn is_enabled_for(&self, level: Level) -> bool {
        level::is_enabled(self.threshold(), level)
    }
}

/// An entry in the channel map.
///
/// Requesting `a.b.c` leaves placeholders behind for `a` and `a.b` until
/// those names are requested themselves.
#[derive(Debug, Clone)]
pub enum Node {
    Placeholder,
    Concrete(Arc<Channel>),
}

impl Node {
    pub fn channel(&self) -> Option<&Arc<Channel>> {
        match self {
            Self::Concrete(channel) => Some(channel),
            Self::Placeholder => None,
        }
    }
}

/// Destination for records that passed every threshold.
///
/// Implementations serialize their own writes and must never panic on I/O
/// failure.
pub trait Sink: Send + Sync {
    fn emit(&self, record: &Record);

    fn flush(&self) {}
}

struct Attached {
    sink: Arc<dyn Sink>,
    threshold: RwLock<Level>,
}

/// Registry of channels and sinks.
pub struct Engine {
    root: Arc<Channel>,
    channels: RwLock<BTreeMap<String, Node>>,
    sinks: RwLock<Vec<Attached>>,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            root: Arc::new(Channel::new(ROOT_CHANNEL, Level::WARNING)),
            channels: RwLock::new(BTreeMap::new()),
            sinks: RwLock::new(Vec::new()),
        }
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("root", &self.root)
            .field("channels", &self.channels.read().len())
            .field("sinks", &self.sinks.read().len())
            .finish()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> &Arc<Channel> {
        &self.root
    }

    /// Get or create the channel called `name`.
    ///
    /// A new channel starts at `threshold`; an existing one is returned
    /// untouched. `"root"` and `""` always resolve to the root channel,
    /// which never appears in [`Engine::entries`].
    pub fn channel(&self, name: &str, threshold: Level) -> Arc<Channel> {
        if is_root(name) {
            return Arc::clone(&self.root);
        }
        if let Some(Node::Concrete(channel)) = self.channels.read().get(name) {
            return Arc::clone(channel);
        }

        let mut channels = self.channels.write();
        // Another thread may have won the race between the two locks.
        if let Some(Node::Concrete(channel)) = channels.get(name) {
            return Arc::clone(channel);
        }
        let channel = Arc::new(Channel::new(name, threshold));
        channels.insert(name.to_string(), Node::Concrete(Arc::clone(&channel)));

        let mut parent = name;
        while let Some((prefix, _)) = parent.rsplit_once('.') {
            channels
                .entry(prefix.to_string())
                .or_insert(Node::Placeholder);
            parent = prefix;
        }
        channel
    }

    /// Look up an existing concrete channel without creating it.
    pub fn get(&self, name: &str) -> Option<Arc<Channel>> {
        if is_root(name) {
            return Some(Arc::clone(&self.root));
        }
        self.channels.read().get(name).and_then(Node::channel).cloned()
    }

    /// Snapshot of every known entry, placeholders included, sorted by name.
    pub fn entries(&self) -> Vec<(String, Node)> {
        self.channels
            .read()
            .iter()
            .map(|(name, node)| (name.clone(), node.clone()))
            .collect()
    }

    /// Attach a sink that accepts everything until told otherwise.
    pub fn attach(&self, sink: Arc<dyn Sink>) {
        self.sinks.write().push(Attached {
            sink,
            threshold: RwLock::new(Level::VERY_VERBOSE),
        });
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.read().len()
    }

    /// Set the threshold of every attached sink.
    pub fn set_sink_thresholds(&self, level: Level) {
        for attached in self.sinks.read().iter() {
            *attached.threshold.write() = level;
        }
    }

    /// Thresholds of the attached sinks, in attach order.
    pub fn sink_thresholds(&self) -> Vec<Level> {
        self.sinks
            .read()
            .iter()
            .map(|a| *a.threshold.read())
            .collect()
    }

    /// Hand `record` to every sink whose threshold admits it.
    pub fn dispatch(&self, record: &Record) {
        for attached in self.sinks.read().iter() {
            if level::is_enabled(*attached.threshold.read(), record.level) {
                attached.sink.emit(record);
            }
        }
    }

    pub fn flush(&self) {
        for attached in self.sinks.read().iter() {
            attached.sink.flush();
        }
    }
}

/// Writes one formatted line per record.
///
/// `<timestamp> <LEVEL> <logger>: <message>`; the timestamp is left out when
/// no format is set (testing mode).
pub struct StreamSink {
    writer: Mutex<Box<dyn Write + Send>>,
    timestamp_format: Option<String>,
}

impl StreamSink {
    pub fn new(writer: Box<dyn Write + Send>, timestamp_format: Option<String>) -> Self {
        Self {
            writer: Mutex::new(writer),
            timestamp_format,
        }
    }

    pub fn stderr(timestamp_format: Option<String>) -> Self {
        Self::new(Box::new(io::stderr()), timestamp_format)
    }

    /// Render `record` the way it is written, without the trailing newline.
    pub fn format(&self, record: &Record) -> String {
        let body = format!(
            "{} {}: {}",
            record.level_label, record.logger_label, record.message
        );
        match &self.timestamp_format {
            Some(format) => {
                let zdt = record.timestamp.to_zoned(jiff::tz::TimeZone::UTC);
                format!("{} {body}", zdt.strftime(format))
            }
            None => body,
        }
    }
}

impl Sink for StreamSink {
    fn emit(&self, record: &Record) {
        let line = self.format(record);
        let _ = writeln!(self.writer.lock(), "{line}");
    }

    fn flush(&self) {
        let _ = self.writer.lock().flush();
    }
}

/// Keeps every record in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Record>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Record> {
        self.records.lock().clone()
    }

    /// Plain `LEVEL message` pairs, handy for assertions.
    pub fn lines(&self) -> Vec<(Level, String)> {
        self.records
            .lock()
            .iter()
            .map(|r| (r.level, r.message.clone()))
            .collect()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Sink for MemorySink {
    fn emit(&self, record: &Record) {
        self.records.lock().push(record.clone());
    }
}
