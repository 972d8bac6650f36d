//! `exit_critical` terminates the process even when the EXIT record itself
//! is filtered out.
//!
//! The test re-runs this test binary with `EXIT_CHILD_ENV` set; the child
//! takes the exit path and the parent inspects its status and stderr.

use std::io::{self, BufWriter};
use std::sync::Arc;

use assert_cmd::Command;
use predicates::prelude::*;

use logme::engine::{Engine, StreamSink};
use logme::{Config, ExtendedLog, Level, LoggerFactory};

const EXIT_CHILD_ENV: &str = "LOGME_EXIT_CHILD";
const TEST_NAME: &str = "process_exit::exit_terminates_with_exit_level_suppressed";

/// Above PROCESS_EXIT, so nothing can pass it.
const SILENT: Level = Level::new("SILENT", 70);

fn run_child() -> ! {
    let engine = Arc::new(Engine::new());
    // Buffered so the record only reaches stderr if the exit path flushes.
    let stderr = BufWriter::with_capacity(64 * 1024, io::stderr());
    engine.attach(Arc::new(StreamSink::new(Box::new(stderr), None)));
    let config = Config {
        colors_enabled: false,
        ..Config::default()
    };
    let factory = LoggerFactory::with_engine(&config, engine);

    factory.get_logger("app.worker").error("before exit");
    let log = factory.get_logger("app.shutdown");
    log.set_threshold(SILENT);
    match log.exit_critical(4, Some("shutting down")) {
        Ok(never) => match never {},
        Err(e) => panic!("exit_critical refused a valid code: {e}"),
    }
}

#[test]
fn exit_terminates_with_exit_level_suppressed() {
    if std::env::var_os(EXIT_CHILD_ENV).is_some() {
        run_child();
    }

    let exe = std::env::current_exe().unwrap();
    Command::new(exe)
        .args([TEST_NAME, "--exact", "--nocapture", "--test-threads=1"])
        .env(EXIT_CHILD_ENV, "1")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("ERROR app.worker: before exit"))
        .stderr(predicate::str::contains("EXIT").not())
        .stderr(predicate::str::contains("shutting down").not());
}
