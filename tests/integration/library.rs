//! Integration tests for the library API: factory, routing and redaction
//! working together.

use std::sync::Arc;
use std::thread;

use logme::engine::{Engine, MemorySink};
use logme::{Config, ExtendedLog, Level, LoggerFactory, Redactor, Scrubbed};

fn factory() -> (LoggerFactory, Arc<MemorySink>) {
    let engine = Arc::new(Engine::new());
    let sink = Arc::new(MemorySink::new());
    engine.attach(sink.clone());
    let config = Config {
        colors_enabled: false,
        ..Config::default()
    };
    (LoggerFactory::with_engine(&config, engine), sink)
}

#[test]
fn routing_splits_own_and_external() {
    let (factory, sink) = factory();
    let app = factory.get_logger("app.server");
    let lib = factory.get_logger("thirdparty.lib");

    factory.apply_global_threshold(Some("app"), Some(Level::DEBUG));
    assert_eq!(app.threshold(), Level::DEBUG);
    assert_eq!(lib.threshold(), Level::WARNING);

    app.debug("app detail");
    lib.info("library chatter");
    lib.warning("library warning");
    assert_eq!(
        sink.lines(),
        vec![
            (Level::DEBUG, "app detail".to_string()),
            (Level::WARNING, "library warning".to_string()),
        ]
    );
}

#[test]
fn rerouting_reaches_cached_handles() {
    let (factory, _) = factory();
    let app = factory.get_logger("app.server");
    factory.apply_global_threshold(Some("app"), Some(Level::DEBUG));
    factory.apply_global_threshold(Some("app"), Some(Level::ERROR));
    assert_eq!(factory.get_logger("app.server").threshold(), Level::ERROR);
    assert_eq!(app.threshold(), Level::ERROR);
}

#[test]
fn redacted_payload_logged() {
    let (factory, sink) = factory();
    let log = factory.get_logger("app.requests");
    let redactor = Redactor::default();

    let scrubbed = redactor.scrub(br#"{"password":"s3cr3t","path":"/login"}"#);
    log.info(&format!("params {}", scrubbed.to_log_string()));

    let raw = b"dsn=postgres://svc:pa55@db:5432/app";
    match redactor.scrub(raw) {
        Scrubbed::Opaque(bytes) => {
            let text = String::from_utf8_lossy(bytes);
            log.info(&redactor.scrub_credentials(&text));
        }
        Scrubbed::Fields(_) => panic!("expected opaque payload"),
    }

    let lines = sink.lines();
    assert_eq!(lines[0].1, r#"params {"password":"****","path":"/login"}"#);
    assert_eq!(lines[1].1, "dsn=postgres://svc:****@db:5432/app");
}

#[test]
fn concurrent_logging_while_rerouting() {
    let (factory, sink) = factory();
    let factory = Arc::new(factory);

    let writers: Vec<_> = (0..4)
        .map(|i| {
            let factory = Arc::clone(&factory);
            thread::spawn(move || {
                let log = factory.get_logger(&format!("app.worker{i}"));
                for n in 0..200 {
                    log.error(&format!("worker {i} event {n}"));
                }
            })
        })
        .collect();

    let router = {
        let factory = Arc::clone(&factory);
        thread::spawn(move || {
            for n in 0..50 {
                let level = if n % 2 == 0 { Level::DEBUG } else { Level::WARNING };
                factory.apply_global_threshold(Some("app"), Some(level));
            }
        })
    };

    for handle in writers {
        handle.join().unwrap();
    }
    router.join().unwrap();

    // ERROR clears every threshold the router ever sets
    assert_eq!(sink.lines().len(), 800);
}
