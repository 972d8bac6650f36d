use std::io::{self, BufRead, BufWriter, IsTerminal, Write};
use std::process::ExitCode;

use clap::Parser;

use logme::cli::{Cli, ColorMode};
use logme::config::Config;
use logme::factory::LoggerFactory;
use logme::logger::ExtendedLog;
use logme::redact::{Redactor, Scrubbed};

/// Status used by `--strict` when a payload is not structured.
const STRICT_EXIT_CODE: i32 = 3;

fn main() -> ExitCode {
    // Reset SIGPIPE to default behavior so upstream writers get a clean
    // SIGPIPE signal instead of a BrokenPipeError when logme exits early.
    reset_sigpipe();

    let cli = Cli::parse();

    let mut config = match Config::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("logme: {e}");
            return ExitCode::from(1);
        }
    };
    config.colors_enabled = resolve_color_mode(cli.color, config.colors_enabled);

    let factory = LoggerFactory::init_global(&config);
    if let Err(e) = factory.install_log_bridge() {
        eprintln!("logme: {e}");
    }
    factory.apply_global_threshold(None, None);

    let log = factory.get_logger("logme.cli");
    log.verbose("reading payloads from stdin");

    let redactor = Redactor::default();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    let mut count: usize = 0;

    for (index, chunk) in stdin.lock().split(b'\n').enumerate() {
        let mut raw = match chunk {
            Ok(raw) => raw,
            Err(e) => {
                log.error(&format!("read error: {e}"));
                factory.flush();
                return ExitCode::from(2);
            }
        };
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }

        let written = match redactor.scrub(&raw) {
            Scrubbed::Fields(fields) => {
                count += 1;
                writeln!(writer, "{}", serde_json::Value::Object(fields))
            }
            Scrubbed::Opaque(raw) => {
                let line = String::from_utf8_lossy(raw);
                if cli.strict {
                    let _ = writer.flush();
                    let message = format!("line {}: payload is not a JSON object", index + 1);
                    if let Err(e) = log.exit_critical(STRICT_EXIT_CODE, Some(&message)) {
                        eprintln!("logme: {e}");
                        return ExitCode::from(1);
                    }
                }
                log.debug(&format!("line {}: passing through unstructured payload", index + 1));
                writeln!(writer, "{}", redactor.scrub_credentials(&line))
            }
        };

        if let Err(e) = written {
            if e.kind() == io::ErrorKind::BrokenPipe {
                return ExitCode::SUCCESS;
            }
            log.error(&format!("write error: {e}"));
            factory.flush();
            return ExitCode::from(2);
        }
    }

    if let Err(e) = writer.flush() {
        if e.kind() == io::ErrorKind::BrokenPipe {
            return ExitCode::SUCCESS;
        }
        log.error(&format!("flush error: {e}"));
        factory.flush();
        return ExitCode::from(2);
    }

    log.checked(&format!("scrubbed {count} payload(s)"));
    factory.flush();
    ExitCode::SUCCESS
}

/// Colors for diagnostics on stderr, honoring the configured switches.
fn resolve_color_mode(mode: ColorMode, configured: bool) -> bool {
    match mode {
        ColorMode::Always | ColorMode::Never => configured,
        ColorMode::Auto => {
            if !configured || !io::stderr().is_terminal() {
                return false;
            }
            !std::env::var("TERM").is_ok_and(|v| v == "dumb")
        }
    }
}

/// Reset SIGPIPE to the default (terminate) behavior.
///
/// By default, Rust ignores SIGPIPE to surface `BrokenPipe` I/O errors.
/// For a filter like `logme`, this causes the *upstream* writer to receive a
/// `BrokenPipeError` when `logme` exits. Restoring `SIG_DFL` lets the OS
/// handle the signal normally.
#[cfg(unix)]
fn reset_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn reset_sigpipe() {}
