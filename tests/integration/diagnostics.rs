//! Integration tests for diagnostic output on stderr: levels, check mode,
//! unicode handling.

use predicates::prelude::*;

use crate::logme;

#[test]
fn summary_checked_at_verbose_by_default() {
    logme()
        .write_stdin("{\"a\":\"1\"}\n{\"b\":\"2\"}\n")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "VERBOSE logme.cli: \u{2713} scrubbed 2 payload(s)",
        ));
}

#[test]
fn summary_hidden_at_info() {
    logme()
        .arg("--level=info")
        .write_stdin("{\"a\":\"1\"}\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("scrubbed").not());
}

#[test]
fn check_mode_escalates_summary_to_info() {
    logme()
        .arg("--level=info")
        .arg("--check")
        .write_stdin("{\"a\":\"1\"}\n")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "INFO logme.cli: \u{2713} scrubbed 1 payload(s)",
        ));
}

#[test]
fn disable_unicode_uses_text_marker() {
    logme()
        .env("DISABLE_UNICODE", "1")
        .write_stdin("{\"a\":\"1\"}\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("(CHECKED) scrubbed 1 payload(s)"))
        .stderr(predicate::str::contains("\u{2713}").not());
}

#[test]
fn debug_level_env_sets_verbosity() {
    logme()
        .env("DEBUG_LEVEL", "WARNING")
        .write_stdin("plain\n")
        .assert()
        .success()
        .stderr("");
}

#[test]
fn cli_level_overrides_env() {
    logme()
        .env("DEBUG_LEVEL", "WARNING")
        .arg("--level=debug")
        .write_stdin("plain\n")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "DEBUG logme.cli: line 1: passing through unstructured payload",
        ));
}

#[test]
fn very_verbose_shows_everything() {
    logme()
        .write_stdin("plain\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("VERBOSE logme.cli: reading payloads from stdin"))
        .stderr(predicate::str::contains("DEBUG logme.cli: line 1"));
}

#[test]
fn invalid_level_rejected() {
    logme()
        .arg("--level=trace")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid level 'trace'"));
}
