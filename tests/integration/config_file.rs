//! Integration tests for the TOML config file.

use std::io::Write;

use predicates::prelude::*;

use crate::logme;

fn config_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn config_level_applies() {
    let file = config_file("level = \"info\"\n");
    logme()
        .arg("--config")
        .arg(file.path())
        .write_stdin("{\"a\":\"1\"}\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("scrubbed").not());
}

#[test]
fn cli_level_beats_config_level() {
    let file = config_file("level = \"info\"\n");
    logme()
        .arg("--config")
        .arg(file.path())
        .arg("--level=verbose")
        .write_stdin("{\"a\":\"1\"}\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("scrubbed 1 payload(s)"));
}

#[test]
fn config_from_env_path() {
    let file = config_file("unicode = false\n");
    logme()
        .env("LOGME_CONFIG", file.path())
        .write_stdin("{\"a\":\"1\"}\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("(CHECKED) scrubbed"));
}

#[test]
fn testing_in_config_drops_timestamps() {
    let file = config_file("testing = true\n");
    logme()
        .env_remove("TESTING")
        .arg("--config")
        .arg(file.path())
        .write_stdin("")
        .assert()
        .success()
        .stderr(predicate::str::starts_with("VERBOSE logme.cli: reading payloads"));
}

#[test]
fn timestamp_format_from_config() {
    let file = config_file("timestamp_format = \"[%Y]\"\n");
    logme()
        .env_remove("TESTING")
        .arg("--color=never")
        .arg("--config")
        .arg(file.path())
        .write_stdin("")
        .assert()
        .success()
        .stderr(predicate::str::is_match(r"^\[\d{4}\] VERBOSE logme\.cli: reading payloads").unwrap());
}

#[test]
fn malformed_config_exits_one() {
    let file = config_file("level = [\n");
    logme()
        .arg("--config")
        .arg(file.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("logme: config file error"));
}

#[test]
fn unknown_level_in_config_exits_one() {
    let file = config_file("level = \"loud\"\n");
    logme()
        .arg("--config")
        .arg(file.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown level 'loud'"));
}
