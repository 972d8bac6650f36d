//! Integration tests for payload scrubbing on stdin -> stdout.

use predicates::prelude::*;

use crate::logme;

#[test]
fn empty_stdin_exits_zero() {
    logme().write_stdin("").assert().success().stdout("");
}

#[test]
fn sensitive_fields_obscured() {
    logme()
        .write_stdin(r#"{"password":"s3cr3t","name":"ok","token":"abc"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""password":"****""#))
        .stdout(predicate::str::contains(r#""token":"****""#))
        .stdout(predicate::str::contains(r#""name":"ok""#))
        .stdout(predicate::str::contains("s3cr3t").not())
        .stdout(predicate::str::contains("abc").not());
}

#[test]
fn long_values_truncated() {
    let input = format!(r#"{{"note":"{}"}}"#, "x".repeat(250));
    let expected = format!("{{\"note\":\"{}...\"}}\n", "x".repeat(200));
    logme().write_stdin(input).assert().success().stdout(expected);
}

#[test]
fn non_string_values_dropped() {
    logme()
        .write_stdin(r#"{"port":8080,"debug":true,"tags":["a"],"host":"db"}"#)
        .assert()
        .success()
        .stdout("{\"host\":\"db\"}\n");
}

#[test]
fn credentials_in_plain_lines_obscured() {
    logme()
        .write_stdin("redis://alice:topsecret@db:6379/0\n")
        .assert()
        .success()
        .stdout("redis://alice:****@db:6379/0\n");
}

#[test]
fn plain_lines_pass_through() {
    logme()
        .write_stdin("just some text\n")
        .assert()
        .success()
        .stdout("just some text\n");
}

#[test]
fn blank_lines_become_empty_payloads() {
    logme()
        .write_stdin("   \n")
        .assert()
        .success()
        .stdout("{}\n");
}

#[test]
fn mixed_input_keeps_order() {
    let input = "{\"user\":\"bob\"}\nplain\n{\"pwd\":\"x\"}\n";
    logme()
        .write_stdin(input)
        .assert()
        .success()
        .stdout("{\"user\":\"bob\"}\nplain\n{\"pwd\":\"****\"}\n");
}

#[test]
fn crlf_line_endings_accepted() {
    logme()
        .write_stdin("{\"user\":\"bob\"}\r\n")
        .assert()
        .success()
        .stdout("{\"user\":\"bob\"}\n");
}
