//! Integration tests for `--strict`: unstructured payloads terminate the
//! process through the EXIT level.

use predicates::prelude::*;

use crate::logme;

#[test]
fn strict_exits_on_first_opaque_line() {
    logme()
        .arg("--strict")
        .write_stdin("{\"a\":\"b\"}\nnot json\n{\"c\":\"d\"}\n")
        .assert()
        .code(3)
        .stdout("{\"a\":\"b\"}\n")
        .stderr(predicate::str::contains(
            "EXIT logme.cli: line 2: payload is not a JSON object",
        ))
        .stderr(predicate::str::contains("scrubbed").not());
}

#[test]
fn strict_exit_logged_even_at_critical_threshold() {
    logme()
        .arg("--strict")
        .arg("--level=critical")
        .write_stdin("nope\n")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("EXIT logme.cli: line 1"));
}

#[test]
fn strict_accepts_structured_input() {
    logme()
        .arg("--strict")
        .write_stdin("{\"a\":\"b\"}\n\n")
        .assert()
        .success()
        .stdout("{\"a\":\"b\"}\n{}\n");
}
