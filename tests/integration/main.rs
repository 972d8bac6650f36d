//! Integration tests for the `logme` binary and the public library API.

use assert_cmd::Command;

mod config_file;
mod diagnostics;
mod library;
mod process_exit;
mod scrub_pipe;
mod strict_mode;

/// The `logme` binary with a clean, deterministic environment:
/// no config file, no inherited indicators, testing mode on.
#[allow(deprecated)]
pub fn logme() -> Command {
    let mut cmd = Command::cargo_bin("logme").unwrap();
    cmd.env("XDG_CONFIG_HOME", "/tmp/logme-test-no-config")
        .env_remove("LOGME_CONFIG")
        .env_remove("DEBUG_LEVEL")
        .env_remove("IDONTWANTCOLORS")
        .env_remove("NO_COLOR")
        .env_remove("DISABLE_UNICODE")
        .env("TESTING", "1");
    cmd
}
