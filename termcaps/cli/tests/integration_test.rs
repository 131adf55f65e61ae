//! Integration tests for the `termcaps` CLI binary.
//!
//! Output is always piped under `assert_cmd`, so stdout and stderr are
//! never TTYs here.

use assert_cmd::Command;
use predicates::prelude::*;

fn termcaps() -> Command {
    let mut cmd = Command::cargo_bin("termcaps").unwrap();
    for key in [
        "FORCE_COLOR",
        "TERM",
        "COLORTERM",
        "CI",
        "TEAMCITY_VERSION",
        "TERM_PROGRAM",
        "WT_SESSION",
        "NO_COLOR",
        "RUST_LOG",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

#[test]
fn test_no_args_shows_report() {
    termcaps()
        .assert()
        .success()
        .stdout(predicate::str::contains("Terminal Capabilities"))
        .stdout(predicate::str::contains("Stdout:"))
        .stdout(predicate::str::contains("Unicode:"));
}

#[test]
fn test_piped_output_has_no_color() {
    termcaps()
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"stdout\": null"))
        .stdout(predicate::str::contains("\"stdout_is_tty\": false"));
}

#[test]
fn test_force_color_overrides_pipe() {
    termcaps()
        .env("FORCE_COLOR", "3")
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"has_basic\": true"));
}

#[test]
fn test_force_color_zero_wins_over_flags() {
    termcaps()
        .env("FORCE_COLOR", "0")
        .args(["--json", "--sniff-flags", "--color=16m"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"stdout\": null"));
}

#[test]
fn test_sniffed_color_flag() {
    termcaps()
        .args(["--json", "--sniff-flags", "--color=16m"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"level\": \"TrueColor\""));
}

#[test]
fn test_color_flag_ignored_without_sniffing() {
    termcaps()
        .args(["--json", "--color=256"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"stdout\": null"));
}

#[test]
fn test_styled_report_when_forced() {
    termcaps()
        .env("FORCE_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b["));
}

#[test]
fn test_respects_no_color() {
    termcaps()
        .env("FORCE_COLOR", "1")
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b[").not());
}

#[test]
fn test_verbose_shows_platform() {
    termcaps()
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::contains("Platform"))
        .stdout(predicate::str::contains("Stdout TTY: no"));
}

#[test]
fn test_completions() {
    termcaps()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("termcaps"));
}

#[test]
fn test_help_flag() {
    termcaps()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Report terminal color depth"));
}

#[test]
fn test_version_flag() {
    termcaps()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("termcaps"));
}
