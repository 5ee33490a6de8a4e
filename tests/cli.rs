//! Smoke tests for the command line surface.
//!
//! These only exercise argument handling; everything that talks to a real
//! desktop environment is covered by unit tests against in-memory stores.

use std::process::Command;

fn backdrop() -> Command {
    Command::new(env!("CARGO_BIN_EXE_backdrop"))
}

#[test]
fn help_lists_all_modes() {
    let output = backdrop().arg("--help").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("--path"));
    assert!(stdout.contains("--slideshow"));
    assert!(stdout.contains("--url"));
}

#[test]
fn version_reports_the_package() {
    let output = backdrop().arg("--version").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("backdrop "));
}

#[test]
fn unknown_flags_exit_nonzero() {
    let output = backdrop().arg("--definitely-not-a-flag").output().unwrap();
    assert!(!output.status.success());
}
