//! Argument parsing and help output for the basedagent binary

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

fn based() -> Command {
    Command::new(common::bin_path())
}

#[test]
fn test_top_level_help() {
    based()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "An AI agent that acts onchain with its own wallet",
        ))
        .stdout(predicate::str::contains("--version"));
}

#[test]
fn test_help_lists_every_mode_and_status() {
    let assert = based().arg("--help").assert().success();
    let help = String::from_utf8_lossy(&assert.get_output().stdout).to_string();

    for sub in ["chat", "auto", "two-agent", "status"] {
        assert!(help.contains(sub), "help is missing {}", sub);
    }
}

#[test]
fn test_version_reports_crate_version() {
    based()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_subcommand_help_descriptions() {
    let expected = [
        ("chat", "Interactive chat with the agent"),
        ("auto", "Autonomous action loop"),
        ("two-agent", "Conversation loop where a guide model steers the agent"),
        ("status", "Show agent status"),
    ];

    for (sub, description) in expected {
        based()
            .args([sub, "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains(description));
    }
}

#[test]
fn test_verbose_is_a_global_flag() {
    for args in [vec!["--help"], vec!["status", "--help"]] {
        based()
            .args(&args)
            .assert()
            .success()
            .stdout(predicate::str::contains("-v, --verbose"));
    }
}

#[test]
fn test_bare_invocation_opens_the_mode_menu() {
    // stdin is closed under assert_cmd, so the chooser shows once and exits
    based()
        .assert()
        .failure()
        .stdout(predicate::str::contains("Available modes"));
}

#[test]
fn test_unknown_subcommand_is_rejected() {
    based()
        .arg("wallet")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_unknown_flag_is_rejected() {
    based()
        .args(["status", "--loud"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}
