//! Integration tests for the commando binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const MANIFEST: &str = r#"
identity:
  name: tester
  permissions: [perm.heal]
replacements:
  admin: perm.admin
commands:
  - name: heal|h
    description: Heal yourself
    permission: perm.heal
    params:
      - { name: amount, type: integer }
    reply: "Healed {issuer} for {amount}"
  - name: fly
    permission: "%admin.fly"
    params:
      - { name: mode, type: boolean, optional: true, default: true }
    reply: "Flight set to {mode}"
  - name: say
    params:
      - { name: loud, type: boolean, flag: true }
      - { name: message, greedy: true }
    reply: "{message} (loud: {loud})"
"#;

fn setup_project(manifest: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("commando.yml"), manifest).unwrap();
    temp
}

fn commando(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("commando"));
    cmd.current_dir(temp.path()).env_remove("COMMANDO_CONFIG");
    cmd
}

#[test]
fn cli_help_lists_subcommands() {
    let mut cmd = Command::new(cargo_bin("commando"));
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("exec"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn cli_version_flag() {
    let mut cmd = Command::new(cargo_bin("commando"));
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn exec_runs_a_command() {
    let temp = setup_project(MANIFEST);
    commando(&temp)
        .args(["exec", "heal", "50"])
        .assert()
        .success()
        .stdout("Healed tester for 50\n");
}

#[test]
fn exec_accepts_aliases_and_prefix() {
    let temp = setup_project(MANIFEST);
    commando(&temp)
        .args(["exec", "/h", "7"])
        .assert()
        .success()
        .stdout("Healed tester for 7\n");
}

#[test]
fn exec_reports_bad_arguments_with_usage() {
    let temp = setup_project(MANIFEST);
    commando(&temp)
        .args(["exec", "heal", "abc"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Error: Expected integer for <amount>, got 'abc'"))
        .stdout(predicate::str::contains("Usage: /heal <amount>"));
}

#[test]
fn exec_reports_unknown_commands() {
    let temp = setup_project(MANIFEST);
    commando(&temp)
        .args(["exec", "teleport"])
        .assert()
        .code(1)
        .stdout("Unknown command teleport, type /help for help.\n");
}

#[test]
fn exec_checks_permissions() {
    let temp = setup_project(MANIFEST);
    commando(&temp)
        .args(["exec", "fly"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("you do not have permission"));

    commando(&temp)
        .args(["exec", "--grant", "perm.admin.*", "fly"])
        .assert()
        .success()
        .stdout("Flight set to true\n");
}

#[test]
fn exec_identity_override() {
    let temp = setup_project(MANIFEST);
    commando(&temp)
        .args(["exec", "--as", "steve", "heal", "1"])
        .assert()
        .success()
        .stdout("Healed steve for 1\n");
}

#[test]
fn exec_passes_flags_and_greedy_text() {
    let temp = setup_project(MANIFEST);
    commando(&temp)
        .args(["exec", "say", "hello", "--loud", "world"])
        .assert()
        .success()
        .stdout("hello world (loud: true)\n");
}

#[test]
fn run_reads_lines_from_stdin() {
    let temp = setup_project(MANIFEST);
    commando(&temp)
        .arg("run")
        .write_stdin("/heal 5\n\nsay 'quoted  text'\n")
        .assert()
        .success()
        .stdout("Healed tester for 5\nquoted  text (loud: false)\n");
}

#[test]
fn run_fails_when_a_line_fails() {
    let temp = setup_project(MANIFEST);
    commando(&temp)
        .arg("run")
        .write_stdin("/heal 5\n/heal\n")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Missing <amount>"));
}

#[test]
fn complete_suggests_commands_and_values() {
    let temp = setup_project(MANIFEST);
    commando(&temp)
        .args(["complete", "/h"])
        .assert()
        .success()
        .stdout("h\nheal\nhelp\n");

    commando(&temp)
        .args(["complete", "say --"])
        .assert()
        .success()
        .stdout("--loud\n");

    commando(&temp)
        .args(["complete", "fly "])
        .assert()
        .success()
        .stdout("");

    commando(&temp)
        .args(["complete", "--grant", "perm.admin.*", "fly "])
        .assert()
        .success()
        .stdout("true\nfalse\n");
}

#[test]
fn list_outputs_json() {
    let temp = setup_project(MANIFEST);
    let output = commando(&temp).args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());

    let summaries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = summaries
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["fly", "heal", "help", "say"]);
    assert_eq!(summaries[0]["permission"], "perm.admin.fly");
    assert_eq!(summaries[1]["usage"], "/heal <amount>");
}

#[test]
fn check_accepts_valid_manifest() {
    let temp = setup_project(MANIFEST);
    commando(&temp)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Manifest is valid (4 commands)"));
}

#[test]
fn check_rejects_invalid_commands() {
    let temp = setup_project(
        r#"
commands:
  - name: heal
    reply: ok
  - name: h|heal
    reply: ok
  - name: paint
    params:
      - { name: color, type: color }
"#,
    );
    commando(&temp)
        .arg("check")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("2 of 4 commands rejected"));
}

#[test]
fn missing_explicit_config_fails() {
    let temp = TempDir::new().unwrap();
    commando(&temp)
        .args(["--config", "nope.yml", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Manifest not found"));
}

#[test]
fn missing_default_manifest_is_empty() {
    let temp = TempDir::new().unwrap();
    commando(&temp)
        .args(["exec", "help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/help [search] [page]"));
}

#[test]
fn completions_generate_for_bash() {
    let temp = TempDir::new().unwrap();
    commando(&temp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("commando"));
}
