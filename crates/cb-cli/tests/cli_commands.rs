//! End-to-end tests for the chaosbag CLI commands.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PRESETS: &str = r#"{
  "scenarios": [
    {
      "id": "gathering",
      "name": "The Gathering",
      "difficulties": [
        { "id": "easy", "name": "Easy", "tokens": { "skull": 2, "+1": 1 } },
        { "id": "expert", "name": "Expert", "tokens": { "tentacle": 4 } }
      ]
    },
    {
      "id": "masks",
      "name": "Midnight Masks",
      "difficulties": [
        { "id": "standard", "name": "Standard", "tokens": {} }
      ]
    }
  ]
}"#;

/// Create a temp directory holding a preset file.
fn presets() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("presets.json");
    fs::write(&path, PRESETS).unwrap();
    (dir, path)
}

fn chaosbag() -> Command {
    Command::cargo_bin("chaosbag").unwrap()
}

// ---------------------------------------------------------------------------
// draw
// ---------------------------------------------------------------------------

#[test]
fn draw_empty_default_bag() {
    chaosbag()
        .arg("draw")
        .assert()
        .success()
        .stdout(predicate::str::contains("No tokens available to draw"));
}

#[test]
fn draw_with_override() {
    chaosbag()
        .args(["draw", "--set", "elder_sign=1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Drew:").and(predicate::str::contains("elder_sign")));
}

#[test]
fn draw_many_reports_table() {
    chaosbag()
        .args(["draw", "-n", "25", "--set", "-1=3", "--seed", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("25 draws").and(predicate::str::contains("100.0%")));
}

#[test]
fn draw_unknown_token_fails() {
    chaosbag()
        .args(["draw", "--set", "bogus=1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown token: bogus"));
}

#[test]
fn draw_from_preset_selection() {
    let (_dir, path) = presets();
    chaosbag()
        .args(["draw", "-p", path.to_str().unwrap(), "-s", "gathering", "-d", "expert"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("The Gathering / Expert")
                .and(predicate::str::contains("tentacle")),
        );
}

#[test]
fn draw_before_difficulty_is_empty() {
    let (_dir, path) = presets();
    chaosbag()
        .args(["draw", "-p", path.to_str().unwrap(), "-s", "gathering"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tokens available to draw"));
}

// ---------------------------------------------------------------------------
// counts
// ---------------------------------------------------------------------------

#[test]
fn counts_default_tokens() {
    chaosbag()
        .args(["counts", "--set", "skull=2", "--set", "cultist=2"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("elder_thing")
                .and(predicate::str::contains("50.0%"))
                .and(predicate::str::contains("4 tokens in the bag")),
        );
}

#[test]
fn counts_for_difficulty() {
    let (_dir, path) = presets();
    chaosbag()
        .args(["counts", "-p", path.to_str().unwrap(), "-s", "gathering", "-d", "easy"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("skull")
                .and(predicate::str::contains("+1"))
                .and(predicate::str::contains("elder_sign").not())
                .and(predicate::str::contains("3 tokens in the bag")),
        );
}

// ---------------------------------------------------------------------------
// scenarios / difficulties
// ---------------------------------------------------------------------------

#[test]
fn scenarios_lists_presets() {
    let (_dir, path) = presets();
    chaosbag()
        .args(["scenarios", "-p", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("The Gathering")
                .and(predicate::str::contains("Midnight Masks"))
                .and(predicate::str::contains("easy, expert"))
                .and(predicate::str::contains("2 scenarios")),
        );
}

#[test]
fn scenarios_invalid_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{"scenarios":[{"id":"x"}]}"#).unwrap();
    chaosbag()
        .args(["scenarios", "-p", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid preset config"));
}

#[test]
fn scenarios_missing_file() {
    chaosbag()
        .args(["scenarios", "-p", "/no/such/presets.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read presets"));
}

#[test]
fn difficulties_of_scenario() {
    let (_dir, path) = presets();
    chaosbag()
        .args(["difficulties", "gathering", "-p", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Easy")
                .and(predicate::str::contains("Expert"))
                .and(predicate::str::contains("Standard").not()),
        );
}

#[test]
fn difficulties_unknown_scenario() {
    let (_dir, path) = presets();
    chaosbag()
        .args(["difficulties", "dunwich", "-p", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown scenario: dunwich"));
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_standalone_session() {
    chaosbag()
        .args(["play", "--mute"])
        .write_stdin("draw\nset skull 1\ndraw\nusage\nquit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("No tokens available to draw")
                .and(predicate::str::contains("Drew: skull (drawn 1 time)"))
                .and(predicate::str::contains("1 draws total"))
                .and(predicate::str::contains("Goodbye!")),
        );
}

#[test]
fn play_preset_session() {
    let (_dir, path) = presets();
    chaosbag()
        .args(["play", "--mute", "-p", path.to_str().unwrap()])
        .write_stdin("scenarios\nscenario gathering\ndifficulties\ndifficulty expert\ncounts\ndraw\nstatus\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("No Scenario Selected")
                .and(predicate::str::contains("Scenario: The Gathering"))
                .and(predicate::str::contains("Difficulty: Expert (4 tokens in the bag)"))
                .and(predicate::str::contains("Drew: tentacle")),
        );
}

#[test]
fn play_reports_command_errors() {
    chaosbag()
        .args(["play", "--mute"])
        .write_stdin("scenario gathering\nfrobnicate\nprofile add Roland\nprofiles\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("no preset catalog loaded")
                .and(predicate::str::contains("unknown command: frobnicate"))
                .and(predicate::str::contains("#2 Roland")),
        );
}

#[test]
fn play_missing_sound_is_not_fatal() {
    let sounds = TempDir::new().unwrap();
    chaosbag()
        .args(["play", "--sounds", sounds.path().to_str().unwrap(), "--set", "tablet=1"])
        .write_stdin("draw\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Drew: tablet")
                .and(predicate::str::contains("sound: no sound file")),
        );
}

#[test]
fn play_listen_missing_port_fails() {
    chaosbag()
        .args(["play", "--mute", "--listen", "/definitely/not/a/port"])
        .write_stdin("quit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open serial port"));
}

#[cfg(unix)]
#[test]
fn play_listen_on_file_draws_on_trigger() {
    let dir = TempDir::new().unwrap();
    let port = dir.path().join("port");
    fs::write(&port, "0\n1\n").unwrap();
    chaosbag()
        .args(["play", "--mute", "--set", "skull=1", "--listen", port.to_str().unwrap()])
        .write_stdin("")
        .timeout(std::time::Duration::from_secs(20))
        .assert()
        .success();
}

#[cfg(unix)]
#[test]
fn play_listen_quits_while_line_is_quiet() {
    let dir = TempDir::new().unwrap();
    let fifo = dir.path().join("line");
    let status = std::process::Command::new("mkfifo").arg(&fifo).status().unwrap();
    assert!(status.success());
    // an attached writer that never sends anything
    let _writer = fs::OpenOptions::new()
        .read(true)
        .write(true)
        .open(&fifo)
        .unwrap();

    chaosbag()
        .args(["play", "--mute", "--listen", fifo.to_str().unwrap()])
        .write_stdin("quit\n")
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .success()
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn play_empty_player_command_fails() {
    chaosbag()
        .args(["play", "--player", "  "])
        .write_stdin("quit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty --player command"));
}

// ---------------------------------------------------------------------------
// ports
// ---------------------------------------------------------------------------

#[test]
fn ports_runs() {
    chaosbag().arg("ports").assert().success();
}
