//! Settings file discovery and precedence through the binary.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn t9a_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_t9a"));
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

fn num_games(cmd: &mut Command) -> Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: Value = serde_json::from_slice(&out).unwrap();
    v["num_games"].clone()
}

#[test]
fn settings_file_in_the_working_directory_applies() {
    let dir = common::workspace();
    common::write(dir.path(), "t9a.toml", "[filter]\ntournament_type = \"singles\"\n");
    assert_eq!(num_games(t9a_cmd(&dir).arg("summary")), 2);
}

#[test]
fn flags_override_the_settings_file() {
    let dir = common::workspace();
    common::write(dir.path(), "t9a.toml", "[filter]\ntournament_type = \"singles\"\n");
    assert_eq!(num_games(t9a_cmd(&dir).args(["--type", "teams", "summary"])), 1);
}

#[test]
fn default_valued_flag_still_overrides_the_settings_file() {
    let dir = common::workspace();
    common::write(dir.path(), "t9a.toml", "[filter]\ntournament_type = \"singles\"\n");
    assert_eq!(num_games(t9a_cmd(&dir).args(["--type", "any", "summary"])), 3);
}

#[test]
fn data_root_comes_from_the_settings_file() {
    let dir = common::workspace();
    std::fs::rename(dir.path().join("data"), dir.path().join("events")).unwrap();
    common::write(dir.path(), "t9a.toml", "data_root = \"events\"\n");
    assert_eq!(num_games(t9a_cmd(&dir).arg("summary")), 3);
}

#[test]
fn dates_in_the_settings_file_filter_tournaments() {
    let dir = common::workspace();
    common::write(
        dir.path(),
        "custom.toml",
        "[filter]\nstart_date = \"2024-06-01\"\n",
    );
    assert_eq!(
        num_games(t9a_cmd(&dir).args(["--config", "custom.toml", "summary"])),
        1
    );
}

#[test]
fn malformed_settings_file_is_reported_with_a_hint() {
    let dir = common::workspace();
    common::write(dir.path(), "t9a.toml", "[filter\nmin_tournament_size = 8\n");
    t9a_cmd(&dir)
        .arg("summary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("t9a.toml"))
        .stderr(predicate::str::contains("Hints:"));
}
