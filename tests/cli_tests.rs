//! CLI integration tests against a scratch database.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn offerlens(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("offerlens");
    cmd.current_dir(dir.path())
        .env_remove("OFFERLENS_DATABASE")
        .env("RUST_LOG", "error")
        .arg("--db")
        .arg(dir.path().join("metrics.db"));
    cmd
}

#[test]
fn test_help_lists_commands() {
    cargo_bin_cmd!("offerlens")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("rollup"))
        .stdout(predicate::str::contains("backfill"))
        .stdout(predicate::str::contains("metrics"));
}

#[test]
fn test_rollup_empty_database_json() {
    let dir = TempDir::new().expect("tempdir");
    offerlens(&dir)
        .args(["--json", "rollup", "--day", "2026-05-01", "--mode", "trade_finder"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"command\": \"rollup\""))
        .stdout(predicate::str::contains("\"segments\": 0"));
}

#[test]
fn test_backfill_rejects_reversed_range() {
    let dir = TempDir::new().expect("tempdir");
    offerlens(&dir)
        .args(["backfill", "--from", "2026-05-03", "--to", "2026-05-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid day range"));
}

#[test]
fn test_metrics_without_rows_warns() {
    let dir = TempDir::new().expect("tempdir");
    offerlens(&dir)
        .args(["metrics", "--from", "2026-05-01", "--to", "2026-05-07"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No stored metrics"));
}

#[test]
fn test_invalid_config_exits_nonzero() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[rollup]\nbaseline_days = 0\n").expect("write config");

    offerlens(&dir)
        .arg("--config")
        .arg(&path)
        .args(["rollup", "--day", "2026-05-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("baseline_days"));
}
