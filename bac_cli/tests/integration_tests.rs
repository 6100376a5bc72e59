//! Integration tests for the bac_cli binary.
//!
//! These tests verify end-to-end behavior including:
//! - Drink logging workflow
//! - Status and forecast output
//! - CSV archival
//! - Profile and plan persistence

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("buzz"))
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Blood alcohol content estimation",
        ));
}

#[test]
fn test_status_on_empty_session_is_sober() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Naive BAC:     0.000%"))
        .stdout(predicate::str::contains("Projected BAC: 0.000%"))
        .stdout(predicate::str::contains("Drinks logged: 0"));
}

#[test]
fn test_default_command_is_status() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("CURRENT SESSION"));
}

#[test]
fn test_drink_logged_to_journal() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("drink")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--category")
        .arg("beer")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Logged"));

    let journal_path = temp_dir.path().join("journal/drinks.jsonl");
    let contents = fs::read_to_string(&journal_path).expect("Failed to read journal");
    assert!(contents.contains("started_at"));
    assert!(contents.contains("beer"));
}

#[test]
fn test_drink_rejects_unknown_category() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("drink")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--category")
        .arg("mead")
        .assert()
        .failure();
}

#[test]
fn test_drink_rejects_non_positive_volume() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("drink")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--volume-ml")
        .arg("0")
        .assert()
        .failure();
}

#[test]
fn test_status_reflects_logged_drink() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("drink")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--category")
        .arg("spirit")
        .assert()
        .success();

    // Naive model absorbs instantly, so BAC is nonzero right away
    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Drinks logged: 1"))
        .stdout(predicate::str::contains("Naive BAC:     0.0").and(
            predicate::str::contains("Naive BAC:     0.000%").not(),
        ));
}

#[test]
fn test_old_drink_has_decayed_in_status() {
    let temp_dir = setup_test_dir();

    // A standard drink logged far in the past has fully cleared
    cli()
        .arg("drink")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--category")
        .arg("spirit")
        .arg("--at")
        .arg("2020-01-01T00:00:00Z")
        .assert()
        .success();

    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Projected BAC: 0.000%"));
}

#[test]
fn test_archive_writes_csv_and_resets_session() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("drink")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success();

    cli()
        .arg("archive")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Archived 1 drinks to CSV"));

    let csv_path = temp_dir.path().join("sessions.csv");
    let csv = fs::read_to_string(&csv_path).expect("Failed to read CSV");
    assert!(csv.contains("ethanol_grams"));

    // Journal is gone; the next status starts a fresh session
    assert!(!temp_dir.path().join("journal/drinks.jsonl").exists());

    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Drinks logged: 0"));
}

#[test]
fn test_archive_with_nothing_to_do() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("archive")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to archive"));
}

#[test]
fn test_profile_roundtrip() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("profile")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--weight-kg")
        .arg("82.5")
        .arg("--sex")
        .arg("female")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Profile saved"));

    cli()
        .arg("profile")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("82.5 kg"))
        .stdout(predicate::str::contains("Female"));
}

#[test]
fn test_plan_by_level() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("plan")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--level")
        .arg("buzzed")
        .arg("--eaten")
        .arg("true")
        .assert()
        .success()
        .stdout(predicate::str::contains("Target: 0.050%"))
        .stdout(predicate::str::contains("Eaten: true"))
        .stdout(predicate::str::contains("✓ Plan saved"));
}

#[test]
fn test_forecast_on_empty_session() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("forecast")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Decay forecast from 0.000%"))
        .stdout(predicate::str::contains("Zero in ~0.0 h"));
}
