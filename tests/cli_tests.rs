//! CLI integration tests using assert_cmd.
//!
//! Every test runs offline: pages come from saved HTML fixtures via `--input`,
//! and the binary runs inside a temp dir so default output files land there.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[allow(deprecated)]
fn symposium(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("symposium-schedule").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("SYMPOSIUM_URL")
        .env_remove("LOG_FORMAT")
        .env("RUST_LOG", "warn");
    cmd
}

// --- Help ---

#[test]
fn help_lists_all_flags() {
    let dir = tempfile::tempdir().unwrap();
    symposium(&dir).arg("--help").assert().success().stdout(
        predicate::str::contains("--hash")
            .and(predicate::str::contains("--json"))
            .and(predicate::str::contains("--show-headers"))
            .and(predicate::str::contains("--no-title"))
            .and(predicate::str::contains("--qr"))
            .and(predicate::str::contains("--grid"))
            .and(predicate::str::contains("--allow-breaks"))
            .and(predicate::str::contains("--url"))
            .and(predicate::str::contains("--input"))
            .and(predicate::str::contains("--venue")),
    );
}

#[test]
fn unknown_flag_fails() {
    let dir = tempfile::tempdir().unwrap();
    symposium(&dir)
        .arg("--bogus")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--bogus"));
}

// --- JSON ---

#[test]
fn json_mode_prints_and_writes_schedule() {
    let dir = tempfile::tempdir().unwrap();
    let output = symposium(&dir)
        .arg("--json")
        .arg("--input")
        .arg(fixture("schedule.html"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();

    // First-seen room order: 101 appears on the page before 001.
    let pos_101 = stdout.find("\"101\"").unwrap();
    let pos_001 = stdout.find("\"001\"").unwrap();
    assert!(pos_101 < pos_001);

    let written = std::fs::read_to_string(dir.path().join("symposium_schedule.json")).unwrap();
    assert_eq!(written.trim_end(), stdout.trim_end());
    assert!(written.is_ascii());
    assert!(written.contains(r#""9:00 am \u2013 9:15 am""#));

    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["101"]["advisors"], "ORFE Advisors: A. Smith, K. Patel ");
    assert_eq!(value["101"]["graders"], "PhD Candidate Graders: B. Jones");
    assert_eq!(
        value["101"]["schedule"],
        serde_json::json!([
            ["9:00 am – 9:15 am", "Alice Lee"],
            ["9:15 am – 9:30 am", "Dana Park"]
        ])
    );
    assert_eq!(value["001"]["advisors"], "ORFE Advisors: C. Diaz");
    assert_eq!(value["001"]["schedule"][1][1], "Lunch Break");
}

#[test]
fn json_output_path_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out/nested/rooms.json");
    symposium(&dir)
        .args(["--json", "--output"])
        .arg(&target)
        .arg("--input")
        .arg(fixture("schedule.html"))
        .assert()
        .success();
    assert!(target.exists());
    assert!(!dir.path().join("symposium_schedule.json").exists());
}

#[test]
fn venue_file_restricts_rooms() {
    let dir = tempfile::tempdir().unwrap();
    let venue = dir.path().join("venue.toml");
    std::fs::write(&venue, "room_headers = [\"001 - Sherrerd Hall\"]\n").unwrap();
    let output = symposium(&dir)
        .arg("--json")
        .arg("--venue")
        .arg(&venue)
        .arg("--input")
        .arg(fixture("schedule.html"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let rooms: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(rooms, vec!["001"]);
}

#[test]
fn invalid_venue_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let venue = dir.path().join("venue.toml");
    std::fs::write(&venue, "room_headers = [\"Room 101\"]\n").unwrap();
    symposium(&dir)
        .arg("--venue")
        .arg(&venue)
        .arg("--input")
        .arg(fixture("schedule.html"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("venue"));
}

// --- Hash ---

#[test]
fn hash_mode_prints_stable_digest() {
    let dir = tempfile::tempdir().unwrap();
    let run = || {
        let out = symposium(&dir)
            .arg("--hash")
            .arg("--input")
            .arg(fixture("schedule.html"))
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        String::from_utf8(out).unwrap().trim().to_string()
    };
    let first = run();
    assert_eq!(first.len(), 64);
    assert!(first.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    assert_eq!(first, run());

    let html = std::fs::read_to_string(fixture("schedule.html")).unwrap();
    let rooms = symposium::parse(
        &symposium::page_lines(&html),
        &symposium::VenueProfile::default(),
    );
    assert_eq!(first, rooms.digest().unwrap());

    // Hash mode writes nothing.
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

// --- Maintenance ---

#[test]
fn maintenance_page_exits_with_status_one() {
    let dir = tempfile::tempdir().unwrap();
    symposium(&dir)
        .arg("--hash")
        .arg("--input")
        .arg(fixture("maintenance.html"))
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("maintenance"));
}

#[test]
fn missing_input_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    symposium(&dir)
        .args(["--json", "--input", "does-not-exist.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.html"));
}

// --- PDF ---

#[test]
fn default_mode_writes_column_pdf() {
    let dir = tempfile::tempdir().unwrap();
    symposium(&dir)
        .args(["--show-headers", "--qr", "--base-url", "https://example.org/schedule"])
        .arg("--input")
        .arg(fixture("schedule.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("symposium_schedule.pdf"));
    let bytes = std::fs::read(dir.path().join("symposium_schedule.pdf")).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn grid_mode_writes_grid_pdf() {
    let dir = tempfile::tempdir().unwrap();
    symposium(&dir)
        .args(["--grid", "--no-title"])
        .arg("--input")
        .arg(fixture("schedule.html"))
        .assert()
        .success();
    let bytes = std::fs::read(dir.path().join("symposium_grid.pdf")).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert!(!dir.path().join("symposium_schedule.pdf").exists());
}

#[test]
fn pdf_output_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["a.pdf", "b.pdf"] {
        symposium(&dir)
            .args(["--allow-breaks", "--output", name])
            .arg("--input")
            .arg(fixture("schedule.html"))
            .assert()
            .success();
    }
    let a = std::fs::read(dir.path().join("a.pdf")).unwrap();
    let b = std::fs::read(dir.path().join("b.pdf")).unwrap();
    assert_eq!(a, b);
}
