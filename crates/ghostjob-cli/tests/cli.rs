#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempDir};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Runs the binary against a settings file inside `dir`.
fn ghostjob_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ghostjob").expect("binary should be built");
    cmd.env_remove("RUST_LOG")
        .arg("--settings")
        .arg(dir.join("settings.json"));
    cmd
}

fn score_json(dir: &Path, fixture: &str, extra: &[&str]) -> serde_json::Value {
    let output = ghostjob_cmd(dir)
        .arg("score")
        .arg(fixtures_dir().join(fixture))
        .args(extra)
        .output()
        .expect("command should run");
    serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON")
}

fn settings_json(dir: &Path) -> serde_json::Value {
    let text = std::fs::read_to_string(dir.join("settings.json")).expect("settings written");
    serde_json::from_str(&text).expect("settings should be JSON")
}

#[test]
fn ghost_listing_exits_2() {
    let dir = TempDir::new().unwrap();
    ghostjob_cmd(dir.path())
        .arg("score")
        .arg(fixtures_dir().join("ghost_listing.txt"))
        .assert()
        .code(2);
}

#[test]
fn clean_listing_exits_0() {
    let dir = TempDir::new().unwrap();
    ghostjob_cmd(dir.path())
        .arg("score")
        .arg(fixtures_dir().join("clean_listing.txt"))
        .assert()
        .code(0);
}

#[test]
fn raised_threshold_turns_ghost_into_suspicious() {
    let dir = TempDir::new().unwrap();
    // Basic profile scores this listing at 70.
    ghostjob_cmd(dir.path())
        .arg("score")
        .arg(fixtures_dir().join("ghost_listing.txt"))
        .args(["--profile", "basic", "--threshold", "80"])
        .assert()
        .code(1);
}

#[test]
fn json_output_is_valid() {
    let dir = TempDir::new().unwrap();
    let parsed = score_json(dir.path(), "ghost_listing.txt", &[]);

    assert!(parsed.get("schema_version").is_some());
    assert!(parsed.get("tool").is_some());
    assert!(parsed.get("listing").is_some());
    assert!(parsed.get("signals").is_some());
    assert!(parsed.get("rules").is_some());
    assert!(parsed.get("assessment").is_some());
}

#[test]
fn json_assessment_for_ghost_listing() {
    let dir = TempDir::new().unwrap();
    let parsed = score_json(dir.path(), "ghost_listing.txt", &[]);

    assert_eq!(parsed["assessment"]["verdict"], "GHOST");
    assert_eq!(parsed["assessment"]["score"], 100);

    let triggered: Vec<&str> = parsed["rules"]["triggered"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["rule_id"].as_str().unwrap())
        .collect();
    assert!(triggered.contains(&"age.over90Days"));
    assert!(triggered.contains(&"applicants.over1000"));
    assert!(triggered.contains(&"redFlags.fastPaced"));
}

#[test]
fn json_tool_info_reflects_binary() {
    let dir = TempDir::new().unwrap();
    let parsed = score_json(dir.path(), "clean_listing.txt", &[]);

    assert_eq!(parsed["tool"]["name"], "ghostjob-cli");
    assert_eq!(parsed["tool"]["version"], "0.1.0");
    assert!(parsed["tool"]["commit"].is_null());
    assert_eq!(parsed["schema_version"], "0.1.0");
}

#[test]
fn json_listing_has_hash() {
    let dir = TempDir::new().unwrap();
    let parsed = score_json(dir.path(), "clean_listing.txt", &[]);

    assert_eq!(parsed["listing"]["hash"]["algorithm"], "sha256");
    let hash = parsed["listing"]["hash"]["value"].as_str().unwrap();
    assert_eq!(hash.len(), 64, "SHA-256 hex should be 64 chars");
}

#[test]
fn company_flag_feeds_staffing_rule() {
    let dir = TempDir::new().unwrap();
    let parsed = score_json(
        dir.path(),
        "agency_listing.txt",
        &["--company", "Robert Half Technology"],
    );

    assert_eq!(parsed["assessment"]["company_name"], "Robert Half Technology");
    assert_eq!(parsed["signals"]["company"]["is_staffing_agency"], true);
}

#[test]
fn text_output_contains_verdict() {
    let dir = TempDir::new().unwrap();
    ghostjob_cmd(dir.path())
        .arg("score")
        .arg(fixtures_dir().join("clean_listing.txt"))
        .args(["--format", "text"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Verdict: CLEAN"))
        .stdout(predicate::str::contains("goodSigns.salaryListed"));
}

#[test]
fn out_flag_writes_to_file() {
    let dir = TempDir::new().unwrap();
    let tmp = NamedTempFile::new().expect("create temp file");
    let out_path = tmp.path().to_path_buf();

    ghostjob_cmd(dir.path())
        .arg("score")
        .arg(fixtures_dir().join("ghost_listing.txt"))
        .arg("--out")
        .arg(&out_path)
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty());

    let contents = std::fs::read_to_string(&out_path).expect("read output file");
    let parsed: serde_json::Value = serde_json::from_str(&contents).expect("file should be JSON");
    assert_eq!(parsed["assessment"]["verdict"], "GHOST");
}

#[test]
fn commit_flag_embeds_hash_in_report() {
    let dir = TempDir::new().unwrap();
    let parsed = score_json(dir.path(), "clean_listing.txt", &["--commit", "abc123def456"]);
    assert_eq!(parsed["tool"]["commit"], "abc123def456");
}

#[test]
fn trusted_company_scores_clean() {
    let dir = TempDir::new().unwrap();
    ghostjob_cmd(dir.path())
        .args(["trust", "Globex"])
        .assert()
        .success()
        .stdout(predicate::str::contains("added 'Globex' to trusted list"));

    let parsed = score_json(dir.path(), "ghost_listing.txt", &["--company", "Globex Corp"]);
    assert_eq!(parsed["assessment"]["verdict"], "CLEAN");
    assert_eq!(parsed["assessment"]["list_match"], "trusted");
}

#[test]
fn blocked_company_scores_ghost() {
    let dir = TempDir::new().unwrap();
    ghostjob_cmd(dir.path())
        .args(["block", "initech"])
        .assert()
        .success();

    ghostjob_cmd(dir.path())
        .arg("score")
        .arg(fixtures_dir().join("clean_listing.txt"))
        .args(["--company", "Initech", "--format", "text"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Blocked company"));
}

#[test]
fn block_moves_company_out_of_trusted() {
    let dir = TempDir::new().unwrap();
    ghostjob_cmd(dir.path()).args(["trust", " Acme "]).assert().success();
    ghostjob_cmd(dir.path()).args(["block", "ACME"]).assert().success();

    let settings = settings_json(dir.path());
    assert_eq!(settings["trustedList"], serde_json::json!([]));
    assert_eq!(settings["blockedList"], serde_json::json!(["acme"]));
}

#[test]
fn list_commands_report_no_ops() {
    let dir = TempDir::new().unwrap();
    ghostjob_cmd(dir.path()).args(["trust", "acme"]).assert().success();
    ghostjob_cmd(dir.path())
        .args(["trust", "Acme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already in trusted list"));
    ghostjob_cmd(dir.path())
        .args(["unblock", "acme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not in blocked list"));
    ghostjob_cmd(dir.path())
        .args(["untrust", "acme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("removed 'acme' from trusted list"));
}

#[test]
fn lists_shows_both_lists() {
    let dir = TempDir::new().unwrap();
    ghostjob_cmd(dir.path()).args(["trust", "Globex"]).assert().success();
    ghostjob_cmd(dir.path()).args(["block", "Initech"]).assert().success();

    ghostjob_cmd(dir.path())
        .arg("lists")
        .assert()
        .success()
        .stdout(predicate::str::contains("Trusted (1):\n  - globex"))
        .stdout(predicate::str::contains("Blocked (1):\n  - initech"))
        .stdout(predicate::str::contains("Threshold: 50"));
}

#[test]
fn threshold_set_and_show() {
    let dir = TempDir::new().unwrap();
    ghostjob_cmd(dir.path())
        .args(["threshold", "65"])
        .assert()
        .success()
        .stdout(predicate::str::contains("threshold set to 65"));
    ghostjob_cmd(dir.path())
        .arg("threshold")
        .assert()
        .success()
        .stdout(predicate::str::diff("65\n"));
}

#[test]
fn invalid_threshold_input_falls_back_to_default() {
    let dir = TempDir::new().unwrap();
    ghostjob_cmd(dir.path())
        .args(["threshold", "abc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("threshold set to 50"));
}

#[test]
fn export_then_import_round_trips() {
    let source = TempDir::new().unwrap();
    ghostjob_cmd(source.path()).args(["trust", "Globex"]).assert().success();
    ghostjob_cmd(source.path()).args(["block", "Initech"]).assert().success();
    ghostjob_cmd(source.path()).args(["threshold", "40"]).assert().success();

    let export_path = source.path().join("export.json");
    ghostjob_cmd(source.path())
        .arg("export")
        .arg("--out")
        .arg(&export_path)
        .assert()
        .success();

    let target = TempDir::new().unwrap();
    ghostjob_cmd(target.path())
        .arg("import")
        .arg(&export_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("imported 1 trusted, 1 blocked"));

    let a = ghostjob_cmd(source.path()).arg("export").output().unwrap();
    let b = ghostjob_cmd(target.path()).arg("export").output().unwrap();
    let a: serde_json::Value = serde_json::from_slice(&a.stdout).unwrap();
    let b: serde_json::Value = serde_json::from_slice(&b.stdout).unwrap();
    assert_eq!(a, b);
    assert_eq!(b["threshold"], 40);
}

#[test]
fn import_accepts_legacy_field_names() {
    let dir = TempDir::new().unwrap();
    ghostjob_cmd(dir.path())
        .arg("import")
        .arg(fixtures_dir().join("legacy_export.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("(1 skipped)"))
        .stdout(predicate::str::contains("threshold set to 60"));

    let settings = settings_json(dir.path());
    assert_eq!(settings["trustedList"], serde_json::json!(["globex"]));
    assert_eq!(settings["blockedList"], serde_json::json!(["initech"]));
    assert_eq!(settings["threshold"], 60);
}

#[test]
fn import_rejects_malformed_file() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "{not json").unwrap();

    ghostjob_cmd(dir.path())
        .arg("import")
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to import"));
}

#[test]
fn stored_threshold_applies_to_score() {
    let dir = TempDir::new().unwrap();
    ghostjob_cmd(dir.path()).args(["threshold", "75"]).assert().success();

    let parsed = score_json(dir.path(), "ghost_listing.txt", &["--profile", "basic"]);
    assert_eq!(parsed["rules"]["catalog"]["threshold"], 75);
    assert_eq!(parsed["assessment"]["verdict"], "SUSPICIOUS");
}

#[test]
fn missing_subcommand_fails() {
    let dir = TempDir::new().unwrap();
    ghostjob_cmd(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn nonexistent_listing_fails() {
    let dir = TempDir::new().unwrap();
    ghostjob_cmd(dir.path())
        .arg("score")
        .arg("/tmp/does_not_exist_ghostjob_test.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read listing"));
}

#[test]
fn invalid_format_flag_fails() {
    let dir = TempDir::new().unwrap();
    ghostjob_cmd(dir.path())
        .arg("score")
        .arg(fixtures_dir().join("clean_listing.txt"))
        .args(["--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn out_of_range_threshold_flag_fails() {
    let dir = TempDir::new().unwrap();
    ghostjob_cmd(dir.path())
        .arg("score")
        .arg(fixtures_dir().join("clean_listing.txt"))
        .args(["--threshold", "101"])
        .assert()
        .failure();
}

#[test]
fn deterministic_json_across_runs() {
    let dir = TempDir::new().unwrap();
    let a = score_json(dir.path(), "agency_listing.txt", &[]);
    let b = score_json(dir.path(), "agency_listing.txt", &[]);
    assert_eq!(a, b);
}

#[test]
fn help_flag_prints_usage() {
    let dir = TempDir::new().unwrap();
    ghostjob_cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ghost job listing detector"));
}

#[test]
fn version_flag_prints_version() {
    let dir = TempDir::new().unwrap();
    ghostjob_cmd(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ghostjob"));
}
