use std::fs;

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn calc_prints_summary_and_report() {
    let tmp = TempDir::new().unwrap();
    let json = tmp.path().join("report.json");

    let mut cmd = Command::cargo_bin("condprob").unwrap();
    cmd.args([
        "calc",
        "--sensitivity",
        "90",
        "--specificity",
        "90",
        "--base-rate",
        "1",
        "--test-result",
        "positive",
        "--json",
    ])
    .arg(&json);
    let out = stdout_of(&mut cmd);
    assert!(out.contains("Condition probability: 8.33"), "{}", out);

    let v: Value = serde_json::from_slice(&fs::read(&json).unwrap()).unwrap();
    assert_eq!(v["displays"]["ppv"], "8.33");
    assert_eq!(v["markers"]["true_positive"], 1);
}

#[test]
fn session_replays_script() {
    let tmp = TempDir::new().unwrap();
    let script = tmp.path().join("edits.txt");
    fs::write(
        &script,
        "test-result positive\nbase-rate.1 50\nsensitivity 9.\n",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("condprob").unwrap();
    cmd.arg("session")
        .arg("--script")
        .arg(&script)
        .arg("--trace-glitches");
    let out = stdout_of(&mut cmd);
    assert!(out.contains("[2] base-rate.1 '50' (applied)"), "{}", out);
    assert!(out.contains("broadcasts: 81.97 -> 81.97 -> 90.00 -> 90.00 -> 90.00"), "{}", out);
    assert!(out.contains("(ignored)"));
    assert!(out.contains("warnings:"));
    assert!(out.contains("Condition probability: 90.00"));
    assert!(
        out.contains("Inputs: sensitivity=90 specificity=90 base-rate=50 test-result=positive"),
        "{}",
        out
    );
}

#[test]
fn session_report_ignores_rejected_text() {
    let tmp = TempDir::new().unwrap();
    let script = tmp.path().join("edits.txt");
    let json = tmp.path().join("report.json");
    fs::write(&script, "test-result positive
base-rate.0 100
").unwrap();

    let mut cmd = Command::cargo_bin("condprob").unwrap();
    cmd.arg("session")
        .arg("--script")
        .arg(&script)
        .arg("--json")
        .arg(&json);
    let out = stdout_of(&mut cmd);
    assert!(out.contains("(ignored)"), "{}", out);

    let v: Value = serde_json::from_slice(&fs::read(&json).unwrap()).unwrap();
    assert_eq!(v["inputs"]["base_rate"], 1.0);
    assert_eq!(v["displays"]["condition_probability"], "8.33");
}

#[test]
fn session_reports_bad_script_line() {
    let tmp = TempDir::new().unwrap();
    let script = tmp.path().join("edits.txt");
    fs::write(&script, "base-rate 5\nbase-rate.4 5\n").unwrap();

    let mut cmd = Command::cargo_bin("condprob").unwrap();
    cmd.arg("session").arg("--script").arg(&script);
    let output = cmd.output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("script line 2"), "{}", stderr);
}
