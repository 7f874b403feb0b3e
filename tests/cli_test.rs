//! Command-line behaviour: argument handling, exit codes and the log file.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(name)
}

fn runlog() -> Command {
    Command::cargo_bin("runlog").unwrap()
}

#[test]
fn test_records_run_in_working_directory() {
    let dir = tempdir().unwrap();

    runlog()
        .current_dir(dir.path())
        .arg(fixture("SampleSheet.csv"))
        .arg(fixture("RunParameters.xml"))
        .assert()
        .success();

    runlog()
        .current_dir(dir.path())
        .arg(fixture("SampleSheet.csv"))
        .arg(fixture("RunParameters.xml"))
        .assert()
        .success();

    let content = fs::read_to_string(dir.path().join("RunLog.txt")).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Instrument\tRunId\tRunStartDate"));
    assert!(lines[1].starts_with("M00766\t160615_M00766_0123_000000000-ARW6K\t15/06/2016\t"));
    assert_eq!(lines[1], lines[2]);
}

#[test]
fn test_wrong_argument_count_exits_1() {
    let dir = tempdir().unwrap();

    runlog()
        .current_dir(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));

    runlog()
        .current_dir(dir.path())
        .arg(fixture("SampleSheet.csv"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));

    runlog()
        .current_dir(dir.path())
        .args(["a.csv", "b.xml", "c.txt"])
        .assert()
        .code(1);

    assert!(!dir.path().join("RunLog.txt").exists());
}

#[test]
fn test_help_exits_0() {
    runlog()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("SAMPLE_SHEET"));
}

#[test]
fn test_missing_input_reports_path() {
    let dir = tempdir().unwrap();

    runlog()
        .current_dir(dir.path())
        .arg("does-not-exist.csv")
        .arg(fixture("RunParameters.xml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does-not-exist.csv"));

    assert!(!dir.path().join("RunLog.txt").exists());
}

#[test]
fn test_missing_field_reports_name() {
    let dir = tempdir().unwrap();
    let xml = fs::read_to_string(fixture("RunParameters.xml"))
        .unwrap()
        .replace("<ScannerID>M00766</ScannerID>", "");
    let xml_path = dir.path().join("RunParameters.xml");
    fs::write(&xml_path, xml).unwrap();

    runlog()
        .current_dir(dir.path())
        .arg(fixture("SampleSheet.csv"))
        .arg(&xml_path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ScannerID"));

    assert!(!dir.path().join("RunLog.txt").exists());
}

#[test]
fn test_log_override_and_dry_run() {
    let dir = tempdir().unwrap();
    let log_path = dir.path().join("audit.tsv");

    runlog()
        .current_dir(dir.path())
        .arg("--dry-run")
        .arg("--json")
        .arg(fixture("SampleSheet.csv"))
        .arg(fixture("RunParameters.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"instrument\": \"M00766\""));
    assert!(!dir.path().join("RunLog.txt").exists());

    runlog()
        .arg("--log")
        .arg(&log_path)
        .arg(fixture("SampleSheet.csv"))
        .arg(fixture("RunParameters.xml"))
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&log_path).unwrap().lines().count(), 2);
}

#[test]
fn test_config_file_aliases() {
    let dir = tempdir().unwrap();
    let sheet = fs::read_to_string(fixture("SampleSheet.csv"))
        .unwrap()
        .replace("Workflow,GenerateFASTQ", "Module,GenerateFASTQ");
    let sheet_path = dir.path().join("SampleSheet.csv");
    fs::write(&sheet_path, sheet).unwrap();

    runlog()
        .current_dir(dir.path())
        .arg(&sheet_path)
        .arg(fixture("RunParameters.xml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Workflow"));

    let config_path = dir.path().join("runlog.toml");
    fs::write(
        &config_path,
        "[audit_log]\npath = \"custom.txt\"\n\n[sample_sheet.aliases]\nworkflow = [\"Workflow\", \"Module\"]\n",
    )
    .unwrap();

    runlog()
        .current_dir(dir.path())
        .arg("--config")
        .arg(&config_path)
        .arg(&sheet_path)
        .arg(fixture("RunParameters.xml"))
        .assert()
        .success();

    let content = fs::read_to_string(dir.path().join("custom.txt")).unwrap();
    assert!(content.lines().nth(1).unwrap().contains("\tGenerateFASTQ\t"));
}

#[test]
fn test_bad_date_reports_file() {
    let dir = tempdir().unwrap();
    let sheet = fs::read_to_string(fixture("SampleSheet.csv"))
        .unwrap()
        .replace("Date,15/06/2016", "Date,June 15th");
    let sheet_path = dir.path().join("MySheet.csv");
    fs::write(&sheet_path, sheet).unwrap();

    runlog()
        .current_dir(dir.path())
        .arg(&sheet_path)
        .arg(fixture("RunParameters.xml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("MySheet.csv"))
        .stderr(predicate::str::contains("June 15th"));

    assert!(!dir.path().join("RunLog.txt").exists());
}
