#![allow(deprecated)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

/// The binary, run inside `cwd` with no inherited configuration.
fn qr_cmd(cwd: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("qr-generator"));
    cmd.current_dir(cwd)
        .env_remove("QR_URL")
        .env_remove("QR_OUTPUT_DIR")
        .env_remove("RUST_LOG");
    cmd
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn png_files(dir: &Path) -> Vec<String> {
    entries(dir)
        .into_iter()
        .filter(|n| n.ends_with(".png"))
        .collect()
}

#[test]
fn test_url_dir_and_output_end_to_end() {
    let temp = TempDir::new().unwrap();

    qr_cmd(temp.path())
        .args([
            "--url",
            "https://example.com",
            "--dir",
            "out",
            "--output",
            "site.png",
        ])
        .assert()
        .success()
        .code(0)
        .stdout(predicate::str::contains("out/site.png"));

    let image = temp.path().join("out").join("site.png");
    assert!(image.exists());
    assert!(fs::metadata(&image).unwrap().len() > 0);

    let decoded = image::open(&image).unwrap();
    assert_eq!(decoded.width(), decoded.height());
}

#[test]
fn test_output_without_extension_gets_png() {
    let temp = TempDir::new().unwrap();

    qr_cmd(temp.path())
        .args(["--url", "https://example.com", "--dir", "out", "--output", "site"])
        .assert()
        .success()
        .stdout(predicate::str::contains("out/site.png"));

    assert_eq!(png_files(&temp.path().join("out")), vec!["site.png"]);
}

#[test]
fn test_missing_url_fails_without_side_effects() {
    let temp = TempDir::new().unwrap();

    qr_cmd(temp.path())
        .args(["--dir", "out", "--output", "site"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("QR_URL"));

    assert!(entries(temp.path()).is_empty());
}

#[test]
fn test_empty_url_is_rejected() {
    let temp = TempDir::new().unwrap();

    qr_cmd(temp.path())
        .args(["--url", ""])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("URL is required"));

    assert!(entries(temp.path()).is_empty());
}

#[test]
fn test_url_from_environment() {
    let temp = TempDir::new().unwrap();

    qr_cmd(temp.path())
        .env("QR_URL", "https://env.example")
        .assert()
        .success()
        .stdout(predicate::str::contains("qr_codes/qr_code_"));

    let files = png_files(&temp.path().join("qr_codes"));
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("qr_code_"));
}

#[test]
fn test_flag_url_beats_environment() {
    let temp = TempDir::new().unwrap();

    qr_cmd(temp.path())
        .env("QR_URL", "https://env.example")
        .args(["--url", "https://flag.example", "--output", "x"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Encoded URL: https://flag.example"))
        .stderr(predicate::str::contains("https://env.example").not());
}

#[test]
fn test_directory_from_environment() {
    let temp = TempDir::new().unwrap();

    qr_cmd(temp.path())
        .env("QR_OUTPUT_DIR", "from_env")
        .args(["--url", "https://example.com", "--output", "site"])
        .assert()
        .success()
        .stdout(predicate::str::contains("from_env/site.png"));

    assert!(temp.path().join("from_env").join("site.png").exists());
    assert!(!temp.path().join("qr_codes").exists());
}

#[test]
fn test_explicit_default_dir_beats_environment() {
    let temp = TempDir::new().unwrap();

    qr_cmd(temp.path())
        .env("QR_OUTPUT_DIR", "from_env")
        .args([
            "--url",
            "https://example.com",
            "--dir",
            "qr_codes",
            "--output",
            "site",
        ])
        .assert()
        .success();

    assert!(temp.path().join("qr_codes").join("site.png").exists());
    assert!(!temp.path().join("from_env").exists());
}

#[test]
fn test_dir_pointing_at_file_fails_cleanly() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("blocker"), "not a directory").unwrap();

    qr_cmd(temp.path())
        .args(["--url", "https://example.com", "--dir", "blocker"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("blocker"));

    assert_eq!(
        fs::read_to_string(temp.path().join("blocker")).unwrap(),
        "not a directory"
    );
}

#[cfg(target_os = "linux")]
#[test]
fn test_unwritable_dir_fails_as_path_error() {
    let temp = TempDir::new().unwrap();

    qr_cmd(temp.path())
        .args(["--url", "https://example.com", "--dir", "/proc", "--output", "site"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: output directory /proc is not writable"))
        .stderr(predicate::str::contains("Error generating QR code").not());
}

#[test]
fn test_payload_over_capacity_fails_without_file() {
    let temp = TempDir::new().unwrap();
    let huge = format!("https://example.com/{}", "a".repeat(4000));

    qr_cmd(temp.path())
        .args(["--url", &huge, "--dir", "out", "--output", "big"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("exceeds QR capacity"));

    assert!(png_files(&temp.path().join("out")).is_empty());
}

#[test]
fn test_same_output_overwrites() {
    let temp = TempDir::new().unwrap();

    for url in ["https://one.example", "https://two.example"] {
        qr_cmd(temp.path())
            .args(["--url", url, "--dir", "out", "--output", "site"])
            .assert()
            .success();
    }

    assert_eq!(entries(&temp.path().join("out")), vec!["site.png"]);
}

#[test]
fn test_generated_names_differ_across_seconds() {
    let temp = TempDir::new().unwrap();

    qr_cmd(temp.path())
        .args(["--url", "https://example.com", "--dir", "out"])
        .assert()
        .success();
    std::thread::sleep(Duration::from_millis(1100));
    qr_cmd(temp.path())
        .args(["--url", "https://example.com", "--dir", "out"])
        .assert()
        .success();

    let files = png_files(&temp.path().join("out"));
    assert_eq!(files.len(), 2, "got {files:?}");
}

#[test]
fn test_run_writes_timestamped_log_file() {
    let temp = TempDir::new().unwrap();

    qr_cmd(temp.path())
        .args(["--url", "https://example.com", "--output", "site"])
        .assert()
        .success();

    let logs = entries(&temp.path().join("logs"));
    assert_eq!(logs.len(), 1);
    assert!(logs[0].starts_with("qr_generator_"));
    assert!(logs[0].ends_with(".log"));

    let contents = fs::read_to_string(temp.path().join("logs").join(&logs[0])).unwrap();
    assert!(contents.contains(" - INFO - Starting QR Code Generator"));
    assert!(contents.contains(" - INFO - Encoded URL: https://example.com"));
    assert!(contents.contains(" - INFO - QR Code Generator completed successfully"));
}

#[test]
fn test_failure_is_logged() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("blocker"), "x").unwrap();

    qr_cmd(temp.path())
        .args(["--url", "https://example.com", "--dir", "blocker"])
        .assert()
        .failure();

    let logs = entries(&temp.path().join("logs"));
    let contents = fs::read_to_string(temp.path().join("logs").join(&logs[0])).unwrap();
    assert!(contents.contains(" - ERROR - Application failed:"));
}

#[test]
fn test_help_lists_flags() {
    let temp = TempDir::new().unwrap();

    qr_cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--url"))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--dir"))
        .stdout(predicate::str::contains("QR_URL"));
}
