//! Tests for the `optbeans` binary: exit codes and printed output.

use std::io::Write;
use std::process::Command;

fn optbeans_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_optbeans"));
    cmd.env_remove("OPTBEANS_LOG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_exits_zero_with_all_flags() {
    let output = optbeans_cmd()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--read-write"));
    assert!(stdout.contains("--cache"));
    assert!(stdout.contains("--fds"));
}

#[test]
fn test_help_wins_over_store_argument() {
    let output = optbeans_cmd()
        .args(["mystore", "--metrics", "-h"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage"));
}

#[test]
fn test_help_wins_over_conflicting_blob_stores() {
    let output = optbeans_cmd()
        .args(["--help", "--fds", "/a", "--s3ds", "/b"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage"));
}

#[test]
fn test_version_exits_zero() {
    let output = optbeans_cmd()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
    assert!(!stdout.contains("Usage"));
}

#[test]
fn test_missing_store_exits_one_with_help() {
    let output = optbeans_cmd()
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"));
    assert!(stdout.contains("STORE"));
}

#[test]
fn test_segment_store_summary() {
    let output = optbeans_cmd()
        .arg("mystore")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("store: mystore (segment)"));
    assert!(stdout.contains("mode: read-only"));
    assert!(stdout.contains("blob store: inline"));
}

#[test]
fn test_document_store_summary() {
    let output = optbeans_cmd()
        .args(["--read-write", "--cache", "512", "mongodb://localhost/oak"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("store: mongodb://localhost/oak (mongo)"));
    assert!(stdout.contains("mode: read-write"));
    assert!(stdout.contains("cache: 512 MB, cluster id 0"));
}

#[test]
fn test_s3_config_file_is_loaded() {
    let mut config = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    writeln!(config, "accessKey = \"AKIA123\"\nsecretKey = \"secret\"\ns3Bucket = \"oak\"").unwrap();

    let output = optbeans_cmd()
        .arg("--s3ds")
        .arg(config.path())
        .arg("./repo")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("blob store: s3 (3 settings)"));
}

#[test]
fn test_invalid_cache_split_fails() {
    let output = optbeans_cmd()
        .args(["--node-cache-percentage", "95", "repo"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--node-cache-percentage"));
}

#[test]
fn test_invalid_cache_split_names_given_flag() {
    let output = optbeans_cmd()
        .args(["--diff-cache-percentage", "90", "repo"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--diff-cache-percentage"));
    assert!(!stderr.contains("--node-cache-percentage"));
}

#[test]
fn test_unknown_flag_exits_with_error() {
    let output = optbeans_cmd()
        .args(["--no-such-flag", "repo"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    assert!(!output.stderr.is_empty());
}
