// tests/integration_test.rs
use std::process::Command;

#[test]
fn test_docs_builder_help() {
    let output = Command::new("cargo")
        .args(["run", "--quiet", "--bin", "docs-builder", "--", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("docs-builder"));
    assert!(stdout.contains("create-version"));
    assert!(stdout.contains("latest-tag"));
}

#[test]
fn test_create_version_rejects_bad_version_before_opening_repository() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = Command::new("cargo")
        .args(["run", "--quiet", "--bin", "docs-builder", "--"])
        .arg("--docs-dir")
        .arg(dir.path())
        .args(["create-version", "not-a-version"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Invalid version format"));
    assert!(!stderr.contains("could not find repository"));
}

#[test]
fn test_missing_repository_error_printed_once() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = Command::new("cargo")
        .args(["run", "--quiet", "--bin", "docs-builder", "--"])
        .arg("--docs-dir")
        .arg(dir.path())
        .arg("latest-tag")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("ERROR"));
    assert_eq!(stderr.matches("could not find repository").count(), 1);
}
