use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("kokoro").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("coaching and journaling"));
}

#[test]
fn test_cli_serve_help() {
    let mut cmd = Command::cargo_bin("kokoro").unwrap();
    cmd.arg("serve").arg("--help").assert().success().stdout(predicate::str::contains("port"));
}

#[test]
fn test_add_user_writes_database() {
    let dir = tempfile::TempDir::new().unwrap();
    let db = dir.path().join("cli.db");

    let mut cmd = Command::cargo_bin("kokoro").unwrap();
    cmd.arg("--db")
        .arg(&db)
        .arg("add-user")
        .arg("テスト")
        .assert()
        .success()
        .stdout(predicate::str::contains("テスト"));
    assert!(db.exists());
}
