//! Integration tests for signup, signin, signout and whoami

#![allow(deprecated)]

use predicates::prelude::*;
use tempfile::TempDir;

mod common;
use common::{daybook_cmd, daybook_in, signed_in_journal, EMAIL, PASSWORD};

#[test]
fn test_signup_signs_in() {
    let temp = TempDir::new().unwrap();
    signed_in_journal(temp.path());

    daybook_in(temp.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains(EMAIL))
        .stdout(predicate::str::contains("session expires"));

    assert!(temp.path().join(".daybook/auth/users.toml").exists());
    assert!(temp.path().join(".daybook/auth/session.toml").exists());
}

#[test]
fn test_signup_existing_email_fails() {
    let temp = TempDir::new().unwrap();
    signed_in_journal(temp.path());

    daybook_in(temp.path())
        .args(["signup", EMAIL, "--password", "another-pass"])
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("User already registered"));
}

#[test]
fn test_signup_rejects_short_password() {
    let temp = TempDir::new().unwrap();
    daybook_cmd().arg("init").arg(temp.path()).assert().success();

    daybook_in(temp.path())
        .args(["signup", EMAIL, "--password", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Password should be at least 6 characters",
        ));
}

#[test]
fn test_signout_then_signin() {
    let temp = TempDir::new().unwrap();
    signed_in_journal(temp.path());

    daybook_in(temp.path())
        .arg("signout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed out"));

    daybook_in(temp.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in"));

    daybook_in(temp.path())
        .args(["signin", EMAIL])
        .env("DAYBOOK_PASSWORD", PASSWORD)
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Signed in as {}", EMAIL)));
}

#[test]
fn test_signin_wrong_password_fails() {
    let temp = TempDir::new().unwrap();
    signed_in_journal(temp.path());
    daybook_in(temp.path()).arg("signout").assert().success();

    daybook_in(temp.path())
        .args(["signin", EMAIL, "--password", "wrong-password"])
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("Invalid login credentials"));

    daybook_in(temp.path())
        .arg("whoami")
        .assert()
        .stdout(predicate::str::contains("Not signed in"));
}

#[test]
fn test_signin_unknown_account_fails() {
    let temp = TempDir::new().unwrap();
    daybook_cmd().arg("init").arg(temp.path()).assert().success();

    daybook_in(temp.path())
        .args(["signin", "nobody@example.com", "--password", PASSWORD])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid login credentials"));
}

#[test]
fn test_entry_commands_require_sign_in() {
    let temp = TempDir::new().unwrap();
    daybook_cmd().arg("init").arg(temp.path()).assert().success();

    daybook_in(temp.path())
        .arg("list")
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("Not signed in"))
        .stderr(predicate::str::contains("daybook signin"));
}

#[test]
fn test_oversized_session_ttl_is_rejected() {
    let temp = TempDir::new().unwrap();
    daybook_cmd().arg("init").arg(temp.path()).assert().success();

    daybook_in(temp.path())
        .args(["config", "session_ttl_minutes", "100000000000000"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("session_ttl_minutes must be between"));

    daybook_in(temp.path())
        .args(["signup", "a@b.co", "--password", "secret12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed up and signed in as a@b.co"));
}

#[test]
fn test_oversized_session_ttl_in_config_file_is_capped() {
    let temp = TempDir::new().unwrap();
    daybook_cmd().arg("init").arg(temp.path()).assert().success();
    let config_path = temp.path().join(".daybook/config.toml");
    let config = std::fs::read_to_string(&config_path).unwrap().replace(
        "session_ttl_minutes = 60",
        "session_ttl_minutes = 100000000000000",
    );
    std::fs::write(&config_path, config).unwrap();

    daybook_in(temp.path())
        .args(["signup", "a@b.co", "--password", "secret12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed up and signed in as a@b.co"));

    daybook_in(temp.path())
        .args(["config", "session_ttl_minutes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("525600"));
}
