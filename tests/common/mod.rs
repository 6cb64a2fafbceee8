#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

pub const EMAIL: &str = "ada@example.com";
pub const PASSWORD: &str = "hunter22";

pub fn daybook_cmd() -> Command {
    let mut cmd = Command::cargo_bin("daybook").unwrap();
    cmd.env_remove("DAYBOOK_ROOT");
    cmd.env_remove("DAYBOOK_PASSWORD");
    cmd.env_remove("DAYBOOK_LOG");
    cmd.env_remove("EDITOR");
    cmd.env_remove("VISUAL");
    cmd
}

/// `daybook_cmd` running inside `root`
pub fn daybook_in(root: &Path) -> Command {
    let mut cmd = daybook_cmd();
    cmd.current_dir(root);
    cmd
}

/// Initialize a journal in `root` and sign up the default account
pub fn signed_in_journal(root: &Path) {
    daybook_cmd().arg("init").arg(root).assert().success();
    daybook_in(root)
        .args(["signup", EMAIL, "--password", PASSWORD])
        .assert()
        .success();
}

/// Create an entry and return the id prefix printed in brackets
pub fn create_entry(root: &Path, args: &[&str]) -> String {
    let output = daybook_in(root).arg("new").args(args).output().unwrap();
    assert!(output.status.success(), "{:?}", output);

    let stdout = String::from_utf8(output.stdout).unwrap();
    let start = stdout.find('[').unwrap() + 1;
    let end = stdout[start..].find(']').unwrap() + start;
    stdout[start..end].to_string()
}
