//! Integration tests for the dotrc binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const RC: &str = "\
# aliases
alias ll='ls -la'
alias gs='git status'
export EDITOR=nvim
export PATH=\"/usr/local/bin:$PATH\"

# Make a directory and cd into it
mkcd() {
  mkdir -p \"$1\" && cd \"$1\"
}
";

fn setup(content: &str) -> (TempDir, std::path::PathBuf) {
    let dir = tempdir().unwrap();
    let rc = dir.path().join(".zshrc");
    fs::write(&rc, content).unwrap();
    (dir, rc)
}

fn dotrc(dir: &Path, rc: &Path) -> Command {
    let mut cmd = Command::cargo_bin("dotrc").unwrap();
    cmd.env("DOTRC_CONFIG_DIR", dir.join("config"))
        .env("NO_COLOR", "1")
        .args(["--file", rc.to_str().unwrap(), "--yes"]);
    cmd
}

#[test]
fn test_list_command() {
    let (dir, rc) = setup(RC);

    dotrc(dir.path(), &rc)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("ll"))
        .stdout(predicate::str::contains("gs"))
        .stdout(predicate::str::contains("EDITOR"))
        .stdout(predicate::str::contains("mkcd"))
        .stdout(predicate::str::contains("/usr/local/bin"));
}

#[test]
fn test_list_alias_only() {
    let (dir, rc) = setup(RC);

    dotrc(dir.path(), &rc)
        .args(["list", "alias"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ll"))
        .stdout(predicate::str::contains("EDITOR").not());
}

#[test]
fn test_check_no_issues() {
    let (dir, rc) = setup(RC);

    dotrc(dir.path(), &rc)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues found"));
}

#[test]
fn test_check_duplicates() {
    let (dir, rc) = setup("alias ll='ls -la'\nalias ll='ls -l'\n");

    dotrc(dir.path(), &rc)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Duplicate alias 'll'"));
}

#[test]
fn test_diff_is_empty_after_load() {
    let (dir, rc) = setup(RC);

    dotrc(dir.path(), &rc)
        .arg("diff")
        .assert()
        .success()
        .stdout(predicate::str::contains("No pending changes"));
}

#[test]
fn test_add_alias_appends_line() {
    let (dir, rc) = setup(RC);

    dotrc(dir.path(), &rc)
        .args(["add", "alias", "gp=git push"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added Alias"));

    let content = fs::read_to_string(&rc).unwrap();
    assert_eq!(content, format!("{}alias gp='git push'\n", RC));
}

#[test]
fn test_add_path_uses_home_variable() {
    let (dir, rc) = setup(RC);

    dotrc(dir.path(), &rc)
        .args(["add", "path", "~/bin"])
        .assert()
        .success();

    let content = fs::read_to_string(&rc).unwrap();
    assert!(content.ends_with("export PATH=\"$HOME/bin:$PATH\"\n"));
}

#[test]
fn test_remove_alias() {
    let (dir, rc) = setup(RC);

    dotrc(dir.path(), &rc)
        .args(["remove", "alias", "gs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed Alias"));

    let content = fs::read_to_string(&rc).unwrap();
    assert_eq!(content, RC.replace("alias gs='git status'\n", ""));
}

#[test]
fn test_remove_missing_entry() {
    let (dir, rc) = setup(RC);

    dotrc(dir.path(), &rc)
        .args(["remove", "alias", "nope"])
        .assert()
        .success()
        .stderr(predicate::str::contains("not found"));

    assert_eq!(fs::read_to_string(&rc).unwrap(), RC);
}

#[test]
fn test_edit_env_with_value() {
    let (dir, rc) = setup(RC);

    dotrc(dir.path(), &rc)
        .args(["edit", "env", "EDITOR", "code --wait"])
        .assert()
        .success();

    let content = fs::read_to_string(&rc).unwrap();
    assert_eq!(
        content,
        RC.replace("export EDITOR=nvim", "export EDITOR=\"code --wait\"")
    );
}

#[test]
fn test_disable_then_enable_alias() {
    let (dir, rc) = setup(RC);

    dotrc(dir.path(), &rc)
        .args(["disable", "ll"])
        .assert()
        .success();
    assert!(fs::read_to_string(&rc)
        .unwrap()
        .contains("# alias ll='ls -la'\n"));

    dotrc(dir.path(), &rc)
        .args(["enable", "ll"])
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&rc).unwrap(), RC);
}

#[test]
fn test_save_creates_backup() {
    let (dir, rc) = setup(RC);

    dotrc(dir.path(), &rc)
        .args(["add", "alias", "gp=git push"])
        .assert()
        .success();

    dotrc(dir.path(), &rc)
        .args(["backup", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".zshrc"));
}
