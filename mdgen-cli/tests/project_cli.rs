//! End-to-end `mdgen project` runs against a temporary HOME.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn mdgen(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("mdgen").expect("mdgen binary");
    cmd.env("HOME", home.path())
        .env("USERPROFILE", home.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn list_json(home: &TempDir) -> serde_json::Value {
    let output = mdgen(home)
        .args(["project", "list", "--json"])
        .output()
        .expect("run list");
    assert!(
        output.status.success(),
        "list failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("list --json is valid JSON")
}

#[test]
fn list_on_fresh_home_is_empty() {
    let home = TempDir::new().unwrap();
    mdgen(&home)
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No projects yet."));
}

#[test]
fn create_persists_newest_first() {
    let home = TempDir::new().unwrap();
    mdgen(&home)
        .args(["project", "create", "Alpha", "-d", "first one"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created project 1 'Alpha'"));
    mdgen(&home)
        .args(["project", "create", "Beta"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created project 2 'Beta'"));

    let projects = list_json(&home);
    assert_eq!(projects[0]["title"], "Beta");
    assert_eq!(projects[0]["description"], "Sin descripción");
    assert_eq!(projects[1]["title"], "Alpha");
    assert_eq!(projects[1]["status"], "Draft");

    assert!(home.path().join(".mdgen/store/mdgen-projects.json").exists());
}

#[test]
fn update_derives_status_from_step() {
    let home = TempDir::new().unwrap();
    mdgen(&home).args(["project", "create", "Alpha"]).assert().success();

    mdgen(&home)
        .args(["project", "update", "1", "--step", "3", "--status", "completed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("In Progress"))
        .stdout(predicate::str::contains("(3/5)"));

    let projects = list_json(&home);
    assert_eq!(projects[0]["status"], "In Progress");
    assert_eq!(projects[0]["stepCurrent"], 3);
}

#[test]
fn update_unknown_id_fails_without_changes() {
    let home = TempDir::new().unwrap();
    mdgen(&home).args(["project", "create", "Alpha"]).assert().success();
    let before = list_json(&home);

    mdgen(&home)
        .args(["project", "update", "9999", "--title", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("project 9999 not found"));

    assert_eq!(list_json(&home), before);
}

#[test]
fn show_prints_project_and_reports_missing() {
    let home = TempDir::new().unwrap();
    mdgen(&home)
        .args(["project", "create", "Alpha", "-d", "docs site"])
        .assert()
        .success();

    mdgen(&home)
        .args(["project", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alpha"))
        .stdout(predicate::str::contains("docs site"))
        .stdout(predicate::str::contains("1/5"));

    mdgen(&home)
        .args(["project", "show", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("project 2 not found"));
}

#[test]
fn corrupt_store_starts_empty() {
    let home = TempDir::new().unwrap();
    let store_dir = home.path().join(".mdgen/store");
    std::fs::create_dir_all(&store_dir).unwrap();
    std::fs::write(store_dir.join("mdgen-projects.json"), "not json").unwrap();

    assert_eq!(list_json(&home), serde_json::json!([]));

    mdgen(&home).args(["project", "create", "Fresh"]).assert().success();
    assert_eq!(list_json(&home)[0]["id"], 1);
}

#[test]
fn config_changes_step_total() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".mdgen");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.yaml"), "default_step_total: 8\n").unwrap();

    mdgen(&home).args(["project", "create", "Long"]).assert().success();
    assert_eq!(list_json(&home)[0]["stepTotal"], 8);
}
