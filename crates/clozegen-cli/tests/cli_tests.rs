//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn clozegen() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("clozegen").unwrap()
}

#[test]
fn list_shows_problems() {
    clozegen()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("children"))
        .stdout(predicate::str::contains("PyClz01"))
        .stdout(predicate::str::contains("convection"))
        .stdout(predicate::str::contains("30"));
}

#[test]
fn generate_single_problem() {
    let dir = TempDir::new().unwrap();
    clozegen()
        .current_dir(dir.path())
        .args(["generate", "--problem", "children"])
        .assert()
        .success()
        .stderr(predicate::str::contains("children: 6 questions"));

    let xml = std::fs::read_to_string(dir.path().join("PyClz00.xml")).unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<quiz>\n"));
    assert_eq!(xml.matches("<question type=\"cloze\">").count(), 6);
    assert!(xml.contains("<text>PyClz00_0</text>"));
    assert!(xml.contains("<text>PyClz00_5</text>"));
}

#[test]
fn generate_all_into_output_dir() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("quizzes");
    clozegen()
        .args(["generate", "--all", "--output-dir"])
        .arg(&out)
        .assert()
        .success();

    for base in ["PyClz00", "PyClz01", "PyClz02"] {
        assert!(out.join(format!("{base}.xml")).exists(), "{base}.xml missing");
    }
}

#[test]
fn generate_with_overrides() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wall.xml");
    clozegen()
        .args([
            "generate",
            "--problem",
            "wall",
            "--category",
            "$course$/top/Thermal",
            "--first-index",
            "10",
            "--limit",
            "3",
            "--output",
        ])
        .arg(&path)
        .assert()
        .success();

    let xml = std::fs::read_to_string(&path).unwrap();
    assert!(xml.contains("<text>$course$/top/Thermal</text>"));
    assert_eq!(xml.matches("<question type=\"cloze\">").count(), 3);
    assert!(xml.contains("<text>PyClz01_10</text>"));
    assert!(xml.contains("<text>PyClz01_12</text>"));
    assert!(!xml.contains("<text>PyClz01_13</text>"));
}

#[test]
fn generate_reads_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("clozegen.toml"),
        "category = \"$course$/top/Kids\"\npenalty = 0.5\nlimit = 2\n",
    )
    .unwrap();

    clozegen()
        .current_dir(dir.path())
        .args(["generate", "--problem", "children"])
        .assert()
        .success();

    let xml = std::fs::read_to_string(dir.path().join("PyClz00.xml")).unwrap();
    assert!(xml.contains("$course$/top/Kids"));
    assert!(xml.contains("<penalty>0.5000000</penalty>"));
    assert_eq!(xml.matches("<question type=\"cloze\">").count(), 2);
}

#[test]
fn generate_unknown_problem() {
    let dir = TempDir::new().unwrap();
    clozegen()
        .current_dir(dir.path())
        .args(["generate", "--problem", "nonexistent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown problem 'nonexistent'"));
}

#[test]
fn generate_requires_problem_or_all() {
    clozegen().arg("generate").assert().failure();
}

#[test]
fn invalid_config_writes_nothing() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("clozegen.toml"), "penalty = 2.0\n").unwrap();

    clozegen()
        .current_dir(dir.path())
        .args(["generate", "--problem", "children"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("penalty must be between"));

    assert!(!dir.path().join("PyClz00.xml").exists());
}

#[test]
fn missing_explicit_config() {
    clozegen()
        .args(["generate", "--problem", "wall", "--config", "/nonexistent/clozegen.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn preview_text() {
    clozegen()
        .args(["preview", "--problem", "wall"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Test 0"))
        .stdout(predicate::str::contains("Inputs:"))
        .stdout(predicate::str::contains("U = 5.0"))
        .stdout(predicate::str::contains("wall: 12 combinations"));
}

#[test]
fn preview_json() {
    let output = clozegen()
        .args(["preview", "--problem", "children", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let trace: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = trace.as_array().unwrap();
    assert_eq!(entries.len(), 6);
    assert_eq!(entries[0]["inputs"]["age"][0], 10.2);
    assert_eq!(entries[0]["outputs"]["longest_name"], "Antoinette");
}

#[test]
fn preview_unknown_format() {
    clozegen()
        .args(["preview", "--problem", "wall", "--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();
    clozegen()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created clozegen.toml"));

    let content = std::fs::read_to_string(dir.path().join("clozegen.toml")).unwrap();
    assert!(content.contains("category"));

    // Second run leaves the file alone.
    clozegen()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_config_is_loadable() {
    let dir = TempDir::new().unwrap();
    clozegen().current_dir(dir.path()).arg("init").assert().success();
    clozegen()
        .current_dir(dir.path())
        .args(["generate", "--problem", "children"])
        .assert()
        .success();
    assert!(dir.path().join("PyClz00.xml").exists());
}

#[test]
fn help_lists_commands() {
    clozegen()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("preview"));
}
