//! End-to-end tests for the `simple-folio` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_simple-folio"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run simple-folio")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("temp paths are UTF-8")
}

#[test]
fn gen_config_prints_documented_stock_config() {
    let out = run(&["gen-config"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("[contact]"));
    assert!(text.contains("[[project]]"));
}

#[test]
fn build_writes_the_site() {
    let src = TempDir::new().unwrap();
    let dist = TempDir::new().unwrap();
    fs::write(
        src.path().join("config.toml"),
        r#"
[site]
owner = "Sam Rivera"

[projects]
featured_count = 2
"#,
    )
    .unwrap();
    fs::create_dir_all(src.path().join("assets")).unwrap();
    fs::write(src.path().join("assets/favicon.ico"), b"ico").unwrap();

    let out = run(&[
        "build",
        "--source",
        path_arg(src.path()),
        "--output",
        path_arg(dist.path()),
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(stdout(&out).contains("Generated 3 pages, 6 projects, 1 asset"));

    let index = fs::read_to_string(dist.path().join("index.html")).unwrap();
    assert!(index.contains("Hi, I'm Sam Rivera"));
    assert_eq!(index.matches("project-card reveal").count(), 2);
    assert!(dist.path().join("favicon.ico").exists());
    let css = fs::read_to_string(dist.path().join("style.css")).unwrap();
    assert!(css.contains("@keyframes fadeInUp"));
}

#[test]
fn check_lists_catalog() {
    let src = TempDir::new().unwrap();
    let out = run(&["check", "--source", path_arg(src.path())]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("001 E-Commerce Platform [web]"));
    assert!(text.contains("Featured: 3 of 6"));
}

#[test]
fn check_rejects_unknown_keys() {
    let src = TempDir::new().unwrap();
    fs::write(src.path().join("config.toml"), "[scroll]\nnavbar = 10\n").unwrap();
    let out = run(&["check", "--source", path_arg(src.path())]);
    assert!(!out.status.success());
}

#[test]
fn validate_accepts_good_input() {
    let src = TempDir::new().unwrap();
    let out = run(&[
        "validate",
        "--source",
        path_arg(src.path()),
        "--name",
        "Al",
        "--email",
        "al@x.com",
        "--subject",
        "general",
        "--message",
        "Hello there, friend",
    ]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("email    ok"));
}

#[test]
fn validate_fails_on_bad_input_and_reports_json() {
    let src = TempDir::new().unwrap();
    let out = run(&[
        "validate",
        "--source",
        path_arg(src.path()),
        "--name",
        "A",
        "--email",
        "al@x",
        "--json",
    ]);
    assert!(!out.status.success());
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let fields = report["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 4);
    assert_eq!(fields[0]["field"], "name");
    assert_eq!(fields[0]["valid"], false);
    assert_eq!(fields[0]["message"], "Name must be at least 2 characters");
    assert_eq!(fields[1]["message"], "Please enter a valid email address");
    assert_eq!(fields[2]["message"], "Please select a subject");
}
