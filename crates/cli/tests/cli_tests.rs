//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("page-zen")
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

#[test]
fn test_cli_extract_file_input() {
    cmd()
        .args(["extract", &get_fixture_path("article.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sleeper trains are running again"))
        .stdout(predicate::str::contains("Cheap flights").not());
}

#[test]
fn test_cli_extract_stdin_input() {
    let html = std::fs::read_to_string(get_fixture_path("article.html")).unwrap();
    cmd()
        .args(["extract", "-"])
        .write_stdin(html)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rolling stock"));
}

#[test]
fn test_cli_extract_markdown() {
    cmd()
        .args([
            "extract",
            "--markdown",
            "--base-url",
            "https://railweekly.test/news/night-trains",
            &get_fixture_path("article.html"),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://railweekly.test/media/sleeper-1920.png"));
}

#[test]
fn test_cli_extract_json() {
    let output = cmd()
        .args([
            "extract",
            "--json",
            "--base-url",
            "https://railweekly.test/news/night-trains",
            &get_fixture_path("article.html"),
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["url"], "https://railweekly.test/news/night-trains");
    assert_eq!(
        json["length"].as_u64().unwrap() as usize,
        json["content"].as_str().unwrap().chars().count()
    );
    assert!(json.get("markdown").is_none());
    assert_eq!(
        json["open_graph"]["image"],
        "https://railweekly.test/media/sleeper-cover.jpg"
    );
}

#[test]
fn test_cli_extract_json_with_markdown() {
    let output = cmd()
        .args(["extract", "--json", "--markdown", &get_fixture_path("article.html")])
        .output()
        .unwrap();

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json["markdown"].is_string());
}

#[test]
fn test_cli_opengraph() {
    let output = cmd()
        .args([
            "opengraph",
            "--base-url",
            "https://shop.test/kettle",
            &get_fixture_path("social_only.html"),
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["title"], "Kettle 2.0");
    assert_eq!(json["image"], "https://shop.test/img/kettle.png");
    assert_eq!(json["url"], "https://shop.test/kettle");
}

#[test]
fn test_cli_output_file() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("article.md");

    cmd()
        .args(["extract", "--markdown", "-o", output.to_str().unwrap()])
        .arg(get_fixture_path("article.html"))
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.contains("Innsbruck"));
}

#[test]
fn test_cli_invalid_file() {
    cmd()
        .args(["extract", "nonexistent.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn test_cli_non_article_fails() {
    cmd()
        .args(["extract", &get_fixture_path("nav_only.html")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to extract article"));
}

#[test]
fn test_cli_invalid_base_url() {
    cmd()
        .args(["extract", "--base-url", "not a url", &get_fixture_path("article.html")])
        .assert()
        .failure();
}

#[test]
fn test_cli_verbose() {
    cmd()
        .args(["extract", "-v", &get_fixture_path("article.html")])
        .assert()
        .success()
        .stderr(predicate::str::contains("Page Zen"))
        .stderr(predicate::str::contains("Length:"));
}

#[test]
fn test_cli_requires_subcommand() {
    cmd().assert().failure();
}

#[test]
fn test_cli_completions() {
    cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("page-zen"));
}
