use assert_cmd::Command;
use predicates::prelude::*;

fn flakeview() -> Command {
    let mut cmd = Command::cargo_bin("flakeview").unwrap();
    cmd.env_remove("FLAKEVIEW_API_URL").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    flakeview()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("flaky-tests"))
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_invalid_date_is_rejected() {
    flakeview()
        .args(["flaky-tests", "show", "--project", "server", "--date", "03/04/2015"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn test_config_init_and_show() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    flakeview()
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .success();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("[api]"));
    assert!(written.contains("chart_limit = 50"));

    flakeview()
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    std::fs::write(&path, "[api]\nbase_url = \"https://ci.example.com\"\n").unwrap();
    flakeview()
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://ci.example.com"));
}

#[test]
fn test_api_url_flag_overrides_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[api]\nbase_url = \"https://ci.example.com\"\n").unwrap();

    flakeview()
        .arg("--config")
        .arg(&path)
        .args(["--api-url", "https://other.example.com", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://other.example.com"));
}

#[test]
fn test_environment_overrides_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[api]\nbase_url = \"https://ci.example.com\"\n\n[dashboard]\nchart_limit = 30\n",
    )
    .unwrap();

    flakeview()
        .arg("--config")
        .arg(&path)
        .env("FLAKEVIEW_API__BASE_URL", "https://env.example.com")
        .env("FLAKEVIEW_DASHBOARD__CHART_LIMIT", "20")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://env.example.com"))
        .stdout(predicate::str::contains("chart_limit = 20"))
        .stdout(predicate::str::contains("https://ci.example.com").not());
}

#[test]
fn test_missing_config_file_fails() {
    flakeview()
        .args(["--config", "/nonexistent/flakeview.toml", "config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_unreachable_api_reports_error() {
    flakeview()
        .args([
            "--api-url",
            "http://127.0.0.1:9",
            "flaky-tests",
            "show",
            "--project",
            "server",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}
