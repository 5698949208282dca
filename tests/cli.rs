use assert_cmd::prelude::*;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

fn token_expiring_in(hours: i64) -> String {
    let exp = (Utc::now() + chrono::Duration::hours(hours)).timestamp();
    format!(
        "{}.{}.sig",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#),
        URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{exp}}}"#))
    )
}

fn write_config(dir: &Path, api_base_url: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    let contents = format!(
        "api_base_url: {api_base_url}\nsession_file: {}\nrequest_timeout_secs: 5\n",
        dir.join("session.yaml").display()
    );
    fs::write(&path, contents).expect("failed to write config");
    path
}

fn write_session(dir: &Path, token: &str) -> PathBuf {
    let path = dir.join("session.yaml");
    let contents = format!("token: {token}\nstudentID: S1\nstudentName: Alice\n");
    fs::write(&path, contents).expect("failed to write session");
    path
}

fn gradebook(config: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gradebook"));
    cmd.arg("--config")
        .arg(config)
        .env("NO_COLOR", "1")
        .env_remove("GRADEBOOK_CONFIG")
        .env_remove("GRADEBOOK_API_URL")
        .env_remove("GRADEBOOK_FORMAT")
        .env_remove("GRADEBOOK_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn status_without_session_reports_logged_out() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config = write_config(temp.path(), "http://127.0.0.1:9/api");

    let assert = gradebook(&config).arg("status").assert().success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("Not logged in"));
    assert!(stdout.contains(&config.to_string_lossy().to_string()));
    assert!(stdout.contains("http://127.0.0.1:9/api"));

    Ok(())
}

#[test]
fn status_json_reports_stored_identity() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config = write_config(temp.path(), "http://127.0.0.1:9/api");
    write_session(temp.path(), &token_expiring_in(2));

    let assert = gradebook(&config)
        .args(["--format", "json", "status"])
        .assert()
        .success();

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(report["data"]["logged_in"], true);
    assert_eq!(report["data"]["subject_id"], "S1");
    assert_eq!(report["data"]["display_name"], "Alice");
    assert!(report["data"]["token_expires_at"].is_string());

    Ok(())
}

#[test]
fn status_flags_expired_token() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config = write_config(temp.path(), "http://127.0.0.1:9/api");
    write_session(temp.path(), &token_expiring_in(-1));

    gradebook(&config)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Session token expired"));

    Ok(())
}

#[test]
fn navigate_to_protected_page_without_session_lands_on_login()
-> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config = write_config(temp.path(), "http://127.0.0.1:9/api");

    let assert = gradebook(&config)
        .args(["--format", "json", "navigate", "/components/studyplan"])
        .assert()
        .success();

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(report["data"]["landed_name"], "login");
    assert_eq!(report["data"]["landed_path"], "/auth/login");
    assert_eq!(report["data"]["redirected"], true);

    Ok(())
}

#[test]
fn navigate_to_login_with_session_lands_on_dashboard() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config = write_config(temp.path(), "http://127.0.0.1:9/api");
    write_session(temp.path(), &token_expiring_in(2));

    gradebook(&config)
        .args(["navigate", "/auth/login"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/dashboard"));

    // Leaving the register page for login is allowed even when signed in
    gradebook(&config)
        .args(["navigate", "/auth/login", "--from", "/auth/login/register"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(login)"));

    Ok(())
}

#[test]
fn navigate_reports_redirect_by_route_not_spelling() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config = write_config(temp.path(), "http://127.0.0.1:9/api");
    write_session(temp.path(), &token_expiring_in(2));

    let assert = gradebook(&config)
        .args(["--format", "json", "navigate", "dashboard"])
        .assert()
        .success();
    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(report["data"]["landed_path"], "/dashboard");
    assert_eq!(report["data"]["redirected"], false);

    fs::remove_file(temp.path().join("session.yaml"))?;
    let assert = gradebook(&config)
        .args(["--format", "json", "navigate", "/auth/login?next=%2Fdashboard"])
        .assert()
        .success();
    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(report["data"]["landed_name"], "login");
    assert_eq!(report["data"]["redirected"], false);

    // The root path is a static redirect to login
    let assert = gradebook(&config)
        .args(["--format", "json", "navigate", "/"])
        .assert()
        .success();
    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout)?;
    assert_eq!(report["data"]["landed_name"], "login");
    assert_eq!(report["data"]["redirected"], true);

    Ok(())
}

#[test]
fn routes_lists_named_pages() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config = write_config(temp.path(), "http://127.0.0.1:9/api");

    gradebook(&config)
        .arg("routes")
        .assert()
        .success()
        .stdout(predicate::str::contains("dashboard"))
        .stdout(predicate::str::contains("/components/poststudyplan"));

    Ok(())
}

#[test]
fn login_stores_session_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let token = token_expiring_in(2);
    let login = server
        .mock("POST", "/api/auth/login")
        .with_status(200)
        .with_body(format!(
            r#"{{"token":"{token}","studentID":"S1","name":"Alice"}}"#
        ))
        .create();

    let temp = tempdir()?;
    let config = write_config(temp.path(), &format!("{}/api", server.url()));

    gradebook(&config)
        .args(["login", "--username", "alice", "--password", "pw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as Alice (S1)"));
    login.assert();

    let session = fs::read_to_string(temp.path().join("session.yaml"))?;
    assert!(session.contains(&token));
    assert!(session.contains("studentName: Alice"));

    gradebook(&config)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as Alice"));

    Ok(())
}

#[test]
fn login_rejection_exits_with_server_message() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _login = server
        .mock("POST", "/api/auth/login")
        .with_status(401)
        .with_body(r#"{"message":"Invalid username or password"}"#)
        .create();

    let temp = tempdir()?;
    let config = write_config(temp.path(), &format!("{}/api", server.url()));

    gradebook(&config)
        .args(["login", "--username", "alice", "--password", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid username or password"));
    assert!(!temp.path().join("session.yaml").exists());

    Ok(())
}

#[test]
fn logout_removes_session_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config = write_config(temp.path(), "http://127.0.0.1:9/api");
    let session = write_session(temp.path(), &token_expiring_in(2));

    gradebook(&config)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));
    assert!(!session.exists());

    Ok(())
}

#[test]
fn expired_session_blocks_request_and_clears_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let list = server
        .mock("GET", "/api/Course/GetCoursesList")
        .expect(0)
        .create();

    let temp = tempdir()?;
    let config = write_config(temp.path(), &format!("{}/api", server.url()));
    let session = write_session(temp.path(), &token_expiring_in(-1));

    gradebook(&config)
        .args(["course", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Your session has ended"))
        .stderr(predicate::str::contains("/auth/login"));
    list.assert();
    assert!(!session.exists());

    Ok(())
}

#[test]
fn course_list_renders_table() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let token = token_expiring_in(2);
    let _list = server
        .mock("GET", "/api/Course/GetCoursesList")
        .match_header("authorization", format!("Bearer {token}").as_str())
        .with_status(200)
        .with_body(
            r#"[{"courseCode":"CS101","courseNameTH":"การเขียนโปรแกรม","courseNameEN":"Programming","credit":3,"subjectGroup":"Core"}]"#,
        )
        .create();

    let temp = tempdir()?;
    let config = write_config(temp.path(), &format!("{}/api", server.url()));
    write_session(temp.path(), &token);

    gradebook(&config)
        .args(["course", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CS101"))
        .stdout(predicate::str::contains("Programming"));

    Ok(())
}

#[test]
fn course_delete_with_yes_skips_prompt() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let delete = server
        .mock("DELETE", "/api/Course/DeleteCourse")
        .match_query(mockito::Matcher::UrlEncoded(
            "courseCode".into(),
            "CS101".into(),
        ))
        .with_status(200)
        .with_body(r#""Course deleted""#)
        .create();

    let temp = tempdir()?;
    let config = write_config(temp.path(), &format!("{}/api", server.url()));
    write_session(temp.path(), &token_expiring_in(2));

    gradebook(&config)
        .args(["course", "delete", "CS101", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted course CS101"));
    delete.assert();

    Ok(())
}

#[test]
fn grade_get_reports_missing_courses() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _found = server
        .mock("GET", "/api/Grade")
        .match_query(mockito::Matcher::UrlEncoded(
            "courseCode".into(),
            "CS101".into(),
        ))
        .with_status(200)
        .with_body(
            r#"{"studentId":"S1","courseCode":"CS101","grade":"B+","semester":"1","academicYear":"2567"}"#,
        )
        .create();
    let _missing = server
        .mock("GET", "/api/Grade")
        .match_query(mockito::Matcher::UrlEncoded(
            "courseCode".into(),
            "CS999".into(),
        ))
        .with_status(404)
        .create();

    let temp = tempdir()?;
    let config = write_config(temp.path(), &format!("{}/api", server.url()));
    write_session(temp.path(), &token_expiring_in(2));

    gradebook(&config)
        .args(["grade", "get", "S1", "CS101", "CS999"])
        .assert()
        .success()
        .stdout(predicate::str::contains("B+"))
        .stderr(predicate::str::contains("No grade found for: CS999"));

    Ok(())
}
