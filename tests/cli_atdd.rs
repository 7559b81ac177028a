use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_tables(dir: &Path) {
    fs::create_dir_all(dir).expect("tables dir should create");
    fs::write(
        dir.join("integrationLevels.json"),
        r#"{ "partial": { "weight": 0.5 }, "full": { "weight": 1.0 } }"#,
    )
    .expect("integration levels should write");
    fs::write(
        dir.join("toolQuality.json"),
        r#"{ "managed": { "Checkmarx": 1.0 }, "approvedUnmanaged": { "Semgrep": 0.9 }, "other": 0.8 }"#,
    )
    .expect("tool quality should write");
    fs::write(
        dir.join("riskFactors.json"),
        r#"{ "facing": { "external": 2 }, "dataTypes": { "PII": 1.5 } }"#,
    )
    .expect("risk factors should write");
}

fn appsec_score(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("appsec-score").expect("binary should compile");
    cmd.env("HOME", root).env_remove("RUST_LOG").arg("--root").arg(root);
    cmd
}

#[test]
fn settings_file_points_at_tables_dir() {
    let root = TempDir::new().expect("temp dir should be created");
    write_tables(&root.path().join("tables"));
    fs::write(
        root.path().join("appsec-score.toml"),
        r#"
[scoring]
tables_dir = "tables"

[report]
format = "json"
"#,
    )
    .expect("settings should write");
    fs::write(root.path().join("app.json"), r#"{ "name": "empty" }"#).expect("input should write");

    appsec_score(root.path())
        .arg("score")
        .arg(root.path().join("app.json"))
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"totalScore\": 0"));
}

#[test]
fn all_categories_not_applicable_scores_full_tool_points() {
    let root = TempDir::new().expect("temp dir should be created");
    write_tables(&root.path().join("config/scoring"));
    fs::write(
        root.path().join("app.json"),
        r#"{
            "name": "static-site",
            "description": "Marketing site",
            "owner": "web",
            "repoUrl": "https://git.example.com/site",
            "language": "HTML",
            "framework": "Hugo",
            "serverEnvironment": "CDN",
            "authProfiles": "none",
            "dataTypes": "public",
            "sastNA": true,
            "dastNA": true,
            "appFirewallNA": true,
            "apiSecurityNA": true
        }"#,
    )
    .expect("input should write");

    appsec_score(root.path())
        .args(["score", "--format", "json"])
        .arg(root.path().join("app.json"))
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"knowledgeScore\": 40"))
        .stdout(predicate::str::contains("\"toolScore\": 50"))
        .stdout(predicate::str::contains("\"totalScore\": 90"));
}

#[test]
fn min_score_exits_with_warning_code() {
    let root = TempDir::new().expect("temp dir should be created");
    write_tables(&root.path().join("config/scoring"));
    fs::write(
        root.path().join("apps.json"),
        r#"[{ "name": "bare" }, { "name": "covered", "sastNA": true, "dastNA": true, "appFirewallNA": true, "apiSecurityNA": true }]"#,
    )
    .expect("input should write");

    appsec_score(root.path())
        .args(["score", "--min-score", "40"])
        .arg(root.path().join("apps.json"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("warning: bare scored 0 (minimum 40)"))
        .stderr(predicate::str::contains("covered").not());
}

#[test]
fn min_score_rejects_out_of_range_values() {
    let root = TempDir::new().expect("temp dir should be created");
    appsec_score(root.path())
        .args(["score", "apps.json", "--min-score", "101"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("101"));
}

#[test]
fn missing_tables_fail_fast() {
    let root = TempDir::new().expect("temp dir should be created");
    fs::write(root.path().join("app.json"), "{}").expect("input should write");

    appsec_score(root.path())
        .arg("score")
        .arg(root.path().join("app.json"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("config file not found"))
        .stderr(predicate::str::contains("integrationLevels.json"));
}

#[test]
fn invalid_table_values_fail_fast() {
    let root = TempDir::new().expect("temp dir should be created");
    let tables = root.path().join("config/scoring");
    write_tables(&tables);
    fs::write(
        tables.join("riskFactors.json"),
        r#"{ "facing": { "external": 0.5 }, "dataTypes": {} }"#,
    )
    .expect("risk factors should write");

    appsec_score(root.path())
        .arg("check")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("riskFactors.facing.external"));
}

#[test]
fn missing_input_is_a_runtime_failure() {
    let root = TempDir::new().expect("temp dir should be created");
    write_tables(&root.path().join("config/scoring"));

    appsec_score(root.path())
        .arg("score")
        .arg(root.path().join("nope.json"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("input file not found"));
}

#[test]
fn invalid_as_of_is_rejected() {
    let root = TempDir::new().expect("temp dir should be created");
    write_tables(&root.path().join("config/scoring"));
    fs::write(root.path().join("app.json"), "{}").expect("input should write");

    appsec_score(root.path())
        .args(["score", "--as-of", "yesterday"])
        .arg(root.path().join("app.json"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid timestamp: yesterday"));
}

#[test]
fn company_with_no_applications_reports_zero() {
    let root = TempDir::new().expect("temp dir should be created");
    write_tables(&root.path().join("config/scoring"));
    fs::write(
        root.path().join("company.json"),
        r#"{ "name": "Empty Co", "applications": [] }"#,
    )
    .expect("input should write");

    appsec_score(root.path())
        .args(["company", "--format", "json"])
        .arg(root.path().join("company.json"))
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"company\": \"Empty Co\""))
        .stdout(predicate::str::contains("\"applicationCount\": 0"))
        .stdout(predicate::str::contains("\"totalScore\": 0"));
}

#[test]
fn debug_logging_goes_to_stderr() {
    let root = TempDir::new().expect("temp dir should be created");
    write_tables(&root.path().join("config/scoring"));
    fs::write(root.path().join("app.json"), "{}").expect("input should write");

    appsec_score(root.path())
        .args(["-vv", "score", "--format", "json"])
        .arg(root.path().join("app.json"))
        .assert()
        .code(0)
        .stderr(predicate::str::contains("loaded scoring tables"))
        .stdout(predicate::str::contains("loaded scoring tables").not());
}

#[test]
fn malformed_company_document_is_a_runtime_failure() {
    let root = TempDir::new().expect("temp dir should be created");
    write_tables(&root.path().join("config/scoring"));
    fs::write(
        root.path().join("company.json"),
        r#"{ "name": "Acme", "applications": [{ "name": "billing" }, "oops"] }"#,
    )
    .expect("input should write");

    appsec_score(root.path())
        .arg("company")
        .arg(root.path().join("company.json"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("input parse error"))
        .stdout(predicate::str::contains("| Acme |").not());
}
