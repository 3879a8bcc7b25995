//! End-to-end CLI tests: each test writes a schema into a temp directory and
//! runs the binary there with a controlled environment.

use assert_cmd::Command;
use cfgguard_test_util::normalize_nondeterministic;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

const SCHEMA: &str = r#"
config:
  db.env:
    type: enum
    required: true
    values: [dev, staging, prod]
  db.url:
    required: true
  log.level:
    type: enum
    values: [debug, info, warn]
invariants:
  - name: prod-db
    rule: 'execution.env == "prod" => db.env == "prod"'
environments:
  prod:
    allow:
      log.level: [info, warn]
    deny:
      db.url: ["*localhost*", "*127.0.0.1*"]
  staging:
    allow:
      db.env: staging
"#;

/// Helper to get a Command for the cfgguard binary.
#[allow(deprecated)]
fn cfgguard_cmd() -> Command {
    Command::cargo_bin("cfgguard").expect("cfgguard binary not found - run `cargo build` first")
}

fn workspace() -> TempDir {
    let tmp = TempDir::new().expect("create temp dir");
    std::fs::write(tmp.path().join("cfgguard.yaml"), SCHEMA).expect("write schema");
    tmp
}

/// A command running in `dir` that sees only `vars`.
fn cmd_in(dir: &Path, vars: &[(&str, &str)]) -> Command {
    let mut cmd = cfgguard_cmd();
    cmd.current_dir(dir).env_clear();
    for (k, v) in vars {
        cmd.env(k, v);
    }
    cmd
}

fn read_json(path: &Path) -> Value {
    let text = std::fs::read_to_string(path).expect("read json");
    serde_json::from_str(&text).expect("parse json")
}

fn report_path(dir: &Path) -> std::path::PathBuf {
    dir.join("artifacts/cfgguard/report.json")
}

const GOOD_DEV: &[(&str, &str)] = &[
    ("EXECUTION_ENV", "dev"),
    ("DB_ENV", "dev"),
    ("DB_URL", "postgres://localhost/app"),
];

const BAD_PROD: &[(&str, &str)] = &[
    ("EXECUTION_ENV", "prod"),
    ("DB_ENV", "staging"),
    ("DB_URL", "postgres://localhost/app"),
    ("LOG_LEVEL", "debug"),
];

#[test]
fn check_passes_in_dev() {
    let tmp = workspace();
    cmd_in(tmp.path(), GOOD_DEV)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("cfgguard: PASS (env=dev, contract=none)"));

    let report = read_json(&report_path(tmp.path()));
    assert_eq!(report["schema"], "cfgguard.report.v1");
    assert_eq!(report["verdict"], "pass");
    assert_eq!(report["findings"].as_array().unwrap().len(), 0);
    assert_eq!(report["invariants"][0]["name"], "prod-db");
    assert_eq!(report["invariants"][0]["passed"], true);
    assert!(report.get("contract").is_none());
    assert_eq!(report["data"]["config_sha256"].as_str().unwrap().len(), 64);
}

#[test]
fn check_fails_in_prod_and_reports_everything() {
    let tmp = workspace();
    cmd_in(tmp.path(), BAD_PROD)
        .args(["check", "--write-markdown"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("invariants: 0/1 passed"));

    let report = read_json(&report_path(tmp.path()));
    assert_eq!(report["verdict"], "fail");
    assert_eq!(report["data"]["contract"], "prod");

    let checks: Vec<&str> = report["findings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["check_id"].as_str().unwrap())
        .collect();
    assert_eq!(
        checks,
        vec!["contract.allow", "contract.deny", "invariant.rule"]
    );

    let violations = report["contract"]["violations"].as_array().unwrap();
    assert_eq!(violations.len(), 2);
    let deny = violations
        .iter()
        .find(|v| v["rule_type"] == "deny")
        .expect("deny violation");
    assert_eq!(deny["key"], "db.url");
    assert_eq!(deny["pattern"], "*localhost*");

    assert_eq!(report["invariants"][0]["left_value"], "staging");
    assert_eq!(report["invariants"][0]["right_value"], "prod");

    let md = std::fs::read_to_string(tmp.path().join("artifacts/cfgguard/comment.md"))
        .expect("read markdown");
    assert!(md.contains("Verdict: **FAIL**"));
    assert!(md.contains("| `prod-db` | **fail** |"));
}

#[test]
fn check_prints_annotations_on_request() {
    let tmp = workspace();
    cmd_in(tmp.path(), BAD_PROD)
        .args(["check", "--annotations"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains(
            "::error file=cfgguard.yaml::[contract.deny:value_denied]",
        ));
}

#[test]
fn warn_profile_passes_with_exit_zero() {
    let tmp = workspace();
    cmd_in(tmp.path(), BAD_PROD)
        .args(["--profile", "warn", "check"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("cfgguard: WARN"));
}

#[test]
fn environment_override_selects_contract() {
    let tmp = workspace();
    cmd_in(tmp.path(), GOOD_DEV)
        .args(["--environment", "staging", "check"])
        .assert()
        .code(2);

    let report = read_json(&report_path(tmp.path()));
    assert_eq!(report["data"]["contract"], "staging");
    assert_eq!(report["data"]["execution_env"], "dev");
    assert_eq!(report["findings"][0]["code"], "value_not_allowed");
}

#[test]
fn config_file_sets_prefix_and_execution_var() {
    let tmp = workspace();
    std::fs::write(
        tmp.path().join("cfgguard.toml"),
        "env_prefix = \"APP\"\nexecution_env_var = \"DEPLOY_ENV\"\n",
    )
    .expect("write config");

    cmd_in(
        tmp.path(),
        &[
            ("DEPLOY_ENV", "prod"),
            ("APP_DB_ENV", "prod"),
            ("APP_DB_URL", "postgres://db.internal/app"),
            ("DB_URL", "postgres://localhost/app"),
        ],
    )
    .args(["check", "--snapshot-out", "snapshot.json"])
    .assert()
    .success();

    let snapshot = read_json(&tmp.path().join("snapshot.json"));
    assert_eq!(snapshot["schema"], "cfgguard.snapshot.v1");
    assert_eq!(snapshot["execution_env"], "prod");
    assert_eq!(snapshot["values"]["db.url"], "postgres://db.internal/app");
    assert!(snapshot["values"].get("log.level").is_none());
}

#[test]
fn missing_schema_writes_runtime_error_report() {
    let tmp = TempDir::new().expect("create temp dir");
    cmd_in(tmp.path(), GOOD_DEV)
        .arg("check")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cfgguard error"));

    let report = read_json(&report_path(tmp.path()));
    assert_eq!(report["verdict"], "fail");
    assert_eq!(report["findings"][0]["check_id"], "tool.runtime");
}

#[test]
fn check_is_deterministic_modulo_timestamps() {
    let tmp = workspace();
    let mut runs = Vec::new();
    for name in ["a.json", "b.json"] {
        cmd_in(tmp.path(), BAD_PROD)
            .args(["check", "--report-out", name])
            .assert()
            .code(2);
        runs.push(normalize_nondeterministic(read_json(&tmp.path().join(name))));
    }
    assert_eq!(runs[0], runs[1]);
    assert_eq!(runs[0]["tool"]["version"], "__VERSION__");
}

#[test]
fn validate_reports_ok_and_errors() {
    let tmp = workspace();
    cmd_in(tmp.path(), &[])
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "3 keys, 1 invariants, environments: prod, staging",
        ));

    std::fs::write(
        tmp.path().join("broken.yaml"),
        "config:\n  a: {}\ninvariants:\n  - name: t\n    rule: 'ghost == \"x\"'\n",
    )
    .expect("write schema");
    cmd_in(tmp.path(), &[])
        .args(["--schema", "broken.yaml", "validate"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ghost"));
}

#[test]
fn fmt_rule_prints_canonical_form() {
    cfgguard_cmd()
        .args(["fmt-rule", r#"execution.env=="prod" ⇒ db.env=="prod""#])
        .assert()
        .success()
        .stdout(r#"execution.env == "prod" => db.env == "prod""#.to_string() + "\n");

    cfgguard_cmd()
        .args(["fmt-rule", r#"a == "open"#])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unterminated"));
}

#[test]
fn md_and_annotations_render_existing_report() {
    let tmp = workspace();
    cmd_in(tmp.path(), BAD_PROD).arg("check").assert().code(2);

    cmd_in(tmp.path(), &[])
        .arg("md")
        .assert()
        .success()
        .stdout(predicate::str::contains("# cfgguard report"));

    let out = cmd_in(tmp.path(), &[])
        .args(["annotations", "--max", "2"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).expect("utf8");
    assert_eq!(text.lines().count(), 2);
    assert!(text.lines().all(|l| l.starts_with("::error")));
}

#[test]
fn explain_known_and_unknown() {
    cfgguard_cmd()
        .args(["explain", "contract.deny"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Contract Deny Lists"));

    cfgguard_cmd()
        .args(["explain", "nope"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Available check_ids"));
}

#[test]
fn config_schema_describes_settings() {
    let out = cfgguard_cmd()
        .arg("config-schema")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let schema: Value = serde_json::from_slice(&out).expect("json schema");
    assert!(schema["properties"]["execution_env_var"].is_object());
    assert!(schema["properties"]["checks"].is_object());
}
