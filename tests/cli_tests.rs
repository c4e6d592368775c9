mod common;
use common::{SAMPLE_CSV, cb, no_config, temp_csv};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::env;
use std::fs;

#[test]
fn test_analyze_text_report() {
    let file = temp_csv("analyze_text", SAMPLE_CSV);
    let cfg = no_config("analyze_text");

    cb().args(["--config", &cfg, "analyze", &file])
        .assert()
        .success()
        .stdout(contains("PlusOne Time: submit_history_date → first_sent_to_expert_date"))
        .stdout(contains("Distribution of PlusOne Time"))
        .stdout(contains("Distribution of Gustave Time"))
        .stdout(contains("5-9 days"))
        .stdout(contains("<0 days"))
        .stdout(contains("50+ days"))
        .stdout(contains("1 case(s) excluded"));
}

#[test]
fn test_analyze_json_with_custom_columns() {
    let file = temp_csv("analyze_json", SAMPLE_CSV);
    let cfg = no_config("analyze_json");

    let output = cb()
        .args([
            "--config",
            &cfg,
            "analyze",
            &file,
            "--format",
            "json",
            "--plusone-start",
            "create_date",
            "--plusone-end",
            "close_date",
        ])
        .output()
        .expect("run caseboard");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(json["selection"]["plusone"]["start"], "create_date");
    assert_eq!(json["rows"][0]["plusone_time"], 31);
    assert!(json["rows"][1]["plusone_time"].is_null());
    assert_eq!(json["pies"].as_array().unwrap().len(), 2);
}

#[test]
fn test_analyze_negative_policy_missing() {
    let file = temp_csv("analyze_negative", SAMPLE_CSV);
    let cfg = no_config("analyze_negative");

    cb().args([
        "--config",
        &cfg,
        "analyze",
        &file,
        "--negative-policy",
        "missing",
    ])
    .assert()
    .success()
    .stdout(contains("<0 days").not())
    .stdout(contains("2 case(s) excluded"));
}

#[test]
fn test_analyze_unknown_column_fails() {
    let file = temp_csv("analyze_unknown", SAMPLE_CSV);
    let cfg = no_config("analyze_unknown");

    cb().args(["--config", &cfg, "analyze", &file, "--gustave-end", "nope"])
        .assert()
        .failure()
        .stderr(contains("Unknown column: nope"));
}

#[test]
fn test_duplicate_header_is_a_load_error() {
    let file = temp_csv("dup_header", "name,close_date,close_date\nA,2024-01-01,2024-01-02\n");
    let cfg = no_config("dup_header");

    cb().args(["--config", &cfg, "analyze", &file])
        .assert()
        .failure()
        .stderr(contains("Unable to load dataset"))
        .stderr(contains("duplicate column name in header: close_date"));
}

#[test]
fn test_columns_listing() {
    let file = temp_csv("columns", SAMPLE_CSV);
    let cfg = no_config("columns");

    cb().args(["--config", &cfg, "columns", &file])
        .assert()
        .success()
        .stdout(contains("5 rows, 8 columns"))
        .stdout(contains("submit_history_date"))
        .stdout(contains("4/5"))
        .stdout(contains("notes"));
}

#[test]
fn test_semicolon_delimiter() {
    let file = temp_csv(
        "semicolon",
        "name;submit_history_date;first_sent_to_expert_date;final_opinion_date\nA;2024-01-01;2024-01-06;2024-01-06\n",
    );
    let cfg = no_config("semicolon");

    cb().args(["--config", &cfg, "analyze", &file, "--delimiter", ";", "--format", "json"])
        .assert()
        .success()
        .stdout(contains("\"plusone_bucket\": \"5-9 days\""))
        .stdout(contains("\"gustave_bucket\": \"0-4 days\""));
}

#[test]
fn test_session_from_stdin() {
    let file = temp_csv("session_stdin", SAMPLE_CSV);
    let cfg = no_config("session_stdin");

    cb().args(["--config", &cfg, "session", &file])
        .write_stdin("select plusone first_sent_to_expert_date final_opinion_date\nshow\nquit\n")
        .assert()
        .success()
        .stdout(contains("Loaded"))
        .stdout(contains("PlusOne Time: first_sent_to_expert_date → final_opinion_date"))
        .stdout(contains("Distribution of Gustave Time"));
}

#[test]
fn test_session_reports_bad_commands_and_continues() {
    let cfg = no_config("session_bad");

    cb().args(["--config", &cfg, "session"])
        .write_stdin("show\nfrobnicate\nhelp\n")
        .assert()
        .success()
        .stderr(contains("No dataset loaded"))
        .stderr(contains("Invalid session command: frobnicate"))
        .stdout(contains("Commands:"));
}

#[test]
fn test_session_survives_missing_start_file() {
    let cfg = no_config("session_missing_file");

    cb().args(["--config", &cfg, "session", "/nonexistent/caseboard_cases.csv"])
        .write_stdin("help\nquit\n")
        .assert()
        .success()
        .stderr(contains("I/O error"))
        .stdout(contains("Commands:"));
}

#[test]
fn test_init_and_check_config() {
    let mut path = env::temp_dir();
    path.push("caseboard_init_test.conf");
    let path = path.to_string_lossy().to_string();
    fs::remove_file(&path).ok();

    cb().args(["--config", &path, "init"]).assert().success();
    let content = fs::read_to_string(&path).expect("config written");
    assert!(content.contains("submit_history_date"));
    assert!(content.contains("negative_policy: bucket"));

    cb().args(["--config", &path, "config", "--check"])
        .assert()
        .success()
        .stdout(contains("Configuration file is complete"));

    fs::write(&path, "name_column: case\nbuckets:\n  width: 7\n").unwrap();
    cb().args(["--config", &path, "config", "--check"])
        .assert()
        .success()
        .stdout(contains("buckets.count"))
        .stdout(contains("bar_axis"));

    cb().args(["--config", &path, "config", "--print"])
        .assert()
        .success()
        .stdout(contains("width: 7"))
        .stdout(contains("name_column: case"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut path = env::temp_dir();
    path.push("caseboard_invalid_test.conf");
    fs::write(&path, "buckets:\n  width: 0\n").unwrap();
    let file = temp_csv("invalid_config", SAMPLE_CSV);

    cb().args(["--config", path.to_str().unwrap(), "analyze", &file])
        .assert()
        .failure()
        .stderr(contains("buckets.width must be positive"));
}

#[test]
fn test_init_test_mode_writes_nothing() {
    let cfg = no_config("init_test_mode");

    cb().args(["--config", &cfg, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Test mode"));
    assert!(!std::path::Path::new(&cfg).exists());
}
