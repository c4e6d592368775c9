#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use caseboard::config::Config;
use caseboard::core::bucketizer::Bucketizer;
use caseboard::core::loader::{LoadOptions, load_bytes};
use caseboard::models::table::CaseTable;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Five cases covering the interesting shapes:
/// A: 5 / 3 days, B: 0 / 60, C: -9 / 1, D: unparseable start / 15,
/// E: time of day on both ends (1 day after truncation) / 59.
pub const SAMPLE_CSV: &str = "\
name,create_date,submit_history_date,first_sent_to_expert_date,final_opinion_date,close_date,follow_up_date,notes
A,2024-01-01,2024-01-01,2024-01-06,2024-01-09,2024-02-01,,first
B,2024-01-02,2024-03-01,2024-03-01,2024-04-30,,,
C,2024-01-03,2024-01-10,2024-01-01,2024-01-02,,,late entry
D,2024-01-04,not a date,2024-01-05,2024-01-20,,,
E,2024-01-05,2024-01-01 23:59:00,2024-01-02 00:01:00,2024-03-01,,,
";

pub fn cb() -> Command {
    cargo_bin_cmd!("caseboard")
}

/// Write `content` to a unique file inside the system temp dir
pub fn temp_csv(name: &str, content: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("caseboard_{name}.csv"));
    fs::write(&path, content).expect("write temp csv");
    path.to_string_lossy().to_string()
}

/// Path of a config file that does not exist, so defaults are used
pub fn no_config(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("caseboard_{name}_missing.conf"));
    fs::remove_file(&path).ok();
    path.to_string_lossy().to_string()
}

pub fn default_options() -> LoadOptions {
    let cfg = Config::default();
    LoadOptions::new(b',', cfg.date_columns)
}

pub fn sample_table() -> CaseTable {
    load_bytes(SAMPLE_CSV.as_bytes(), &default_options()).expect("sample loads")
}

pub fn default_bucketizer() -> Bucketizer {
    Bucketizer::from_config(&Config::default().buckets).expect("default partition")
}
