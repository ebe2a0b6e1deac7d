#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rac() -> Command {
    cargo_bin_cmd!("racademic")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_racademic.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the DB in test mode (no config file written)
pub fn init_db(db_path: &str) {
    rac()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Initialize the DB and load the demo dataset.
///
/// Ids on a fresh seed: users 1 (admin), 2 (teacher), 3 (student);
/// teacher profile 1, class 1, student 1, subjects 1..=6
/// (1 = Mathematics, total 100), announcement 1.
pub fn init_seeded(db_path: &str) {
    rac()
        .args(["--db", db_path, "--test", "init", "--seed"])
        .assert()
        .success();
}

/// Run a command expected to succeed and parse its stdout as JSON.
pub fn json_out(db_path: &str, args: &[&str]) -> serde_json::Value {
    let mut full = vec!["--db", db_path];
    full.extend_from_slice(args);

    let output = rac().args(&full).output().expect("run racademic");
    assert!(
        output.status.success(),
        "command {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}
