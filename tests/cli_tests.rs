use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::path::Path;

mod common;
use common::{init_db, init_seeded, json_out, rac, setup_test_db, temp_out};

#[test]
fn test_init_reports_applied_migrations() {
    let db_path = setup_test_db("init_reports_migrations");

    rac()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"))
        .stdout(contains("migration(s) applied"));

    // second run applies nothing
    rac()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("(0 migration(s) applied)"));
}

#[test]
fn test_seed_is_idempotent() {
    let db_path = setup_test_db("seed_idempotent");
    init_seeded(&db_path);

    rac()
        .args(["--db", &db_path, "--test", "init", "--seed"])
        .assert()
        .success()
        .stdout(contains("Demo data already present"));

    let page = json_out(&db_path, &["list", "subjects", "--json"]);
    assert_eq!(page["total"], 6);
}

#[test]
fn test_health_ok() {
    let db_path = setup_test_db("health_ok");
    init_db(&db_path);

    rac()
        .args(["--db", &db_path, "health"])
        .assert()
        .success()
        .stdout(contains("Database OK"));
}

#[test]
fn test_dashboard_anonymous_json() {
    let db_path = setup_test_db("dashboard_anonymous");
    init_seeded(&db_path);

    let d = json_out(&db_path, &["dashboard", "--json"]);

    assert_eq!(d["stats"]["total_students"], 1);
    assert_eq!(d["stats"]["total_teachers"], 1);
    assert_eq!(d["stats"]["total_classes"], 1);
    assert_eq!(d["stats"]["total_subjects"], 6);
    assert_eq!(d["announcements"].as_array().unwrap().len(), 1);
    assert!(d["attendanceToday"].is_null());
    assert!(d["user"].is_null());
}

#[test]
fn test_dashboard_admin_sees_zero_filled_summary() {
    let db_path = setup_test_db("dashboard_admin");
    init_seeded(&db_path);

    let d = json_out(&db_path, &["dashboard", "--user", "1", "--json"]);
    let summary = d["attendanceToday"].as_object().unwrap();

    assert_eq!(summary.len(), 4);
    for status in ["present", "absent", "late", "excused"] {
        assert_eq!(summary[status], 0, "{status}");
    }
    assert_eq!(d["user"]["role"], "school_admin");
}

#[test]
fn test_dashboard_unknown_user_fails() {
    let db_path = setup_test_db("dashboard_unknown_user");
    init_seeded(&db_path);

    rac()
        .args(["--db", &db_path, "dashboard", "--user", "999"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("user #999 not found"));
}

#[test]
fn test_dashboard_text_lists_school_totals() {
    let db_path = setup_test_db("dashboard_text");
    init_seeded(&db_path);

    rac()
        .args(["--db", &db_path, "dashboard", "--user", "2"])
        .assert()
        .success()
        .stdout(contains("Subjects : 6"))
        .stdout(contains("Grade 5A"))
        .stdout(contains("Welcome to New Academic Year"));
}

#[test]
fn test_log_print_shows_init_and_seed() {
    let db_path = setup_test_db("log_print");
    init_seeded(&db_path);

    rac()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init").and(contains("seed")));
}

#[test]
fn test_db_info_and_check() {
    let db_path = setup_test_db("db_info_check");
    init_seeded(&db_path);

    rac()
        .args(["--db", &db_path, "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("students"))
        .stdout(contains("Integrity check passed"));
}

#[test]
fn test_backup_plain_and_compressed() {
    let db_path = setup_test_db("backup_plain");
    init_seeded(&db_path);

    let plain = temp_out("backup_plain", "sqlite");
    rac()
        .args(["--db", &db_path, "backup", "--file", &plain, "--force"])
        .assert()
        .success()
        .stdout(contains("Backup created"));
    assert!(Path::new(&plain).exists());

    let zipped_src = temp_out("backup_zipped", "sqlite");
    let zipped = temp_out("backup_zipped", "zip");
    rac()
        .args([
            "--db",
            &db_path,
            "backup",
            "--file",
            &zipped_src,
            "--compress",
            "--force",
        ])
        .assert()
        .success();
    assert!(Path::new(&zipped).exists());
    assert!(!Path::new(&zipped_src).exists());
}
