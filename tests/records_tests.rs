use predicates::str::contains;

mod common;
use common::{init_seeded, json_out, rac, setup_test_db};

#[test]
fn test_add_student_for_new_user() {
    let db_path = setup_test_db("add_student_new_user");
    init_seeded(&db_path);

    rac()
        .args([
            "--db",
            &db_path,
            "user",
            "add",
            "--name",
            "Bob Brown",
            "--email",
            "bob@school.com",
            "--role",
            "student",
        ])
        .assert()
        .success()
        .stdout(contains("User #4 created"));

    rac()
        .args([
            "--db",
            &db_path,
            "student",
            "add",
            "--user",
            "4",
            "--code",
            "STU-2024-002",
            "--class",
            "1",
            "--admission",
            "2024-09-01",
        ])
        .assert()
        .success();

    let page = json_out(&db_path, &["list", "students", "--json"]);
    assert_eq!(page["total"], 2);
    // newest first
    assert_eq!(page["data"][0]["student_code"], "STU-2024-002");
    assert_eq!(page["data"][0]["class_name"], "Grade 5A");

    let d = json_out(&db_path, &["dashboard", "--json"]);
    assert_eq!(d["stats"]["total_students"], 2);
}

#[test]
fn test_duplicate_student_code_is_rejected() {
    let db_path = setup_test_db("duplicate_student_code");
    init_seeded(&db_path);

    rac()
        .args([
            "--db", &db_path, "user", "add", "--name", "Eve", "--email", "eve@school.com",
            "--role", "student",
        ])
        .assert()
        .success();

    rac()
        .args([
            "--db",
            &db_path,
            "student",
            "add",
            "--user",
            "4",
            "--code",
            "STU-2024-001",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Validation failed"));
}

#[test]
fn test_student_profile_needs_student_role() {
    let db_path = setup_test_db("student_needs_role");
    init_seeded(&db_path);

    // user 2 is the demo teacher
    rac()
        .args([
            "--db", &db_path, "student", "add", "--user", "2", "--code", "STU-X",
        ])
        .assert()
        .failure()
        .stderr(contains("expected 'Student'"));
}

#[test]
fn test_grade_defaults_total_to_subject_and_reports_percentage() {
    let db_path = setup_test_db("grade_percentage");
    init_seeded(&db_path);

    rac()
        .args([
            "--db",
            &db_path,
            "grade",
            "add",
            "--student",
            "1",
            "--subject",
            "1",
            "--teacher",
            "1",
            "--exam-type",
            "quiz",
            "--marks",
            "18",
            "--total",
            "20",
        ])
        .assert()
        .success()
        .stdout(contains("18/20 (90.00%)"));

    rac()
        .args([
            "--db",
            &db_path,
            "grade",
            "add",
            "--student",
            "1",
            "--subject",
            "1",
            "--teacher",
            "1",
            "--exam-type",
            "final",
            "--marks",
            "75",
        ])
        .assert()
        .success()
        .stdout(contains("75/100"));

    let page = json_out(&db_path, &["list", "grades", "--student", "1", "--json"]);
    assert_eq!(page["total"], 2);
    let percentages: Vec<f64> = page["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["percentage"].as_f64().unwrap())
        .collect();
    assert!(percentages.contains(&90.0));
    assert!(percentages.contains(&75.0));
}

#[test]
fn test_marks_above_total_are_rejected() {
    let db_path = setup_test_db("grade_over_total");
    init_seeded(&db_path);

    rac()
        .args([
            "--db", &db_path, "grade", "add", "--student", "1", "--subject", "1", "--teacher",
            "1", "--exam-type", "quiz", "--marks", "21", "--total", "20",
        ])
        .assert()
        .failure()
        .stderr(contains("exceed total marks"));
}

#[test]
fn test_attendance_mark_summary_and_percent() {
    let db_path = setup_test_db("attendance_flow");
    init_seeded(&db_path);

    rac()
        .args([
            "--db", &db_path, "attendance", "mark", "--student", "1", "--status", "present",
            "--by", "2", "--in", "08:00",
        ])
        .assert()
        .success()
        .stdout(contains("marked: present"));

    // one row per student and day
    rac()
        .args([
            "--db", &db_path, "attendance", "mark", "--student", "1", "--status", "absent",
            "--by", "2",
        ])
        .assert()
        .failure()
        .stderr(contains("Validation failed"));

    let summary = json_out(&db_path, &["attendance", "summary", "--json"]);
    assert_eq!(summary["present"], 1);
    assert_eq!(summary["absent"], 0);

    let pct = json_out(
        &db_path,
        &["attendance", "percent", "--student", "1", "--json"],
    );
    assert_eq!(pct["percentage"], 100.0);
    assert_eq!(pct["window_days"], 30);

    let d = json_out(&db_path, &["dashboard", "--user", "3", "--json"]);
    assert_eq!(d["roleData"]["attendance_percentage"], 100.0);
}

#[test]
fn test_percent_without_rows_is_zero() {
    let db_path = setup_test_db("attendance_zero");
    init_seeded(&db_path);

    let pct = json_out(
        &db_path,
        &["attendance", "percent", "--student", "1", "--json"],
    );
    assert_eq!(pct["percentage"], 0.0);
}

#[test]
fn test_percent_rejects_out_of_range_window() {
    let db_path = setup_test_db("attendance_window_range");
    init_seeded(&db_path);

    for days in ["0", "3651", "4294967295"] {
        rac()
            .args([
                "--db", &db_path, "attendance", "percent", "--student", "1", "--days", days,
            ])
            .assert()
            .failure()
            .stderr(contains("invalid value"));
    }

    let pct = json_out(
        &db_path,
        &["attendance", "percent", "--student", "1", "--days", "3650", "--json"],
    );
    assert_eq!(pct["window_days"], 3650);
}

#[test]
fn test_delete_unknown_ids_fail_with_not_found() {
    let db_path = setup_test_db("delete_unknown");
    init_seeded(&db_path);

    for (cmd, entity) in [
        ("user", "user"),
        ("student", "student"),
        ("teacher", "teacher"),
        ("class", "class"),
        ("subject", "subject"),
        ("grade", "grade"),
        ("attendance", "attendance"),
        ("announce", "announcement"),
    ] {
        rac()
            .args(["--db", &db_path, cmd, "del", "42"])
            .assert()
            .failure()
            .code(1)
            .stderr(contains(format!("{entity} #42 not found")));
    }
}

#[test]
fn test_deleting_user_cascades_to_student() {
    let db_path = setup_test_db("delete_cascade");
    init_seeded(&db_path);

    rac()
        .args(["--db", &db_path, "user", "del", "3"])
        .assert()
        .success();

    let page = json_out(&db_path, &["list", "students", "--json"]);
    assert_eq!(page["total"], 0);
}

#[test]
fn test_expired_and_draft_announcements_are_hidden() {
    let db_path = setup_test_db("announcement_visibility");
    init_seeded(&db_path);

    rac()
        .args([
            "--db", &db_path, "announce", "add", "--title", "Old news", "--content", "Gone",
            "--by", "1", "--publish", "--expires", "2020-01-01",
        ])
        .assert()
        .success();

    rac()
        .args([
            "--db", &db_path, "announce", "add", "--title", "Draft", "--content", "Later",
            "--by", "1",
        ])
        .assert()
        .success()
        .stdout(contains("(draft)"));

    let d = json_out(&db_path, &["dashboard", "--json"]);
    let titles: Vec<&str> = d["announcements"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Welcome to New Academic Year"]);

    // publishing the draft makes it visible, newest first
    rac()
        .args(["--db", &db_path, "announce", "publish", "3"])
        .assert()
        .success();

    let d = json_out(&db_path, &["dashboard", "--json"]);
    assert_eq!(d["announcements"][0]["title"], "Draft");
    assert_eq!(d["announcements"].as_array().unwrap().len(), 2);
}

#[test]
fn test_class_edit_and_listing() {
    let db_path = setup_test_db("class_edit");
    init_seeded(&db_path);

    rac()
        .args(["--db", &db_path, "class", "edit", "1", "--room", "202"])
        .assert()
        .success();

    let page = json_out(&db_path, &["list", "classes", "--json"]);
    assert_eq!(page["data"][0]["room_number"], "202");
    assert_eq!(page["data"][0]["student_count"], 1);
    assert_eq!(page["data"][0]["class_teacher_name"], "John Smith");

    rac()
        .args(["--db", &db_path, "class", "edit", "1"])
        .assert()
        .failure()
        .stderr(contains("nothing to update"));
}
