use predicates::prelude::*;
use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db_with_data, rca, setup_test_db, temp_out};

#[test]
fn list_with_search() {
    rca()
        .args(["students", "list", "--search", "sit"])
        .assert()
        .success()
        .stdout(contains("Siti Aminah"))
        .stdout(contains("Budi Santoso").not())
        .stdout(contains("1 student(s)"));
}

#[test]
fn list_with_category_filters() {
    rca()
        .args(["students", "list", "--batch", "2022", "--status", "Inactive"])
        .assert()
        .success()
        .stdout(contains("Kevin Hartono"))
        .stdout(contains("James Rodriguez").not());
}

#[test]
fn list_rejects_unknown_sort_key() {
    rca()
        .args(["students", "list", "--sort", "shoe_size"])
        .assert()
        .failure()
        .stderr(contains("Invalid sort specification"));
}

#[test]
fn show_semester_scope_with_trend() {
    rca()
        .args(["students", "show", "ST-005", "--scope", "dw-s2"])
        .assert()
        .success()
        .stdout(contains("Dewi Wulandari"))
        .stdout(contains("Semester GPA (IPS)"))
        .stdout(contains("6.7%"))
        .stdout(contains("Credits vs previous"));
}

#[test]
fn show_overview_with_ledger() {
    rca()
        .args(["students", "show", "ST-001"])
        .assert()
        .success()
        .stdout(contains("Cumulative GPA (IPK)"))
        .stdout(contains("42/144 SKS (29%)"))
        .stdout(contains("Paid: Rp 11.000.000"));
}

#[test]
fn show_unknown_student_fails() {
    rca()
        .args(["students", "show", "ST-404"])
        .assert()
        .failure()
        .stderr(contains("Student not found: ST-404"));
}

#[test]
fn history_defaults_to_issues() {
    rca()
        .args(["attendance", "history"])
        .assert()
        .success()
        .stdout(contains("Total 13  |  H 7  I 2  S 1  A 3"))
        .stdout(contains("Rudi Ardiansyah"))
        .stdout(contains("Dewi Wulandari").not());

    rca()
        .args(["attendance", "history", "--view", "all"])
        .assert()
        .success()
        .stdout(contains("Dewi Wulandari"));
}

#[test]
fn history_rejects_unknown_view() {
    rca()
        .args(["attendance", "history", "--view", "weekly"])
        .assert()
        .failure()
        .stderr(contains("Invalid argument"));
}

#[test]
fn input_save_reports_counts_and_missing_proof() {
    rca()
        .args([
            "attendance",
            "input",
            "--date",
            "2023-10-25",
            "--mark",
            "ST-001=H",
            "--mark",
            "10293852=S",
            "--save",
        ])
        .assert()
        .success()
        .stdout(contains(
            "Attendance for 2023-10-25 saved: 2 record(s) (H 1, I 0, S 1, A 0)",
        ))
        .stdout(contains("Saved without proof: Rudi Ardiansyah"));
}

#[test]
fn input_refuses_proof_for_present_student() {
    let proof = temp_out("cli_present_proof", "pdf");
    fs::write(&proof, b"%PDF-1.4 test").unwrap();

    rca()
        .args([
            "attendance",
            "input",
            "--date",
            "2023-10-25",
            "--mark",
            "ST-001=H",
            "--proof",
            &format!("ST-001={proof}"),
            "--save",
        ])
        .assert()
        .failure()
        .stderr(contains("Proof can only be attached to Izin or Sakit rows: Budi Santoso"));

    fs::remove_file(&proof).ok();
}

#[test]
fn input_without_marks_cannot_be_saved() {
    rca()
        .args(["attendance", "input", "--date", "2023-10-25", "--save"])
        .assert()
        .failure()
        .stderr(contains("No attendance data to save"));
}

#[test]
fn input_rejects_unknown_status_code() {
    rca()
        .args(["attendance", "input", "--mark", "ST-001=X"])
        .assert()
        .failure()
        .stderr(contains("Invalid attendance status: X"));
}

#[test]
fn bulk_present_only_touches_the_filtered_batch() {
    rca()
        .args([
            "attendance",
            "input",
            "--date",
            "2023-10-25",
            "--batch",
            "2022",
            "--all-present",
        ])
        .assert()
        .success()
        .stdout(contains("Marked 2 student(s) present."))
        .stdout(contains("Preview only"));
}

#[test]
fn delete_a_whole_day() {
    rca()
        .args(["attendance", "delete", "--date", "2023-10-23", "--yes"])
        .assert()
        .success()
        .stdout(contains("4 attendance record(s) deleted."));
}

#[test]
fn delete_requires_a_target() {
    rca()
        .args(["attendance", "delete", "--yes"])
        .assert()
        .failure();
}

#[test]
fn delete_unknown_log_fails() {
    rca()
        .args(["attendance", "delete", "--id", "999", "--yes"])
        .assert()
        .failure()
        .stderr(contains("Attendance log not found: 999"));
}

#[test]
fn delete_can_be_cancelled() {
    rca()
        .args(["attendance", "delete", "--id", "7"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled."));
}

#[test]
fn stats_dashboard_and_tuition() {
    rca()
        .args(["stats"])
        .assert()
        .success()
        .stdout(contains("Average attendance: 86.5%"))
        .stdout(contains("2 student(s) need attention"))
        .stdout(contains("James Rodriguez"))
        .stdout(contains("Paid 4  |  Unpaid 2  |  Pending 2"))
        .stdout(contains("Rp 6.000.000"));
}

#[test]
fn stats_group_comparison() {
    rca()
        .args(["stats", "--group", "major"])
        .assert()
        .success()
        .stdout(contains("Attendance by major"))
        .stdout(contains("91.5%"));

    rca()
        .args(["stats", "--group", "dorm"])
        .assert()
        .failure()
        .stderr(contains("expected major or batch"));
}

#[test]
fn export_logs_to_csv() {
    let out = temp_out("logs_csv", "csv");

    rca()
        .args(["export", "--what", "logs", "--format", "csv", "--file", &out])
        .assert()
        .success()
        .stdout(contains("CSV export completed (13 rows)"));

    let mut reader = csv::Reader::from_path(&out).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.get(0), Some("id"));
    assert_eq!(reader.records().count(), 13);

    fs::remove_file(&out).ok();
}

#[test]
fn export_students_to_json() {
    let out = temp_out("students_json", "json");

    rca()
        .args(["export", "--what", "students", "--format", "json", "--file", &out])
        .assert()
        .success();

    let content = fs::read_to_string(&out).unwrap();
    let rows: serde_json::Value = serde_json::from_str(&content).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 8);
    let james = rows.iter().find(|r| r["id"] == "ST-006").unwrap();
    assert_eq!(james["pct"], 65);
    assert_eq!(james["standing"], "Critical");

    fs::remove_file(&out).ok();
}

#[test]
fn export_refuses_to_overwrite_without_consent() {
    let out = temp_out("overwrite", "csv");
    fs::write(&out, "keep me").unwrap();

    rca()
        .args(["export", "--what", "logs", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("Export cancelled"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");

    rca()
        .args(["export", "--what", "logs", "--file", &out, "--force"])
        .assert()
        .success();
    assert_ne!(fs::read_to_string(&out).unwrap(), "keep me");

    fs::remove_file(&out).ok();
}

#[test]
fn config_print_shows_defaults() {
    rca()
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("proof_policy: warn"));
}

#[test]
fn init_without_database() {
    rca()
        .args(["--test", "init"])
        .assert()
        .success()
        .stdout(contains("No database configured"));
}

#[test]
fn sqlite_init_seeds_once() {
    let db = setup_test_db("cli_init");

    rca()
        .args(["--db", &db, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Imported 8 students and 13 attendance logs"));

    rca()
        .args(["--db", &db, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database already populated"));

    fs::remove_file(&db).ok();
}

#[test]
fn sqlite_deletes_persist_between_runs() {
    let db = setup_test_db("cli_delete");
    init_db_with_data(&db);

    rca()
        .args(["--db", &db, "attendance", "delete", "--date", "2023-10-23", "--yes"])
        .assert()
        .success()
        .stdout(contains("4 attendance record(s) deleted."));

    rca()
        .args(["--db", &db, "attendance", "history", "--view", "all"])
        .assert()
        .success()
        .stdout(contains("Total 9  |  H 5  I 1  S 1  A 2"))
        .stdout(contains("James Rodriguez").not());

    rca()
        .args(["--db", &db, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("seed"))
        .stdout(contains("del"))
        .stdout(contains("2023-10-23"));

    fs::remove_file(&db).ok();
}

#[test]
fn sqlite_edit_overwrites_the_stored_day() {
    let db = setup_test_db("cli_edit");
    init_db_with_data(&db);

    rca()
        .args([
            "--db",
            &db,
            "attendance",
            "input",
            "--date",
            "2023-10-24",
            "--edit",
            "--mark",
            "ST-004=H",
            "--save",
        ])
        .assert()
        .success()
        .stdout(contains("Loaded 5 stored row(s) for 2023-10-24."))
        .stdout(contains("saved: 5 record(s) (H 4, I 0, S 1, A 0)"));

    rca()
        .args(["--db", &db, "attendance", "history", "--date", "2023-10-24"])
        .assert()
        .success()
        .stdout(contains("Rudi Ardiansyah"))
        .stdout(contains("Ahmad Kurniawan").not());

    fs::remove_file(&db).ok();
}

#[test]
fn sqlite_student_removal_persists() {
    let db = setup_test_db("cli_students");
    init_db_with_data(&db);

    rca()
        .args(["--db", &db, "students", "delete", "ST-004", "--yes"])
        .assert()
        .success()
        .stdout(contains("Student Ahmad Kurniawan (10293811) has been deleted."));

    rca()
        .args(["--db", &db, "students", "list"])
        .assert()
        .success()
        .stdout(contains("Ahmad Kurniawan").not())
        .stdout(contains("7 student(s)"));

    fs::remove_file(&db).ok();
}

#[test]
fn in_memory_student_removal_is_session_only() {
    rca()
        .args(["students", "delete", "ST-004", "--yes"])
        .assert()
        .success()
        .stdout(contains("removed from this session's roster"));

    rca()
        .args(["students", "list"])
        .assert()
        .success()
        .stdout(contains("Ahmad Kurniawan"));
}

#[test]
fn list_status_and_gender_filters_ignore_case() {
    rca()
        .args(["students", "list", "--status", "inactive"])
        .assert()
        .success()
        .stdout(contains("Kevin Hartono"))
        .stdout(contains("1 student(s)"));

    rca()
        .args(["students", "list", "--gender", "p", "--search", "siti"])
        .assert()
        .success()
        .stdout(contains("Siti Aminah"));
}

#[test]
fn add_student_lists_every_missing_field() {
    rca()
        .args(["students", "add", "--major", "Physics"])
        .assert()
        .failure()
        .stderr(contains(
            "Missing required fields: Full Name, Student ID (NIM), Email Address, Phone Number",
        ));

    rca()
        .args(["students", "add", "--name", "Nadia Larasati", "--nim", "202400001"])
        .assert()
        .failure()
        .stderr(contains("Missing required fields: Email Address, Phone Number"));
}

#[test]
fn add_student_rejects_a_taken_nim() {
    rca()
        .args([
            "students",
            "add",
            "--name",
            "Budi Kedua",
            "--nim",
            "10293844",
            "--email",
            "budi2@student.kampus.ac.id",
            "--phone",
            "+62 811",
        ])
        .assert()
        .failure()
        .stderr(contains("A student with NIM 10293844 already exists"));
}

#[test]
fn in_memory_add_is_session_only() {
    rca()
        .args([
            "students",
            "add",
            "--name",
            "Nadia Larasati",
            "--nim",
            "202400001",
            "--email",
            "nadia@student.kampus.ac.id",
            "--phone",
            "+62 811-0000-1111",
        ])
        .assert()
        .success()
        .stdout(contains("Student Nadia Larasati (202400001) has been added"))
        .stdout(contains("(this session only)"));
}

#[test]
fn sqlite_add_and_edit_persist() {
    let db = setup_test_db("cli_add_edit");
    init_db_with_data(&db);

    rca()
        .args([
            "--db",
            &db,
            "students",
            "add",
            "--name",
            "Nadia Larasati",
            "--nim",
            "202400001",
            "--email",
            "nadia@student.kampus.ac.id",
            "--phone",
            "+62 811-0000-1111",
            "--gender",
            "P",
            "--batch",
            "2024",
        ])
        .assert()
        .success()
        .stdout(contains("Student Nadia Larasati (202400001) has been added as ST-"));

    rca()
        .args(["--db", &db, "students", "list", "--batch", "2024"])
        .assert()
        .success()
        .stdout(contains("Nadia Larasati"))
        .stdout(contains("1 student(s)"));

    rca()
        .args([
            "--db", &db, "students", "edit", "ST-001", "--phone", "+62 800", "--tuition", "paid",
        ])
        .assert()
        .success()
        .stdout(contains("Profile of Budi Santoso (10293844) has been updated."));

    rca()
        .args(["--db", &db, "students", "show", "ST-001"])
        .assert()
        .success()
        .stdout(contains("+62 800"));

    fs::remove_file(&db).ok();
}

#[test]
fn edit_cannot_blank_required_fields() {
    rca()
        .args(["students", "edit", "ST-001", "--email", "", "--phone", " "])
        .assert()
        .failure()
        .stderr(contains("Missing required fields: Email Address, Phone Number"));

    rca()
        .args(["students", "edit", "ST-001", "--gender", "robot"])
        .assert()
        .failure()
        .stderr(contains("unknown gender: robot"));
}

#[test]
fn record_add_requires_a_title() {
    rca()
        .args(["students", "record", "add", "ST-002", "--date", "2023-11-01"])
        .assert()
        .failure()
        .stderr(contains("Missing required fields: Title"));
}

#[test]
fn sqlite_records_can_be_added_and_deleted() {
    let db = setup_test_db("cli_records");
    init_db_with_data(&db);

    rca()
        .args([
            "--db",
            &db,
            "students",
            "record",
            "add",
            "ST-002",
            "--title",
            "Hackathon Finalist",
            "--date",
            "2023-11-01",
            "--category",
            "achievement",
            "--result",
            "2nd Place",
        ])
        .assert()
        .success()
        .stdout(contains("added to Siti Aminah."));

    rca()
        .args(["--db", &db, "students", "show", "ST-002"])
        .assert()
        .success()
        .stdout(contains("Hackathon Finalist"))
        .stdout(contains("Admin"));

    rca()
        .args(["--db", &db, "students", "record", "delete", "ST-001", "REC-001-1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled."));

    rca()
        .args([
            "--db", &db, "students", "record", "delete", "ST-001", "REC-001-1", "--yes",
        ])
        .assert()
        .success()
        .stdout(contains("Record \"Algorithms Midterm\" of Budi Santoso has been deleted."));

    rca()
        .args(["--db", &db, "students", "show", "ST-001"])
        .assert()
        .success()
        .stdout(contains("National Coding Competition"))
        .stdout(contains("Algorithms Midterm").not());

    rca()
        .args([
            "--db", &db, "students", "record", "delete", "ST-001", "REC-404", "--yes",
        ])
        .assert()
        .failure()
        .stderr(contains("Record not found: REC-404"));

    fs::remove_file(&db).ok();
}
