use rcampus::core::filter::{self, Choice, Criteria, SortSpec};
use rcampus::errors::AppError;
use rcampus::models::{AttendanceLog, StudentProfile};

mod common;
use common::{roster, seed_logs};

fn names(rows: &[StudentProfile]) -> Vec<&str> {
    rows.iter().map(|s| s.name.as_str()).collect()
}

#[test]
fn search_is_case_insensitive_substring() {
    let students = roster();
    let criteria = Criteria::for_type::<StudentProfile>().with_search("sit");

    let rows = filter::apply(&students, &criteria, None);
    assert_eq!(names(&rows), vec!["Siti Aminah"]);

    let upper = Criteria::for_type::<StudentProfile>().with_search("SIT");
    assert_eq!(filter::apply(&students, &upper, None), rows);
}

#[test]
fn search_matches_nim_and_email() {
    let students = roster();

    let by_nim = Criteria::for_type::<StudentProfile>().with_search("2022005");
    assert_eq!(
        names(&filter::apply(&students, &by_nim, None)),
        vec!["James Rodriguez", "Kevin Hartono"]
    );

    let by_email = Criteria::for_type::<StudentProfile>().with_search("maya.putri@");
    assert_eq!(names(&filter::apply(&students, &by_email, None)), vec!["Maya Putri"]);
}

#[test]
fn category_filters_combine_with_search() {
    let students = roster();
    let criteria = Criteria::for_type::<StudentProfile>()
        .with_filter("major", Choice::parse("Computer Science"))
        .with_filter("batch", Choice::parse("2023"));

    assert_eq!(
        names(&filter::apply(&students, &criteria, None)),
        vec!["Budi Santoso", "Rudi Ardiansyah"]
    );

    let narrowed = criteria.with_search("rudi");
    assert_eq!(names(&filter::apply(&students, &narrowed, None)), vec!["Rudi Ardiansyah"]);
}

#[test]
fn all_sentinels_disable_a_filter() {
    assert_eq!(Choice::parse("All"), Choice::All);
    assert_eq!(Choice::parse("all majors"), Choice::All);
    assert_eq!(Choice::parse("All Batch"), Choice::All);
    assert_eq!(Choice::parse("  "), Choice::All);
    assert_eq!(Choice::from_option(None), Choice::All);
    assert_eq!(Choice::parse("2023"), Choice::Exactly("2023".to_string()));

    let students = roster();
    let criteria =
        Criteria::for_type::<StudentProfile>().with_filter("major", Choice::parse("All Majors"));
    assert_eq!(filter::apply(&students, &criteria, None).len(), students.len());
}

#[test]
fn filtering_does_not_touch_the_input() {
    let students = roster();
    let before = students.clone();

    let criteria = Criteria::for_type::<StudentProfile>().with_search("a");
    let spec = SortSpec::desc("gpa");
    let _ = filter::apply(&students, &criteria, Some(&spec));

    assert_eq!(students, before);
}

#[test]
fn sort_is_stable_in_both_directions() {
    let students = roster();
    let all = Criteria::for_type::<StudentProfile>();

    // Rudi (ST-003) and Dewi (ST-005) share a GPA of 3.10
    let desc = filter::apply(&students, &all, Some(&SortSpec::desc("gpa")));
    assert_eq!(
        names(&desc),
        vec![
            "Siti Aminah",
            "Budi Santoso",
            "Maya Putri",
            "Kevin Hartono",
            "Rudi Ardiansyah",
            "Dewi Wulandari",
            "James Rodriguez",
            "Ahmad Kurniawan",
        ]
    );

    let asc = filter::apply(&students, &all, Some(&SortSpec::asc("gpa")));
    let rudi = asc.iter().position(|s| s.id == "ST-003").unwrap();
    let dewi = asc.iter().position(|s| s.id == "ST-005").unwrap();
    assert_eq!(dewi, rudi + 1);
    assert_eq!(asc.first().unwrap().name, "Ahmad Kurniawan");
}

#[test]
fn text_sort_ignores_case() {
    let mut students = roster();
    students[0].name = "budi santoso".to_string();

    let rows = filter::apply(
        &students,
        &Criteria::for_type::<StudentProfile>(),
        Some(&SortSpec::asc("name")),
    );
    assert_eq!(rows[0].name, "Ahmad Kurniawan");
    assert_eq!(rows[1].name, "budi santoso");
}

#[test]
fn sort_spec_parsing() {
    let spec = SortSpec::parse::<StudentProfile>("pct:desc").unwrap();
    assert_eq!(spec, SortSpec::desc("pct"));
    assert_eq!(SortSpec::parse::<StudentProfile>("name").unwrap(), SortSpec::asc("name"));

    assert!(matches!(
        SortSpec::parse::<StudentProfile>("shoe_size"),
        Err(AppError::InvalidSort(_))
    ));
    assert!(matches!(
        SortSpec::parse::<StudentProfile>("name:sideways"),
        Err(AppError::InvalidSort(_))
    ));
}

#[test]
fn unknown_filter_fields_are_rejected() {
    let criteria = Criteria::for_type::<StudentProfile>().with_filter("shoe_size", Choice::All);
    assert!(matches!(
        criteria.validate::<StudentProfile>(),
        Err(AppError::InvalidFilter(_))
    ));
    assert!(Criteria::for_type::<StudentProfile>().validate::<StudentProfile>().is_ok());
}

#[test]
fn logs_filter_by_exact_date() {
    let logs = seed_logs();
    let criteria = Criteria::for_type::<AttendanceLog>()
        .with_filter("date", Choice::Exactly("2023-10-23".to_string()));

    let rows = filter::apply(&logs, &criteria, None);
    let ids: Vec<&str> = rows.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["6", "7", "8", "9"]);
}
