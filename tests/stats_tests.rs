use rcampus::config::AtRiskPolicy;
use rcampus::core::academic::{AcademicScope, academic_stats, credit_delta};
use rcampus::core::stats::{
    GroupBy, TrendDirection, at_risk, compare_groups, dashboard_summary, low_gpa_watch,
    percent_breakdown, trend_delta,
};
use rcampus::core::tuition::{ledger_totals, tuition_summary};
use rcampus::models::{AttendanceCounts, AttendanceStanding, StandingThresholds, TuitionStatus};
use rcampus::utils::format_idr;

mod common;
use common::{roster, student};

#[test]
fn trend_delta_rounds_to_one_decimal() {
    assert_eq!(trend_delta(3.2, Some(3.0)), 6.7);
    assert_eq!(trend_delta(2.45, Some(2.6)), -5.8);
    assert_eq!(trend_delta(3.0, Some(3.0)), 0.0);
}

#[test]
fn trend_delta_without_a_baseline_is_zero() {
    assert_eq!(trend_delta(3.5, None), 0.0);
    assert_eq!(trend_delta(3.5, Some(0.0)), 0.0);
    assert_eq!(trend_delta(3.5, Some(f64::NAN)), 0.0);
}

#[test]
fn attendance_pct_and_standing() {
    let students = roster();
    let thresholds = StandingThresholds::default();

    let expected = [
        ("ST-001", 94, AttendanceStanding::Excellent),
        ("ST-002", 91, AttendanceStanding::Excellent),
        ("ST-003", 84, AttendanceStanding::Good),
        ("ST-004", 75, AttendanceStanding::Warning),
        ("ST-005", 100, AttendanceStanding::Excellent),
        ("ST-006", 65, AttendanceStanding::Critical),
        ("ST-007", 83, AttendanceStanding::Good),
        // no recorded days
        ("ST-008", 100, AttendanceStanding::Excellent),
    ];
    for (id, pct, standing) in expected {
        let s = student(&students, id);
        assert_eq!(s.pct(), pct, "{id}");
        assert_eq!(s.standing(&thresholds), standing, "{id}");
    }
}

#[test]
fn standing_boundaries_are_inclusive() {
    let t = StandingThresholds::default();
    assert_eq!(t.classify(90), AttendanceStanding::Excellent);
    assert_eq!(t.classify(89), AttendanceStanding::Good);
    assert_eq!(t.classify(80), AttendanceStanding::Good);
    assert_eq!(t.classify(70), AttendanceStanding::Warning);
    assert_eq!(t.classify(69), AttendanceStanding::Critical);
    assert_eq!(t.classify(0), AttendanceStanding::Critical);
}

#[test]
fn counts_absence_ratio() {
    let c = AttendanceCounts::from_counters(26, 3, 2, 9);
    assert_eq!(c.total, 40);
    assert!((c.absence_ratio() - 0.225).abs() < 1e-9);
    assert_eq!(AttendanceCounts::default().absence_ratio(), 0.0);
}

#[test]
fn percent_breakdown_always_sums_to_100() {
    assert_eq!(percent_breakdown(&[4, 2, 1, 1]), vec![50, 25, 13, 12]);
    assert_eq!(percent_breakdown(&[1, 1, 1]), vec![34, 33, 33]);
    assert_eq!(percent_breakdown(&[0, 0, 0]), vec![0, 0, 0]);
    assert_eq!(percent_breakdown(&[0, 7]), vec![0, 100]);

    for parts in [[3u32, 3, 1, 0], [17, 5, 9, 2], [1, 2, 3, 4]] {
        assert_eq!(percent_breakdown(&parts).iter().sum::<u32>(), 100);
    }
}

#[test]
fn dashboard_over_the_seed_roster() {
    let summary = dashboard_summary(&roster(), &StandingThresholds::default());

    assert_eq!(summary.students, 8);
    assert_eq!(summary.active, 7);
    assert_eq!(summary.average_pct, 86.5);
    assert_eq!(summary.perfect_attendance, 1);
    assert_eq!(summary.warnings, 2);

    let t = summary.totals;
    assert_eq!((t.h, t.i, t.s, t.a, t.total), (273, 15, 12, 21, 321));

    let counts: Vec<u32> = summary.standings.iter().map(|s| s.count).collect();
    let percents: Vec<u32> = summary.standings.iter().map(|s| s.percent).collect();
    assert_eq!(counts, vec![4, 2, 1, 1]);
    assert_eq!(percents, vec![50, 25, 13, 12]);
}

#[test]
fn dashboard_of_an_empty_roster() {
    let summary = dashboard_summary(&[], &StandingThresholds::default());
    assert_eq!(summary.students, 0);
    assert_eq!(summary.average_pct, 0.0);
    assert!(summary.standings.iter().all(|s| s.percent == 0));
}

#[test]
fn at_risk_lists_most_alpha_first() {
    let flagged = at_risk(&roster(), &AtRiskPolicy::default());
    let names: Vec<(&str, u32)> = flagged.iter().map(|s| (s.name.as_str(), s.alpha)).collect();
    assert_eq!(
        names,
        vec![
            ("James Rodriguez", 9),
            ("Ahmad Kurniawan", 6),
            ("Maya Putri", 4)
        ]
    );
}

#[test]
fn at_risk_ratio_only_policy() {
    let policy = AtRiskPolicy {
        min_alpha: 0,
        max_absence_ratio: 0.2,
    };
    let flagged = at_risk(&roster(), &policy);
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].id, "ST-006");
    assert_eq!(flagged[0].pct, 65);
}

#[test]
fn groups_are_ranked_by_average_attendance() {
    let students = roster();

    let majors: Vec<(String, f64)> = compare_groups(&students, GroupBy::Major)
        .into_iter()
        .map(|g| (g.label, g.average_pct))
        .collect();
    assert_eq!(
        majors,
        vec![
            ("Accounting".to_string(), 91.5),
            ("Information Systems".to_string(), 88.7),
            ("Computer Science".to_string(), 81.0),
        ]
    );

    let batches = compare_groups(&students, GroupBy::Batch);
    assert_eq!(batches[0].label, "2023");
    assert_eq!(batches[0].count, 5);
    assert_eq!(batches[0].average_pct, 88.8);
    assert_eq!(batches[1].label, "2021");
    assert_eq!(batches[2].label, "2022");
    assert_eq!(batches[2].average_pct, 82.5);
}

#[test]
fn low_gpa_watch_with_trend() {
    let watch = low_gpa_watch(&roster(), 3.0);
    assert_eq!(watch.len(), 2);

    assert_eq!(watch[0].name, "Ahmad Kurniawan");
    assert_eq!(watch[0].previous_gpa, Some(2.6));
    assert_eq!(watch[0].trend.delta, -5.8);
    assert_eq!(watch[0].trend.direction, TrendDirection::Down);

    assert_eq!(watch[1].name, "James Rodriguez");
    assert_eq!(watch[1].previous_gpa, Some(3.0));
    assert_eq!(watch[1].trend.delta, -6.7);
    assert_eq!(watch[1].trend.magnitude(), 6.7);
}

#[test]
fn academic_overview_cards() {
    let students = roster();

    let budi = academic_stats(student(&students, "ST-001"), &AcademicScope::Overview);
    assert_eq!(budi.len(), 4);
    assert_eq!(budi[0].value, "3.85");
    assert_eq!(budi[0].trend.unwrap().delta, 2.7);
    assert_eq!(budi[1].value, "42");
    assert_eq!(budi[2].value, "2");
    assert_eq!(budi[3].value, "100");

    let dewi = academic_stats(student(&students, "ST-005"), &AcademicScope::Overview);
    assert_eq!(dewi[0].trend.unwrap().delta, 3.3);

    // no closed semesters to compare against
    let kevin = academic_stats(student(&students, "ST-008"), &AcademicScope::Overview);
    let trend = kevin[0].trend.unwrap();
    assert_eq!(trend.delta, 0.0);
    assert_eq!(trend.direction, TrendDirection::Up);
}

#[test]
fn academic_semester_cards() {
    let students = roster();
    let dewi = student(&students, "ST-005");

    let second = academic_stats(dewi, &AcademicScope::parse("dw-s2"));
    assert_eq!(second[0].label, "Semester GPA (IPS)");
    assert_eq!(second[0].value, "3.20");
    let trend = second[0].trend.unwrap();
    assert_eq!(trend.delta, 6.7);
    assert_eq!(trend.direction, TrendDirection::Up);
    assert_eq!(second[1].value, "22");
    assert_eq!(second[2].value, "-");

    let first = academic_stats(dewi, &AcademicScope::parse("dw-s1"));
    assert!(first[0].trend.is_none());
    assert_eq!(first[0].subtext.as_deref(), Some("First Semester"));

    assert!(academic_stats(dewi, &AcademicScope::parse("zz-s9")).is_empty());
    assert_eq!(AcademicScope::parse(" Overview "), AcademicScope::Overview);
}

#[test]
fn credit_delta_between_semesters() {
    let students = roster();
    assert_eq!(credit_delta(student(&students, "ST-001"), "bs-s2"), Some(2));
    assert_eq!(credit_delta(student(&students, "ST-001"), "bs-s1"), None);
    assert_eq!(credit_delta(student(&students, "ST-006"), "jr-s3"), Some(-2));
    assert_eq!(credit_delta(student(&students, "ST-006"), "nope"), None);
}

#[test]
fn tuition_summary_puts_unpaid_first() {
    let summary = tuition_summary(&roster());
    assert_eq!((summary.paid, summary.unpaid, summary.pending), (4, 2, 2));

    let rows: Vec<(&str, TuitionStatus, u64)> = summary
        .outstanding
        .iter()
        .map(|o| (o.name.as_str(), o.status, o.amount))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Ahmad Kurniawan", TuitionStatus::Unpaid, 5_500_000),
            ("James Rodriguez", TuitionStatus::Unpaid, 6_000_000),
            ("Rudi Ardiansyah", TuitionStatus::Pending, 5_500_000),
            ("Kevin Hartono", TuitionStatus::Pending, 0),
        ]
    );
}

#[test]
fn ledger_totals_split_paid_and_outstanding() {
    let students = roster();

    let budi = ledger_totals(&student(&students, "ST-001").payments);
    assert_eq!((budi.paid, budi.outstanding), (11_000_000, 0));

    let ahmad = ledger_totals(&student(&students, "ST-004").payments);
    assert_eq!((ahmad.paid, ahmad.outstanding), (5_500_000, 5_500_000));

    // overdue counts as outstanding
    let james = ledger_totals(&student(&students, "ST-006").payments);
    assert_eq!((james.paid, james.outstanding), (0, 6_000_000));
}

#[test]
fn rupiah_formatting() {
    assert_eq!(format_idr(5_500_000), "Rp 5.500.000");
    assert_eq!(format_idr(999), "Rp 999");
    assert_eq!(format_idr(0), "Rp 0");
    assert_eq!(format_idr(1_000), "Rp 1.000");
}

#[test]
fn oversized_counters_saturate() {
    let c = AttendanceCounts::from_counters(u32::MAX, 1, 0, 0);
    assert_eq!(c.total, u32::MAX);
    assert_eq!(c.pct(), 100);

    let mut students = roster();
    students[0].h = u32::MAX;
    students[1].h = u32::MAX;
    let summary = dashboard_summary(&students, &StandingThresholds::default());
    assert_eq!(summary.totals.h, u32::MAX);
    assert_eq!(summary.totals.total, u32::MAX);
}
