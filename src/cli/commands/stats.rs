use crate::cli::commands::open_state;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::stats::{GroupBy, at_risk, compare_groups, dashboard_summary, low_gpa_watch};
use crate::core::tuition::tuition_summary;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{header, info, item, success, warning};
use crate::utils::colors::{color_for_standing, color_for_trend, color_for_tuition, paint};
use crate::utils::formatting::{format_gpa, format_idr, format_trend};
use crate::utils::table::Table;

fn parse_group(raw: &str) -> AppResult<GroupBy> {
    match raw.trim().to_lowercase().as_str() {
        "major" => Ok(GroupBy::Major),
        "batch" => Ok(GroupBy::Batch),
        other => Err(AppError::InvalidArgument(format!(
            "group '{other}' (expected major or batch)"
        ))),
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats { group } = cmd {
        let group = group.as_deref().map(parse_group).transpose()?;
        let state = open_state(cfg)?;
        let students = state.students();

        // Dashboard
        let summary = dashboard_summary(students, &cfg.standing);
        header("Dashboard");
        println!(
            "Students: {} ({} active)   Average attendance: {:.1}%   Perfect attendance: {}",
            summary.students, summary.active, summary.average_pct, summary.perfect_attendance
        );
        println!(
            "Recorded days: {}  |  H {}  I {}  S {}  A {}",
            summary.totals.total, summary.totals.h, summary.totals.i, summary.totals.s,
            summary.totals.a
        );
        for share in &summary.standings {
            item(format!(
                "{} {:>3} student(s)  {:>3}%",
                paint(
                    &format!("{:<10}", share.standing.as_str()),
                    color_for_standing(share.standing)
                ),
                share.count,
                share.percent
            ));
        }
        if summary.warnings > 0 {
            warning(format!("{} student(s) need attention", summary.warnings));
        }

        // At risk
        let flagged = at_risk(students, &cfg.at_risk);
        println!();
        header("At-risk students");
        if flagged.is_empty() {
            success("No student over the absence thresholds.");
        } else {
            let mut table = Table::new(vec!["ID", "Name", "NIM", "Alpha", "Absence", "Attendance"]);
            for s in &flagged {
                table.add_row(vec![
                    s.id.clone(),
                    s.name.clone(),
                    s.nim.clone(),
                    s.alpha.to_string(),
                    format!("{:.0}%", s.absence_ratio * 100.0),
                    format!("{}%", s.pct),
                ]);
            }
            print!("{}", table.render());
        }

        // Group comparison
        if let Some(by) = group {
            let label = match by {
                GroupBy::Major => "major",
                GroupBy::Batch => "batch",
            };
            println!();
            header(format!("Attendance by {label}"));
            let mut table = Table::new(vec!["Group", "Students", "Average"]);
            for g in compare_groups(students, by) {
                table.add_row(vec![
                    g.label,
                    g.count.to_string(),
                    format!("{:.1}%", g.average_pct),
                ]);
            }
            print!("{}", table.render());
        }

        // Low GPA
        let low = low_gpa_watch(students, cfg.low_gpa_threshold);
        println!();
        header(format!("GPA below {}", format_gpa(cfg.low_gpa_threshold)));
        if low.is_empty() {
            success("No student below the threshold.");
        } else {
            let mut table = Table::new(vec!["ID", "Name", "Major", "GPA", "Previous", "Trend"]);
            for s in &low {
                table.add_row(vec![
                    s.id.clone(),
                    s.name.clone(),
                    s.major.clone(),
                    format_gpa(s.gpa),
                    s.previous_gpa.map(format_gpa).unwrap_or_else(|| "-".to_string()),
                    paint(&format_trend(&s.trend), color_for_trend(&s.trend)),
                ]);
            }
            print!("{}", table.render());
        }

        // Tuition
        let tuition = tuition_summary(students);
        println!();
        header("Tuition");
        info(format!(
            "Paid {}  |  Unpaid {}  |  Pending {}",
            tuition.paid, tuition.unpaid, tuition.pending
        ));
        if !tuition.outstanding.is_empty() {
            let mut table = Table::new(vec!["ID", "Name", "NIM", "Status", "Due", "Outstanding"]);
            for o in &tuition.outstanding {
                table.add_row(vec![
                    o.id.clone(),
                    o.name.clone(),
                    o.nim.clone(),
                    paint(o.status.as_str(), color_for_tuition(o.status)),
                    o.due.clone(),
                    format_idr(o.amount),
                ]);
            }
            print!("{}", table.render());
        }
    }
    Ok(())
}
