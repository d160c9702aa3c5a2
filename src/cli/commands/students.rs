use crate::cli::commands::{open_state, persist_roster};
use crate::cli::parser::{Commands, ProfileArgs, RecordAction, StudentsAction};
use crate::config::Config;
use crate::core::academic::{AcademicScope, academic_stats, credit_delta};
use crate::core::filter::{self, Choice, Criteria, SortSpec};
use crate::core::roster::new_student_id;
use crate::core::tuition::ledger_totals;
use crate::errors::{AppError, AppResult};
use crate::models::{
    EnrollmentStatus, Gender, RecordCategory, RecordDraft, StudentProfile, TuitionStatus,
};
use crate::ui::messages::{header, info, success, warning};
use crate::ui::prompt::ask_confirmation;
use crate::utils::colors::{
    color_for_payment, color_for_standing, color_for_trend, color_for_tuition, paint,
};
use crate::utils::formatting::{
    bold, format_credits, format_gpa, format_idr, format_percent, format_trend,
};
use crate::utils::date::{parse_date, today};
use crate::utils::table::Table;
use chrono::Datelike;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Students { action } = cmd {
        match action {
            StudentsAction::List {
                search,
                major,
                batch,
                gender,
                status,
                sort,
            } => {
                // enum-backed filters match their canonical spelling
                let gender = gender
                    .as_deref()
                    .map(|g| Gender::from_str_ci(g).map(|g| g.as_str()).unwrap_or(g));
                let status = status
                    .as_deref()
                    .map(|s| EnrollmentStatus::from_str_ci(s).map(|s| s.as_str()).unwrap_or(s));

                let criteria = Criteria::for_type::<StudentProfile>()
                    .with_search(search.as_deref().unwrap_or(""))
                    .with_filter("major", Choice::from_option(major.as_deref()))
                    .with_filter("batch", Choice::from_option(batch.as_deref()))
                    .with_filter("gender", Choice::from_option(gender))
                    .with_filter("status", Choice::from_option(status));
                let spec = SortSpec::parse::<StudentProfile>(
                    sort.as_deref().unwrap_or(&cfg.default_sort),
                )?;

                let state = open_state(cfg)?;
                let rows = filter::apply(state.students(), &criteria, Some(&spec));
                print_list(&rows, cfg);
            }
            StudentsAction::Show { id, scope } => {
                let mut state = open_state(cfg)?;
                let student = state.select(id)?.clone();
                print_profile(&student, &AcademicScope::parse(scope), cfg);
            }
            StudentsAction::Add { profile } => {
                let mut state = open_state(cfg)?;
                let mut draft =
                    StudentProfile::draft(new_student_id(), today().year().to_string());
                apply_profile_args(profile, &mut draft)?;

                let (id, name, nim) = (draft.id.clone(), draft.name.clone(), draft.nim.clone());
                state.add_student(draft)?;
                report_roster_change(
                    cfg,
                    state.students(),
                    format!("Student {name} ({nim}) has been added as {id}."),
                )?;
            }
            StudentsAction::Edit { id, profile } => {
                let mut state = open_state(cfg)?;
                let mut updated = state.select(id)?.clone();
                apply_profile_args(profile, &mut updated)?;

                let (name, nim) = (updated.name.clone(), updated.nim.clone());
                state.update_student(id, updated)?;
                report_roster_change(
                    cfg,
                    state.students(),
                    format!("Profile of {name} ({nim}) has been updated."),
                )?;
            }
            StudentsAction::Record { action } => handle_record(action, cfg)?,
            StudentsAction::Delete { id, yes } => {
                let mut state = open_state(cfg)?;
                let name = state.select(id)?.name.clone();

                if !*yes
                    && !ask_confirmation(&format!(
                        "Delete student {} ({})? This action is irreversible.",
                        name, id
                    ))
                {
                    info("Operation cancelled.");
                    return Ok(());
                }

                let removed = state.remove_student(id)?;
                if persist_roster(cfg, state.students())? {
                    success(format!("Student {} ({}) has been deleted.", removed.name, removed.nim));
                } else {
                    success(format!(
                        "Student {} ({}) removed from this session's roster.",
                        removed.name, removed.nim
                    ));
                }
            }
        }
    }
    Ok(())
}

fn handle_record(action: &RecordAction, cfg: &Config) -> AppResult<()> {
    match action {
        RecordAction::Add {
            id,
            title,
            date,
            category,
            description,
            grade_or_result,
            verified_by,
        } => {
            let category = category
                .as_deref()
                .map(|c| {
                    RecordCategory::from_str_ci(c)
                        .ok_or_else(|| AppError::InvalidArgument(format!("unknown category: {c}")))
                })
                .transpose()?;
            // a blank date is left to the record validation
            let date = match date.as_deref() {
                Some(d) if d.trim().is_empty() => String::new(),
                Some(d) => parse_date(d)?.to_string(),
                None => today().to_string(),
            };
            let draft = RecordDraft {
                date,
                title: title.clone().unwrap_or_default(),
                category,
                description: description.clone().unwrap_or_default(),
                grade_or_result: grade_or_result.clone().unwrap_or_default(),
                verified_by: verified_by.clone().unwrap_or_default(),
            };

            let mut state = open_state(cfg)?;
            let name = state.select(id)?.name.clone();
            let record_id = state.add_record(id, draft)?;
            report_roster_change(
                cfg,
                state.students(),
                format!("Record {record_id} added to {name}."),
            )?;
        }
        RecordAction::Delete { id, record_id, yes } => {
            let mut state = open_state(cfg)?;
            let student = state.select(id)?;
            let name = student.name.clone();
            let title = student
                .records
                .iter()
                .find(|r| r.id == *record_id)
                .map(|r| r.title.clone())
                .ok_or_else(|| AppError::RecordNotFound(record_id.clone()))?;

            if !*yes
                && !ask_confirmation(&format!(
                    "Delete record \"{title}\" of {name}? This action is irreversible."
                ))
            {
                info("Operation cancelled.");
                return Ok(());
            }

            let removed = state.delete_record(id, record_id)?;
            report_roster_change(
                cfg,
                state.students(),
                format!("Record \"{}\" of {name} has been deleted.", removed.title),
            )?;
        }
    }
    Ok(())
}

/// Copies every given field onto `profile`. The name also refreshes the
/// initials.
fn apply_profile_args(args: &ProfileArgs, profile: &mut StudentProfile) -> AppResult<()> {
    if let Some(name) = &args.name {
        profile.set_name(name.trim());
    }
    if let Some(nim) = &args.nim {
        profile.nim = nim.trim().to_string();
    }
    if let Some(email) = &args.email {
        profile.email = email.trim().to_string();
    }
    if let Some(phone) = &args.phone {
        profile.phone = phone.trim().to_string();
    }
    if let Some(g) = &args.gender {
        profile.gender = Gender::from_str_ci(g)
            .ok_or_else(|| AppError::InvalidArgument(format!("unknown gender: {g}")))?;
    }
    if let Some(major) = &args.major {
        profile.major = major.trim().to_string();
    }
    if let Some(batch) = &args.batch {
        profile.batch = batch.trim().to_string();
    }
    if let Some(s) = &args.status {
        profile.status = EnrollmentStatus::from_str_ci(s)
            .ok_or_else(|| AppError::InvalidArgument(format!("unknown enrollment status: {s}")))?;
    }
    if let Some(gpa) = args.gpa {
        if !(0.0..=4.0).contains(&gpa) {
            return Err(AppError::InvalidArgument(format!(
                "GPA must be between 0.00 and 4.00: {gpa}"
            )));
        }
        profile.gpa = gpa;
    }
    if let Some(credits) = args.total_credits {
        profile.total_credits = credits;
    }
    if let Some(t) = &args.tuition_status {
        profile.tuition_status = TuitionStatus::from_str_ci(t)
            .ok_or_else(|| AppError::InvalidArgument(format!("unknown tuition status: {t}")))?;
    }
    Ok(())
}

fn report_roster_change(cfg: &Config, students: &[StudentProfile], message: String) -> AppResult<()> {
    if persist_roster(cfg, students)? {
        success(message);
    } else {
        success(format!("{message} (this session only)"));
    }
    Ok(())
}

fn print_list(rows: &[StudentProfile], cfg: &Config) {
    if rows.is_empty() {
        warning("No students match the current filters.");
        return;
    }

    let mut table = Table::new(vec![
        "ID", "Name", "NIM", "Major", "Batch", "GPA", "Attendance", "Standing", "Tuition",
    ]);
    for s in rows {
        let standing = s.standing(&cfg.standing);
        table.add_row(vec![
            s.id.clone(),
            s.name.clone(),
            s.nim.clone(),
            s.major.clone(),
            s.batch.clone(),
            format_gpa(s.gpa),
            format_percent(s.pct()),
            paint(standing.as_str(), color_for_standing(standing)),
            paint(s.tuition_status.as_str(), color_for_tuition(s.tuition_status)),
        ]);
    }
    print!("{}", table.render());
    info(format!("{} student(s)", rows.len()));
}

fn print_profile(s: &StudentProfile, scope: &AcademicScope, cfg: &Config) {
    header(format!("{} [{}]", s.name, s.initials));
    println!("NIM      : {}", s.nim);
    println!("Email    : {}", s.email);
    println!("Phone    : {}", s.phone);
    println!("Program  : {} / batch {}", s.major, s.batch);
    println!("Status   : {} ({})", s.status.as_str(), s.gender.as_str());
    println!(
        "Credits  : {}",
        format_credits(s.total_credits, s.target_credits, s.credit_progress())
    );

    let counts = s.attendance();
    let standing = s.standing(&cfg.standing);
    println!(
        "Attendance: {} {}  (H {} / I {} / S {} / A {})",
        format_percent(counts.pct()),
        paint(standing.as_str(), color_for_standing(standing)),
        counts.h,
        counts.i,
        counts.s,
        counts.a
    );

    println!();
    let label = match scope {
        AcademicScope::Overview => "Academic overview".to_string(),
        AcademicScope::Semester(id) => format!("Semester {id}"),
    };
    println!("{}", bold(&label));

    let stats = academic_stats(s, scope);
    if stats.is_empty() {
        warning("Unknown semester for this student.");
    }
    for stat in &stats {
        let trend = stat
            .trend
            .as_ref()
            .map(|t| format!("  {}", paint(&format_trend(t), color_for_trend(t))))
            .unwrap_or_default();
        let sub = stat
            .subtext
            .as_ref()
            .map(|t| format!("  ({t})"))
            .unwrap_or_default();
        println!("  {:<22} {}{}{}", stat.label, stat.value, trend, sub);
    }
    if let AcademicScope::Semester(id) = scope
        && let Some(delta) = credit_delta(s, id)
    {
        println!("  {:<22} {:+}", "Credits vs previous", delta);
    }

    if !s.academic_history.is_empty() {
        println!();
        let mut table = Table::new(vec!["Semester", "Name", "IPS", "SKS", "IPK"]);
        for h in &s.academic_history {
            table.add_row(vec![
                h.id.clone(),
                h.semester_name.clone(),
                format_gpa(h.gpa),
                h.credits.to_string(),
                format_gpa(h.cumulative_gpa),
            ]);
        }
        print!("{}", table.render());
    }

    println!();
    println!(
        "{} {}",
        bold("Tuition:"),
        paint(s.tuition_status.as_str(), color_for_tuition(s.tuition_status))
    );
    if !s.payments.is_empty() {
        let mut table = Table::new(vec!["Year", "Semester", "Due", "Amount", "Status"]);
        for p in &s.payments {
            table.add_row(vec![
                p.academic_year.clone(),
                p.semester.clone(),
                p.due_date.clone(),
                format_idr(p.amount),
                paint(p.status.as_str(), color_for_payment(p.status)),
            ]);
        }
        print!("{}", table.render());
        let totals = ledger_totals(&s.payments);
        println!(
            "Paid: {}   Outstanding: {}",
            format_idr(totals.paid),
            format_idr(totals.outstanding)
        );
    }

    if !s.records.is_empty() {
        println!();
        println!("{}", bold("Records:"));
        let mut table = Table::new(vec!["Date", "Category", "Title", "Result", "Verified by"]);
        for r in &s.records {
            table.add_row(vec![
                r.date.clone(),
                r.category.as_str().to_string(),
                r.title.clone(),
                r.grade_or_result.clone(),
                r.verified_by.clone(),
            ]);
        }
        print!("{}", table.render());
    }
}
