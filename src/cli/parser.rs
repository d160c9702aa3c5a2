use crate::export::{ExportFormat, ExportTarget};
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for rCampus
#[derive(Parser)]
#[command(
    name = "rcampus",
    version = env!("CARGO_PKG_VERSION"),
    about = "University admin dashboard core: student roster, daily attendance and statistics",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and, with --db, the database
    Init,

    /// View or check the configuration file
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,
    },

    /// Print the internal operation log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Browse and manage the student roster
    Students {
        #[command(subcommand)]
        action: StudentsAction,
    },

    /// Daily attendance input and history
    Attendance {
        #[command(subcommand)]
        action: AttendanceAction,
    },

    /// Roster-wide statistics
    Stats {
        #[arg(long, value_name = "major|batch", help = "Compare attendance per major or batch")]
        group: Option<String>,
    },

    /// Export the roster or the attendance history
    Export {
        #[arg(long, value_enum)]
        what: ExportTarget,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum StudentsAction {
    /// List students, optionally filtered and sorted
    List {
        #[arg(long, help = "Case-insensitive search on name, NIM and email")]
        search: Option<String>,

        #[arg(long)]
        major: Option<String>,

        #[arg(long)]
        batch: Option<String>,

        #[arg(long, help = "Male or Female (L/P also accepted, any case)")]
        gender: Option<String>,

        #[arg(long, help = "Enrollment status: Active, Inactive or Graduated (any case)")]
        status: Option<String>,

        #[arg(
            long,
            value_name = "KEY[:asc|desc]",
            help = "Sort by name, nim, gpa, batch, pct or total_credits"
        )]
        sort: Option<String>,
    },

    /// Show one student's profile, attendance and academic summary
    Show {
        id: String,

        #[arg(
            long,
            default_value = "overview",
            help = "overview, or a semester id from the academic history"
        )]
        scope: String,
    },

    /// Register a new student
    Add {
        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Change fields of an existing profile; omitted fields stay as they are
    Edit {
        id: String,

        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Remove a student from the roster
    Delete {
        id: String,

        #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },

    /// Add or delete entries on a student's record file
    Record {
        #[command(subcommand)]
        action: RecordAction,
    },
}

/// Profile fields shared by `students add` and `students edit`.
#[derive(Args, Debug, Default)]
pub struct ProfileArgs {
    #[arg(long, help = "Full name")]
    pub name: Option<String>,

    #[arg(long, help = "Student ID (NIM)")]
    pub nim: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long, help = "Male or Female (L/P also accepted)")]
    pub gender: Option<String>,

    #[arg(long)]
    pub major: Option<String>,

    #[arg(long, help = "Intake year; new students default to the current year")]
    pub batch: Option<String>,

    #[arg(long, help = "Active, Inactive or Graduated")]
    pub status: Option<String>,

    #[arg(long)]
    pub gpa: Option<f64>,

    #[arg(long = "credits", help = "Credits (SKS) earned so far")]
    pub total_credits: Option<u32>,

    #[arg(long = "tuition", help = "Paid, Unpaid or Pending")]
    pub tuition_status: Option<String>,
}

#[derive(Subcommand)]
pub enum RecordAction {
    /// Prepend a record to the student's file
    Add {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long, value_name = "YYYY-MM-DD", help = "Defaults to today")]
        date: Option<String>,

        #[arg(long, help = "Academic, Achievement, Activity or Discipline")]
        category: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long = "result", help = "Grade or result, e.g. A or 1st Place")]
        grade_or_result: Option<String>,

        #[arg(long = "verified-by", help = "Defaults to Admin")]
        verified_by: Option<String>,
    },

    /// Delete one record from the student's file
    Delete {
        id: String,

        record_id: String,

        #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum AttendanceAction {
    /// Fill in (or, with --edit, correct) the sheet for one date
    Input {
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<String>,

        #[arg(long, help = "Case-insensitive search on name and NIM")]
        search: Option<String>,

        #[arg(long)]
        batch: Option<String>,

        #[arg(long)]
        major: Option<String>,

        #[arg(long = "mark", value_name = "ID=STATUS", help = "Set a status (H, I, S, A)")]
        marks: Vec<String>,

        #[arg(long = "note", value_name = "ID=TEXT")]
        notes: Vec<String>,

        #[arg(long = "proof", value_name = "ID=PATH", help = "Attach a proof document")]
        proofs: Vec<String>,

        #[arg(long = "all-present", help = "Mark every visible, unset row as present")]
        all_present: bool,

        #[arg(long, help = "Load the stored day for correction; saving overwrites it")]
        edit: bool,

        #[arg(long, help = "Save the sheet")]
        save: bool,
    },

    /// Browse stored attendance
    History {
        #[arg(long, default_value = "issues", value_name = "issues|all")]
        view: String,

        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        batch: Option<String>,

        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<String>,
    },

    /// Delete one log or a whole day
    #[command(group(
        clap::ArgGroup::new("target")
            .required(true)
            .args(["id", "date"])
    ))]
    Delete {
        #[arg(long)]
        id: Option<String>,

        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<String>,

        #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },
}
