use crate::export::{ExportFormat, ExportKind};
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for rAcademic
/// CLI application to manage a school's academic records with SQLite
#[derive(Parser)]
#[command(
    name = "racademic",
    version = env!("CARGO_PKG_VERSION"),
    about = "A school management CLI: students, teachers, classes, grades, attendance and announcements on SQLite",
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
    /// Initialize the database and configuration
    Init {
        #[arg(long = "seed", help = "Also load the demo dataset")]
        seed: bool,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Run configuration file migrations if needed")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Compact the database file")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database file size and row counts")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print log entries")]
        print: bool,
    },

    /// Backup the database file
    Backup {
        #[arg(long = "file", help = "Destination file of the backup")]
        file: String,

        #[arg(long = "compress", help = "Zip the backup and remove the plain copy")]
        compress: bool,

        #[arg(short = 'f', long = "force", help = "Overwrite without asking")]
        force: bool,
    },

    /// Check that the database answers
    Health,

    /// School-wide totals, visible announcements and the viewer's own data
    Dashboard {
        #[arg(long = "user", help = "Viewing user id")]
        user: Option<i64>,

        #[arg(long = "json", help = "Print the payload as JSON")]
        json: bool,
    },

    /// Paginated listings, newest first
    List {
        #[command(subcommand)]
        target: ListTarget,
    },

    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage student profiles
    Student {
        #[command(subcommand)]
        action: StudentAction,
    },

    /// Manage teacher profiles
    Teacher {
        #[command(subcommand)]
        action: TeacherAction,
    },

    /// Manage classes
    Class {
        #[command(subcommand)]
        action: ClassAction,
    },

    /// Manage subjects
    Subject {
        #[command(subcommand)]
        action: SubjectAction,
    },

    /// Record and remove grades
    Grade {
        #[command(subcommand)]
        action: GradeAction,
    },

    /// Mark attendance and read attendance figures
    Attendance {
        #[command(subcommand)]
        action: AttendanceAction,
    },

    /// Manage announcements
    Announce {
        #[command(subcommand)]
        action: AnnounceAction,
    },

    /// Export a full listing to CSV, JSON or XLSX
    Export {
        #[arg(value_enum, help = "What to export")]
        kind: ExportKind,

        #[arg(long = "format", value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long = "file", help = "Absolute path of the output file")]
        file: String,

        #[arg(short = 'f', long = "force", help = "Overwrite without asking")]
        force: bool,
    },
}

/// Shared paging flags of every `list` target.
#[derive(Args, Clone, Copy, Debug)]
pub struct PageArgs {
    #[arg(long = "page", default_value_t = 1, help = "Page number, starting at 1")]
    pub page: u32,

    #[arg(long = "per-page", help = "Rows per page (default from config)")]
    pub per_page: Option<u32>,

    #[arg(long = "json", help = "Print the page as JSON")]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum ListTarget {
    /// Students with their user and class
    Students {
        #[arg(long = "class", help = "Only students of this class id")]
        class: Option<i64>,

        #[command(flatten)]
        paging: PageArgs,
    },

    /// Teachers with their user
    Teachers {
        #[command(flatten)]
        paging: PageArgs,
    },

    /// Classes with class teacher and student count
    Classes {
        #[command(flatten)]
        paging: PageArgs,
    },

    /// Subjects
    Subjects {
        #[command(flatten)]
        paging: PageArgs,
    },

    /// Grades with student, subject and teacher
    Grades {
        #[arg(long = "student", help = "Only grades of this student id")]
        student: Option<i64>,

        #[command(flatten)]
        paging: PageArgs,
    },

    /// Attendance rows with student, class and marker
    Attendance {
        #[arg(long = "date", help = "Only this day (YYYY-MM-DD or 'today')")]
        date: Option<String>,

        #[arg(long = "class", help = "Only rows of this class id")]
        class: Option<i64>,

        #[command(flatten)]
        paging: PageArgs,
    },

    /// Announcements with their author
    Announcements {
        #[command(flatten)]
        paging: PageArgs,
    },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Create a user account
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, help = "school_admin (or admin), teacher, student, parent")]
        role: String,
        #[arg(long, help = "active or inactive")]
        status: Option<String>,
        #[arg(long = "dob", help = "Date of birth (YYYY-MM-DD)")]
        date_of_birth: Option<String>,
    },

    /// Change some fields of a user
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },

    /// Delete a user and every profile attached to it
    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum StudentAction {
    /// Attach a student profile to a user with the student role
    Add {
        #[arg(long = "user", help = "User id of the student")]
        user_id: i64,
        #[arg(long = "code", help = "Unique student code, e.g. STU-2024-002")]
        student_code: String,
        #[arg(long = "class")]
        class_id: Option<i64>,
        #[arg(long = "roll")]
        roll_number: Option<String>,
        #[arg(long = "admission", help = "Admission date (default today)")]
        admission_date: Option<String>,
        #[arg(long = "guardian")]
        guardian_name: Option<String>,
        #[arg(long = "guardian-phone")]
        guardian_phone: Option<String>,
        #[arg(long = "guardian-email")]
        guardian_email: Option<String>,
        #[arg(long = "emergency")]
        emergency_contact: Option<String>,
        #[arg(long = "medical")]
        medical_info: Option<String>,
        #[arg(long = "fee", default_value_t = 0.0)]
        fee_amount: f64,
        #[arg(long = "fee-status", help = "paid, pending or overdue")]
        fee_status: Option<String>,
    },

    /// Change some fields of a student
    Edit {
        id: i64,
        #[arg(long = "class", conflicts_with = "no_class")]
        class_id: Option<i64>,
        #[arg(long = "no-class", help = "Detach the student from its class")]
        no_class: bool,
        #[arg(long = "roll")]
        roll_number: Option<String>,
        #[arg(long = "guardian")]
        guardian_name: Option<String>,
        #[arg(long = "guardian-phone")]
        guardian_phone: Option<String>,
        #[arg(long = "guardian-email")]
        guardian_email: Option<String>,
        #[arg(long = "fee")]
        fee_amount: Option<f64>,
        #[arg(long = "fee-status")]
        fee_status: Option<String>,
    },

    /// Delete a student profile
    Del { id: i64 },

    /// Profile, attendance percentage and grades of one student
    Show {
        id: i64,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum TeacherAction {
    /// Attach a teacher profile to a user with the teacher role
    Add {
        #[arg(long = "user", help = "User id of the teacher")]
        user_id: i64,
        #[arg(long = "employee-id")]
        employee_id: String,
        #[arg(long)]
        qualification: String,
        #[arg(long)]
        department: Option<String>,
        #[arg(long = "joining", help = "Joining date (default today)")]
        joining_date: Option<String>,
        #[arg(long)]
        salary: Option<f64>,
        #[arg(long)]
        specialization: Option<String>,
        #[arg(long = "experience", default_value_t = 0)]
        experience_years: i64,
    },

    /// Delete a teacher profile
    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum ClassAction {
    /// Create a class
    Add {
        #[arg(long)]
        name: String,
        #[arg(long = "grade-level")]
        grade_level: String,
        #[arg(long)]
        section: Option<String>,
        #[arg(long = "teacher", help = "User id of the class teacher")]
        class_teacher_id: Option<i64>,
        #[arg(long, default_value_t = 30)]
        capacity: i64,
        #[arg(long = "room")]
        room_number: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },

    /// Change some fields of a class
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "teacher", conflicts_with = "no_teacher")]
        class_teacher_id: Option<i64>,
        #[arg(long = "no-teacher", help = "Remove the class teacher")]
        no_teacher: bool,
        #[arg(long)]
        capacity: Option<i64>,
        #[arg(long = "room")]
        room_number: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },

    /// Delete a class (students stay, without class)
    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum SubjectAction {
    /// Create a subject
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        code: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long = "total", default_value_t = 100)]
        total_marks: i64,
        #[arg(long = "pass", default_value_t = 40)]
        pass_marks: i64,
        #[arg(long)]
        category: Option<String>,
    },

    /// Delete a subject and its grades
    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum GradeAction {
    /// Record a grade
    Add {
        #[arg(long = "student")]
        student_id: i64,
        #[arg(long = "subject")]
        subject_id: i64,
        #[arg(long = "teacher", help = "Teacher profile id")]
        teacher_id: i64,
        #[arg(long = "exam-type", help = "e.g. midterm, final, quiz")]
        exam_type: String,
        #[arg(long = "marks")]
        marks_obtained: f64,
        #[arg(long = "total", help = "Total marks (default: the subject's total)")]
        total_marks: Option<f64>,
        #[arg(long = "letter")]
        grade_letter: Option<String>,
        #[arg(long)]
        gpa: Option<f64>,
        #[arg(long)]
        remarks: Option<String>,
        #[arg(long = "date", help = "Exam date (default today)")]
        exam_date: Option<String>,
    },

    /// Delete a grade
    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum AttendanceAction {
    /// Record one student's status for a day
    Mark {
        #[arg(long = "student")]
        student_id: i64,
        #[arg(long, help = "present, absent, late or excused")]
        status: String,
        #[arg(long = "by", help = "User id of whoever marks the attendance")]
        marked_by: i64,
        #[arg(long, help = "Day (default today)")]
        date: Option<String>,
        #[arg(long = "class", help = "Class id (default: the student's class)")]
        class_id: Option<i64>,
        #[arg(long = "in", help = "Check-in time (HH:MM)")]
        check_in: Option<String>,
        #[arg(long = "out", help = "Check-out time (HH:MM)")]
        check_out: Option<String>,
        #[arg(long)]
        remarks: Option<String>,
    },

    /// Change an attendance row
    Edit {
        id: i64,
        #[arg(long)]
        status: Option<String>,
        #[arg(long = "in")]
        check_in: Option<String>,
        #[arg(long = "out")]
        check_out: Option<String>,
        #[arg(long)]
        remarks: Option<String>,
    },

    /// Delete an attendance row
    Del { id: i64 },

    /// Per-status counts for one day
    Summary {
        #[arg(long, help = "Day (default today)")]
        date: Option<String>,
        #[arg(long)]
        json: bool,
    },

    /// Attendance percentage of a student over the trailing window
    Percent {
        #[arg(long = "student")]
        student_id: i64,
        #[arg(
            long,
            value_parser = clap::value_parser!(u32).range(1..=3650),
            help = "Window length in days, 1-3650 (default from config)"
        )]
        days: Option<u32>,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum AnnounceAction {
    /// Create an announcement
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long = "type", help = "general, urgent, event or academic")]
        kind: Option<String>,
        #[arg(long = "audience", help = "all, students, teachers, parents or specific_class")]
        target_audience: Option<String>,
        #[arg(long = "class")]
        target_class_id: Option<i64>,
        #[arg(long = "by", help = "Author user id")]
        created_by: i64,
        #[arg(long)]
        publish: bool,
        #[arg(long = "publish-at")]
        publish_at: Option<String>,
        #[arg(long = "expires")]
        expires_at: Option<String>,
    },

    /// Make an announcement visible
    Publish { id: i64 },

    /// Hide an announcement
    Unpublish { id: i64 },

    /// Delete an announcement
    Del { id: i64 },
}
