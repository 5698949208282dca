//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

pub mod args;
pub mod context;
pub mod course;
pub mod grade;
pub mod navigate;
pub mod session;
pub mod status;
pub mod student;

pub use args::{CourseArgs, GlobalOptions, GradeArgs, OutputFormat, StudentArgs};
pub use context::CommandContext;

/// gradebook - course and grade client for the student information service
#[derive(Parser, Debug)]
#[command(name = "gradebook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "GRADEBOOK_FORMAT",
        default_value = "table",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "GRADEBOOK_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override the API base URL
    #[arg(long, global = true, env = "GRADEBOOK_API_URL", hide_env = true)]
    pub api_url: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "GRADEBOOK_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store the session
    Login {
        /// Username (prompted when omitted)
        #[arg(long, short)]
        username: Option<String>,

        /// Password (prompted when omitted)
        #[arg(long, env = "GRADEBOOK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Clear the stored session
    Logout,

    /// Show session and configuration status
    Status,

    /// Check where navigating to a page would land
    Navigate {
        /// Page path, e.g. /dashboard
        path: String,

        /// Page being navigated away from
        #[arg(long)]
        from: Option<String>,
    },

    /// List the named pages
    Routes,

    /// Look up and register students
    #[command(subcommand)]
    Student(StudentCommands),

    /// Manage the course catalogue
    #[command(subcommand)]
    Course(CourseCommands),

    /// View and record grades
    #[command(subcommand)]
    Grade(GradeCommands),
}

/// Student subcommands
#[derive(Subcommand, Debug)]
pub enum StudentCommands {
    /// Show one student
    Get {
        /// Student ID
        student_id: String,
    },

    /// Register a new student
    Register(StudentArgs),
}

/// Course subcommands
#[derive(Subcommand, Debug)]
pub enum CourseCommands {
    /// List all courses
    List,

    /// Show one course
    Get {
        /// Course code
        code: String,
    },

    /// Add a course
    Add(CourseArgs),

    /// Update a course
    Update(CourseArgs),

    /// Delete a course
    Delete {
        /// Course code
        code: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

/// Grade subcommands
#[derive(Subcommand, Debug)]
pub enum GradeCommands {
    /// List recorded grades
    List {
        /// Only show grades of this student
        #[arg(long)]
        student: Option<String>,
    },

    /// Show a student's grade in one or more courses
    Get {
        /// Student ID
        student_id: String,

        /// Course codes
        #[arg(required = true)]
        course_codes: Vec<String>,
    },

    /// Record a grade
    Add(GradeArgs),

    /// Change a recorded grade
    Update(GradeArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_navigate_with_from() {
        let cli = Cli::try_parse_from([
            "gradebook",
            "navigate",
            "/auth/login",
            "--from",
            "/auth/login/register",
        ])
        .unwrap();

        match cli.command {
            Commands::Navigate { path, from } => {
                assert_eq!(path, "/auth/login");
                assert_eq!(from.as_deref(), Some("/auth/login/register"));
            }
            other => panic!("Expected navigate, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_course_add() {
        let cli = Cli::try_parse_from([
            "gradebook",
            "--format",
            "json",
            "course",
            "add",
            "CS101",
            "--name-th",
            "การเขียนโปรแกรม",
            "--name-en",
            "Programming",
            "--credit",
            "3",
            "--group",
            "Core",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Course(CourseCommands::Add(args)) => {
                assert_eq!(args.code, "CS101");
                assert_eq!(args.credit, 3.0);
            }
            other => panic!("Expected course add, got {:?}", other),
        }
    }

    #[test]
    fn test_grade_get_requires_course() {
        assert!(Cli::try_parse_from(["gradebook", "grade", "get", "S1"]).is_err());
    }
}
