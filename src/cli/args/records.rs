//! Arguments describing the records sent to the API

use clap::Args;

use gradebook::client::models::{Course, Grade, Student};

/// Fields of a course
#[derive(Debug, Clone, Args)]
pub struct CourseArgs {
    /// Course code, e.g. CS101
    pub code: String,

    /// Thai course name
    #[arg(long)]
    pub name_th: String,

    /// English course name
    #[arg(long)]
    pub name_en: String,

    /// Credit count
    #[arg(long)]
    pub credit: f64,

    /// Subject group
    #[arg(long)]
    pub group: String,
}

impl From<CourseArgs> for Course {
    fn from(args: CourseArgs) -> Self {
        Self {
            course_code: args.code,
            course_name_th: args.name_th,
            course_name_en: args.name_en,
            credit: args.credit,
            subject_group: args.group,
        }
    }
}

/// Fields of a grade
#[derive(Debug, Clone, Args)]
pub struct GradeArgs {
    /// Student ID
    pub student_id: String,

    /// Course code
    pub course_code: String,

    /// Letter grade, e.g. A or B+
    pub grade: String,

    /// Semester, e.g. 1
    #[arg(long)]
    pub semester: String,

    /// Academic year, e.g. 2567
    #[arg(long)]
    pub year: String,
}

impl From<GradeArgs> for Grade {
    fn from(args: GradeArgs) -> Self {
        Self {
            student_id: args.student_id,
            course_code: args.course_code,
            grade: args.grade,
            semester: args.semester,
            academic_year: args.year,
        }
    }
}

/// Fields of a new student
#[derive(Debug, Clone, Args)]
pub struct StudentArgs {
    /// Student ID
    pub student_id: String,

    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    #[arg(long)]
    pub section: String,

    /// Login name for the new account
    #[arg(long)]
    pub username: String,

    /// Password (prompted when omitted)
    #[arg(long, env = "GRADEBOOK_NEW_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl StudentArgs {
    pub fn into_student(self, password: String) -> Student {
        Student {
            student_id: self.student_id,
            first_name: self.first_name,
            last_name: self.last_name,
            section: self.section,
            username: self.username,
            password,
        }
    }
}
