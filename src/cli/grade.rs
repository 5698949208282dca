//! Grade command implementations

use colored::Colorize;
use futures::future::join_all;
use tabled::Tabled;

use crate::cli::{CommandContext, GlobalOptions, GradeArgs};
use crate::output;
use gradebook::client::GradeApi;
use gradebook::client::models::Grade;
use gradebook::error::{Error, Result};

/// Grade for table display
#[derive(Tabled)]
struct GradeRow {
    #[tabled(rename = "STUDENT")]
    student_id: String,
    #[tabled(rename = "COURSE")]
    course_code: String,
    #[tabled(rename = "GRADE")]
    grade: String,
    #[tabled(rename = "SEMESTER")]
    semester: String,
    #[tabled(rename = "YEAR")]
    academic_year: String,
}

impl From<Grade> for GradeRow {
    fn from(grade: Grade) -> Self {
        Self {
            student_id: grade.student_id,
            course_code: grade.course_code,
            grade: grade.grade,
            semester: grade.semester,
            academic_year: grade.academic_year,
        }
    }
}

/// List grades, optionally for one student
pub async fn list(opts: &GlobalOptions, student: Option<&str>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let result = match ctx.client.list_grades().await {
        Some(grades) => {
            let grades: Vec<Grade> = grades
                .into_iter()
                .filter(|g| student.is_none_or(|s| g.student_id == s))
                .collect();
            output::print_list::<Grade, GradeRow>(grades, ctx.format)
        }
        None => Err(Error::Unavailable("grade list".to_string())),
    };

    ctx.finish()?;
    result
}

/// Fetch a student's grade in each course concurrently
pub async fn get(opts: &GlobalOptions, student_id: &str, course_codes: &[String]) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let lookups = course_codes
        .iter()
        .map(|code| ctx.client.get_grade(student_id, code));
    let results = join_all(lookups).await;

    let mut grades = Vec::new();
    let mut missing = Vec::new();
    for (code, grade) in course_codes.iter().zip(results) {
        match grade {
            Some(grade) => grades.push(grade),
            None => missing.push(code.as_str()),
        }
    }

    let result = if grades.is_empty() {
        Err(Error::Unavailable(format!(
            "grades of {} in {}",
            student_id,
            missing.join(", ")
        )))
    } else {
        if !missing.is_empty() {
            eprintln!("{} No grade found for: {}", "⚠".yellow(), missing.join(", "));
        }
        output::print_list::<Grade, GradeRow>(grades, ctx.format)
    };

    ctx.finish()?;
    result
}

/// Record a grade
pub async fn add(opts: &GlobalOptions, args: GradeArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let grade = Grade::from(args);

    let result = ctx.client.push_grade(&grade).await;
    if let Ok(ref message) = result {
        print_confirmation(message, "Grade recorded");
    }

    ctx.finish()?;
    result.map(|_| ())
}

/// Change a recorded grade
pub async fn update(opts: &GlobalOptions, args: GradeArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let grade = Grade::from(args);

    let result = ctx.client.update_grade(&grade).await;
    if let Ok(ref message) = result {
        print_confirmation(message, "Grade updated");
    }

    ctx.finish()?;
    result.map(|_| ())
}

fn print_confirmation(message: &str, fallback: &str) {
    let message = if message.is_empty() { fallback } else { message };
    println!("{} {}", "✓".green(), message);
}
