//! Course command implementations

use colored::Colorize;
use dialoguer::{Confirm, theme::ColorfulTheme};
use tabled::Tabled;

use crate::cli::{CommandContext, CourseArgs, GlobalOptions};
use crate::output;
use gradebook::client::CourseApi;
use gradebook::client::models::Course;
use gradebook::error::{Error, Result};

/// Course for table display
#[derive(Tabled)]
struct CourseRow {
    #[tabled(rename = "CODE")]
    code: String,
    #[tabled(rename = "NAME (TH)")]
    name_th: String,
    #[tabled(rename = "NAME (EN)")]
    name_en: String,
    #[tabled(rename = "CREDIT")]
    credit: f64,
    #[tabled(rename = "GROUP")]
    group: String,
}

impl From<Course> for CourseRow {
    fn from(course: Course) -> Self {
        Self {
            code: course.course_code,
            name_th: course.course_name_th,
            name_en: course.course_name_en,
            credit: course.credit,
            group: course.subject_group,
        }
    }
}

/// List all courses
pub async fn list(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let result = match ctx.client.list_courses().await {
        Some(courses) => output::print_list::<Course, CourseRow>(courses, ctx.format),
        None => Err(Error::Unavailable("course list".to_string())),
    };

    ctx.finish()?;
    result
}

/// Show one course
pub async fn get(opts: &GlobalOptions, code: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let result = match ctx.client.get_course(code).await {
        Some(course) => output::print_record(&course, ctx.format),
        None => Err(Error::Unavailable(format!("course {}", code))),
    };

    ctx.finish()?;
    result
}

/// Add a course
pub async fn add(opts: &GlobalOptions, args: CourseArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let course = Course::from(args);

    let result = ctx.client.push_course(&course).await;
    if result.is_ok() {
        println!("{} Added course {}", "✓".green(), course.course_code.bold());
    }

    ctx.finish()?;
    result
}

/// Update a course
pub async fn update(opts: &GlobalOptions, args: CourseArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let course = Course::from(args);

    let result = ctx.client.update_course(&course).await;
    if result.is_ok() {
        println!("{} Updated course {}", "✓".green(), course.course_code.bold());
    }

    ctx.finish()?;
    result
}

/// Delete a course, asking first unless `yes`
pub async fn delete(opts: &GlobalOptions, code: &str, yes: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Delete course {}?", code))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let result = ctx.client.delete_course(code).await;
    if result.is_ok() {
        println!("{} Deleted course {}", "✓".green(), code.bold());
    }

    ctx.finish()?;
    result
}
