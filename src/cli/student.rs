//! Student command implementations

use colored::Colorize;
use dialoguer::{Password, theme::ColorfulTheme};

use crate::cli::{CommandContext, GlobalOptions, StudentArgs};
use crate::output;
use gradebook::client::StudentApi;
use gradebook::error::{Error, Result};

/// Show one student
pub async fn get(opts: &GlobalOptions, student_id: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let result = match ctx.client.get_student(student_id).await {
        Some(student) => output::print_record(&student, ctx.format),
        None => Err(Error::Unavailable(format!("student {}", student_id))),
    };

    ctx.finish()?;
    result
}

/// Register a new student
pub async fn register(opts: &GlobalOptions, args: StudentArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let password = match args.password.clone() {
        Some(p) => p,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password for the new account")
            .with_confirmation("Repeat password", "Passwords do not match")
            .interact()?,
    };
    let student = args.into_student(password);

    let result = ctx.client.register_student(&student).await;
    if let Ok(ref message) = result {
        let message = if message.is_empty() {
            "Student registered"
        } else {
            message.as_str()
        };
        println!("{} {}", "✓".green(), message);
        println!("  → Run 'gradebook login' to sign in as {}", student.username);
    }

    ctx.finish()?;
    result.map(|_| ())
}
