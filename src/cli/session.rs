//! Login and logout commands

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::cli::{CommandContext, GlobalOptions};
use gradebook::error::Result;

/// Run the login command
pub async fn login(
    opts: &GlobalOptions,
    username: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let username = match username {
        Some(u) => u,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Username")
            .interact_text()?,
    };
    let password = match password {
        Some(p) => p,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .interact()?,
    };

    println!("{}", "Signing in...".cyan());
    ctx.session.login(&username, &password).await?;

    let user = ctx.session.current_user();
    let who = user.display_name.unwrap_or(username);
    match user.subject_id {
        Some(id) => println!("{} Logged in as {} ({})", "✓".green(), who.bold(), id),
        None => println!("{} Logged in as {}", "✓".green(), who.bold()),
    }

    ctx.finish()
}

/// Run the logout command
pub fn logout(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.session.logout();
    ctx.finish()
}
