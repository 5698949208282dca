//! Status command implementation

use chrono::Utc;
use colored::Colorize;
use serde::Serialize;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::output::json;
use gradebook::error::Result;

#[derive(Debug, Serialize)]
struct StatusReport {
    config_file: String,
    session_file: String,
    api_base_url: String,
    request_timeout_secs: u64,
    logged_in: bool,
    subject_id: Option<String>,
    display_name: Option<String>,
    token_expires_at: Option<String>,
}

/// Run the status command to display session status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let user = ctx.session.current_user();
    let logged_in = ctx.session.is_logged_in();
    let expires_at = ctx.session.token_expires_at();

    if ctx.format == OutputFormat::Json {
        let report = StatusReport {
            config_file: ctx.config_path.display().to_string(),
            session_file: ctx.session_path.display().to_string(),
            api_base_url: ctx.client.base_url().to_string(),
            request_timeout_secs: ctx.config.request_timeout_secs,
            logged_in,
            subject_id: user.subject_id,
            display_name: user.display_name,
            token_expires_at: expires_at.map(|t| t.to_rfc3339()),
        };
        println!("{}", json::format_json(&report)?);
        return Ok(());
    }

    println!("{}\n", "gradebook Status".bold());
    println!("Config file: {}", ctx.config_path.display().to_string().cyan());
    println!("Session file: {}", ctx.session_path.display().to_string().cyan());
    println!("API: {}", ctx.client.base_url().cyan());
    println!("Request timeout: {}s", ctx.config.request_timeout_secs);
    println!();

    match (user.token.is_some(), logged_in) {
        (true, true) => {
            let who = user.display_name.as_deref().unwrap_or("unknown user");
            let id = user.subject_id.as_deref().unwrap_or("-");
            println!("{} Logged in as {} ({})", "✓".green(), who.bold(), id);

            if let Some(expires) = expires_at {
                let remaining = expires.signed_duration_since(Utc::now());
                println!(
                    "{} Token valid (expires in {}h {}m)",
                    "✓".green(),
                    remaining.num_hours(),
                    remaining.num_minutes() % 60
                );
            }
        }
        (true, false) => {
            println!("{} Session token expired", "⚠".yellow());
            println!("  → Run 'gradebook login' to sign in again");
        }
        (false, _) => {
            println!("{} Not logged in", "✗".red());
            if user.display_name.is_some() || user.subject_id.is_some() {
                println!("  Stale identity found in session file; it is ignored");
            }
            println!("  → Run 'gradebook login' to sign in");
        }
    }
    println!();

    Ok(())
}
