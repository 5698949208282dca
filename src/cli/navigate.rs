//! Navigate and routes commands

use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::output::{self, json};
use gradebook::error::Result;
use gradebook::router::{Resolution, RouteTable};

#[derive(Debug, Serialize)]
struct NavigationReport {
    requested: String,
    landed_name: &'static str,
    landed_path: String,
    redirected: bool,
}

/// Report where navigating to `path` (optionally from `from`) ends up
pub fn run(opts: &GlobalOptions, path: &str, from: Option<&str>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut router = ctx.router();

    // A static redirect record has no page of its own
    let requested = match router.table().resolve(path) {
        Resolution::Page(route) => Some(route.name),
        Resolution::Redirect(_) => None,
    };

    if let Some(from) = from {
        router.push(from)?;
    }
    let landed = router.push(path)?;

    let report = NavigationReport {
        requested: path.to_string(),
        landed_name: landed.name,
        landed_path: landed.path.clone(),
        redirected: requested != Some(landed.name),
    };

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&report)?),
        OutputFormat::Table => {
            if report.redirected {
                println!(
                    "{} {} → {} ({})",
                    "↪".yellow(),
                    report.requested,
                    report.landed_path.bold(),
                    report.landed_name
                );
            } else {
                println!(
                    "{} {} ({})",
                    "✓".green(),
                    report.landed_path.bold(),
                    report.landed_name
                );
            }
        }
    }

    Ok(())
}

#[derive(Debug, Serialize, Tabled)]
struct RouteRow {
    #[tabled(rename = "NAME")]
    name: &'static str,
    #[tabled(rename = "PATH")]
    path: &'static str,
}

impl From<(&'static str, &'static str)> for RouteRow {
    fn from((name, path): (&'static str, &'static str)) -> Self {
        Self { name, path }
    }
}

/// List every named route
pub fn routes(opts: &GlobalOptions) -> Result<()> {
    let rows: Vec<RouteRow> = RouteTable::default()
        .named_routes()
        .into_iter()
        .map(RouteRow::from)
        .collect();
    output::print_list::<RouteRow, RouteRow>(rows, opts.format)
}
