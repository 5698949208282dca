//! gradebook CLI - sign in, browse courses and record grades

use clap::Parser;
use colored::Colorize;
use log::LevelFilter;

mod cli;
mod output;

use cli::{Cli, Commands, CourseCommands, GlobalOptions, GradeCommands, StudentCommands};
use gradebook::error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("{} {}", "Error:".red().bold(), err);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise warnings only, or debug with `--debug`.
fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
    if std::env::var_os("RUST_LOG").is_none() {
        let level = if debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        };
        builder.filter_module("gradebook", level);
    }
    builder.format_timestamp(None).init();
    if debug {
        log::debug!("Debug logging enabled");
    }
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Login { username, password } => {
            cli::session::login(&opts, username, password).await
        }
        Commands::Logout => cli::session::logout(&opts),
        Commands::Status => cli::status::run(&opts),
        Commands::Navigate { path, from } => cli::navigate::run(&opts, &path, from.as_deref()),
        Commands::Routes => cli::navigate::routes(&opts),
        Commands::Student(cmd) => match cmd {
            StudentCommands::Get { student_id } => cli::student::get(&opts, &student_id).await,
            StudentCommands::Register(args) => cli::student::register(&opts, args).await,
        },
        Commands::Course(cmd) => match cmd {
            CourseCommands::List => cli::course::list(&opts).await,
            CourseCommands::Get { code } => cli::course::get(&opts, &code).await,
            CourseCommands::Add(args) => cli::course::add(&opts, args).await,
            CourseCommands::Update(args) => cli::course::update(&opts, args).await,
            CourseCommands::Delete { code, yes } => cli::course::delete(&opts, &code, yes).await,
        },
        Commands::Grade(cmd) => match cmd {
            GradeCommands::List { student } => cli::grade::list(&opts, student.as_deref()).await,
            GradeCommands::Get {
                student_id,
                course_codes,
            } => cli::grade::get(&opts, &student_id, &course_codes).await,
            GradeCommands::Add(args) => cli::grade::add(&opts, args).await,
            GradeCommands::Update(args) => cli::grade::update(&opts, args).await,
        },
    }
}
