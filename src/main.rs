use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use regatta_tools::config::ReportLayout;
use regatta_tools::pipeline::{self, ReportPaths};
use regatta_tools::schema::REPORT_FILE_TYPE;
use regatta_tools::{Result, ToolError};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Process(args) => execute_process(args),
    }
}

fn execute_process(args: ProcessArgs) -> Result<()> {
    check_report(&args.teams)?;
    check_report(&args.team_members)?;
    if let Some(path) = &args.community_members {
        check_report(path)?;
    }

    let layout = ReportLayout::load(&args.layout)?;
    let processed = pipeline::process_workbooks(
        ReportPaths {
            teams: &args.teams,
            team_members: &args.team_members,
            community_members: args.community_members.as_deref(),
        },
        &layout,
        &args.output,
    )?;

    println!(
        "{} crews, {} crew members written to {}",
        processed.teams.len(),
        processed.crew_members.len(),
        args.output.display()
    );
    Ok(())
}

fn check_report(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ToolError::MissingInput(path.to_path_buf()));
    }
    let is_report = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(REPORT_FILE_TYPE));
    if !is_report {
        return Err(ToolError::UnsupportedFileType(path.to_path_buf()));
    }
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Reshape Playwaze regatta entry reports into crew and crew member tables."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Reconcile the teams and team members reports into a crew list.
    Process(ProcessArgs),
}

#[derive(clap::Args)]
struct ProcessArgs {
    /// Playwaze teams report.
    #[arg(long)]
    teams: PathBuf,

    /// Playwaze team members report.
    #[arg(long)]
    team_members: PathBuf,

    /// Optional community members report used to identify coxes.
    #[arg(long)]
    community_members: Option<PathBuf>,

    /// JSON file mapping report columns onto canonical fields.
    #[arg(long)]
    layout: PathBuf,

    /// Output workbook path.
    #[arg(long)]
    output: PathBuf,
}
