//! Command-line front end for the outreach tracker.
//!
//! # Responsibility
//! - Map subcommands onto `TrackerService` use-cases.
//! - Render the record list as a text table or JSON.
//!
//! # Invariants
//! - Every mutating command saves the data file before reporting success.

mod table;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use outreach_core::{
    core_version, default_log_level, init_logging, EmailDomain, MergeReport, RecordField,
    SortColumn, TrackerConfig, TrackerService, DEFAULT_DATA_FILE, DEFAULT_EMAIL_DOMAIN,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "outreach", version, about = "Track professor outreach for assistantship search")]
struct Cli {
    /// Local CSV file mirroring the tracked list.
    #[arg(long, env = "OUTREACH_DATA_FILE", default_value = DEFAULT_DATA_FILE, global = true)]
    data_file: PathBuf,

    /// Institution mail domain every address must belong to.
    #[arg(long, env = "OUTREACH_EMAIL_DOMAIN", default_value = DEFAULT_EMAIL_DOMAIN, global = true)]
    domain: String,

    /// Directory for rolling log files; logging is off when unset.
    #[arg(long, env = "OUTREACH_LOG_DIR", global = true)]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "OUTREACH_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show tracked professors
    List {
        /// name|email|department|status|opportunity
        #[arg(long)]
        sort: Option<SortColumn>,
        /// Sort descending instead of ascending
        #[arg(long, requires = "sort")]
        desc: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Track a new professor
    Add {
        #[arg(long)]
        name: String,
        /// Local part (`jdoe`) or full institution address
        #[arg(long)]
        email: String,
        #[arg(long)]
        department: String,
    },
    /// Set reply status (Applied|Replied)
    SetStatus { email: String, value: String },
    /// Set opportunity (Has|Not)
    SetOpportunity { email: String, value: String },
    /// Stop tracking a professor
    Delete { email: String },
    /// Merge a CSV or XLSX file into the list
    Import { file: PathBuf },
    /// Write the list to an XLSX file
    Export {
        file: PathBuf,
        #[arg(long)]
        sort: Option<SortColumn>,
        #[arg(long, requires = "sort")]
        desc: bool,
    },
    /// Print the core version
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    start_logging(&config)?;

    if let Command::Version = cli.command {
        println!("outreach_core version={}", core_version());
        return Ok(());
    }

    let mut service = TrackerService::open(&config)
        .with_context(|| format!("failed to open {}", cli.data_file.display()))?;
    run(&mut service, cli.command)
}

fn build_config(cli: &Cli) -> Result<TrackerConfig> {
    let email_domain = EmailDomain::parse(&cli.domain).context("invalid --domain")?;
    let log_dir = match &cli.log_dir {
        Some(dir) if dir.is_relative() => Some(
            std::env::current_dir()
                .context("failed to resolve current directory")?
                .join(dir),
        ),
        other => other.clone(),
    };

    Ok(TrackerConfig {
        data_file: Some(cli.data_file.clone()),
        email_domain,
        log_dir,
        log_level: cli
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string()),
    })
}

fn start_logging(config: &TrackerConfig) -> Result<()> {
    let Some(dir) = &config.log_dir else {
        return Ok(());
    };
    init_logging(&config.log_level, &dir.to_string_lossy()).context("failed to start logging")?;
    info!("event=cli_start module=cli status=ok");
    Ok(())
}

fn run(service: &mut TrackerService, command: Command) -> Result<()> {
    match command {
        Command::List { sort, desc, json } => {
            let records = match sort {
                Some(column) => service.sorted_view(column, !desc),
                None => service.records().to_vec(),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else if records.is_empty() {
                println!("No professors tracked yet. Use `outreach add` to begin.");
            } else {
                print!("{}", table::render(&records));
            }
        }
        Command::Add {
            name,
            email,
            department,
        } => {
            let record = service.add_professor(&name, &email, &department)?;
            println!("Added {} <{}>.", record.name, record.email);
        }
        Command::SetStatus { email, value } => {
            let record = service.update_field(&email, RecordField::Status, &value)?;
            println!("{}: status={}", record.email, record.status);
        }
        Command::SetOpportunity { email, value } => {
            let record = service.update_field(&email, RecordField::Opportunity, &value)?;
            println!("{}: opportunity={}", record.email, record.opportunity);
        }
        Command::Delete { email } => {
            let record = service.delete_professor(&email)?;
            println!("Deleted {} <{}>.", record.name, record.email);
        }
        Command::Import { file } => {
            let report = service
                .import_file(&file)
                .with_context(|| format!("import of {} failed", file.display()))?;
            println!("{}", describe_merge(&report));
        }
        Command::Export { file, sort, desc } => {
            let order = sort.map(|column| (column, !desc));
            let written = service
                .export_xlsx(&file, order)
                .with_context(|| format!("export to {} failed", file.display()))?;
            println!("Exported {written} professor(s) to {}.", file.display());
        }
        Command::Version => println!("outreach_core version={}", core_version()),
    }
    Ok(())
}

fn describe_merge(report: &MergeReport) -> String {
    let mut message = format!(
        "Imported {} professor(s); skipped {} duplicate(s) and {} invalid row(s).",
        report.accepted, report.duplicate, report.rejected
    );
    if report.coerced > 0 {
        message.push_str(&format!(
            " {} unrecognized status value(s) reset to defaults.",
            report.coerced
        ));
    }
    message
}
