use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

use runlog::audit::{audit_run, prepare_run, ParseOptions};
use runlog::audit_log::{AppendOutcome, AuditLog, DEFAULT_LOG_FILE};

mod config;
mod summary;

pub use config::Config;
use summary::RunSummary;

/// RunLog - append an audit record for an Illumina sequencing run
#[derive(Parser, Debug)]
#[command(name = "runlog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Sample sheet path (SampleSheet.csv)
    #[arg(value_name = "SAMPLE_SHEET")]
    pub sample_sheet: PathBuf,

    /// Run parameters path (RunParameters.xml)
    #[arg(value_name = "RUN_PARAMETERS")]
    pub run_parameters: PathBuf,

    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Audit log path (overrides the config file; default RunLog.txt)
    #[arg(long, value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// Parse and print the record without appending it
    #[arg(long)]
    pub dry_run: bool,

    /// With --dry-run, print the record as JSON
    #[arg(long, requires = "dry_run")]
    pub json: bool,
}

impl Cli {
    /// Default log filter for the requested verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

/// Run the audit described by the parsed command line
pub fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let options: ParseOptions = config.parse_options();

    let log_path = cli
        .log
        .clone()
        .or_else(|| config.audit_log.path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    info!("Sample sheet:   {}", cli.sample_sheet.display());
    info!("Run parameters: {}", cli.run_parameters.display());
    info!("Audit log:      {}", log_path.display());

    if cli.dry_run {
        let prepared = prepare_run(&cli.sample_sheet, &cli.run_parameters, &options)
            .context("Could not parse run files")?;

        if cli.json {
            println!("{}", prepared.record.to_json()?);
        } else {
            println!("{}", RunSummary::new(&prepared).format_colored());
            print!("{}", prepared.record.to_line());
        }
        return Ok(());
    }

    let log = AuditLog::new(&log_path);
    let (prepared, outcome) = audit_run(&cli.sample_sheet, &cli.run_parameters, &log, &options)
        .context("Could not audit run")?;

    match outcome {
        AppendOutcome::Created => info!(
            "Created {} and recorded run {}",
            log_path.display(),
            prepared.record.run_id
        ),
        AppendOutcome::Appended => info!(
            "Recorded run {} in {}",
            prepared.record.run_id,
            log_path.display()
        ),
    }

    Ok(())
}
