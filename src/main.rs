//! # RunLog
//!
//! Command-line tool that appends one audit record per Illumina sequencing
//! run to a tab-separated log file.
//!
//! ## Usage
//!
//! ```bash
//! # Record a run in ./RunLog.txt
//! runlog SampleSheet.csv RunParameters.xml
//!
//! # Inspect what would be recorded
//! runlog --dry-run SampleSheet.csv RunParameters.xml
//! ```
//!
//! Exit status is 0 on success and 1 on a usage, parse or I/O error.

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            eprintln!("RunLog v{}", env!("CARGO_PKG_VERSION"));
            eprint!("{}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging based on verbosity
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level())).init();

    cli::run(cli)
}
