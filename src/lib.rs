//! # RunLog - Sequencing Run Audit Trail
//!
//! `runlog` keeps a running history of every run executed on an Illumina
//! sequencer. For each run it reads two files written by the instrument
//! control software and appends one tab-separated line to a persistent log.
//!
//! ## Inputs
//!
//! - **`SampleSheet.csv`**: experiment configuration; `[Header]` key/value
//!   pairs, `[Reads]` cycle counts and a `[Data]` sample table.
//! - **`RunParameters.xml`**: instrument, software and consumable
//!   identifiers (flowcell, PR2 bottle and reagent kit RFID tags).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use runlog::audit_log::AuditLog;
//! use runlog::record::{compose, header_line};
//!
//! let sheet = runlog::sample_sheet::parse("SampleSheet.csv")?;
//! let run = runlog::run_parameters::parse("RunParameters.xml")?;
//!
//! let line = compose(&sheet, &run);
//! AuditLog::new("RunLog.txt").append(Some(&header_line()), &line)?;
//! # Ok::<(), runlog::error::RunLogError>(())
//! ```
//!
//! ## Log Format
//!
//! One header row, written when the file is created, then one row per run.
//! Dates are rendered `dd/MM/yyyy`.
//!
//! | Columns | Source |
//! |---------|--------|
//! | Instrument, RunId, RunStartDate | run parameters |
//! | Application .. Workflow | sample sheet |
//! | MCSVersion, RTAVersion | run parameters |
//! | Flowcell/PR2/Reagent part, serial, expiry | run parameters |
//!
//! ## Architecture
//!
//! - [`sample_sheet`]: sample sheet sections and typed fields
//! - [`run_parameters`]: run parameters XML fields
//! - [`record`]: fixed-order record composition
//! - [`audit_log`]: append-only log file
//! - [`audit`]: the whole pipeline for one run
//! - [`dates`]: date token parsing and rendering

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod audit;
pub mod audit_log;
pub mod dates;
pub mod error;
pub mod record;
pub mod run_parameters;
pub mod sample_sheet;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::audit::{audit_run, prepare_run, ParseOptions, PreparedRun};
    pub use crate::audit_log::{AppendOutcome, AuditLog, DEFAULT_LOG_FILE};
    pub use crate::error::{ParseError, Result, RunLogError};
    pub use crate::record::{compose, header_line, AuditRecord, COLUMNS, COLUMN_COUNT};
    pub use crate::run_parameters::{Consumable, ElementPaths, RunParametersData};
    pub use crate::sample_sheet::{
        FieldAliases, SampleSheet, SampleSheetData, SampleSheetOptions,
    };
}
