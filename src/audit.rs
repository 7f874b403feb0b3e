//! End-to-end audit of one run: parse both files, compose, append.

use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::audit_log::{AppendOutcome, AuditLog};
use crate::error::Result;
use crate::record::{header_line, AuditRecord};
use crate::run_parameters::{self, ElementPaths, RunParametersData};
use crate::sample_sheet::{self, SampleSheetData, SampleSheetOptions};

/// Parser configuration for both input files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Sample sheet key aliases and date formats
    pub sample_sheet: SampleSheetOptions,
    /// Run parameters element paths
    pub run_parameters: ElementPaths,
}

/// Both parsed inputs and the record composed from them
#[derive(Debug, Clone)]
pub struct PreparedRun {
    /// Parsed sample sheet
    pub sample_sheet: SampleSheetData,
    /// Parsed run parameters
    pub run_parameters: RunParametersData,
    /// Composed audit record
    pub record: AuditRecord,
}

/// Parse both files and compose the record without touching the log
pub fn prepare_run(
    sample_sheet_path: &Path,
    run_parameters_path: &Path,
    options: &ParseOptions,
) -> Result<PreparedRun> {
    let sheet = sample_sheet::parse_with(sample_sheet_path, &options.sample_sheet)?;
    let run = run_parameters::parse_with(run_parameters_path, &options.run_parameters)?;
    warn_expired_consumables(&run);

    let record = AuditRecord::new(&sheet, &run);
    Ok(PreparedRun {
        sample_sheet: sheet,
        run_parameters: run,
        record,
    })
}

/// Parse, compose and append one run to the audit log.
///
/// Nothing is written unless both files parse completely.
pub fn audit_run(
    sample_sheet_path: &Path,
    run_parameters_path: &Path,
    log: &AuditLog,
    options: &ParseOptions,
) -> Result<(PreparedRun, AppendOutcome)> {
    let prepared = prepare_run(sample_sheet_path, run_parameters_path, options)?;
    let outcome = log.append(Some(&header_line()), &prepared.record.to_line())?;
    Ok((prepared, outcome))
}

fn warn_expired_consumables(run: &RunParametersData) {
    for (label, consumable) in run.consumables() {
        if consumable.expiration_date < run.run_start_date {
            warn!(
                "{} {} expired on {} before run start {}",
                label, consumable.serial_number, consumable.expiration_date, run.run_start_date
            );
        }
    }
}
