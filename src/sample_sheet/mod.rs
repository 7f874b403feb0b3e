//! # Sample Sheet Parser
//!
//! Reads the comma-separated `SampleSheet.csv` written by Illumina
//! Experiment Manager and instrument control software.
//!
//! ## Layout
//!
//! ```text
//! [Header]
//! IEMFileVersion,4
//! Investigator Name,J Bloggs
//! Experiment Name,Run42
//! Date,15/06/2016
//! Workflow,GenerateFASTQ
//! Application,FASTQ Only
//! Assay,Nextera XT
//! Description,
//! Chemistry,Amplicon
//!
//! [Reads]
//! 151
//! 151
//!
//! [Settings]
//! Adapter,CTGTCTCTTATACACATCT
//!
//! [Data]
//! Sample_ID,Sample_Name,...
//! S1,Sample One,...
//! ```
//!
//! `[Header]` and `[Settings]` hold `Key,Value` rows, `[Reads]` holds one
//! cycle count per configured read, and `[Data]` is a table whose first row
//! names the columns. Sheet editors pad rows with trailing commas; those
//! padding cells are ignored.

mod aliases;
mod sections;


use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::{debug, info, warn};

use crate::dates::parse_sheet_date;
use crate::error::{Result, RunLogError};

pub use aliases::{FieldAliases, SampleSheetOptions};

/// Raw contents of a sample sheet, split by section
#[derive(Debug, Clone)]
pub struct SampleSheet {
    source: PathBuf,
    header: HashMap<String, String>,
    reads: Vec<u32>,
    settings: HashMap<String, String>,
    data: DataTable,
    sections: Vec<String>,
}

/// The `[Data]` table of a sample sheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTable {
    /// Column names from the first row of the section
    pub columns: Vec<String>,

    /// Remaining rows; rows may be shorter than `columns`
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Number of sample rows
    pub fn sample_count(&self) -> usize {
        self.rows.len()
    }

    /// Values of the named column, empty where a row is short
    pub fn column_values(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.columns.iter().position(|c| c == name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(index).map(String::as_str).unwrap_or_default())
                .collect(),
        )
    }
}

/// Fields of interest extracted from a sample sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleSheetData {
    /// Instrument application (e.g. `FASTQ Only`)
    pub application: String,
    /// Library prep kit
    pub assay: String,
    /// Chemistry (e.g. `Amplicon`)
    pub chemistry: String,
    /// Read 1 cycles
    pub cycles_read1: u32,
    /// Read 2 cycles; zero for single-end runs
    pub cycles_read2: u32,
    /// Sheet date
    pub date: NaiveDate,
    /// Free-text description, possibly empty
    pub description: String,
    /// Experiment name
    pub experiment_name: String,
    /// Investigator name
    pub investigator_name: String,
    /// Analysis workflow (e.g. `GenerateFASTQ`)
    pub workflow: String,
}

impl SampleSheet {
    /// Read and split a sample sheet file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| RunLogError::io(path, e))?;
        Self::read(BufReader::new(file), path.to_path_buf())
    }

    /// Read and split a sample sheet from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::read(reader, PathBuf::from("<reader>"))
    }

    /// Where the sheet was read from
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Value of a `[Header]` key, matched exactly
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.header.get(key).map(String::as_str)
    }

    /// Value of a `[Settings]` key, matched exactly
    pub fn setting(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }

    /// Cycle counts from the `[Reads]` section, in order
    pub fn reads(&self) -> &[u32] {
        &self.reads
    }

    /// The `[Data]` table
    pub fn data(&self) -> &DataTable {
        &self.data
    }

    /// Section names in the order they appear
    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    /// First alias present in `[Header]`, or a missing-field error naming the primary alias
    fn lookup(&self, aliases: &[String]) -> Result<&str> {
        for alias in aliases {
            if let Some(value) = self.header_value(alias) {
                debug!("Sample sheet field '{}' = '{}'", alias, value);
                return Ok(value);
            }
        }
        let primary = aliases.first().map(String::as_str).unwrap_or_default();
        Err(RunLogError::missing(&self.source.display().to_string(), primary))
    }

    /// Extract the typed fields using the given options
    pub fn extract(&self, options: &SampleSheetOptions) -> Result<SampleSheetData> {
        options.validate()?;
        let aliases = &options.aliases;

        let (cycles_read1, cycles_read2) = match self.reads.as_slice() {
            [] => return Err(RunLogError::missing(&self.source.display().to_string(), "Reads")),
            [read1] => (*read1, 0),
            [read1, read2, rest @ ..] => {
                if !rest.is_empty() {
                    warn!(
                        "Sample sheet lists {} reads; only the first two are recorded",
                        self.reads.len()
                    );
                }
                (*read1, *read2)
            }
        };

        let date_value = self.lookup(&aliases.date)?;
        let date_field = aliases.date.first().map(String::as_str).unwrap_or("Date");
        let date = parse_sheet_date(
            &self.source.display().to_string(),
            date_field,
            date_value,
            &options.date_formats,
        )?;

        if self.data.columns.is_empty() {
            warn!("Sample sheet {} has no [Data] section", self.source.display());
        }

        Ok(SampleSheetData {
            application: self.lookup(&aliases.application)?.to_string(),
            assay: self.lookup(&aliases.assay)?.to_string(),
            chemistry: self.lookup(&aliases.chemistry)?.to_string(),
            cycles_read1,
            cycles_read2,
            date,
            description: self.lookup(&aliases.description)?.to_string(),
            experiment_name: self.lookup(&aliases.experiment_name)?.to_string(),
            investigator_name: self.lookup(&aliases.investigator_name)?.to_string(),
            workflow: self.lookup(&aliases.workflow)?.to_string(),
        })
    }
}

/// Parse a sample sheet with the built-in key aliases and date formats
pub fn parse<P: AsRef<Path>>(path: P) -> Result<SampleSheetData> {
    parse_with(path, &SampleSheetOptions::default())
}

/// Parse a sample sheet with explicit options
pub fn parse_with<P: AsRef<Path>>(path: P, options: &SampleSheetOptions) -> Result<SampleSheetData> {
    let sheet = SampleSheet::from_file(path.as_ref())?;
    let data = sheet.extract(options)?;
    info!(
        "Parsed sample sheet {} ({} reads, {} samples)",
        path.as_ref().display(),
        sheet.reads().len(),
        sheet.data().sample_count()
    );
    Ok(data)
}
