//! # Run Parameters Parser
//!
//! Reads the `RunParameters.xml` document written by instrument control
//! software at the start of a run.
//!
//! ## Structure (MiSeq)
//!
//! ```text
//! RunParameters
//! ├── RunID, ScannerID, RunNumber, MCSVersion, RTAVersion
//! ├── Setup
//! │   ├── ApplicationName
//! │   └── ApplicationVersion
//! ├── FlowcellRFIDTag     ── SerialNumber, PartNumber, ExpirationDate
//! ├── PR2BottleRFIDTag    ── SerialNumber, PartNumber, ExpirationDate
//! ├── ReagentKitRFIDTag   ── SerialNumber, PartNumber, ExpirationDate
//! └── RunStartDate (yyMMdd)
//! ```
//!
//! Fields are located by element name rather than position, so sibling
//! reordering and new elements added by software updates are harmless.

mod elements;
mod xml;

#[cfg(test)]
mod tests;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::NaiveDate;
use log::{debug, info};

use crate::dates::parse_run_date;
use crate::error::{Result, RunLogError};

pub use elements::ElementPaths;
use xml::ElementIndex;

/// Part number, serial number and expiry of an RFID-tagged consumable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consumable {
    /// Vendor part number
    pub part_number: String,
    /// Lot or tag serial number
    pub serial_number: String,
    /// Expiry date read from the RFID tag
    pub expiration_date: NaiveDate,
}

/// Fields of interest extracted from a run parameters document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunParametersData {
    /// Instrument serial (e.g. `M00766`)
    pub scanner_id: String,
    /// Run folder identifier
    pub run_identifier: String,
    /// Date the run was started
    pub run_start_date: NaiveDate,
    /// Control software version (MCS on MiSeq)
    pub application_version: String,
    /// Real-Time Analysis version
    pub rta_version: String,
    /// Flowcell RFID tag
    pub flowcell: Consumable,
    /// PR2 buffer bottle RFID tag
    pub pr2: Consumable,
    /// Reagent kit RFID tag
    pub reagent: Consumable,

    /// Control software name, when present
    pub application_name: Option<String>,
    /// Instrument run counter, when present
    pub run_number: Option<String>,
    /// Experiment name as entered on the instrument, when present
    pub experiment_name: Option<String>,
}

impl RunParametersData {
    /// The three consumables, labelled
    pub fn consumables(&self) -> [(&'static str, &Consumable); 3] {
        [
            ("Flowcell", &self.flowcell),
            ("PR2", &self.pr2),
            ("Reagent", &self.reagent),
        ]
    }
}

/// Field lookup over an indexed document
struct Fields<'a> {
    index: &'a ElementIndex,
    source: String,
}

impl<'a> Fields<'a> {
    fn optional(&self, candidates: &[String]) -> Option<&'a str> {
        candidates.iter().find_map(|candidate| {
            let value = self.index.find(candidate)?;
            debug!("Run parameters element '{}' = '{}'", candidate, value);
            Some(value)
        })
    }

    fn text(&self, candidates: &[String]) -> Result<String> {
        self.optional(candidates)
            .map(str::to_string)
            .ok_or_else(|| RunLogError::missing(&self.source, primary(candidates)))
    }

    fn date(&self, candidates: &[String]) -> Result<NaiveDate> {
        let value = self
            .optional(candidates)
            .ok_or_else(|| RunLogError::missing(&self.source, primary(candidates)))?;
        parse_run_date(&self.source, primary(candidates), value)
    }

    fn consumable(
        &self,
        part_number: &[String],
        serial_number: &[String],
        expiration_date: &[String],
    ) -> Result<Consumable> {
        Ok(Consumable {
            part_number: self.text(part_number)?,
            serial_number: self.text(serial_number)?,
            expiration_date: self.date(expiration_date)?,
        })
    }
}

fn primary(candidates: &[String]) -> &str {
    candidates.first().map(String::as_str).unwrap_or_default()
}

/// Parse run parameters from any buffered reader.
///
/// `source` is only used to label errors.
pub fn parse_reader<R: BufRead>(
    reader: R,
    source: &Path,
    paths: &ElementPaths,
) -> Result<RunParametersData> {
    paths.validate()?;
    let index = ElementIndex::from_reader(reader, source)?;
    debug!("Indexed {} leaf elements from {}", index.len(), source.display());

    let fields = Fields {
        index: &index,
        source: source.display().to_string(),
    };

    Ok(RunParametersData {
        scanner_id: fields.text(&paths.scanner_id)?,
        run_identifier: fields.text(&paths.run_identifier)?,
        run_start_date: fields.date(&paths.run_start_date)?,
        application_version: fields.text(&paths.application_version)?,
        rta_version: fields.text(&paths.rta_version)?,
        flowcell: fields.consumable(
            &paths.flowcell_part_no,
            &paths.flowcell_serial_no,
            &paths.flowcell_expire_date,
        )?,
        pr2: fields.consumable(
            &paths.pr2_part_no,
            &paths.pr2_serial_no,
            &paths.pr2_expire_date,
        )?,
        reagent: fields.consumable(
            &paths.reagent_part_no,
            &paths.reagent_serial_no,
            &paths.reagent_expire_date,
        )?,
        application_name: fields.optional(&paths.application_name).map(str::to_string),
        run_number: fields.optional(&paths.run_number).map(str::to_string),
        experiment_name: fields.optional(&paths.experiment_name).map(str::to_string),
    })
}

/// Parse a run parameters file with the built-in element paths
pub fn parse<P: AsRef<Path>>(path: P) -> Result<RunParametersData> {
    parse_with(path, &ElementPaths::default())
}

/// Parse a run parameters file with explicit element paths
pub fn parse_with<P: AsRef<Path>>(path: P, paths: &ElementPaths) -> Result<RunParametersData> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| RunLogError::io(path, e))?;
    let data = parse_reader(BufReader::new(file), path, paths)?;
    info!(
        "Parsed run parameters {} (run {} on {})",
        path.display(),
        data.run_identifier,
        data.scanner_id
    );
    Ok(data)
}
