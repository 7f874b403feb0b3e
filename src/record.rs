//! Composition of one audit log line from the two parsed run descriptions.
//!
//! Column order is fixed; the log is a flat tab-separated table that is
//! only ever appended to, so reordering columns would corrupt history.

use serde::{Deserialize, Serialize};

use crate::dates::format_date;
use crate::error::Result;
use crate::run_parameters::RunParametersData;
use crate::sample_sheet::SampleSheetData;

/// Column names of the audit log, in order
pub const COLUMNS: [&str; 24] = [
    "Instrument",
    "RunId",
    "RunStartDate",
    "Application",
    "Assay",
    "Chemistry",
    "Read1Cycles",
    "Read2Cycles",
    "SampleSheetDate",
    "Description",
    "ExperimentName",
    "InvestigatorName",
    "Workflow",
    "MCSVersion",
    "RTAVersion",
    "FlowcellPartNo",
    "FlowcellSerialNo",
    "FlowcellExpireDate",
    "PR2PartNo",
    "PR2SerialNo",
    "PR2ExpiryDate",
    "ReagentPartNo",
    "ReagentSerialNo",
    "ReagentExpiryDate",
];

/// Number of columns in every audit log line
pub const COLUMN_COUNT: usize = COLUMNS.len();

/// Header line written once when the audit log is created
pub fn header_line() -> String {
    let mut line = COLUMNS.join("\t");
    line.push('\n');
    line
}

/// One audit log row, every value already rendered as text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// `Instrument` column
    pub instrument: String,
    /// `RunId` column
    pub run_id: String,
    /// `RunStartDate` column
    pub run_start_date: String,
    /// `Application` column
    pub application: String,
    /// `Assay` column
    pub assay: String,
    /// `Chemistry` column
    pub chemistry: String,
    /// `Read1Cycles` column
    pub read1_cycles: String,
    /// `Read2Cycles` column
    pub read2_cycles: String,
    /// `SampleSheetDate` column
    pub sample_sheet_date: String,
    /// `Description` column
    pub description: String,
    /// `ExperimentName` column
    pub experiment_name: String,
    /// `InvestigatorName` column
    pub investigator_name: String,
    /// `Workflow` column
    pub workflow: String,
    /// `MCSVersion` column
    pub mcs_version: String,
    /// `RTAVersion` column
    pub rta_version: String,
    /// `FlowcellPartNo` column
    pub flowcell_part_no: String,
    /// `FlowcellSerialNo` column
    pub flowcell_serial_no: String,
    /// `FlowcellExpireDate` column
    pub flowcell_expire_date: String,
    /// `PR2PartNo` column
    pub pr2_part_no: String,
    /// `PR2SerialNo` column
    pub pr2_serial_no: String,
    /// `PR2ExpiryDate` column
    pub pr2_expiry_date: String,
    /// `ReagentPartNo` column
    pub reagent_part_no: String,
    /// `ReagentSerialNo` column
    pub reagent_serial_no: String,
    /// `ReagentExpiryDate` column
    pub reagent_expiry_date: String,
}

/// Replace characters that would break the line or column structure
fn cell(value: &str) -> String {
    value
        .chars()
        .map(|c| if matches!(c, '\t' | '\r' | '\n') { ' ' } else { c })
        .collect()
}

impl AuditRecord {
    /// Build a record from both parsed files
    pub fn new(sheet: &SampleSheetData, run: &RunParametersData) -> Self {
        Self {
            instrument: cell(&run.scanner_id),
            run_id: cell(&run.run_identifier),
            run_start_date: format_date(run.run_start_date),
            application: cell(&sheet.application),
            assay: cell(&sheet.assay),
            chemistry: cell(&sheet.chemistry),
            read1_cycles: sheet.cycles_read1.to_string(),
            read2_cycles: sheet.cycles_read2.to_string(),
            sample_sheet_date: format_date(sheet.date),
            description: cell(&sheet.description),
            experiment_name: cell(&sheet.experiment_name),
            investigator_name: cell(&sheet.investigator_name),
            workflow: cell(&sheet.workflow),
            mcs_version: cell(&run.application_version),
            rta_version: cell(&run.rta_version),
            flowcell_part_no: cell(&run.flowcell.part_number),
            flowcell_serial_no: cell(&run.flowcell.serial_number),
            flowcell_expire_date: format_date(run.flowcell.expiration_date),
            pr2_part_no: cell(&run.pr2.part_number),
            pr2_serial_no: cell(&run.pr2.serial_number),
            pr2_expiry_date: format_date(run.pr2.expiration_date),
            reagent_part_no: cell(&run.reagent.part_number),
            reagent_serial_no: cell(&run.reagent.serial_number),
            reagent_expiry_date: format_date(run.reagent.expiration_date),
        }
    }

    /// Values in column order
    pub fn fields(&self) -> [&str; COLUMN_COUNT] {
        [
            self.instrument.as_str(),
            self.run_id.as_str(),
            self.run_start_date.as_str(),
            self.application.as_str(),
            self.assay.as_str(),
            self.chemistry.as_str(),
            self.read1_cycles.as_str(),
            self.read2_cycles.as_str(),
            self.sample_sheet_date.as_str(),
            self.description.as_str(),
            self.experiment_name.as_str(),
            self.investigator_name.as_str(),
            self.workflow.as_str(),
            self.mcs_version.as_str(),
            self.rta_version.as_str(),
            self.flowcell_part_no.as_str(),
            self.flowcell_serial_no.as_str(),
            self.flowcell_expire_date.as_str(),
            self.pr2_part_no.as_str(),
            self.pr2_serial_no.as_str(),
            self.pr2_expiry_date.as_str(),
            self.reagent_part_no.as_str(),
            self.reagent_serial_no.as_str(),
            self.reagent_expiry_date.as_str(),
        ]
    }

    /// Tab-separated line terminated by a single newline
    pub fn to_line(&self) -> String {
        let mut line = self.fields().join("\t");
        line.push('\n');
        line
    }

    /// Column name / value pairs in column order
    pub fn pairs(&self) -> impl Iterator<Item = (&'static str, &str)> {
        COLUMNS.into_iter().zip(self.fields())
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Compose the audit log line for one run
pub fn compose(sheet: &SampleSheetData, run: &RunParametersData) -> String {
    AuditRecord::new(sheet, run).to_line()
}
