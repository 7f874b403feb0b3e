use serde::{Deserialize, Serialize};

use crate::error::{Result, RunLogError};

/// Candidate element paths for each run parameters field.
///
/// Each entry is an ordered list of `Parent/Child` suffixes; the first
/// candidate present in the document supplies the value. The first
/// candidate is the name reported when none is found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementPaths {
    /// Instrument serial
    pub scanner_id: Vec<String>,
    /// Run identifier
    pub run_identifier: Vec<String>,
    /// Run start date
    pub run_start_date: Vec<String>,
    /// Control software version
    pub application_version: Vec<String>,
    /// RTA version
    pub rta_version: Vec<String>,

    /// Flowcell part number
    pub flowcell_part_no: Vec<String>,
    /// Flowcell serial number
    pub flowcell_serial_no: Vec<String>,
    /// Flowcell expiry date
    pub flowcell_expire_date: Vec<String>,

    /// PR2 bottle part number
    pub pr2_part_no: Vec<String>,
    /// PR2 bottle serial number
    pub pr2_serial_no: Vec<String>,
    /// PR2 bottle expiry date
    pub pr2_expire_date: Vec<String>,

    /// Reagent kit part number
    pub reagent_part_no: Vec<String>,
    /// Reagent kit serial number
    pub reagent_serial_no: Vec<String>,
    /// Reagent kit expiry date
    pub reagent_expire_date: Vec<String>,

    // Optional, summary only
    /// Control software name
    pub application_name: Vec<String>,
    /// Instrument run counter
    pub run_number: Vec<String>,
    /// Experiment name entered on the instrument
    pub experiment_name: Vec<String>,
}

fn paths(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

impl Default for ElementPaths {
    fn default() -> Self {
        Self {
            scanner_id: paths(&["ScannerID", "InstrumentID"]),
            run_identifier: paths(&["RunID", "RunId"]),
            run_start_date: paths(&["RunStartDate"]),
            application_version: paths(&["Setup/ApplicationVersion", "ApplicationVersion", "MCSVersion"]),
            rta_version: paths(&["RTAVersion", "RtaVersion"]),

            flowcell_part_no: paths(&["FlowcellRFIDTag/PartNumber"]),
            flowcell_serial_no: paths(&["FlowcellRFIDTag/SerialNumber"]),
            flowcell_expire_date: paths(&["FlowcellRFIDTag/ExpirationDate"]),

            pr2_part_no: paths(&["PR2BottleRFIDTag/PartNumber"]),
            pr2_serial_no: paths(&["PR2BottleRFIDTag/SerialNumber"]),
            pr2_expire_date: paths(&["PR2BottleRFIDTag/ExpirationDate"]),

            reagent_part_no: paths(&["ReagentKitRFIDTag/PartNumber"]),
            reagent_serial_no: paths(&["ReagentKitRFIDTag/SerialNumber"]),
            reagent_expire_date: paths(&["ReagentKitRFIDTag/ExpirationDate"]),

            application_name: paths(&["Setup/ApplicationName", "ApplicationName"]),
            run_number: paths(&["RunNumber"]),
            experiment_name: paths(&["ExperimentName"]),
        }
    }
}

impl ElementPaths {
    /// Required field lists, paired with the field they configure
    fn required(&self) -> [(&'static str, &[String]); 14] {
        [
            ("scanner_id", self.scanner_id.as_slice()),
            ("run_identifier", self.run_identifier.as_slice()),
            ("run_start_date", self.run_start_date.as_slice()),
            ("application_version", self.application_version.as_slice()),
            ("rta_version", self.rta_version.as_slice()),
            ("flowcell_part_no", self.flowcell_part_no.as_slice()),
            ("flowcell_serial_no", self.flowcell_serial_no.as_slice()),
            ("flowcell_expire_date", self.flowcell_expire_date.as_slice()),
            ("pr2_part_no", self.pr2_part_no.as_slice()),
            ("pr2_serial_no", self.pr2_serial_no.as_slice()),
            ("pr2_expire_date", self.pr2_expire_date.as_slice()),
            ("reagent_part_no", self.reagent_part_no.as_slice()),
            ("reagent_serial_no", self.reagent_serial_no.as_slice()),
            ("reagent_expire_date", self.reagent_expire_date.as_slice()),
        ]
    }

    /// Reject required path lists that could never match anything
    pub fn validate(&self) -> Result<()> {
        for (field, candidates) in self.required() {
            if candidates.iter().all(|c| c.trim().trim_matches('/').is_empty()) {
                return Err(RunLogError::ConfigError(format!(
                    "run parameters element list for '{}' is empty",
                    field
                )));
            }
        }
        Ok(())
    }
}
