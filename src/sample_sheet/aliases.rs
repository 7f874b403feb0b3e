use serde::{Deserialize, Serialize};

use crate::dates::DEFAULT_SHEET_DATE_FORMATS;
use crate::error::{Result, RunLogError};

/// Header key spellings recognised for each logical sample sheet field.
///
/// Keys are matched case-sensitively; the first spelling present in the
/// `[Header]` section wins. The first spelling of each list is the name
/// reported when none is found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldAliases {
    /// Keys for the application
    pub application: Vec<String>,
    /// Keys for the assay / library prep kit
    pub assay: Vec<String>,
    /// Keys for the chemistry
    pub chemistry: Vec<String>,
    /// Keys for the sheet date
    pub date: Vec<String>,
    /// Keys for the description
    pub description: Vec<String>,
    /// Keys for the experiment name
    pub experiment_name: Vec<String>,
    /// Keys for the investigator name
    pub investigator_name: Vec<String>,
    /// Keys for the workflow
    pub workflow: Vec<String>,
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

impl Default for FieldAliases {
    fn default() -> Self {
        Self {
            application: names(&["Application"]),
            // IEM v5 split "Assay" into "Library Prep Kit" and "Index Adapters"
            assay: names(&["Assay", "Library Prep Kit"]),
            chemistry: names(&["Chemistry"]),
            date: names(&["Date"]),
            description: names(&["Description"]),
            experiment_name: names(&["Experiment Name", "ExperimentName"]),
            investigator_name: names(&["Investigator Name", "InvestigatorName"]),
            workflow: names(&["Workflow", "Analysis Workflow"]),
        }
    }
}

impl FieldAliases {
    /// Every alias list, paired with the logical field it configures
    pub fn entries(&self) -> [(&'static str, &[String]); 8] {
        [
            ("application", self.application.as_slice()),
            ("assay", self.assay.as_slice()),
            ("chemistry", self.chemistry.as_slice()),
            ("date", self.date.as_slice()),
            ("description", self.description.as_slice()),
            ("experiment_name", self.experiment_name.as_slice()),
            ("investigator_name", self.investigator_name.as_slice()),
            ("workflow", self.workflow.as_slice()),
        ]
    }

    /// Reject alias lists that could never match anything
    pub fn validate(&self) -> Result<()> {
        for (field, aliases) in self.entries() {
            if aliases.iter().all(|a| a.trim().is_empty()) {
                return Err(RunLogError::ConfigError(format!(
                    "sample sheet alias list for '{}' is empty",
                    field
                )));
            }
        }
        Ok(())
    }
}

/// Options controlling how a sample sheet is interpreted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleSheetOptions {
    /// strftime patterns tried in order for the `Date` header field
    pub date_formats: Vec<String>,

    /// Recognised header key spellings
    pub aliases: FieldAliases,
}

impl Default for SampleSheetOptions {
    fn default() -> Self {
        Self {
            date_formats: names(DEFAULT_SHEET_DATE_FORMATS),
            aliases: FieldAliases::default(),
        }
    }
}

impl SampleSheetOptions {
    /// Check that the options can be used for parsing
    pub fn validate(&self) -> Result<()> {
        if self.date_formats.is_empty() {
            return Err(RunLogError::ConfigError(
                "sample sheet date_formats is empty".to_string(),
            ));
        }
        self.aliases.validate()
    }
}
