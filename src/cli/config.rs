//! TOML configuration file support.
//!
//! Every table is optional; omitted keys keep the built-in defaults.
//!
//! ```toml
//! # runlog.toml
//! [audit_log]
//! path = "/data/audit/RunLog.txt"
//!
//! [sample_sheet]
//! date_formats = ["%d/%m/%Y", "%Y-%m-%d"]
//!
//! [sample_sheet.aliases]
//! assay = ["Assay", "Library Prep Kit", "Index Adapters"]
//!
//! [run_parameters.elements]
//! scanner_id = ["ScannerID", "InstrumentID", "InstrumentName"]
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use runlog::audit::ParseOptions;
use runlog::run_parameters::ElementPaths;
use runlog::sample_sheet::SampleSheetOptions;

/// Root configuration structure for runlog.toml files.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Audit log settings.
    #[serde(default)]
    pub audit_log: AuditLogConfig,

    /// Sample sheet key aliases and date formats.
    #[serde(default)]
    pub sample_sheet: SampleSheetOptions,

    /// Run parameters element paths.
    #[serde(default)]
    pub run_parameters: RunParametersConfig,
}

/// Where the audit log lives.
#[derive(Debug, Default, Deserialize)]
pub struct AuditLogConfig {
    /// Log file path; defaults to RunLog.txt in the working directory.
    pub path: Option<PathBuf>,
}

/// Run parameters settings.
#[derive(Debug, Default, Deserialize)]
pub struct RunParametersConfig {
    /// Candidate element paths per field.
    #[serde(default)]
    pub elements: ElementPaths,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML configuration")?;
        config
            .sample_sheet
            .validate()
            .context("Invalid [sample_sheet] configuration")?;
        config
            .run_parameters
            .elements
            .validate()
            .context("Invalid [run_parameters] configuration")?;
        Ok(config)
    }

    /// Parser options for both input files.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            sample_sheet: self.sample_sheet.clone(),
            run_parameters: self.run_parameters.elements.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [audit_log]
            path = "/tmp/RunLog.txt"

            [sample_sheet]
            date_formats = ["%Y-%m-%d"]

            [sample_sheet.aliases]
            assay = ["Assay", "Index Adapters"]

            [run_parameters.elements]
            scanner_id = ["InstrumentName"]
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.audit_log.path, Some(PathBuf::from("/tmp/RunLog.txt")));
        assert_eq!(config.sample_sheet.date_formats, vec!["%Y-%m-%d"]);
        assert_eq!(config.sample_sheet.aliases.assay, vec!["Assay", "Index Adapters"]);
        // untouched lists keep their defaults
        assert_eq!(config.sample_sheet.aliases.workflow[0], "Workflow");
        assert_eq!(config.run_parameters.elements.scanner_id, vec!["InstrumentName"]);
        assert_eq!(config.run_parameters.elements.run_identifier[0], "RunID");
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.audit_log.path, None);
        assert_eq!(config.parse_options(), ParseOptions::default());
    }

    #[test]
    fn test_empty_alias_list_rejected() {
        let toml = r#"
            [sample_sheet.aliases]
            chemistry = []
        "#;
        assert!(Config::from_str(toml).is_err());
    }

    #[test]
    fn test_unknown_table_rejected() {
        assert!(Config::from_str("[conversion]\nlegacy = true\n").is_err());
    }
}
