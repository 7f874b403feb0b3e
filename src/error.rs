//! Error types for run parsing and audit log writes

use std::path::PathBuf;

/// Errors that can occur while auditing a sequencing run
#[derive(Debug, thiserror::Error)]
pub enum RunLogError {
    /// File missing, unreadable or unwritable
    #[error("I/O error on {}: {source}", .path.display())]
    IoError {
        /// File being read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Run parameters document is not well-formed XML
    #[error("XML parsing error in {}: {message}", .path.display())]
    XmlParseError {
        /// Document being parsed
        path: PathBuf,
        /// Parser or structure error description
        message: String,
    },

    /// Sample sheet CSV could not be tokenised
    #[error("CSV parsing error in {}: {source}", .path.display())]
    CsvError {
        /// Sample sheet being parsed
        path: PathBuf,
        /// Underlying CSV error
        #[source]
        source: csv::Error,
    },

    /// Required header key or XML element is absent
    #[error("Missing required field '{field}' in {source_file}")]
    MissingFieldError {
        /// File the field was expected in
        source_file: String,
        /// Header key or element path
        field: String,
    },

    /// Date token could not be parsed into a calendar date
    #[error("Invalid date for '{field}' in {source_file}: '{value}'")]
    DateFormatError {
        /// File the date was read from
        source_file: String,
        /// Header key or element path
        field: String,
        /// Offending token
        value: String,
    },

    /// Non-date value that failed to parse
    #[error("Invalid value for '{field}' in {source_file}: '{value}' ({reason})")]
    InvalidValue {
        /// File the value was read from or destined for
        source_file: String,
        /// Field or section name
        field: String,
        /// Offending value
        value: String,
        /// Why the value was rejected
        reason: String,
    },

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unusable alias or element-path configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Error returned by the two file parsers
pub type ParseError = RunLogError;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, RunLogError>;

impl RunLogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn xml(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::XmlParseError {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn missing(source_file: &str, field: &str) -> Self {
        Self::MissingFieldError {
            source_file: source_file.to_string(),
            field: field.to_string(),
        }
    }

    pub(crate) fn date(source_file: &str, field: &str, value: &str) -> Self {
        Self::DateFormatError {
            source_file: source_file.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub(crate) fn invalid(source_file: &str, field: &str, value: &str, reason: impl ToString) -> Self {
        Self::InvalidValue {
            source_file: source_file.to_string(),
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}
