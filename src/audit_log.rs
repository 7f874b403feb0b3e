//! Append-only tab-separated audit log.
//!
//! The log is a plain text file: an optional header line written when the
//! file is created, followed by one line per audited run. Existing content
//! is never rewritten.
//!
//! Concurrent writers are not coordinated; the log assumes one invocation
//! at a time per file.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::error::{Result, RunLogError};

/// Default log file name, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "RunLog.txt";

/// What an append did to the log file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The file did not exist; it was created and the header written first
    Created,
    /// The record was appended to an existing file
    Appended,
}

/// Handle on an audit log file
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

fn terminated(line: &str) -> String {
    let mut line = line.trim_end_matches(['\r', '\n']).to_string();
    line.push('\n');
    line
}

impl AuditLog {
    /// Create a handle; nothing is opened until [`AuditLog::append`]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record line.
    ///
    /// If the file does not exist yet it is created and `header` (when given)
    /// is written before the record. Header and record go out in a single
    /// write; if that write fails the file is restored to its previous length
    /// so no partial line remains. An existing log whose last line lacks its
    /// newline is terminated first so the new record starts on its own line.
    pub fn append(&self, header: Option<&str>, record: &str) -> Result<AppendOutcome> {
        let record = terminated(record);
        if record.trim_end_matches('\n').contains('\n') {
            return Err(RunLogError::invalid(
                &self.path.display().to_string(),
                "record",
                &record,
                "audit records must be a single line",
            ));
        }

        let (mut file, outcome) = self.open()?;

        let original_len = match outcome {
            AppendOutcome::Created => 0,
            AppendOutcome::Appended => file
                .metadata()
                .map_err(|e| RunLogError::io(&self.path, e))?
                .len(),
        };

        let mut buffer = String::new();
        match outcome {
            AppendOutcome::Created => {
                if let Some(header) = header {
                    buffer.push_str(&terminated(header));
                }
            }
            AppendOutcome::Appended => {
                if original_len > 0 && !self.ends_with_newline(&mut file, original_len)? {
                    warn!(
                        "Audit log {} does not end with a newline; terminating its last line",
                        self.path.display()
                    );
                    buffer.push('\n');
                }
            }
        }
        buffer.push_str(&record);

        self.commit(&file, &file, outcome, original_len, buffer.as_bytes())?;

        match outcome {
            AppendOutcome::Created => info!("Created audit log {}", self.path.display()),
            AppendOutcome::Appended => debug!("Appended to audit log {}", self.path.display()),
        }
        Ok(outcome)
    }

    /// Open for append, creating the file if needed.
    ///
    /// `create_new` makes the existence check and the creation one step, so
    /// the header decision cannot go stale between the two.
    fn open(&self) -> Result<(File, AppendOutcome)> {
        match OpenOptions::new().append(true).create_new(true).open(&self.path) {
            Ok(file) => Ok((file, AppendOutcome::Created)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                let file = OpenOptions::new()
                    .read(true)
                    .append(true)
                    .open(&self.path)
                    .map_err(|e| RunLogError::io(&self.path, e))?;
                Ok((file, AppendOutcome::Appended))
            }
            Err(e) => Err(RunLogError::io(&self.path, e)),
        }
    }

    fn ends_with_newline(&self, file: &mut File, len: u64) -> Result<bool> {
        let mut last = [0u8; 1];
        file.seek(SeekFrom::Start(len - 1))
            .and_then(|_| file.read_exact(&mut last))
            .map_err(|e| RunLogError::io(&self.path, e))?;
        Ok(last[0] == b'\n')
    }

    /// Write `bytes` through `writer` and sync `file`, rolling back on failure
    fn commit<W: Write>(
        &self,
        file: &File,
        mut writer: W,
        outcome: AppendOutcome,
        original_len: u64,
        bytes: &[u8],
    ) -> Result<()> {
        if let Err(e) = writer
            .write_all(bytes)
            .and_then(|_| writer.flush())
            .and_then(|_| file.sync_data())
        {
            self.roll_back(file, outcome, original_len);
            return Err(RunLogError::io(&self.path, e));
        }
        Ok(())
    }

    fn roll_back(&self, file: &File, outcome: AppendOutcome, original_len: u64) {
        let restored = match outcome {
            // a leftover empty file would suppress the header next time
            AppendOutcome::Created => fs::remove_file(&self.path),
            AppendOutcome::Appended => file.set_len(original_len),
        };
        if let Err(e) = restored {
            warn!(
                "Could not roll back partial write to {}: {}",
                self.path.display(),
                e
            );
        }
    }

    /// Data lines of the log, split into columns.
    ///
    /// A first line equal to `header` is skipped. A missing file reads as empty.
    pub fn read_records(&self, header: Option<&str>) -> Result<Vec<Vec<String>>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(RunLogError::io(&self.path, e)),
        };
        let header = header.map(|h| h.trim_end_matches(['\r', '\n']));

        let mut records = Vec::new();
        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| RunLogError::io(&self.path, e))?;
            if line_num == 0 && header == Some(line.as_str()) {
                continue;
            }
            if line.trim().is_empty() {
                continue;
            }
            records.push(line.split('\t').map(str::to_string).collect());
        }
        Ok(records)
    }
}

/// Append `record` to the log at `path`, writing `header` first if the file is new
pub fn append<P: AsRef<Path>>(path: P, header: Option<&str>, record: &str) -> Result<AppendOutcome> {
    AuditLog::new(path.as_ref()).append(header, record)
}
