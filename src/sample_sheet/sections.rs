use std::collections::HashMap;
use std::io::Read;
use std::path::PathBuf;

use log::{debug, warn};

use super::{DataTable, SampleSheet};
use crate::error::{Result, RunLogError};

/// Section currently being read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    /// Rows before the first `[...]` tag
    Preamble,
    Header,
    Reads,
    Settings,
    Data,
    /// Any other tagged section (e.g. `[Manifests]`)
    Other,
}

impl Section {
    fn from_tag(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "header" => Section::Header,
            "reads" => Section::Reads,
            "settings" => Section::Settings,
            "data" => Section::Data,
            _ => Section::Other,
        }
    }
}

/// Extract the section name from a `[Name]` tag cell
fn section_tag(cell: &str) -> Option<&str> {
    let cell = cell.trim();
    let inner = cell.strip_prefix('[')?;
    let end = inner.find(']')?;
    Some(&inner[..end])
}

/// Cells of a record with trailing padding cells removed.
///
/// Cell text is kept verbatim; only blank padding is dropped.
fn significant_cells(record: &csv::StringRecord) -> Vec<&str> {
    let mut cells: Vec<&str> = record.iter().collect();
    while cells.last().is_some_and(|c| c.trim().is_empty()) {
        cells.pop();
    }
    if let Some(first) = cells.first_mut() {
        *first = first.trim_start_matches('\u{feff}');
    }
    cells
}

impl SampleSheet {
    /// Split a sample sheet into its sections
    pub(super) fn read<R: Read>(reader: R, source: PathBuf) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::None)
            .from_reader(reader);

        let mut sheet = SampleSheet {
            source,
            header: HashMap::new(),
            reads: Vec::new(),
            settings: HashMap::new(),
            data: DataTable::default(),
            sections: Vec::new(),
        };

        let mut section = Section::Preamble;
        let mut data_columns_seen = false;

        for record in csv_reader.records() {
            let record = record.map_err(|e| RunLogError::CsvError {
                path: sheet.source.clone(),
                source: e,
            })?;
            let cells = significant_cells(&record);
            if cells.is_empty() {
                continue;
            }

            if let Some(name) = section_tag(cells[0]) {
                section = Section::from_tag(name);
                if section == Section::Other {
                    debug!("Skipping unrecognised sample sheet section [{}]", name);
                }
                sheet.sections.push(name.to_string());
                continue;
            }

            match section {
                Section::Header => insert_pair(&mut sheet.header, &cells, "Header"),
                Section::Settings => insert_pair(&mut sheet.settings, &cells, "Settings"),
                Section::Reads => {
                    let value = cells[0].trim();
                    let cycles = value.parse::<u32>().map_err(|e| {
                        RunLogError::invalid(&sheet.source.display().to_string(), "Reads", value, e)
                    })?;
                    sheet.reads.push(cycles);
                }
                Section::Data => {
                    let row: Vec<String> = cells.iter().map(|c| c.to_string()).collect();
                    if data_columns_seen {
                        sheet.data.rows.push(row);
                    } else {
                        sheet.data.columns = row;
                        data_columns_seen = true;
                    }
                }
                Section::Preamble => {
                    warn!("Ignoring sample sheet row outside any section: {:?}", cells);
                }
                Section::Other => {}
            }
        }

        Ok(sheet)
    }
}

/// Keys are trimmed, values kept as written
fn insert_pair(map: &mut HashMap<String, String>, cells: &[&str], section: &str) {
    let key = cells[0].trim();
    if key.is_empty() {
        return;
    }
    let value = cells.get(1).copied().unwrap_or_default();

    if let Some(existing) = map.get(key) {
        warn!(
            "Duplicate key '{}' in [{}] section; keeping '{}' and ignoring '{}'",
            key, section, existing, value
        );
        return;
    }
    map.insert(key.to_string(), value.to_string());
}
