//! Dataset loader: delimited bytes → case table.

use crate::core::coerce::coerce_column;
use crate::errors::LoadError;
use crate::models::table::{CaseTable, Cell};
use csv::{ByteRecord, ReaderBuilder};
use std::collections::HashSet;
use tracing::{debug, info};

/// Options the loader needs from the configuration.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub delimiter: u8,
    /// Columns coerced to dates right after parsing, when present.
    pub date_columns: Vec<String>,
}

impl LoadOptions {
    pub fn new(delimiter: u8, date_columns: Vec<String>) -> Self {
        Self {
            delimiter,
            date_columns,
        }
    }
}

/// Parse `bytes` into a case table.
///
/// The first record is the header. Records shorter than the header are padded
/// with missing values; longer ones make the whole load fail. Values in the
/// configured date columns that do not parse become missing.
pub fn load_bytes(bytes: &[u8], opts: &LoadOptions) -> Result<CaseTable, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(opts.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let header = rdr.byte_headers().map_err(csv_error)?.clone();
    let columns = decode_header(&header)?;
    let width = columns.len();

    let mut rows = Vec::new();
    for result in rdr.byte_records() {
        let record = result.map_err(csv_error)?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() > width {
            return Err(LoadError::Malformed {
                line,
                expected: width,
                found: record.len(),
            });
        }

        let mut row = Vec::with_capacity(width);
        for field in record.iter() {
            let text = std::str::from_utf8(field).map_err(|_| LoadError::Encoding { line })?;
            row.push(if text.is_empty() {
                Cell::Missing
            } else {
                Cell::Raw(text.to_string())
            });
        }
        row.resize(width, Cell::Missing);
        rows.push(row);
    }

    let mut table = CaseTable::new(columns, rows);

    for name in &opts.date_columns {
        if !coerce_column(&mut table, name) {
            debug!(column = %name, "date column not present in header");
        }
    }

    info!(
        rows = table.len(),
        columns = table.columns().len(),
        date_columns = table.date_columns().len(),
        "dataset loaded"
    );

    Ok(table)
}

fn decode_header(header: &ByteRecord) -> Result<Vec<String>, LoadError> {
    if header.is_empty() || header.iter().all(|f| f.is_empty()) {
        return Err(LoadError::MissingHeader);
    }

    let mut seen = HashSet::new();
    let mut columns = Vec::with_capacity(header.len());

    for (i, field) in header.iter().enumerate() {
        let name = std::str::from_utf8(field).map_err(|_| LoadError::Encoding { line: 1 })?;
        let name = if i == 0 {
            name.trim_start_matches('\u{feff}')
        } else {
            name
        };

        if !seen.insert(name.to_string()) {
            return Err(LoadError::DuplicateColumn(name.to_string()));
        }
        columns.push(name.to_string());
    }

    Ok(columns)
}

fn csv_error(e: csv::Error) -> LoadError {
    LoadError::Csv(e.to_string())
}
