use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;

use crate::config::NameTagConfig;
use crate::error::AppError;

/// One attendee, taken from a single row of the input table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendeeRecord {
    pub display_name: String,
    pub handle: String,
}

/// Row as it comes out of the CSV reader, keyed by header name
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct RosterRow(HashMap<String, Option<String>>);

/// Reads every attendee from the CSV at `path`, preserving row order.
///
/// The table must have a header row containing the configured name and
/// handle columns. A missing column or a blank value in either field fails
/// the whole load; nothing is skipped.
pub fn load_roster(path: &str, config: &NameTagConfig) -> Result<Vec<AttendeeRecord>, AppError> {
    let file = File::open(path).map_err(|e| AppError::Input(format!("{}: {}", path, e)))?;
    read_roster(file, config)
}

pub fn read_roster<R: std::io::Read>(
    source: R,
    config: &NameTagConfig,
) -> Result<Vec<AttendeeRecord>, AppError> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(source);

    // Spreadsheet exports often prefix the first header with a byte order mark
    let headers: csv::StringRecord = reader
        .headers()
        .map_err(|e| AppError::Input(format!("Invalid header row: {}", e)))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}'))
        .collect();
    for column in [&config.name_column, &config.handle_column] {
        if !headers.iter().any(|h| h == column.as_str()) {
            return Err(AppError::Input(format!("Missing required column \"{}\"", column)));
        }
    }
    reader.set_headers(headers);

    let mut records = Vec::new();
    for (index, result) in reader.deserialize::<RosterRow>().enumerate() {
        // Header is line 1
        let line = index + 2;
        let RosterRow(mut row) =
            result.map_err(|e| AppError::Input(format!("Row {}: {}", line, e)))?;

        let mut field = |column: &str| -> Result<String, AppError> {
            match row.remove(column).flatten() {
                Some(value) if !value.trim().is_empty() => Ok(value),
                _ => Err(AppError::Input(format!("Row {}: missing \"{}\"", line, column))),
            }
        };
        let display_name = field(config.name_column.as_str())?;
        let handle = field(config.handle_column.as_str())?;

        records.push(AttendeeRecord {
            display_name,
            handle,
        });
    }

    Ok(records)
}
