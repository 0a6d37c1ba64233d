//! Workbook reader - spreadsheet sheets → row records

use crate::error::{ConvertError, ConvertResult};
use crate::types::{CellValue, RowRecord, SheetTable};
use calamine::{open_workbook_auto, CellErrorType, Data, Range, Reader, Sheets};
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Read-only handle on an open workbook.
///
/// The sheet-name list is read once on open and fixes the iteration order
/// for the whole run. Sheets are loaded one at a time on demand.
pub struct WorkbookReader {
    workbook: Sheets<BufReader<File>>,
    sheet_names: Vec<String>,
}

impl WorkbookReader {
    /// Open a workbook; the format is picked from the file extension
    pub fn open<P: AsRef<Path>>(path: P) -> ConvertResult<Self> {
        let path = path.as_ref();

        // Surface missing/unreadable files as access errors rather than as
        // format-specific parse failures
        File::open(path).map_err(|e| ConvertError::file_access(path, e))?;

        let workbook = open_workbook_auto(path).map_err(|e| {
            ConvertError::Parse(format!(
                "Failed to open workbook {}: {}",
                path.display(),
                e
            ))
        })?;
        let sheet_names = workbook.sheet_names().to_vec();

        debug!(path = %path.display(), sheets = sheet_names.len(), "opened workbook");

        Ok(Self {
            workbook,
            sheet_names,
        })
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    /// Load one sheet into memory
    pub fn load_sheet(&mut self, sheet_name: &str) -> ConvertResult<SheetTable> {
        if !self.sheet_names.iter().any(|name| name == sheet_name) {
            return Err(ConvertError::SheetNotFound(sheet_name.to_string()));
        }

        let range = self.workbook.worksheet_range(sheet_name).map_err(|e| {
            ConvertError::Parse(format!("Failed to read sheet '{}': {}", sheet_name, e))
        })?;

        let table = build_table(sheet_name, &range)?;
        debug!(
            sheet = sheet_name,
            columns = table.column_count(),
            rows = table.row_count(),
            "loaded sheet"
        );
        Ok(table)
    }
}

/// Materialize a cell range: first row is the header, the rest are records.
///
/// Columns always start at A, even when the used range starts further
/// right; leading blank columns come out as `Unnamed: <n>` with null values.
pub(crate) fn build_table(sheet_name: &str, range: &Range<Data>) -> ConvertResult<SheetTable> {
    let mut table = SheetTable::new(sheet_name);

    let (first_row, last_row, last_col) = match (range.start(), range.end()) {
        (Some((first_row, _)), Some((last_row, last_col))) => (first_row, last_row, last_col),
        _ => return Ok(table),
    };

    let mut raw_headers = Vec::with_capacity(last_col as usize + 1);
    for col in 0..=last_col {
        let value = value_at(range, first_row, col)
            .map_err(|reason| cell_error(sheet_name, first_row, col, &reason))?;
        let name = match value.to_header() {
            Some(name) if !name.is_empty() => name,
            _ => format!("Unnamed: {}", col),
        };
        raw_headers.push(name);
    }
    table.headers = dedupe_headers(raw_headers);

    for row in (first_row + 1)..=last_row {
        let mut values = Vec::with_capacity(table.headers.len());
        for col in 0..=last_col {
            let value = value_at(range, row, col)
                .map_err(|reason| cell_error(sheet_name, row, col, &reason))?;
            values.push(value);
        }
        if values.iter().all(CellValue::is_null) {
            continue;
        }

        let mut record = RowRecord::with_capacity(values.len());
        for (header, value) in table.headers.iter().zip(values) {
            record.push(header.clone(), value);
        }
        table.rows.push(record);
    }

    Ok(table)
}

/// Cell at an absolute position; anything outside the used range is empty
fn value_at(range: &Range<Data>, row: u32, col: u32) -> Result<CellValue, String> {
    match range.get_value((row, col)) {
        Some(cell) => cell_value(cell),
        None => Ok(CellValue::Null),
    }
}

/// Map a calamine cell onto the tagged cell model
fn cell_value(cell: &Data) -> Result<CellValue, String> {
    match cell {
        Data::Empty => Ok(CellValue::Null),
        Data::Int(i) => Ok(CellValue::Int(*i)),
        Data::Float(f) => {
            if f.is_finite() {
                Ok(CellValue::from_number(*f))
            } else {
                Err(format!("non-finite number {}", f))
            }
        }
        Data::String(s) if s.is_empty() => Ok(CellValue::Null),
        Data::String(s) => Ok(CellValue::Text(s.clone())),
        Data::Bool(b) => Ok(CellValue::Bool(*b)),
        Data::DateTime(dt) => {
            if dt.is_duration() {
                dt.as_duration()
                    .map(CellValue::Duration)
                    .ok_or_else(|| format!("duration {} out of range", dt.as_f64()))
            } else {
                dt.as_datetime()
                    .map(CellValue::DateTime)
                    .ok_or_else(|| format!("date serial {} out of range", dt.as_f64()))
            }
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => Ok(CellValue::Text(s.clone())),
        Data::Error(CellErrorType::NA) => Ok(CellValue::Null),
        Data::Error(e) => Err(format!("error value {} has no JSON representation", e)),
    }
}

fn cell_error(sheet_name: &str, row: u32, col: u32, reason: &str) -> ConvertError {
    ConvertError::Serialization(format!(
        "sheet '{}', cell {}{}: {}",
        sheet_name,
        number_to_column_letter(col as usize),
        row + 1,
        reason
    ))
}

/// Make header names unique: repeats become `name.1`, `name.2`, ...
fn dedupe_headers(names: Vec<String>) -> Vec<String> {
    let originals: HashSet<String> = names.iter().cloned().collect();
    let mut taken: HashSet<String> = HashSet::with_capacity(names.len());
    let mut counters: HashMap<String, usize> = HashMap::new();
    let mut result = Vec::with_capacity(names.len());

    for name in names {
        if taken.insert(name.clone()) {
            result.push(name);
            continue;
        }

        let counter = counters.entry(name.clone()).or_insert(0);
        let unique = loop {
            *counter += 1;
            let candidate = format!("{}.{}", name, counter);
            if !taken.contains(&candidate) && !originals.contains(&candidate) {
                break candidate;
            }
        };
        taken.insert(unique.clone());
        result.push(unique);
    }

    result
}

/// Convert column index to Excel column letter (0→A, 1→B, 25→Z, 26→AA, etc.)
fn number_to_column_letter(n: usize) -> String {
    let mut result = String::new();
    let mut num = n;

    loop {
        let remainder = num % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if num < 26 {
            break;
        }
        num = num / 26 - 1;
    }

    result
}
