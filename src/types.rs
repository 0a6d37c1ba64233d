use chrono::{NaiveDateTime, TimeDelta, Timelike};
use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};

/// Largest integer an f64 holds exactly (2^53)
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

//==============================================================================
// Cell Values
//==============================================================================

/// A single spreadsheet cell, tagged by its native type
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    DateTime(NaiveDateTime),
    Duration(TimeDelta),
}

impl CellValue {
    /// Build a numeric cell, collapsing integral floats to integers.
    ///
    /// Spreadsheets store every number as a double, so `3` in a cell reads
    /// back as `3.0`. Values with no fractional part that fit exactly in an
    /// f64 mantissa are emitted as JSON integers.
    pub fn from_number(n: f64) -> Self {
        if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_EXACT_INT {
            CellValue::Int(n as i64)
        } else {
            CellValue::Float(n)
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Text form used when a cell appears in the header row
    pub fn to_header(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::Bool(b) => Some(b.to_string()),
            CellValue::Int(i) => Some(i.to_string()),
            CellValue::Float(f) => Some(f.to_string()),
            CellValue::Text(s) => Some(s.clone()),
            CellValue::DateTime(dt) => Some(format_datetime(dt)),
            CellValue::Duration(d) => Some(d.to_string()),
        }
    }
}

/// ISO-8601 without zone; milliseconds only when present
pub fn format_datetime(dt: &NaiveDateTime) -> String {
    let base = dt.format("%Y-%m-%dT%H:%M:%S").to_string();
    let millis = dt.nanosecond() / 1_000_000;
    if millis == 0 {
        base
    } else {
        format!("{}.{:03}", base, millis)
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Null => serializer.serialize_none(),
            CellValue::Bool(b) => serializer.serialize_bool(*b),
            CellValue::Int(i) => serializer.serialize_i64(*i),
            CellValue::Float(f) => {
                if !f.is_finite() {
                    return Err(S::Error::custom(format!(
                        "non-finite number {} has no JSON representation",
                        f
                    )));
                }
                serializer.serialize_f64(*f)
            }
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::DateTime(dt) => serializer.serialize_str(&format_datetime(dt)),
            CellValue::Duration(d) => serializer.serialize_str(&d.to_string()),
        }
    }
}

//==============================================================================
// Rows and Sheets
//==============================================================================

/// One sheet row: column header → cell, in header order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowRecord {
    fields: Vec<(String, CellValue)>,
}

impl RowRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, key: impl Into<String>, value: CellValue) {
        self.fields.push((key.into(), value));
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for RowRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// A fully loaded worksheet
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTable {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<RowRecord>,
}

impl SheetTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            headers: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}
