//! JSON output for converted sheets

use crate::error::{ConvertError, ConvertResult};
use crate::types::RowRecord;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::Path;

const INDENT: &[u8] = b"  ";

/// Render records as a pretty-printed JSON array.
///
/// Two-space indent, keys in header order, non-ASCII text kept as literal
/// UTF-8. No trailing newline. An empty slice renders as `[]`.
pub fn to_json_string(records: &[RowRecord]) -> ConvertResult<String> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    records
        .serialize(&mut serializer)
        .map_err(|e| ConvertError::Serialization(e.to_string()))?;

    // serde_json only ever emits valid UTF-8
    String::from_utf8(buf).map_err(|e| ConvertError::Serialization(e.to_string()))
}

/// Serialize records and write them to `path`, replacing any existing file
pub fn write_records(path: &Path, records: &[RowRecord]) -> ConvertResult<()> {
    let json = to_json_string(records)?;
    fs::write(path, json).map_err(|e| ConvertError::file_access(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellValue;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn record(fields: Vec<(&str, CellValue)>) -> RowRecord {
        let mut row = RowRecord::new();
        for (key, value) in fields {
            row.push(key, value);
        }
        row
    }

    #[test]
    fn test_empty_records() {
        assert_eq!(to_json_string(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_two_space_indent() {
        let rows = vec![record(vec![
            ("id", CellValue::Int(1)),
            ("name", CellValue::Text("x".to_string())),
        ])];
        let expected = "[\n  {\n    \"id\": 1,\n    \"name\": \"x\"\n  }\n]";
        assert_eq!(to_json_string(&rows).unwrap(), expected);
    }

    #[test]
    fn test_non_ascii_written_literally() {
        let rows = vec![record(vec![("名称", CellValue::Text("设备".to_string()))])];
        let json = to_json_string(&rows).unwrap();
        assert!(json.contains("\"名称\": \"设备\""), "{}", json);
        assert!(!json.contains("\\u"), "{}", json);
    }

    #[test]
    fn test_non_finite_number_fails() {
        let rows = vec![record(vec![("v", CellValue::Float(f64::INFINITY))])];
        assert!(matches!(
            to_json_string(&rows),
            Err(ConvertError::Serialization(_))
        ));
    }

    #[test]
    fn test_write_records_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.json");
        fs::write(&path, "stale content").unwrap();

        write_records(&path, &[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("out.json");
        assert!(matches!(
            write_records(&path, &[]),
            Err(ConvertError::FileAccess { .. })
        ));
    }
}
