//! Workbook → per-sheet JSON conversion

use crate::config::ConverterConfig;
use crate::error::{ConvertError, ConvertResult};
use crate::excel::WorkbookReader;
use crate::writer;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Characters that cannot appear in a file name on common filesystems
const UNSAFE_FILENAME_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Where one sheet will be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedOutput {
    pub sheet_name: String,
    pub output_path: PathBuf,
    pub designated: bool,
}

/// Result of converting one sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetReport {
    pub sheet_name: String,
    pub output_path: PathBuf,
    pub columns: usize,
    pub rows: usize,
}

/// Files written by a conversion run, in write order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    pub sheets: Vec<SheetReport>,
}

impl ConversionReport {
    pub fn total_rows(&self) -> usize {
        self.sheets.iter().map(|s| s.rows).sum()
    }
}

/// Replace characters that are unsafe in file names with `_`.
///
/// Fails when nothing usable is left (empty, `.` or `..`).
pub fn sanitize_sheet_name(name: &str) -> ConvertResult<String> {
    let sanitized: String = name
        .chars()
        .map(|c| {
            if UNSAFE_FILENAME_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    if sanitized.trim().is_empty() || sanitized == "." || sanitized == ".." {
        return Err(ConvertError::Validation(format!(
            "sheet name '{}' cannot be used as a file name",
            name
        )));
    }
    Ok(sanitized)
}

/// Map every sheet to its output path.
///
/// The designated sheet comes first and goes to the fixed output name; the
/// rest follow in workbook order under the output pattern. Fails before
/// anything is written if the designated sheet is missing or two sheets
/// would land on the same file.
pub fn plan_outputs(
    sheet_names: &[String],
    config: &ConverterConfig,
) -> ConvertResult<Vec<PlannedOutput>> {
    if !sheet_names
        .iter()
        .any(|name| name == &config.designated_sheet_name)
    {
        return Err(ConvertError::SheetNotFound(
            config.designated_sheet_name.clone(),
        ));
    }

    let mut plan = Vec::with_capacity(sheet_names.len());
    plan.push(PlannedOutput {
        sheet_name: config.designated_sheet_name.clone(),
        output_path: config.output_dir.join(&config.designated_output_name),
        designated: true,
    });

    for name in sheet_names {
        if name == &config.designated_sheet_name {
            continue;
        }
        let file_name = config.derived_output_name(&sanitize_sheet_name(name)?);
        plan.push(PlannedOutput {
            sheet_name: name.clone(),
            output_path: config.output_dir.join(file_name),
            designated: false,
        });
    }

    let mut claimed: HashMap<String, &str> = HashMap::with_capacity(plan.len());
    for output in &plan {
        let key = collision_key(&output.output_path);
        if let Some(previous) = claimed.insert(key, &output.sheet_name) {
            return Err(ConvertError::Validation(format!(
                "sheets '{}' and '{}' would both be written to {}",
                previous,
                output.sheet_name,
                output.output_path.display()
            )));
        }
    }

    Ok(plan)
}

/// Windows and macOS filesystems fold case by default
#[cfg(any(windows, target_os = "macos"))]
fn collision_key(path: &Path) -> String {
    path.to_string_lossy().to_lowercase()
}

#[cfg(not(any(windows, target_os = "macos")))]
fn collision_key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Converts each sheet of a workbook into its own JSON file
pub struct SpreadsheetToJsonConverter {
    config: ConverterConfig,
}

impl SpreadsheetToJsonConverter {
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// Open the workbook and compute the output plan without writing
    pub fn plan(&self) -> ConvertResult<Vec<PlannedOutput>> {
        self.config.validate()?;
        let reader = WorkbookReader::open(&self.config.input_path)?;
        plan_outputs(reader.sheet_names(), &self.config)
    }

    /// Run the conversion. Any failure aborts the run; files already
    /// written by then are left in place.
    pub fn convert(&self) -> ConvertResult<ConversionReport> {
        self.config.validate()?;

        let mut reader = WorkbookReader::open(&self.config.input_path)?;
        let plan = plan_outputs(reader.sheet_names(), &self.config)?;
        info!(
            input = %self.config.input_path.display(),
            sheets = plan.len(),
            "converting workbook"
        );

        let mut report = ConversionReport::default();
        for output in plan {
            let table = reader.load_sheet(&output.sheet_name)?;
            writer::write_records(&output.output_path, &table.rows)?;

            debug!(
                sheet = %output.sheet_name,
                path = %output.output_path.display(),
                rows = table.row_count(),
                "wrote sheet"
            );
            report.sheets.push(SheetReport {
                sheet_name: output.sheet_name,
                output_path: output.output_path,
                columns: table.column_count(),
                rows: table.row_count(),
            });
        }

        info!(files = report.sheets.len(), rows = report.total_rows(), "conversion complete");
        Ok(report)
    }
}

/// Convert the workbook described by `config`
pub fn convert(config: &ConverterConfig) -> ConvertResult<ConversionReport> {
    SpreadsheetToJsonConverter::new(config.clone()).convert()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sanitize_sheet_name() {
        assert_eq!(sanitize_sheet_name("模板A").unwrap(), "模板A");
        assert_eq!(sanitize_sheet_name("a/b:c").unwrap(), "a_b_c");
        assert_eq!(sanitize_sheet_name("what?*").unwrap(), "what__");
        assert_eq!(sanitize_sheet_name("tab\there").unwrap(), "tab_here");
        assert!(sanitize_sheet_name("..").is_err());
        assert!(sanitize_sheet_name("   ").is_err());
    }

    #[test]
    fn test_plan_designated_first() {
        let config = ConverterConfig::default();
        let plan = plan_outputs(&names(&["模板A", "设备", "模板B"]), &config).unwrap();

        assert_eq!(plan.len(), 3);
        assert_eq!(plan[0].sheet_name, "设备");
        assert!(plan[0].designated);
        assert_eq!(plan[0].output_path, Path::new(".").join("devices.json"));
        assert_eq!(plan[1].output_path, Path::new(".").join("模板A.json"));
        assert_eq!(plan[2].output_path, Path::new(".").join("模板B.json"));
    }

    #[test]
    fn test_plan_missing_designated_sheet() {
        let config = ConverterConfig::default();
        let result = plan_outputs(&names(&["Sheet1"]), &config);
        assert!(matches!(result, Err(ConvertError::SheetNotFound(name)) if name == "设备"));
    }

    #[test]
    fn test_plan_rejects_collision_with_designated_output() {
        let config = ConverterConfig::default();
        let result = plan_outputs(&names(&["设备", "devices"]), &config);
        assert!(matches!(result, Err(ConvertError::Validation(_))));
    }

    #[test]
    fn test_plan_rejects_sanitized_collision() {
        let config = ConverterConfig::default();
        let result = plan_outputs(&names(&["设备", "a/b", "a:b"]), &config);
        assert!(matches!(result, Err(ConvertError::Validation(_))));
    }

    #[test]
    fn test_plan_uses_output_dir_and_pattern() {
        let config = ConverterConfig {
            output_dir: PathBuf::from("out"),
            output_pattern: "points_{sheet}.json".to_string(),
            ..Default::default()
        };
        let plan = plan_outputs(&names(&["设备", "模板A"]), &config).unwrap();
        assert_eq!(plan[0].output_path, Path::new("out").join("devices.json"));
        assert_eq!(plan[1].output_path, Path::new("out").join("points_模板A.json"));
    }

    #[cfg(not(any(windows, target_os = "macos")))]
    #[test]
    fn test_plan_case_distinct_names_on_case_sensitive_fs() {
        let config = ConverterConfig::default();
        let plan = plan_outputs(&names(&["设备", "Devices"]), &config).unwrap();
        assert_eq!(plan[1].output_path, Path::new(".").join("Devices.json"));
    }

    #[cfg(any(windows, target_os = "macos"))]
    #[test]
    fn test_plan_case_distinct_names_on_case_folding_fs() {
        let config = ConverterConfig::default();
        let result = plan_outputs(&names(&["设备", "Devices"]), &config);
        assert!(matches!(result, Err(ConvertError::Validation(_))));
    }
}
