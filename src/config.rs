//! Converter configuration
//!
//! Every field defaults to the values the conversion has always used, so an
//! empty config (or none at all) converts `config.xlsx` in the working
//! directory, writing the `设备` sheet to `devices.json`.

use crate::error::{ConvertError, ConvertResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT_PATH: &str = "config.xlsx";
pub const DEFAULT_DESIGNATED_SHEET: &str = "设备";
pub const DEFAULT_DESIGNATED_OUTPUT: &str = "devices.json";
pub const DEFAULT_OUTPUT_PATTERN: &str = "{sheet}.json";

/// Placeholder substituted with the (sanitized) sheet name
pub const SHEET_PLACEHOLDER: &str = "{sheet}";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    pub input_path: PathBuf,
    pub designated_sheet_name: String,
    pub designated_output_name: String,
    pub output_pattern: String,
    pub output_dir: PathBuf,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            designated_sheet_name: DEFAULT_DESIGNATED_SHEET.to_string(),
            designated_output_name: DEFAULT_DESIGNATED_OUTPUT.to_string(),
            output_pattern: DEFAULT_OUTPUT_PATTERN.to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl ConverterConfig {
    /// Load a YAML config file; missing keys fall back to defaults
    pub fn from_file(path: &Path) -> ConvertResult<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| ConvertError::file_access(path, e))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> ConvertResult<Self> {
        // An empty document deserializes as unit, not as an empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: ConverterConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }

    pub fn validate(&self) -> ConvertResult<()> {
        if self.designated_sheet_name.is_empty() {
            return Err(ConvertError::Validation(
                "designated_sheet_name must not be empty".to_string(),
            ));
        }
        check_file_name("designated_output_name", &self.designated_output_name)?;

        if !self.output_pattern.contains(SHEET_PLACEHOLDER) {
            return Err(ConvertError::Validation(format!(
                "output_pattern '{}' must contain {}",
                self.output_pattern, SHEET_PLACEHOLDER
            )));
        }
        let sample = self.output_pattern.replace(SHEET_PLACEHOLDER, "sheet");
        check_file_name("output_pattern", &sample)?;

        Ok(())
    }

    /// Output file name for a non-designated sheet
    pub fn derived_output_name(&self, sanitized_sheet: &str) -> String {
        self.output_pattern.replace(SHEET_PLACEHOLDER, sanitized_sheet)
    }
}

/// Output names are bare file names, resolved against `output_dir`
fn check_file_name(field: &str, name: &str) -> ConvertResult<()> {
    if name.is_empty() || name == "." || name == ".." {
        return Err(ConvertError::Validation(format!(
            "{} '{}' is not a usable file name",
            field, name
        )));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(ConvertError::Validation(format!(
            "{} '{}' must be a file name, not a path",
            field, name
        )));
    }
    Ok(())
}
