//! xlsx2json - split a spreadsheet workbook into one JSON file per sheet
//!
//! Each sheet's first row supplies the column headers; every following row
//! becomes one JSON object. One designated sheet (`设备` by default) is
//! written to a fixed file name (`devices.json`), every other sheet to a
//! name derived from the sheet itself (`<sheet>.json`).
//!
//! # Features
//!
//! - Reads `.xlsx`, `.xlsm`, `.xlsb`, `.xls` and `.ods` workbooks
//! - Typed cells (number, text, boolean, date/time, empty) mapped to JSON
//! - Two-space pretty printing with literal UTF-8 output
//! - Output plan validated before anything is written
//!
//! # Example
//!
//! ```no_run
//! use xlsx2json::config::ConverterConfig;
//! use xlsx2json::converter::SpreadsheetToJsonConverter;
//!
//! let converter = SpreadsheetToJsonConverter::new(ConverterConfig::default());
//! let report = converter.convert()?;
//!
//! for sheet in &report.sheets {
//!     println!("{} → {}", sheet.sheet_name, sheet.output_path.display());
//! }
//! # Ok::<(), xlsx2json::error::ConvertError>(())
//! ```

pub mod cli;
pub mod config;
pub mod converter;
pub mod error;
pub mod excel;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use config::ConverterConfig;
pub use converter::{convert, ConversionReport, SpreadsheetToJsonConverter};
pub use error::{ConvertError, ConvertResult};
pub use types::{CellValue, RowRecord, SheetTable};
