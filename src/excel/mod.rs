//! Spreadsheet input
//!
//! Reads `.xlsx`, `.xlsm`, `.xlsb`, `.xls` and `.ods` workbooks through
//! calamine and materializes one sheet at a time as row records.

mod reader;

pub use reader::WorkbookReader;
