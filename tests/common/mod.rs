//! Fixture workbooks generated on the fly

#![allow(dead_code)]

use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use std::path::Path;

pub enum Cell {
    Num(f64),
    Text(&'static str),
    Bool(bool),
    Date(u16, u8, u8),
    Blank,
}

pub struct SheetFixture {
    pub name: &'static str,
    pub rows: Vec<Vec<Cell>>,
}

pub fn sheet(name: &'static str, rows: Vec<Vec<Cell>>) -> SheetFixture {
    SheetFixture { name, rows }
}

/// Write an .xlsx file with the given sheets, in order
pub fn write_workbook(path: &Path, sheets: &[SheetFixture]) {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    for fixture in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(fixture.name).unwrap();

        for (r, row) in fixture.rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let (r, c) = (r as u32, c as u16);
                match cell {
                    Cell::Num(n) => {
                        worksheet.write_number(r, c, *n).unwrap();
                    }
                    Cell::Text(s) => {
                        worksheet.write_string(r, c, *s).unwrap();
                    }
                    Cell::Bool(b) => {
                        worksheet.write_boolean(r, c, *b).unwrap();
                    }
                    Cell::Date(y, m, d) => {
                        let date = ExcelDateTime::from_ymd(*y, *m, *d).unwrap();
                        worksheet
                            .write_datetime_with_format(r, c, &date, &date_format)
                            .unwrap();
                    }
                    Cell::Blank => {}
                }
            }
        }
    }

    workbook.save(path).unwrap();
}

/// The two-sheet workbook used throughout: `设备` and `模板A`
pub fn device_workbook(path: &Path) {
    write_workbook(
        path,
        &[
            sheet(
                "设备",
                vec![
                    vec![Cell::Text("id"), Cell::Text("name")],
                    vec![Cell::Num(1.0), Cell::Text("x")],
                ],
            ),
            sheet(
                "模板A",
                vec![vec![Cell::Text("tag")], vec![Cell::Text("t1")]],
            ),
        ],
    );
}
