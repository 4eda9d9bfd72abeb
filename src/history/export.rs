use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use crate::error::{HistoryError, HistoryResult};
use crate::history::dates::to_display;
use crate::history::record::Record;

pub const DEFAULT_SHEET_NAME: &str = "Resultados";
pub const DEFAULT_FILE_NAME: &str = "resultados.xlsx";

/// Header label and width hint for each spreadsheet column, in order.
pub const SHEET_COLUMNS: [(&str, f64); 7] = [
    ("Data", 15.0),
    ("n1", 8.0),
    ("n2", 8.0),
    ("n3", 8.0),
    ("n4", 8.0),
    ("n5", 8.0),
    ("cash ball", 10.0),
];

/// A rendered sheet: every cell already formatted as text.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<[String; 7]>,
}

/// Render sorted records into sheet rows with display dates.
pub fn export(sheet_name: &str, sorted: &[Record]) -> HistoryResult<Sheet> {
    if sorted.is_empty() {
        return Err(HistoryError::MissingInput);
    }
    let rows = sorted
        .iter()
        .map(|record| {
            let [n1, n2, n3, n4, n5, cash_ball] = record.values();
            [
                to_display(record.date),
                n1.to_string(),
                n2.to_string(),
                n3.to_string(),
                n4.to_string(),
                n5.to_string(),
                cash_ball.to_string(),
            ]
        })
        .collect();
    Ok(Sheet {
        name: sheet_name.to_string(),
        rows,
    })
}

fn build_workbook(sheet: &Sheet) -> HistoryResult<Workbook> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&sheet.name)?;

    for (col, (label, width)) in SHEET_COLUMNS.iter().enumerate() {
        let col = col as u16;
        worksheet.set_column_width(col, *width)?;
        worksheet.write_string_with_format(0, col, *label, &header_format)?;
    }
    for (idx, row) in sheet.rows.iter().enumerate() {
        let row_num = idx as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            worksheet.write_string(row_num, col as u16, cell.as_str())?;
        }
    }
    Ok(workbook)
}

/// Write the sheet as a single-sheet `.xlsx` workbook at `path`.
pub fn write_workbook(sheet: &Sheet, path: &Path) -> HistoryResult<()> {
    let mut workbook = build_workbook(sheet)?;
    workbook.save(path)?;
    Ok(())
}
