use std::path::Path;

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use tracing::debug;

use crate::regatta::tools::error::Result;
use crate::regatta::tools::model::{Cell, Table};

/// Writes each `(sheet name, table)` pair to its own worksheet at `path`.
/// The header row carries the canonical column names and the data is wrapped
/// in an Excel table with an autofilter.
pub fn write_report(path: &Path, tables: &[(&str, &Table)]) -> Result<()> {
    let mut workbook_writer = Workbook::new();

    for (sheet_name, table) in tables {
        let worksheet = workbook_writer.add_worksheet();
        worksheet.set_name(*sheet_name)?;

        for (col_idx, field) in table.columns().iter().enumerate() {
            worksheet.write_string(0, col_idx as u16, field.as_str())?;
        }

        for (row_idx, row) in table.rows().iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                write_cell(worksheet, (row_idx + 1) as u32, col_idx as u16, cell)?;
            }
        }

        // Excel tables need at least one data row.
        if !table.is_empty() && !table.columns().is_empty() {
            let mut excel_table = rust_xlsxwriter::Table::new();
            excel_table.set_autofilter(true);
            let col_end = (table.columns().len() as u16).saturating_sub(1);
            worksheet.add_table(0, 0, table.len() as u32, col_end, &excel_table)?;
        }
        debug!(sheet = %sheet_name, rows = table.len(), "worksheet written");
    }

    workbook_writer.save(path)?;
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
) -> std::result::Result<(), XlsxError> {
    match cell {
        Cell::Text(value) => {
            worksheet.write_string(row, col, value)?;
        }
        Cell::Number(value) => {
            worksheet.write_number(row, col, *value)?;
        }
        Cell::Bool(value) => {
            worksheet.write_boolean(row, col, *value)?;
        }
        Cell::Missing => {}
    }
    Ok(())
}
