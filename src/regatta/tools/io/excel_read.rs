use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};
use tracing::debug;

use crate::regatta::tools::error::{Result, ToolError};
use crate::regatta::tools::model::{Cell, RawTable};

/// Reads a Playwaze report from `path`. The first row of the worksheet is the
/// header row; the remaining rows become data rows with their cells kept
/// positionally. `sheet` selects a worksheet by name and defaults to the first.
///
/// Column positions are absolute: blank leading columns are kept as missing
/// cells so that layout indices match the sheet's column letters.
pub fn read_report(path: &Path, sheet: Option<&str>) -> Result<RawTable> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ToolError::InvalidWorkbook("workbook has no sheets".into()))?,
    };
    let range = read_required_sheet(&mut workbook, &sheet_name)?;

    // calamine ranges begin at the first used cell, not at A1.
    let column_offset = range.start().map(|(_, col)| col as usize).unwrap_or(0);

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(first_row) => std::iter::repeat_n(String::new(), column_offset)
            .chain(first_row.iter().map(|cell| cell_to_string(Some(cell))))
            .collect(),
        None => Vec::new(),
    };

    let rows: Vec<Vec<Cell>> = rows
        .map(|row| {
            std::iter::repeat_n(Cell::Missing, column_offset)
                .chain(row.iter().map(cell_from_data))
                .collect::<Vec<_>>()
        })
        .filter(|row| row.iter().any(|cell| !cell.is_missing()))
        .collect();

    debug!(
        sheet = %sheet_name,
        columns = headers.len(),
        rows = rows.len(),
        "read report sheet"
    );
    Ok(RawTable::new(headers, rows))
}

fn read_required_sheet<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    name: &str,
) -> Result<calamine::Range<DataType>> {
    let range_result = workbook
        .worksheet_range(name)
        .ok_or_else(|| ToolError::InvalidWorkbook(format!("missing sheet '{name}'")))?;
    let range = range_result.map_err(ToolError::from)?;
    Ok(range)
}

fn cell_from_data(cell: &DataType) -> Cell {
    match cell {
        DataType::String(value) if value.trim().is_empty() => Cell::Missing,
        DataType::String(value) => Cell::Text(value.clone()),
        DataType::Float(value) => Cell::Number(*value),
        DataType::Int(value) => Cell::Number(*value as f64),
        DataType::Bool(value) => Cell::Bool(*value),
        DataType::Empty => Cell::Missing,
        other => Cell::Text(other.to_string()),
    }
}

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
