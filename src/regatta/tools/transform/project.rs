use crate::regatta::tools::error::{Result, ToolError};
use crate::regatta::tools::model::{Cell, RawTable, Table};
use crate::regatta::tools::schema::Field;

/// Keeps the columns at `indices` of `raw`, in that order, and names them
/// after the matching entry of `fields`.
///
/// Identifier fields are canonicalized to text on the way through; no other
/// content is inspected. Rows shorter than the table width contribute missing
/// cells.
pub fn project_columns(raw: &RawTable, indices: &[usize], fields: &[Field]) -> Result<Table> {
    if indices.len() != fields.len() {
        return Err(ToolError::ColumnCountMismatch {
            indices: indices.len(),
            fields: fields.len(),
        });
    }

    let width = raw.width();
    if let Some(index) = indices.iter().copied().find(|index| *index >= width) {
        return Err(ToolError::ColumnOutOfRange { index, width });
    }

    let rows = raw
        .rows
        .iter()
        .map(|row| {
            indices
                .iter()
                .zip(fields)
                .map(|(index, field)| {
                    let cell = row.get(*index).cloned().unwrap_or_default();
                    if field.is_identifier() {
                        cell.into_identifier()
                    } else {
                        cell
                    }
                })
                .collect::<Vec<Cell>>()
        })
        .collect();

    Table::from_rows(fields.to_vec(), rows)
}
