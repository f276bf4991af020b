use tracing::warn;

use crate::regatta::tools::error::Result;
use crate::regatta::tools::model::{Cell, Table};
use crate::regatta::tools::schema::{FLAG_NO, FLAG_YES, Field};

/// Turns the `fields` columns of `table` into boolean columns.
///
/// `"Y"` becomes `true`; `"N"` and blanks become `false`. Cells that are
/// already boolean are kept, so applying the normalization twice is a no-op.
/// Anything else falls back to truthiness and is reported.
pub fn normalize_flags(table: &Table, fields: &[Field]) -> Result<Table> {
    let mut normalized = table.clone();
    for field in fields {
        let values = table
            .column(*field)?
            .into_iter()
            .map(|cell| Cell::Bool(flag_value(*field, cell)))
            .collect();
        normalized.set_column(*field, values)?;
    }
    Ok(normalized)
}

fn flag_value(field: Field, cell: &Cell) -> bool {
    match cell {
        Cell::Bool(value) => *value,
        Cell::Missing => false,
        Cell::Text(value) if value == FLAG_YES => true,
        Cell::Text(value) if value == FLAG_NO => false,
        Cell::Text(value) => {
            warn!(column = %field, value = %value, "unexpected flag marker");
            !value.is_empty()
        }
        Cell::Number(value) => {
            warn!(column = %field, value, "numeric value in flag column");
            *value != 0.0
        }
    }
}
