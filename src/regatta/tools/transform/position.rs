use std::collections::HashMap;

use crate::regatta::tools::error::Result;
use crate::regatta::tools::model::{Cell, Table};
use crate::regatta::tools::schema::Field;

/// Seat position of every row within its crew, counted from 1 in row order.
/// The returned series is aligned with the rows of `table`.
pub fn assign_positions(table: &Table) -> Result<Vec<String>> {
    let crews = table.column(Field::CrewId)?;
    let mut seen: HashMap<String, usize> = HashMap::new();

    Ok(crews
        .into_iter()
        .map(|crew| {
            let seat = seen.entry(crew.to_string()).or_insert(0);
            *seat += 1;
            seat.to_string()
        })
        .collect())
}

/// Returns a copy of `table` with its position column filled from
/// [`assign_positions`].
pub fn with_positions(table: &Table) -> Result<Table> {
    let positions = assign_positions(table)?
        .into_iter()
        .map(Cell::Text)
        .collect();
    let mut positioned = table.clone();
    positioned.set_column(Field::Position, positions)?;
    Ok(positioned)
}
