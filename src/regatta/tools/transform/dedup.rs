use std::collections::HashSet;

use crate::regatta::tools::error::Result;
use crate::regatta::tools::model::Table;
use crate::regatta::tools::schema::Field;

/// One row per rower: the first row of every (name, membership number) pair.
///
/// A rower entered in several crews appears once per crew in the team members
/// report. Two people sharing a name with no membership number collapse into
/// one.
pub fn unique_rowers(table: &Table) -> Result<Table> {
    let name = table.column_index(Field::Name)?;
    let number = table.column_index(Field::MembershipNumber)?;
    let mut seen = HashSet::new();

    Ok(table.filter_rows(|row| seen.insert((row[name].to_string(), row[number].to_string()))))
}
