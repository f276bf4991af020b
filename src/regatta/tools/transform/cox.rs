use std::collections::HashMap;

use tracing::{debug, info, instrument};

use crate::regatta::tools::error::Result;
use crate::regatta::tools::model::{Cell, Table};
use crate::regatta::tools::schema::{COX_POSITION, Field};
use crate::regatta::tools::transform::dedup::unique_rowers;

/// Placeholder some exports use for a member without a number.
const MISSING_MEMBERSHIP_NUMBER: &str = "0";

/// Teams columns carried onto every cox row, with the cox name first.
pub const COX_FIELDS: [Field; 6] = [
    Field::CoxName,
    Field::CrewId,
    Field::CrewName,
    Field::CrewLetter,
    Field::Club,
    Field::BoatType,
];

/// Member attributes copied onto a cox whose name matches a member.
pub const COX_MEMBER_FIELDS: [Field; 13] = [
    Field::MembershipNumber,
    Field::Gender,
    Field::Dob,
    Field::MembershipType,
    Field::MembershipExpiry,
    Field::PrimaryClub,
    Field::AdditionalClubs,
    Field::FirstLicence,
    Field::CompositeClubs,
    Field::RowingNovice,
    Field::ScullingNovice,
    Field::RowingPoints,
    Field::ScullingPoints,
];

/// Appends a row per coxswain to `team_members`.
///
/// Coxes come from the `teams` rows whose normalized cox flag is `true`.
/// Their membership details are looked up by exact name in `members`, or,
/// when no community members report is available, in the unique rowers of
/// `team_members` so that a cox who also rows in another crew is still
/// identified. A cox with no match keeps missing details, as do member
/// attributes the source does not carry. A name listed more than once in the
/// members source yields one cox row per listing. Membership numbers in the
/// result are text, with `"0"` and blanks turned into missing.
#[instrument(
    level = "debug",
    skip_all,
    fields(crews = teams.len(), team_members = team_members.len())
)]
pub fn resolve_coxes(
    teams: &Table,
    mut team_members: Table,
    members: Option<&Table>,
) -> Result<Table> {
    let cox_flag = teams.column_index(Field::Cox)?;
    let mut coxes = teams
        .filter_rows(|row| row[cox_flag].as_bool() == Some(true))
        .select(&COX_FIELDS)?;
    coxes.rename(Field::CoxName, Field::Name)?;
    let positions = vec![Cell::text(COX_POSITION); coxes.len()];
    coxes.set_column(Field::Position, positions)?;

    let fallback;
    let members = match members {
        Some(members) => members,
        None => {
            fallback = unique_rowers(&team_members)?;
            debug!(rowers = fallback.len(), "using unique rowers as members source");
            &fallback
        }
    };

    let joined = left_join_on_name(&coxes, members)?;
    info!(
        coxes = coxes.len(),
        cox_rows = joined.len(),
        "resolved coxes against members"
    );

    team_members.append(joined);
    canonicalize_membership_numbers(&mut team_members)?;
    Ok(team_members)
}

/// Membership numbers leave the resolver as text, with `"0"` and blanks
/// treated as missing.
fn canonicalize_membership_numbers(table: &mut Table) -> Result<()> {
    let numbers = table
        .column(Field::MembershipNumber)?
        .into_iter()
        .map(|cell| match cell.clone().into_identifier() {
            Cell::Text(value) if value == MISSING_MEMBERSHIP_NUMBER => Cell::Missing,
            other => other,
        })
        .collect();
    table.set_column(Field::MembershipNumber, numbers)
}

fn left_join_on_name(coxes: &Table, members: &Table) -> Result<Table> {
    let cox_name = coxes.column_index(Field::Name)?;
    let member_name = members.column_index(Field::Name)?;
    let member_columns: Vec<Option<usize>> = COX_MEMBER_FIELDS
        .iter()
        .map(|field| members.column_index(*field).ok())
        .collect();

    let mut by_name: HashMap<&str, Vec<&[Cell]>> = HashMap::new();
    for row in members.rows() {
        if let Some(name) = row[member_name].as_text() {
            by_name.entry(name).or_default().push(row);
        }
    }

    let mut columns = coxes.columns().to_vec();
    columns.extend(COX_MEMBER_FIELDS);
    let mut joined = Table::new(columns);

    let mut fanned_out = 0usize;
    for cox in coxes.rows() {
        let matches = cox[cox_name]
            .as_text()
            .and_then(|name| by_name.get(name))
            .map(Vec::as_slice)
            .unwrap_or_default();

        if matches.is_empty() {
            let mut row = cox.clone();
            row.extend(std::iter::repeat_n(Cell::Missing, member_columns.len()));
            joined.push_row(row)?;
            continue;
        }

        if matches.len() > 1 {
            fanned_out += 1;
        }
        for member in matches {
            let mut row = cox.clone();
            row.extend(member_columns.iter().map(|index| match index {
                Some(index) => member[*index].clone(),
                None => Cell::Missing,
            }));
            joined.push_row(row)?;
        }
    }

    if fanned_out > 0 {
        debug!(fanned_out, "cox names matched more than one member");
    }
    Ok(joined)
}
