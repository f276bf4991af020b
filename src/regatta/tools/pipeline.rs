use std::path::Path;

use tracing::{debug, info, instrument};

use crate::regatta::tools::config::{ReportColumns, ReportLayout};
use crate::regatta::tools::error::Result;
use crate::regatta::tools::io::{excel_read, excel_write};
use crate::regatta::tools::model::{RawTable, Table};
use crate::regatta::tools::schema::{Field, TEAM_FLAG_FIELDS};
use crate::regatta::tools::transform::{
    normalize_flags, project_columns, resolve_coxes, with_positions,
};

/// Sheet name of the crews table in written reports.
pub const CREWS_SHEET: &str = "Crews";
/// Sheet name of the crew members table in written reports.
pub const CREW_MEMBERS_SHEET: &str = "Crew Members";

/// Raw reports handed to [`process_reports`].
#[derive(Debug, Clone, Copy)]
pub struct RawReports<'a> {
    pub teams: &'a RawTable,
    pub team_members: &'a RawTable,
    pub community_members: Option<&'a RawTable>,
}

/// Output of the reconciliation: crews with normalized flags, and every seat
/// occupant (rowers numbered from 1, coxes at "C").
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedReports {
    pub teams: Table,
    pub crew_members: Table,
}

/// Input workbook paths for [`process_workbooks`].
#[derive(Debug, Clone, Copy)]
pub struct ReportPaths<'a> {
    pub teams: &'a Path,
    pub team_members: &'a Path,
    pub community_members: Option<&'a Path>,
}

/// Projects every report through `layout`, normalizes the crew flags,
/// numbers the rowers within their crews and appends the coxes.
#[instrument(level = "info", skip_all)]
pub fn process_reports(
    reports: RawReports<'_>,
    layout: &ReportLayout,
) -> Result<ProcessedReports> {
    let teams = project(reports.teams, &layout.teams)?;
    let teams = normalize_flags(&teams, &present_flags(&teams))?;
    info!(crews = teams.len(), "projected teams report");

    let rowers = project(reports.team_members, &layout.team_members)?;
    let rowers = with_positions(&rowers)?;
    info!(rowers = rowers.len(), "projected team members report");

    let community = match (reports.community_members, &layout.community_members) {
        (Some(raw), Some(columns)) => Some(project(raw, columns)?),
        (Some(_), None) => {
            debug!("community members report supplied without a layout; ignoring it");
            None
        }
        (None, _) => None,
    };

    let crew_members = resolve_coxes(&teams, rowers, community.as_ref())?;
    info!(crew_members = crew_members.len(), "crew members resolved");

    Ok(ProcessedReports {
        teams,
        crew_members,
    })
}

/// Reads the report workbooks, reconciles them and writes the crews and crew
/// members sheets to `output`.
#[instrument(
    level = "info",
    skip_all,
    fields(teams = %paths.teams.display(), output = %output.display())
)]
pub fn process_workbooks(
    paths: ReportPaths<'_>,
    layout: &ReportLayout,
    output: &Path,
) -> Result<ProcessedReports> {
    let teams = excel_read::read_report(paths.teams, None)?;
    let team_members = excel_read::read_report(paths.team_members, None)?;
    let community_members = match paths.community_members {
        Some(path) => Some(excel_read::read_report(path, None)?),
        None => None,
    };

    let processed = process_reports(
        RawReports {
            teams: &teams,
            team_members: &team_members,
            community_members: community_members.as_ref(),
        },
        layout,
    )?;

    excel_write::write_report(
        output,
        &[
            (CREWS_SHEET, &processed.teams),
            (CREW_MEMBERS_SHEET, &processed.crew_members),
        ],
    )?;
    info!("report written");
    Ok(processed)
}

fn project(raw: &RawTable, columns: &ReportColumns) -> Result<Table> {
    project_columns(raw, &columns.indices(), &columns.fields())
}

fn present_flags(teams: &Table) -> Vec<Field> {
    TEAM_FLAG_FIELDS
        .iter()
        .copied()
        .filter(|field| teams.has_column(*field))
        .collect()
}
