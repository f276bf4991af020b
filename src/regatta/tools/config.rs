//! Report layout configuration.
//!
//! Playwaze exports differ between report templates and versions, so the
//! position of each column is supplied by a JSON layout file rather than
//! hard-coded:
//!
//! ```json
//! {
//!   "teams": [{ "index": 0, "field": "crew id" }, { "index": 3, "field": "cox" }],
//!   "team_members": [{ "index": 6, "field": "name" }],
//!   "community_members": [{ "index": 1, "field": "name" }]
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::regatta::tools::error::{Result, ToolError};
use crate::regatta::tools::schema::{
    COMMUNITY_MEMBER_FIELDS, Field, TEAM_FIELDS, TEAM_MEMBER_FIELDS,
};
use crate::regatta::tools::transform::COX_FIELDS;

/// Maps one source column onto a canonical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnSpec {
    /// Zero-based column position in the exported sheet.
    pub index: usize,
    pub field: Field,
}

/// Ordered column selection for one report.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportColumns(pub Vec<ColumnSpec>);

impl ReportColumns {
    pub fn indices(&self) -> Vec<usize> {
        self.0.iter().map(|spec| spec.index).collect()
    }

    pub fn fields(&self) -> Vec<Field> {
        self.0.iter().map(|spec| spec.field).collect()
    }

    fn validate(&self, report: &str, allowed: &[Field], required: &[Field]) -> Result<()> {
        let mut seen = HashSet::new();
        for spec in &self.0 {
            if !allowed.contains(&spec.field) {
                return Err(ToolError::InvalidLayout(format!(
                    "{report}: field '{}' does not belong to this report",
                    spec.field
                )));
            }
            if !seen.insert(spec.field) {
                return Err(ToolError::InvalidLayout(format!(
                    "{report}: field '{}' is mapped more than once",
                    spec.field
                )));
            }
        }

        if let Some(missing) = required.iter().find(|field| !seen.contains(*field)) {
            return Err(ToolError::InvalidLayout(format!(
                "{report}: required field '{missing}' is not mapped"
            )));
        }
        Ok(())
    }
}

/// Column selections for every report consumed by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportLayout {
    pub teams: ReportColumns,
    pub team_members: ReportColumns,
    #[serde(default)]
    pub community_members: Option<ReportColumns>,
}

impl ReportLayout {
    /// Reads and validates a layout file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let layout = Self::from_json(&data)?;
        debug!(path = %path.display(), "loaded report layout");
        Ok(layout)
    }

    /// Parses and validates a layout from its JSON text.
    pub fn from_json(data: &str) -> Result<Self> {
        let layout: ReportLayout = serde_json::from_str(data)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Checks that every report maps only its own fields, none of them twice,
    /// and that the fields the reconciliation relies on are present.
    pub fn validate(&self) -> Result<()> {
        let mut team_required = vec![Field::Cox];
        team_required.extend(COX_FIELDS);
        self.teams.validate("teams", &TEAM_FIELDS, &team_required)?;
        self.team_members.validate(
            "team_members",
            &TEAM_MEMBER_FIELDS,
            &[Field::CrewId, Field::Name, Field::MembershipNumber],
        )?;
        if let Some(community) = &self.community_members {
            community.validate("community_members", &COMMUNITY_MEMBER_FIELDS, &[Field::Name])?;
        }
        Ok(())
    }
}
