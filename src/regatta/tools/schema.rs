//! Canonical column names shared by every report and transformation.
//!
//! The report layout file, the projections and the join all refer to columns
//! through [`Field`], so a misspelt column name fails when the layout is
//! parsed rather than surfacing as an empty column downstream.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::regatta::tools::error::ToolError;

/// Affirmative marker used by flag columns in Playwaze reports.
pub const FLAG_YES: &str = "Y";
/// Negative marker used by flag columns in Playwaze reports.
pub const FLAG_NO: &str = "N";
/// Position reserved for coxswains.
pub const COX_POSITION: &str = "C";
/// File extension of the uploaded reports.
pub const REPORT_FILE_TYPE: &str = "xlsx";

/// A canonical report column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Field {
    CrewId,
    BoatType,
    Club,
    CrewName,
    CrewLetter,
    Seats,
    Verified,
    Captain,
    CaptainName,
    Cox,
    CoxName,
    MemberId,
    Name,
    Gender,
    Dob,
    MembershipNumber,
    MembershipType,
    MembershipExpiry,
    RowingPoints,
    RowingNovice,
    ScullingPoints,
    ScullingNovice,
    PrimaryClub,
    AdditionalClubs,
    FirstLicence,
    CompositeClubs,
    /// Derived seat position, never present in a raw report.
    Position,
}

/// Columns of a projected teams report.
pub const TEAM_FIELDS: [Field; 11] = [
    Field::CrewId,
    Field::BoatType,
    Field::Club,
    Field::CrewName,
    Field::CrewLetter,
    Field::Seats,
    Field::Verified,
    Field::Captain,
    Field::CaptainName,
    Field::Cox,
    Field::CoxName,
];

/// Flag columns of the teams report.
pub const TEAM_FLAG_FIELDS: [Field; 3] = [Field::Verified, Field::Captain, Field::Cox];

/// Columns of a projected team members report.
pub const TEAM_MEMBER_FIELDS: [Field; 20] = [
    Field::BoatType,
    Field::Club,
    Field::CrewId,
    Field::CrewLetter,
    Field::CrewName,
    Field::MemberId,
    Field::Name,
    Field::Gender,
    Field::Dob,
    Field::MembershipNumber,
    Field::MembershipType,
    Field::MembershipExpiry,
    Field::RowingPoints,
    Field::RowingNovice,
    Field::ScullingPoints,
    Field::ScullingNovice,
    Field::PrimaryClub,
    Field::AdditionalClubs,
    Field::FirstLicence,
    Field::CompositeClubs,
];

/// Columns of a projected community members report.
pub const COMMUNITY_MEMBER_FIELDS: [Field; 15] = [
    Field::MemberId,
    Field::Name,
    Field::Dob,
    Field::Gender,
    Field::MembershipNumber,
    Field::MembershipType,
    Field::MembershipExpiry,
    Field::RowingPoints,
    Field::RowingNovice,
    Field::ScullingPoints,
    Field::ScullingNovice,
    Field::PrimaryClub,
    Field::AdditionalClubs,
    Field::FirstLicence,
    Field::CompositeClubs,
];

const ALL_FIELDS: [Field; 27] = [
    Field::CrewId,
    Field::BoatType,
    Field::Club,
    Field::CrewName,
    Field::CrewLetter,
    Field::Seats,
    Field::Verified,
    Field::Captain,
    Field::CaptainName,
    Field::Cox,
    Field::CoxName,
    Field::MemberId,
    Field::Name,
    Field::Gender,
    Field::Dob,
    Field::MembershipNumber,
    Field::MembershipType,
    Field::MembershipExpiry,
    Field::RowingPoints,
    Field::RowingNovice,
    Field::ScullingPoints,
    Field::ScullingNovice,
    Field::PrimaryClub,
    Field::AdditionalClubs,
    Field::FirstLicence,
    Field::CompositeClubs,
    Field::Position,
];

impl Field {
    /// Column name as it appears in the report layout and in written reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::CrewId => "crew id",
            Field::BoatType => "boat type",
            Field::Club => "club",
            Field::CrewName => "crew name",
            Field::CrewLetter => "crew letter",
            Field::Seats => "seats",
            Field::Verified => "verified",
            Field::Captain => "captain",
            Field::CaptainName => "captain name",
            Field::Cox => "cox",
            Field::CoxName => "cox name",
            Field::MemberId => "member id",
            Field::Name => "name",
            Field::Gender => "gender",
            Field::Dob => "dob",
            Field::MembershipNumber => "sr member number",
            Field::MembershipType => "membership type",
            Field::MembershipExpiry => "membership expiry",
            Field::RowingPoints => "rowing points",
            Field::RowingNovice => "rowing novice",
            Field::ScullingPoints => "sculling points",
            Field::ScullingNovice => "sculling novice",
            Field::PrimaryClub => "primary club",
            Field::AdditionalClubs => "additional clubs",
            Field::FirstLicence => "first licence start date",
            Field::CompositeClubs => "composite clubs",
            Field::Position => "position",
        }
    }

    /// Identifier columns are kept as text so that numeric-looking values
    /// never lose leading zeros or gain a fractional part.
    pub fn is_identifier(self) -> bool {
        matches!(
            self,
            Field::CrewId | Field::MemberId | Field::MembershipNumber
        )
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = ToolError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim();
        ALL_FIELDS
            .iter()
            .copied()
            .find(|field| field.as_str() == needle)
            .ok_or_else(|| ToolError::UnknownField(value.to_string()))
    }
}

impl TryFrom<String> for Field {
    type Error = ToolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Field> for String {
    fn from(field: Field) -> Self {
        field.as_str().to_string()
    }
}
