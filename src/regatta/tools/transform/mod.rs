//! Reconciliation steps applied to projected report tables.
//!
//! Each step takes its inputs by reference and returns a new table or series,
//! except [`resolve_coxes`] which consumes the team members table it extends.

mod cox;
mod dedup;
mod flags;
mod position;
mod project;

pub use cox::{COX_FIELDS, COX_MEMBER_FIELDS, resolve_coxes};
pub use dedup::unique_rowers;
pub use flags::normalize_flags;
pub use position::{assign_positions, with_positions};
pub use project::project_columns;
