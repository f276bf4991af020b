pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod pipeline;
pub mod schema;
pub mod transform;

pub use error::{Result, ToolError};
