//! Core library for the regatta-tools command line application.
//!
//! The library reshapes Playwaze regatta entry reports into normalized crew and
//! crew-member tables. IO adapters live under [`regatta::tools::io`], the table
//! representation inside [`regatta::tools::model`], the canonical column names
//! in [`regatta::tools::schema`], the reconciliation logic in
//! [`regatta::tools::transform`], and the end-to-end orchestration under
//! [`regatta::tools::pipeline`].

pub mod regatta;

pub use regatta::tools::{
    Result, ToolError, config, error, io, model, pipeline, schema, transform,
};
