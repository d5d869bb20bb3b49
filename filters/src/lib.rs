//! Compile document-store filters into Vespa YQL where clauses.

pub mod app;
pub mod core;
pub mod filters;
pub mod utils;

pub use filters::{FilterCompiler, FilterError, FilterNode, compile, normalize_filters};
