//! Vespa YQL filter compiler
//!
//! Translates document-store filter trees (logical AND/OR/NOT groups over
//! `field` / `operator` / `value` comparisons) into YQL where-clause fragments.
//!
//! ## Usage
//!
//! ```
//! use serde_json::json;
//! use vespa_filters::filters::normalize_filters;
//!
//! let filters = json!({
//!     "operator": "AND",
//!     "conditions": [
//!         {"field": "meta.type", "operator": "==", "value": "article"},
//!         {"field": "meta.date", "operator": ">=", "value": "2015-01-01"}
//!     ]
//! });
//! let yql = normalize_filters(&filters).unwrap();
//! assert_eq!(yql, r#"(type contains "article" and date >= "2015-01-01")"#);
//! ```

mod builder;
mod error;
mod parser;
mod types;

pub use builder::{FilterCompiler, compile, normalize_filters};
pub use error::FilterError;
pub use parser::{
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_FILTER_BYTES, FilterLimits, parse_filter, parse_filter_value,
};
pub use types::{
    ComparisonNode, ComparisonOp, FilterNode, FilterValue, LogicalNode, LogicalOp, META_PREFIX,
    Scalar,
};
