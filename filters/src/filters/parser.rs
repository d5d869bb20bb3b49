//! Filter parsing
//!
//! Builds the typed filter tree from JSON, validating node shape, operators
//! and nesting depth. Value/operator compatibility is checked later by the
//! builder, which knows how each operator renders.

use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

use crate::utils::string::{json_kind, json_preview};

use super::error::FilterError;
use super::types::{
    ComparisonNode, ComparisonOp, FilterNode, FilterValue, LogicalNode, LogicalOp, Scalar,
};

/// Default maximum size of filter JSON in bytes (64KB)
pub const DEFAULT_MAX_FILTER_BYTES: usize = 64 * 1024;

/// Default maximum nesting depth (root counts as 1)
pub const DEFAULT_MAX_DEPTH: u32 = 64;

/// Bounds applied to untrusted filter input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterLimits {
    pub max_depth: u32,
    pub max_filter_bytes: usize,
}

impl Default for FilterLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_filter_bytes: DEFAULT_MAX_FILTER_BYTES,
        }
    }
}

/// Parse a filter tree from raw JSON text
///
/// Checks size first, then JSON syntax, then the tree itself.
pub fn parse_filter(json_str: &str, limits: &FilterLimits) -> Result<FilterNode, FilterError> {
    if json_str.len() > limits.max_filter_bytes {
        return Err(FilterError::TooLarge {
            size: json_str.len(),
            max: limits.max_filter_bytes,
        });
    }

    let value: JsonValue =
        serde_json::from_str(json_str).map_err(|e| FilterError::InvalidJson(e.to_string()))?;

    parse_filter_value(&value, limits)
}

/// Parse a filter tree from an already-deserialized JSON value
pub fn parse_filter_value(
    value: &JsonValue,
    limits: &FilterLimits,
) -> Result<FilterNode, FilterError> {
    parse_node(value, 1, limits)
}

impl FilterNode {
    /// Parse with default limits
    pub fn from_json(value: &JsonValue) -> Result<Self, FilterError> {
        parse_filter_value(value, &FilterLimits::default())
    }
}

impl TryFrom<&JsonValue> for FilterNode {
    type Error = FilterError;

    fn try_from(value: &JsonValue) -> Result<Self, Self::Error> {
        Self::from_json(value)
    }
}

fn parse_node(
    value: &JsonValue,
    depth: u32,
    limits: &FilterLimits,
) -> Result<FilterNode, FilterError> {
    if depth > limits.max_depth {
        return Err(FilterError::TooDeep {
            max_depth: limits.max_depth,
        });
    }

    let JsonValue::Object(map) = value else {
        return Err(FilterError::InvalidInput {
            kind: json_kind(value),
        });
    };

    // `field` is only found in comparison nodes
    if map.contains_key("field") {
        parse_comparison(value, map).map(FilterNode::Comparison)
    } else {
        parse_logical(value, map, depth, limits).map(FilterNode::Logical)
    }
}

fn parse_logical(
    node: &JsonValue,
    map: &Map<String, JsonValue>,
    depth: u32,
    limits: &FilterLimits,
) -> Result<LogicalNode, FilterError> {
    let operator = require(node, map, "operator")?;
    let conditions = require(node, map, "conditions")?;

    let JsonValue::Array(conditions) = conditions else {
        return Err(FilterError::InvalidAttribute {
            attribute: "conditions",
            expected: "a list of filter nodes",
            node: json_preview(node),
        });
    };

    if conditions.is_empty() {
        return Err(FilterError::EmptyConditions {
            operator: operator_label(operator),
        });
    }

    let operator = LogicalOp::deserialize(operator)
        .map_err(|_| FilterError::UnknownLogicalOperator(operator_label(operator)))?;

    let conditions = conditions
        .iter()
        .enumerate()
        .map(|(index, child)| {
            if !child.is_object() {
                return Err(FilterError::InvalidCondition {
                    index,
                    kind: json_kind(child),
                    node: json_preview(node),
                });
            }
            parse_node(child, depth + 1, limits)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LogicalNode {
        operator,
        conditions,
    })
}

fn parse_comparison(
    node: &JsonValue,
    map: &Map<String, JsonValue>,
) -> Result<ComparisonNode, FilterError> {
    if map.contains_key("conditions") {
        return Err(FilterError::AmbiguousNode {
            node: json_preview(node),
        });
    }

    let field = match map.get("field") {
        Some(JsonValue::String(field)) if !field.is_empty() => field.clone(),
        _ => {
            return Err(FilterError::InvalidAttribute {
                attribute: "field",
                expected: "a non-empty string",
                node: json_preview(node),
            });
        }
    };

    let operator = require(node, map, "operator")?;
    let value = require(node, map, "value")?;

    let operator = ComparisonOp::deserialize(operator)
        .map_err(|_| FilterError::UnknownComparisonOperator(operator_label(operator)))?;
    let value = parse_value(&field, value)?;

    Ok(ComparisonNode {
        field,
        operator,
        value,
    })
}

fn parse_value(field: &str, value: &JsonValue) -> Result<FilterValue, FilterError> {
    match value {
        JsonValue::Null => Ok(FilterValue::Null),
        JsonValue::Array(items) => items
            .iter()
            .map(|item| {
                parse_scalar(item).ok_or_else(|| FilterError::UnsupportedListElement {
                    field: field.to_string(),
                    kind: json_kind(item),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(FilterValue::List),
        other => parse_scalar(other)
            .map(FilterValue::Scalar)
            .ok_or_else(|| FilterError::UnsupportedValueType {
                field: field.to_string(),
                kind: json_kind(other),
            }),
    }
}

/// Integers keep their exact value across the whole i64 and u64 ranges
fn parse_scalar(value: &JsonValue) -> Option<Scalar> {
    match value {
        JsonValue::String(s) => Some(Scalar::String(s.clone())),
        JsonValue::Bool(b) => Some(Scalar::Bool(*b)),
        JsonValue::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from))
            .map(Scalar::Integer)
            .or_else(|| n.as_f64().map(Scalar::Float)),
        JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => None,
    }
}

fn require<'a>(
    node: &JsonValue,
    map: &'a Map<String, JsonValue>,
    attribute: &'static str,
) -> Result<&'a JsonValue, FilterError> {
    map.get(attribute)
        .ok_or_else(|| FilterError::MissingAttribute {
            attribute,
            node: json_preview(node),
        })
}

/// Operator text for error messages, without JSON quoting for strings
fn operator_label(operator: &JsonValue) -> String {
    match operator {
        JsonValue::String(s) => s.clone(),
        other => json_preview(other),
    }
}
