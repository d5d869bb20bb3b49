//! YQL filter builder
//!
//! Renders a typed filter tree into a where-clause fragment that a Vespa
//! document store appends after `where` in a `select` statement.

use serde_json::{Value as JsonValue, json};

use crate::utils::string::json_preview;
use crate::utils::yql::{escape_double_quoted, escape_single_quoted, format_float};

use super::error::FilterError;
use super::parser::{FilterLimits, parse_filter, parse_filter_value};
use super::types::{
    ComparisonNode, ComparisonOp, FilterNode, FilterValue, LogicalNode, LogicalOp, Scalar,
};

/// Compiles filter trees into YQL where-clause fragments
///
/// Stateless apart from its limits; share one instance freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterCompiler {
    limits: FilterLimits,
}

impl FilterCompiler {
    pub fn new(limits: FilterLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &FilterLimits {
        &self.limits
    }

    /// Compile a typed filter tree
    pub fn compile(&self, node: &FilterNode) -> Result<String, FilterError> {
        let result = self.compile_node(node, 1);
        match &result {
            Ok(yql) => tracing::debug!(len = yql.len(), depth = node.depth(), "Filter compiled"),
            Err(e) => tracing::debug!(code = e.code(), error = %e, "Filter rejected"),
        }
        result
    }

    /// Parse and compile a filter given as a JSON value
    pub fn normalize(&self, filters: &JsonValue) -> Result<String, FilterError> {
        let node = parse_filter_value(filters, &self.limits).inspect_err(|e| {
            tracing::debug!(code = e.code(), error = %e, "Filter rejected");
        })?;
        self.compile(&node)
    }

    /// Parse and compile a filter given as JSON text
    pub fn normalize_str(&self, json_str: &str) -> Result<String, FilterError> {
        let node = parse_filter(json_str, &self.limits).inspect_err(|e| {
            tracing::debug!(code = e.code(), error = %e, "Filter rejected");
        })?;
        self.compile(&node)
    }

    fn compile_node(&self, node: &FilterNode, depth: u32) -> Result<String, FilterError> {
        if depth > self.limits.max_depth {
            return Err(FilterError::TooDeep {
                max_depth: self.limits.max_depth,
            });
        }

        match node {
            FilterNode::Logical(logical) => self.compile_logical(logical, depth),
            FilterNode::Comparison(comparison) => compile_comparison(comparison),
        }
    }

    fn compile_logical(&self, node: &LogicalNode, depth: u32) -> Result<String, FilterError> {
        if node.conditions.is_empty() {
            return Err(FilterError::EmptyConditions {
                operator: node.operator.to_string(),
            });
        }

        let conditions = node
            .conditions
            .iter()
            .map(|child| self.compile_node(child, depth + 1))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::trace!(
            operator = %node.operator,
            count = conditions.len(),
            "Compiled logical node"
        );

        // NOT negates the conjunction of its conditions
        Ok(match node.operator {
            LogicalOp::And => format!("({})", conditions.join(" and ")),
            LogicalOp::Or => format!("({})", conditions.join(" or ")),
            LogicalOp::Not => format!("!({})", conditions.join(" and ")),
        })
    }
}

/// Compile a typed filter tree with default limits
pub fn compile(node: &FilterNode) -> Result<String, FilterError> {
    FilterCompiler::default().compile(node)
}

/// Convert a document-store filter (JSON) into a YQL where-clause fragment
///
/// For example `{"field": "meta.type", "operator": "==", "value": "article"}`
/// becomes `type contains "article"`.
pub fn normalize_filters(filters: &JsonValue) -> Result<String, FilterError> {
    FilterCompiler::default().normalize(filters)
}

fn compile_comparison(node: &ComparisonNode) -> Result<String, FilterError> {
    let field = node.yql_field();
    let operator = node.operator;
    let value = &node.value;

    // also catches a bare `meta.` that strips to nothing
    if field.is_empty() {
        return Err(FilterError::InvalidAttribute {
            attribute: "field",
            expected: "a non-empty field name",
            node: json_preview(&json!({"field": node.field, "operator": operator})),
        });
    }

    let yql = match operator {
        ComparisonOp::Eq => equal(field, operator, value)?,
        ComparisonOp::Ne => format!("!({})", equal(field, operator, value)?),
        ComparisonOp::Gt | ComparisonOp::Gte | ComparisonOp::Lt | ComparisonOp::Lte => {
            range(field, operator, value)?
        }
        ComparisonOp::In => membership(field, operator, value)?,
        ComparisonOp::NotIn => format!("!({})", membership(field, operator, value)?),
    };

    tracing::trace!(field, operator = %operator, "Compiled comparison node");
    Ok(yql)
}

/// Positive form shared by `==` and `!=`; strings match with `contains`
fn equal(field: &str, operator: ComparisonOp, value: &FilterValue) -> Result<String, FilterError> {
    match value {
        FilterValue::Null => Err(null_not_supported(field, operator)),
        FilterValue::Scalar(Scalar::String(s)) => {
            Ok(format!("{} contains \"{}\"", field, escape_double_quoted(s)))
        }
        FilterValue::Scalar(scalar) => {
            Ok(format!("{} = {}", field, format_scalar(field, scalar)?))
        }
        FilterValue::List(_) => Err(FilterError::UnsupportedValueType {
            field: field.to_string(),
            kind: value.kind(),
        }),
    }
}

fn range(field: &str, operator: ComparisonOp, value: &FilterValue) -> Result<String, FilterError> {
    match value {
        FilterValue::Null => Err(null_not_supported(field, operator)),
        FilterValue::List(_) => Err(FilterError::ListNotSupportedForRange {
            field: field.to_string(),
            operator: operator.to_string(),
        }),
        // strings compare lexically, e.g. ISO dates
        FilterValue::Scalar(scalar) => Ok(format!(
            "{} {} {}",
            field,
            operator,
            format_scalar(field, scalar)?
        )),
    }
}

/// Positive form shared by `in` and `not in`
fn membership(
    field: &str,
    operator: ComparisonOp,
    value: &FilterValue,
) -> Result<String, FilterError> {
    let FilterValue::List(items) = value else {
        return Err(FilterError::ExpectedList {
            field: field.to_string(),
            operator: operator.to_string(),
        });
    };

    if items.is_empty() {
        return Err(FilterError::EmptyList {
            field: field.to_string(),
            operator: operator.to_string(),
        });
    }

    let items = items
        .iter()
        .map(|item| format_list_item(field, item))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(format!("{} in ({})", field, items.join(", ")))
}

/// Scalar in double-quote context (equality and range terms)
fn format_scalar(field: &str, scalar: &Scalar) -> Result<String, FilterError> {
    match scalar {
        Scalar::String(s) => Ok(format!("\"{}\"", escape_double_quoted(s))),
        Scalar::Bool(b) => Ok(b.to_string()),
        Scalar::Integer(i) => Ok(i.to_string()),
        Scalar::Float(f) => format_number(field, *f),
    }
}

/// Scalar in single-quote context (`in` lists)
fn format_list_item(field: &str, scalar: &Scalar) -> Result<String, FilterError> {
    match scalar {
        Scalar::String(s) => Ok(format!("'{}'", escape_single_quoted(s))),
        Scalar::Bool(b) => Ok(b.to_string()),
        Scalar::Integer(i) => Ok(i.to_string()),
        Scalar::Float(f) => format_number(field, *f),
    }
}

fn format_number(field: &str, value: f64) -> Result<String, FilterError> {
    format_float(value).ok_or_else(|| FilterError::UnsupportedValue {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn null_not_supported(field: &str, operator: ComparisonOp) -> FilterError {
    FilterError::NullNotSupported {
        field: field.to_string(),
        operator: operator.to_string(),
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
