//! Filter type definitions
//!
//! Typed form of the document-store filter tree. The wire format tells
//! logical nodes and comparison leaves apart by the presence of `field`;
//! once parsed, the variant is explicit.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::FilterError;

/// Namespace prefix of user-defined metadata fields, flattened in the Vespa schema
pub const META_PREFIX: &str = "meta.";

/// A node of the filter tree
#[derive(Debug, Clone, PartialEq)]
pub enum FilterNode {
    Logical(LogicalNode),
    Comparison(ComparisonNode),
}

/// Combines child conditions with AND / OR / NOT
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalNode {
    pub operator: LogicalOp,
    pub conditions: Vec<FilterNode>,
}

/// Tests one field against one value
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonNode {
    pub field: String,
    pub operator: ComparisonOp,
    pub value: FilterValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalOp {
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
    #[serde(rename = "NOT")]
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOp {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Lte,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "not in")]
    NotIn,
}

/// Single comparison value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Bool(bool),
    Integer(i128),
    Float(f64),
}

/// Right-hand side of a comparison
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Null,
    Scalar(Scalar),
    List(Vec<Scalar>),
}

impl LogicalOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
        }
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogicalOp {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AND" => Ok(Self::And),
            "OR" => Ok(Self::Or),
            "NOT" => Ok(Self::Not),
            other => Err(FilterError::UnknownLogicalOperator(other.to_string())),
        }
    }
}

impl ComparisonOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::In => "in",
            Self::NotIn => "not in",
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComparisonOp {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "==" => Ok(Self::Eq),
            "!=" => Ok(Self::Ne),
            ">" => Ok(Self::Gt),
            ">=" => Ok(Self::Gte),
            "<" => Ok(Self::Lt),
            "<=" => Ok(Self::Lte),
            "in" => Ok(Self::In),
            "not in" => Ok(Self::NotIn),
            other => Err(FilterError::UnknownComparisonOperator(other.to_string())),
        }
    }
}

impl FilterNode {
    pub fn and(conditions: Vec<FilterNode>) -> Self {
        Self::Logical(LogicalNode {
            operator: LogicalOp::And,
            conditions,
        })
    }

    pub fn or(conditions: Vec<FilterNode>) -> Self {
        Self::Logical(LogicalNode {
            operator: LogicalOp::Or,
            conditions,
        })
    }

    /// Negates the conjunction of `conditions`
    pub fn not(conditions: Vec<FilterNode>) -> Self {
        Self::Logical(LogicalNode {
            operator: LogicalOp::Not,
            conditions,
        })
    }

    pub fn comparison(
        field: impl Into<String>,
        operator: ComparisonOp,
        value: impl Into<FilterValue>,
    ) -> Self {
        Self::Comparison(ComparisonNode::new(field, operator, value))
    }

    /// Nesting depth, counting the node itself as 1
    pub fn depth(&self) -> usize {
        match self {
            Self::Comparison(_) => 1,
            Self::Logical(node) => {
                1 + node
                    .conditions
                    .iter()
                    .map(FilterNode::depth)
                    .max()
                    .unwrap_or(0)
            }
        }
    }
}

impl From<LogicalNode> for FilterNode {
    fn from(node: LogicalNode) -> Self {
        Self::Logical(node)
    }
}

impl From<ComparisonNode> for FilterNode {
    fn from(node: ComparisonNode) -> Self {
        Self::Comparison(node)
    }
}

impl ComparisonNode {
    pub fn new(
        field: impl Into<String>,
        operator: ComparisonOp,
        value: impl Into<FilterValue>,
    ) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// Field name as stored in Vespa: a single leading `meta.` is dropped
    pub fn yql_field(&self) -> &str {
        self.field
            .strip_prefix(META_PREFIX)
            .unwrap_or(&self.field)
    }
}

impl Scalar {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Integer(i128::from(value))
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Self::Integer(i128::from(value))
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Self::Integer(i128::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl FilterValue {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Scalar(scalar) => scalar.kind(),
            Self::List(_) => "list",
        }
    }
}

impl From<Scalar> for FilterValue {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

macro_rules! impl_filter_value_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FilterValue {
                fn from(value: $ty) -> Self {
                    Self::Scalar(value.into())
                }
            }

            impl From<Vec<$ty>> for FilterValue {
                fn from(values: Vec<$ty>) -> Self {
                    Self::List(values.into_iter().map(Into::into).collect())
                }
            }
        )*
    };
}

impl_filter_value_from!(&str, String, bool, i64, u64, i32, f64);
