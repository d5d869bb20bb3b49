//! Filter compilation errors
//!
//! Every failure aborts the whole compilation. Messages carry the field,
//! operator or (truncated) offending node so a rejected filter can be
//! traced back to its source.

use thiserror::Error;

/// Error raised while parsing or compiling a filter tree
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// Top-level input is not a JSON object
    #[error("Filters must be a JSON object, got {kind}")]
    InvalidInput { kind: &'static str },

    /// A logical node's condition is not a JSON object
    #[error("Condition {index} must be a JSON object, got {kind} in {node}")]
    InvalidCondition {
        index: usize,
        kind: &'static str,
        node: String,
    },

    /// Raw filter text is not valid JSON
    #[error("Invalid filter JSON: {0}")]
    InvalidJson(String),

    /// Raw filter text exceeds the configured size limit
    #[error("Filter JSON is {size} bytes, maximum is {max} bytes")]
    TooLarge { size: usize, max: usize },

    /// Tree nesting exceeds the configured depth limit
    #[error("Filter nesting exceeds maximum depth of {max_depth}")]
    TooDeep { max_depth: u32 },

    /// Required key absent from a node
    #[error("'{attribute}' key missing in {node}")]
    MissingAttribute {
        attribute: &'static str,
        node: String,
    },

    /// Key present but of the wrong shape
    #[error("'{attribute}' must be {expected} in {node}")]
    InvalidAttribute {
        attribute: &'static str,
        expected: &'static str,
        node: String,
    },

    /// Node carries both `field` and `conditions`
    #[error("Filter node has both 'field' and 'conditions': {node}")]
    AmbiguousNode { node: String },

    #[error("'{operator}' operator requires at least one condition")]
    EmptyConditions { operator: String },

    #[error("Unknown logical operator '{0}'")]
    UnknownLogicalOperator(String),

    #[error("Unknown comparison operator '{0}'")]
    UnknownComparisonOperator(String),

    #[error("Filtering for null values is not supported in Vespa ('{field}' {operator} null)")]
    NullNotSupported { field: String, operator: String },

    #[error("Filter value for '{field}' can't be a list using range operator '{operator}'")]
    ListNotSupportedForRange { field: String, operator: String },

    #[error("'{field}' value must be a list when using '{operator}'")]
    ExpectedList { field: String, operator: String },

    #[error("'{field}' filter with '{operator}' requires a non-empty list")]
    EmptyList { field: String, operator: String },

    #[error("Unsupported value type in '{field}' list: {kind}")]
    UnsupportedListElement { field: String, kind: &'static str },

    #[error("Unsupported filter value type for '{field}': {kind}")]
    UnsupportedValueType { field: String, kind: &'static str },

    /// Value has no YQL representation (infinite or NaN floats)
    #[error("Filter value {value} for '{field}' is not supported in Vespa YQL")]
    UnsupportedValue { field: String, value: String },
}

impl FilterError {
    /// Stable machine-readable code for mapping into API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "INVALID_INPUT",
            Self::InvalidCondition { .. } => "INVALID_CONDITION",
            Self::InvalidJson(_) => "INVALID_FILTER_JSON",
            Self::TooLarge { .. } => "FILTER_JSON_TOO_LARGE",
            Self::TooDeep { .. } => "FILTER_TOO_DEEP",
            Self::MissingAttribute { .. } => "MISSING_ATTRIBUTE",
            Self::InvalidAttribute { .. } => "INVALID_ATTRIBUTE",
            Self::AmbiguousNode { .. } => "AMBIGUOUS_NODE",
            Self::EmptyConditions { .. } => "EMPTY_CONDITIONS",
            Self::UnknownLogicalOperator(_) => "UNKNOWN_LOGICAL_OPERATOR",
            Self::UnknownComparisonOperator(_) => "UNKNOWN_COMPARISON_OPERATOR",
            Self::NullNotSupported { .. } => "NULL_NOT_SUPPORTED",
            Self::ListNotSupportedForRange { .. } => "LIST_NOT_SUPPORTED_FOR_RANGE",
            Self::ExpectedList { .. } => "EXPECTED_LIST",
            Self::EmptyList { .. } => "EMPTY_LIST",
            Self::UnsupportedListElement { .. } => "UNSUPPORTED_LIST_ELEMENT",
            Self::UnsupportedValueType { .. } => "UNSUPPORTED_VALUE_TYPE",
            Self::UnsupportedValue { .. } => "UNSUPPORTED_VALUE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_attribute_message_names_key_and_node() {
        let err = FilterError::MissingAttribute {
            attribute: "operator",
            node: r#"{"conditions":[]}"#.to_string(),
        };
        assert_eq!(err.to_string(), r#"'operator' key missing in {"conditions":[]}"#);
        assert_eq!(err.code(), "MISSING_ATTRIBUTE");
    }

    #[test]
    fn null_message_mentions_null() {
        let err = FilterError::NullNotSupported {
            field: "type".to_string(),
            operator: ">".to_string(),
        };
        assert!(err.to_string().contains("null"));
        assert!(err.to_string().contains("'type' >"));
    }

    #[test]
    fn empty_conditions_message_names_operator() {
        let err = FilterError::EmptyConditions {
            operator: "OR".to_string(),
        };
        assert_eq!(err.to_string(), "'OR' operator requires at least one condition");
    }
}
