//! String utility functions

use serde_json::Value as JsonValue;

/// Default maximum length for node previews in error messages (in characters)
pub const PREVIEW_MAX_LENGTH: usize = 200;

/// Truncate text to max length with ellipsis
pub fn truncate_preview(text: &str, max_len: usize) -> String {
    let text = text.trim();
    if text.chars().count() > max_len {
        format!("{}...", text.chars().take(max_len).collect::<String>())
    } else {
        text.to_string()
    }
}

/// Compact, truncated JSON rendering of a value for error context
pub fn json_preview(value: &JsonValue) -> String {
    truncate_preview(&value.to_string(), PREVIEW_MAX_LENGTH)
}

/// Human-readable name of a JSON value's type
pub fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "list",
        JsonValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truncate_preview_short() {
        assert_eq!(truncate_preview("  hello  ", 10), "hello");
    }

    #[test]
    fn test_truncate_preview_long() {
        assert_eq!(truncate_preview("abcdefghij", 4), "abcd...");
    }

    #[test]
    fn test_truncate_preview_multibyte() {
        assert_eq!(truncate_preview("ééééé", 2), "éé...");
    }

    #[test]
    fn test_json_preview_compact() {
        let value = json!({"operator": "AND"});
        assert_eq!(json_preview(&value), r#"{"operator":"AND"}"#);
    }

    #[test]
    fn test_json_preview_truncates() {
        let value = json!({"field": "x".repeat(500)});
        let preview = json_preview(&value);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), PREVIEW_MAX_LENGTH + 3);
    }

    #[test]
    fn test_json_kind() {
        assert_eq!(json_kind(&json!(null)), "null");
        assert_eq!(json_kind(&json!(true)), "boolean");
        assert_eq!(json_kind(&json!(1)), "number");
        assert_eq!(json_kind(&json!("a")), "string");
        assert_eq!(json_kind(&json!([])), "list");
        assert_eq!(json_kind(&json!({})), "object");
    }
}
