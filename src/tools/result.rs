// ABOUTME: Defines ToolResult, the value returned by tool execution.
// ABOUTME: Bridges tool implementations with the MCP tool response format.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde_json::Value;

/// Result returned by tool execution.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    /// The result value; strings are sent as text content, anything else as JSON
    pub content: Value,
    /// Whether this result represents an error condition
    pub is_error: bool,
}

impl ToolResult {
    /// Create a simple successful result with just content
    #[must_use]
    pub const fn ok(content: Value) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    /// Create a text result (convenience method)
    #[must_use]
    pub fn text(message: impl Into<String>) -> Self {
        Self::ok(Value::String(message.into()))
    }

    /// Content as text: strings verbatim, other values as compact JSON
    #[must_use]
    pub fn text_content(&self) -> String {
        match &self.content {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }

    /// Content as an MCP `structuredContent` object, if it is not plain text
    ///
    /// Non-object values are wrapped as `{"result": value}`.
    #[must_use]
    pub fn structured_content(&self) -> Option<Value> {
        match &self.content {
            Value::String(_) | Value::Null => None,
            Value::Object(_) => Some(self.content.clone()),
            other => Some(serde_json::json!({ "result": other })),
        }
    }
}

impl Default for ToolResult {
    fn default() -> Self {
        Self::ok(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_result_has_no_structured_content() {
        let result = ToolResult::text("# Workout");
        assert_eq!(result.text_content(), "# Workout");
        assert!(result.structured_content().is_none());
    }

    #[test]
    fn test_array_result_is_wrapped() {
        let result = ToolResult::ok(json!(["2025-01-01"]));
        assert_eq!(result.text_content(), r#"["2025-01-01"]"#);
        assert_eq!(
            result.structured_content(),
            Some(json!({"result": ["2025-01-01"]}))
        );
    }
}
