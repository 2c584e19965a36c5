// ABOUTME: Defines ToolResult - the text an agent runtime feeds back to the
// ABOUTME: model after running a workflow tool, plus execution metadata.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::exec::ExecutionResult;

/// What a native agent loop receives from [`Tool::execute`](super::Tool::execute).
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    /// JSON payload on success, `{"error": ...}` on failure.
    pub content: String,
    pub is_error: bool,
    /// `function_name` and `executed_at` for workflow results.
    pub metadata: Map<String, Value>,
}

impl ToolResult {
    pub fn text(content: impl Into<String>) -> Self {
        Self::with_state(content.into(), false)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::with_state(message.into(), true)
    }

    /// Attach a metadata entry. Values that fail to serialize are skipped.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(value) = serde_json::to_value(value) {
            self.metadata.insert(key.into(), value);
        }
        self
    }

    fn with_state(content: String, is_error: bool) -> Self {
        Self {
            content,
            is_error,
            metadata: Map::new(),
        }
    }
}

impl From<&ExecutionResult> for ToolResult {
    fn from(result: &ExecutionResult) -> Self {
        let converted = match result.outcome() {
            Ok(data) => ToolResult::text(data.to_string()),
            Err(error) => ToolResult::error(serde_json::json!({ "error": error }).to_string()),
        };
        converted
            .with_metadata("function_name", result.function_name())
            .with_metadata("executed_at", result.executed_at())
    }
}
