// ABOUTME: Tool-response messages - the function-result record an agent
// ABOUTME: expects back for each tool call it emitted.

use serde::{Deserialize, Serialize};

use crate::exec::ExecutionResult;

/// A `role: "tool"` chat message answering one tool call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResponseMessage {
    pub role: String,
    pub tool_call_id: String,
    pub name: String,
    /// The serialized [`ExecutionResult`].
    pub content: String,
}

impl ToolResponseMessage {
    /// Decode the execution result carried in `content`.
    pub fn execution_result(&self) -> Result<ExecutionResult, serde_json::Error> {
        serde_json::from_str(&self.content)
    }
}

/// Wrap a result as the tool message for `call_id`.
pub fn to_protocol_message(result: &ExecutionResult, call_id: &str) -> ToolResponseMessage {
    let content = serde_json::to_string(result).unwrap_or_else(|e| {
        serde_json::json!({
            "success": false,
            "functionName": result.function_name(),
            "error": { "kind": "malformed_input", "message": e.to_string() },
        })
        .to_string()
    });

    ToolResponseMessage {
        role: "tool".to_string(),
        tool_call_id: call_id.to_string(),
        name: result.function_name().to_string(),
        content,
    }
}
