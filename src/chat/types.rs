// ABOUTME: OpenAI-compatible chat completion types - function tools, tool
// ABOUTME: calls, choices and responses with passthrough of unknown fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Definition of a tool for an agent runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Function tool advertised in a chat completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionTool {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: FunctionSpec,
}

impl FunctionTool {
    /// Create a `"function"` tool.
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            tool_type: "function".to_string(),
            function: FunctionSpec {
                name: name.into(),
                description: description.into(),
                parameters,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }
}

impl From<&ToolDefinition> for FunctionTool {
    fn from(def: &ToolDefinition) -> Self {
        FunctionTool::new(
            def.name.clone(),
            def.description.clone(),
            def.input_schema.clone(),
        )
    }
}

/// Name, description and schema of a function tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSpec {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// A tool call emitted by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type", default = "function_type")]
    pub call_type: String,
    pub function: FunctionCall,
}

fn function_type() -> String {
    "function".to_string()
}

impl ToolCall {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            call_type: function_type(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }

    /// Whether the model left the call id blank.
    pub fn is_missing_id(&self) -> bool {
        self.id.trim().is_empty()
    }

    /// The call id, or a freshly generated `call_<uuid>` when it is blank.
    pub fn id_or_generated(&self) -> String {
        if self.is_missing_id() {
            generate_call_id()
        } else {
            self.id.clone()
        }
    }

    /// Parse the JSON-encoded arguments. Blank arguments parse as `{}`.
    pub fn parse_arguments(&self) -> Result<Value, serde_json::Error> {
        let raw = self.function.arguments.trim();
        if raw.is_empty() {
            return Ok(Value::Object(Map::new()));
        }
        serde_json::from_str(raw)
    }
}

/// A new `call_<uuid>` id for calls the model did not label.
pub fn generate_call_id() -> String {
    format!("call_{}", uuid::Uuid::new_v4().simple())
}

/// Function name and JSON-encoded arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub arguments: String,
}

/// Assistant message inside a completion choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AssistantMessage {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: Some(content.into()),
            tool_calls: None,
            extra: Map::new(),
        }
    }

    pub fn with_tool_calls(calls: Vec<ToolCall>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: None,
            tool_calls: Some(calls),
            extra: Map::new(),
        }
    }
}

/// One completion choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: usize,
    pub message: AssistantMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A chat completion response as produced by the model provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChatResponse {
    /// Build a response from assistant messages, one choice each.
    pub fn from_messages(
        id: impl Into<String>,
        model: impl Into<String>,
        messages: impl IntoIterator<Item = AssistantMessage>,
    ) -> Self {
        let choices = messages
            .into_iter()
            .enumerate()
            .map(|(index, message)| Choice {
                index,
                finish_reason: message.tool_calls.as_ref().map(|_| "tool_calls".to_string()),
                message,
                extra: Map::new(),
            })
            .collect();
        Self {
            id: id.into(),
            model: model.into(),
            choices,
            metadata: Map::new(),
            extra: Map::new(),
        }
    }

    /// Check if any choice carries tool calls.
    pub fn has_tool_calls(&self) -> bool {
        self.tool_calls().next().is_some()
    }

    /// All tool calls across choices, in choice order then call order.
    pub fn tool_calls(&self) -> impl Iterator<Item = &ToolCall> {
        self.choices
            .iter()
            .filter_map(|c| c.message.tool_calls.as_ref())
            .flatten()
    }

    /// Give every tool call with a blank id a generated `call_<uuid>` id.
    ///
    /// Returns how many ids were assigned.
    pub fn assign_missing_call_ids(&mut self) -> usize {
        let mut assigned = 0;
        for choice in &mut self.choices {
            for call in choice.message.tool_calls.iter_mut().flatten() {
                if call.is_missing_id() {
                    call.id = generate_call_id();
                    assigned += 1;
                }
            }
        }
        assigned
    }

    /// Concatenated text content of all choices.
    pub fn text(&self) -> String {
        self.choices
            .iter()
            .filter_map(|c| c.message.content.as_deref())
            .collect::<Vec<_>>()
            .join("")
    }
}
