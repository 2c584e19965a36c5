// ABOUTME: Defines the Tool trait - how a native agent runtime sees one
// ABOUTME: workflow capability, independent of the transport behind it.

use async_trait::async_trait;
use serde_json::Value;

use super::ToolResult;
use crate::chat::{FunctionTool, ToolDefinition};

/// A named capability with a JSON Schema for its arguments.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    /// Text the model reads when deciding whether to call the tool.
    fn description(&self) -> &str;

    /// JSON Schema of the argument object.
    fn schema(&self) -> Value;

    /// Run with model-supplied arguments.
    ///
    /// Workflow failures come back as an error [`ToolResult`]; `Err` is
    /// reserved for the tool itself being unusable.
    async fn execute(&self, params: Value) -> Result<ToolResult, anyhow::Error>;

    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.schema(),
        }
    }

    fn to_function_tool(&self) -> FunctionTool {
        FunctionTool::new(self.name(), self.description(), self.schema())
    }
}
