// ABOUTME: Defines ToolDescriptor - a catalog workflow materialized as an
// ABOUTME: agent-facing function tool, plus internal routing metadata.

use serde::Serialize;
use serde_json::Value;

use crate::catalog::{Role, WorkflowDefinition};
use crate::chat::{FunctionTool, ToolDefinition};
use crate::profile::WorkflowGrant;

/// Internal routing data. Never sent to the agent or the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolMetadata {
    pub workflow_id: String,
    pub endpoint: String,
    pub display_name: Option<String>,
    pub allowed_roles: Vec<Role>,
}

/// A function tool derived from a catalog entry for a specific grant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: Value,
    #[serde(skip)]
    pub metadata: ToolMetadata,
}

impl ToolDescriptor {
    /// Build a descriptor with the schema copied from the definition.
    pub fn from_definition(def: &WorkflowDefinition, grant: &WorkflowGrant) -> Self {
        Self {
            name: def.function_name.clone(),
            description: def.description.clone(),
            parameters: def.parameters.to_json_schema(),
            metadata: ToolMetadata {
                workflow_id: def.id.clone(),
                endpoint: def.endpoint.clone(),
                display_name: grant.workflow_name.clone(),
                allowed_roles: def.allowed_roles.clone(),
            },
        }
    }

    /// Protocol form for chat completion requests.
    pub fn to_function_tool(&self) -> FunctionTool {
        FunctionTool::new(
            self.name.clone(),
            self.description.clone(),
            self.parameters.clone(),
        )
    }

    /// Agent-runtime form.
    pub fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name.clone(),
            description: self.description.clone(),
            input_schema: self.parameters.clone(),
        }
    }
}
