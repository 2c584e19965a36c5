// ABOUTME: Implements the Registry - an ordered, thread-safe set of tools
// ABOUTME: handed to an agent runtime for one identity's conversation.

use std::sync::Arc;

use tokio::sync::RwLock;

use super::Tool;
use crate::chat::{FunctionTool, ToolDefinition};

/// Tools bound to one caller, kept in registration order. Cloning shares the list.
#[derive(Default, Clone)]
pub struct Registry {
    tools: Arc<RwLock<Vec<Arc<dyn Tool>>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any tool with the same name in place.
    pub async fn register<T: Tool + 'static>(&self, tool: T) {
        self.register_arc(Arc::new(tool)).await;
    }

    /// Shared-ownership form of [`register`](Self::register).
    pub async fn register_arc(&self, tool: Arc<dyn Tool>) {
        let mut tools = self.tools.write().await;
        match tools.iter().position(|t| t.name() == tool.name()) {
            Some(index) => tools[index] = tool,
            None => tools.push(tool),
        }
    }

    /// Find a tool by its advertised name.
    pub async fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let tools = self.tools.read().await;
        tools.iter().find(|t| t.name() == name).cloned()
    }

    /// List tool names in registration order.
    pub async fn list(&self) -> Vec<String> {
        let tools = self.tools.read().await;
        tools.iter().map(|t| t.name().to_string()).collect()
    }

    pub async fn count(&self) -> usize {
        self.tools.read().await.len()
    }

    /// Agent-runtime definitions in registration order.
    pub async fn to_definitions(&self) -> Vec<ToolDefinition> {
        let tools = self.tools.read().await;
        tools.iter().map(|t| t.to_definition()).collect()
    }

    /// Chat-completion function tools in registration order.
    pub async fn to_function_tools(&self) -> Vec<FunctionTool> {
        let tools = self.tools.read().await;
        tools.iter().map(|t| t.to_function_tool()).collect()
    }
}
