// ABOUTME: WorkflowTool - a materialized workflow bound to one caller, usable
// ABOUTME: as a native Tool by an agent runtime.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use super::{Tool, ToolDescriptor, ToolResult};
use crate::exec::{ErrorKind, ExecutionContext, ExecutionError, ExecutionResult, WorkflowExecutor};
use crate::profile::ProfileLookup;

/// Executes one workflow on behalf of one identity.
///
/// The profile is looked up on every call and the context is stamped at call
/// time.
pub struct WorkflowTool {
    descriptor: ToolDescriptor,
    identity_id: String,
    display_name: Option<String>,
    profiles: Arc<dyn ProfileLookup>,
    executor: Arc<dyn WorkflowExecutor>,
}

impl WorkflowTool {
    pub fn new(
        descriptor: ToolDescriptor,
        identity_id: impl Into<String>,
        profiles: Arc<dyn ProfileLookup>,
        executor: Arc<dyn WorkflowExecutor>,
    ) -> Self {
        Self {
            descriptor,
            identity_id: identity_id.into(),
            display_name: None,
            profiles,
            executor,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }
}

#[async_trait]
impl Tool for WorkflowTool {
    fn name(&self) -> &str {
        &self.descriptor.name
    }

    fn description(&self) -> &str {
        &self.descriptor.description
    }

    fn schema(&self) -> serde_json::Value {
        self.descriptor.parameters.clone()
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        let name = &self.descriptor.name;
        let Some(profile) = self.profiles.find_entitlement(&self.identity_id).await? else {
            warn!(identity = %self.identity_id, function = %name, "profile gone, call refused");
            let error = ExecutionError::new(
                ErrorKind::Forbidden,
                format!("No profile found for {}", self.identity_id),
            );
            return Ok(ToolResult::from(&ExecutionResult::failure(name.as_str(), error)));
        };

        let context = ExecutionContext::for_profile(
            self.identity_id.as_str(),
            self.display_name.as_deref(),
            profile,
        );
        let result = self.executor.execute(name, params, &context).await;
        Ok(ToolResult::from(&result))
    }
}
