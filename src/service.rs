// ABOUTME: ToolBridge - the explicitly constructed service that ties the
// ABOUTME: catalog, profile lookup, tool cache, executor and interceptor together.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, Role, WorkflowDefinition};
use crate::chat::{ChatResponse, FunctionTool, ToolCall};
use crate::config::BridgeConfig;
use crate::error::{AccessError, BridgeError};
use crate::exec::{
    CancellationToken, ExecutionBridge, ExecutionContext, ExecutionResult, WorkflowExecutor,
};
use crate::format::ToolResponseMessage;
use crate::intercept::{CallResult, Interception, Interceptor};
use crate::permission::{AuthorizationGuard, ElevatedAccess, ElevatedOperation};
use crate::profile::{ProfileEntitlement, ProfileLookup};
use crate::tool::{Materializer, Registry, ToolDescriptor, WorkflowTool};

/// The authenticated caller of a chat request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub display_name: Option<String>,
}

impl Identity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
        }
    }

    pub fn named(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }
}

impl From<&str> for Identity {
    fn from(id: &str) -> Self {
        Identity::new(id)
    }
}

/// Outcome of [`ToolBridge::inject_tools`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Injection {
    /// Number of workflow tools appended.
    pub added: usize,
    /// Workflow names not injected because a caller tool already uses them.
    /// Pass these to [`ToolBridge::intercept_excluding`] so calls to the
    /// caller's own tools are left alone.
    pub shadowed: Vec<String>,
}

/// Capability-scoped tool bridge. Cloning shares the cache and collaborators.
#[derive(Clone)]
pub struct ToolBridge {
    catalog: Arc<Catalog>,
    profiles: Arc<dyn ProfileLookup>,
    executor: Arc<dyn WorkflowExecutor>,
    materializer: Materializer,
    interceptor: Interceptor,
    elevated: ElevatedAccess,
}

impl ToolBridge {
    /// Create a bridge that dispatches to the engine configured in `config`.
    pub fn new(
        catalog: Arc<Catalog>,
        config: &BridgeConfig,
        profiles: Arc<dyn ProfileLookup>,
    ) -> Result<Self, BridgeError> {
        let bridge = ExecutionBridge::new(Arc::clone(&catalog), config)?;
        info!(
            engine = bridge.base_url(),
            workflows = catalog.len(),
            "tool bridge ready"
        );
        Ok(Self::with_executor(
            catalog,
            config,
            profiles,
            Arc::new(bridge),
        ))
    }

    /// Built-in catalog and environment configuration.
    pub fn from_env(profiles: Arc<dyn ProfileLookup>) -> Result<Self, BridgeError> {
        let catalog = Arc::new(Catalog::builtin()?);
        let config = BridgeConfig::from_env()?;
        Self::new(catalog, &config, profiles)
    }

    /// Create a bridge around a custom executor, e.g. one wrapped in a retry
    /// policy.
    pub fn with_executor(
        catalog: Arc<Catalog>,
        config: &BridgeConfig,
        profiles: Arc<dyn ProfileLookup>,
        executor: Arc<dyn WorkflowExecutor>,
    ) -> Self {
        let guard = AuthorizationGuard::new(Arc::clone(&catalog));
        Self {
            materializer: Materializer::new(Arc::clone(&catalog)),
            interceptor: Interceptor::new(Arc::clone(&executor), guard),
            elevated: ElevatedAccess::from_config(config),
            catalog,
            profiles,
            executor,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Tools an identity may see. Empty when it has no profile.
    pub async fn tools_for(&self, identity: &Identity) -> Vec<ToolDescriptor> {
        match self.resolve(identity).await {
            Some((_, tools)) => tools.to_vec(),
            None => Vec::new(),
        }
    }

    /// Protocol form of [`tools_for`](Self::tools_for).
    pub async fn function_tools_for(&self, identity: &Identity) -> Vec<FunctionTool> {
        self.tools_for(identity)
            .await
            .iter()
            .map(ToolDescriptor::to_function_tool)
            .collect()
    }

    /// Append the identity's tools to a request's existing tool list.
    ///
    /// A workflow whose name the list already uses is not added and is
    /// reported in [`Injection::shadowed`].
    pub async fn inject_tools(
        &self,
        identity: &Identity,
        tools: &mut Vec<FunctionTool>,
    ) -> Injection {
        let before = tools.len();
        let mut shadowed = Vec::new();
        for tool in self.function_tools_for(identity).await {
            if tools.iter().any(|t| t.name() == tool.name()) {
                warn!(
                    identity = %identity.id,
                    tool = tool.name(),
                    "request already defines this tool name, workflow not injected"
                );
                shadowed.push(tool.name().to_string());
                continue;
            }
            tools.push(tool);
        }

        let added = tools.len() - before;
        info!(identity = %identity.id, added, total = tools.len(), "injected workflow tools");
        Injection { added, shadowed }
    }

    /// A registry of native tools bound to the identity.
    ///
    /// Each tool looks the profile up again and builds a fresh context on
    /// every call, so a long-lived registry never sends a stale snapshot.
    pub async fn registry_for(&self, identity: &Identity) -> Registry {
        let registry = Registry::new();
        if let Some((_, tools)) = self.resolve(identity).await {
            for descriptor in tools.iter() {
                let mut tool = WorkflowTool::new(
                    descriptor.clone(),
                    identity.id.clone(),
                    Arc::clone(&self.profiles),
                    Arc::clone(&self.executor),
                );
                if let Some(name) = &identity.display_name {
                    tool = tool.with_display_name(name.clone());
                }
                registry.register(tool).await;
            }
        }
        registry
    }

    /// Execute one workflow for an identity outside of a chat response.
    pub async fn execute_direct(
        &self,
        identity: &Identity,
        function_name: &str,
        parameters: Value,
    ) -> Result<ExecutionResult, AccessError> {
        let profile = self.require_profile(identity).await?;
        let context = self.context(identity, profile);
        Ok(self
            .executor
            .execute(function_name, parameters, &context)
            .await)
    }

    /// Execute tool calls for an identity, answering each in call order.
    pub async fn process_tool_calls(
        &self,
        identity: &Identity,
        calls: &[ToolCall],
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<ToolResponseMessage>, AccessError> {
        let profile = self.require_profile(identity).await?;
        let context = self.context(identity, profile);
        let results = self
            .interceptor
            .execute_calls(calls, &context, cancel)
            .await;
        Ok(results.iter().map(CallResult::to_message).collect())
    }

    /// Run the interception stage over a model response.
    ///
    /// Identities without a profile get the response back unchanged.
    pub async fn intercept(
        &self,
        identity: &Identity,
        response: ChatResponse,
        cancel: Option<&CancellationToken>,
    ) -> Interception {
        self.intercept_excluding(identity, response, &[], cancel)
            .await
    }

    /// [`intercept`](Self::intercept) that leaves calls to `excluded` names
    /// unclaimed, typically [`Injection::shadowed`].
    pub async fn intercept_excluding(
        &self,
        identity: &Identity,
        response: ChatResponse,
        excluded: &[String],
        cancel: Option<&CancellationToken>,
    ) -> Interception {
        if !response.has_tool_calls() {
            return Interception::Passthrough(response);
        }
        let Some((profile, tools)) = self.resolve(identity).await else {
            return Interception::Passthrough(response);
        };

        let claimable: Vec<ToolDescriptor> = tools
            .iter()
            .filter(|tool| !excluded.contains(&tool.name))
            .cloned()
            .collect();
        if claimable.len() < tools.len() {
            debug!(
                identity = %identity.id,
                excluded = tools.len() - claimable.len(),
                "shadowed workflow tools left unclaimed"
            );
        }

        let context = self.context(identity, profile);
        self.interceptor
            .intercept(response, &claimable, &context, cancel)
            .await
    }

    /// Drop every cached tool list. Admin only.
    pub async fn clear_tool_cache(&self, caller: Role) -> Result<(), AccessError> {
        self.elevated
            .require(ElevatedOperation::ClearToolCache, caller)?;
        self.materializer.clear().await;
        Ok(())
    }

    /// The full catalog, for diagnostics.
    pub fn list_all_workflow_definitions(
        &self,
        caller: Role,
    ) -> Result<&[WorkflowDefinition], AccessError> {
        self.elevated
            .require(ElevatedOperation::ListWorkflowDefinitions, caller)?;
        Ok(self.catalog.entries())
    }

    async fn require_profile(&self, identity: &Identity) -> Result<ProfileEntitlement, AccessError> {
        self.profiles
            .find_entitlement(&identity.id)
            .await
            .map_err(AccessError::Lookup)?
            .ok_or_else(|| AccessError::ProfileNotFound(identity.id.clone()))
    }

    /// Profile plus cached tools, or `None` when the identity has no usable
    /// profile.
    async fn resolve(
        &self,
        identity: &Identity,
    ) -> Option<(ProfileEntitlement, Arc<[ToolDescriptor]>)> {
        let profile = match self.require_profile(identity).await {
            Ok(profile) => profile,
            Err(AccessError::ProfileNotFound(_)) => {
                warn!(identity = %identity.id, "no profile found");
                return None;
            }
            Err(e) => {
                warn!(identity = %identity.id, error = %e, "profile lookup failed");
                return None;
            }
        };

        let tools = self
            .materializer
            .tools_for(profile.role, &profile.grants)
            .await;
        Some((profile, tools))
    }

    fn context(&self, identity: &Identity, profile: ProfileEntitlement) -> ExecutionContext {
        ExecutionContext::for_profile(identity.id.clone(), identity.display_name.as_deref(), profile)
    }
}
