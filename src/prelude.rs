// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use flowbridge::prelude::*;` to get started quickly.

pub use crate::catalog::{Catalog, ParamSpec, ParameterSchema, Role, WorkflowDefinition};
pub use crate::chat::{AssistantMessage, ChatResponse, FunctionTool, ToolCall};
pub use crate::config::BridgeConfig;
pub use crate::error::{AccessError, BridgeError, CatalogError, ConfigError};
pub use crate::exec::{
    CancellationToken, ErrorKind, ExecutionBridge, ExecutionContext, ExecutionError,
    ExecutionResult, WorkflowExecutor,
};
pub use crate::format::{ToolResponseMessage, to_display_text, to_protocol_message};
pub use crate::intercept::{CallResult, Interception};
pub use crate::permission::AuthorizationGuard;
pub use crate::profile::{
    InMemoryProfiles, ProfileEntitlement, ProfileLookup, ProfileMetadata, WorkflowGrant,
};
pub use crate::service::{Identity, Injection, ToolBridge};
pub use crate::telemetry::init_tracing;
pub use crate::tool::{Registry, Tool, ToolDescriptor, ToolResult};
