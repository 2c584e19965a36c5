// ABOUTME: Interceptor - post-processing stage that executes claimed tool
// ABOUTME: calls and returns an augmented copy of the chat response.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::chat::{ChatResponse, ToolCall};
use crate::exec::{
    CancellationToken, ErrorKind, ExecutionContext, ExecutionError, ExecutionResult,
    WorkflowExecutor,
};
use crate::format::{ToolResponseMessage, to_display_text, to_protocol_message};
use crate::permission::AuthorizationGuard;
use crate::tool::ToolDescriptor;

/// Metadata key holding the tool-response messages.
pub const TOOL_RESULTS_KEY: &str = "tool_results";

/// Metadata key set to `true` when some calls were cancelled.
pub const TOOL_RESULTS_CANCELLED_KEY: &str = "tool_results_cancelled";

/// Outcome of one executed tool call.
#[derive(Debug, Clone, PartialEq)]
pub struct CallResult {
    pub call_id: String,
    pub result: ExecutionResult,
}

impl CallResult {
    pub fn to_message(&self) -> ToolResponseMessage {
        to_protocol_message(&self.result, &self.call_id)
    }

    pub fn display_text(&self) -> String {
        to_display_text(&self.result, self.result.function_name())
    }

    pub fn is_cancelled(&self) -> bool {
        self.result
            .error()
            .is_some_and(|e| e.kind == ErrorKind::Cancelled)
    }
}

/// Terminal state of interception.
#[derive(Debug, Clone, PartialEq)]
pub enum Interception {
    /// Nothing was claimed; the response is unchanged.
    Passthrough(ChatResponse),
    /// Claimed calls ran and their results are attached under
    /// [`TOOL_RESULTS_KEY`].
    Augmented {
        response: ChatResponse,
        results: Vec<CallResult>,
        cancelled: bool,
    },
}

impl Interception {
    pub fn response(&self) -> &ChatResponse {
        match self {
            Interception::Passthrough(response) => response,
            Interception::Augmented { response, .. } => response,
        }
    }

    pub fn into_response(self) -> ChatResponse {
        match self {
            Interception::Passthrough(response) => response,
            Interception::Augmented { response, .. } => response,
        }
    }

    pub fn is_augmented(&self) -> bool {
        matches!(self, Interception::Augmented { .. })
    }

    /// Results in call order; empty on passthrough.
    pub fn results(&self) -> &[CallResult] {
        match self {
            Interception::Passthrough(_) => &[],
            Interception::Augmented { results, .. } => results,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Interception::Augmented { cancelled: true, .. })
    }
}

/// Executes tool calls for one identity, re-checking authorization per call.
#[derive(Clone)]
pub struct Interceptor {
    executor: Arc<dyn WorkflowExecutor>,
    guard: AuthorizationGuard,
}

impl Interceptor {
    pub fn new(executor: Arc<dyn WorkflowExecutor>, guard: AuthorizationGuard) -> Self {
        Self { executor, guard }
    }

    /// Execute claimed calls and attach their results to `response`.
    ///
    /// A call is claimed when its name matches one of `tools`. Unclaimed
    /// calls and all message content are left untouched.
    pub async fn intercept(
        &self,
        mut response: ChatResponse,
        tools: &[ToolDescriptor],
        context: &ExecutionContext,
        cancel: Option<&CancellationToken>,
    ) -> Interception {
        if !response.has_tool_calls() {
            return Interception::Passthrough(response);
        }

        let assigned = response.assign_missing_call_ids();
        if assigned > 0 {
            debug!(assigned, "generated ids for tool calls without one");
        }

        let names: HashSet<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        let claimed: Vec<ToolCall> = response
            .tool_calls()
            .filter(|call| names.contains(call.name()))
            .cloned()
            .collect();
        if claimed.is_empty() {
            debug!(identity = %context.identity_id, "no tool calls claimed");
            return Interception::Passthrough(response);
        }

        info!(
            identity = %context.identity_id,
            role = %context.role,
            claimed = claimed.len(),
            "processing workflow tool calls"
        );
        let results = self.execute_calls(&claimed, context, cancel).await;
        let cancelled = results.iter().any(CallResult::is_cancelled);

        let messages: Vec<ToolResponseMessage> =
            results.iter().map(CallResult::to_message).collect();
        response
            .metadata
            .insert(
                TOOL_RESULTS_KEY.to_string(),
                serde_json::to_value(&messages).unwrap_or_default(),
            );
        if cancelled {
            warn!(identity = %context.identity_id, "tool call results incomplete: request cancelled");
            response
                .metadata
                .insert(TOOL_RESULTS_CANCELLED_KEY.to_string(), Value::Bool(true));
        }

        Interception::Augmented {
            response,
            results,
            cancelled,
        }
    }

    /// Execute calls concurrently. Results follow input order.
    ///
    /// Calls with a blank id are answered under a generated `call_<uuid>` id.
    pub async fn execute_calls(
        &self,
        calls: &[ToolCall],
        context: &ExecutionContext,
        cancel: Option<&CancellationToken>,
    ) -> Vec<CallResult> {
        let futs = calls.iter().map(|call| async move {
            CallResult {
                call_id: call.id_or_generated(),
                result: self.execute_call(call, context, cancel).await,
            }
        });
        join_all(futs).await
    }

    async fn execute_call(
        &self,
        call: &ToolCall,
        context: &ExecutionContext,
        cancel: Option<&CancellationToken>,
    ) -> ExecutionResult {
        let function_name = call.name();
        let parameters = match call.parse_arguments() {
            Ok(parameters) => parameters,
            Err(e) => {
                warn!(function = function_name, error = %e, "unparsable tool call arguments");
                return ExecutionResult::failure(
                    function_name,
                    ExecutionError::malformed(format!(
                        "Invalid arguments for {}: {}",
                        function_name, e
                    )),
                );
            }
        };

        if let Err(denial) = self.guard.check(context.role, function_name) {
            return ExecutionResult::failure(
                function_name,
                denial.into_error(context.role, function_name),
            );
        }

        let execution = self.executor.execute(function_name, parameters, context);
        let Some(token) = cancel else {
            return execution.await;
        };

        tokio::select! {
            biased;
            () = token.cancelled() => {
                warn!(function = function_name, call = %call.id, "tool call cancelled");
                ExecutionResult::failure(function_name, ExecutionError::cancelled(function_name))
            }
            result = execution => result,
        }
    }
}
