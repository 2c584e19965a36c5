// ABOUTME: ExecutionBridge - dispatches one authorized workflow call to the
// ABOUTME: automation engine over HTTP and normalizes the outcome.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::{ExecutionContext, ExecutionError, ExecutionResult};
use crate::catalog::Catalog;
use crate::config::BridgeConfig;
use crate::error::ConfigError;
use crate::permission::AuthorizationGuard;

/// Anything that can run a workflow function for a caller.
///
/// Implementations never fail outright: every problem is reported in the
/// returned [`ExecutionResult`].
#[async_trait]
pub trait WorkflowExecutor: Send + Sync {
    async fn execute(
        &self,
        function_name: &str,
        parameters: Value,
        context: &ExecutionContext,
    ) -> ExecutionResult;
}

/// Executes workflows by POSTing to the automation engine.
///
/// Performs exactly one HTTP request per call and no retries.
#[derive(Debug, Clone)]
pub struct ExecutionBridge {
    guard: AuthorizationGuard,
    http: reqwest::Client,
    base_url: String,
    api_key: Option<(String, String)>,
}

impl ExecutionBridge {
    /// Create a bridge with an HTTP client built from the config timeout.
    pub fn new(catalog: Arc<Catalog>, config: &BridgeConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(format!("flowbridge/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                key: "http_client".to_string(),
                message: e.to_string(),
            })?;
        Ok(Self::with_client(catalog, config, http))
    }

    /// Create a bridge with a custom reqwest client.
    pub fn with_client(catalog: Arc<Catalog>, config: &BridgeConfig, http: reqwest::Client) -> Self {
        Self {
            guard: AuthorizationGuard::new(catalog),
            http,
            base_url: config.base_url().to_string(),
            api_key: config
                .api_key
                .clone()
                .map(|key| (config.api_key_header.clone(), key)),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn dispatch(&self, function_name: &str, url: &str, payload: &Value) -> ExecutionResult {
        let mut request = self
            .http
            .post(url)
            .header("Content-Type", "application/json")
            .json(payload);
        if let Some((header, key)) = &self.api_key {
            request = request.header(header.as_str(), key.as_str());
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let reason = if e.is_timeout() {
                    "request timed out"
                } else if e.is_connect() {
                    "connection failed"
                } else {
                    "no response received"
                };
                error!(function = function_name, url, error = %e, "automation engine unreachable");
                return ExecutionResult::failure(function_name, ExecutionError::unreachable(reason));
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                error!(function = function_name, error = %e, "failed reading engine response");
                let reason = if e.is_timeout() {
                    "request timed out"
                } else {
                    "response interrupted"
                };
                return ExecutionResult::failure(function_name, ExecutionError::unreachable(reason));
            }
        };
        let payload = parse_body(&body);

        if !status.is_success() {
            let message = remote_message(payload.as_ref())
                .unwrap_or_else(|| format!("Workflow execution failed (HTTP {})", status.as_u16()));
            error!(
                function = function_name,
                status = status.as_u16(),
                message = %message,
                "automation engine returned an error"
            );
            return ExecutionResult::failure(
                function_name,
                ExecutionError::remote(status.as_u16(), message, payload),
            );
        }

        info!(
            function = function_name,
            status = status.as_u16(),
            "workflow executed successfully"
        );
        ExecutionResult::success(function_name, payload.unwrap_or(Value::Null))
    }
}

#[async_trait]
impl WorkflowExecutor for ExecutionBridge {
    async fn execute(
        &self,
        function_name: &str,
        parameters: Value,
        context: &ExecutionContext,
    ) -> ExecutionResult {
        let def = match self.guard.check(context.role, function_name) {
            Ok(def) => def,
            Err(denial) => {
                return ExecutionResult::failure(
                    function_name,
                    denial.into_error(context.role, function_name),
                );
            }
        };

        let coerced = match def.parameters.validate(&parameters) {
            Ok(coerced) => coerced,
            Err(violation) => {
                warn!(function = function_name, %violation, "rejecting malformed arguments");
                return ExecutionResult::failure(
                    function_name,
                    ExecutionError::malformed(violation.to_string()),
                );
            }
        };
        for violation in &coerced.violations {
            warn!(function = function_name, %violation, "argument does not match schema");
        }

        let url = format!("{}{}", self.base_url, def.endpoint);
        let payload = context.outbound_payload(function_name, coerced.arguments);
        debug!(
            function = function_name,
            url = %url,
            role = %context.role,
            has_profile = context.profile.is_some(),
            "calling automation engine"
        );

        self.dispatch(function_name, &url, &payload).await
    }
}

/// Parse a response body as JSON, falling back to a string. Empty is `None`.
fn parse_body(body: &str) -> Option<Value> {
    if body.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string())))
}

/// Pull a human-readable message out of an engine error payload.
fn remote_message(payload: Option<&Value>) -> Option<String> {
    let payload = payload?;
    if let Some(text) = payload.as_str() {
        return Some(text.to_string());
    }
    ["message", "error"]
        .iter()
        .find_map(|key| match payload.get(*key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Object(inner)) => inner
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(""), None);
        assert_eq!(parse_body("  \n"), None);
        assert_eq!(parse_body(r#"{"ok":true}"#), Some(json!({"ok": true})));
        assert_eq!(parse_body("plain text"), Some(json!("plain text")));
    }

    #[test]
    fn test_remote_message() {
        assert_eq!(
            remote_message(Some(&json!({"message": "boom"}))).as_deref(),
            Some("boom")
        );
        assert_eq!(
            remote_message(Some(&json!({"error": {"message": "nested"}}))).as_deref(),
            Some("nested")
        );
        assert_eq!(
            remote_message(Some(&json!({"error": "flat"}))).as_deref(),
            Some("flat")
        );
        assert_eq!(remote_message(Some(&json!("Bad Gateway"))).as_deref(), Some("Bad Gateway"));
        assert_eq!(remote_message(Some(&json!({"code": 7}))), None);
        assert_eq!(remote_message(None), None);
    }
}
