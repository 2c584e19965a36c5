// ABOUTME: Defines ExecutionResult - the normalized outcome of one workflow
// ABOUTME: invocation, shared by every call site regardless of transport.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

static NULL: Value = Value::Null;

/// Failure classes for a workflow invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Unknown function name.
    NotFound,
    /// Role not entitled to the function.
    Forbidden,
    /// Engine answered with a non-2xx status.
    RemoteError,
    /// Timeout or connection failure.
    Unreachable,
    /// Arguments could not be interpreted.
    MalformedInput,
    /// The surrounding request was cancelled before the call finished.
    Cancelled,
}

/// Structured failure details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionError {
    pub kind: ErrorKind,
    pub message: String,
    /// Remote HTTP status, only for [`ErrorKind::RemoteError`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Remote error payload, if the engine sent one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ExecutionError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: None,
            details: None,
        }
    }

    pub fn not_found(function_name: &str) -> Self {
        Self::new(
            ErrorKind::NotFound,
            format!("Function not found: {}", function_name),
        )
    }

    pub fn forbidden(role: impl std::fmt::Display, function_name: &str) -> Self {
        Self::new(
            ErrorKind::Forbidden,
            format!("Profile {} not authorized for {}", role, function_name),
        )
    }

    pub fn remote(status: u16, message: impl Into<String>, details: Option<Value>) -> Self {
        Self {
            kind: ErrorKind::RemoteError,
            message: message.into(),
            code: Some(status),
            details,
        }
    }

    pub fn unreachable(reason: impl std::fmt::Display) -> Self {
        Self::new(
            ErrorKind::Unreachable,
            format!(
                "Automation engine not responding ({}). Please check connection.",
                reason
            ),
        )
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedInput, message)
    }

    pub fn cancelled(function_name: &str) -> Self {
        Self::new(
            ErrorKind::Cancelled,
            format!("Call to {} cancelled before completion", function_name),
        )
    }
}

/// Normalized result of an execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    success: bool,
    function_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<ExecutionError>,
    executed_at: DateTime<Utc>,
}

impl ExecutionResult {
    /// A successful result carrying the engine's response body.
    pub fn success(function_name: impl Into<String>, data: Value) -> Self {
        Self {
            success: true,
            function_name: function_name.into(),
            data: Some(data),
            error: None,
            executed_at: Utc::now(),
        }
    }

    pub fn failure(function_name: impl Into<String>, error: ExecutionError) -> Self {
        Self {
            success: false,
            function_name: function_name.into(),
            data: None,
            error: Some(error),
            executed_at: Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    /// Response payload. `None` for failures.
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Failure details. `None` for successes.
    pub fn error(&self) -> Option<&ExecutionError> {
        self.error.as_ref()
    }

    pub fn executed_at(&self) -> DateTime<Utc> {
        self.executed_at
    }

    /// View the result as a `Result`.
    pub fn outcome(&self) -> Result<&Value, &ExecutionError> {
        match (&self.data, &self.error) {
            (_, Some(error)) => Err(error),
            (Some(data), None) => Ok(data),
            (None, None) => Ok(&NULL),
        }
    }
}
