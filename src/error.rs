// ABOUTME: Defines all error types for flowbridge using thiserror.
// ABOUTME: Each concern has its own error enum, unified under BridgeError.

use crate::catalog::Role;

/// Top-level error type for the flowbridge library.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Access error: {0}")]
    Access(#[from] AccessError),
}

/// Errors raised while building the workflow catalog. Always fatal.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Duplicate function name in catalog: {0}")]
    DuplicateFunction(String),

    #[error("Duplicate workflow id in catalog: {0}")]
    DuplicateWorkflow(String),

    #[error("Workflow '{0}' has no allowed roles")]
    NoAllowedRoles(String),
}

/// Errors from loading bridge configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from role-restricted or profile-bound operations.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    #[error("Operation '{operation}' requires an elevated role (caller is {role})")]
    ElevatedRoleRequired { operation: &'static str, role: Role },

    #[error("No profile found for identity '{0}'")]
    ProfileNotFound(String),

    #[error("Profile lookup failed: {0}")]
    Lookup(#[source] anyhow::Error),
}

/// Error returned when parsing an unrecognised role tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);
