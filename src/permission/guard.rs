// ABOUTME: Authorization guard - decides at call time whether a role may
// ABOUTME: invoke a catalog function, independent of any cached tool list.

use std::sync::Arc;

use tracing::warn;

use crate::catalog::{Catalog, Role, WorkflowDefinition};
use crate::exec::ExecutionError;

/// Why a role was refused a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// The catalog has no such function.
    UnknownFunction,
    /// The function exists but the role is not in its allowed set.
    RoleNotAllowed,
}

/// Checks (role, function) pairs against the catalog.
#[derive(Debug, Clone)]
pub struct AuthorizationGuard {
    catalog: Arc<Catalog>,
}

impl AuthorizationGuard {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// True only if the function exists and allows the role.
    pub fn authorize(&self, role: Role, function_name: &str) -> bool {
        self.check(role, function_name).is_ok()
    }

    /// Resolve the definition a role may invoke, or explain the refusal.
    ///
    /// Refusals are logged for audit.
    pub fn check(&self, role: Role, function_name: &str) -> Result<&WorkflowDefinition, Denial> {
        let Some(def) = self.catalog.lookup(function_name) else {
            warn!(%role, function = function_name, "authorization denied: unknown function");
            return Err(Denial::UnknownFunction);
        };
        if !def.allows(role) {
            warn!(%role, function = function_name, "authorization denied: role not allowed");
            return Err(Denial::RoleNotAllowed);
        }
        Ok(def)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

impl Denial {
    /// Convert into the execution error reported back to the agent.
    pub fn into_error(self, role: Role, function_name: &str) -> ExecutionError {
        match self {
            Denial::UnknownFunction => ExecutionError::not_found(function_name),
            Denial::RoleNotAllowed => ExecutionError::forbidden(role, function_name),
        }
    }
}
