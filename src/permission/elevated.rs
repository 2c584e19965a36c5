// ABOUTME: Role gate for administrative and diagnostic operations such as
// ABOUTME: clearing the tool cache or listing the full catalog.

use tracing::warn;

use crate::catalog::Role;
use crate::config::BridgeConfig;
use crate::error::AccessError;

/// Operations that require an elevated role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevatedOperation {
    ClearToolCache,
    ListWorkflowDefinitions,
}

impl ElevatedOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            ElevatedOperation::ClearToolCache => "clear_tool_cache",
            ElevatedOperation::ListWorkflowDefinitions => "list_workflow_definitions",
        }
    }
}

/// Which roles may run which elevated operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElevatedAccess {
    admin_roles: Vec<Role>,
    diagnostic_roles: Vec<Role>,
}

impl ElevatedAccess {
    pub fn new(admin_roles: Vec<Role>, diagnostic_roles: Vec<Role>) -> Self {
        Self {
            admin_roles,
            diagnostic_roles,
        }
    }

    pub fn from_config(config: &BridgeConfig) -> Self {
        Self::new(config.admin_roles.clone(), config.diagnostic_roles.clone())
    }

    /// Allow the operation or return [`AccessError::ElevatedRoleRequired`].
    pub fn require(&self, operation: ElevatedOperation, role: Role) -> Result<(), AccessError> {
        let allowed = match operation {
            ElevatedOperation::ClearToolCache => &self.admin_roles,
            ElevatedOperation::ListWorkflowDefinitions => &self.diagnostic_roles,
        };
        if allowed.contains(&role) {
            return Ok(());
        }
        warn!(%role, operation = operation.as_str(), "elevated operation refused");
        Err(AccessError::ElevatedRoleRequired {
            operation: operation.as_str(),
            role,
        })
    }
}

impl Default for ElevatedAccess {
    fn default() -> Self {
        Self::from_config(&BridgeConfig::default())
    }
}
