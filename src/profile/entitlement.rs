// ABOUTME: Defines ProfileEntitlement - an identity's role, granted workflow
// ABOUTME: references and descriptive metadata as stored externally.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Role;

/// Reference from a profile to a catalog workflow.
///
/// Overrides are informational. Dispatch always uses the catalog endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowGrant {
    pub workflow_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl WorkflowGrant {
    pub fn new(workflow_id: impl Into<String>) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            workflow_name: None,
            endpoint: None,
            description: None,
        }
    }

    /// Set the display name shown for this grant.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.workflow_name = Some(name.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Free-form descriptive data about a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(default = "default_security_level")]
    pub security_level: u8,
    #[serde(default, flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

fn default_security_level() -> u8 {
    1
}

impl Default for ProfileMetadata {
    fn default() -> Self {
        Self {
            department: None,
            company_id: None,
            customer_id: None,
            security_level: default_security_level(),
            extra: BTreeMap::new(),
        }
    }
}

/// Everything the bridge knows about an identity's access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileEntitlement {
    pub role: Role,
    #[serde(default)]
    pub grants: Vec<WorkflowGrant>,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub metadata: ProfileMetadata,
}

impl ProfileEntitlement {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            grants: Vec::new(),
            permissions: Vec::new(),
            metadata: ProfileMetadata::default(),
        }
    }

    pub fn grant(mut self, grant: WorkflowGrant) -> Self {
        self.grants.push(grant);
        self
    }

    pub fn permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.push(permission.into());
        self
    }

    pub fn metadata(mut self, metadata: ProfileMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Find the grant for a workflow id, if any.
    pub fn grant_for(&self, workflow_id: &str) -> Option<&WorkflowGrant> {
        self.grants.iter().find(|g| g.workflow_id == workflow_id)
    }
}
