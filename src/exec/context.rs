// ABOUTME: Defines ExecutionContext - the per-call identity snapshot that
// ABOUTME: is forwarded to the automation engine as the `_context` envelope.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::catalog::Role;
use crate::profile::ProfileEntitlement;

/// Who is calling, built fresh for every execution.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pub role: Role,
    pub identity_id: String,
    pub display_name: Option<String>,
    pub profile: Option<ProfileEntitlement>,
    pub timestamp: DateTime<Utc>,
}

/// Profile fields shared with the engine. Grants are never forwarded.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileSnapshot<'a> {
    profile_type: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    department: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    company_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    security_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    permissions: Option<&'a [String]>,
}

/// Wire form of the `_context` envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<'a> {
    profile_type: Role,
    user_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
    timestamp: String,
    function_name: &'a str,
    profile: ProfileSnapshot<'a>,
}

impl ExecutionContext {
    /// Create a context stamped with the current time.
    pub fn new(role: Role, identity_id: impl Into<String>) -> Self {
        Self {
            role,
            identity_id: identity_id.into(),
            display_name: None,
            profile: None,
            timestamp: Utc::now(),
        }
    }

    /// Context for an identity resolved to `profile`, stamped now.
    pub fn for_profile(
        identity_id: impl Into<String>,
        display_name: Option<&str>,
        profile: ProfileEntitlement,
    ) -> Self {
        let mut context = Self::new(profile.role, identity_id);
        context.display_name = display_name.map(str::to_string);
        context.with_profile(profile)
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Attach the full entitlement so the engine sees department and tenant.
    pub fn with_profile(mut self, profile: ProfileEntitlement) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Build the `_context` value sent alongside the call parameters.
    pub fn envelope(&self, function_name: &str) -> Value {
        let profile = match &self.profile {
            Some(p) => ProfileSnapshot {
                profile_type: self.role,
                department: p.metadata.department.as_deref(),
                company_id: p.metadata.company_id.as_deref(),
                customer_id: p.metadata.customer_id.as_deref(),
                security_level: Some(p.metadata.security_level),
                permissions: Some(&p.permissions),
            },
            None => ProfileSnapshot {
                profile_type: self.role,
                department: None,
                company_id: None,
                customer_id: None,
                security_level: None,
                permissions: None,
            },
        };

        let envelope = Envelope {
            profile_type: self.role,
            user_id: &self.identity_id,
            username: self.display_name.as_deref(),
            timestamp: self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            function_name,
            profile,
        };
        serde_json::to_value(envelope).unwrap_or_else(|_| Value::Object(Map::new()))
    }

    /// Merge call parameters with the `_context` envelope.
    ///
    /// A caller-supplied `_context` key is overwritten.
    pub fn outbound_payload(&self, function_name: &str, parameters: Map<String, Value>) -> Value {
        let mut payload = parameters;
        payload.insert("_context".to_string(), self.envelope(function_name));
        Value::Object(payload)
    }
}
