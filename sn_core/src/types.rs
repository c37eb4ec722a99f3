use serde::{Deserialize, Serialize};

/// Permission granting blanket access to every tenant in the hierarchy,
/// bypassing assignment and ancestry checks (but never tenant validity).
pub const ACCESS_ALL_TENANTS: &str = "ACCESS_ALL_TENANTS";

/// Opaque identifier of a node in the rooted tenant tree.
///
/// The directory is the only authority on which identifiers exist; this type
/// only guarantees the identifier is non-blank, since a blank value on the
/// wire means "absent". Deserialization funnels through [`TenantId::new`],
/// so the guarantee holds for identifiers arriving off the wire too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(try_from = "String")]
pub struct TenantId(String);

impl TenantId {
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TenantId {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_string())
    }
}

impl TryFrom<String> for TenantId {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| anyhow::anyhow!("blank tenant id"))
    }
}

/// Identity snapshot returned by the directory's `check_token` endpoint.
///
/// Only `permissions` and `assigned_tenants` drive access decisions; the
/// remaining claims are informational pass-through. Every field tolerates
/// absence and unknown response fields are ignored, so directory-side schema
/// additions never break deserialization. The snapshot is immutable: a fresh
/// introspection call is required to observe token changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityContext {
    pub iss: Option<String>,
    pub sub: Option<String>,
    pub aud: Option<String>,
    pub exp: i64,
    pub iat: i64,
    pub jti: Option<String>,
    pub auth_time: i64,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub email: Option<String>,
    pub locale: Option<String>,
    pub active: bool,
    pub scope: Vec<String>,
    pub client_id: Option<String>,
    pub username: Option<String>,
    pub user_id: Option<String>,
    pub account_type: Option<String>,
    pub currency: Option<String>,
    pub tenant_id: Option<TenantId>,
    pub tenant_name: Option<String>,
    pub provider_id: Option<String>,
    pub provider_name: Option<String>,
    pub provider_email: Option<String>,
    pub assigned_tenants: Vec<TenantId>,
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
}

impl SecurityContext {
    /// True iff the subject holds the named permission. Absence of a
    /// permission always means denied.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    /// True iff the tenant was explicitly granted to the subject,
    /// independent of hierarchy.
    pub fn is_assigned(&self, tenant_id: &TenantId) -> bool {
        self.assigned_tenants.contains(tenant_id)
    }
}
