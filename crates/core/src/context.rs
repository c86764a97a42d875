//! Caller Context
//!
//! The authenticated caller identity that every organization-scoped operation
//! carries. Resolved once per request by the application's auth bridge and
//! passed by reference into the conversation engine and storage layer, so no
//! query can be issued without an organization scope.

use serde::{Deserialize, Serialize};

/// Role of a user within their organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrgRole {
    Owner,
    Admin,
    Member,
}

impl OrgRole {
    /// Parse from string, defaulting to Member
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "owner" => Self::Owner,
            "admin" => Self::Admin,
            _ => Self::Member,
        }
    }

    /// Return the storage string for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrgRole::Owner => "owner",
            OrgRole::Admin => "admin",
            OrgRole::Member => "member",
        }
    }
}

/// Authenticated caller context.
///
/// Bundles the internal user id and organization id resolved from the
/// caller's session. The organization id is the tenant-isolation key: the
/// storage layer requires it as a mandatory filter on every scoped query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallerContext {
    /// Internal user id
    pub user_id: String,
    /// Organization the user belongs to
    pub org_id: String,
    /// The user's role within the organization
    pub role: OrgRole,
}

impl CallerContext {
    /// Create a new caller context
    pub fn new(user_id: impl Into<String>, org_id: impl Into<String>, role: OrgRole) -> Self {
        Self {
            user_id: user_id.into(),
            org_id: org_id.into(),
            role,
        }
    }
}
