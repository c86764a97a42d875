//! Organization and User Models
//!
//! The tenancy primitives: every domain entity hangs off an organization,
//! and callers are resolved to a user + organization before any scoped
//! operation runs.

use serde::{Deserialize, Serialize};

/// A tenant organization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub slug: String,
    /// active | inactive | suspended
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A user within an organization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    /// Identity from the external auth provider's session
    pub external_id: String,
    pub email: String,
    pub organization_id: String,
    /// owner | admin | member
    pub role: String,
    pub created_at: String,
    pub updated_at: String,
}
