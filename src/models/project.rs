//! Project and Phase Models

use serde::{Deserialize, Serialize};

/// A project record owned by an organization.
///
/// `status` is always "draft" at tool-driven creation regardless of the
/// model's input; later transitions go through `update_project`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub organization_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// new_build | redesign | fix | audit | retainer | strategy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    /// draft | scoping | proposed | active | paused | complete | cancelled
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub created_at: String,
    pub updated_at: String,
}

/// A phase within a project, scoped through its parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phase {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub estimated_hours: f64,
    /// Position within the project's phase list
    pub sort_order: i64,
    /// planned | in_progress | complete
    pub status: String,
    pub created_at: String,
}
