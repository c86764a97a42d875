//! Retrospective Model

use serde::{Deserialize, Serialize};

/// A retrospective for a completed project, scoped through its parent
/// project's organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Retrospective {
    pub id: String,
    pub project_id: String,
    /// When the retro was captured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    /// Positive = over estimate, negative = under
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_variance_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_variance_pct: Option<f64>,
    pub scope_changes_count: i64,
    /// Client satisfaction 1-5
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_satisfaction: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub what_worked: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub what_didnt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lessons: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub would_repeat: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub created_at: String,
    pub updated_at: String,
}
