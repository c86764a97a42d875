//! Person, Skill, and PersonSkill Models

use serde::{Deserialize, Serialize};

/// A person in the organization's talent network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub organization_id: String,
    pub name: String,
    /// employee | contractor | referral
    pub person_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    pub currency: String,
    /// available | partial | booked | unavailable
    pub availability_status: String,
    /// Performance rating 1-5
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// A skill in the global taxonomy. Skills are reference data shared across
/// organizations, the one un-scoped table in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Link between a person and a skill
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonSkill {
    pub person_id: String,
    pub skill_id: String,
    /// Proficiency 1-5
    pub proficiency_level: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_experience: Option<f64>,
}
