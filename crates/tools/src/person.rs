//! Person Tools
//!
//! Input contracts and declarations for the talent-network tools:
//! `create_person`, `update_person`, `suggest_skills`, and
//! `find_people_by_skills`.

use std::collections::HashMap;

use guildhall_core::error::CoreResult;
use guildhall_llm::types::{ParameterSchema, ToolDefinition};
use serde::{Deserialize, Serialize};

use crate::validate;

/// Relationship of a person to the organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonType {
    Employee,
    Contractor,
    Referral,
}

impl PersonType {
    /// Storage string for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonType::Employee => "employee",
            PersonType::Contractor => "contractor",
            PersonType::Referral => "referral",
        }
    }
}

/// Current availability of a person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    #[default]
    Available,
    Partial,
    Booked,
    Unavailable,
}

impl AvailabilityStatus {
    /// Storage string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityStatus::Available => "available",
            AvailabilityStatus::Partial => "partial",
            AvailabilityStatus::Booked => "booked",
            AvailabilityStatus::Unavailable => "unavailable",
        }
    }
}

/// A skill supplied inline with `create_person`, referenced by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillLinkInput {
    pub skill_name: String,
    pub proficiency_level: i64,
    #[serde(default)]
    pub years_experience: Option<f64>,
}

/// Validated input for `create_person`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonInput {
    pub name: String,
    #[serde(rename = "type")]
    pub person_type: PersonType,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub hourly_rate: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub availability_status: AvailabilityStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub skills: Option<Vec<SkillLinkInput>>,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl PersonInput {
    /// Parse and validate raw tool arguments.
    pub fn parse(args: &serde_json::Value) -> CoreResult<Self> {
        let input: Self = validate::from_args("create_person", args)?;
        validate::non_empty("create_person", "name", &input.name)?;
        if let Some(email) = &input.email {
            validate::valid_email("create_person", "email", email)?;
        }
        if let Some(rate) = input.hourly_rate {
            validate::positive("create_person", "hourly_rate", rate)?;
        }
        for skill in input.skills.iter().flatten() {
            validate::non_empty("create_person", "skills.skill_name", &skill.skill_name)?;
            validate::in_range(
                "create_person",
                "skills.proficiency_level",
                skill.proficiency_level as f64,
                1.0,
                5.0,
            )?;
        }
        Ok(input)
    }
}

/// Validated input for `update_person`. Partial update: only provided
/// fields change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePersonInput {
    pub person_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub person_type: Option<PersonType>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub hourly_rate: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub availability_status: Option<AvailabilityStatus>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl UpdatePersonInput {
    /// Parse and validate raw tool arguments.
    pub fn parse(args: &serde_json::Value) -> CoreResult<Self> {
        let input: Self = validate::from_args("update_person", args)?;
        validate::valid_uuid("update_person", "person_id", &input.person_id)?;
        if let Some(rate) = input.hourly_rate {
            validate::positive("update_person", "hourly_rate", rate)?;
        }
        if let Some(rating) = input.rating {
            validate::in_range("update_person", "rating", rating, 1.0, 5.0)?;
        }
        Ok(input)
    }
}

/// A skill suggestion with its category and role fit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestedSkill {
    pub name: String,
    pub category: String,
    pub typical_for_role: bool,
}

/// Validated input for the informational `suggest_skills`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestSkillsInput {
    pub role_description: String,
    pub suggested_skills: Vec<SuggestedSkill>,
}

impl SuggestSkillsInput {
    /// Parse and validate raw tool arguments.
    pub fn parse(args: &serde_json::Value) -> CoreResult<Self> {
        validate::from_args("suggest_skills", args)
    }
}

/// Validated input for the informational `find_people_by_skills`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindPeopleBySkillsInput {
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Option<Vec<String>>,
    #[serde(default)]
    pub availability_filter: Option<String>,
    #[serde(default)]
    pub max_hourly_rate: Option<f64>,
}

impl FindPeopleBySkillsInput {
    /// Parse and validate raw tool arguments.
    pub fn parse(args: &serde_json::Value) -> CoreResult<Self> {
        validate::from_args("find_people_by_skills", args)
    }
}

/// Declaration for the `create_person` tool.
pub fn create_person_tool() -> ToolDefinition {
    let skill_item = ParameterSchema::object(
        None,
        HashMap::from([
            (
                "skill_name".to_string(),
                ParameterSchema::string(Some("Name of the skill (e.g., 'React', 'UX Design')")),
            ),
            (
                "proficiency_level".to_string(),
                ParameterSchema::number(Some("Proficiency from 1-5 (1=beginner, 5=expert)")),
            ),
            (
                "years_experience".to_string(),
                ParameterSchema::number(Some("Years of experience with this skill")),
            ),
        ]),
        vec!["skill_name".to_string(), "proficiency_level".to_string()],
    );

    ToolDefinition {
        name: "create_person".to_string(),
        description: "Create a new person in the talent network. Use this when you have gathered \
                      enough information about the person from the conversation. Always confirm \
                      the details with the user before calling this tool."
            .to_string(),
        input_schema: ParameterSchema::object(
            None,
            HashMap::from([
                (
                    "name".to_string(),
                    ParameterSchema::string(Some("Person's full name (required)")),
                ),
                (
                    "type".to_string(),
                    ParameterSchema::string_enum(
                        Some(
                            "Relationship type: employee (full-time staff), contractor \
                             (freelancer/agency), referral (recommended talent you haven't worked \
                             with yet)",
                        ),
                        &["employee", "contractor", "referral"],
                    ),
                ),
                (
                    "email".to_string(),
                    ParameterSchema::string(Some("Email address for contact")),
                ),
                (
                    "location".to_string(),
                    ParameterSchema::string(Some(
                        "City, country, or timezone (e.g., 'San Francisco, USA' or 'GMT+2')",
                    )),
                ),
                (
                    "hourly_rate".to_string(),
                    ParameterSchema::number(Some("Hourly rate in the specified currency")),
                ),
                (
                    "currency".to_string(),
                    ParameterSchema::string(Some("Currency code for the rate (default: USD)"))
                        .with_default(serde_json::json!("USD")),
                ),
                (
                    "availability_status".to_string(),
                    ParameterSchema::string_enum(
                        Some(
                            "Current availability: available (ready for new work), partial (some \
                             capacity), booked (no availability), unavailable (not taking work)",
                        ),
                        &["available", "partial", "booked", "unavailable"],
                    ),
                ),
                (
                    "notes".to_string(),
                    ParameterSchema::string(Some("Any additional notes about this person")),
                ),
                (
                    "skills".to_string(),
                    ParameterSchema::array(Some("List of skills this person has"), skill_item),
                ),
            ]),
            vec!["name".to_string(), "type".to_string()],
        ),
    }
}

/// Declaration for the `update_person` tool.
pub fn update_person_tool() -> ToolDefinition {
    ToolDefinition {
        name: "update_person".to_string(),
        description: "Update an existing person's details. Use this when the user wants to \
                      modify availability, rate, skills, or other attributes."
            .to_string(),
        input_schema: ParameterSchema::object(
            None,
            HashMap::from([
                (
                    "person_id".to_string(),
                    ParameterSchema::string(Some("UUID of the person to update (required)")),
                ),
                ("name".to_string(), ParameterSchema::string(None)),
                (
                    "type".to_string(),
                    ParameterSchema::string_enum(None, &["employee", "contractor", "referral"]),
                ),
                ("email".to_string(), ParameterSchema::string(None)),
                ("location".to_string(), ParameterSchema::string(None)),
                ("hourly_rate".to_string(), ParameterSchema::number(None)),
                ("currency".to_string(), ParameterSchema::string(None)),
                (
                    "availability_status".to_string(),
                    ParameterSchema::string_enum(
                        None,
                        &["available", "partial", "booked", "unavailable"],
                    ),
                ),
                (
                    "rating".to_string(),
                    ParameterSchema::number(Some("Performance rating from 1-5")),
                ),
                ("notes".to_string(), ParameterSchema::string(None)),
            ]),
            vec!["person_id".to_string()],
        ),
    }
}

/// Declaration for the `suggest_skills` tool.
pub fn suggest_skills_tool() -> ToolDefinition {
    let skill_item = ParameterSchema::object(
        None,
        HashMap::from([
            (
                "name".to_string(),
                ParameterSchema::string(Some("Skill name")),
            ),
            (
                "category".to_string(),
                ParameterSchema::string_enum(
                    Some("Skill category"),
                    &["design", "engineering", "strategy", "ops", "marketing", "data"],
                ),
            ),
            (
                "typical_for_role".to_string(),
                ParameterSchema::boolean(Some(
                    "Whether this skill is typical/expected for the role",
                )),
            ),
        ]),
        vec![
            "name".to_string(),
            "category".to_string(),
            "typical_for_role".to_string(),
        ],
    );

    ToolDefinition {
        name: "suggest_skills".to_string(),
        description: "Suggest relevant skills based on a person's role or description. Use this \
                      to help the user identify what skills to track for a person."
            .to_string(),
        input_schema: ParameterSchema::object(
            None,
            HashMap::from([
                (
                    "role_description".to_string(),
                    ParameterSchema::string(Some(
                        "Description of the person's role (e.g., 'senior frontend developer', \
                         'UX designer')",
                    )),
                ),
                (
                    "suggested_skills".to_string(),
                    ParameterSchema::array(
                        Some("List of suggested skills for this role"),
                        skill_item,
                    ),
                ),
            ]),
            vec!["role_description".to_string(), "suggested_skills".to_string()],
        ),
    }
}

/// Declaration for the `find_people_by_skills` tool.
pub fn find_people_by_skills_tool() -> ToolDefinition {
    ToolDefinition {
        name: "find_people_by_skills".to_string(),
        description: "Search for people in the talent network who have specific skills. Use this \
                      when staffing a project or looking for specific expertise."
            .to_string(),
        input_schema: ParameterSchema::object(
            None,
            HashMap::from([
                (
                    "required_skills".to_string(),
                    ParameterSchema::array(
                        Some("List of skill names that are required"),
                        ParameterSchema::string(None),
                    ),
                ),
                (
                    "preferred_skills".to_string(),
                    ParameterSchema::array(
                        Some("List of skill names that are nice-to-have"),
                        ParameterSchema::string(None),
                    ),
                ),
                (
                    "availability_filter".to_string(),
                    ParameterSchema::string_enum(
                        Some("Filter by availability status"),
                        &["available", "partial", "any"],
                    ),
                ),
                (
                    "max_hourly_rate".to_string(),
                    ParameterSchema::number(Some("Maximum hourly rate budget")),
                ),
            ]),
            vec!["required_skills".to_string()],
        ),
    }
}
