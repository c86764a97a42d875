//! Project Tools
//!
//! Input contracts and declarations for `create_project`, `update_project`,
//! and the informational `suggest_phases`.

use std::collections::HashMap;

use guildhall_core::error::CoreResult;
use guildhall_llm::types::{ParameterSchema, ToolDefinition};
use serde::{Deserialize, Serialize};

use crate::validate;

/// Type of project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    NewBuild,
    Redesign,
    Fix,
    Audit,
    Retainer,
    Strategy,
}

impl ProjectType {
    /// Storage string for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::NewBuild => "new_build",
            ProjectType::Redesign => "redesign",
            ProjectType::Fix => "fix",
            ProjectType::Audit => "audit",
            ProjectType::Retainer => "retainer",
            ProjectType::Strategy => "strategy",
        }
    }
}

const PROJECT_TYPES: [&str; 6] = [
    "new_build",
    "redesign",
    "fix",
    "audit",
    "retainer",
    "strategy",
];

/// Project lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Draft,
    Scoping,
    Proposed,
    Active,
    Paused,
    Complete,
    Cancelled,
}

impl ProjectStatus {
    /// Storage string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Draft => "draft",
            ProjectStatus::Scoping => "scoping",
            ProjectStatus::Proposed => "proposed",
            ProjectStatus::Active => "active",
            ProjectStatus::Paused => "paused",
            ProjectStatus::Complete => "complete",
            ProjectStatus::Cancelled => "cancelled",
        }
    }
}

/// Estimated complexity level for phase suggestions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

impl Complexity {
    /// Display string for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Moderate => "moderate",
            Complexity::Complex => "complex",
        }
    }
}

/// A phase supplied inline with `create_project`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseInput {
    pub name: String,
    pub estimated_hours: f64,
}

/// Validated input for `create_project`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInput {
    pub name: String,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub project_type: Option<ProjectType>,
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub phases: Option<Vec<PhaseInput>>,
}

impl ProjectInput {
    /// Parse and validate raw tool arguments.
    pub fn parse(args: &serde_json::Value) -> CoreResult<Self> {
        let input: Self = validate::from_args("create_project", args)?;
        validate::non_empty("create_project", "name", &input.name)?;
        if let Some(client_id) = &input.client_id {
            validate::valid_uuid("create_project", "client_id", client_id)?;
        }
        if let Some(hours) = input.estimated_hours {
            validate::positive("create_project", "estimated_hours", hours)?;
        }
        for phase in input.phases.iter().flatten() {
            validate::non_empty("create_project", "phases.name", &phase.name)?;
            validate::positive("create_project", "phases.estimated_hours", phase.estimated_hours)?;
        }
        Ok(input)
    }
}

/// Validated input for `update_project`. All fields beyond the id are
/// optional; only provided fields change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProjectInput {
    pub project_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub project_type: Option<ProjectType>,
    #[serde(default)]
    pub status: Option<ProjectStatus>,
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl UpdateProjectInput {
    /// Parse and validate raw tool arguments.
    pub fn parse(args: &serde_json::Value) -> CoreResult<Self> {
        let input: Self = validate::from_args("update_project", args)?;
        validate::valid_uuid("update_project", "project_id", &input.project_id)?;
        if let Some(hours) = input.estimated_hours {
            validate::positive("update_project", "estimated_hours", hours)?;
        }
        Ok(input)
    }
}

/// A suggested phase with an hour range like "10-20h".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestedPhase {
    pub name: String,
    pub description: String,
    pub typical_hours_range: String,
}

/// Validated input for the informational `suggest_phases`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestPhasesInput {
    pub project_type: ProjectType,
    pub complexity: Complexity,
    pub phases: Vec<SuggestedPhase>,
}

impl SuggestPhasesInput {
    /// Parse and validate raw tool arguments.
    pub fn parse(args: &serde_json::Value) -> CoreResult<Self> {
        validate::from_args("suggest_phases", args)
    }
}

/// Declaration for the `create_project` tool.
pub fn create_project_tool() -> ToolDefinition {
    let phase_item = ParameterSchema::object(
        None,
        HashMap::from([
            (
                "name".to_string(),
                ParameterSchema::string(Some("Phase name (e.g., Discovery, Design, Development)")),
            ),
            (
                "estimated_hours".to_string(),
                ParameterSchema::number(Some("Hours for this phase")),
            ),
        ]),
        vec!["name".to_string(), "estimated_hours".to_string()],
    );

    ToolDefinition {
        name: "create_project".to_string(),
        description: "Create a new project record in the database. Use this when you have \
                      gathered enough information about the project scope from the conversation. \
                      Always confirm the details with the user before calling this tool."
            .to_string(),
        input_schema: ParameterSchema::object(
            None,
            HashMap::from([
                (
                    "name".to_string(),
                    ParameterSchema::string(Some("Project name (required)")),
                ),
                (
                    "client_id".to_string(),
                    ParameterSchema::string(Some("UUID of the associated client (optional)")),
                ),
                (
                    "description".to_string(),
                    ParameterSchema::string(Some("Brief description of the project scope and goals")),
                ),
                (
                    "type".to_string(),
                    ParameterSchema::string_enum(
                        Some(
                            "Type of project: new_build (greenfield), redesign (existing product \
                             refresh), fix (bug fixes/improvements), audit (review/assessment), \
                             retainer (ongoing support), strategy (planning/consulting)",
                        ),
                        &PROJECT_TYPES,
                    ),
                ),
                (
                    "estimated_hours".to_string(),
                    ParameterSchema::number(Some("Total estimated hours for the project")),
                ),
                (
                    "start_date".to_string(),
                    ParameterSchema::string(Some("Expected start date (ISO format: YYYY-MM-DD)")),
                ),
                (
                    "end_date".to_string(),
                    ParameterSchema::string(Some("Expected end date (ISO format: YYYY-MM-DD)")),
                ),
                (
                    "tags".to_string(),
                    ParameterSchema::array(
                        Some("Tags for categorization (e.g., 'web', 'mobile', 'urgent')"),
                        ParameterSchema::string(None),
                    ),
                ),
                (
                    "phases".to_string(),
                    ParameterSchema::array(Some("Optional breakdown into phases"), phase_item),
                ),
            ]),
            vec!["name".to_string()],
        ),
    }
}

/// Declaration for the `suggest_phases` tool.
pub fn suggest_phases_tool() -> ToolDefinition {
    let phase_item = ParameterSchema::object(
        None,
        HashMap::from([
            ("name".to_string(), ParameterSchema::string(None)),
            ("description".to_string(), ParameterSchema::string(None)),
            (
                "typical_hours_range".to_string(),
                ParameterSchema::string(None),
            ),
        ]),
        vec![
            "name".to_string(),
            "description".to_string(),
            "typical_hours_range".to_string(),
        ],
    );

    ToolDefinition {
        name: "suggest_phases".to_string(),
        description: "Suggest a typical phase breakdown for the project based on its type and \
                      complexity. Use this to present options to the user before finalizing the \
                      project structure."
            .to_string(),
        input_schema: ParameterSchema::object(
            None,
            HashMap::from([
                (
                    "project_type".to_string(),
                    ParameterSchema::string_enum(Some("Type of project"), &PROJECT_TYPES),
                ),
                (
                    "complexity".to_string(),
                    ParameterSchema::string_enum(
                        Some("Estimated complexity level"),
                        &["simple", "moderate", "complex"],
                    ),
                ),
                (
                    "phases".to_string(),
                    ParameterSchema::array(
                        Some("Suggested phases with descriptions and hour ranges"),
                        phase_item,
                    ),
                ),
            ]),
            vec![
                "project_type".to_string(),
                "complexity".to_string(),
                "phases".to_string(),
            ],
        ),
    }
}

/// Declaration for the `update_project` tool.
pub fn update_project_tool() -> ToolDefinition {
    ToolDefinition {
        name: "update_project".to_string(),
        description: "Update an existing project's details. Use this when the user wants to \
                      modify scope, timeline, or other project attributes."
            .to_string(),
        input_schema: ParameterSchema::object(
            None,
            HashMap::from([
                (
                    "project_id".to_string(),
                    ParameterSchema::string(Some("UUID of the project to update (required)")),
                ),
                ("name".to_string(), ParameterSchema::string(None)),
                ("description".to_string(), ParameterSchema::string(None)),
                (
                    "type".to_string(),
                    ParameterSchema::string_enum(None, &PROJECT_TYPES),
                ),
                (
                    "status".to_string(),
                    ParameterSchema::string_enum(
                        Some("Project status"),
                        &[
                            "draft",
                            "scoping",
                            "proposed",
                            "active",
                            "paused",
                            "complete",
                            "cancelled",
                        ],
                    ),
                ),
                (
                    "estimated_hours".to_string(),
                    ParameterSchema::number(None),
                ),
                ("start_date".to_string(), ParameterSchema::string(None)),
                ("end_date".to_string(), ParameterSchema::string(None)),
                (
                    "tags".to_string(),
                    ParameterSchema::array(None, ParameterSchema::string(None)),
                ),
            ]),
            vec!["project_id".to_string()],
        ),
    }
}
