//! Retrospective Tools
//!
//! Input contracts and declarations for `create_retrospective`,
//! `update_retrospective`, and the informational `summarize_learnings`.

use std::collections::HashMap;

use guildhall_core::error::CoreResult;
use guildhall_llm::types::{ParameterSchema, ToolDefinition};
use serde::{Deserialize, Serialize};

use crate::project::ProjectType;
use crate::validate;

/// Validated input for `create_retrospective`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrospectiveInput {
    pub project_id: String,
    #[serde(default)]
    pub hours_variance_pct: Option<f64>,
    #[serde(default)]
    pub cost_variance_pct: Option<f64>,
    #[serde(default)]
    pub scope_changes_count: i64,
    #[serde(default)]
    pub client_satisfaction: Option<f64>,
    #[serde(default)]
    pub what_worked: Option<String>,
    #[serde(default)]
    pub what_didnt: Option<String>,
    #[serde(default)]
    pub lessons: Option<Vec<String>>,
    #[serde(default)]
    pub would_repeat: Option<bool>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl RetrospectiveInput {
    /// Parse and validate raw tool arguments.
    pub fn parse(args: &serde_json::Value) -> CoreResult<Self> {
        let input: Self = validate::from_args("create_retrospective", args)?;
        validate::valid_uuid("create_retrospective", "project_id", &input.project_id)?;
        validate::non_negative(
            "create_retrospective",
            "scope_changes_count",
            input.scope_changes_count,
        )?;
        if let Some(satisfaction) = input.client_satisfaction {
            validate::in_range(
                "create_retrospective",
                "client_satisfaction",
                satisfaction,
                1.0,
                5.0,
            )?;
        }
        Ok(input)
    }
}

/// Validated input for `update_retrospective`. Partial update: only provided
/// fields change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRetrospectiveInput {
    pub retrospective_id: String,
    #[serde(default)]
    pub hours_variance_pct: Option<f64>,
    #[serde(default)]
    pub cost_variance_pct: Option<f64>,
    #[serde(default)]
    pub scope_changes_count: Option<i64>,
    #[serde(default)]
    pub client_satisfaction: Option<f64>,
    #[serde(default)]
    pub what_worked: Option<String>,
    #[serde(default)]
    pub what_didnt: Option<String>,
    #[serde(default)]
    pub lessons: Option<Vec<String>>,
    #[serde(default)]
    pub would_repeat: Option<bool>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl UpdateRetrospectiveInput {
    /// Parse and validate raw tool arguments.
    pub fn parse(args: &serde_json::Value) -> CoreResult<Self> {
        let input: Self = validate::from_args("update_retrospective", args)?;
        validate::valid_uuid(
            "update_retrospective",
            "retrospective_id",
            &input.retrospective_id,
        )?;
        if let Some(count) = input.scope_changes_count {
            validate::non_negative("update_retrospective", "scope_changes_count", count)?;
        }
        if let Some(satisfaction) = input.client_satisfaction {
            validate::in_range(
                "update_retrospective",
                "client_satisfaction",
                satisfaction,
                1.0,
                5.0,
            )?;
        }
        Ok(input)
    }
}

/// Aggregated learnings the model distilled from past retrospectives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningsSummary {
    #[serde(default)]
    pub avg_hours_variance: Option<f64>,
    #[serde(default)]
    pub common_issues: Option<Vec<String>>,
    #[serde(default)]
    pub top_lessons: Option<Vec<String>>,
    #[serde(default)]
    pub success_patterns: Option<Vec<String>>,
}

/// Validated input for the informational `summarize_learnings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeLearningsInput {
    #[serde(default)]
    pub project_type: Option<ProjectType>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    pub summary: LearningsSummary,
}

impl SummarizeLearningsInput {
    /// Parse and validate raw tool arguments.
    pub fn parse(args: &serde_json::Value) -> CoreResult<Self> {
        validate::from_args("summarize_learnings", args)
    }
}

/// Declaration for the `create_retrospective` tool.
pub fn create_retrospective_tool() -> ToolDefinition {
    ToolDefinition {
        name: "create_retrospective".to_string(),
        description: "Create a retrospective for a completed project. Use this to capture \
                      lessons learned, what went well, what didn't, and overall project outcomes. \
                      Always confirm the details with the user before calling this tool."
            .to_string(),
        input_schema: ParameterSchema::object(
            None,
            HashMap::from([
                (
                    "project_id".to_string(),
                    ParameterSchema::string(Some(
                        "UUID of the project this retrospective is for (required)",
                    )),
                ),
                (
                    "hours_variance_pct".to_string(),
                    ParameterSchema::number(Some(
                        "Percentage variance from estimated hours. Positive = over estimate, \
                         negative = under. Example: 15 means 15% over estimated hours.",
                    )),
                ),
                (
                    "cost_variance_pct".to_string(),
                    ParameterSchema::number(Some(
                        "Percentage variance from estimated cost. Positive = over budget, \
                         negative = under budget.",
                    )),
                ),
                (
                    "scope_changes_count".to_string(),
                    ParameterSchema::number(Some(
                        "Number of significant scope changes during the project",
                    )),
                ),
                (
                    "client_satisfaction".to_string(),
                    ParameterSchema::number(Some(
                        "Client satisfaction rating from 1-5 (5 = very satisfied)",
                    )),
                ),
                (
                    "what_worked".to_string(),
                    ParameterSchema::string(Some("Summary of what went well on the project")),
                ),
                (
                    "what_didnt".to_string(),
                    ParameterSchema::string(Some(
                        "Summary of what didn't go well or could be improved",
                    )),
                ),
                (
                    "lessons".to_string(),
                    ParameterSchema::array(
                        Some("List of specific lessons learned to apply to future projects"),
                        ParameterSchema::string(None),
                    ),
                ),
                (
                    "would_repeat".to_string(),
                    ParameterSchema::boolean(Some(
                        "Would you take on a similar project again with this client/scope?",
                    )),
                ),
                (
                    "tags".to_string(),
                    ParameterSchema::array(
                        Some(
                            "Tags for categorizing this retro (e.g., 'timeline-issues', \
                             'scope-creep', 'great-client')",
                        ),
                        ParameterSchema::string(None),
                    ),
                ),
            ]),
            vec!["project_id".to_string()],
        ),
    }
}

/// Declaration for the `update_retrospective` tool.
pub fn update_retrospective_tool() -> ToolDefinition {
    ToolDefinition {
        name: "update_retrospective".to_string(),
        description: "Update an existing retrospective with additional insights or corrections."
            .to_string(),
        input_schema: ParameterSchema::object(
            None,
            HashMap::from([
                (
                    "retrospective_id".to_string(),
                    ParameterSchema::string(Some(
                        "UUID of the retrospective to update (required)",
                    )),
                ),
                (
                    "hours_variance_pct".to_string(),
                    ParameterSchema::number(None),
                ),
                (
                    "cost_variance_pct".to_string(),
                    ParameterSchema::number(None),
                ),
                (
                    "scope_changes_count".to_string(),
                    ParameterSchema::number(None),
                ),
                (
                    "client_satisfaction".to_string(),
                    ParameterSchema::number(None),
                ),
                ("what_worked".to_string(), ParameterSchema::string(None)),
                ("what_didnt".to_string(), ParameterSchema::string(None)),
                (
                    "lessons".to_string(),
                    ParameterSchema::array(None, ParameterSchema::string(None)),
                ),
                ("would_repeat".to_string(), ParameterSchema::boolean(None)),
                (
                    "tags".to_string(),
                    ParameterSchema::array(None, ParameterSchema::string(None)),
                ),
            ]),
            vec!["retrospective_id".to_string()],
        ),
    }
}

/// Declaration for the `summarize_learnings` tool.
pub fn summarize_learnings_tool() -> ToolDefinition {
    let summary_schema = ParameterSchema::object(
        Some("Summary of learnings"),
        HashMap::from([
            (
                "avg_hours_variance".to_string(),
                ParameterSchema::number(Some("Average hours variance across projects")),
            ),
            (
                "common_issues".to_string(),
                ParameterSchema::array(
                    Some("Most common issues encountered"),
                    ParameterSchema::string(None),
                ),
            ),
            (
                "top_lessons".to_string(),
                ParameterSchema::array(
                    Some("Most valuable lessons learned"),
                    ParameterSchema::string(None),
                ),
            ),
            (
                "success_patterns".to_string(),
                ParameterSchema::array(
                    Some("Patterns that led to successful outcomes"),
                    ParameterSchema::string(None),
                ),
            ),
        ]),
        vec![],
    );

    ToolDefinition {
        name: "summarize_learnings".to_string(),
        description: "Summarize key learnings and patterns from past retrospectives. Use this to \
                      help inform future project estimates and approaches."
            .to_string(),
        input_schema: ParameterSchema::object(
            None,
            HashMap::from([
                (
                    "project_type".to_string(),
                    ParameterSchema::string_enum(
                        Some("Filter learnings by project type (optional)"),
                        &["new_build", "redesign", "fix", "audit", "retainer", "strategy"],
                    ),
                ),
                (
                    "tags".to_string(),
                    ParameterSchema::array(
                        Some("Filter by specific tags (optional)"),
                        ParameterSchema::string(None),
                    ),
                ),
                ("summary".to_string(), summary_schema),
            ]),
            vec!["summary".to_string()],
        ),
    }
}
