//! Tool Dispatch Table
//!
//! Tagged-variant mapping of tool names to their execution behavior. The
//! conversation engine folds over a turn's tool calls by resolving each name
//! through `ToolKind::from_name`; adding a tool is an addition here and in
//! the registry, not a new branch in the orchestration loop.

use serde::{Deserialize, Serialize};

/// How a tool interacts with the store and the turn's final content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolBehavior {
    /// Mutates domain entities; its confirmation text replaces the turn's
    /// running content.
    Mutating,
    /// No store effect; its formatted text appends to the turn's content.
    Informational,
    /// Steers the conversation itself (completion flag, clarifying question).
    Control,
}

/// Every tool the engine can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    CreateClient,
    CreateProject,
    UpdateProject,
    SuggestPhases,
    CreatePerson,
    UpdatePerson,
    SuggestSkills,
    FindPeopleBySkills,
    CreateRetrospective,
    UpdateRetrospective,
    SummarizeLearnings,
    AskClarifyingQuestion,
    MarkComplete,
}

impl ToolKind {
    /// All tools, in declaration order.
    pub const ALL: [ToolKind; 13] = [
        ToolKind::CreateClient,
        ToolKind::CreateProject,
        ToolKind::UpdateProject,
        ToolKind::SuggestPhases,
        ToolKind::CreatePerson,
        ToolKind::UpdatePerson,
        ToolKind::SuggestSkills,
        ToolKind::FindPeopleBySkills,
        ToolKind::CreateRetrospective,
        ToolKind::UpdateRetrospective,
        ToolKind::SummarizeLearnings,
        ToolKind::AskClarifyingQuestion,
        ToolKind::MarkComplete,
    ];

    /// Resolve a model-supplied tool name. Returns None for names outside
    /// the declared set.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "create_client" => Some(Self::CreateClient),
            "create_project" => Some(Self::CreateProject),
            "update_project" => Some(Self::UpdateProject),
            "suggest_phases" => Some(Self::SuggestPhases),
            "create_person" => Some(Self::CreatePerson),
            "update_person" => Some(Self::UpdatePerson),
            "suggest_skills" => Some(Self::SuggestSkills),
            "find_people_by_skills" => Some(Self::FindPeopleBySkills),
            "create_retrospective" => Some(Self::CreateRetrospective),
            "update_retrospective" => Some(Self::UpdateRetrospective),
            "summarize_learnings" => Some(Self::SummarizeLearnings),
            "ask_clarifying_question" => Some(Self::AskClarifyingQuestion),
            "mark_complete" => Some(Self::MarkComplete),
            _ => None,
        }
    }

    /// The declared tool name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateClient => "create_client",
            Self::CreateProject => "create_project",
            Self::UpdateProject => "update_project",
            Self::SuggestPhases => "suggest_phases",
            Self::CreatePerson => "create_person",
            Self::UpdatePerson => "update_person",
            Self::SuggestSkills => "suggest_skills",
            Self::FindPeopleBySkills => "find_people_by_skills",
            Self::CreateRetrospective => "create_retrospective",
            Self::UpdateRetrospective => "update_retrospective",
            Self::SummarizeLearnings => "summarize_learnings",
            Self::AskClarifyingQuestion => "ask_clarifying_question",
            Self::MarkComplete => "mark_complete",
        }
    }

    /// Execution behavior class for this tool.
    pub fn behavior(&self) -> ToolBehavior {
        match self {
            Self::CreateClient
            | Self::CreateProject
            | Self::UpdateProject
            | Self::CreatePerson
            | Self::UpdatePerson
            | Self::CreateRetrospective
            | Self::UpdateRetrospective => ToolBehavior::Mutating,
            Self::SuggestPhases
            | Self::SuggestSkills
            | Self::FindPeopleBySkills
            | Self::SummarizeLearnings => ToolBehavior::Informational,
            Self::AskClarifyingQuestion | Self::MarkComplete => ToolBehavior::Control,
        }
    }

    /// Whether a successful invocation of this tool creates a new entity.
    pub fn is_creation(&self) -> bool {
        matches!(
            self,
            Self::CreateClient | Self::CreateProject | Self::CreatePerson | Self::CreateRetrospective
        )
    }
}
