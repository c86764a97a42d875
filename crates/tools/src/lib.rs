//! Guildhall Tools
//!
//! Tool contracts for the conversation engine. Each domain operation is a
//! pair: a strict, independently-testable input validator and a purely
//! descriptive declaration the completion gateway sends to the model.
//!
//! The `registry` module maps a domain schema name ("client", "project",
//! "person", "retrospective") to its tool set and system prompt; `kind`
//! provides the tagged-variant dispatch table the engine folds over.

pub mod client;
pub mod common;
pub mod kind;
pub mod person;
pub mod project;
pub mod prompts;
pub mod registry;
pub mod retrospective;
mod validate;

pub use client::{create_client_tool, ClientInput, SizeTier};
pub use common::{
    ask_clarifying_question_tool, mark_complete_tool, AskClarifyingQuestionInput,
    MarkCompleteInput,
};
pub use kind::{ToolBehavior, ToolKind};
pub use person::{
    create_person_tool, find_people_by_skills_tool, suggest_skills_tool, update_person_tool,
    AvailabilityStatus, FindPeopleBySkillsInput, PersonInput, PersonType, SkillLinkInput,
    SuggestSkillsInput, SuggestedSkill, UpdatePersonInput,
};
pub use project::{
    create_project_tool, suggest_phases_tool, update_project_tool, Complexity, PhaseInput,
    ProjectInput, ProjectStatus, ProjectType, SuggestPhasesInput, SuggestedPhase,
    UpdateProjectInput,
};
pub use registry::{prompt_for_schema, tools_for_schema};
pub use retrospective::{
    create_retrospective_tool, summarize_learnings_tool, update_retrospective_tool,
    LearningsSummary, RetrospectiveInput, SummarizeLearningsInput, UpdateRetrospectiveInput,
};
