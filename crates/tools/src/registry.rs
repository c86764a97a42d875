//! Schema Registry
//!
//! Maps a domain-schema name to its tool set and system prompt. The two
//! universal control tools are always appended after the domain tools, in
//! fixed order, so the model sees a consistent set. Unknown schema names
//! degrade to the base prompt and the universal tools alone.

use guildhall_llm::types::ToolDefinition;

use crate::client::create_client_tool;
use crate::common::{ask_clarifying_question_tool, mark_complete_tool};
use crate::person::{
    create_person_tool, find_people_by_skills_tool, suggest_skills_tool, update_person_tool,
};
use crate::project::{create_project_tool, suggest_phases_tool, update_project_tool};
use crate::prompts;
use crate::retrospective::{
    create_retrospective_tool, summarize_learnings_tool, update_retrospective_tool,
};

/// Get the tool declarations for a given schema, universal tools last.
pub fn tools_for_schema(schema: &str) -> Vec<ToolDefinition> {
    let mut tools = match schema.to_lowercase().as_str() {
        "client" => vec![create_client_tool()],
        "project" => vec![
            create_project_tool(),
            suggest_phases_tool(),
            update_project_tool(),
        ],
        "person" => vec![
            create_person_tool(),
            update_person_tool(),
            suggest_skills_tool(),
            find_people_by_skills_tool(),
        ],
        "retrospective" => vec![
            create_retrospective_tool(),
            update_retrospective_tool(),
            summarize_learnings_tool(),
        ],
        _ => Vec::new(),
    };
    tools.push(ask_clarifying_question_tool());
    tools.push(mark_complete_tool());
    tools
}

/// Get the combined system prompt for a given schema.
pub fn prompt_for_schema(schema: &str) -> String {
    let base = prompts::base_prompt();
    let fragment = match schema.to_lowercase().as_str() {
        "client" => Some(prompts::client_prompt()),
        "project" => Some(prompts::project_prompt()),
        "person" => Some(prompts::person_prompt()),
        "retrospective" => Some(prompts::retrospective_prompt()),
        _ => None,
    };
    match fragment {
        Some(fragment) => format!("{}\n\n{}", base, fragment),
        None => base.to_string(),
    }
}
