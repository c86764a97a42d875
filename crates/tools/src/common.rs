//! Universal Control Tools
//!
//! The two tools every conversation gets regardless of schema:
//! `ask_clarifying_question` and `mark_complete`.

use std::collections::HashMap;

use guildhall_core::error::CoreResult;
use guildhall_llm::types::{ParameterSchema, ToolDefinition};
use serde::{Deserialize, Serialize};

use crate::validate;

/// Validated input for `ask_clarifying_question`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskClarifyingQuestionInput {
    pub question: String,
    #[serde(default)]
    pub reason: Option<String>,
}

impl AskClarifyingQuestionInput {
    /// Parse and validate raw tool arguments.
    pub fn parse(args: &serde_json::Value) -> CoreResult<Self> {
        let input: Self = validate::from_args("ask_clarifying_question", args)?;
        validate::non_empty("ask_clarifying_question", "question", &input.question)?;
        Ok(input)
    }
}

/// Validated input for `mark_complete`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkCompleteInput {
    pub summary: String,
}

impl MarkCompleteInput {
    /// Parse and validate raw tool arguments.
    pub fn parse(args: &serde_json::Value) -> CoreResult<Self> {
        let input: Self = validate::from_args("mark_complete", args)?;
        validate::non_empty("mark_complete", "summary", &input.summary)?;
        Ok(input)
    }
}

/// Declaration for the `ask_clarifying_question` tool.
pub fn ask_clarifying_question_tool() -> ToolDefinition {
    ToolDefinition {
        name: "ask_clarifying_question".to_string(),
        description: "Ask the user a follow-up question to gather more information. Use this \
                      when you need additional details before creating a record or when the \
                      user's intent is unclear."
            .to_string(),
        input_schema: ParameterSchema::object(
            None,
            HashMap::from([
                (
                    "question".to_string(),
                    ParameterSchema::string(Some("The question to ask the user")),
                ),
                (
                    "reason".to_string(),
                    ParameterSchema::string(Some(
                        "Brief explanation of why this information is needed",
                    )),
                ),
            ]),
            vec!["question".to_string()],
        ),
    }
}

/// Declaration for the `mark_complete` tool.
pub fn mark_complete_tool() -> ToolDefinition {
    ToolDefinition {
        name: "mark_complete".to_string(),
        description: "Mark the conversation as complete. Use this when you have successfully \
                      created the requested record(s) or when the user indicates they are done."
            .to_string(),
        input_schema: ParameterSchema::object(
            None,
            HashMap::from([(
                "summary".to_string(),
                ParameterSchema::string(Some("Brief summary of what was accomplished")),
            )]),
            vec!["summary".to_string()],
        ),
    }
}
