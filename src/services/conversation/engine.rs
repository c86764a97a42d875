//! Conversation Engine
//!
//! Executes exactly one turn: ingest one user utterance, request a
//! completion, apply the side effects the model requested via tool calls,
//! and produce one aggregated assistant response.
//!
//! Tool calls are processed strictly in the order the model returned them,
//! as a sequential fold: later calls in the same turn may depend on earlier
//! ones' effects (e.g. a retrospective referencing a just-created project),
//! and each mutating tool's confirmation request must immediately follow its
//! own execution to keep the tool_use/tool_result pairing causally
//! consistent. Partial effects from earlier calls are not rolled back when a
//! later call fails.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use guildhall_llm::types::{LlmRequestOptions, Message, ToolCall, ToolDefinition};
use guildhall_llm::LlmProvider;
use guildhall_tools::{prompt_for_schema, tools_for_schema, ToolKind};

use crate::models::{Conversation, CreatedEntity, MessageRole};
use crate::services::conversation::executor::{execute_tool_call, ToolOutcome};
use crate::storage::Database;
use crate::utils::error::{AppError, AppResult};

/// Token budget for the turn's primary completion request
const TURN_MAX_TOKENS: u32 = 2048;

/// Token budget for per-tool confirmation follow-ups
const FOLLOW_UP_MAX_TOKENS: u32 = 1024;

/// Schema used when a conversation has no target schema set
const DEFAULT_SCHEMA: &str = "client";

/// Result of processing one conversation turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnOutcome {
    /// Aggregated assistant reply for the turn
    pub content: String,
    /// Raw tool calls from the model, retained for audit/logging
    pub tool_calls: Vec<ToolCall>,
    /// Whether the model marked the conversational task complete
    pub completed: bool,
    /// Entities created by this turn's successful create_* calls, in order
    pub created_entities: Vec<CreatedEntity>,
}

/// The per-turn orchestration engine.
///
/// Both collaborators are injected: the store handle and the completion
/// gateway. Nothing here is process-global, so the engine is unit-testable
/// with an in-memory store and a scripted provider.
pub struct ConversationEngine {
    db: Database,
    provider: Arc<dyn LlmProvider>,
}

impl ConversationEngine {
    /// Create a new engine over the given store and gateway
    pub fn new(db: Database, provider: Arc<dyn LlmProvider>) -> Self {
        Self { db, provider }
    }

    /// Process one turn for a conversation id, scoped to the caller's
    /// organization. Fails NotFound when the conversation is absent or
    /// belongs to another organization.
    pub async fn process_turn(
        &self,
        organization_id: &str,
        conversation_id: &str,
        user_message: &str,
    ) -> AppResult<TurnOutcome> {
        let conversation = self
            .db
            .get_conversation(conversation_id, organization_id)?
            .ok_or_else(|| AppError::not_found("Conversation not found"))?;
        self.run_turn(&conversation, user_message).await
    }

    /// Process one turn for an already-loaded conversation.
    pub async fn run_turn(
        &self,
        conversation: &Conversation,
        user_message: &str,
    ) -> AppResult<TurnOutcome> {
        // Full ordered history plus the new utterance. The utterance is only
        // in-memory here; persisting it is the caller's responsibility and
        // happens once, after the turn succeeds.
        let mut messages = self.load_history(&conversation.id)?;
        messages.push(Message::user(user_message));

        let schema = conversation
            .target_schema
            .as_deref()
            .unwrap_or(DEFAULT_SCHEMA);
        let tools = tools_for_schema(schema);
        let system_prompt = prompt_for_schema(schema);

        let response = self
            .provider
            .send_message(
                messages.clone(),
                Some(system_prompt.clone()),
                tools.clone(),
                LlmRequestOptions::with_max_tokens(TURN_MAX_TOKENS),
            )
            .await?;

        let mut final_content = response.text();
        let mut completed = false;
        let mut created_entities: Vec<CreatedEntity> = Vec::new();

        for call in &response.tool_calls {
            let kind = ToolKind::from_name(&call.name).ok_or_else(|| {
                AppError::validation(format!("Unknown tool requested: {}", call.name))
            })?;
            tracing::info!(tool = %call.name, id = %call.id, "Executing tool call");

            match execute_tool_call(&self.db, &conversation.organization_id, kind, call)? {
                ToolOutcome::Mutation { payload, created } => {
                    if let Some(entity) = created {
                        created_entities.push(entity);
                    }
                    // The most recent mutating tool's confirmation wins as
                    // the visible reply.
                    final_content = self
                        .request_confirmation(&messages, &tools, &system_prompt, call, &payload)
                        .await?;
                }
                ToolOutcome::Informational { text } => {
                    // Informational output coexists with other narrative
                    // text in the same reply, so it appends, never replaces.
                    if final_content.trim().is_empty() {
                        final_content = text;
                    } else {
                        final_content = format!("{}\n\n{}", final_content, text);
                    }
                }
                ToolOutcome::Completion { summary } => {
                    completed = true;
                    if final_content.trim().is_empty() {
                        final_content = summary;
                    }
                }
                ToolOutcome::Clarification { question } => {
                    if final_content.trim().is_empty() {
                        final_content = question;
                    }
                }
            }
        }

        Ok(TurnOutcome {
            content: final_content,
            tool_calls: response.tool_calls,
            completed,
            created_entities,
        })
    }

    /// Load the conversation's persisted transcript as gateway messages.
    fn load_history(&self, conversation_id: &str) -> AppResult<Vec<Message>> {
        let stored = self.db.list_messages(conversation_id)?;
        Ok(stored
            .iter()
            .filter(|m| m.role != MessageRole::System)
            .map(|m| match m.role {
                MessageRole::Assistant => Message::assistant(&m.content),
                _ => Message::user(&m.content),
            })
            .collect())
    }

    /// Second gateway call after a mutating tool: replay the history plus a
    /// synthetic assistant tool_use turn and a user tool_result turn
    /// carrying the success payload, and ask the model for a natural
    /// confirmation. The tool_use block echoes the original call verbatim
    /// (same id, name, input) so the model can ground its reply.
    async fn request_confirmation(
        &self,
        history: &[Message],
        tools: &[ToolDefinition],
        system_prompt: &str,
        call: &ToolCall,
        payload: &serde_json::Value,
    ) -> AppResult<String> {
        let mut messages = history.to_vec();
        messages.push(Message::tool_use(
            &call.id,
            &call.name,
            call.arguments.clone(),
        ));
        messages.push(Message::tool_result(&call.id, payload.to_string(), false));

        let response = self
            .provider
            .send_message(
                messages,
                Some(system_prompt.to_string()),
                tools.to_vec(),
                LlmRequestOptions::with_max_tokens(FOLLOW_UP_MAX_TOKENS),
            )
            .await?;

        Ok(response.text())
    }
}
