//! Conversation Lifecycle Service
//!
//! The thin entry points around the engine: start a conversation, post an
//! utterance (run one turn and persist its message pair), list/get, archive.
//! Messages are persisted once, only after a turn succeeds; a failed turn
//! leaves no trace in the transcript.

use guildhall_core::context::CallerContext;
use serde::{Deserialize, Serialize};

use crate::models::{Conversation, ConversationStatus, CreatedEntity, MessageRole, StoredMessage};
use crate::services::conversation::engine::ConversationEngine;
use crate::storage::Database;
use crate::utils::error::{AppError, AppResult};

/// Result of posting one utterance to a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostMessageResult {
    pub user_message: StoredMessage,
    pub assistant_message: StoredMessage,
    pub completed: bool,
    pub created_entities: Vec<CreatedEntity>,
}

/// Lifecycle service over conversations and their messages
pub struct ConversationService {
    db: Database,
    engine: ConversationEngine,
}

impl ConversationService {
    /// Create a new conversation service
    pub fn new(db: Database, engine: ConversationEngine) -> Self {
        Self { db, engine }
    }

    /// Start a new guided conversation toward a target schema.
    pub fn start_conversation(
        &self,
        ctx: &CallerContext,
        target_schema: &str,
        intent: Option<&str>,
    ) -> AppResult<Conversation> {
        if target_schema.trim().is_empty() {
            return Err(AppError::validation("target_schema is required"));
        }
        self.db
            .insert_conversation(&ctx.org_id, &ctx.user_id, Some(target_schema), intent)
    }

    /// Post a user utterance: run one engine turn, persist the resulting
    /// user+assistant message pair, and close the conversation if the turn
    /// marked it complete.
    pub async fn post_message(
        &self,
        ctx: &CallerContext,
        conversation_id: &str,
        content: &str,
    ) -> AppResult<PostMessageResult> {
        if content.trim().is_empty() {
            return Err(AppError::validation("content is required"));
        }

        let conversation = self
            .db
            .get_conversation(conversation_id, &ctx.org_id)?
            .ok_or_else(|| AppError::not_found("Conversation not found"))?;

        // No transition out of closed or archived: a finished task means a
        // new conversation, not a resurrected one.
        if conversation.status != ConversationStatus::Active {
            return Err(AppError::validation("Conversation is not active"));
        }

        let outcome = self.engine.run_turn(&conversation, content).await?;

        // The turn succeeded; persist the pair. Every user message that
        // triggered tool execution is followed by exactly one assistant
        // message aggregating the turn's output.
        let user_message =
            self.db
                .insert_message(&conversation.id, MessageRole::User, content, None)?;

        let metadata = serde_json::json!({
            "toolCalls": outcome.tool_calls,
            "createdEntities": outcome.created_entities,
        });
        let assistant_message = self.db.insert_message(
            &conversation.id,
            MessageRole::Assistant,
            &outcome.content,
            Some(&metadata),
        )?;

        if !outcome.created_entities.is_empty() {
            self.merge_created_entities(&conversation, &outcome.created_entities)?;
        }

        if outcome.completed {
            self.db.update_conversation_status(
                &conversation.id,
                &ctx.org_id,
                ConversationStatus::Closed,
            )?;
        }

        Ok(PostMessageResult {
            user_message,
            assistant_message,
            completed: outcome.completed,
            created_entities: outcome.created_entities,
        })
    }

    /// Get a conversation within the caller's organization
    pub fn get_conversation(
        &self,
        ctx: &CallerContext,
        conversation_id: &str,
    ) -> AppResult<Conversation> {
        self.db
            .get_conversation(conversation_id, &ctx.org_id)?
            .ok_or_else(|| AppError::not_found("Conversation not found"))
    }

    /// List the caller's organization's conversations, most recent first
    pub fn list_conversations(&self, ctx: &CallerContext) -> AppResult<Vec<Conversation>> {
        self.db.list_conversations(&ctx.org_id)
    }

    /// List a conversation's messages oldest first
    pub fn list_messages(
        &self,
        ctx: &CallerContext,
        conversation_id: &str,
    ) -> AppResult<Vec<StoredMessage>> {
        // Verify scope before reading the transcript
        self.get_conversation(ctx, conversation_id)?;
        self.db.list_messages(conversation_id)
    }

    /// Archive a conversation (user-initiated, from active or closed)
    pub fn archive_conversation(
        &self,
        ctx: &CallerContext,
        conversation_id: &str,
    ) -> AppResult<()> {
        let conversation = self.get_conversation(ctx, conversation_id)?;
        if conversation.status == ConversationStatus::Archived {
            return Ok(());
        }
        self.db.update_conversation_status(
            &conversation.id,
            &ctx.org_id,
            ConversationStatus::Archived,
        )
    }

    /// Fold this turn's created entities into the conversation row's
    /// accumulated type -> id map.
    fn merge_created_entities(
        &self,
        conversation: &Conversation,
        created: &[CreatedEntity],
    ) -> AppResult<()> {
        let mut map = match &conversation.created_entities {
            serde_json::Value::Object(existing) => existing.clone(),
            _ => serde_json::Map::new(),
        };
        for entity in created {
            map.insert(
                entity.entity_type.clone(),
                serde_json::Value::String(entity.id.clone()),
            );
        }
        self.db.update_conversation_created_entities(
            &conversation.id,
            &conversation.organization_id,
            &serde_json::Value::Object(map),
        )
    }
}
