//! Conversation and Message Models
//!
//! The conversation row carries the guided flow's target schema and
//! lifecycle status; message rows are the append-only, strictly-ordered
//! transcript replayed to the model on every turn.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a conversation.
///
/// `active -> closed` happens when a turn's mark_complete fires;
/// `-> archived` is user-initiated. There is no transition out of closed or
/// archived: starting a new task means a new conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationStatus {
    Active,
    Closed,
    Archived,
}

impl ConversationStatus {
    /// Storage string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationStatus::Active => "active",
            ConversationStatus::Closed => "closed",
            ConversationStatus::Archived => "archived",
        }
    }

    /// Parse from the storage string, defaulting to Active.
    pub fn from_str(s: &str) -> Self {
        match s {
            "closed" => Self::Closed,
            "archived" => Self::Archived,
            _ => Self::Active,
        }
    }
}

/// A guided conversation steering toward one target schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub organization_id: String,
    pub user_id: String,
    /// Target entity family: client | project | person | retrospective.
    /// Engine defaults to "client" when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_schema: Option<String>,
    /// Free-text statement of what the user wants
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    pub status: ConversationStatus,
    /// Opaque key/value scratchpad
    pub extracted_data: serde_json::Value,
    /// Map of entity-type -> id accumulated across this conversation's turns
    pub created_entities: serde_json::Value,
    pub created_at: String,
    pub updated_at: String,
}

/// Role of a stored message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

impl MessageRole {
    /// Storage string for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::System => "system",
        }
    }

    /// Parse from the storage string, defaulting to User.
    pub fn from_str(s: &str) -> Self {
        match s {
            "assistant" => Self::Assistant,
            "system" => Self::System,
            _ => Self::User,
        }
    }
}

/// A persisted conversation message. Immutable once created; ordering by
/// creation time is the sole input replayed to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMessage {
    pub id: String,
    pub conversation_id: String,
    pub role: MessageRole,
    pub content: String,
    /// For assistant rows: raw tool invocations and created entities from
    /// that turn, retained for audit/replay
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    pub created_at: String,
}

/// A domain record created as a direct side effect of a tool invocation
/// within a turn, surfaced so a caller can navigate to the new record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedEntity {
    #[serde(rename = "type")]
    pub entity_type: String,
    pub id: String,
    pub name: String,
}

impl CreatedEntity {
    /// Create a new created-entity record
    pub fn new(
        entity_type: impl Into<String>,
        id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            entity_type: entity_type.into(),
            id: id.into(),
            name: name.into(),
        }
    }
}
