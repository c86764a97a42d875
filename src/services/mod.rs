//! Services
//!
//! Business logic services: the auth-context bridge and the conversation
//! engine with its lifecycle service.

pub mod auth;
pub mod conversation;

pub use auth::resolve_caller;
pub use conversation::{ConversationEngine, ConversationService, PostMessageResult, TurnOutcome};
