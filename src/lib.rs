//! Guildhall - Conversational Record-Keeping Backend
//!
//! Turns open-ended natural-language conversation into structured business
//! records (clients, projects, people, retrospectives). The core is a
//! per-turn orchestration loop that drives a language model through typed
//! tool invocations, validates and executes them against an
//! organization-scoped store, and feeds results back to the model for a
//! natural follow-up.
//!
//! - `models` - Domain entities and conversation/message rows
//! - `storage` - SQLite entity store (organization-scoped CRUD)
//! - `services` - Conversation engine, lifecycle service, auth bridge
//! - `utils` - Error types and path helpers

pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use services::auth::resolve_caller;
pub use services::conversation::{
    ConversationEngine, ConversationService, PostMessageResult, TurnOutcome,
};
pub use storage::Database;
pub use utils::error::{AppError, AppResult};
