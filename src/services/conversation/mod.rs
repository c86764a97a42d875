//! Conversation Services
//!
//! The per-turn orchestration engine and the lifecycle service around it.
//!
//! - `engine` - one turn: user utterance in, aggregated assistant reply out
//! - `executor` - per-tool validation and store execution
//! - `formatters` - deterministic text for the informational tools
//! - `service` - start/post/list/get/archive with message persistence

pub mod engine;
mod executor;
pub mod formatters;
pub mod service;

pub use engine::{ConversationEngine, TurnOutcome};
pub use service::{ConversationService, PostMessageResult};
