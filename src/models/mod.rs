//! Data Models
//!
//! Row types for the organization-scoped store and the conversation
//! engine's inputs/outputs.

pub mod client;
pub mod conversation;
pub mod organization;
pub mod person;
pub mod project;
pub mod retrospective;

pub use client::*;
pub use conversation::*;
pub use organization::*;
pub use person::*;
pub use project::*;
pub use retrospective::*;
