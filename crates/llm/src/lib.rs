//! Guildhall LLM
//!
//! The completion gateway: a single abstraction over "send conversation
//! history + tool declarations + system prompt to a language model, get back
//! free text and/or requested tool invocations, with usage accounting".
//!
//! One request, one response. Retry policy, streaming, and timeouts are the
//! caller's concern, not the gateway's.

pub mod anthropic;
pub mod http_client;
pub mod provider;
pub mod types;

// Re-export main types
pub use anthropic::AnthropicProvider;
pub use http_client::build_http_client;
pub use provider::LlmProvider;
pub use types::*;
