//! Guildhall Core
//!
//! Foundational types for the Guildhall workspace: the shared error
//! vocabulary, the authenticated-caller context every organization-scoped
//! operation carries, and proxy configuration data types. This crate has no
//! dependencies on application-level code (database, LLM providers, etc.).
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `context` - Authenticated caller context (`CallerContext`, `OrgRole`)
//! - `proxy` - Proxy configuration data types shared across workspace crates
//!
//! ## Design Principles
//!
//! 1. **Zero external dependencies beyond serde/thiserror** - keeps build times minimal
//! 2. **Unidirectional dependency** - this crate depends on nothing else in the workspace

pub mod context;
pub mod error;
pub mod proxy;

pub use context::{CallerContext, OrgRole};
pub use error::{CoreError, CoreResult};
pub use proxy::{ProxyConfig, ProxyProtocol};
