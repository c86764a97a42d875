//! Integration Tests
//!
//! End-to-end coverage of the conversation engine and lifecycle service
//! against an in-memory store and a scripted completion gateway.

mod engine_tests;
mod flow_tests;
mod lifecycle_tests;
mod support;
