//! Test Support
//!
//! A scripted gateway provider that replays canned responses and records
//! every request it receives, plus seeding helpers for the in-memory store.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use guildhall::services::conversation::{ConversationEngine, ConversationService};
use guildhall::Database;
use guildhall_core::context::{CallerContext, OrgRole};
use guildhall_llm::types::{
    LlmError, LlmRequestOptions, LlmResponse, LlmResult, Message, ProviderConfig, StopReason,
    ToolCall, ToolDefinition, UsageStats,
};
use guildhall_llm::LlmProvider;

/// One request the scripted provider saw, verbatim.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub messages: Vec<Message>,
    pub system: Option<String>,
    pub tools: Vec<ToolDefinition>,
    pub options: LlmRequestOptions,
}

/// A gateway provider that pops canned results in order and records every
/// request. Running out of script is a test bug and fails loudly.
pub struct ScriptedProvider {
    config: ProviderConfig,
    responses: Mutex<VecDeque<LlmResult<LlmResponse>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<LlmResult<LlmResponse>>) -> Arc<Self> {
        Arc::new(Self {
            config: ProviderConfig {
                api_key: Some("scripted".to_string()),
                ..Default::default()
            },
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// All requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn send_message(
        &self,
        messages: Vec<Message>,
        system: Option<String>,
        tools: Vec<ToolDefinition>,
        request_options: LlmRequestOptions,
    ) -> LlmResult<LlmResponse> {
        self.requests.lock().unwrap().push(RecordedRequest {
            messages,
            system,
            tools,
            options: request_options,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(LlmError::Other {
                    message: "scripted provider ran out of responses".to_string(),
                })
            })
    }

    async fn health_check(&self) -> LlmResult<()> {
        Ok(())
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

/// Build a text-only response.
pub fn text_response(text: &str) -> LlmResult<LlmResponse> {
    Ok(LlmResponse {
        content: Some(text.to_string()),
        tool_calls: vec![],
        stop_reason: StopReason::EndTurn,
        usage: UsageStats {
            input_tokens: 10,
            output_tokens: 10,
            cache_read_tokens: None,
            cache_creation_tokens: None,
        },
        model: "claude-3-5-sonnet-20241022".to_string(),
    })
}

/// Build a response carrying tool calls (and optional text).
pub fn tool_response(text: Option<&str>, tool_calls: Vec<ToolCall>) -> LlmResult<LlmResponse> {
    Ok(LlmResponse {
        content: text.map(String::from),
        tool_calls,
        stop_reason: StopReason::ToolUse,
        usage: UsageStats::default(),
        model: "claude-3-5-sonnet-20241022".to_string(),
    })
}

/// Build a tool call.
pub fn tool_call(id: &str, name: &str, arguments: serde_json::Value) -> ToolCall {
    ToolCall {
        id: id.to_string(),
        name: name.to_string(),
        arguments,
    }
}

/// An in-memory store seeded with one organization and one user.
pub struct TestStore {
    pub db: Database,
    pub ctx: CallerContext,
}

/// Seed a fresh store with an organization and a member user.
pub fn setup() -> TestStore {
    let db = Database::new_in_memory().unwrap();
    let org = db.insert_organization("Acme Agency", "acme-agency").unwrap();
    let user = db
        .insert_user("ext_owner", "owner@acme.agency", &org.id, "owner")
        .unwrap();
    let ctx = CallerContext::new(user.id, org.id, OrgRole::Owner);
    TestStore { db, ctx }
}

/// Build an engine over the store and a scripted provider.
pub fn engine_with(db: &Database, provider: &Arc<ScriptedProvider>) -> ConversationEngine {
    ConversationEngine::new(db.clone(), provider.clone() as Arc<dyn LlmProvider>)
}

/// Build the lifecycle service over the store and a scripted provider.
pub fn service_with(db: &Database, provider: &Arc<ScriptedProvider>) -> ConversationService {
    ConversationService::new(db.clone(), engine_with(db, provider))
}
