//! Conversation Engine Tests
//!
//! One-turn scenarios against the scripted gateway: creation flows, the
//! tool_use/tool_result echo shape, ordering, validation fail-fast, and the
//! error taxonomy.

use serde_json::json;

use guildhall_llm::types::MessageContent;
use guildhall::AppError;

use crate::support::*;

#[tokio::test]
async fn scenario_a_create_client_from_first_utterance() {
    let store = setup();
    let conversation = store
        .db
        .insert_conversation(&store.ctx.org_id, &store.ctx.user_id, Some("client"), None)
        .unwrap();

    let provider = ScriptedProvider::new(vec![
        tool_response(
            None,
            vec![tool_call("tu_1", "create_client", json!({ "name": "Acme Corp" }))],
        ),
        text_response("I've added Acme Corp to your clients."),
    ]);
    let engine = engine_with(&store.db, &provider);

    let outcome = engine
        .process_turn(&store.ctx.org_id, &conversation.id, "Acme Corp")
        .await
        .unwrap();

    assert_eq!(outcome.content, "I've added Acme Corp to your clients.");
    assert!(!outcome.completed);
    assert_eq!(outcome.created_entities.len(), 1);
    assert_eq!(outcome.created_entities[0].entity_type, "client");
    assert_eq!(outcome.created_entities[0].name, "Acme Corp");

    // exactly one client row, with the created entity's id
    let clients = store.db.list_clients(&store.ctx.org_id).unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].id, outcome.created_entities[0].id);
    assert_eq!(clients[0].name, "Acme Corp");
}

#[tokio::test]
async fn follow_up_replays_tool_use_and_tool_result_verbatim() {
    let store = setup();
    let conversation = store
        .db
        .insert_conversation(&store.ctx.org_id, &store.ctx.user_id, Some("client"), None)
        .unwrap();

    let arguments = json!({ "name": "Acme Corp", "industry": "Technology" });
    let provider = ScriptedProvider::new(vec![
        tool_response(
            None,
            vec![tool_call("tu_echo", "create_client", arguments.clone())],
        ),
        text_response("Done."),
    ]);
    let engine = engine_with(&store.db, &provider);

    engine
        .process_turn(&store.ctx.org_id, &conversation.id, "Add Acme Corp")
        .await
        .unwrap();

    let requests = provider.requests();
    assert_eq!(requests.len(), 2);

    // Turn request: full budget, history ends with the new utterance.
    assert_eq!(requests[0].options.max_tokens_override, Some(2048));
    // Follow-up request: smaller budget, same declarations and prompt.
    assert_eq!(requests[1].options.max_tokens_override, Some(1024));
    assert_eq!(requests[0].system, requests[1].system);
    assert_eq!(requests[0].tools.len(), requests[1].tools.len());

    // The follow-up transcript is the turn's history plus exactly the
    // assistant tool_use turn and the user tool_result turn.
    let follow_up = &requests[1].messages;
    assert_eq!(follow_up.len(), requests[0].messages.len() + 2);

    let tool_use = &follow_up[follow_up.len() - 2];
    match &tool_use.content[0] {
        MessageContent::ToolUse { id, name, input } => {
            assert_eq!(id, "tu_echo");
            assert_eq!(name, "create_client");
            assert_eq!(input, &arguments);
        }
        other => panic!("expected tool_use block, got {:?}", other),
    }

    let tool_result = &follow_up[follow_up.len() - 1];
    match &tool_result.content[0] {
        MessageContent::ToolResult {
            tool_use_id,
            content,
            is_error,
        } => {
            assert_eq!(tool_use_id, "tu_echo");
            assert!(is_error.is_none());
            let payload: serde_json::Value = serde_json::from_str(content).unwrap();
            assert_eq!(payload["success"], true);
            assert!(payload["client_id"].is_string());
            assert_eq!(payload["message"], "Client \"Acme Corp\" created successfully");
        }
        other => panic!("expected tool_result block, got {:?}", other),
    }
}

#[tokio::test]
async fn scenario_c_cross_org_retrospective_aborts_with_not_found() {
    let store = setup();
    let conversation = store
        .db
        .insert_conversation(
            &store.ctx.org_id,
            &store.ctx.user_id,
            Some("retrospective"),
            None,
        )
        .unwrap();

    // a project owned by a different organization
    let rival = store.db.insert_organization("Rival", "rival").unwrap();
    let foreign_project = store
        .db
        .insert_project(
            &rival.id,
            &guildhall_tools::ProjectInput::parse(&json!({ "name": "Secret" })).unwrap(),
        )
        .unwrap();

    let provider = ScriptedProvider::new(vec![tool_response(
        None,
        vec![tool_call(
            "tu_1",
            "create_retrospective",
            json!({ "project_id": foreign_project.id }),
        )],
    )]);
    let engine = engine_with(&store.db, &provider);

    let err = engine
        .process_turn(&store.ctx.org_id, &conversation.id, "Retro on Secret")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    assert!(store
        .db
        .list_retrospectives(&foreign_project.id)
        .unwrap()
        .is_empty());
    // the ownership check failed before any mutation, so no follow-up call
    assert_eq!(provider.request_count(), 1);
}

#[tokio::test]
async fn scenario_d_suggest_phases_formats_without_store_writes() {
    let store = setup();
    let conversation = store
        .db
        .insert_conversation(&store.ctx.org_id, &store.ctx.user_id, Some("project"), None)
        .unwrap();

    let provider = ScriptedProvider::new(vec![tool_response(
        None,
        vec![tool_call(
            "tu_1",
            "suggest_phases",
            json!({
                "project_type": "new_build",
                "complexity": "moderate",
                "phases": [
                    {"name": "Discovery", "description": "Requirements and sitemap",
                     "typical_hours_range": "10-15h"},
                    {"name": "Development", "description": "Build",
                     "typical_hours_range": "40-60h"}
                ]
            }),
        )],
    )]);
    let engine = engine_with(&store.db, &provider);

    let outcome = engine
        .process_turn(&store.ctx.org_id, &conversation.id, "How should we phase it?")
        .await
        .unwrap();

    assert!(outcome.content.contains("1. **Discovery** (10-15h)"));
    assert!(outcome.content.contains("**Total Estimated: 50-75 hours**"));
    assert!(!outcome.completed);
    assert!(outcome.created_entities.is_empty());
    // informational tools trigger no follow-up gateway call
    assert_eq!(provider.request_count(), 1);
    // and no store writes at all
    assert!(store.db.list_clients(&store.ctx.org_id).unwrap().is_empty());
}

#[tokio::test]
async fn text_only_turn_is_terminal() {
    let store = setup();
    let conversation = store
        .db
        .insert_conversation(&store.ctx.org_id, &store.ctx.user_id, Some("client"), None)
        .unwrap();

    let provider = ScriptedProvider::new(vec![text_response(
        "What's the client's name or company name?",
    )]);
    let engine = engine_with(&store.db, &provider);

    let outcome = engine
        .process_turn(&store.ctx.org_id, &conversation.id, "I need to add a client")
        .await
        .unwrap();

    assert_eq!(outcome.content, "What's the client's name or company name?");
    assert!(!outcome.completed);
    assert!(outcome.created_entities.is_empty());
    assert!(outcome.tool_calls.is_empty());
    assert_eq!(provider.request_count(), 1);
}

#[tokio::test]
async fn validation_failure_aborts_before_any_mutation() {
    let store = setup();
    let conversation = store
        .db
        .insert_conversation(&store.ctx.org_id, &store.ctx.user_id, Some("client"), None)
        .unwrap();

    // first call malformed: the turn must abort without processing the
    // second, well-formed call
    let provider = ScriptedProvider::new(vec![tool_response(
        None,
        vec![
            tool_call("tu_1", "create_client", json!({ "industry": "Tech" })),
            tool_call("tu_2", "create_client", json!({ "name": "Acme Corp" })),
        ],
    )]);
    let engine = engine_with(&store.db, &provider);

    let err = engine
        .process_turn(&store.ctx.org_id, &conversation.id, "Add them both")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert!(store.db.list_clients(&store.ctx.org_id).unwrap().is_empty());
    assert_eq!(provider.request_count(), 1);
}

#[tokio::test]
async fn earlier_effects_survive_a_later_failure() {
    let store = setup();
    let conversation = store
        .db
        .insert_conversation(&store.ctx.org_id, &store.ctx.user_id, Some("client"), None)
        .unwrap();

    let provider = ScriptedProvider::new(vec![
        tool_response(
            None,
            vec![
                tool_call("tu_1", "create_client", json!({ "name": "Acme Corp" })),
                tool_call("tu_2", "create_client", json!({ "size_tier": "mid" })),
            ],
        ),
        text_response("Created the first client."),
    ]);
    let engine = engine_with(&store.db, &provider);

    let err = engine
        .process_turn(&store.ctx.org_id, &conversation.id, "Add them both")
        .await
        .unwrap_err();

    // the turn fails, but the first client's committed insert is not rolled
    // back: there is no cross-tool transaction
    assert!(matches!(err, AppError::Validation(_)));
    let clients = store.db.list_clients(&store.ctx.org_id).unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].name, "Acme Corp");
}

#[tokio::test]
async fn tool_calls_process_strictly_in_order_with_paired_confirmations() {
    let store = setup();
    let conversation = store
        .db
        .insert_conversation(&store.ctx.org_id, &store.ctx.user_id, Some("client"), None)
        .unwrap();

    let provider = ScriptedProvider::new(vec![
        tool_response(
            None,
            vec![
                tool_call("tu_first", "create_client", json!({ "name": "First Corp" })),
                tool_call("tu_second", "create_client", json!({ "name": "Second Corp" })),
            ],
        ),
        text_response("First confirmation."),
        text_response("Second confirmation."),
    ]);
    let engine = engine_with(&store.db, &provider);

    let outcome = engine
        .process_turn(&store.ctx.org_id, &conversation.id, "Add both companies")
        .await
        .unwrap();

    // the most recent mutating tool's confirmation wins as the reply
    assert_eq!(outcome.content, "Second confirmation.");
    assert_eq!(outcome.created_entities.len(), 2);
    assert_eq!(outcome.created_entities[0].name, "First Corp");
    assert_eq!(outcome.created_entities[1].name, "Second Corp");

    // each confirmation request pairs with its own call, in execution order
    let requests = provider.requests();
    assert_eq!(requests.len(), 3);
    let base_len = requests[0].messages.len();
    for (request, expected_id) in requests[1..].iter().zip(["tu_first", "tu_second"]) {
        // each follow-up replays the base history plus exactly one pair
        assert_eq!(request.messages.len(), base_len + 2);
        match &request.messages[base_len].content[0] {
            MessageContent::ToolUse { id, .. } => assert_eq!(id, expected_id),
            other => panic!("expected tool_use block, got {:?}", other),
        }
    }
}

#[tokio::test]
async fn unknown_tool_name_fails_the_turn() {
    let store = setup();
    let conversation = store
        .db
        .insert_conversation(&store.ctx.org_id, &store.ctx.user_id, Some("client"), None)
        .unwrap();

    let provider = ScriptedProvider::new(vec![tool_response(
        None,
        vec![tool_call("tu_1", "drop_all_tables", json!({}))],
    )]);
    let engine = engine_with(&store.db, &provider);

    let err = engine
        .process_turn(&store.ctx.org_id, &conversation.id, "hi")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn unset_schema_defaults_to_client() {
    let store = setup();
    let conversation = store
        .db
        .insert_conversation(&store.ctx.org_id, &store.ctx.user_id, None, None)
        .unwrap();

    let provider = ScriptedProvider::new(vec![text_response("Hello!")]);
    let engine = engine_with(&store.db, &provider);

    engine
        .process_turn(&store.ctx.org_id, &conversation.id, "hi")
        .await
        .unwrap();

    let request = &provider.requests()[0];
    let tool_names: Vec<_> = request.tools.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        tool_names,
        vec!["create_client", "ask_clarifying_question", "mark_complete"]
    );
    assert!(request
        .system
        .as_ref()
        .unwrap()
        .contains("create a new client record"));
}

#[tokio::test]
async fn mark_complete_keeps_existing_text() {
    let store = setup();
    let conversation = store
        .db
        .insert_conversation(&store.ctx.org_id, &store.ctx.user_id, Some("client"), None)
        .unwrap();

    let provider = ScriptedProvider::new(vec![tool_response(
        Some("All done!"),
        vec![tool_call("tu_1", "mark_complete", json!({ "summary": "Created Acme Corp" }))],
    )]);
    let engine = engine_with(&store.db, &provider);

    let outcome = engine
        .process_turn(&store.ctx.org_id, &conversation.id, "thanks")
        .await
        .unwrap();

    assert!(outcome.completed);
    assert_eq!(outcome.content, "All done!");
}

#[tokio::test]
async fn clarifying_question_fills_empty_reply() {
    let store = setup();
    let conversation = store
        .db
        .insert_conversation(&store.ctx.org_id, &store.ctx.user_id, Some("client"), None)
        .unwrap();

    let provider = ScriptedProvider::new(vec![tool_response(
        None,
        vec![tool_call(
            "tu_1",
            "ask_clarifying_question",
            json!({ "question": "What's the company's industry?" }),
        )],
    )]);
    let engine = engine_with(&store.db, &provider);

    let outcome = engine
        .process_turn(&store.ctx.org_id, &conversation.id, "Add Acme")
        .await
        .unwrap();

    assert_eq!(outcome.content, "What's the company's industry?");
    assert!(!outcome.completed);
}

#[tokio::test]
async fn informational_text_appends_to_narrative() {
    let store = setup();
    let conversation = store
        .db
        .insert_conversation(&store.ctx.org_id, &store.ctx.user_id, Some("person"), None)
        .unwrap();

    let provider = ScriptedProvider::new(vec![tool_response(
        Some("Here's what I'd track for Sarah:"),
        vec![tool_call(
            "tu_1",
            "suggest_skills",
            json!({
                "role_description": "UX designer",
                "suggested_skills": [
                    {"name": "Figma", "category": "design", "typical_for_role": true}
                ]
            }),
        )],
    )]);
    let engine = engine_with(&store.db, &provider);

    let outcome = engine
        .process_turn(&store.ctx.org_id, &conversation.id, "Sarah is a UX designer")
        .await
        .unwrap();

    assert!(outcome.content.starts_with("Here's what I'd track for Sarah:\n\n"));
    assert!(outcome.content.contains("**Core skills:**\n• Figma (design)"));
}

#[tokio::test]
async fn gateway_errors_map_to_config_and_upstream() {
    let store = setup();
    let conversation = store
        .db
        .insert_conversation(&store.ctx.org_id, &store.ctx.user_id, Some("client"), None)
        .unwrap();

    let provider = ScriptedProvider::new(vec![Err(
        guildhall_llm::types::LlmError::AuthenticationFailed {
            message: "no key".to_string(),
        },
    )]);
    let engine = engine_with(&store.db, &provider);
    let err = engine
        .process_turn(&store.ctx.org_id, &conversation.id, "hi")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Config(_)));

    let provider = ScriptedProvider::new(vec![Err(guildhall_llm::types::LlmError::ServerError {
        message: "overloaded".to_string(),
        status: Some(529),
    })]);
    let engine = engine_with(&store.db, &provider);
    let err = engine
        .process_turn(&store.ctx.org_id, &conversation.id, "hi")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Upstream(_)));
}

#[tokio::test]
async fn replaying_an_identical_turn_creates_a_second_entity() {
    let store = setup();
    let conversation = store
        .db
        .insert_conversation(&store.ctx.org_id, &store.ctx.user_id, Some("client"), None)
        .unwrap();

    let script = || {
        ScriptedProvider::new(vec![
            tool_response(
                None,
                vec![tool_call("tu_1", "create_client", json!({ "name": "Acme Corp" }))],
            ),
            text_response("Created."),
        ])
    };

    let first = engine_with(&store.db, &script());
    first
        .process_turn(&store.ctx.org_id, &conversation.id, "Acme Corp")
        .await
        .unwrap();

    let second = engine_with(&store.db, &script());
    second
        .process_turn(&store.ctx.org_id, &conversation.id, "Acme Corp")
        .await
        .unwrap();

    // no dedup by design: same fields, distinct ids
    let clients = store.db.list_clients(&store.ctx.org_id).unwrap();
    assert_eq!(clients.len(), 2);
    assert_eq!(clients[0].name, clients[1].name);
    assert_ne!(clients[0].id, clients[1].id);
}

#[tokio::test]
async fn conversation_outside_org_scope_is_not_found() {
    let store = setup();
    let rival = store.db.insert_organization("Rival", "rival").unwrap();
    let rival_user = store
        .db
        .insert_user("ext_rival", "r@rival.com", &rival.id, "owner")
        .unwrap();
    let foreign_conversation = store
        .db
        .insert_conversation(&rival.id, &rival_user.id, Some("client"), None)
        .unwrap();

    let provider = ScriptedProvider::new(vec![]);
    let engine = engine_with(&store.db, &provider);

    let err = engine
        .process_turn(&store.ctx.org_id, &foreign_conversation.id, "hi")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(provider.request_count(), 0);
}
