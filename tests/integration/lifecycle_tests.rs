//! Conversation Lifecycle Tests
//!
//! Service-level coverage: start/post/list/archive, message persistence
//! rules, and the one-way status machine.

use serde_json::json;

use guildhall::models::{ConversationStatus, MessageRole};
use guildhall::AppError;

use crate::support::*;

#[tokio::test]
async fn scenario_b_mark_complete_closes_the_conversation() {
    let store = setup();
    let provider = ScriptedProvider::new(vec![
        // turn 1: create the client, confirm
        tool_response(
            None,
            vec![tool_call("tu_1", "create_client", json!({ "name": "Acme Corp" }))],
        ),
        text_response("I've added Acme Corp. Anything else?"),
        // turn 2: mark complete with no text
        tool_response(
            None,
            vec![tool_call("tu_2", "mark_complete", json!({ "summary": "Created Acme Corp" }))],
        ),
    ]);
    let service = service_with(&store.db, &provider);

    let conversation = service
        .start_conversation(&store.ctx, "client", Some("add a new client"))
        .unwrap();
    assert_eq!(conversation.status, ConversationStatus::Active);

    let first = service
        .post_message(&store.ctx, &conversation.id, "Acme Corp")
        .await
        .unwrap();
    assert!(!first.completed);
    assert_eq!(first.created_entities.len(), 1);

    let second = service
        .post_message(&store.ctx, &conversation.id, "that's everything")
        .await
        .unwrap();
    assert!(second.completed);
    // mark_complete's summary becomes the reply when no other text exists
    assert_eq!(second.assistant_message.content, "Created Acme Corp");

    let closed = service.get_conversation(&store.ctx, &conversation.id).unwrap();
    assert_eq!(closed.status, ConversationStatus::Closed);
}

#[tokio::test]
async fn post_message_persists_exactly_one_pair_per_turn() {
    let store = setup();
    let provider = ScriptedProvider::new(vec![
        tool_response(
            None,
            vec![tool_call("tu_1", "create_client", json!({ "name": "Acme Corp" }))],
        ),
        text_response("Added Acme Corp."),
    ]);
    let service = service_with(&store.db, &provider);

    let conversation = service
        .start_conversation(&store.ctx, "client", None)
        .unwrap();
    // a conversation with zero messages is valid
    assert!(service
        .list_messages(&store.ctx, &conversation.id)
        .unwrap()
        .is_empty());

    let result = service
        .post_message(&store.ctx, &conversation.id, "Acme Corp")
        .await
        .unwrap();

    let messages = service.list_messages(&store.ctx, &conversation.id).unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, MessageRole::User);
    assert_eq!(messages[0].content, "Acme Corp");
    assert_eq!(messages[1].role, MessageRole::Assistant);
    assert_eq!(messages[1].content, "Added Acme Corp.");

    // assistant metadata retains the raw tool calls and created entities
    let metadata = messages[1].metadata.as_ref().unwrap();
    assert_eq!(metadata["toolCalls"][0]["name"], "create_client");
    assert_eq!(
        metadata["createdEntities"][0]["id"],
        result.created_entities[0].id
    );
}

#[tokio::test]
async fn failed_turn_persists_no_messages() {
    let store = setup();
    let provider = ScriptedProvider::new(vec![Err(guildhall_llm::types::LlmError::NetworkError {
        message: "connection refused".to_string(),
    })]);
    let service = service_with(&store.db, &provider);

    let conversation = service
        .start_conversation(&store.ctx, "client", None)
        .unwrap();

    let err = service
        .post_message(&store.ctx, &conversation.id, "Acme Corp")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Upstream(_)));

    // the user utterance from the failed turn is not part of the transcript
    assert!(service
        .list_messages(&store.ctx, &conversation.id)
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn created_entities_accumulate_on_the_conversation_row() {
    let store = setup();
    let provider = ScriptedProvider::new(vec![
        tool_response(
            None,
            vec![tool_call("tu_1", "create_client", json!({ "name": "Acme Corp" }))],
        ),
        text_response("Added."),
    ]);
    let service = service_with(&store.db, &provider);

    let conversation = service
        .start_conversation(&store.ctx, "client", None)
        .unwrap();
    let result = service
        .post_message(&store.ctx, &conversation.id, "Acme Corp")
        .await
        .unwrap();

    let refreshed = service.get_conversation(&store.ctx, &conversation.id).unwrap();
    assert_eq!(
        refreshed.created_entities["client"],
        result.created_entities[0].id
    );
}

#[tokio::test]
async fn closed_and_archived_conversations_reject_new_turns() {
    let store = setup();
    let provider = ScriptedProvider::new(vec![tool_response(
        None,
        vec![tool_call("tu_1", "mark_complete", json!({ "summary": "Done" }))],
    )]);
    let service = service_with(&store.db, &provider);

    let conversation = service
        .start_conversation(&store.ctx, "client", None)
        .unwrap();
    service
        .post_message(&store.ctx, &conversation.id, "done")
        .await
        .unwrap();

    // closed: no way back to active
    let err = service
        .post_message(&store.ctx, &conversation.id, "one more thing")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    service.archive_conversation(&store.ctx, &conversation.id).unwrap();
    let archived = service.get_conversation(&store.ctx, &conversation.id).unwrap();
    assert_eq!(archived.status, ConversationStatus::Archived);

    let err = service
        .post_message(&store.ctx, &conversation.id, "hello?")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn archive_is_idempotent_and_allowed_from_active() {
    let store = setup();
    let provider = ScriptedProvider::new(vec![]);
    let service = service_with(&store.db, &provider);

    let conversation = service
        .start_conversation(&store.ctx, "project", None)
        .unwrap();

    service.archive_conversation(&store.ctx, &conversation.id).unwrap();
    service.archive_conversation(&store.ctx, &conversation.id).unwrap();

    let archived = service.get_conversation(&store.ctx, &conversation.id).unwrap();
    assert_eq!(archived.status, ConversationStatus::Archived);
}

#[tokio::test]
async fn input_validation_at_the_service_boundary() {
    let store = setup();
    let provider = ScriptedProvider::new(vec![]);
    let service = service_with(&store.db, &provider);

    let err = service.start_conversation(&store.ctx, "  ", None).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let conversation = service
        .start_conversation(&store.ctx, "client", None)
        .unwrap();
    let err = service
        .post_message(&store.ctx, &conversation.id, "   ")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn cross_org_access_is_not_found() {
    let store = setup();
    let provider = ScriptedProvider::new(vec![]);
    let service = service_with(&store.db, &provider);

    let conversation = service
        .start_conversation(&store.ctx, "client", None)
        .unwrap();

    // a caller from another organization
    let rival = store.db.insert_organization("Rival", "rival").unwrap();
    let rival_user = store
        .db
        .insert_user("ext_rival", "r@rival.com", &rival.id, "member")
        .unwrap();
    let rival_ctx = guildhall_core::context::CallerContext::new(
        rival_user.id,
        rival.id,
        guildhall_core::context::OrgRole::Member,
    );

    assert!(matches!(
        service.get_conversation(&rival_ctx, &conversation.id),
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.list_messages(&rival_ctx, &conversation.id),
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service
            .post_message(&rival_ctx, &conversation.id, "hi")
            .await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn list_conversations_is_scoped_to_the_caller() {
    let store = setup();
    let provider = ScriptedProvider::new(vec![]);
    let service = service_with(&store.db, &provider);

    service.start_conversation(&store.ctx, "client", None).unwrap();
    service.start_conversation(&store.ctx, "project", None).unwrap();

    let rival = store.db.insert_organization("Rival", "rival").unwrap();
    let rival_user = store
        .db
        .insert_user("ext_rival", "r@rival.com", &rival.id, "member")
        .unwrap();
    store
        .db
        .insert_conversation(&rival.id, &rival_user.id, Some("client"), None)
        .unwrap();

    let mine = service.list_conversations(&store.ctx).unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|c| c.organization_id == store.ctx.org_id));
}
