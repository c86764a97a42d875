//! Multi-Turn Flow Tests
//!
//! Whole guided flows across several turns: project scoping with phases,
//! talent onboarding with skill links, and a retrospective that depends on
//! a project created earlier in the same conversation.

use serde_json::json;

use guildhall::models::ConversationStatus;

use crate::support::*;

#[tokio::test]
async fn project_scoping_flow_with_phases() {
    let store = setup();
    let provider = ScriptedProvider::new(vec![
        // turn 1: the model suggests a breakdown before creating anything
        tool_response(
            Some("Here's a typical breakdown for that:"),
            vec![tool_call(
                "tu_1",
                "suggest_phases",
                json!({
                    "project_type": "new_build",
                    "complexity": "simple",
                    "phases": [
                        {"name": "Discovery", "description": "Requirements",
                         "typical_hours_range": "10-15h"},
                        {"name": "Build", "description": "Implementation",
                         "typical_hours_range": "40-60h"}
                    ]
                }),
            )],
        ),
        // turn 2: the user confirms, the model creates project + phases
        tool_response(
            None,
            vec![tool_call(
                "tu_2",
                "create_project",
                json!({
                    "name": "Marketing Site",
                    "type": "new_build",
                    "estimated_hours": 75,
                    "phases": [
                        {"name": "Discovery", "estimated_hours": 12},
                        {"name": "Build", "estimated_hours": 50}
                    ]
                }),
            )],
        ),
        text_response("Project saved with two phases."),
    ]);
    let service = service_with(&store.db, &provider);

    let conversation = service
        .start_conversation(&store.ctx, "project", Some("scope a marketing site"))
        .unwrap();

    let first = service
        .post_message(&store.ctx, &conversation.id, "I need to scope a new website")
        .await
        .unwrap();
    assert!(first
        .assistant_message
        .content
        .starts_with("Here's a typical breakdown for that:\n\n"));
    assert!(first.created_entities.is_empty());

    let second = service
        .post_message(&store.ctx, &conversation.id, "Looks right, create it")
        .await
        .unwrap();
    assert_eq!(second.created_entities.len(), 1);
    let project_id = &second.created_entities[0].id;

    let project = store.db.get_project(project_id, &store.ctx.org_id).unwrap().unwrap();
    assert_eq!(project.status, "draft");
    assert_eq!(project.estimated_hours, Some(75.0));

    let phases = store.db.list_phases(project_id).unwrap();
    assert_eq!(phases.len(), 2);
    assert_eq!(phases[0].name, "Discovery");
    assert_eq!(phases[1].sort_order, 1);

    // turn 1 made one gateway call, turn 2 made two (turn + confirmation)
    assert_eq!(provider.request_count(), 3);
}

#[tokio::test]
async fn update_project_in_a_later_turn() {
    let store = setup();
    let provider_turn_one = ScriptedProvider::new(vec![
        tool_response(
            None,
            vec![tool_call(
                "tu_1",
                "create_project",
                json!({ "name": "Audit", "type": "audit" }),
            )],
        ),
        text_response("Created the audit project."),
    ]);
    let service = service_with(&store.db, &provider_turn_one);

    let conversation = service
        .start_conversation(&store.ctx, "project", None)
        .unwrap();
    let first = service
        .post_message(&store.ctx, &conversation.id, "Track an audit for Initech")
        .await
        .unwrap();
    let project_id = first.created_entities[0].id.clone();

    // the next turn's model references the id it learned from the first
    let provider_turn_two = ScriptedProvider::new(vec![
        tool_response(
            None,
            vec![tool_call(
                "tu_2",
                "update_project",
                json!({ "project_id": project_id, "status": "active", "estimated_hours": 30 }),
            )],
        ),
        text_response("Marked it active at 30 hours."),
    ]);
    let service = service_with(&store.db, &provider_turn_two);

    let second = service
        .post_message(&store.ctx, &conversation.id, "Kick it off at 30 hours")
        .await
        .unwrap();
    // updates create nothing
    assert!(second.created_entities.is_empty());

    let project = store
        .db
        .get_project(&project_id, &store.ctx.org_id)
        .unwrap()
        .unwrap();
    assert_eq!(project.status, "active");
    assert_eq!(project.estimated_hours, Some(30.0));
    assert_eq!(project.name, "Audit");

    // turn 2 saw the persisted turn-1 transcript in its history
    let history = &provider_turn_two.requests()[0].messages;
    assert_eq!(history.len(), 3);
}

#[tokio::test]
async fn talent_onboarding_flow_links_known_skills() {
    let store = setup();
    store.db.insert_skill("UX Design", Some("design")).unwrap();
    store.db.insert_skill("User Research", Some("design")).unwrap();

    let provider = ScriptedProvider::new(vec![
        tool_response(
            None,
            vec![tool_call(
                "tu_1",
                "create_person",
                json!({
                    "name": "Sarah Chen",
                    "type": "contractor",
                    "hourly_rate": 120,
                    "location": "Seattle",
                    "skills": [
                        {"skill_name": "UX Design", "proficiency_level": 5},
                        {"skill_name": "User Research", "proficiency_level": 4},
                        {"skill_name": "Interpretive Dance", "proficiency_level": 3}
                    ]
                }),
            )],
        ),
        text_response("Sarah Chen is on your bench."),
        tool_response(
            None,
            vec![tool_call(
                "tu_2",
                "mark_complete",
                json!({ "summary": "Added Sarah Chen to the talent network" }),
            )],
        ),
    ]);
    let service = service_with(&store.db, &provider);

    let conversation = service
        .start_conversation(&store.ctx, "person", None)
        .unwrap();
    let first = service
        .post_message(
            &store.ctx,
            &conversation.id,
            "Add Sarah Chen, UX contractor at $120/hr",
        )
        .await
        .unwrap();

    let person_id = &first.created_entities[0].id;
    let links = store.db.list_person_skills(person_id).unwrap();
    // two resolvable skills linked; the unknown one skipped, not created
    assert_eq!(links.len(), 2);
    assert!(store.db.find_skill_by_name("Interpretive Dance").unwrap().is_none());

    let second = service
        .post_message(&store.ctx, &conversation.id, "that's all")
        .await
        .unwrap();
    assert!(second.completed);
    assert_eq!(
        service
            .get_conversation(&store.ctx, &conversation.id)
            .unwrap()
            .status,
        ConversationStatus::Closed
    );
}

#[tokio::test]
async fn retrospective_flow_against_own_project() {
    let store = setup();
    // the project came from an earlier conversation
    let project = store
        .db
        .insert_project(
            &store.ctx.org_id,
            &guildhall_tools::ProjectInput::parse(&json!({ "name": "Acme Website" })).unwrap(),
        )
        .unwrap();

    let provider = ScriptedProvider::new(vec![
        tool_response(
            None,
            vec![tool_call(
                "tu_1",
                "create_retrospective",
                json!({
                    "project_id": project.id,
                    "hours_variance_pct": 22,
                    "scope_changes_count": 1,
                    "client_satisfaction": 4,
                    "what_worked": "Design phase was smooth",
                    "lessons": ["Add buffer for CMS work"],
                    "tags": ["scope-change"]
                }),
            )],
        ),
        text_response("Retro captured for the Acme Website."),
    ]);
    let service = service_with(&store.db, &provider);

    let conversation = service
        .start_conversation(&store.ctx, "retrospective", None)
        .unwrap();
    let result = service
        .post_message(&store.ctx, &conversation.id, "Retro on the Acme website project")
        .await
        .unwrap();

    assert_eq!(result.created_entities.len(), 1);
    assert_eq!(result.created_entities[0].entity_type, "retrospective");
    assert_eq!(result.created_entities[0].name, "Acme Website Retro");

    let retros = store.db.list_retrospectives(&project.id).unwrap();
    assert_eq!(retros.len(), 1);
    assert_eq!(retros[0].hours_variance_pct, Some(22.0));
    assert_eq!(retros[0].lessons.as_ref().unwrap()[0], "Add buffer for CMS work");
    assert!(retros[0].completed_at.is_some());
}

#[tokio::test]
async fn summarize_learnings_appends_after_a_mutation() {
    let store = setup();
    let project = store
        .db
        .insert_project(
            &store.ctx.org_id,
            &guildhall_tools::ProjectInput::parse(&json!({ "name": "Site" })).unwrap(),
        )
        .unwrap();

    // one turn: create a retro, then summarize; the informational text must
    // append after the confirmation text from the mutation
    let provider = ScriptedProvider::new(vec![
        tool_response(
            None,
            vec![
                tool_call(
                    "tu_1",
                    "create_retrospective",
                    json!({ "project_id": project.id }),
                ),
                tool_call(
                    "tu_2",
                    "summarize_learnings",
                    json!({
                        "summary": {
                            "avg_hours_variance": 15,
                            "top_lessons": ["Scope integrations explicitly"]
                        }
                    }),
                ),
            ],
        ),
        text_response("Saved the retro."),
    ]);
    let service = service_with(&store.db, &provider);

    let conversation = service
        .start_conversation(&store.ctx, "retrospective", None)
        .unwrap();
    let result = service
        .post_message(&store.ctx, &conversation.id, "Capture it and what we've learned")
        .await
        .unwrap();

    assert!(result.assistant_message.content.starts_with("Saved the retro.\n\n"));
    assert!(result
        .assistant_message
        .content
        .contains("**Summary of Learnings:**"));
    assert!(result.assistant_message.content.contains("+15%"));
}
