//! Tool Execution
//!
//! Validates one tool call against its contract and applies its store
//! effect, scoped to the conversation's organization. Validation failures
//! and ownership failures abort before any mutation; primary insert/update
//! failures propagate; secondary writes (phases after a project, skill
//! links after a person) are best-effort and only logged.

use guildhall_llm::types::ToolCall;
use guildhall_tools::{
    AskClarifyingQuestionInput, ClientInput, FindPeopleBySkillsInput, MarkCompleteInput,
    PersonInput, ProjectInput, RetrospectiveInput, SuggestPhasesInput, SuggestSkillsInput,
    SummarizeLearningsInput, ToolKind, UpdatePersonInput, UpdateProjectInput,
    UpdateRetrospectiveInput,
};

use crate::models::{CreatedEntity, PersonSkill};
use crate::services::conversation::formatters;
use crate::storage::Database;
use crate::utils::error::{AppError, AppResult};

/// Outcome of executing a single tool call.
#[derive(Debug)]
pub(crate) enum ToolOutcome {
    /// A store mutation succeeded; `payload` is the machine-readable success
    /// body echoed back to the model for its confirmation text.
    Mutation {
        payload: serde_json::Value,
        created: Option<CreatedEntity>,
    },
    /// Informational tool: formatted text to append to the reply.
    Informational { text: String },
    /// The model asked the user a clarifying question.
    Clarification { question: String },
    /// The model declared the task complete.
    Completion { summary: String },
}

/// Validate and execute one tool call.
pub(crate) fn execute_tool_call(
    db: &Database,
    organization_id: &str,
    kind: ToolKind,
    call: &ToolCall,
) -> AppResult<ToolOutcome> {
    match kind {
        ToolKind::CreateClient => {
            let input = ClientInput::parse(&call.arguments)?;
            let client = db.insert_client(organization_id, &input)?;
            tracing::info!(client_id = %client.id, "Client created");

            Ok(ToolOutcome::Mutation {
                payload: serde_json::json!({
                    "success": true,
                    "client_id": client.id,
                    "message": format!("Client \"{}\" created successfully", client.name),
                }),
                created: Some(CreatedEntity::new("client", &client.id, &client.name)),
            })
        }

        ToolKind::CreateProject => {
            let input = ProjectInput::parse(&call.arguments)?;
            let project = db.insert_project(organization_id, &input)?;
            tracing::info!(project_id = %project.id, "Project created");

            // Phases are secondary: the project row is already committed, so
            // a phase failure is logged, not propagated.
            let phase_count = input.phases.as_ref().map(|p| p.len()).unwrap_or(0);
            if let Some(phases) = &input.phases {
                if !phases.is_empty() {
                    if let Err(e) = db.insert_phases(&project.id, phases) {
                        tracing::warn!(project_id = %project.id, error = %e, "Failed to create phases");
                    }
                }
            }

            Ok(ToolOutcome::Mutation {
                payload: serde_json::json!({
                    "success": true,
                    "project_id": project.id,
                    "message": format!(
                        "Project \"{}\" created successfully with {} phases",
                        project.name, phase_count
                    ),
                }),
                created: Some(CreatedEntity::new("project", &project.id, &project.name)),
            })
        }

        ToolKind::UpdateProject => {
            let input = UpdateProjectInput::parse(&call.arguments)?;
            let project = db.update_project(organization_id, &input)?.ok_or_else(|| {
                AppError::not_found("Project not found or doesn't belong to this organization")
            })?;
            tracing::info!(project_id = %project.id, "Project updated");

            Ok(ToolOutcome::Mutation {
                payload: serde_json::json!({
                    "success": true,
                    "project_id": project.id,
                    "message": format!("Project \"{}\" updated successfully", project.name),
                }),
                created: None,
            })
        }

        ToolKind::SuggestPhases => {
            let input = SuggestPhasesInput::parse(&call.arguments)?;
            Ok(ToolOutcome::Informational {
                text: formatters::format_suggested_phases(&input),
            })
        }

        ToolKind::CreatePerson => {
            let input = PersonInput::parse(&call.arguments)?;
            let person = db.insert_person(organization_id, &input)?;
            tracing::info!(person_id = %person.id, "Person created");

            // Skill links are secondary and resolved by name against the
            // global taxonomy; unresolved names are silently skipped, never
            // created on the fly.
            for link in input.skills.iter().flatten() {
                match db.find_skill_by_name(&link.skill_name) {
                    Ok(Some(skill)) => {
                        let result = db.insert_person_skill(&PersonSkill {
                            person_id: person.id.clone(),
                            skill_id: skill.id,
                            proficiency_level: link.proficiency_level,
                            years_experience: link.years_experience,
                        });
                        if let Err(e) = result {
                            tracing::warn!(
                                person_id = %person.id,
                                skill = %link.skill_name,
                                error = %e,
                                "Failed to link skill"
                            );
                        }
                    }
                    Ok(None) => {
                        tracing::debug!(skill = %link.skill_name, "Skill not in taxonomy, skipped");
                    }
                    Err(e) => {
                        tracing::warn!(skill = %link.skill_name, error = %e, "Skill lookup failed");
                    }
                }
            }

            Ok(ToolOutcome::Mutation {
                payload: serde_json::json!({
                    "success": true,
                    "person_id": person.id,
                    "message": format!("{} added to your talent network", person.name),
                }),
                created: Some(CreatedEntity::new("person", &person.id, &person.name)),
            })
        }

        ToolKind::UpdatePerson => {
            let input = UpdatePersonInput::parse(&call.arguments)?;
            let person = db.update_person(organization_id, &input)?.ok_or_else(|| {
                AppError::not_found("Person not found or doesn't belong to this organization")
            })?;
            tracing::info!(person_id = %person.id, "Person updated");

            Ok(ToolOutcome::Mutation {
                payload: serde_json::json!({
                    "success": true,
                    "person_id": person.id,
                    "message": format!("{}'s profile updated successfully", person.name),
                }),
                created: None,
            })
        }

        ToolKind::SuggestSkills => {
            let input = SuggestSkillsInput::parse(&call.arguments)?;
            Ok(ToolOutcome::Informational {
                text: formatters::format_suggested_skills(&input),
            })
        }

        ToolKind::FindPeopleBySkills => {
            let input = FindPeopleBySkillsInput::parse(&call.arguments)?;
            Ok(ToolOutcome::Informational {
                text: formatters::format_people_search(&input),
            })
        }

        ToolKind::CreateRetrospective => {
            let input = RetrospectiveInput::parse(&call.arguments)?;

            // Ownership check before any mutation: the referenced project
            // must belong to the caller's organization.
            let project = db
                .get_project(&input.project_id, organization_id)?
                .ok_or_else(|| {
                    AppError::not_found(
                        "Project not found or doesn't belong to this organization",
                    )
                })?;

            let retrospective = db.insert_retrospective(&project.id, &input)?;
            tracing::info!(retrospective_id = %retrospective.id, "Retrospective created");

            let name = format!("{} Retro", project.name);
            Ok(ToolOutcome::Mutation {
                payload: serde_json::json!({
                    "success": true,
                    "retrospective_id": retrospective.id,
                    "message": format!(
                        "Retrospective for \"{}\" saved successfully",
                        project.name
                    ),
                }),
                created: Some(CreatedEntity::new(
                    "retrospective",
                    &retrospective.id,
                    &name,
                )),
            })
        }

        ToolKind::UpdateRetrospective => {
            let input = UpdateRetrospectiveInput::parse(&call.arguments)?;

            // Re-verify ownership through the parent project before writing.
            let existing = db
                .get_retrospective(&input.retrospective_id)?
                .ok_or_else(|| AppError::not_found("Retrospective not found"))?;
            db.get_project(&existing.project_id, organization_id)?
                .ok_or_else(|| {
                    AppError::not_found(
                        "Retrospective not found or doesn't belong to this organization",
                    )
                })?;

            let retrospective = db
                .update_retrospective(&input)?
                .ok_or_else(|| AppError::not_found("Retrospective not found"))?;
            tracing::info!(retrospective_id = %retrospective.id, "Retrospective updated");

            Ok(ToolOutcome::Mutation {
                payload: serde_json::json!({
                    "success": true,
                    "retrospective_id": retrospective.id,
                    "message": "Retrospective updated successfully",
                }),
                created: None,
            })
        }

        ToolKind::SummarizeLearnings => {
            let input = SummarizeLearningsInput::parse(&call.arguments)?;
            Ok(ToolOutcome::Informational {
                text: formatters::format_learnings_summary(&input),
            })
        }

        ToolKind::AskClarifyingQuestion => {
            let input = AskClarifyingQuestionInput::parse(&call.arguments)?;
            Ok(ToolOutcome::Clarification {
                question: input.question,
            })
        }

        ToolKind::MarkComplete => {
            let input = MarkCompleteInput::parse(&call.arguments)?;
            Ok(ToolOutcome::Completion {
                summary: input.summary,
            })
        }
    }
}
