use crate::orchestration::state::{ValidationOutcome, WorkflowState};
use crate::schema::{SchemaRegistry, ValidationErrors};
use crate::shared::ToolKey;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Validates every candidate in order. The first one that passes becomes the
/// selected tool; the rest are still validated so their errors show up in
/// diagnostics.
pub fn validate_candidates(mut state: WorkflowState, registry: &dyn SchemaRegistry) -> WorkflowState {
    let params = merged_parameters(&state);
    let mut winner: Option<(String, Map<String, Value>)> = None;

    for tool in state.tool_candidates.clone() {
        let outcome = match registry.validate(&tool, &params) {
            Ok(validated) => {
                if winner.is_none() {
                    winner = Some((tool.clone(), validated));
                }
                ValidationOutcome::passed()
            }
            Err(errors) => {
                tracing::debug!(tool = %tool, errors = %errors.summary(), "candidate failed validation");
                ValidationOutcome::failed(errors)
            }
        };
        state.validation_results.insert(tool, outcome);
    }

    match winner {
        Some((tool, validated)) => {
            state.select_tool(tool);
            state.validated_parameters = Some(params);
            state.validated_object = Some(validated);
            state.validation_success = true;
        }
        None => {
            state.validation_success = false;
            state.missing_required = missing_fields(&state);
            if !state.missing_required.is_empty() && state.clarifying_question.is_none() {
                state.clarifying_question = Some(format!(
                    "I need more information about: {}",
                    state
                        .missing_required
                        .iter()
                        .map(String::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                ));
            }
        }
    }

    tracing::info!(
        selected_tool = state.selected_tool().unwrap_or("-"),
        success = state.validation_success,
        "validated tool candidates"
    );
    state
}

/// Extracted parameters with `user_info` merged in when present.
pub fn merged_parameters(state: &WorkflowState) -> Map<String, Value> {
    let mut params = state.extracted_parameters.clone();
    if !state.user_info().is_empty() {
        params.insert(
            "user_info".to_string(),
            Value::Object(state.user_info().clone()),
        );
    }
    params
}

fn missing_fields(state: &WorkflowState) -> BTreeSet<String> {
    state
        .validation_results
        .values()
        .filter_map(|outcome| outcome.errors.as_ref())
        .flat_map(ValidationErrors::required_fields)
        .map(str::to_string)
        .collect()
}

/// Errors recorded for `tool`, compared by normalized name.
pub fn errors_for<'a>(state: &'a WorkflowState, tool: &str) -> Option<&'a ValidationErrors> {
    let key = ToolKey::normalize(tool);
    state
        .validation_results
        .iter()
        .find(|(name, _)| key.matches(name))
        .and_then(|(_, outcome)| outcome.errors.as_ref())
}
