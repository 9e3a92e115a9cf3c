use crate::invoker::ResponseStatus;
use crate::orchestration::error::OrchestratorError;
use crate::orchestration::state::{ValidationResults, WorkflowState};
use serde::Serialize;
use serde_json::Value;

pub const MISSING_INFO_QUESTION: &str = "I need more information to help you.";
pub const AMBIGUOUS_TOOL_QUESTION: &str = "Which tool would you prefer?";
pub const GENERIC_ERROR: &str = "An error occurred";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorDetails {
    pub tool_error: Option<String>,
    pub extraction_error: Option<String>,
    pub validation_results: ValidationResults,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum ResponseMeta {
    ParameterValidation {
        missing_required: Vec<String>,
        extraction_confidence: f64,
    },
    ToolSelection {
        candidates: Vec<String>,
    },
    Completed {
        tool: String,
        duration_s: f64,
        endpoint: Option<String>,
    },
    Error {
        selected_tool: Option<String>,
        error_details: ErrorDetails,
    },
    WorkflowError {
        error_type: String,
    },
}

impl ResponseMeta {
    pub fn stage(&self) -> &'static str {
        match self {
            Self::ParameterValidation { .. } => "parameter_validation",
            Self::ToolSelection { .. } => "tool_selection",
            Self::Completed { .. } => "completed",
            Self::Error { .. } => "error",
            Self::WorkflowError { .. } => "workflow_error",
        }
    }
}

/// What the caller gets back: a clarification, a result, or an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalResponse {
    pub status: ResponseStatus,
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clarifying_question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ambiguous_tools: Option<Vec<String>>,
    pub meta: ResponseMeta,
}

impl FinalResponse {
    /// Derives the response from a finished state; the first matching case
    /// wins: missing fields, ambiguity, success, error.
    pub fn from_state(state: &WorkflowState) -> Self {
        if !state.missing_required.is_empty() && !state.tool_success {
            return Self::clarification(
                state
                    .clarifying_question
                    .clone()
                    .unwrap_or_else(|| MISSING_INFO_QUESTION.to_string()),
                state.ambiguous_tools.clone(),
                ResponseMeta::ParameterValidation {
                    missing_required: state.missing_required.iter().cloned().collect(),
                    extraction_confidence: state.extraction_confidence,
                },
            );
        }

        if state.ambiguous_tools.len() > 1 {
            return Self::clarification(
                state
                    .clarifying_question
                    .clone()
                    .unwrap_or_else(|| AMBIGUOUS_TOOL_QUESTION.to_string()),
                state.ambiguous_tools.clone(),
                ResponseMeta::ToolSelection {
                    candidates: state.ambiguous_tools.clone(),
                },
            );
        }

        if state.tool_success {
            let meta = state.tool_meta.as_ref();
            return Self {
                status: ResponseStatus::Ok,
                data: state.tool_data.clone(),
                error: None,
                clarifying_question: None,
                ambiguous_tools: None,
                meta: ResponseMeta::Completed {
                    tool: state.selected_tool().unwrap_or_default().to_string(),
                    duration_s: meta
                        .and_then(|meta| meta.get("duration_s"))
                        .and_then(Value::as_f64)
                        .unwrap_or(0.0),
                    endpoint: meta
                        .and_then(|meta| meta.get("endpoint"))
                        .and_then(Value::as_str)
                        .map(str::to_string),
                },
            };
        }

        let error = state
            .tool_error
            .clone()
            .or_else(|| state.extraction_error.clone())
            .unwrap_or_else(|| GENERIC_ERROR.to_string());
        Self {
            status: ResponseStatus::Error,
            data: None,
            error: Some(error),
            clarifying_question: None,
            ambiguous_tools: None,
            meta: ResponseMeta::Error {
                selected_tool: state.selected_tool().map(str::to_string),
                error_details: ErrorDetails {
                    tool_error: state.tool_error.clone(),
                    extraction_error: state.extraction_error.clone(),
                    validation_results: state.validation_results.clone(),
                },
            },
        }
    }

    pub fn workflow_error(err: &OrchestratorError) -> Self {
        Self::failed(err.kind(), &err.to_string())
    }

    pub fn panicked(message: &str) -> Self {
        Self::failed("panic", message)
    }

    fn failed(error_type: &str, message: &str) -> Self {
        Self {
            status: ResponseStatus::Error,
            data: None,
            error: Some(format!("Workflow execution failed: {message}")),
            clarifying_question: None,
            ambiguous_tools: None,
            meta: ResponseMeta::WorkflowError {
                error_type: error_type.to_string(),
            },
        }
    }

    fn clarification(question: String, ambiguous_tools: Vec<String>, meta: ResponseMeta) -> Self {
        Self {
            status: ResponseStatus::Ok,
            data: None,
            error: None,
            clarifying_question: Some(question),
            ambiguous_tools: Some(ambiguous_tools),
            meta,
        }
    }

    pub fn stage(&self) -> &'static str {
        self.meta.stage()
    }

    pub fn is_ok(&self) -> bool {
        self.status == ResponseStatus::Ok
    }
}
