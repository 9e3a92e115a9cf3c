use crate::invoker::{ResponseStatus, ToolInvoker};
use crate::orchestration::extractor::{ExtractionResult, ParameterExtractor, ToolParameterExtractor};
use crate::orchestration::response::FinalResponse;
use crate::orchestration::selector::select_tool;
use crate::orchestration::state::{DirectToolRequest, OrchestratorRequest, WorkflowState};
use crate::orchestration::validator::{errors_for, validate_candidates};
use crate::provider::{ExtractionRequest, UnconfiguredBackend};
use crate::schema::SchemaRegistry;
use crate::shared::{call_with_deadline, DeadlineError};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Runs Extract, Validate, Select, Invoke and Format over one request.
///
/// Each stage consumes the state and hands a new one to the next; nothing a
/// stage does can fail the request except an invalid input or a panic.
#[derive(Clone)]
pub struct WorkflowCoordinator {
    extractor: ParameterExtractor,
    direct: ToolParameterExtractor,
    schemas: Arc<dyn SchemaRegistry>,
    invoker: Arc<dyn ToolInvoker>,
    tool_timeout: Option<Duration>,
}

impl WorkflowCoordinator {
    pub fn new(
        extractor: ParameterExtractor,
        schemas: Arc<dyn SchemaRegistry>,
        invoker: Arc<dyn ToolInvoker>,
    ) -> Self {
        let direct = ToolParameterExtractor::new(Arc::new(UnconfiguredBackend), Arc::clone(&schemas));
        Self {
            extractor,
            direct,
            schemas,
            invoker,
            tool_timeout: None,
        }
    }

    pub fn with_direct_extractor(mut self, direct: ToolParameterExtractor) -> Self {
        self.direct = direct;
        self
    }

    pub fn with_tool_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout = Some(timeout);
        self
    }

    pub fn fallback_tool(&self) -> &str {
        self.extractor.fallback_tool()
    }

    pub fn run(&self, request: OrchestratorRequest) -> FinalResponse {
        if let Err(err) = request.validate() {
            tracing::warn!(error = %err, "rejected orchestrator request");
            return FinalResponse::workflow_error(&err);
        }

        let started = Instant::now();
        let preview: String = request.current_message.chars().take(100).collect();
        tracing::info!(message = %preview, "starting workflow");

        self.guarded(started, || {
            let state = self.extract(WorkflowState::new(request));
            self.finish(state)
        })
    }

    /// Route for requests that name their tool; extraction is schema guided
    /// and the candidate list is just that tool.
    pub fn run_direct(&self, request: DirectToolRequest) -> FinalResponse {
        if let Err(err) = request.validate() {
            tracing::warn!(error = %err, "rejected direct tool request");
            return FinalResponse::workflow_error(&err);
        }

        let started = Instant::now();
        tracing::info!(tool = %request.tool, "starting direct tool workflow");

        self.guarded(started, || {
            let DirectToolRequest {
                tool,
                user_input,
                options,
                user_info,
            } = request;

            let extracted = self.direct.extract(&tool, &user_input, &options);
            let mut state = WorkflowState::new(
                OrchestratorRequest::new(user_input).with_user_info(user_info),
            );
            state.tool_candidates = vec![tool];
            match extracted {
                Ok(params) => {
                    state.extracted_parameters = params;
                    state.extraction_confidence = 1.0;
                }
                Err(err) => {
                    tracing::warn!(error = %err, "direct extraction failed");
                    state.extraction_error = Some(err.to_string());
                }
            }
            self.finish(state)
        })
    }

    fn guarded<F>(&self, started: Instant, run: F) -> FinalResponse
    where
        F: FnOnce() -> FinalResponse,
    {
        let response = match panic::catch_unwind(AssertUnwindSafe(run)) {
            Ok(response) => response,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::error!(error = %message, "workflow panicked");
                FinalResponse::panicked(&message)
            }
        };
        tracing::info!(
            stage = response.stage(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "workflow completed"
        );
        response
    }

    fn finish(&self, state: WorkflowState) -> FinalResponse {
        let state = validate_candidates(state, self.schemas.as_ref());
        let state = select_tool(state, self.extractor.fallback_tool());
        let state = self.invoke(state);
        FinalResponse::from_state(&state)
    }

    fn extract(&self, mut state: WorkflowState) -> WorkflowState {
        let request = ExtractionRequest {
            message: state.current_message().to_string(),
            history: state.input().chat_history.clone(),
            user_info: state.user_info().clone(),
            options: Default::default(),
            timeout: None,
        };

        let result = match self.extractor.extract(&request) {
            Ok(result) => result,
            Err(failure) => {
                tracing::error!(error = %failure, "parameter extraction failed");
                ExtractionResult::fallback(&failure, self.extractor.fallback_tool())
            }
        };
        tracing::info!(candidates = ?result.tool_candidates, "extracted parameters");

        state.tool_candidates = result.tool_candidates;
        state.extracted_parameters = result.parameters;
        state.missing_required = result.missing_required.into_iter().collect();
        state.clarifying_question = result.clarifying_question;
        state.ambiguous_tools = result.ambiguous_tools;
        state.extraction_confidence = result.confidence;
        state.extraction_error = result.error;
        state
    }

    fn invoke(&self, mut state: WorkflowState) -> WorkflowState {
        let Some(tool) = state.selected_tool().map(str::to_string) else {
            state.tool_error = Some("No tool selected".to_string());
            return state;
        };

        if !state.validation_success {
            let summary = errors_for(&state, &tool)
                .map(|errors| errors.summary())
                .unwrap_or_else(|| "no validated parameters".to_string());
            state.tool_success = false;
            state.tool_error = Some(format!(
                "Parameter validation failed for {tool}: {summary}"
            ));
            return state;
        }

        let payload = state.validated_parameters.clone().unwrap_or_default();
        let invoker = Arc::clone(&self.invoker);
        let timeout = self.tool_timeout;
        let target = tool.clone();
        let outcome = call_with_deadline(timeout, move || invoker.invoke(&target, &payload, timeout));

        match outcome {
            Ok(response) => {
                state.tool_success = response.status == ResponseStatus::Ok;
                if !state.tool_success {
                    state.tool_error = Some(
                        response
                            .error
                            .clone()
                            .unwrap_or_else(|| "Tool call failed".to_string()),
                    );
                }
                state.tool_data = response.data.clone();
                state.tool_meta = serde_json::to_value(&response.meta).ok();
                state.tool_response = serde_json::to_value(&response).ok();
                tracing::info!(tool = %tool, status = %response.status, "tool call completed");
            }
            Err(DeadlineError::TimedOut { timeout_ms }) => {
                tracing::warn!(tool = %tool, timeout_ms, "tool call timed out");
                state.tool_success = false;
                state.tool_error = Some(format!("Tool call timed out after {timeout_ms}ms"));
            }
            Err(err) => {
                tracing::error!(tool = %tool, error = %err, "tool call failed");
                state.tool_success = false;
                state.tool_error = Some(err.to_string());
            }
        }
        state
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
