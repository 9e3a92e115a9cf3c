//! Extraction backends: whatever turns a free-text message into structured
//! parameters. The router only depends on the two traits below.

use crate::orchestration::state::ChatMessage;
use crate::schema::SchemaDescriptor;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;
use std::time::Duration;

pub mod command;
pub mod heuristic;
pub mod output_parse;
pub mod runner;

pub use command::CommandBackend;
pub use heuristic::HeuristicBackend;
pub use output_parse::parse_json_object;
pub use runner::{run_command, CommandOutput, CommandSpec};

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("extraction backend binary missing: {binary}")]
    MissingBinary { binary: String },
    #[error("extraction backend `{binary}` failed with exit code {exit_code}: {stderr}")]
    NonZeroExit {
        binary: String,
        exit_code: i32,
        stderr: String,
    },
    #[error("extraction backend `{binary}` timed out after {timeout_ms}ms")]
    Timeout { binary: String, timeout_ms: u64 },
    #[error("extraction backend output parse failure: {reason}")]
    ParseFailure { reason: String },
    #[error("io error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}")]
    Unsupported(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractionRequest {
    pub message: String,
    pub history: Vec<ChatMessage>,
    pub user_info: Map<String, Value>,
    pub options: Map<String, Value>,
    #[serde(skip)]
    pub timeout: Option<Duration>,
}

impl ExtractionRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }
}

/// Conversational extraction: message and history in, raw extraction map out.
///
/// The returned value is expected to be a JSON object with any of
/// `tool_candidates`, `parameters`, `missing_required`, `clarifying_question`,
/// `ambiguous_tools` and `confidence`. Anything else is treated as a failure
/// by the caller.
pub trait ExtractionBackend: Send + Sync {
    fn name(&self) -> &str;

    fn extract(&self, request: &ExtractionRequest) -> Result<Value, ProviderError>;
}

/// Schema-guided extraction for a tool the caller already picked.
pub trait StructuredBackend: Send + Sync {
    fn generate_structured(
        &self,
        tool: &str,
        schema: &SchemaDescriptor,
        user_input: &str,
        options: &Map<String, Value>,
    ) -> Result<Value, ProviderError>;
}

/// Structured backend used when nothing is configured; always defers to the
/// heuristic defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredBackend;

impl StructuredBackend for UnconfiguredBackend {
    fn generate_structured(
        &self,
        tool: &str,
        _schema: &SchemaDescriptor,
        _user_input: &str,
        _options: &Map<String, Value>,
    ) -> Result<Value, ProviderError> {
        Err(ProviderError::Unsupported(format!(
            "no structured extraction backend configured for `{tool}`"
        )))
    }
}

pub(crate) fn io_error(path: &Path, source: std::io::Error) -> ProviderError {
    ProviderError::Io {
        path: path.display().to_string(),
        source,
    }
}
