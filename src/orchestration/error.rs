use crate::provider::ProviderError;
use crate::shared::DeadlineError;

/// Why an extraction backend produced nothing usable.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExtractionFailure {
    #[error("extraction backend failed: {0}")]
    Backend(String),
    #[error("extraction result malformed: {0}")]
    Malformed(String),
    #[error("extraction timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

impl From<ProviderError> for ExtractionFailure {
    fn from(value: ProviderError) -> Self {
        match value {
            ProviderError::Timeout { timeout_ms, .. } => Self::Timeout { timeout_ms },
            ProviderError::ParseFailure { reason } => Self::Malformed(reason),
            other => Self::Backend(other.to_string()),
        }
    }
}

impl From<DeadlineError> for ExtractionFailure {
    fn from(value: DeadlineError) -> Self {
        match value {
            DeadlineError::TimedOut { timeout_ms } => Self::Timeout { timeout_ms },
            other => Self::Backend(other.to_string()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("unknown tool `{tool}`")]
    UnknownTool { tool: String },
    #[error(transparent)]
    Extraction(#[from] ExtractionFailure),
}

impl OrchestratorError {
    /// Variant name surfaced as `meta.error_type`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "InvalidRequest",
            Self::UnknownTool { .. } => "UnknownTool",
            Self::Extraction(_) => "Extraction",
        }
    }
}
