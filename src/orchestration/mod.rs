pub mod error;
pub mod extractor;
pub mod intent;
pub mod response;
pub mod selector;
pub mod state;
pub mod validator;
pub mod workflow;

pub use error::{ExtractionFailure, OrchestratorError};
pub use extractor::{ExtractionResult, ParameterExtractor, ToolParameterExtractor};
pub use intent::IntentMatcher;
pub use response::{FinalResponse, ResponseMeta};
pub use state::{
    ChatMessage, DirectToolRequest, OrchestratorRequest, ValidationOutcome, ValidationResults,
    WorkflowState,
};
pub use workflow::WorkflowCoordinator;
