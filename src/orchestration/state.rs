use crate::orchestration::error::OrchestratorError;
use crate::schema::ValidationErrors;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

pub const MAX_MESSAGE_CHARS: usize = 2000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Conversational request: the message plus the context it arrived with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrchestratorRequest {
    #[serde(default)]
    pub user_info: Map<String, Value>,
    #[serde(default)]
    pub chat_history: Vec<ChatMessage>,
    pub current_message: String,
}

impl OrchestratorRequest {
    pub fn new(current_message: impl Into<String>) -> Self {
        Self {
            current_message: current_message.into(),
            ..Self::default()
        }
    }

    pub fn with_user_info(mut self, user_info: Map<String, Value>) -> Self {
        self.user_info = user_info;
        self
    }

    pub fn validate(&self) -> Result<(), OrchestratorError> {
        validate_message(&self.current_message)
    }
}

/// Request naming its tool up front: `{tool, user_input, options}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectToolRequest {
    pub tool: String,
    pub user_input: String,
    #[serde(default)]
    pub options: Map<String, Value>,
    #[serde(default)]
    pub user_info: Map<String, Value>,
}

impl DirectToolRequest {
    pub fn validate(&self) -> Result<(), OrchestratorError> {
        if self.tool.trim().is_empty() {
            return Err(OrchestratorError::InvalidRequest(
                "tool must be non-empty".to_string(),
            ));
        }
        validate_message(&self.user_input)
    }
}

fn validate_message(message: &str) -> Result<(), OrchestratorError> {
    if message.trim().is_empty() {
        return Err(OrchestratorError::InvalidRequest(
            "current message must be non-empty".to_string(),
        ));
    }
    let chars = message.chars().count();
    if chars > MAX_MESSAGE_CHARS {
        return Err(OrchestratorError::InvalidRequest(format!(
            "current message is {chars} characters; limit is {MAX_MESSAGE_CHARS}"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationOutcome {
    pub validated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
}

impl ValidationOutcome {
    pub fn passed() -> Self {
        Self {
            validated: true,
            errors: None,
        }
    }

    pub fn failed(errors: ValidationErrors) -> Self {
        Self {
            validated: false,
            errors: Some(errors),
        }
    }
}

/// Per-candidate validation outcomes in the order the candidates were tried.
///
/// Serializes as a JSON object whose keys keep that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResults(Vec<(String, ValidationOutcome)>);

impl ValidationResults {
    /// Records `outcome` for `tool`; a repeated name keeps its first position.
    pub fn insert(&mut self, tool: impl Into<String>, outcome: ValidationOutcome) {
        let tool = tool.into();
        match self.0.iter_mut().find(|(name, _)| *name == tool) {
            Some((_, existing)) => *existing = outcome,
            None => self.0.push((tool, outcome)),
        }
    }

    pub fn get(&self, tool: &str) -> Option<&ValidationOutcome> {
        self.0
            .iter()
            .find(|(name, _)| name == tool)
            .map(|(_, outcome)| outcome)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValidationOutcome)> {
        self.0.iter().map(|(name, outcome)| (name.as_str(), outcome))
    }

    pub fn values(&self) -> impl Iterator<Item = &ValidationOutcome> {
        self.0.iter().map(|(_, outcome)| outcome)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ValidationResults {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (tool, outcome) in &self.0 {
            map.serialize_entry(tool, outcome)?;
        }
        map.end()
    }
}

/// Everything one request accumulates on its way through the stages.
///
/// The input and the selected tool are private: the input never changes
/// after construction and the selected tool can be set but not cleared.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowState {
    input: OrchestratorRequest,

    pub tool_candidates: Vec<String>,
    pub extracted_parameters: Map<String, Value>,
    pub missing_required: BTreeSet<String>,
    pub clarifying_question: Option<String>,
    pub ambiguous_tools: Vec<String>,
    pub extraction_confidence: f64,
    pub extraction_error: Option<String>,

    pub validation_results: ValidationResults,
    selected_tool: Option<String>,
    /// Merged parameters that passed validation; this is what gets invoked.
    pub validated_parameters: Option<Map<String, Value>>,
    /// Schema-normalized output for the winning candidate.
    pub validated_object: Option<Map<String, Value>>,
    pub validation_success: bool,

    pub tool_response: Option<Value>,
    pub tool_success: bool,
    pub tool_data: Option<Value>,
    pub tool_meta: Option<Value>,
    pub tool_error: Option<String>,
}

impl WorkflowState {
    pub fn new(input: OrchestratorRequest) -> Self {
        Self {
            input,
            tool_candidates: Vec::new(),
            extracted_parameters: Map::new(),
            missing_required: BTreeSet::new(),
            clarifying_question: None,
            ambiguous_tools: Vec::new(),
            extraction_confidence: 0.0,
            extraction_error: None,
            validation_results: ValidationResults::default(),
            selected_tool: None,
            validated_parameters: None,
            validated_object: None,
            validation_success: false,
            tool_response: None,
            tool_success: false,
            tool_data: None,
            tool_meta: None,
            tool_error: None,
        }
    }

    pub fn input(&self) -> &OrchestratorRequest {
        &self.input
    }

    pub fn user_info(&self) -> &Map<String, Value> {
        &self.input.user_info
    }

    pub fn current_message(&self) -> &str {
        &self.input.current_message
    }

    pub fn selected_tool(&self) -> Option<&str> {
        self.selected_tool.as_deref()
    }

    pub fn select_tool(&mut self, tool: impl Into<String>) {
        self.selected_tool = Some(tool.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaErrorCode;

    #[test]
    fn message_limits_are_enforced_on_chars() {
        assert!(OrchestratorRequest::new("   ").validate().is_err());
        assert!(OrchestratorRequest::new("é".repeat(MAX_MESSAGE_CHARS))
            .validate()
            .is_ok());
        assert!(OrchestratorRequest::new("a".repeat(MAX_MESSAGE_CHARS + 1))
            .validate()
            .is_err());
    }

    #[test]
    fn selected_tool_is_replace_only() {
        let mut state = WorkflowState::new(OrchestratorRequest::new("hi"));
        assert_eq!(state.selected_tool(), None);
        state.select_tool("NoteMaker");
        state.select_tool("ConceptExplainer");
        assert_eq!(state.selected_tool(), Some("ConceptExplainer"));
    }

    #[test]
    fn validation_results_serialize_in_insertion_order() {
        let mut results = ValidationResults::default();
        results.insert("SpacedRepetitionScheduler", ValidationOutcome::passed());
        results.insert("NoteMaker", ValidationOutcome::passed());
        results.insert("ConceptExplainer", ValidationOutcome::passed());
        results.insert(
            "NoteMaker",
            ValidationOutcome::failed(ValidationErrors::new(SchemaErrorCode::ValidationError)),
        );

        assert_eq!(results.len(), 3);
        assert!(!results.get("NoteMaker").expect("note maker").validated);
        let names: Vec<&str> = results.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["SpacedRepetitionScheduler", "NoteMaker", "ConceptExplainer"]);

        let text = serde_json::to_string(&results).expect("serialize");
        let spaced = text.find("SpacedRepetitionScheduler").expect("spaced");
        let notes = text.find("NoteMaker").expect("notes");
        let concept = text.find("ConceptExplainer").expect("concept");
        assert!(spaced < notes && notes < concept, "order lost: {text}");
    }
}
