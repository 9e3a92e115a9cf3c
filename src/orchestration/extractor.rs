use crate::orchestration::error::{ExtractionFailure, OrchestratorError};
use crate::orchestration::intent::DEFAULT_MAX_CANDIDATES;
use crate::provider::output_parse::json_kind;
use crate::provider::{ExtractionBackend, ExtractionRequest, StructuredBackend};
use crate::schema::{SchemaDescriptor, SchemaRegistry};
use crate::shared::{call_with_deadline, ToolKey};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_FALLBACK_TOOL: &str = "ConceptExplainer";
pub const DEFAULT_CONFIDENCE: f64 = 0.5;
pub const FALLBACK_QUESTION: &str =
    "I need more information. What topic would you like help with?";

const MOCK_PARAMS_KEYS: &[&str] = &["mock_params", "__mock_params__"];

/// Normalized output of one extraction pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionResult {
    pub tool_candidates: Vec<String>,
    pub parameters: Map<String, Value>,
    pub missing_required: Vec<String>,
    pub clarifying_question: Option<String>,
    pub ambiguous_tools: Vec<String>,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractionResult {
    /// Normalizes a raw backend map: defaults for absent keys, clamped
    /// confidence, deduplicated and capped candidates, never empty.
    pub fn from_backend_value(
        value: Value,
        max_candidates: usize,
        fallback_tool: &str,
    ) -> Result<Self, ExtractionFailure> {
        let Value::Object(mut map) = value else {
            return Err(ExtractionFailure::Malformed(format!(
                "expected a json object, got {}",
                json_kind(&value)
            )));
        };

        let raw_candidates = string_list(&mut map, "tool_candidates")?;
        let parameters = match map.remove("parameters") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(parameters)) => parameters,
            Some(other) => {
                return Err(ExtractionFailure::Malformed(format!(
                    "`parameters` must be an object, got {}",
                    json_kind(&other)
                )))
            }
        };
        let missing_required = string_list(&mut map, "missing_required")?;
        let ambiguous_tools = string_list(&mut map, "ambiguous_tools")?;
        let clarifying_question = match map.remove("clarifying_question") {
            Some(Value::String(question)) if !question.trim().is_empty() => Some(question),
            _ => None,
        };
        let confidence = match map.remove("confidence") {
            None | Some(Value::Null) => DEFAULT_CONFIDENCE,
            Some(Value::Number(number)) => number.as_f64().unwrap_or(DEFAULT_CONFIDENCE),
            Some(other) => {
                return Err(ExtractionFailure::Malformed(format!(
                    "`confidence` must be a number, got {}",
                    json_kind(&other)
                )))
            }
        };

        let mut tool_candidates = dedup_tools(raw_candidates);
        tool_candidates.truncate(max_candidates.max(1));
        if tool_candidates.is_empty() {
            tool_candidates.push(fallback_tool.to_string());
        }

        Ok(Self {
            tool_candidates,
            parameters,
            missing_required,
            clarifying_question,
            ambiguous_tools,
            confidence: clamp_confidence(confidence),
            error: None,
        })
    }

    /// Result substituted when the backend produced nothing usable.
    pub fn fallback(failure: &ExtractionFailure, fallback_tool: &str) -> Self {
        Self {
            tool_candidates: vec![fallback_tool.to_string()],
            parameters: Map::new(),
            missing_required: vec!["topic".to_string()],
            clarifying_question: Some(FALLBACK_QUESTION.to_string()),
            ambiguous_tools: Vec::new(),
            confidence: 0.0,
            error: Some(failure.to_string()),
        }
    }
}

fn string_list(map: &mut Map<String, Value>, key: &str) -> Result<Vec<String>, ExtractionFailure> {
    match map.remove(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
                _ => None,
            })
            .collect()),
        Some(other) => Err(ExtractionFailure::Malformed(format!(
            "`{key}` must be a list, got {}",
            json_kind(&other)
        ))),
    }
}

fn dedup_tools(tools: Vec<String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    tools
        .into_iter()
        .filter(|tool| seen.insert(ToolKey::normalize(tool)))
        .collect()
}

fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        return DEFAULT_CONFIDENCE;
    }
    value.clamp(0.0, 1.0)
}

/// Conversational extractor: runs the backend under a deadline and
/// normalizes what comes back.
#[derive(Clone)]
pub struct ParameterExtractor {
    backend: Arc<dyn ExtractionBackend>,
    max_candidates: usize,
    fallback_tool: String,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for ParameterExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParameterExtractor")
            .field("backend", &self.backend.name())
            .field("max_candidates", &self.max_candidates)
            .field("fallback_tool", &self.fallback_tool)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ParameterExtractor {
    pub fn new(backend: Arc<dyn ExtractionBackend>) -> Self {
        Self {
            backend,
            max_candidates: DEFAULT_MAX_CANDIDATES,
            fallback_tool: DEFAULT_FALLBACK_TOOL.to_string(),
            timeout: None,
        }
    }

    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates.max(1);
        self
    }

    pub fn with_fallback_tool(mut self, tool: impl Into<String>) -> Self {
        self.fallback_tool = tool.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn fallback_tool(&self) -> &str {
        &self.fallback_tool
    }

    pub fn extract(&self, request: &ExtractionRequest) -> Result<ExtractionResult, ExtractionFailure> {
        let timeout = request.timeout.or(self.timeout);
        let backend = Arc::clone(&self.backend);
        let owned = request.clone();
        let raw = call_with_deadline(timeout, move || backend.extract(&owned))??;
        ExtractionResult::from_backend_value(raw, self.max_candidates, &self.fallback_tool)
    }
}

/// Extraction for requests that already name their tool.
#[derive(Clone)]
pub struct ToolParameterExtractor {
    backend: Arc<dyn StructuredBackend>,
    schemas: Arc<dyn SchemaRegistry>,
}

impl ToolParameterExtractor {
    pub fn new(backend: Arc<dyn StructuredBackend>, schemas: Arc<dyn SchemaRegistry>) -> Self {
        Self { backend, schemas }
    }

    pub fn extract(
        &self,
        tool: &str,
        user_input: &str,
        options: &Map<String, Value>,
    ) -> Result<Map<String, Value>, OrchestratorError> {
        let schema = self
            .schemas
            .input_schema(tool)
            .ok_or_else(|| OrchestratorError::UnknownTool {
                tool: tool.to_string(),
            })?;

        if let Some(params) = MOCK_PARAMS_KEYS
            .iter()
            .find_map(|key| options.get(*key).and_then(Value::as_object))
        {
            return Ok(params.clone());
        }

        let failure = match self
            .backend
            .generate_structured(tool, &schema, user_input, options)
        {
            Ok(Value::Object(params)) => return Ok(params),
            Ok(other) => ExtractionFailure::Malformed(format!(
                "structured backend returned {} instead of an object",
                json_kind(&other)
            )),
            Err(err) => ExtractionFailure::from(err),
        };

        tracing::debug!(tool, error = %failure, "structured extraction failed; trying heuristic defaults");
        heuristic_defaults(&schema, user_input, options).ok_or(OrchestratorError::Extraction(failure))
    }
}

const HEURISTIC_FIELDS: &[(&str, &[&str])] = &[
    ("notemaker", &["format", "detail_level"]),
    ("flashcardgenerator", &["count", "difficulty"]),
    ("conceptexplainer", &["level", "include_practice"]),
];

/// `topic` from the raw input; every other known field from `options`, else
/// the schema default.
fn heuristic_defaults(
    schema: &SchemaDescriptor,
    user_input: &str,
    options: &Map<String, Value>,
) -> Option<Map<String, Value>> {
    let key = ToolKey::normalize(&schema.tool);
    let (_, fields) = HEURISTIC_FIELDS
        .iter()
        .find(|(tool, _)| key.as_str() == *tool)?;

    let mut params = Map::new();
    params.insert("topic".to_string(), Value::String(user_input.trim().to_string()));
    for field in *fields {
        let value = options
            .get(*field)
            .cloned()
            .or_else(|| schema.field(field).and_then(|f| f.default.clone()));
        if let Some(value) = value {
            params.insert((*field).to_string(), value);
        }
    }
    Some(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn backend_map_defaults_and_candidate_dedup() {
        let result = ExtractionResult::from_backend_value(
            json!({
                "tool_candidates": ["NoteMaker", "note_maker", 7, "MCQGenerator", "DrillGenerator", "AnalogyMaker"],
                "confidence": 3.2
            }),
            3,
            DEFAULT_FALLBACK_TOOL,
        )
        .expect("normalize");
        assert_eq!(
            result.tool_candidates,
            vec!["NoteMaker", "MCQGenerator", "DrillGenerator"]
        );
        assert_eq!(result.confidence, 1.0);
        assert!(result.parameters.is_empty());
        assert!(result.clarifying_question.is_none());
    }

    #[test]
    fn empty_candidates_get_the_fallback_tool() {
        let result =
            ExtractionResult::from_backend_value(json!({}), 3, "NoteMaker").expect("normalize");
        assert_eq!(result.tool_candidates, vec!["NoteMaker"]);
        assert_eq!(result.confidence, DEFAULT_CONFIDENCE);
    }

    #[test]
    fn non_object_backend_value_is_malformed() {
        let err = ExtractionResult::from_backend_value(json!("nope"), 3, DEFAULT_FALLBACK_TOOL)
            .expect_err("malformed");
        assert!(matches!(err, ExtractionFailure::Malformed(_)));
    }
}
