use scholaris::orchestration::extractor::FALLBACK_QUESTION;
use scholaris::orchestration::{
    ExtractionFailure, ExtractionResult, OrchestratorError, ParameterExtractor,
    ToolParameterExtractor,
};
use scholaris::provider::{
    ExtractionBackend, ExtractionRequest, HeuristicBackend, ProviderError, StructuredBackend,
    UnconfiguredBackend,
};
use scholaris::schema::{SchemaDescriptor, StaticSchemaRegistry};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn heuristic() -> HeuristicBackend {
    HeuristicBackend::for_schemas(StaticSchemaRegistry::builtin().tools())
}

struct SleepyBackend;

impl ExtractionBackend for SleepyBackend {
    fn name(&self) -> &str {
        "sleepy"
    }

    fn extract(&self, _request: &ExtractionRequest) -> Result<Value, ProviderError> {
        thread::sleep(Duration::from_millis(500));
        Ok(json!({}))
    }
}

struct PanickyBackend;

impl ExtractionBackend for PanickyBackend {
    fn name(&self) -> &str {
        "panicky"
    }

    fn extract(&self, _request: &ExtractionRequest) -> Result<Value, ProviderError> {
        panic!("backend bug");
    }
}

struct ArrayBackend;

impl ExtractionBackend for ArrayBackend {
    fn name(&self) -> &str {
        "array"
    }

    fn extract(&self, _request: &ExtractionRequest) -> Result<Value, ProviderError> {
        Ok(json!(["NoteMaker"]))
    }
}

struct FixedStructured(Value);

impl StructuredBackend for FixedStructured {
    fn generate_structured(
        &self,
        _tool: &str,
        _schema: &SchemaDescriptor,
        _user_input: &str,
        _options: &Map<String, Value>,
    ) -> Result<Value, ProviderError> {
        Ok(self.0.clone())
    }
}

#[test]
fn heuristic_backend_restricts_candidates_to_known_schemas() {
    let extraction = heuristic().extraction_for("I need notes about gravity in outline format");
    assert_eq!(extraction["tool_candidates"], json!(["NoteMaker"]));
    assert_eq!(extraction["parameters"]["topic"], json!("gravity in outline format"));
    assert_eq!(extraction["ambiguous_tools"], json!([]));
    assert_eq!(extraction["missing_required"], json!([]));
    assert_eq!(extraction["confidence"], json!(0.5));
}

#[test]
fn heuristic_backend_flags_ambiguity_across_keywords() {
    let extraction = heuristic().extraction_for("a quiz or a summary about \"mitosis\"");
    assert_eq!(
        extraction["tool_candidates"],
        json!(["SummaryCompressor", "ExpandedSummary", "MCQGenerator"])
    );
    assert_eq!(
        extraction["clarifying_question"],
        json!("I can help with SummaryCompressor, ExpandedSummary, MCQGenerator. Which would you prefer?")
    );
    assert_eq!(extraction["parameters"]["topic"], json!("mitosis"));
}

#[test]
fn heuristic_backend_asks_for_missing_topic() {
    let extraction = heuristic().extraction_for("Make 5 flashcards");
    assert_eq!(extraction["tool_candidates"], json!(["FlashcardGenerator"]));
    assert_eq!(extraction["missing_required"], json!(["topic"]));
    assert_eq!(
        extraction["clarifying_question"],
        json!("What specific topic would you like help with?")
    );
    assert_eq!(extraction["parameters"]["count"], json!(5));
    assert_eq!(extraction["parameters"]["slides"], json!(5));
}

#[test]
fn heuristic_backend_uses_sentiment_fallback() {
    let unrestricted = HeuristicBackend::default();
    assert_eq!(
        unrestricted.extraction_for("I am struggling")["tool_candidates"],
        json!(["ConceptExplainer"])
    );
    let learn = unrestricted.extraction_for("I want to learn");
    assert_eq!(
        learn["tool_candidates"],
        json!(["NoteMaker", "FlashcardGenerator"])
    );
    assert_eq!(learn["missing_required"], json!(["topic"]));
}

#[test]
fn extractor_normalizes_backend_output() {
    let extractor = ParameterExtractor::new(Arc::new(heuristic()));
    let result = extractor
        .extract(&ExtractionRequest::new("Explain \"entropy\" at an advanced level"))
        .expect("extract");

    assert_eq!(result.tool_candidates, vec!["ConceptExplainer"]);
    assert_eq!(result.parameters["topic"], json!("entropy"));
    assert_eq!(result.parameters["level"], json!("advanced"));
    assert_eq!(result.parameters["difficulty"], json!("hard"));
    assert!(result.error.is_none());
}

#[test]
fn extractor_times_out_slow_backends() {
    let extractor =
        ParameterExtractor::new(Arc::new(SleepyBackend)).with_timeout(Duration::from_millis(30));
    let err = extractor
        .extract(&ExtractionRequest::new("anything"))
        .expect_err("timeout");
    assert_eq!(err, ExtractionFailure::Timeout { timeout_ms: 30 });
}

#[test]
fn extractor_maps_panics_and_malformed_output() {
    let panicky =
        ParameterExtractor::new(Arc::new(PanickyBackend)).with_timeout(Duration::from_secs(2));
    let err = panicky
        .extract(&ExtractionRequest::new("anything"))
        .expect_err("panic");
    assert!(matches!(err, ExtractionFailure::Backend(_)));

    let array = ParameterExtractor::new(Arc::new(ArrayBackend));
    let err = array
        .extract(&ExtractionRequest::new("anything"))
        .expect_err("malformed");
    assert!(matches!(err, ExtractionFailure::Malformed(_)));
}

#[test]
fn extractor_maps_panics_without_a_timeout() {
    let panicky = ParameterExtractor::new(Arc::new(PanickyBackend));
    let err = panicky
        .extract(&ExtractionRequest::new("anything"))
        .expect_err("panic");
    assert_eq!(
        err,
        ExtractionFailure::Backend("call panicked before producing a result".to_string())
    );
}

#[test]
fn fallback_result_points_at_the_fallback_tool() {
    let failure = ExtractionFailure::Backend("down".to_string());
    let result = ExtractionResult::fallback(&failure, "NoteMaker");
    assert_eq!(result.tool_candidates, vec!["NoteMaker"]);
    assert_eq!(result.missing_required, vec!["topic"]);
    assert_eq!(result.clarifying_question.as_deref(), Some(FALLBACK_QUESTION));
    assert_eq!(
        result.error.as_deref(),
        Some("extraction backend failed: down")
    );
}

#[test]
fn candidate_cap_follows_configuration() {
    let result = ExtractionResult::from_backend_value(
        json!({"tool_candidates": ["A", "B", "C"], "confidence": -1}),
        2,
        "ConceptExplainer",
    )
    .expect("normalize");
    assert_eq!(result.tool_candidates, vec!["A", "B"]);
    assert_eq!(result.confidence, 0.0);
}

#[test]
fn tool_parameter_extractor_prefers_backend_output() {
    let extractor = ToolParameterExtractor::new(
        Arc::new(FixedStructured(json!({"topic": "cells", "count": 4}))),
        Arc::new(StaticSchemaRegistry::builtin()),
    );
    let params = extractor
        .extract("FlashcardGenerator", "make cards", &Map::new())
        .expect("params");
    assert_eq!(params["topic"], json!("cells"));
    assert_eq!(params["count"], json!(4));
}

#[test]
fn tool_parameter_extractor_defaults_come_from_options_then_schema() {
    let extractor = ToolParameterExtractor::new(
        Arc::new(UnconfiguredBackend),
        Arc::new(StaticSchemaRegistry::builtin()),
    );
    let mut options = Map::new();
    options.insert("level".to_string(), json!("beginner"));

    let params = extractor
        .extract("concept_explainer", "  recursion ", &options)
        .expect("params");
    assert_eq!(params["topic"], json!("recursion"));
    assert_eq!(params["level"], json!("beginner"));
    assert_eq!(params["include_practice"], json!(false));
}

#[test]
fn tool_parameter_extractor_propagates_failure_without_heuristic() {
    let extractor = ToolParameterExtractor::new(
        Arc::new(FixedStructured(json!("not an object"))),
        Arc::new(StaticSchemaRegistry::builtin()),
    );
    let err = extractor
        .extract("StepByStepSolver", "solve x + 1 = 2", &Map::new())
        .expect_err("no heuristic for solver");
    assert!(matches!(
        err,
        OrchestratorError::Extraction(ExtractionFailure::Malformed(_))
    ));

    let err = extractor
        .extract("NotATool", "anything", &Map::new())
        .expect_err("unknown");
    assert!(matches!(err, OrchestratorError::UnknownTool { .. }));
}
