use scholaris::schema::{SchemaErrorCode, SchemaProvider, SchemaRegistry, StaticSchemaRegistry};
use serde_json::{json, Map, Value};

fn params(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

#[test]
fn builtin_registry_carries_eleven_schemas() {
    let registry = StaticSchemaRegistry::builtin();
    assert_eq!(registry.len(), 11);
    for tool in [
        "NoteMaker",
        "FlashcardGenerator",
        "SlideDeckGenerator",
        "SummaryCompressor",
        "ExpandedSummary",
        "MCQGenerator",
        "CodingProblemGenerator",
        "ConceptExplainer",
        "StepByStepSolver",
        "SpacedRepetitionScheduler",
        "DrillGenerator",
    ] {
        assert!(registry.knows(tool), "missing schema for {tool}");
    }
}

#[test]
fn name_styles_share_one_validation_outcome() {
    let registry = StaticSchemaRegistry::builtin();
    let input = params(json!({"topic": "gravity", "user_info": {"user_id": "u1"}}));
    let expected = registry.validate("NoteMaker", &input).expect("valid");
    for name in ["note_maker", "NOTE-MAKER", "notemaker"] {
        assert_eq!(registry.validate(name, &input).expect("valid"), expected);
    }
    let schema = registry.input_schema("note-maker").expect("schema");
    assert_eq!(schema.tool, "NoteMaker");
    assert_eq!(schema.title, "NoteMakerInput");
}

#[test]
fn unknown_tool_reports_tool_name_and_code() {
    let registry = StaticSchemaRegistry::builtin();
    let errors = registry
        .validate("TimeMachine", &Map::new())
        .expect_err("unknown");
    assert_eq!(errors.error_code(), SchemaErrorCode::UnknownTool);
    assert_eq!(
        serde_json::to_value(&errors).expect("serialize"),
        json!({
            "tool_name": ["Unknown tool: TimeMachine"],
            "meta": {"error_code": "UNKNOWN_TOOL"}
        })
    );
}

#[test]
fn constraint_messages_match_the_wire_format() {
    let registry = StaticSchemaRegistry::builtin();
    let errors = registry
        .validate(
            "FlashcardGenerator",
            &params(json!({
                "user_info": {"user_id": "u1"},
                "topic": " x ",
                "count": 500,
                "difficulty": "extreme"
            })),
        )
        .expect_err("invalid");

    assert_eq!(errors.error_code(), SchemaErrorCode::ValidationError);
    assert_eq!(
        errors.fields["topic"],
        vec!["String should have at least 2 characters"]
    );
    assert_eq!(
        errors.fields["count"],
        vec!["Input should be less than or equal to 200"]
    );
    assert_eq!(
        errors.fields["difficulty"],
        vec!["Value error, Difficulty must be easy, medium, or hard"]
    );
    assert_eq!(errors.required_fields().count(), 0);
}

#[test]
fn type_errors_and_list_items() {
    let registry = StaticSchemaRegistry::builtin();
    let errors = registry
        .validate(
            "SpacedRepetitionScheduler",
            &params(json!({"user_info": "u1", "flashcard_ids": ["a", 2]})),
        )
        .expect_err("invalid");
    assert_eq!(
        errors.fields["user_info"],
        vec!["Input should be a valid dictionary"]
    );
    assert_eq!(
        errors.fields["flashcard_ids.1"],
        vec!["Input should be a valid string"]
    );

    let empty = registry
        .validate(
            "SpacedRepetitionScheduler",
            &params(json!({"user_info": {}, "flashcard_ids": []})),
        )
        .expect_err("empty list");
    assert!(empty.fields["flashcard_ids"][0].starts_with("List should have at least 1 item"));
}

#[test]
fn whole_floats_are_accepted_as_integers() {
    let registry = StaticSchemaRegistry::builtin();
    let validated = registry
        .validate(
            "DrillGenerator",
            &params(json!({"topic": "scales", "duration_seconds": 120.0})),
        )
        .expect("valid");
    assert_eq!(validated["duration_seconds"], json!(120));
}
