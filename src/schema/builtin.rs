use super::{FieldSchema, FieldType, SchemaDescriptor};
use serde_json::json;

const DIFFICULTIES: &[&str] = &["easy", "medium", "hard"];
const DIFFICULTY_MESSAGE: &str = "Difficulty must be easy, medium, or hard";

fn schema(tool: &str, fields: Vec<FieldSchema>) -> SchemaDescriptor {
    SchemaDescriptor {
        tool: tool.to_string(),
        title: format!("{tool}Input"),
        fields,
    }
}

fn user_info() -> FieldSchema {
    FieldSchema::required("user_info", FieldType::Object, "User profile and preferences")
}

fn topic(description: &str) -> FieldSchema {
    FieldSchema::required("topic", FieldType::String, description).length(2, 200)
}

fn difficulty(default: &str) -> FieldSchema {
    FieldSchema::optional(
        "difficulty",
        FieldType::String,
        json!(default),
        "Difficulty level: easy, medium, hard",
    )
    .one_of(DIFFICULTIES, DIFFICULTY_MESSAGE)
}

pub fn builtin_schemas() -> Vec<SchemaDescriptor> {
    vec![
        schema(
            "NoteMaker",
            vec![
                user_info(),
                topic("Topic for note creation"),
                FieldSchema::optional(
                    "format",
                    FieldType::String,
                    json!("outline"),
                    "Note format: outline, bullets, paragraph",
                )
                .one_of(
                    &["outline", "bullets", "paragraph"],
                    "Format must be outline, bullets, or paragraph",
                ),
                FieldSchema::optional(
                    "detail_level",
                    FieldType::String,
                    json!("medium"),
                    "Detail level: short, medium, long",
                )
                .one_of(
                    &["short", "medium", "long"],
                    "Detail level must be short, medium, or long",
                ),
            ],
        ),
        schema(
            "FlashcardGenerator",
            vec![
                user_info(),
                topic("Topic for flashcard creation"),
                FieldSchema::optional(
                    "count",
                    FieldType::Integer,
                    json!(5),
                    "Number of flashcards to generate",
                )
                .range(1, 200),
                difficulty("easy"),
            ],
        ),
        schema(
            "SlideDeckGenerator",
            vec![
                user_info(),
                topic("Topic for slide generation"),
                FieldSchema::optional(
                    "slides",
                    FieldType::Integer,
                    json!(6),
                    "Number of slides to generate",
                )
                .range(1, 60),
            ],
        ),
        schema(
            "SummaryCompressor",
            vec![
                FieldSchema::required("content", FieldType::String, "Content to summarize")
                    .length(10, 20000),
                FieldSchema::optional(
                    "tone",
                    FieldType::String,
                    json!("neutral"),
                    "Summary tone: neutral, engaging, formal",
                )
                .one_of(
                    &["neutral", "engaging", "formal"],
                    "Tone must be neutral, engaging, or formal",
                ),
            ],
        ),
        schema(
            "ExpandedSummary",
            vec![
                FieldSchema::required("content", FieldType::String, "Content to summarize")
                    .length(10, 40000),
                FieldSchema::optional(
                    "length",
                    FieldType::String,
                    json!("long"),
                    "Summary length: short, medium, long",
                )
                .one_of(
                    &["short", "medium", "long"],
                    "Length must be short, medium, or long",
                ),
            ],
        ),
        schema(
            "MCQGenerator",
            vec![
                topic("Topic for MCQ generation"),
                FieldSchema::optional(
                    "count",
                    FieldType::Integer,
                    json!(10),
                    "Number of questions to generate",
                )
                .range(1, 200),
                difficulty("medium"),
            ],
        ),
        schema(
            "CodingProblemGenerator",
            vec![
                topic("Topic for coding problem"),
                difficulty("medium"),
                FieldSchema::optional(
                    "language",
                    FieldType::String,
                    json!("python"),
                    "Programming language",
                ),
            ],
        ),
        schema(
            "ConceptExplainer",
            vec![
                topic("Concept to explain"),
                FieldSchema::optional(
                    "level",
                    FieldType::String,
                    json!("intermediate"),
                    "Explanation level: beginner, intermediate, advanced",
                )
                .one_of(
                    &["beginner", "intermediate", "advanced"],
                    "Level must be beginner, intermediate, or advanced",
                ),
                FieldSchema::optional(
                    "include_practice",
                    FieldType::Boolean,
                    json!(false),
                    "Include practice exercises",
                ),
            ],
        ),
        schema(
            "StepByStepSolver",
            vec![
                FieldSchema::required("problem_statement", FieldType::String, "Problem to solve")
                    .length(10, 5000),
                FieldSchema::optional(
                    "show_checks",
                    FieldType::Boolean,
                    json!(true),
                    "Show intermediate checks",
                ),
            ],
        ),
        schema(
            "SpacedRepetitionScheduler",
            vec![
                user_info(),
                FieldSchema::required(
                    "flashcard_ids",
                    FieldType::StringList,
                    "Flashcard IDs to schedule",
                )
                .min_items(1),
                FieldSchema::optional(
                    "algorithm",
                    FieldType::String,
                    json!("sm2"),
                    "Scheduling algorithm: sm2, leitner",
                )
                .one_of(&["sm2", "leitner"], "Algorithm must be sm2 or leitner"),
            ],
        ),
        schema(
            "DrillGenerator",
            vec![
                topic("Drill topic"),
                FieldSchema::optional(
                    "duration_seconds",
                    FieldType::Integer,
                    json!(60),
                    "Drill duration",
                )
                .range(10, 3600),
            ],
        ),
    ]
}
