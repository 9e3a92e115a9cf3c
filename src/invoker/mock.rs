use chrono::{Duration as ChronoDuration, Utc};
use serde_json::{json, Map, Value};
use sha2::{Digest, Sha256};

pub const MOCK_ENDPOINT: &str = "mock://local";

const MAX_MOCK_FLASHCARDS: u64 = 20;
const SUMMARY_PREVIEW_CHARS: usize = 100;

/// Deterministic stand-in output for `tool`, shaped after its family.
///
/// Only `mock_timestamp` and the review dates of a schedule vary between
/// calls; `mock_id` depends on the payload alone.
pub fn mock_data(tool: &str, payload: &Map<String, Value>) -> Value {
    let echo: Map<String, Value> = payload
        .iter()
        .filter(|(key, _)| key.as_str() != "user_info")
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    let mut data = Map::new();
    data.insert("tool".to_string(), json!(tool));
    data.insert("input_echo".to_string(), Value::Object(echo));
    data.insert("mock_timestamp".to_string(), json!(Utc::now().to_rfc3339()));
    data.insert("mock_id".to_string(), json!(mock_id(tool, payload)));

    let name = tool.to_lowercase();
    let topic = text(payload, "topic").unwrap_or("Unknown Topic");

    if name.contains("note") {
        data.insert(
            "notes".to_string(),
            json!({
                "title": format!("Notes on {topic}"),
                "content": format!(
                    "Mock notes for {} in {} format",
                    text(payload, "topic").unwrap_or("topic"),
                    text(payload, "format").unwrap_or("outline")
                ),
                "sections": ["Introduction", "Key Points", "Summary"],
            }),
        );
    } else if name.contains("flashcard") {
        let count = number(payload, "count").unwrap_or(5).min(MAX_MOCK_FLASHCARDS);
        let difficulty = text(payload, "difficulty").unwrap_or("easy");
        let cards: Vec<Value> = (1..=count)
            .map(|i| {
                json!({
                    "front": format!("Mock Question {i} about {topic}"),
                    "back": format!("Mock Answer {i} for {topic}"),
                    "difficulty": difficulty,
                })
            })
            .collect();
        data.insert("flashcards".to_string(), Value::Array(cards));
    } else if name.contains("slide") {
        let slides: Vec<Value> = (1..=number(payload, "slides").unwrap_or(6))
            .map(|i| {
                json!({
                    "slide_number": i,
                    "title": format!("Slide {i}: {topic}"),
                    "content": format!("Mock content for slide {i}"),
                    "speaker_notes": format!("Mock speaker notes for slide {i}"),
                })
            })
            .collect();
        data.insert("slides".to_string(), Value::Array(slides));
    } else if name.contains("solver") {
        data.insert(
            "solution_steps".to_string(),
            json!([
                {"step": 1, "description": "Analyze the problem", "result": "Problem understood"},
                {"step": 2, "description": "Apply solution method", "result": "Method applied"},
                {"step": 3, "description": "Verify result", "result": "Solution verified"},
            ]),
        );
    } else if name.contains("scheduler") {
        let card_ids: Vec<String> = match payload.get("flashcard_ids").and_then(Value::as_array) {
            Some(ids) => ids
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            None => vec!["card1".to_string(), "card2".to_string()],
        };
        let now = Utc::now();
        let next_reviews: Map<String, Value> = card_ids
            .into_iter()
            .zip(1_i64..)
            .map(|(id, days)| (id, json!((now + ChronoDuration::days(days)).to_rfc3339())))
            .collect();
        data.insert(
            "schedule".to_string(),
            json!({
                "algorithm": text(payload, "algorithm").unwrap_or("sm2"),
                "next_reviews": next_reviews,
            }),
        );
    } else if name.contains("mcq") || name.contains("quiz") {
        let questions: Vec<Value> = (1..=number(payload, "count").unwrap_or(10))
            .map(|i| {
                json!({
                    "question": format!("Mock MCQ {i} about {topic}"),
                    "options": [
                        format!("Option A{i}"),
                        format!("Option B{i}"),
                        format!("Option C{i}"),
                        format!("Option D{i}"),
                    ],
                    "correct": 0,
                    "explanation": format!("Mock explanation for question {i}"),
                })
            })
            .collect();
        data.insert("questions".to_string(), Value::Array(questions));
    } else if name.contains("summary") {
        let content = text(payload, "content").unwrap_or("No content provided");
        let preview: String = content.chars().take(SUMMARY_PREVIEW_CHARS).collect();
        data.insert(
            "summary".to_string(),
            json!(format!("Mock summary of content: {preview}...")),
        );
    } else {
        data.insert(
            "generic_result".to_string(),
            json!(format!("Mock result from {tool}")),
        );
    }

    Value::Object(data)
}

/// `mock_<tool>_<n>` where `n` is the payload digest modulo 10000.
pub fn mock_id(tool: &str, payload: &Map<String, Value>) -> String {
    let encoded = serde_json::to_string(payload).unwrap_or_default();
    let digest = Sha256::digest(encoded.as_bytes());
    let mut prefix = [0_u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    format!("mock_{tool}_{}", u64::from_be_bytes(prefix) % 10_000)
}

fn text<'a>(payload: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    payload.get(key).and_then(Value::as_str)
}

fn number(payload: &Map<String, Value>, key: &str) -> Option<u64> {
    payload.get(key).and_then(Value::as_u64)
}
