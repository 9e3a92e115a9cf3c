use crate::orchestration::extractor::DEFAULT_CONFIDENCE;
use crate::orchestration::intent::IntentMatcher;
use crate::provider::{ExtractionBackend, ExtractionRequest, ProviderError};
use crate::shared::ToolKey;
use serde_json::{json, Map, Value};

const TOPIC_WINDOW_CHARS: usize = 50;
const MAX_COUNT: u64 = 50;
const MAX_SLIDES: u64 = 30;
const TOPIC_REQUIRED_TOOLS: &[&str] = &["NoteMaker", "FlashcardGenerator", "ConceptExplainer"];

const LEVELS: &[(&[&str], &str, &str)] = &[
    (&["easy", "beginner"], "easy", "beginner"),
    (&["hard", "advanced"], "hard", "advanced"),
    (&["medium", "intermediate"], "medium", "intermediate"),
];

/// Keyword-driven extractor that needs no model.
#[derive(Debug, Clone, Default)]
pub struct HeuristicBackend {
    matcher: IntentMatcher,
}

impl HeuristicBackend {
    pub fn new(matcher: IntentMatcher) -> Self {
        Self { matcher }
    }

    /// Only offers keyword matches the given schema set can validate.
    pub fn for_schemas<I, S>(tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(IntentMatcher::new().restricted_to(tools))
    }

    pub fn extraction_for(&self, message: &str) -> Map<String, Value> {
        let candidates = self.matcher.candidates(message);
        let parameters = extract_parameters(message);

        let mut ambiguous_tools: Vec<String> = Vec::new();
        let mut clarifying_question: Option<String> = None;
        let mut missing_required: Vec<String> = Vec::new();

        if candidates.len() > 1 {
            ambiguous_tools = candidates.clone();
            let names = candidates
                .iter()
                .take(3)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            clarifying_question = Some(format!("I can help with {names}. Which would you prefer?"));
        }

        let has_topic = parameters
            .get("topic")
            .and_then(Value::as_str)
            .is_some_and(|topic| !topic.is_empty());
        if let Some(primary) = candidates.first() {
            let needs_topic = TOPIC_REQUIRED_TOOLS
                .iter()
                .any(|tool| ToolKey::normalize(tool).matches(primary));
            if needs_topic && !has_topic {
                missing_required.push("topic".to_string());
                clarifying_question =
                    Some("What specific topic would you like help with?".to_string());
            }
        }

        let mut extraction = Map::new();
        extraction.insert("tool_candidates".to_string(), json!(candidates));
        extraction.insert("parameters".to_string(), Value::Object(parameters));
        extraction.insert("missing_required".to_string(), json!(missing_required));
        extraction.insert("clarifying_question".to_string(), json!(clarifying_question));
        extraction.insert("ambiguous_tools".to_string(), json!(ambiguous_tools));
        extraction.insert("confidence".to_string(), json!(DEFAULT_CONFIDENCE));
        extraction
    }
}

impl ExtractionBackend for HeuristicBackend {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn extract(&self, request: &ExtractionRequest) -> Result<Value, ProviderError> {
        Ok(Value::Object(self.extraction_for(&request.message)))
    }
}

/// Pulls topic, difficulty/level and count-like numbers out of free text.
///
/// The first integer fills `count`, `num_questions` and `slides` alike,
/// whichever tool ends up selected.
pub fn extract_parameters(message: &str) -> Map<String, Value> {
    let mut parameters = Map::new();

    if let Some(topic) = extract_topic(message) {
        parameters.insert("topic".to_string(), Value::String(topic));
    }

    let lowered = message.to_lowercase();
    if let Some((_, difficulty, level)) = LEVELS
        .iter()
        .find(|(words, _, _)| words.iter().any(|word| lowered.contains(word)))
    {
        parameters.insert("difficulty".to_string(), json!(difficulty));
        parameters.insert("level".to_string(), json!(level));
    }

    if let Some(number) = first_integer(message) {
        parameters.insert("count".to_string(), json!(number.min(MAX_COUNT)));
        parameters.insert("num_questions".to_string(), json!(number.min(MAX_COUNT)));
        parameters.insert("slides".to_string(), json!(number.min(MAX_SLIDES)));
    }

    parameters
}

/// Quoted text first, then the words after " about ", then after " on ".
pub fn extract_topic(message: &str) -> Option<String> {
    if let Some(quoted) = quoted_text(message) {
        return Some(quoted);
    }
    [" about ", " on "]
        .iter()
        .find_map(|marker| text_after(message, marker))
}

fn quoted_text(message: &str) -> Option<String> {
    let start = message.find('"')?;
    let rest = &message[start + 1..];
    let end = rest.find('"')?;
    let topic = rest[..end].trim();
    (!topic.is_empty()).then(|| topic.to_string())
}

/// Case-insensitive search for `marker`, returning at most
/// [`TOPIC_WINDOW_CHARS`] characters after it.
fn text_after(message: &str, marker: &str) -> Option<String> {
    let chars: Vec<char> = message.chars().collect();
    let lowered: Vec<char> = chars
        .iter()
        .map(|ch| ch.to_lowercase().next().unwrap_or(*ch))
        .collect();
    let needle: Vec<char> = marker.chars().collect();

    let position = lowered
        .windows(needle.len())
        .position(|window| window == needle.as_slice())?;
    let start = position + needle.len();
    let topic: String = chars
        .iter()
        .skip(start)
        .take(TOPIC_WINDOW_CHARS)
        .collect();
    let topic = topic.trim();
    (!topic.is_empty()).then(|| topic.to_string())
}

/// First run of ASCII digits standing alone as a word. Values too large for
/// `u64` saturate.
fn first_integer(message: &str) -> Option<u64> {
    message
        .split(|ch: char| !ch.is_alphanumeric() && ch != '_')
        .find(|token| !token.is_empty() && token.chars().all(|ch| ch.is_ascii_digit()))
        .map(|token| token.parse::<u64>().unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_prefers_quotes_then_about_then_on() {
        assert_eq!(
            extract_topic("notes on \"Photosynthesis\" about plants").as_deref(),
            Some("Photosynthesis")
        );
        assert_eq!(
            extract_topic("Tell me ABOUT the French Revolution").as_deref(),
            Some("the French Revolution")
        );
        assert_eq!(
            extract_topic("quiz me on cell biology").as_deref(),
            Some("cell biology")
        );
        assert_eq!(extract_topic("make flashcards"), None);
    }

    #[test]
    fn topic_window_respects_char_boundaries() {
        let message = format!("notes about {}", "é".repeat(80));
        let topic = extract_topic(&message).expect("topic");
        assert_eq!(topic.chars().count(), TOPIC_WINDOW_CHARS);
    }

    #[test]
    fn first_number_fills_every_count_field() {
        let params = extract_parameters("Make 75 hard flashcards");
        assert_eq!(params["count"], json!(50));
        assert_eq!(params["num_questions"], json!(50));
        assert_eq!(params["slides"], json!(30));
        assert_eq!(params["difficulty"], json!("hard"));
        assert_eq!(params["level"], json!("advanced"));
    }

    #[test]
    fn digits_inside_words_are_not_numbers() {
        assert_eq!(first_integer("mp3 files and 12 cards"), Some(12));
        assert_eq!(first_integer("no numbers here"), None);
    }

    #[test]
    fn oversized_number_saturates_instead_of_skipping() {
        assert_eq!(first_integer("99999999999999999999 then 7"), Some(u64::MAX));

        let params = extract_parameters("Make 99999999999999999999 flashcards then 7 more");
        assert_eq!(params["count"], json!(50));
        assert_eq!(params["num_questions"], json!(50));
        assert_eq!(params["slides"], json!(30));
    }
}
