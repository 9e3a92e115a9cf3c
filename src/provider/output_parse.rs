use crate::provider::ProviderError;
use serde_json::{Map, Value};

/// Reads a single JSON object from backend stdout.
///
/// The whole trimmed output is tried first; failing that, the last line that
/// parses as an object wins, so backends may print progress lines before the
/// result.
pub fn parse_json_object(stdout: &str) -> Result<Map<String, Value>, ProviderError> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Err(ProviderError::ParseFailure {
            reason: "stdout was empty".to_string(),
        });
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => return Ok(map),
        Ok(other) => {
            return Err(ProviderError::ParseFailure {
                reason: format!("expected a json object, got {}", json_kind(&other)),
            })
        }
        Err(_) => {}
    }

    trimmed
        .lines()
        .rev()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .find_map(|line| match serde_json::from_str::<Value>(line) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        })
        .ok_or_else(|| ProviderError::ParseFailure {
            reason: "no json object found in stdout".to_string(),
        })
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
