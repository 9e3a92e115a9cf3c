use serde::{Deserialize, Deserializer, Serialize};

/// Lowercases a tool name and strips every `_` and `-`.
///
/// `NoteMaker`, `note_maker` and `NOTE-MAKER` all map to `notemaker`.
pub fn normalize_tool_name(raw: &str) -> String {
    raw.chars()
        .filter(|ch| *ch != '_' && *ch != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Normalized lookup key for every registry keyed by tool name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ToolKey(String);

impl ToolKey {
    pub fn normalize(raw: &str) -> Self {
        Self(normalize_tool_name(raw.trim()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn matches(&self, raw: &str) -> bool {
        self.0 == normalize_tool_name(raw.trim())
    }
}

impl std::fmt::Display for ToolKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::borrow::Borrow<str> for ToolKey {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for ToolKey {
    fn from(value: &str) -> Self {
        Self::normalize(value)
    }
}

impl<'de> Deserialize<'de> for ToolKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::normalize(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn casing_and_separator_styles_share_one_key() {
        let expected = ToolKey::normalize("notemaker");
        for raw in ["NoteMaker", "note_maker", "NOTE-MAKER", "  Note-Maker "] {
            assert_eq!(ToolKey::normalize(raw), expected, "{raw}");
        }
        assert!(expected.matches("Note_Maker"));
        assert!(!expected.matches("NoteMakers"));
    }

    #[test]
    fn deserialized_keys_are_normalized() {
        let key: ToolKey = serde_json::from_str("\"Flashcard_Generator\"").expect("key");
        assert_eq!(key.as_str(), "flashcardgenerator");
    }
}
