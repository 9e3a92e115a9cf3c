use crate::orchestration::state::WorkflowState;
use crate::shared::ToolKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRule {
    pub signals: &'static [&'static str],
    pub preferred: &'static [&'static str],
}

/// Intent signals and the tools they favour, highest priority first. Only
/// the first rule whose signal appears in the message is consulted.
pub const SELECTION_RULES: &[SelectionRule] = &[
    SelectionRule {
        signals: &["explain", "understand"],
        preferred: &["ConceptExplainer", "IntuitionBuilder", "AnalogyMaker"],
    },
    SelectionRule {
        signals: &["practice", "exercise"],
        preferred: &[
            "PracticeSessionPlanner",
            "DrillGenerator",
            "FlashcardGenerator",
        ],
    },
    SelectionRule {
        signals: &["notes"],
        preferred: &["NoteMaker", "CornellNotesGenerator", "AnnotatedNotes"],
    },
];

pub fn select_tool(mut state: WorkflowState, fallback_tool: &str) -> WorkflowState {
    if state.selected_tool().is_some() && state.validation_success {
        tracing::debug!(
            tool = state.selected_tool().unwrap_or_default(),
            "tool already selected by validation"
        );
        return state;
    }

    if state.tool_candidates.is_empty() {
        state.tool_candidates = vec![fallback_tool.to_string()];
        state.select_tool(fallback_tool);
        return state;
    }

    let choice = preferred_candidate(state.current_message(), &state.tool_candidates)
        .unwrap_or_else(|| state.tool_candidates[0].clone());
    tracing::info!(tool = %choice, "selected tool");
    state.select_tool(choice);
    state
}

/// The candidate picked by the first matching rule, spelled as the candidate
/// list spells it.
pub fn preferred_candidate(message: &str, candidates: &[String]) -> Option<String> {
    let lowered = message.to_lowercase();
    let rule = SELECTION_RULES
        .iter()
        .find(|rule| rule.signals.iter().any(|signal| lowered.contains(signal)))?;

    rule.preferred.iter().find_map(|preferred| {
        let key = ToolKey::normalize(preferred);
        candidates
            .iter()
            .find(|candidate| key.matches(candidate))
            .cloned()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn first_matching_rule_wins_even_without_a_hit() {
        let pool = candidates(&["NoteMaker", "DrillGenerator"]);
        assert_eq!(
            preferred_candidate("explain my practice notes", &pool),
            None
        );
        assert_eq!(
            preferred_candidate("practice notes", &pool),
            Some("DrillGenerator".to_string())
        );
    }

    #[test]
    fn preferred_tools_compare_by_normalized_name() {
        let pool = candidates(&["annotated_notes", "cornell-notes-generator"]);
        assert_eq!(
            preferred_candidate("Some NOTES please", &pool),
            Some("cornell-notes-generator".to_string())
        );
    }
}
