use crate::shared::ToolKey;
use std::collections::BTreeSet;

pub const DEFAULT_MAX_CANDIDATES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordRule {
    pub keyword: &'static str,
    pub tools: &'static [&'static str],
}

const fn rule(keyword: &'static str, tools: &'static [&'static str]) -> KeywordRule {
    KeywordRule { keyword, tools }
}

/// Keyword to tool table, scanned top to bottom.
pub const KEYWORD_TOOLS: &[KeywordRule] = &[
    // content
    rule("notes", &["NoteMaker", "AnnotatedNotes", "CornellNotesGenerator"]),
    rule("summary", &["SummaryCompressor", "ExpandedSummary"]),
    rule("slides", &["SlideDeckGenerator"]),
    rule("handout", &["HandoutCreator"]),
    rule("study guide", &["StudyGuideAssembler"]),
    rule("checklist", &["RevisionChecklistGenerator"]),
    rule("transcript", &["LectureTranscriptCleaner"]),
    // assessment
    rule("flashcard", &["FlashcardGenerator", "FlashcardBank"]),
    rule(
        "quiz",
        &["MCQGenerator", "ShortAnswerQuizMaker", "AdaptiveQuizDesigner"],
    ),
    rule("test", &["ClozeTestGenerator", "UnitTestGenerator"]),
    rule("exam", &["ExamPaperAssembler"]),
    rule("coding", &["CodingProblemGenerator", "DebuggingExerciseMaker"]),
    rule("grade", &["AutomaticGrader"]),
    rule("peer review", &["PeerReviewPromptGenerator"]),
    // pedagogy
    rule("explain", &["ConceptExplainer"]),
    rule("analogy", &["AnalogyMaker"]),
    rule("solve", &["StepByStepSolver"]),
    rule("intuition", &["IntuitionBuilder"]),
    rule("question", &["SocraticQuestioner"]),
    rule("error", &["ErrorDiagnosisAssistant"]),
    rule("example", &["ExampleBankGenerator"]),
    rule("counterexample", &["CounterexampleFinder"]),
    rule("proof", &["ProofSketcher"]),
    rule("history", &["HistoricalContextProvider"]),
    // practice
    rule("practice", &["PracticeSessionPlanner", "MixedPracticeCreator"]),
    rule("spaced repetition", &["SpacedRepetitionScheduler"]),
    rule("drill", &["DrillGenerator"]),
    rule("simulation", &["SimulationTaskMaker"]),
    rule("application", &["RealWorldApplicationFinder"]),
    rule("reflect", &["ReflectionPromptGenerator"]),
    rule("hint", &["AutoHintProvider"]),
    rule("mastery", &["MasteryCheckpointCreator"]),
    // personalization
    rule("learning path", &["LearningPathRecommender"]),
    rule("skill gap", &["SkillGapAnalyzer"]),
    rule("goal", &["GoalSettingAssistant"]),
    rule("pace", &["PaceAdjuster"]),
    rule("tone", &["PersonaStyler"]),
    rule("motivate", &["MotivationBooster"]),
    rule("learning style", &["LearningStyleDetector"]),
    rule("profile", &["ProfileSummaryExporter"]),
    rule("schedule", &["TimeTablePlanner"]),
];

const STRUGGLE_WORDS: &[&str] = &["help", "struggling"];
const LEARN_WORDS: &[&str] = &["learn"];

/// Case-insensitive keyword scan over [`KEYWORD_TOOLS`].
#[derive(Debug, Clone)]
pub struct IntentMatcher {
    allowed: Option<BTreeSet<ToolKey>>,
    max_candidates: usize,
}

impl Default for IntentMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentMatcher {
    pub fn new() -> Self {
        Self {
            allowed: None,
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }

    /// Drops keyword matches for tools outside `tools`. The sentiment
    /// fallback is never filtered.
    pub fn restricted_to<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed = Some(
            tools
                .into_iter()
                .map(|tool| ToolKey::normalize(tool.as_ref()))
                .collect(),
        );
        self
    }

    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates.max(1);
        self
    }

    /// Keyword hits in table order, deduplicated by normalized name and capped.
    pub fn keyword_matches(&self, message: &str) -> Vec<String> {
        let lowered = message.to_lowercase();
        let mut seen = BTreeSet::new();
        let mut matched = Vec::new();

        for rule in KEYWORD_TOOLS {
            if !lowered.contains(rule.keyword) {
                continue;
            }
            for tool in rule.tools {
                let key = ToolKey::normalize(tool);
                if let Some(allowed) = &self.allowed {
                    if !allowed.contains(&key) {
                        continue;
                    }
                }
                if seen.insert(key) {
                    matched.push((*tool).to_string());
                }
            }
        }

        matched.truncate(self.max_candidates);
        matched
    }

    pub fn candidates(&self, message: &str) -> Vec<String> {
        let matched = self.keyword_matches(message);
        if !matched.is_empty() {
            return matched;
        }
        sentiment_fallback(message)
            .iter()
            .map(|tool| (*tool).to_string())
            .collect()
    }
}

/// Tools offered when no keyword matched.
pub fn sentiment_fallback(message: &str) -> &'static [&'static str] {
    let lowered = message.to_lowercase();
    if STRUGGLE_WORDS.iter().any(|word| lowered.contains(word)) {
        &["ConceptExplainer"]
    } else if LEARN_WORDS.iter().any(|word| lowered.contains(word)) {
        &["NoteMaker", "FlashcardGenerator"]
    } else {
        &["ConceptExplainer"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_hits_keep_table_order_and_cap() {
        let matcher = IntentMatcher::new();
        let tools = matcher.keyword_matches("notes and a quiz please");
        assert_eq!(
            tools,
            vec!["NoteMaker", "AnnotatedNotes", "CornellNotesGenerator"]
        );
    }

    #[test]
    fn restriction_filters_keyword_hits_only() {
        let matcher = IntentMatcher::new().restricted_to(["NoteMaker", "MCQGenerator"]);
        assert_eq!(
            matcher.keyword_matches("notes and a quiz"),
            vec!["NoteMaker", "MCQGenerator"]
        );
        assert_eq!(
            matcher.candidates("I want to learn"),
            vec!["NoteMaker", "FlashcardGenerator"]
        );
    }
}
