use super::{CatalogError, ToolCategory, ToolDescriptor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinTool {
    pub name: &'static str,
    pub category: ToolCategory,
    pub rate_limit_per_minute: u32,
}

impl BuiltinTool {
    pub fn descriptor(&self) -> Result<ToolDescriptor, CatalogError> {
        ToolDescriptor::new(self.name, self.category, self.rate_limit_per_minute)
    }
}

pub const BUILTIN_TOOLS: &[BuiltinTool] = &[
    BuiltinTool {
        name: "NoteMaker",
        category: ToolCategory::Content,
        rate_limit_per_minute: 120,
    },
    BuiltinTool {
        name: "FlashcardGenerator",
        category: ToolCategory::Assessment,
        rate_limit_per_minute: 200,
    },
    BuiltinTool {
        name: "SlideDeckGenerator",
        category: ToolCategory::Content,
        rate_limit_per_minute: 60,
    },
    BuiltinTool {
        name: "SummaryCompressor",
        category: ToolCategory::Content,
        rate_limit_per_minute: 300,
    },
    BuiltinTool {
        name: "ExpandedSummary",
        category: ToolCategory::Content,
        rate_limit_per_minute: 200,
    },
    BuiltinTool {
        name: "AnnotatedNotes",
        category: ToolCategory::Content,
        rate_limit_per_minute: 100,
    },
    BuiltinTool {
        name: "CornellNotesGenerator",
        category: ToolCategory::Content,
        rate_limit_per_minute: 80,
    },
    BuiltinTool {
        name: "VisualNotesPlanner",
        category: ToolCategory::Content,
        rate_limit_per_minute: 60,
    },
    BuiltinTool {
        name: "LectureTranscriptCleaner",
        category: ToolCategory::Content,
        rate_limit_per_minute: 150,
    },
    BuiltinTool {
        name: "HandoutCreator",
        category: ToolCategory::Content,
        rate_limit_per_minute: 50,
    },
    BuiltinTool {
        name: "StudyGuideAssembler",
        category: ToolCategory::Content,
        rate_limit_per_minute: 40,
    },
    BuiltinTool {
        name: "RevisionChecklistGenerator",
        category: ToolCategory::Content,
        rate_limit_per_minute: 120,
    },
    BuiltinTool {
        name: "FlashcardBank",
        category: ToolCategory::Assessment,
        rate_limit_per_minute: 80,
    },
    BuiltinTool {
        name: "MCQGenerator",
        category: ToolCategory::Assessment,
        rate_limit_per_minute: 200,
    },
    BuiltinTool {
        name: "ShortAnswerQuizMaker",
        category: ToolCategory::Assessment,
        rate_limit_per_minute: 150,
    },
    BuiltinTool {
        name: "CodingProblemGenerator",
        category: ToolCategory::Assessment,
        rate_limit_per_minute: 60,
    },
    BuiltinTool {
        name: "UnitTestGenerator",
        category: ToolCategory::Assessment,
        rate_limit_per_minute: 120,
    },
    BuiltinTool {
        name: "ClozeTestGenerator",
        category: ToolCategory::Assessment,
        rate_limit_per_minute: 150,
    },
    BuiltinTool {
        name: "AdaptiveQuizDesigner",
        category: ToolCategory::Assessment,
        rate_limit_per_minute: 40,
    },
    BuiltinTool {
        name: "ExamPaperAssembler",
        category: ToolCategory::Assessment,
        rate_limit_per_minute: 20,
    },
    BuiltinTool {
        name: "RandomizedQuestionBanker",
        category: ToolCategory::Assessment,
        rate_limit_per_minute: 200,
    },
    BuiltinTool {
        name: "DebuggingExerciseMaker",
        category: ToolCategory::Assessment,
        rate_limit_per_minute: 80,
    },
    BuiltinTool {
        name: "PeerReviewPromptGenerator",
        category: ToolCategory::Assessment,
        rate_limit_per_minute: 100,
    },
    BuiltinTool {
        name: "AutomaticGrader",
        category: ToolCategory::Assessment,
        rate_limit_per_minute: 60,
    },
    BuiltinTool {
        name: "ConceptExplainer",
        category: ToolCategory::Pedagogy,
        rate_limit_per_minute: 300,
    },
    BuiltinTool {
        name: "AnalogyMaker",
        category: ToolCategory::Pedagogy,
        rate_limit_per_minute: 120,
    },
    BuiltinTool {
        name: "StepByStepSolver",
        category: ToolCategory::Pedagogy,
        rate_limit_per_minute: 200,
    },
    BuiltinTool {
        name: "IntuitionBuilder",
        category: ToolCategory::Pedagogy,
        rate_limit_per_minute: 150,
    },
    BuiltinTool {
        name: "SocraticQuestioner",
        category: ToolCategory::Pedagogy,
        rate_limit_per_minute: 200,
    },
    BuiltinTool {
        name: "ErrorDiagnosisAssistant",
        category: ToolCategory::Pedagogy,
        rate_limit_per_minute: 120,
    },
    BuiltinTool {
        name: "ExampleBankGenerator",
        category: ToolCategory::Pedagogy,
        rate_limit_per_minute: 80,
    },
    BuiltinTool {
        name: "CounterexampleFinder",
        category: ToolCategory::Pedagogy,
        rate_limit_per_minute: 60,
    },
    BuiltinTool {
        name: "ProofSketcher",
        category: ToolCategory::Pedagogy,
        rate_limit_per_minute: 40,
    },
    BuiltinTool {
        name: "HistoricalContextProvider",
        category: ToolCategory::Pedagogy,
        rate_limit_per_minute: 80,
    },
    BuiltinTool {
        name: "PracticeSessionPlanner",
        category: ToolCategory::Practice,
        rate_limit_per_minute: 200,
    },
    BuiltinTool {
        name: "SpacedRepetitionScheduler",
        category: ToolCategory::Practice,
        rate_limit_per_minute: 40,
    },
    BuiltinTool {
        name: "DrillGenerator",
        category: ToolCategory::Practice,
        rate_limit_per_minute: 120,
    },
    BuiltinTool {
        name: "MixedPracticeCreator",
        category: ToolCategory::Practice,
        rate_limit_per_minute: 80,
    },
    BuiltinTool {
        name: "SimulationTaskMaker",
        category: ToolCategory::Practice,
        rate_limit_per_minute: 40,
    },
    BuiltinTool {
        name: "RealWorldApplicationFinder",
        category: ToolCategory::Practice,
        rate_limit_per_minute: 100,
    },
];
