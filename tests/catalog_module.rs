use scholaris::catalog::{
    default_endpoint, AuthType, CatalogError, ToolCatalog, ToolCategory, ToolDescriptor,
    BUILTIN_TOOLS,
};
use std::collections::BTreeSet;

#[test]
fn builtin_catalog_registers_every_builtin_tool() {
    let catalog = ToolCatalog::builtin();
    assert_eq!(catalog.len(), BUILTIN_TOOLS.len());
    assert!(catalog.len() >= 40);

    let keys: BTreeSet<_> = catalog.iter().map(|tool| tool.key.clone()).collect();
    assert_eq!(keys.len(), catalog.len());
    for tool in catalog.iter() {
        assert!(tool.rate_limit_per_minute > 0, "{}", tool.name);
        assert_eq!(tool.schema_ref, format!("{}Input", tool.name));
    }
}

#[test]
fn lookups_ignore_case_and_separators() {
    let catalog = ToolCatalog::builtin();
    let canonical = catalog.get("FlashcardGenerator").expect("flashcards");
    for raw in ["flashcard_generator", "FLASHCARD-GENERATOR", " flashcardgenerator "] {
        assert_eq!(catalog.get(raw), Some(canonical), "{raw}");
    }
    assert!(!catalog.contains("TimeMachine"));
}

#[test]
fn descriptors_default_from_name_and_category() {
    let tool = ToolDescriptor::new("QuizMaster", ToolCategory::Admin, 10).expect("descriptor");
    assert_eq!(tool.endpoint, default_endpoint("QuizMaster"));
    assert_eq!(tool.endpoint, "http://localhost:9000/mock/quizmaster");
    assert_eq!(tool.auth_type, AuthType::Bearer);
    assert!(tool.mockable);

    let open = ToolDescriptor::new("NoteMaker", ToolCategory::Content, 10).expect("descriptor");
    assert_eq!(open.auth_type, AuthType::None);
}

#[test]
fn invalid_descriptors_are_rejected() {
    assert_eq!(
        ToolDescriptor::new(" _- ", ToolCategory::Content, 10),
        Err(CatalogError::EmptyName)
    );
    assert_eq!(
        ToolDescriptor::new("NoteMaker", ToolCategory::Content, 0),
        Err(CatalogError::InvalidRateLimit {
            name: "NoteMaker".to_string()
        })
    );
}

#[test]
fn register_replaces_entries_with_the_same_key() {
    let mut catalog = ToolCatalog::builtin();
    let before = catalog.len();
    let replacement = ToolDescriptor::new("note_maker", ToolCategory::Content, 5)
        .expect("descriptor")
        .with_endpoint("http://notes.internal/run")
        .with_mockable(false);
    catalog.register(replacement).expect("register");

    assert_eq!(catalog.len(), before);
    let stored = catalog.get("NoteMaker").expect("notes");
    assert_eq!(stored.rate_limit_per_minute, 5);
    assert_eq!(stored.endpoint, "http://notes.internal/run");
    assert!(!stored.mockable);
}

#[test]
fn auth_type_parsing_accepts_known_names_only() {
    assert_eq!(AuthType::parse(" API_KEY "), Ok(AuthType::ApiKey));
    assert_eq!(AuthType::parse("oauth2"), Ok(AuthType::Oauth2));
    assert!(AuthType::parse("basic").is_err());
    assert_eq!(AuthType::Bearer.to_string(), "bearer");
}
