use scholaris::catalog::{AuthType, ToolCategory};
use scholaris::config::{load_settings, ConfigError, ExtractorKind, Settings};
use std::collections::BTreeMap;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: BTreeMap<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_match_documented_values() {
    let settings = load_settings(None, env_from(&[])).expect("defaults");
    assert!(settings.mock_mode);
    assert!(settings.auto_register);
    assert_eq!(settings.fallback_tool, "ConceptExplainer");
    assert_eq!(settings.max_candidates, 3);
    assert_eq!(settings.extraction_timeout(), Duration::from_secs(30));
    assert_eq!(settings.tool_timeout(), Duration::from_secs(10));
    assert_eq!(settings.extractor.kind, ExtractorKind::Heuristic);
    assert_eq!(settings, Settings::default());
}

#[test]
fn yaml_file_is_loaded_and_env_wins() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.yaml");
    fs::write(
        &path,
        r#"
mock_mode: true
auto_register: false
fallback_tool: NoteMaker
max_candidates: 2
tool_timeout_ms: 2500
extractor:
  kind: command
  binary: /usr/local/bin/extract
  args: ["--json"]
tools:
  - name: NoteMaker
    category: content
    rate_limit_per_minute: 30
    endpoint: http://notes.internal/run
    auth_type: api_key
credentials:
  api_key: from-file
"#,
    )
    .expect("write config");

    let settings = load_settings(
        Some(&path),
        env_from(&[("MOCK_MODE", "off"), ("TUTOR_API_KEY", "from-env")]),
    )
    .expect("settings");

    assert!(!settings.mock_mode);
    assert_eq!(settings.fallback_tool, "NoteMaker");
    assert_eq!(settings.max_candidates, 2);
    assert_eq!(settings.tool_timeout(), Duration::from_millis(2500));
    assert_eq!(settings.extraction_timeout_ms, 30_000);
    assert_eq!(settings.extractor.kind, ExtractorKind::Command);
    assert_eq!(settings.extractor.args, vec!["--json"]);
    assert_eq!(settings.credentials.api_key.as_deref(), Some("from-env"));

    let catalog = settings.build_catalog().expect("catalog");
    assert_eq!(catalog.len(), 1);
    let notes = catalog.get("note_maker").expect("notes");
    assert_eq!(notes.category, ToolCategory::Content);
    assert_eq!(notes.auth_type, AuthType::ApiKey);
    assert_eq!(notes.endpoint, "http://notes.internal/run");
    assert_eq!(notes.rate_limit_per_minute, 30);
}

#[test]
fn overrides_extend_the_builtin_catalog() {
    let mut settings = Settings::default();
    settings.tools = serde_yaml::from_str(
        "- name: FlashcardGenerator\n  category: assessment\n  rate_limit_per_minute: 7\n- name: PodcastScripter\n  category: content\n  rate_limit_per_minute: 15\n",
    )
    .expect("tools yaml");

    let builtin = scholaris::catalog::ToolCatalog::builtin().len();
    let catalog = settings.build_catalog().expect("catalog");
    assert_eq!(catalog.len(), builtin + 1);
    assert_eq!(
        catalog
            .get("FlashcardGenerator")
            .expect("flashcards")
            .rate_limit_per_minute,
        7
    );
    assert!(catalog.contains("podcast_scripter"));
}

#[test]
fn unrecognized_flags_are_ignored() {
    let settings = Settings::default().with_env_overrides(env_from(&[
        ("MOCK_MODE", "maybe"),
        ("AUTO_REGISTER", "0"),
    ]));
    assert!(settings.mock_mode);
    assert!(!settings.auto_register);
}

#[test]
fn invalid_settings_are_rejected() {
    let mut settings = Settings::default();
    settings.max_candidates = 0;
    assert!(matches!(settings.validate(), Err(ConfigError::Settings(_))));

    let mut settings = Settings::default();
    settings.extractor.kind = ExtractorKind::Command;
    let err = settings.validate().expect_err("binary required");
    assert!(err.to_string().contains("extractor.binary"), "{err}");

    let mut settings = Settings::default();
    settings.tools = serde_yaml::from_str(
        "- name: Broken\n  category: content\n  rate_limit_per_minute: 0\n",
    )
    .expect("tools yaml");
    assert!(settings.validate().is_err());
}

#[test]
fn unreadable_and_malformed_files_report_the_path() {
    let dir = tempdir().expect("tempdir");
    let missing = dir.path().join("absent.yaml");
    let err = load_settings(Some(&missing), env_from(&[])).expect_err("missing");
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("absent.yaml"));

    let broken = dir.path().join("broken.yaml");
    fs::write(&broken, "max_candidates: [not, a, number]\n").expect("write");
    let err = load_settings(Some(&broken), env_from(&[])).expect_err("malformed");
    assert!(matches!(err, ConfigError::Parse { .. }));
}
