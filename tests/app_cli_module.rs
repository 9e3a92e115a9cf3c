use scholaris::app::cli::{help_text, parse_cli_verb, CliVerb};
use scholaris::app::command_handlers::run_cli_with_settings;
use scholaris::config::Settings;
use serde_json::{json, Value};

fn run(args: &[&str]) -> Result<String, String> {
    run_cli_with_settings(
        args.iter().map(|arg| arg.to_string()).collect(),
        Settings::default(),
    )
}

fn run_json(args: &[&str]) -> Value {
    let output = run(args).expect("command succeeds");
    serde_json::from_str(&output).expect("json output")
}

#[test]
fn verbs_parse_to_commands() {
    assert_eq!(parse_cli_verb("route"), CliVerb::Route);
    assert_eq!(parse_cli_verb("orchestrate"), CliVerb::Orchestrate);
    assert_eq!(parse_cli_verb("ask"), CliVerb::Ask);
    assert_eq!(parse_cli_verb("--help"), CliVerb::Help);
    assert_eq!(parse_cli_verb("deploy"), CliVerb::Unknown);
}

#[test]
fn help_health_and_unknown() {
    assert_eq!(run(&[]).expect("help"), help_text());
    assert!(run(&["help"]).expect("help").contains("orchestrate <json|->"));
    assert_eq!(run_json(&["health"]), json!({"status": "ok"}));
    assert_eq!(
        run(&["deploy"]).expect_err("unknown"),
        "unknown command `deploy`"
    );
}

#[test]
fn route_runs_the_full_workflow() {
    let response = run_json(&[
        "route",
        r#"{"user_info":{"user_id":"u1"},"current_message":"I need notes about gravity in outline format"}"#,
    ]);
    assert_eq!(response["status"], json!("ok"));
    assert_eq!(response["meta"]["stage"], json!("completed"));
    assert_eq!(response["meta"]["tool"], json!("NoteMaker"));
    assert_eq!(response["meta"]["endpoint"], json!("mock://local"));
    assert!(response["data"]["notes"].is_object());
}

#[test]
fn route_rejects_bad_json_and_missing_input() {
    let err = run(&["route", "{not json"]).expect_err("invalid json");
    assert!(err.starts_with("invalid request json"), "{err}");
    assert_eq!(
        run(&["route"]).expect_err("usage"),
        "usage: route <json|->"
    );

    let response = run_json(&["route", r#"{"current_message":"   "}"#]);
    assert_eq!(response["status"], json!("error"));
    assert_eq!(response["meta"]["stage"], json!("workflow_error"));
    assert_eq!(response["meta"]["error_type"], json!("InvalidRequest"));
}

#[test]
fn ask_asks_for_missing_fields() {
    let response = run_json(&["ask", "--user", "u9", "Make", "5", "flashcards"]);
    assert_eq!(response["status"], json!("ok"));
    assert_eq!(response["data"], Value::Null);
    assert_eq!(response["meta"]["stage"], json!("parameter_validation"));
    assert_eq!(response["meta"]["missing_required"], json!(["topic"]));
    assert!(response["clarifying_question"].is_string());

    assert_eq!(
        run(&["ask", "--user"]).expect_err("missing value"),
        "`--user` requires a value"
    );
    assert!(run(&["ask"]).is_err());
}

#[test]
fn orchestrate_runs_a_named_tool() {
    let response = run_json(&[
        "orchestrate",
        r#"{"tool":"ConceptExplainer","user_input":"recursion","options":{"level":"beginner"}}"#,
    ]);
    assert_eq!(response["status"], json!("ok"));
    assert_eq!(response["meta"]["stage"], json!("completed"));
    assert_eq!(response["meta"]["tool"], json!("ConceptExplainer"));
    assert_eq!(response["data"]["input_echo"]["topic"], json!("recursion"));
    assert_eq!(response["data"]["input_echo"]["level"], json!("beginner"));
    assert_eq!(response["data"]["input_echo"]["include_practice"], json!(false));
}

#[test]
fn tools_lists_the_catalog() {
    let tools = run_json(&["tools"]);
    let tools = tools.as_array().expect("array");
    assert_eq!(tools.len(), scholaris::catalog::ToolCatalog::builtin().len());
    let notes = tools
        .iter()
        .find(|tool| tool["name"] == json!("NoteMaker"))
        .expect("notes listed");
    assert_eq!(notes["category"], json!("content"));
    assert_eq!(notes["auth_type"], json!("none"));
}

#[test]
fn empty_catalog_surfaces_unknown_tool_errors() {
    let settings = Settings {
        auto_register: false,
        ..Settings::default()
    };
    let output = run_cli_with_settings(
        vec![
            "ask".to_string(),
            "I need notes about gravity in outline format".to_string(),
        ],
        settings,
    )
    .expect("ask");
    let response: Value = serde_json::from_str(&output).expect("json");
    assert_eq!(response["status"], json!("error"));
    assert_eq!(response["meta"]["stage"], json!("error"));
    assert_eq!(response["error"], json!("Unknown tool: NoteMaker"));
}
