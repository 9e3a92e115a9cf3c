#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Route,
    Orchestrate,
    Ask,
    Health,
    Tools,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "route" => CliVerb::Route,
        "orchestrate" => CliVerb::Orchestrate,
        "ask" => CliVerb::Ask,
        "health" => CliVerb::Health,
        "tools" => CliVerb::Tools,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  route <json|->                       Route a chat request {user_info, chat_history, current_message}"
            .to_string(),
        "  orchestrate <json|->                 Run a named tool {tool, user_input, options}"
            .to_string(),
        "  ask [--user <id>] <message...>       Route a one-off message".to_string(),
        "  tools                                List registered tools".to_string(),
        "  health                               Print service health".to_string(),
        "  help                                 Show this help".to_string(),
    ]
}

pub fn help_text() -> String {
    let mut lines = cli_help_lines();
    lines.push(String::new());
    lines.push("Pass `-` instead of inline JSON to read the request from stdin.".to_string());
    lines.join("\n")
}
