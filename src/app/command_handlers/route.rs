use crate::app::command_support::{read_request, to_pretty_json, AppContext};
use crate::orchestration::{DirectToolRequest, OrchestratorRequest};
use serde_json::{Map, Value};

pub const DEFAULT_CLI_USER: &str = "cli-user";

pub fn cmd_route(context: &AppContext, args: &[String]) -> Result<String, String> {
    let request: OrchestratorRequest = read_request(args, "route <json|->")?;
    to_pretty_json(&context.coordinator.run(request))
}

pub fn cmd_orchestrate(context: &AppContext, args: &[String]) -> Result<String, String> {
    let request: DirectToolRequest = read_request(args, "orchestrate <json|->")?;
    to_pretty_json(&context.coordinator.run_direct(request))
}

pub fn cmd_ask(context: &AppContext, args: &[String]) -> Result<String, String> {
    let mut user_id = DEFAULT_CLI_USER.to_string();
    let mut words = Vec::new();
    let mut index = 0;
    while index < args.len() {
        if args[index] == "--user" {
            let value = args
                .get(index + 1)
                .ok_or_else(|| "`--user` requires a value".to_string())?;
            user_id = value.clone();
            index += 2;
            continue;
        }
        words.push(args[index].as_str());
        index += 1;
    }
    if words.is_empty() {
        return Err("usage: ask [--user <id>] <message...>".to_string());
    }

    let mut user_info = Map::new();
    user_info.insert("user_id".to_string(), Value::String(user_id));
    let request = OrchestratorRequest::new(words.join(" ")).with_user_info(user_info);
    to_pretty_json(&context.coordinator.run(request))
}
