use crate::app::command_support::{to_pretty_json, AppContext};
use serde_json::json;

pub fn cmd_health() -> Result<String, String> {
    Ok(json!({"status": "ok"}).to_string())
}

pub fn cmd_tools(context: &AppContext) -> Result<String, String> {
    let tools: Vec<_> = context
        .catalog
        .iter()
        .map(|tool| {
            json!({
                "name": tool.name,
                "category": tool.category,
                "auth_type": tool.auth_type,
                "endpoint": tool.endpoint,
                "mockable": tool.mockable,
                "rate_limit_per_minute": tool.rate_limit_per_minute,
            })
        })
        .collect();
    to_pretty_json(&tools)
}
