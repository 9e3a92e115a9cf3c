use crate::app::cli::{help_text, parse_cli_verb, CliVerb};
use crate::app::command_support::build_context;
use crate::config::{load_global_settings, Settings};
use crate::shared::logging::init_tracing;

pub mod route;
pub mod tools;

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    if args.is_empty() {
        return Ok(help_text());
    }
    match parse_cli_verb(args[0].as_str()) {
        CliVerb::Help => return Ok(help_text()),
        CliVerb::Health => return tools::cmd_health(),
        CliVerb::Unknown => return Err(format!("unknown command `{}`", args[0])),
        _ => {}
    }

    let settings = load_global_settings().map_err(|err| err.to_string())?;
    init_tracing(settings.log_filter.as_deref());
    run_cli_with_settings(args, settings)
}

/// Same as [`run_cli`] with settings supplied by the caller.
pub fn run_cli_with_settings(args: Vec<String>, settings: Settings) -> Result<String, String> {
    if args.is_empty() {
        return Ok(help_text());
    }

    let verb = parse_cli_verb(args[0].as_str());
    match verb {
        CliVerb::Help => return Ok(help_text()),
        CliVerb::Health => return tools::cmd_health(),
        CliVerb::Unknown => return Err(format!("unknown command `{}`", args[0])),
        _ => {}
    }

    let context = build_context(settings)?;
    match verb {
        CliVerb::Route => route::cmd_route(&context, &args[1..]),
        CliVerb::Orchestrate => route::cmd_orchestrate(&context, &args[1..]),
        CliVerb::Ask => route::cmd_ask(&context, &args[1..]),
        CliVerb::Tools => tools::cmd_tools(&context),
        CliVerb::Health | CliVerb::Help | CliVerb::Unknown => Ok(help_text()),
    }
}
