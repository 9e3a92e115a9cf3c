use crate::orchestration::state::ChatMessage;
use crate::provider::output_parse::parse_json_object;
use crate::provider::runner::{run_command, CommandSpec};
use crate::provider::{ExtractionBackend, ExtractionRequest, ProviderError, StructuredBackend};
use crate::schema::SchemaDescriptor;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum CommandPayload<'a> {
    Extract {
        message: &'a str,
        history: &'a [ChatMessage],
        user_info: &'a Map<String, Value>,
        options: &'a Map<String, Value>,
    },
    GenerateStructured {
        tool: &'a str,
        schema: &'a SchemaDescriptor,
        user_input: &'a str,
        options: &'a Map<String, Value>,
    },
}

/// Extraction delegated to an external program.
///
/// The program receives one JSON request on stdin (`kind` is `extract` or
/// `generate_structured`) and must print one JSON object on stdout.
#[derive(Debug, Clone)]
pub struct CommandBackend {
    binary: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    env_overrides: BTreeMap<String, String>,
    timeout: Duration,
}

impl CommandBackend {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            args: Vec::new(),
            cwd: None,
            env_overrides: BTreeMap::new(),
            timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_overrides.insert(key.into(), value.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn spec(&self, timeout: Option<Duration>) -> CommandSpec {
        CommandSpec {
            binary: self.binary.clone(),
            args: self.args.clone(),
            cwd: self.cwd.clone(),
            env_overrides: self.env_overrides.clone(),
            timeout: timeout.unwrap_or(self.timeout),
        }
    }

    fn call(
        &self,
        payload: &CommandPayload<'_>,
        timeout: Option<Duration>,
    ) -> Result<Value, ProviderError> {
        let stdin = serde_json::to_string(payload).map_err(|err| ProviderError::ParseFailure {
            reason: format!("failed to encode request: {err}"),
        })?;
        let spec = self.spec(timeout);
        tracing::debug!(command = %spec.command_form(), "running extraction command");
        let output = run_command(&spec, &stdin)?;
        tracing::debug!(
            command = %spec.command_form(),
            elapsed_ms = output.elapsed.as_millis() as u64,
            "extraction command finished"
        );
        parse_json_object(&output.stdout).map(Value::Object)
    }
}

impl ExtractionBackend for CommandBackend {
    fn name(&self) -> &str {
        &self.binary
    }

    fn extract(&self, request: &ExtractionRequest) -> Result<Value, ProviderError> {
        let payload = CommandPayload::Extract {
            message: &request.message,
            history: &request.history,
            user_info: &request.user_info,
            options: &request.options,
        };
        self.call(&payload, request.timeout)
    }
}

impl StructuredBackend for CommandBackend {
    fn generate_structured(
        &self,
        tool: &str,
        schema: &SchemaDescriptor,
        user_input: &str,
        options: &Map<String, Value>,
    ) -> Result<Value, ProviderError> {
        self.call(
            &CommandPayload::GenerateStructured {
                tool,
                schema,
                user_input,
                options,
            },
            None,
        )
    }
}
