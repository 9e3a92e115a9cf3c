use super::ConfigError;
use crate::catalog::{AuthType, ToolCatalog, ToolCategory, ToolDescriptor};
use crate::invoker::Credentials;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const MOCK_MODE_ENV: &str = "MOCK_MODE";
pub const AUTO_REGISTER_ENV: &str = "AUTO_REGISTER";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractorKind {
    #[default]
    Heuristic,
    Command,
}

impl ExtractorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Heuristic => "heuristic",
            Self::Command => "command",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExtractorConfig {
    #[serde(default)]
    pub kind: ExtractorKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
}

/// Extra tool registration, or an override of a built-in one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ToolOverride {
    pub name: String,
    pub category: ToolCategory,
    pub rate_limit_per_minute: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<AuthType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mockable: Option<bool>,
}

impl ToolOverride {
    pub fn descriptor(&self) -> Result<ToolDescriptor, ConfigError> {
        let mut descriptor =
            ToolDescriptor::new(&self.name, self.category, self.rate_limit_per_minute)
                .map_err(|err| ConfigError::Settings(err.to_string()))?;
        if let Some(endpoint) = &self.endpoint {
            descriptor = descriptor.with_endpoint(endpoint.clone());
        }
        if let Some(auth_type) = self.auth_type {
            descriptor = descriptor.with_auth(auth_type);
        }
        if let Some(mockable) = self.mockable {
            descriptor = descriptor.with_mockable(mockable);
        }
        Ok(descriptor)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default = "default_true")]
    pub mock_mode: bool,
    #[serde(default = "default_true")]
    pub auto_register: bool,
    #[serde(default = "default_fallback_tool")]
    pub fallback_tool: String,
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
    #[serde(default = "default_extraction_timeout_ms")]
    pub extraction_timeout_ms: u64,
    #[serde(default = "default_tool_timeout_ms")]
    pub tool_timeout_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
    #[serde(default)]
    pub extractor: ExtractorConfig,
    #[serde(default)]
    pub tools: Vec<ToolOverride>,
    #[serde(default)]
    pub credentials: Credentials,
}

fn default_true() -> bool {
    true
}

fn default_fallback_tool() -> String {
    "ConceptExplainer".to_string()
}

fn default_max_candidates() -> usize {
    3
}

fn default_extraction_timeout_ms() -> u64 {
    30_000
}

fn default_tool_timeout_ms() -> u64 {
    10_000
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mock_mode: default_true(),
            auto_register: default_true(),
            fallback_tool: default_fallback_tool(),
            max_candidates: default_max_candidates(),
            extraction_timeout_ms: default_extraction_timeout_ms(),
            tool_timeout_ms: default_tool_timeout_ms(),
            log_filter: None,
            extractor: ExtractorConfig::default(),
            tools: Vec::new(),
            credentials: Credentials::default(),
        }
    }
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// `MOCK_MODE` and `AUTO_REGISTER` win over the file; `TUTOR_*`
    /// credentials win over the `credentials` block.
    pub fn with_env_overrides<F>(mut self, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = env(MOCK_MODE_ENV).and_then(|raw| parse_flag(MOCK_MODE_ENV, &raw)) {
            self.mock_mode = value;
        }
        if let Some(value) =
            env(AUTO_REGISTER_ENV).and_then(|raw| parse_flag(AUTO_REGISTER_ENV, &raw))
        {
            self.auto_register = value;
        }
        self.credentials = self.credentials.with_overrides(&env);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fallback_tool.trim().is_empty() {
            return Err(ConfigError::Settings(
                "`fallback_tool` must be non-empty".to_string(),
            ));
        }
        if self.max_candidates == 0 {
            return Err(ConfigError::Settings(
                "`max_candidates` must be at least 1".to_string(),
            ));
        }
        if self.extraction_timeout_ms == 0 {
            return Err(ConfigError::Settings(
                "`extraction_timeout_ms` must be greater than zero".to_string(),
            ));
        }
        if self.tool_timeout_ms == 0 {
            return Err(ConfigError::Settings(
                "`tool_timeout_ms` must be greater than zero".to_string(),
            ));
        }
        if self.extractor.kind == ExtractorKind::Command
            && self
                .extractor
                .binary
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .is_empty()
        {
            return Err(ConfigError::Settings(
                "`extractor.binary` is required when `extractor.kind` is `command`".to_string(),
            ));
        }
        for tool in &self.tools {
            tool.descriptor()?;
        }
        Ok(())
    }

    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_millis(self.extraction_timeout_ms)
    }

    pub fn tool_timeout(&self) -> Duration {
        Duration::from_millis(self.tool_timeout_ms)
    }

    /// Built-in tools when `auto_register` is on, then every `tools` entry.
    pub fn build_catalog(&self) -> Result<ToolCatalog, ConfigError> {
        let mut catalog = if self.auto_register {
            ToolCatalog::builtin()
        } else {
            ToolCatalog::empty()
        };
        for tool in &self.tools {
            catalog
                .register(tool.descriptor()?)
                .map_err(|err| ConfigError::Settings(err.to_string()))?;
        }
        tracing::info!(tools = catalog.len(), "tool catalog ready");
        Ok(catalog)
    }
}

fn parse_flag(key: &str, raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => {
            tracing::warn!(key, value = raw, "ignoring unrecognized boolean override");
            None
        }
    }
}
