//! Tool invocation: catalog lookup, rate limiting, then a mock or an HTTP call.

use crate::catalog::{AuthType, ToolCatalog, ToolDescriptor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub mod auth;
pub mod http;
pub mod mock;
pub mod rate_limit;

pub use auth::{auth_headers, Credentials};
pub use mock::{mock_data, MOCK_ENDPOINT};
pub use rate_limit::RateLimiter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Error,
}

impl std::fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvokeErrorCode {
    UnknownTool,
    RateLimited,
    ExecutionError,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvokeMeta {
    pub tool: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub duration_s: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<InvokeErrorCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mock: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit_per_minute: Option<u32>,
}

impl InvokeMeta {
    pub fn new(tool: &str) -> Self {
        Self {
            tool: tool.to_string(),
            endpoint: None,
            duration_s: 0.0,
            error_code: None,
            mock: None,
            rate_limit_per_minute: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResponse {
    pub status: ResponseStatus,
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub meta: InvokeMeta,
}

impl ToolResponse {
    pub fn ok(data: Value, meta: InvokeMeta) -> Self {
        Self {
            status: ResponseStatus::Ok,
            data: Some(data),
            error: None,
            meta,
        }
    }

    pub fn failed(error: &InvokerError, mut meta: InvokeMeta) -> Self {
        meta.error_code = Some(error.code());
        Self {
            status: ResponseStatus::Error,
            data: None,
            error: Some(error.to_string()),
            meta,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ResponseStatus::Ok
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvokerError {
    #[error("Unknown tool: {tool}")]
    UnknownTool { tool: String },
    #[error("Rate limit exceeded for tool: {tool}")]
    RateLimited { tool: String, rate_limit_per_minute: u32 },
    #[error("missing {auth_type} credential; set {env_var}")]
    MissingCredential {
        auth_type: AuthType,
        env_var: &'static str,
    },
    #[error("{0}")]
    Http(String),
}

impl InvokerError {
    pub fn code(&self) -> InvokeErrorCode {
        match self {
            Self::UnknownTool { .. } => InvokeErrorCode::UnknownTool,
            Self::RateLimited { .. } => InvokeErrorCode::RateLimited,
            Self::MissingCredential { .. } | Self::Http(_) => InvokeErrorCode::ExecutionError,
        }
    }
}

/// Calls a named tool with an already validated payload. Failures come back
/// as `status: error` responses, never as panics or `Err`.
pub trait ToolInvoker: Send + Sync {
    fn invoke(&self, tool: &str, payload: &Map<String, Value>, timeout: Option<Duration>)
        -> ToolResponse;
}

#[derive(Debug)]
pub struct CatalogToolInvoker {
    catalog: Arc<ToolCatalog>,
    limiter: RateLimiter,
    mock_mode: bool,
    credentials: Credentials,
}

impl CatalogToolInvoker {
    pub fn new(catalog: Arc<ToolCatalog>) -> Self {
        Self {
            catalog,
            limiter: RateLimiter::new(),
            mock_mode: true,
            credentials: Credentials::default(),
        }
    }

    pub fn with_mock_mode(mut self, mock_mode: bool) -> Self {
        self.mock_mode = mock_mode;
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    fn call(
        &self,
        descriptor: &ToolDescriptor,
        tool: &str,
        payload: &Map<String, Value>,
        timeout: Option<Duration>,
    ) -> Result<(Value, InvokeMeta), InvokerError> {
        let mut meta = InvokeMeta::new(tool);
        if self.mock_mode || descriptor.mockable {
            meta.endpoint = Some(MOCK_ENDPOINT.to_string());
            meta.mock = Some(true);
            return Ok((mock_data(tool, payload), meta));
        }

        let headers = auth_headers(descriptor.auth_type, &self.credentials)?;
        let body = http::post_json(&descriptor.endpoint, &headers, payload, timeout)?;
        meta.endpoint = Some(descriptor.endpoint.clone());
        Ok((body, meta))
    }
}

impl ToolInvoker for CatalogToolInvoker {
    fn invoke(
        &self,
        tool: &str,
        payload: &Map<String, Value>,
        timeout: Option<Duration>,
    ) -> ToolResponse {
        let started = Instant::now();

        let Some(descriptor) = self.catalog.get(tool) else {
            tracing::warn!(tool, "unknown tool");
            let error = InvokerError::UnknownTool {
                tool: tool.to_string(),
            };
            return ToolResponse::failed(&error, InvokeMeta::new(tool));
        };

        if !self
            .limiter
            .try_acquire(&descriptor.key, descriptor.rate_limit_per_minute)
        {
            tracing::warn!(tool, limit = descriptor.rate_limit_per_minute, "rate limited");
            let error = InvokerError::RateLimited {
                tool: tool.to_string(),
                rate_limit_per_minute: descriptor.rate_limit_per_minute,
            };
            let mut meta = InvokeMeta::new(tool);
            meta.rate_limit_per_minute = Some(descriptor.rate_limit_per_minute);
            return ToolResponse::failed(&error, meta);
        }

        match self.call(descriptor, tool, payload, timeout) {
            Ok((data, mut meta)) => {
                meta.duration_s = started.elapsed().as_secs_f64();
                tracing::debug!(tool, duration_s = meta.duration_s, "tool call succeeded");
                ToolResponse::ok(data, meta)
            }
            Err(error) => {
                tracing::error!(tool, error = %error, "tool call failed");
                let mut meta = InvokeMeta::new(tool);
                meta.endpoint = Some(descriptor.endpoint.clone());
                meta.duration_s = started.elapsed().as_secs_f64();
                ToolResponse::failed(&error, meta)
            }
        }
    }
}
