//! Registry of the educational tools the router can dispatch to.
//!
//! The catalog is built once and shared read-only. Every lookup goes through
//! [`ToolKey`], so `NoteMaker`, `note_maker` and `NOTE-MAKER` resolve to the
//! same descriptor.

use crate::shared::ToolKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod builtin;

pub use builtin::{BuiltinTool, BUILTIN_TOOLS};

pub const DEFAULT_ENDPOINT_BASE: &str = "http://localhost:9000/mock";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("tool name must be non-empty")]
    EmptyName,
    #[error("rate limit for tool `{name}` must be a positive integer")]
    InvalidRateLimit { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthType {
    #[default]
    None,
    ApiKey,
    Bearer,
    Oauth2,
}

impl AuthType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::ApiKey => "api_key",
            Self::Bearer => "bearer",
            Self::Oauth2 => "oauth2",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "api_key" => Ok(Self::ApiKey),
            "bearer" => Ok(Self::Bearer),
            "oauth2" => Ok(Self::Oauth2),
            _ => Err("auth type must be one of: none, api_key, bearer, oauth2".to_string()),
        }
    }
}

impl std::fmt::Display for AuthType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolCategory {
    Content,
    Assessment,
    Pedagogy,
    Practice,
    Personalization,
    Admin,
    Analytics,
    Social,
    Ops,
}

impl ToolCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Assessment => "assessment",
            Self::Pedagogy => "pedagogy",
            Self::Practice => "practice",
            Self::Personalization => "personalization",
            Self::Admin => "admin",
            Self::Analytics => "analytics",
            Self::Social => "social",
            Self::Ops => "ops",
        }
    }

    /// Admin and analytics tools need bearer tokens; service-to-service
    /// categories use api keys; public educational tools are open.
    pub fn default_auth(self) -> AuthType {
        match self {
            Self::Admin | Self::Analytics => AuthType::Bearer,
            Self::Social | Self::Ops => AuthType::ApiKey,
            _ => AuthType::None,
        }
    }
}

impl std::fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub key: ToolKey,
    pub category: ToolCategory,
    pub endpoint: String,
    pub auth_type: AuthType,
    pub schema_ref: String,
    pub mockable: bool,
    pub rate_limit_per_minute: u32,
}

impl ToolDescriptor {
    pub fn new(
        name: &str,
        category: ToolCategory,
        rate_limit_per_minute: u32,
    ) -> Result<Self, CatalogError> {
        let name = name.trim();
        let key = ToolKey::normalize(name);
        if key.is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if rate_limit_per_minute == 0 {
            return Err(CatalogError::InvalidRateLimit {
                name: name.to_string(),
            });
        }
        Ok(Self {
            name: name.to_string(),
            key,
            category,
            endpoint: default_endpoint(name),
            auth_type: category.default_auth(),
            schema_ref: format!("{name}Input"),
            mockable: true,
            rate_limit_per_minute,
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_auth(mut self, auth_type: AuthType) -> Self {
        self.auth_type = auth_type;
        self
    }

    pub fn with_mockable(mut self, mockable: bool) -> Self {
        self.mockable = mockable;
        self
    }
}

pub fn default_endpoint(name: &str) -> String {
    format!("{DEFAULT_ENDPOINT_BASE}/{}", name.to_lowercase())
}

#[derive(Debug, Clone, Default)]
pub struct ToolCatalog {
    tools: BTreeMap<ToolKey, ToolDescriptor>,
}

impl ToolCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Catalog preloaded with every built-in tool.
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        for tool in BUILTIN_TOOLS {
            if let Ok(descriptor) = tool.descriptor() {
                catalog.insert(descriptor);
            }
        }
        catalog
    }

    pub fn from_descriptors(descriptors: impl IntoIterator<Item = ToolDescriptor>) -> Self {
        let mut catalog = Self::empty();
        for descriptor in descriptors {
            catalog.insert(descriptor);
        }
        catalog
    }

    /// Registers a tool, replacing any existing entry with the same key.
    pub fn register(&mut self, descriptor: ToolDescriptor) -> Result<(), CatalogError> {
        if descriptor.key.is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if descriptor.rate_limit_per_minute == 0 {
            return Err(CatalogError::InvalidRateLimit {
                name: descriptor.name,
            });
        }
        self.insert(descriptor);
        Ok(())
    }

    fn insert(&mut self, descriptor: ToolDescriptor) {
        tracing::debug!(
            tool = %descriptor.name,
            endpoint = %descriptor.endpoint,
            auth = %descriptor.auth_type,
            "registered tool"
        );
        self.tools.insert(descriptor.key.clone(), descriptor);
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.get(ToolKey::normalize(name).as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.values()
    }
}
