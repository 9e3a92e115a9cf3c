use crate::catalog::AuthType;
use crate::invoker::InvokerError;
use serde::{Deserialize, Serialize};

pub const API_KEY_ENV: &str = "TUTOR_API_KEY";
pub const BEARER_TOKEN_ENV: &str = "TUTOR_BEARER_TOKEN";
pub const OAUTH_TOKEN_ENV: &str = "TUTOR_OAUTH_TOKEN";

/// Secrets for non-mock tool backends.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth_token: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mask = |value: &Option<String>| value.as_ref().map(|_| "***");
        f.debug_struct("Credentials")
            .field("api_key", &mask(&self.api_key))
            .field("bearer_token", &mask(&self.bearer_token))
            .field("oauth_token", &mask(&self.oauth_token))
            .finish()
    }
}

impl Credentials {
    /// Non-empty `TUTOR_*` variables replace configured values.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(value) = read(API_KEY_ENV) {
            self.api_key = Some(value);
        }
        if let Some(value) = read(BEARER_TOKEN_ENV) {
            self.bearer_token = Some(value);
        }
        if let Some(value) = read(OAUTH_TOKEN_ENV) {
            self.oauth_token = Some(value);
        }
        self
    }
}

/// Request headers for `auth_type`. `Content-Type` is always present.
pub fn auth_headers(
    auth_type: AuthType,
    credentials: &Credentials,
) -> Result<Vec<(String, String)>, InvokerError> {
    let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
    match auth_type {
        AuthType::None => {}
        AuthType::ApiKey => {
            let key = require(&credentials.api_key, auth_type, API_KEY_ENV)?;
            headers.push(("X-API-Key".to_string(), key.to_string()));
        }
        AuthType::Bearer => {
            let token = require(&credentials.bearer_token, auth_type, BEARER_TOKEN_ENV)?;
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }
        AuthType::Oauth2 => {
            let token = require(&credentials.oauth_token, auth_type, OAUTH_TOKEN_ENV)?;
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }
    }
    Ok(headers)
}

fn require<'a>(
    value: &'a Option<String>,
    auth_type: AuthType,
    env_var: &'static str,
) -> Result<&'a str, InvokerError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(InvokerError::MissingCredential { auth_type, env_var })
}
