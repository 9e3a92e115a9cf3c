use super::{default_global_config_path, ConfigError, Settings, CONFIG_PATH_ENV};
use std::path::{Path, PathBuf};

/// Settings from `$SCHOLARIS_CONFIG`, else `~/.scholaris/config.yaml` when it
/// exists, else defaults. Environment overrides are applied before
/// validation.
pub fn load_global_settings() -> Result<Settings, ConfigError> {
    let explicit = std::env::var_os(CONFIG_PATH_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from);
    let path = match explicit {
        Some(path) => Some(path),
        None => match default_global_config_path() {
            Ok(path) if path.is_file() => Some(path),
            Ok(_) | Err(ConfigError::HomeDirectoryUnavailable) => None,
            Err(err) => return Err(err),
        },
    };
    load_settings(path.as_deref(), |key| std::env::var(key).ok())
}

pub fn load_settings<F>(path: Option<&Path>, env: F) -> Result<Settings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let settings = match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading settings");
            Settings::from_path(path)?
        }
        None => Settings::default(),
    };
    let settings = settings.with_env_overrides(env);
    settings.validate()?;
    Ok(settings)
}
