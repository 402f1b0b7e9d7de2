use std::path::Path;

use config::{Config, Environment};
use error_stack::{report, Report, ResultExt};
use serde::de::DeserializeOwned;
use tracing::instrument;

use super::{ConfigurationError, ExportConfig, GoogleConfig};

pub const DEFAULT_CONFIG_PATH: &str = "Config";
pub const ENV_PREFIX: &str = "SHEET_EXPORT";

#[derive(serde::Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub google: GoogleConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl AppConfig {
    pub fn validate(&self) -> error_stack::Result<(), ConfigurationError> {
        self.google.validate()?;
        self.export.validate()
    }

    /// Loads the configuration file named by `CONFIG_PATH` (default `Config`),
    /// with `SHEET_EXPORT__SECTION__KEY` environment overrides.
    pub fn load() -> error_stack::Result<Self, ConfigurationError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&config_path))
    }

    pub fn load_from(config_path: &Path) -> error_stack::Result<Self, ConfigurationError> {
        Self::load_with_environment(config_path, Self::environment())
    }

    /// Environment overrides are kept as strings: numeric settings parse
    /// them on their own, and identifiers made of digits stay text.
    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX).separator("__")
    }

    #[instrument(name = "AppConfig::load", skip(environment))]
    fn load_with_environment(
        config_path: &Path,
        environment: Environment,
    ) -> error_stack::Result<Self, ConfigurationError> {
        let path_str = config_path.to_string_lossy().into_owned();

        let config = Config::builder()
            .add_source(config::File::with_name(&path_str).required(false))
            .add_source(environment)
            .build()
            .change_context_lazy(|| ConfigurationError::Unreadable(path_str.clone()))?;

        let value = config
            .try_deserialize::<serde_json::Value>()
            .change_context_lazy(|| ConfigurationError::Unreadable(path_str.clone()))?;

        let app_config: AppConfig = deserialize_tracked(value)
            .attach_printable_lazy(|| format!("Config file: {}", path_str))?;
        app_config.validate()?;

        tracing::debug!(
            target_folder_id = %app_config.export.target_folder_id,
            columns = app_config.export.columns.len(),
            "Configuration loaded"
        );
        Ok(app_config)
    }
}

/// Deserializes `value`, reporting the path of the first offending field.
pub(crate) fn deserialize_tracked<T: DeserializeOwned>(
    value: serde_json::Value,
) -> error_stack::Result<T, ConfigurationError> {
    serde_path_to_error::deserialize(value).map_err(|err| {
        let path = err.path().to_string();
        let reason = err.into_inner().to_string();
        Report::new(ConfigurationError::InvalidField(path)).attach_printable(reason)
    })
}

/// Fails unless `value` is non-blank.
pub(crate) fn require_non_blank(
    field: &str,
    value: &str,
) -> error_stack::Result<(), ConfigurationError> {
    if value.trim().is_empty() {
        return Err(report!(ConfigurationError::InvalidField(field.to_string())))
            .attach_printable("Value must not be empty");
    }
    Ok(())
}
