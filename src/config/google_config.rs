use std::path::PathBuf;

use super::app_config::require_non_blank;
use super::ConfigurationError;

#[derive(serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GoogleConfig {
    /// JSON key of the service account used for both Sheets and Drive.
    pub service_account_key: PathBuf,
}

impl GoogleConfig {
    pub fn validate(&self) -> error_stack::Result<(), ConfigurationError> {
        require_non_blank(
            "google.service_account_key",
            &self.service_account_key.to_string_lossy(),
        )
    }
}
