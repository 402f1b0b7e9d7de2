pub mod app_config;
pub mod export_config;
pub mod google_config;

use thiserror::Error;

pub use app_config::AppConfig;
pub use export_config::ExportConfig;
pub use google_config::GoogleConfig;

/// Problems with the configuration or the service account secret. Always fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("could not read configuration '{0}'")]
    Unreadable(String),
    #[error("invalid configuration at '{0}'")]
    InvalidField(String),
    #[error("could not read the service account key at '{0}'")]
    SecretUnreadable(String),
    #[error("service account key field '{0}' is missing or malformed")]
    MalformedSecret(String),
    #[error("could not build the Google authenticator")]
    Authenticator,
    #[error("could not load the TLS root certificates")]
    TlsRoots,
}
