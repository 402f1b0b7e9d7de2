use std::path::Path;

use error_stack::{report, ResultExt};
use google_sheets4::hyper;
use google_sheets4::oauth2::{self, authenticator::Authenticator};
use serde_json::Value;
use tracing::{info, instrument};

use super::http_client::HttpsConnector;
use crate::config::app_config::deserialize_tracked;
use crate::config::ConfigurationError;

pub const SPREADSHEETS_READONLY_SCOPE: &str =
    "https://www.googleapis.com/auth/spreadsheets.readonly";
pub const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive";

const SERVICE_ACCOUNT_TYPE: &str = "service_account";
const DEFAULT_UNIVERSE_DOMAIN: &str = "googleapis.com";

/// Keys every service account secret must carry as non-empty strings.
const REQUIRED_KEYS: [&str; 10] = [
    "type",
    "project_id",
    "private_key_id",
    "private_key",
    "client_email",
    "client_id",
    "auth_uri",
    "token_uri",
    "auth_provider_x509_cert_url",
    "client_x509_cert_url",
];

fn default_universe_domain() -> String {
    DEFAULT_UNIVERSE_DOMAIN.to_string()
}

/// Validated content of a service account JSON key.
#[derive(serde::Deserialize, Clone)]
pub struct ServiceAccountSecret {
    #[serde(rename = "type")]
    pub key_type: String,
    pub project_id: String,
    pub private_key_id: String,
    pub private_key: String,
    pub client_email: String,
    pub client_id: String,
    pub auth_uri: String,
    pub token_uri: String,
    pub auth_provider_x509_cert_url: String,
    pub client_x509_cert_url: String,
    #[serde(default = "default_universe_domain")]
    pub universe_domain: String,
}

impl std::fmt::Debug for ServiceAccountSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountSecret")
            .field("project_id", &self.project_id)
            .field("private_key_id", &self.private_key_id)
            .field("client_email", &self.client_email)
            .field("universe_domain", &self.universe_domain)
            .finish_non_exhaustive()
    }
}

fn malformed(field: &str) -> error_stack::Report<ConfigurationError> {
    report!(ConfigurationError::MalformedSecret(field.to_string()))
}

impl ServiceAccountSecret {
    /// Parses and checks a service account JSON key.
    ///
    /// Returns the secret together with the key in the form the OAuth flow expects.
    pub fn parse(
        raw: &[u8],
    ) -> error_stack::Result<(Self, oauth2::ServiceAccountKey), ConfigurationError> {
        let value: Value = serde_json::from_slice(raw)
            .map_err(|err| malformed("<document>").attach_printable(err.to_string()))?;

        for key in REQUIRED_KEYS {
            let present = value
                .get(key)
                .and_then(Value::as_str)
                .is_some_and(|text| !text.trim().is_empty());
            if !present {
                return Err(malformed(key));
            }
        }

        let secret: ServiceAccountSecret = deserialize_tracked(value.clone())
            .change_context_lazy(|| ConfigurationError::MalformedSecret("universe_domain".into()))?;
        secret.check()?;

        let key: oauth2::ServiceAccountKey = serde_json::from_value(value)
            .map_err(|err| malformed("<document>").attach_printable(err.to_string()))?;

        Ok((secret, key))
    }

    fn check(&self) -> error_stack::Result<(), ConfigurationError> {
        if self.key_type != SERVICE_ACCOUNT_TYPE {
            return Err(malformed("type"))
                .attach_printable_lazy(|| format!("Expected '{}'", SERVICE_ACCOUNT_TYPE));
        }
        if !self.private_key.contains("PRIVATE KEY-----") {
            return Err(malformed("private_key")).attach_printable("Expected a PEM private key");
        }
        if !self.client_email.contains('@') {
            return Err(malformed("client_email"));
        }
        for (field, uri) in [
            ("auth_uri", &self.auth_uri),
            ("token_uri", &self.token_uri),
            ("auth_provider_x509_cert_url", &self.auth_provider_x509_cert_url),
            ("client_x509_cert_url", &self.client_x509_cert_url),
        ] {
            if !uri.starts_with("https://") {
                return Err(malformed(field)).attach_printable("Expected an https URL");
            }
        }
        Ok(())
    }
}

/// Reads and validates the service account key stored at `path`.
#[instrument]
pub async fn read_service_account_key(
    path: &Path,
) -> error_stack::Result<oauth2::ServiceAccountKey, ConfigurationError> {
    let raw = tokio::fs::read(path)
        .await
        .change_context_lazy(|| {
            ConfigurationError::SecretUnreadable(path.to_string_lossy().into_owned())
        })?;

    let (secret, key) = ServiceAccountSecret::parse(&raw)
        .attach_printable_lazy(|| format!("Key file: {}", path.display()))?;
    info!(client_email = %secret.client_email, project_id = %secret.project_id, "Service account key loaded");
    Ok(key)
}

/// Builds the authenticator and fetches a first token so a revoked or
/// mistyped key is caught before any pipeline step runs.
pub async fn auth(
    key: oauth2::ServiceAccountKey,
    client: hyper::Client<HttpsConnector>,
) -> error_stack::Result<Authenticator<HttpsConnector>, ConfigurationError> {
    let authenticator = oauth2::ServiceAccountAuthenticator::with_client(key, client.clone())
        .build()
        .await
        .change_context(ConfigurationError::Authenticator)?;

    authenticator
        .token(&[SPREADSHEETS_READONLY_SCOPE, DRIVE_SCOPE])
        .await
        .change_context(ConfigurationError::Authenticator)
        .attach_printable("The service account could not obtain an access token")?;

    Ok(authenticator)
}
