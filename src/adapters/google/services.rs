use google_drive3::DriveHub;
use google_sheets4::Sheets;
use tokio::sync::OnceCell;
use tracing::instrument;

use super::drive_uploader::GoogleDriveUploader;
use super::sheets_reader::GoogleSheetsReader;
use super::{auth, http_client};
use crate::config::{ConfigurationError, GoogleConfig};

static SERVICES: OnceCell<GoogleServices> = OnceCell::const_new();

/// Authenticated Sheets and Drive clients sharing one service account.
pub struct GoogleServices {
    pub reader: GoogleSheetsReader,
    pub uploader: GoogleDriveUploader,
}

impl std::fmt::Debug for GoogleServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GoogleServices {{ reader, uploader }}")
    }
}

impl GoogleServices {
    /// Returns the process-wide services, authenticating on the first call.
    ///
    /// Later calls reuse the same credential and ignore `config`.
    pub async fn global(
        config: &GoogleConfig,
    ) -> error_stack::Result<&'static GoogleServices, ConfigurationError> {
        SERVICES
            .get_or_try_init(|| GoogleServices::connect(config))
            .await
    }

    #[instrument(name = "GoogleServices::connect")]
    pub async fn connect(config: &GoogleConfig) -> error_stack::Result<Self, ConfigurationError> {
        let key = auth::read_service_account_key(&config.service_account_key).await?;
        let client = http_client::http_client()?;
        let authenticator = auth::auth(key, client.clone()).await?;

        let sheets = Sheets::new(client.clone(), authenticator.clone());
        let drive = DriveHub::new(client, authenticator);

        Ok(GoogleServices {
            reader: GoogleSheetsReader::new(sheets),
            uploader: GoogleDriveUploader::new(drive),
        })
    }
}
