use error_stack::{report, Report, ResultExt};
use google_drive3::api::File as DriveFile;
use google_drive3::DriveHub;
use tracing::{info, instrument};

use super::api_failure::ApiFailure;
use super::http_client::HttpsConnector;
use crate::domain::DocumentId;
use crate::ports::drive_uploader::{DocumentMetadata, DriveUploader, UploadContent, UploadError};

pub struct GoogleDriveUploader {
    hub: DriveHub<HttpsConnector>,
}

impl std::fmt::Debug for GoogleDriveUploader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GoogleDriveUploader")
    }
}

impl GoogleDriveUploader {
    pub fn new(hub: DriveHub<HttpsConnector>) -> Self {
        GoogleDriveUploader { hub }
    }
}

fn api_failure(error: &google_drive3::Error) -> ApiFailure {
    match error {
        google_drive3::Error::Failure(response) => ApiFailure::from_status(response.status().as_u16()),
        google_drive3::Error::BadRequest(body) => ApiFailure::from_json(body),
        _ => ApiFailure::default(),
    }
}

fn upload_report(error: google_drive3::Error) -> Report<UploadError> {
    let failure = api_failure(&error);
    let kind = UploadError::from_status(failure.status, failure.reason.as_deref());
    Report::new(error)
        .attach_printable(failure.to_string())
        .change_context(kind)
}

fn request_for(metadata: &DocumentMetadata) -> DriveFile {
    DriveFile {
        name: Some(metadata.name.clone()),
        mime_type: Some(metadata.mime_kind.as_str().to_string()),
        parents: Some(vec![metadata.parent_folder_id.clone()]),
        ..DriveFile::default()
    }
}

#[async_trait::async_trait]
impl DriveUploader for GoogleDriveUploader {
    #[instrument(skip(self, content))]
    async fn create_document(
        &self,
        metadata: &DocumentMetadata,
        content: Box<dyn UploadContent>,
    ) -> error_stack::Result<DocumentId, UploadError> {
        let (_, created) = self
            .hub
            .files()
            .create(request_for(metadata))
            .supports_all_drives(true)
            .param("fields", "id")
            .upload_resumable(content, mime::TEXT_CSV)
            .await
            .map_err(upload_report)
            .attach_printable_lazy(|| format!("Parent folder: {}", metadata.parent_folder_id))?;

        let id = created
            .id
            .ok_or_else(|| report!(UploadError::Rejected))
            .attach_printable("Drive did not return the id of the created file")?;

        info!(%id, name = %metadata.name, "Drive file created");
        Ok(DocumentId::new(id))
    }
}
