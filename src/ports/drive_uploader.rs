use std::io::{Read, Seek};

use thiserror::Error;

use crate::domain::DocumentId;

pub const NATIVE_SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadError {
    #[error("the storage quota or rate limit was exceeded")]
    QuotaExceeded,
    #[error("permission to write into the folder was denied")]
    PermissionDenied,
    #[error("the target folder does not exist")]
    InvalidFolder,
    #[error("the upload was rejected")]
    Rejected,
}

impl UploadError {
    /// Maps an HTTP status and the first error reason reported by the storage
    /// service to a failure kind.
    pub fn from_status(status: Option<u16>, reason: Option<&str>) -> Self {
        match (status, reason) {
            (_, Some("storageQuotaExceeded" | "userRateLimitExceeded" | "rateLimitExceeded"))
            | (Some(429), _) => UploadError::QuotaExceeded,
            (Some(404), _) => UploadError::InvalidFolder,
            (Some(401) | Some(403), _) => UploadError::PermissionDenied,
            _ => UploadError::Rejected,
        }
    }
}

/// Kind of document the storage service should create from the uploaded bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MimeKind {
    NativeSpreadsheet,
}

impl MimeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MimeKind::NativeSpreadsheet => NATIVE_SPREADSHEET_MIME,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMetadata {
    pub name: String,
    pub mime_kind: MimeKind,
    pub parent_folder_id: String,
}

/// Bytes of the document to upload, readable from the start and rewindable
/// so an interrupted upload can resume.
pub trait UploadContent: Read + Seek + Send {}

impl<T: Read + Seek + Send> UploadContent for T {}

#[async_trait::async_trait]
pub trait DriveUploader: Send + Sync {
    /// Creates a document described by `metadata` whose initial content is
    /// the CSV held in `content`, and returns its identifier.
    async fn create_document(
        &self,
        metadata: &DocumentMetadata,
        content: Box<dyn UploadContent>,
    ) -> error_stack::Result<DocumentId, UploadError>;
}
