use std::io::Read;
use std::sync::Mutex;

use error_stack::report;

use crate::domain::DocumentId;
use crate::ports::drive_uploader::{DocumentMetadata, DriveUploader, UploadContent, UploadError};
use crate::ports::spreadsheet_reader::{DataSourceError, SheetHandle, SpreadsheetReader};

pub(crate) fn raw_rows(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

/// In-memory reader serving a single fixed sheet.
pub(crate) struct FakeReader {
    rows: Vec<Vec<String>>,
    has_sheet: bool,
    open_error: Option<DataSourceError>,
    read_error: Option<DataSourceError>,
    opened: Mutex<Vec<DocumentId>>,
}

impl FakeReader {
    pub fn with_rows(rows: &[&[&str]]) -> Self {
        FakeReader {
            rows: raw_rows(rows),
            has_sheet: true,
            open_error: None,
            read_error: None,
            opened: Mutex::new(Vec::new()),
        }
    }

    pub fn without_sheet() -> Self {
        FakeReader {
            has_sheet: false,
            ..FakeReader::with_rows(&[])
        }
    }

    pub fn failing_open(error: DataSourceError) -> Self {
        FakeReader {
            open_error: Some(error),
            ..FakeReader::with_rows(&[])
        }
    }

    pub fn failing_read(error: DataSourceError) -> Self {
        FakeReader {
            read_error: Some(error),
            ..FakeReader::with_rows(&[])
        }
    }

    pub fn opened(&self) -> Vec<DocumentId> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SpreadsheetReader for FakeReader {
    async fn open_by_identifier(
        &self,
        document_id: &DocumentId,
    ) -> error_stack::Result<SheetHandle, DataSourceError> {
        self.opened.lock().unwrap().push(document_id.clone());
        if let Some(error) = self.open_error {
            return Err(report!(error));
        }
        Ok(SheetHandle {
            document_id: document_id.clone(),
            sheet_title: self.has_sheet.then(|| "Feuille 1".to_string()),
        })
    }

    async fn get_all_values(
        &self,
        sheet: &SheetHandle,
    ) -> error_stack::Result<Vec<Vec<String>>, DataSourceError> {
        if let Some(error) = self.read_error {
            return Err(report!(error));
        }
        if sheet.sheet_title.is_none() {
            return Ok(Vec::new());
        }
        Ok(self.rows.clone())
    }
}

/// One call received by [`FakeUploader`], with the uploaded bytes.
#[derive(Debug, Clone)]
pub(crate) struct Upload {
    pub metadata: DocumentMetadata,
    pub content: String,
}

/// Uploader that keeps every upload in memory.
pub(crate) struct FakeUploader {
    error: Option<UploadError>,
    uploads: Mutex<Vec<Upload>>,
}

impl FakeUploader {
    pub fn new() -> Self {
        FakeUploader {
            error: None,
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: UploadError) -> Self {
        FakeUploader {
            error: Some(error),
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn uploads(&self) -> Vec<Upload> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DriveUploader for FakeUploader {
    async fn create_document(
        &self,
        metadata: &DocumentMetadata,
        mut content: Box<dyn UploadContent>,
    ) -> error_stack::Result<DocumentId, UploadError> {
        let mut text = String::new();
        content.read_to_string(&mut text).unwrap();

        let mut uploads = self.uploads.lock().unwrap();
        uploads.push(Upload {
            metadata: metadata.clone(),
            content: text,
        });

        if let Some(error) = self.error {
            return Err(report!(error));
        }
        Ok(DocumentId::new(format!("created-{}", uploads.len())))
    }
}
