use thiserror::Error;

use crate::domain::DocumentId;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSourceError {
    #[error("the spreadsheet does not exist")]
    NotFound,
    #[error("access to the spreadsheet was denied")]
    AccessDenied,
    #[error("the spreadsheet service could not answer")]
    Transient,
}

impl DataSourceError {
    /// Maps an HTTP status returned by the spreadsheet service to a failure kind.
    pub fn from_status(status: Option<u16>) -> Self {
        match status {
            Some(404) => DataSourceError::NotFound,
            // Sheets answers 400 for identifiers that are not even well-formed.
            Some(400) => DataSourceError::NotFound,
            Some(401) | Some(403) => DataSourceError::AccessDenied,
            _ => DataSourceError::Transient,
        }
    }
}

/// An opened spreadsheet, pointing at its first sheet.
///
/// `sheet_title` is `None` when the document has no sheet at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetHandle {
    pub document_id: DocumentId,
    pub sheet_title: Option<String>,
}

#[async_trait::async_trait]
pub trait SpreadsheetReader: Send + Sync {
    /// Opens the spreadsheet identified by `document_id` and selects its first sheet.
    async fn open_by_identifier(
        &self,
        document_id: &DocumentId,
    ) -> error_stack::Result<SheetHandle, DataSourceError>;

    /// Fetches every cell of the sheet as text, row by row. Rows may have
    /// different lengths.
    async fn get_all_values(
        &self,
        sheet: &SheetHandle,
    ) -> error_stack::Result<Vec<Vec<String>>, DataSourceError>;
}
