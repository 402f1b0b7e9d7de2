pub mod drive_uploader;
pub mod spreadsheet_reader;

// Re-export commonly used types
pub use drive_uploader::{DocumentMetadata, DriveUploader, MimeKind, UploadContent, UploadError};
pub use spreadsheet_reader::{DataSourceError, SheetHandle, SpreadsheetReader};
