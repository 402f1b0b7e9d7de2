use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

use error_stack::{Report, ResultExt};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::domain::{DocumentId, Table};
use crate::ports::drive_uploader::{DocumentMetadata, DriveUploader, MimeKind, UploadError};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportError {
    #[error("could not serialize the table")]
    Serialization,
    #[error("the upload was rejected by the storage service")]
    Rejected,
    #[error("the target folder does not exist or is not writable")]
    FolderUnavailable,
    #[error("the storage quota was exceeded")]
    QuotaExceeded,
}

impl From<UploadError> for ExportError {
    fn from(error: UploadError) -> Self {
        match error {
            UploadError::QuotaExceeded => ExportError::QuotaExceeded,
            UploadError::PermissionDenied | UploadError::InvalidFolder => {
                ExportError::FolderUnavailable
            }
            UploadError::Rejected => ExportError::Rejected,
        }
    }
}

/// Writes `table` as CSV: one header line, then one line per row.
pub fn write_csv<W: Write>(table: &Table, writer: W) -> csv::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    if table.column_count() > 0 {
        writer.write_record(table.headers())?;
    }
    for row in table.rows() {
        writer.write_record(row.values())?;
    }
    writer.flush()?;
    Ok(())
}

/// Temporary CSV file holding the table while it is uploaded.
///
/// The file is removed when the buffer is dropped.
struct SerializationBuffer {
    file: NamedTempFile,
}

impl SerializationBuffer {
    fn create(buffer_dir: Option<&Path>) -> error_stack::Result<Self, ExportError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("sheet-export-").suffix(".csv");

        let file = match buffer_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .change_context(ExportError::Serialization)
        .attach_printable("Failed to create the temporary CSV file")?;

        Ok(SerializationBuffer { file })
    }

    fn write_table(&mut self, table: &Table) -> error_stack::Result<(), ExportError> {
        write_csv(table, self.file.as_file_mut())
            .change_context(ExportError::Serialization)?;
        self.file
            .as_file()
            .sync_all()
            .change_context(ExportError::Serialization)?;
        Ok(())
    }

    /// Independent handle positioned at the start of the written content.
    fn reader(&self) -> error_stack::Result<std::fs::File, ExportError> {
        let mut file = self
            .file
            .reopen()
            .change_context(ExportError::Serialization)?;
        file.seek(SeekFrom::Start(0))
            .change_context(ExportError::Serialization)?;
        Ok(file)
    }
}

/// Serializes `table` to CSV and uploads it as a new native spreadsheet
/// named `name` inside `target_folder_id`.
///
/// The CSV buffer lives in `buffer_dir` (system temp dir when `None`) and is
/// deleted before this returns, whatever the outcome.
#[instrument(skip(table, uploader, buffer_dir), fields(rows = table.row_count()))]
pub async fn export_table<U>(
    name: &str,
    table: &Table,
    uploader: &U,
    target_folder_id: &str,
    buffer_dir: Option<&Path>,
) -> error_stack::Result<DocumentId, ExportError>
where
    U: DriveUploader + ?Sized,
{
    let mut buffer = SerializationBuffer::create(buffer_dir)?;
    buffer.write_table(table)?;
    debug!(path = %buffer.file.path().display(), "Table serialized");

    let metadata = DocumentMetadata {
        name: name.to_string(),
        mime_kind: MimeKind::NativeSpreadsheet,
        parent_folder_id: target_folder_id.to_string(),
    };

    let result = uploader
        .create_document(&metadata, Box::new(buffer.reader()?))
        .await
        .map_err(upload_to_export)
        .attach_printable_lazy(|| format!("Target folder: {}", target_folder_id));

    let path = buffer.file.path().to_path_buf();
    drop(buffer);
    debug!(path = %path.display(), "Temporary CSV removed");

    let document_id = result?;
    info!(%document_id, "Spreadsheet created");
    Ok(document_id)
}

fn upload_to_export(report: Report<UploadError>) -> Report<ExportError> {
    let kind = ExportError::from(*report.current_context());
    report.change_context(kind)
}
