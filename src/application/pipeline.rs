use chrono::{DateTime, Utc};
use error_stack::{report, ResultExt};
use thiserror::Error;
use tracing::{info, instrument, warn};

use super::export_packager::{export_table, ExportError};
use super::table_loader::load_table;
use crate::config::ExportConfig;
use crate::domain::{extract_identifier, filter_columns, DocumentId, Table};
use crate::ports::drive_uploader::DriveUploader;
use crate::ports::spreadsheet_reader::{DataSourceError, SpreadsheetReader};

/// Failures that stop the current run. The operator may retry with new input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("the URL does not contain a spreadsheet identifier")]
    InvalidReference,
    #[error("could not read the source spreadsheet: {0}")]
    DataSource(DataSourceError),
    #[error("could not create the exported spreadsheet: {0}")]
    Export(ExportError),
}

/// Conditions worth telling the operator about that do not stop the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineNotice {
    EmptySource,
    NoMatchingColumns,
}

impl std::fmt::Display for PipelineNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineNotice::EmptySource => write!(f, "the source sheet is empty"),
            PipelineNotice::NoMatchingColumns => {
                write!(f, "none of the configured columns exist in the source sheet")
            }
        }
    }
}

/// A loaded and filtered table, ready to be exported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedExport {
    pub document_id: DocumentId,
    pub table: Table,
    pub resolved_columns: Vec<String>,
    pub notices: Vec<PipelineNotice>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub document_id: DocumentId,
    pub name: String,
    pub url: String,
    pub folder_id: String,
}

/// Formats the final document name: `"{display_name} - {timestamp}"`, with the
/// timestamp rendered in `timezone`.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use sheet_export::application::pipeline::timestamped_name;
/// let now = Utc.with_ymd_and_hms(2024, 7, 1, 8, 5, 0).unwrap();
/// let name = timestamped_name("Élèves", now, chrono_tz::Europe::Paris, "%Y-%m-%d_%Hh%M");
/// assert_eq!(name, "Élèves - 2024-07-01_10h05");
/// ```
pub fn timestamped_name(
    display_name: &str,
    now: DateTime<Utc>,
    timezone: chrono_tz::Tz,
    format: &str,
) -> String {
    let local = now.with_timezone(&timezone);
    format!("{} - {}", display_name.trim(), local.format(format))
}

/// Runs the load, filter and export steps against the given collaborators.
pub struct ExportPipeline<'a, R: ?Sized, U: ?Sized> {
    reader: &'a R,
    uploader: &'a U,
    config: &'a ExportConfig,
}

impl<'a, R: ?Sized, U: ?Sized> std::fmt::Debug for ExportPipeline<'a, R, U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ExportPipeline {{ config: {:?} }}", self.config)
    }
}

impl<'a, R, U> ExportPipeline<'a, R, U>
where
    R: SpreadsheetReader + ?Sized,
    U: DriveUploader + ?Sized,
{
    pub fn new(reader: &'a R, uploader: &'a U, config: &'a ExportConfig) -> Self {
        Self {
            reader,
            uploader,
            config,
        }
    }

    pub fn config(&self) -> &ExportConfig {
        self.config
    }

    /// Resolves `url`, loads its first sheet and keeps the configured columns.
    #[instrument(skip(self))]
    pub async fn prepare(&self, url: &str) -> error_stack::Result<PreparedExport, PipelineError> {
        let document_id = extract_identifier(url)
            .ok_or_else(|| report!(PipelineError::InvalidReference))
            .attach_printable_lazy(|| format!("URL: {}", url))?;

        let table = load_table(&document_id, self.reader)
            .await
            .map_err(|report| {
                let kind = *report.current_context();
                report.change_context(PipelineError::DataSource(kind))
            })
            .attach_printable_lazy(|| format!("Document: {}", document_id))?;

        let mut notices = Vec::new();
        if table.is_empty() {
            warn!(%document_id, "Source sheet is empty");
            notices.push(PipelineNotice::EmptySource);
        }

        let (table, resolved_columns) = filter_columns(table, &self.config.columns);
        if resolved_columns.is_empty() && !notices.contains(&PipelineNotice::EmptySource) {
            warn!(%document_id, "No configured column found in the source sheet");
            notices.push(PipelineNotice::NoMatchingColumns);
        }
        info!(columns = ?resolved_columns, rows = table.row_count(), "Columns kept");

        Ok(PreparedExport {
            document_id,
            table,
            resolved_columns,
            notices,
        })
    }

    /// Name under which an export requested as `display_name` at `now` is saved.
    pub fn output_name(&self, display_name: &str, now: DateTime<Utc>) -> String {
        timestamped_name(
            display_name,
            now,
            self.config.timezone,
            &self.config.timestamp_format,
        )
    }

    /// Uploads the prepared table as a new spreadsheet called `name`.
    #[instrument(skip(self, prepared), fields(source = %prepared.document_id))]
    pub async fn export(
        &self,
        prepared: &PreparedExport,
        name: &str,
    ) -> error_stack::Result<ExportedDocument, PipelineError> {
        let document_id = export_table(
            name,
            &prepared.table,
            self.uploader,
            &self.config.target_folder_id,
            self.config.temp_dir.as_deref(),
        )
        .await
        .map_err(|report| {
            let kind = *report.current_context();
            report.change_context(PipelineError::Export(kind))
        })?;

        Ok(ExportedDocument {
            url: document_id.viewable_url(),
            document_id,
            name: name.to_string(),
            folder_id: self.config.target_folder_id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::{FakeReader, FakeUploader};
    use crate::ports::drive_uploader::UploadError;
    use chrono::TimeZone;

    const URL: &str = "https://docs.google.com/spreadsheets/d/source-doc/edit#gid=0";

    fn config(dir: &std::path::Path) -> ExportConfig {
        ExportConfig {
            target_folder_id: "target-folder".to_string(),
            columns: vec!["Classe".to_string(), "Nom".to_string()],
            temp_dir: Some(dir.to_path_buf()),
            ..ExportConfig::default()
        }
    }

    #[tokio::test]
    async fn test_prepare_filters_columns() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let reader = FakeReader::with_rows(&[&["Classe", "Nom", "Extra"], &["1A", "Dupont", "x"]]);
        let uploader = FakeUploader::new();
        let pipeline = ExportPipeline::new(&reader, &uploader, &config);

        let prepared = pipeline.prepare(URL).await.unwrap();

        assert_eq!(prepared.document_id, DocumentId::new("source-doc"));
        assert_eq!(prepared.resolved_columns, vec!["Classe", "Nom"]);
        assert_eq!(prepared.table.headers(), ["Classe", "Nom"]);
        assert!(prepared.notices.is_empty());
    }

    #[tokio::test]
    async fn test_prepare_rejects_url_without_identifier() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let reader = FakeReader::with_rows(&[]);
        let uploader = FakeUploader::new();
        let pipeline = ExportPipeline::new(&reader, &uploader, &config);

        let report = pipeline
            .prepare("https://example.com/nothing-here")
            .await
            .unwrap_err();

        assert_eq!(report.current_context(), &PipelineError::InvalidReference);
        assert!(reader.opened().is_empty());
    }

    #[tokio::test]
    async fn test_prepare_reports_data_source_kind() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let reader = FakeReader::failing_open(DataSourceError::NotFound);
        let uploader = FakeUploader::new();
        let pipeline = ExportPipeline::new(&reader, &uploader, &config);

        let report = pipeline.prepare(URL).await.unwrap_err();

        assert_eq!(
            report.current_context(),
            &PipelineError::DataSource(DataSourceError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_prepare_empty_source_is_a_notice() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let reader = FakeReader::with_rows(&[]);
        let uploader = FakeUploader::new();
        let pipeline = ExportPipeline::new(&reader, &uploader, &config);

        let prepared = pipeline.prepare(URL).await.unwrap();

        assert!(prepared.table.is_empty());
        assert!(prepared.resolved_columns.is_empty());
        assert_eq!(prepared.notices, vec![PipelineNotice::EmptySource]);
    }

    #[tokio::test]
    async fn test_prepare_no_matching_columns_is_a_notice() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let reader = FakeReader::with_rows(&[&["A", "B"], &["1", "2"]]);
        let uploader = FakeUploader::new();
        let pipeline = ExportPipeline::new(&reader, &uploader, &config);

        let prepared = pipeline.prepare(URL).await.unwrap();

        assert_eq!(prepared.table.column_count(), 0);
        assert_eq!(prepared.notices, vec![PipelineNotice::NoMatchingColumns]);
    }

    #[tokio::test]
    async fn test_export_creates_document_in_target_folder() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let reader = FakeReader::with_rows(&[&["Nom", "Extra", "Classe"], &["Dupont", "x", "1A"]]);
        let uploader = FakeUploader::new();
        let pipeline = ExportPipeline::new(&reader, &uploader, &config);
        let prepared = pipeline.prepare(URL).await.unwrap();

        let exported = pipeline.export(&prepared, "Rentrée - 2024").await.unwrap();

        assert_eq!(exported.document_id, DocumentId::new("created-1"));
        assert_eq!(
            exported.url,
            "https://docs.google.com/spreadsheets/d/created-1"
        );
        assert_eq!(exported.folder_id, "target-folder");
        let uploads = uploader.uploads();
        assert_eq!(uploads[0].metadata.name, "Rentrée - 2024");
        assert_eq!(uploads[0].metadata.parent_folder_id, "target-folder");
        assert_eq!(uploads[0].content, "Nom,Classe\nDupont,1A\n");
    }

    #[tokio::test]
    async fn test_export_failure_kind() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let reader = FakeReader::with_rows(&[&["Classe"], &["1A"]]);
        let uploader = FakeUploader::failing(UploadError::QuotaExceeded);
        let pipeline = ExportPipeline::new(&reader, &uploader, &config);
        let prepared = pipeline.prepare(URL).await.unwrap();

        let report = pipeline.export(&prepared, "x").await.unwrap_err();

        assert_eq!(
            report.current_context(),
            &PipelineError::Export(ExportError::QuotaExceeded)
        );
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_output_name_uses_configured_timezone() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig {
            timezone: chrono_tz::America::New_York,
            ..config(dir.path())
        };
        let reader = FakeReader::with_rows(&[]);
        let uploader = FakeUploader::new();
        let pipeline = ExportPipeline::new(&reader, &uploader, &config);
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();

        assert_eq!(
            pipeline.output_name("  Liste  ", now),
            "Liste - 2024-01-15_07h00"
        );
    }

    #[test]
    fn test_timestamped_name_winter_time() {
        let now = Utc.with_ymd_and_hms(2024, 12, 24, 23, 30, 0).unwrap();
        assert_eq!(
            timestamped_name("Noël", now, chrono_tz::Europe::Paris, "%Y-%m-%d_%Hh%M"),
            "Noël - 2024-12-25_00h30"
        );
    }
}
