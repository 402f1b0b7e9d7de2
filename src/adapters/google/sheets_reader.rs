use error_stack::Report;
use google_sheets4::api::SheetProperties;
use google_sheets4::Sheets;
use tracing::{debug, instrument};

use super::api_failure::ApiFailure;
use super::cell_values::IntoCellStrings;
use super::http_client::HttpsConnector;
use crate::domain::sheets::a1_notation::A1Notation;
use crate::domain::DocumentId;
use crate::ports::spreadsheet_reader::{DataSourceError, SheetHandle, SpreadsheetReader};

pub struct GoogleSheetsReader {
    hub: Sheets<HttpsConnector>,
}

impl std::fmt::Debug for GoogleSheetsReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GoogleSheetsReader")
    }
}

impl GoogleSheetsReader {
    pub fn new(hub: Sheets<HttpsConnector>) -> Self {
        GoogleSheetsReader { hub }
    }
}

fn api_failure(error: &google_sheets4::Error) -> ApiFailure {
    match error {
        google_sheets4::Error::Failure(response) => ApiFailure::from_status(response.status().as_u16()),
        google_sheets4::Error::BadRequest(body) => ApiFailure::from_json(body),
        _ => ApiFailure::default(),
    }
}

fn data_source_report(error: google_sheets4::Error) -> Report<DataSourceError> {
    let failure = api_failure(&error);
    let kind = DataSourceError::from_status(failure.status);
    Report::new(error)
        .attach_printable(failure.to_string())
        .change_context(kind)
}

/// Title of the sheet listed first in the spreadsheet, if any.
fn first_sheet_title(sheets: Vec<SheetProperties>) -> Option<String> {
    sheets
        .into_iter()
        .min_by_key(|properties| properties.index.unwrap_or(0))
        .and_then(|properties| properties.title)
}

#[async_trait::async_trait]
impl SpreadsheetReader for GoogleSheetsReader {
    #[instrument(skip(self))]
    async fn open_by_identifier(
        &self,
        document_id: &DocumentId,
    ) -> error_stack::Result<SheetHandle, DataSourceError> {
        let (_, spreadsheet) = self
            .hub
            .spreadsheets()
            .get(document_id.as_str())
            .param("fields", "sheets.properties(title,index)")
            .doit()
            .await
            .map_err(data_source_report)?;

        let properties = spreadsheet
            .sheets
            .unwrap_or_default()
            .into_iter()
            .filter_map(|sheet| sheet.properties)
            .collect();
        let sheet_title = first_sheet_title(properties);
        debug!(?sheet_title, "Spreadsheet opened");

        Ok(SheetHandle {
            document_id: document_id.clone(),
            sheet_title,
        })
    }

    #[instrument(skip(self))]
    async fn get_all_values(
        &self,
        sheet: &SheetHandle,
    ) -> error_stack::Result<Vec<Vec<String>>, DataSourceError> {
        let Some(title) = sheet.sheet_title.as_deref() else {
            return Ok(Vec::new());
        };
        let range = A1Notation::whole_sheet(title);

        let (_, value_range) = self
            .hub
            .spreadsheets()
            .values_get(sheet.document_id.as_str(), range.as_ref())
            .major_dimension("ROWS")
            .value_render_option("FORMATTED_VALUE")
            .doit()
            .await
            .map_err(data_source_report)?;

        Ok(value_range.values.unwrap_or_default().into_cell_strings())
    }
}
