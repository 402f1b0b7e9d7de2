use tracing::{info, instrument};

use crate::domain::{DocumentId, Table};
use crate::ports::spreadsheet_reader::{DataSourceError, SpreadsheetReader};

/// Loads the first sheet of `document_id` as a [`Table`].
///
/// A document without any rows, or without any sheet, yields an empty table.
#[instrument(skip(reader))]
pub async fn load_table<R>(
    document_id: &DocumentId,
    reader: &R,
) -> error_stack::Result<Table, DataSourceError>
where
    R: SpreadsheetReader + ?Sized,
{
    let sheet = reader.open_by_identifier(document_id).await?;
    let values = reader.get_all_values(&sheet).await?;

    if values.is_empty() {
        info!(sheet = ?sheet.sheet_title, "Source sheet is empty");
        return Ok(Table::empty());
    }

    let table = Table::from_raw_rows(values);
    info!(
        sheet = ?sheet.sheet_title,
        rows = table.row_count(),
        columns = table.column_count(),
        "Loaded source table"
    );
    Ok(table)
}
