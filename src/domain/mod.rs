pub mod sheets;

// Re-export commonly used types
pub use sheets::column_filter::filter_columns;
pub use sheets::document_id::{extract_identifier, DocumentId};
pub use sheets::headers::normalize_headers;
pub use sheets::table::{Table, TableRow};
