pub mod a1_notation;
pub mod column_filter;
pub mod document_id;
pub mod headers;
pub mod table;
