pub mod api_failure;
pub mod auth;
pub mod cell_values;
pub mod drive_uploader;
pub mod http_client;
pub mod services;
pub mod sheets_reader;

pub use drive_uploader::GoogleDriveUploader;
pub use services::GoogleServices;
pub use sheets_reader::GoogleSheetsReader;
