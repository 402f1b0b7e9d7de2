pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod prettyprint;

pub use application::{ExportPipeline, PipelineError};
pub use config::AppConfig;
pub use domain::{DocumentId, Table};
