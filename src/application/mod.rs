pub mod export_packager;
pub mod pipeline;
pub mod table_loader;

#[cfg(test)]
pub(crate) mod fakes;

pub use export_packager::{export_table, ExportError};
pub use pipeline::{ExportPipeline, ExportedDocument, PipelineError, PipelineNotice, PreparedExport};
pub use table_loader::load_table;
