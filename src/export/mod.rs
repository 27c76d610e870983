pub mod exporter;
pub mod folder;
pub mod record;
pub mod registry;

pub use exporter::{ExportReport, RowExporter, RowFailure, RowOutcome};
pub use folder::OutputFolder;
pub use record::OutputRecord;
pub use registry::FilenameRegistry;
