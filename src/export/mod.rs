//! Export module - PDF report generation

mod pdf;
mod summary;

pub use pdf::{ExportDocument, ExportError, PdfExporter, EXPORT_FILE_NAME, EXPORT_MIME, REPORT_PAGES};
pub use summary::{AuthorInfo, ParameterSummary};
