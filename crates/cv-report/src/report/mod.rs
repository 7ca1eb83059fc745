//! Report assembly, rendering and file export.

pub mod assembler;
pub mod document;
pub mod render;
pub mod serialize;

use chrono::NaiveDate;

use crate::evaluation::EvaluationResult;

pub use assembler::{assemble, REPORT_TITLE, SCORE_DISCLAIMER};
pub use document::{Block, ListItem, ReportDocument, Section, SectionKind, Table};
pub use render::{
    render, render_export, render_interactive, ExportDocument, InteractiveView, RenderedReport,
};
pub use serialize::{
    artifact_file_name, export_artifact, serializer_for, DocumentSerializer, ExportArtifact,
    ExportError, ExportFormat, UnknownExportFormat,
};

/// Assemble `result`, render its export body and serialize it as `format`.
pub fn export_report(
    result: &EvaluationResult,
    format: ExportFormat,
    generated_on: NaiveDate,
) -> Result<ExportArtifact, ExportError> {
    let document = render_export(&assemble(result));
    export_artifact(&document, serializer_for(format).as_ref(), generated_on)
}
