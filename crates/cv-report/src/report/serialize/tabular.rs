use super::{DocumentSerializer, ExportError, ExportFormat};
use crate::report::render::{ExportBlock, ExportDocument};

/// Writes every table of the document, each preceded by a one-cell row
/// naming the heading it appears under.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvSerializer;

impl DocumentSerializer for CsvSerializer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn serialize(&self, document: &ExportDocument) -> Result<Vec<u8>, ExportError> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());

        let mut current_heading = document.title.as_str();
        for block in &document.blocks {
            match block {
                ExportBlock::Heading { text, .. } => current_heading = text,
                ExportBlock::Table { header, rows, .. } => {
                    writer.write_record([current_heading])?;
                    writer.write_record(header)?;
                    for row in rows {
                        writer.write_record(row)?;
                    }
                }
                _ => {}
            }
        }

        writer
            .into_inner()
            .map_err(|err| ExportError::Buffer(err.to_string()))
    }
}
