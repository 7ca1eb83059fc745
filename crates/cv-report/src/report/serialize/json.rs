use super::{DocumentSerializer, ExportError, ExportFormat};
use crate::report::render::ExportDocument;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl DocumentSerializer for JsonSerializer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn serialize(&self, document: &ExportDocument) -> Result<Vec<u8>, ExportError> {
        let mut bytes = serde_json::to_vec_pretty(document)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}
