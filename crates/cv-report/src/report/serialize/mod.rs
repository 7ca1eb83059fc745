//! File serializers turning an [`ExportDocument`] into a downloadable artifact.

mod html;
mod json;
mod markdown;
mod tabular;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use super::render::ExportDocument;

pub use html::HtmlSerializer;
pub use json::JsonSerializer;
pub use markdown::MarkdownSerializer;
pub use tabular::CsvSerializer;

const FILE_STEM: &str = "cv-evaluation-report";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Html,
    Markdown,
    Csv,
    Json,
}

impl ExportFormat {
    pub const fn ordered() -> [Self; 4] {
        [Self::Html, Self::Markdown, Self::Csv, Self::Json]
    }

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Markdown => "md",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Markdown => "markdown",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    pub fn content_type(self) -> mime::Mime {
        match self {
            Self::Html => mime::TEXT_HTML_UTF_8,
            Self::Markdown => "text/markdown; charset=utf-8"
                .parse()
                .unwrap_or(mime::TEXT_PLAIN_UTF_8),
            Self::Csv => mime::TEXT_CSV_UTF_8,
            Self::Json => mime::APPLICATION_JSON,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown export format '{0}' (expected html, markdown, csv or json)")]
pub struct UnknownExportFormat(pub String);

impl FromStr for ExportFormat {
    type Err = UnknownExportFormat;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "html" | "htm" => Ok(Self::Html),
            "markdown" | "md" => Ok(Self::Markdown),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(UnknownExportFormat(raw.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to format document: {0}")]
    Format(#[from] fmt::Error),
    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush csv buffer: {0}")]
    Buffer(String),
    #[error("failed to encode json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Turns an export document into the bytes of one file format.
pub trait DocumentSerializer: Send + Sync {
    fn format(&self) -> ExportFormat;
    fn serialize(&self, document: &ExportDocument) -> Result<Vec<u8>, ExportError>;
}

pub fn serializer_for(format: ExportFormat) -> Box<dyn DocumentSerializer> {
    match format {
        ExportFormat::Html => Box::new(HtmlSerializer),
        ExportFormat::Markdown => Box::new(MarkdownSerializer),
        ExportFormat::Csv => Box::new(CsvSerializer),
        ExportFormat::Json => Box::new(JsonSerializer),
    }
}

/// A serialized report ready to be saved or downloaded.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub content_type: mime::Mime,
    pub bytes: Vec<u8>,
}

pub fn export_artifact(
    document: &ExportDocument,
    serializer: &dyn DocumentSerializer,
    generated_on: NaiveDate,
) -> Result<ExportArtifact, ExportError> {
    let format = serializer.format();
    let bytes = serializer.serialize(document)?;
    tracing::debug!(%format, bytes = bytes.len(), "serialized export document");

    Ok(ExportArtifact {
        file_name: artifact_file_name(format, generated_on),
        content_type: format.content_type(),
        bytes,
    })
}

pub fn artifact_file_name(format: ExportFormat, generated_on: NaiveDate) -> String {
    format!(
        "{FILE_STEM}-{}.{}",
        generated_on.format("%Y-%m-%d"),
        format.extension()
    )
}
