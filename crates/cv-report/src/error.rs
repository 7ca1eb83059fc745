use crate::config::ConfigError;
use crate::evaluation::IntakeError;
use crate::report::{ExportError, UnknownExportFormat};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Intake(IntakeError),
    Export(ExportError),
    UnsupportedFormat(UnknownExportFormat),
    NoCurrentReport,
    StaleAnalysis { ticket: u64 },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Intake(_) | AppError::UnsupportedFormat(_) => StatusCode::BAD_REQUEST,
            AppError::NoCurrentReport => StatusCode::NOT_FOUND,
            AppError::StaleAnalysis { .. } => StatusCode::CONFLICT,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Intake(err) => write!(f, "intake error: {}", err),
            AppError::Export(err) => write!(f, "export error: {}", err),
            AppError::UnsupportedFormat(err) => write!(f, "{}", err),
            AppError::NoCurrentReport => write!(f, "no evaluation has been submitted yet"),
            AppError::StaleAnalysis { ticket } => write!(
                f,
                "analysis {} was superseded by a newer submission",
                ticket
            ),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Intake(err) => Some(err),
            AppError::Export(err) => Some(err),
            AppError::UnsupportedFormat(err) => Some(err),
            AppError::NoCurrentReport | AppError::StaleAnalysis { .. } => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<IntakeError> for AppError {
    fn from(value: IntakeError) -> Self {
        Self::Intake(value)
    }
}

impl From<ExportError> for AppError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

impl From<UnknownExportFormat> for AppError {
    fn from(value: UnknownExportFormat) -> Self {
        Self::UnsupportedFormat(value)
    }
}
