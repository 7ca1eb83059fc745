use crate::infra::{AppState, ReportStore};
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::Local;
use cv_report::error::AppError;
use cv_report::evaluation::parse_evaluation;
use cv_report::report::{
    assemble, export_artifact, export_report, render_interactive, serializer_for, ExportArtifact,
    ExportFormat, InteractiveView,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ExportQuery {
    #[serde(default)]
    pub(crate) format: Option<String>,
}

impl ExportQuery {
    fn resolve(&self, fallback: ExportFormat) -> Result<ExportFormat, AppError> {
        match self.format.as_deref().map(str::trim) {
            None | Some("") => Ok(fallback),
            Some(raw) => Ok(raw.parse::<ExportFormat>()?),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CurrentReportResponse {
    pub(crate) analysis: u64,
    pub(crate) view: InteractiveView,
}

/// Report endpoints sharing one [`ReportStore`].
pub(crate) fn report_router(store: Arc<ReportStore>) -> Router {
    Router::new()
        .route("/api/v1/reports/view", post(view_endpoint))
        .route("/api/v1/reports/export", post(export_endpoint))
        .route("/api/v1/reports/current", post(submit_current_endpoint))
        .route("/api/v1/reports/current/view", get(current_view_endpoint))
        .route("/api/v1/reports/current/export", get(current_export_endpoint))
        .with_state(store)
}

pub(crate) fn with_report_routes(store: Arc<ReportStore>) -> Router {
    report_router(store)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn view_endpoint(body: Bytes) -> Result<Json<InteractiveView>, AppError> {
    let result = parse_evaluation(body.as_ref())?;
    Ok(Json(render_interactive(&assemble(&result))))
}

pub(crate) async fn export_endpoint(
    State(store): State<Arc<ReportStore>>,
    Query(query): Query<ExportQuery>,
    body: Bytes,
) -> Result<Response, AppError> {
    let format = query.resolve(store.default_format())?;
    let generated_on = Local::now().date_naive();

    let artifact = offload(move || {
        let result = parse_evaluation(body.as_ref())?;
        Ok(export_report(&result, format, generated_on)?)
    })
    .await?;

    Ok(attachment(artifact))
}

pub(crate) async fn submit_current_endpoint(
    State(store): State<Arc<ReportStore>>,
    body: Bytes,
) -> Result<Json<CurrentReportResponse>, AppError> {
    let report = store.submit(body.as_ref())?;
    tracing::info!(
        analysis = report.analysis,
        candidates = report.result.candidates.len(),
        "current report replaced"
    );

    Ok(Json(CurrentReportResponse {
        analysis: report.analysis,
        view: report.rendered.interactive.clone(),
    }))
}

pub(crate) async fn current_view_endpoint(
    State(store): State<Arc<ReportStore>>,
) -> Result<Json<CurrentReportResponse>, AppError> {
    let report = store.current()?;
    Ok(Json(CurrentReportResponse {
        analysis: report.analysis,
        view: report.rendered.interactive.clone(),
    }))
}

pub(crate) async fn current_export_endpoint(
    State(store): State<Arc<ReportStore>>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, AppError> {
    let format = query.resolve(store.default_format())?;
    let report = store.current()?;
    let generated_on = Local::now().date_naive();

    let artifact = offload(move || {
        let serializer = serializer_for(format);
        Ok(export_artifact(
            &report.rendered.export,
            serializer.as_ref(),
            generated_on,
        )?)
    })
    .await?;

    Ok(attachment(artifact))
}

/// Run export work on the blocking pool so request handling stays responsive.
async fn offload<F>(work: F) -> Result<ExportArtifact, AppError>
where
    F: FnOnce() -> Result<ExportArtifact, AppError> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| AppError::Server(axum::Error::new(err)))?
}

fn attachment(artifact: ExportArtifact) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", artifact.file_name);
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, artifact.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    )
        .into_response()
}
