use crate::cli::ServeArgs;
use crate::infra::{bootstrap, AppState, ReportStore};
use crate::routes::with_report_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use cv_report::error::AppError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = bootstrap()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(ReportStore::new(config.export.format));
    let app = with_report_routes(store)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        environment = config.environment.label(),
        %addr,
        export_format = %config.export.format,
        "cv report service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
