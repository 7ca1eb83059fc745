use chrono::NaiveDate;
use cv_report::config::AppConfig;
use cv_report::error::AppError;
use cv_report::evaluation::{
    parse_evaluation, AnalysisTracker, EvaluationResult, EvaluationSource, JsonFileSource,
    StdinSource,
};
use cv_report::report::{assemble, render, ExportFormat, RenderedReport};
use cv_report::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Evaluation currently on display together with both of its renderings.
#[derive(Debug)]
pub(crate) struct CurrentReport {
    pub(crate) analysis: u64,
    pub(crate) result: EvaluationResult,
    pub(crate) rendered: RenderedReport,
}

/// Holds the newest accepted analysis. Submissions overtaken by a later one
/// are rejected instead of replacing it. Only bodies that decode take a ticket.
#[derive(Debug)]
pub(crate) struct ReportStore {
    tracker: AnalysisTracker,
    current: RwLock<Option<Arc<CurrentReport>>>,
    default_format: ExportFormat,
}

impl ReportStore {
    pub(crate) fn new(default_format: ExportFormat) -> Self {
        Self {
            tracker: AnalysisTracker::new(),
            current: RwLock::new(None),
            default_format,
        }
    }

    pub(crate) fn default_format(&self) -> ExportFormat {
        self.default_format
    }

    pub(crate) fn submit(&self, body: &[u8]) -> Result<Arc<CurrentReport>, AppError> {
        let result = parse_evaluation(body)?;
        let ticket = self.tracker.begin();
        let rendered = render(&assemble(&result));
        let report = Arc::new(CurrentReport {
            analysis: ticket.id(),
            result,
            rendered,
        });

        let mut current = self.current.write().expect("report store lock poisoned");
        match self.tracker.accept(ticket, report) {
            Some(report) => {
                *current = Some(report.clone());
                Ok(report)
            }
            None => Err(AppError::StaleAnalysis {
                ticket: ticket.id(),
            }),
        }
    }

    pub(crate) fn current(&self) -> Result<Arc<CurrentReport>, AppError> {
        self.current
            .read()
            .expect("report store lock poisoned")
            .clone()
            .ok_or(AppError::NoCurrentReport)
    }
}

/// Load configuration and install the tracing subscriber.
pub(crate) fn bootstrap() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(config)
}

/// `-` reads the evaluation from stdin; anything else is a JSON file path.
pub(crate) fn load_evaluation(input: &Path) -> Result<EvaluationResult, AppError> {
    let result = if input == Path::new("-") {
        StdinSource.fetch()?
    } else {
        JsonFileSource::new(input).fetch()?
    };
    Ok(result)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_format(raw: &str) -> Result<ExportFormat, String> {
    raw.parse::<ExportFormat>().map_err(|err| err.to_string())
}
