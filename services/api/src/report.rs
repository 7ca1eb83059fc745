use crate::infra::{bootstrap, load_evaluation};
use chrono::{Local, NaiveDate};
use clap::Args;
use cv_report::config::ExportConfig;
use cv_report::error::AppError;
use cv_report::report::{
    assemble, export_report, render_interactive, ExportArtifact, ExportError, ExportFormat,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct RenderArgs {
    /// Evaluation result JSON file, or `-` for stdin
    pub(crate) input: PathBuf,
    /// Export format: html, markdown, csv or json (defaults to APP_EXPORT_FORMAT)
    #[arg(long, value_parser = crate::infra::parse_format)]
    pub(crate) format: Option<ExportFormat>,
    /// Output path, or `-` for stdout (defaults to APP_EXPORT_DIR/<generated name>)
    #[arg(long)]
    pub(crate) out: Option<PathBuf>,
    /// Generation date stamped into the file name (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) date: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct ViewArgs {
    /// Evaluation result JSON file, or `-` for stdin
    pub(crate) input: PathBuf,
}

pub(crate) fn run_render(args: RenderArgs) -> Result<(), AppError> {
    let RenderArgs {
        input,
        format,
        out,
        date,
    } = args;

    let config = bootstrap()?;
    let format = format.unwrap_or(config.export.format);
    let generated_on = date.unwrap_or_else(|| Local::now().date_naive());

    let result = load_evaluation(&input)?;
    let artifact = export_report(&result, format, generated_on)?;
    write_artifact(&artifact, out.as_deref(), &config.export)
}

pub(crate) fn run_view(args: ViewArgs) -> Result<(), AppError> {
    bootstrap()?;
    let result = load_evaluation(&args.input)?;
    let view = render_interactive(&assemble(&result));
    let json = serde_json::to_string_pretty(&view).map_err(ExportError::from)?;
    println!("{json}");
    Ok(())
}

/// Write to stdout for `-`, to the given path, or into the export directory.
pub(crate) fn write_artifact(
    artifact: &ExportArtifact,
    out: Option<&Path>,
    export: &ExportConfig,
) -> Result<(), AppError> {
    let target = match out {
        Some(path) if path == Path::new("-") => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&artifact.bytes)?;
            stdout.flush()?;
            return Ok(());
        }
        Some(path) if path.is_dir() => path.join(&artifact.file_name),
        Some(path) => path.to_path_buf(),
        None => export.target_path(&artifact.file_name),
    };

    if let Some(parent) = target.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&target, &artifact.bytes)?;

    info!(
        path = %target.display(),
        bytes = artifact.bytes.len(),
        content_type = %artifact.content_type,
        "report export written"
    );
    println!("Report written to {}", target.display());
    Ok(())
}
