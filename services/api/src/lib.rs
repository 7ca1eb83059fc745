mod cli;
mod demo;
mod infra;
mod report;
mod routes;
mod server;

use cv_report::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
