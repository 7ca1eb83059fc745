use crate::demo::{run_demo, DemoArgs};
use crate::report::{run_render, run_view, RenderArgs, ViewArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use cv_report::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "CV Evaluation Report",
    about = "Serve, render and export CV evaluation reports",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Render a saved evaluation result
    Report {
        #[command(subcommand)]
        command: ReportCommand,
    },
    /// Render a built-in sample evaluation to stdout
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ReportCommand {
    /// Write the export artifact for an evaluation
    Render(RenderArgs),
    /// Print the interactive report tree as JSON
    View(ViewArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report {
            command: ReportCommand::Render(args),
        } => run_render(args),
        Command::Report {
            command: ReportCommand::View(args),
        } => run_view(args),
        Command::Demo(args) => run_demo(args),
    }
}
