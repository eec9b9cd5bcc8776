use crate::commands::{run_inspect, run_report, InspectArgs, ReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use skillradar::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Competency Radar Dashboard",
    about = "Serve the competency dashboard and export individual radar profiles",
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
    /// Export one individual's two-page PDF profile to a file
    Report(ReportArgs),
    /// Print clusters, names, and per-individual summaries from the score table
    Inspect(InspectArgs),
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
        Command::Report(args) => run_report(args),
        Command::Inspect(args) => run_inspect(args),
    }
}
