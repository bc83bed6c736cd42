use crate::commands::{run_export, run_import, run_search, ExportArgs, ImportArgs, SearchArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use donor_discovery::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Donor Discovery",
    about = "Search, rank, and export blood donor snapshots from the command line or over HTTP",
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
    /// Filter and rank donors from a snapshot file
    Search(SearchArgs),
    /// Export the filtered, ranked donors as CSV or JSON
    Export(ExportArgs),
    /// Validate a bulk donor file and optionally write a JSON snapshot
    Import(ImportArgs),
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
        Command::Search(args) => run_search(args),
        Command::Export(args) => run_export(args),
        Command::Import(args) => run_import(args),
    }
}
