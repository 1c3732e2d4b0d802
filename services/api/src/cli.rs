use crate::demo::{run_demo, run_match_report, DemoArgs, MatchReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use knowing_me::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Knowing You, Knowing Me",
    about = "Run the perception match service or score sessions from the command line",
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
    /// Compute a perception match report without running the server
    Match {
        #[command(subcommand)]
        command: MatchCommand,
    },
    /// Run an end-to-end demo of a two-player session
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum MatchCommand {
    /// Score a ratings export and print the match report
    Report(MatchReportArgs),
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
        Command::Match {
            command: MatchCommand::Report(args),
        } => run_match_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
