use crate::check::{run_eligibility_check, run_match_check, CheckArgs};
use crate::server;
use cgeip::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "CGEIP Qualification Engine",
    about = "Serve or exercise course eligibility and job matching from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service and background schedulers (default command)
    Serve(ServeArgs),
    /// Run the evaluator or matcher over a JSON document and print a report
    Check {
        #[command(subcommand)]
        command: CheckCommand,
    },
}

#[derive(Subcommand, Debug)]
enum CheckCommand {
    /// Evaluate `{ "transcript": .., "requirement": .. }` for course eligibility
    Eligibility(CheckArgs),
    /// Score `{ "job": .., "preference": .. }` against the matching criteria
    Match(CheckArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Run without the job matcher and preference reminder schedulers
    #[arg(long)]
    pub(crate) no_schedulers: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Check {
            command: CheckCommand::Eligibility(args),
        } => run_eligibility_check(args),
        Command::Check {
            command: CheckCommand::Match(args),
        } => run_match_check(args),
    }
}
