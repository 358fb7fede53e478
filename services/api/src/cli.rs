use crate::offline::{run_access_check, run_roster_filter, AccessCheckArgs, RosterFilterArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use talentpro::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "TalentPro",
    about = "Serve the TalentPro dashboard backend or inspect rosters and access rules offline",
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
    /// Work with candidate roster exports
    Roster {
        #[command(subcommand)]
        command: RosterCommand,
    },
    /// Inspect the screen access rules
    Access {
        #[command(subcommand)]
        command: AccessCommand,
    },
}

#[derive(Subcommand, Debug)]
enum RosterCommand {
    /// Filter a CSV or JSON roster by free text and facets
    Filter(RosterFilterArgs),
}

#[derive(Subcommand, Debug)]
enum AccessCommand {
    /// Evaluate the gate for a path as a given role
    Check(AccessCheckArgs),
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
        Command::Roster {
            command: RosterCommand::Filter(args),
        } => run_roster_filter(args),
        Command::Access {
            command: AccessCommand::Check(args),
        } => run_access_check(args),
    }
}
