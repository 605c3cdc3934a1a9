use crate::demo::{
    run_compat_check, run_compat_matrix, run_demo, run_donor_check, run_request_classify,
    run_roster_screen, CompatCheckArgs, DemoArgs, DonorCheckArgs, RequestClassifyArgs,
    RosterScreenArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use thalai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "ThalAI+ Eligibility Service",
    about = "Screen blood donors and triage blood requests from the command line or over HTTP",
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
    /// Screen a single donor against the eligibility policy
    Donor {
        #[command(subcommand)]
        command: DonorCommand,
    },
    /// Validate and classify a blood request
    Request {
        #[command(subcommand)]
        command: RequestCommand,
    },
    /// Inspect the transfusion compatibility table
    Compat {
        #[command(subcommand)]
        command: CompatCommand,
    },
    /// Batch-screen donors from a CSV roster
    Roster {
        #[command(subcommand)]
        command: RosterCommand,
    },
    /// Run an end-to-end CLI demo covering donors, requests, and compatibility
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum DonorCommand {
    /// Evaluate donor eligibility and list every failed check
    Check(DonorCheckArgs),
}

#[derive(Subcommand, Debug)]
enum RequestCommand {
    /// Classify a request's urgency and validate its fields
    Classify(RequestClassifyArgs),
}

#[derive(Subcommand, Debug)]
enum CompatCommand {
    /// Check whether a donor group can give to a recipient group
    Check(CompatCheckArgs),
    /// Print the donor to recipient compatibility matrix
    Matrix,
}

#[derive(Subcommand, Debug)]
enum RosterCommand {
    /// Screen every donor in a roster CSV
    Screen(RosterScreenArgs),
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
        Command::Donor {
            command: DonorCommand::Check(args),
        } => run_donor_check(args),
        Command::Request {
            command: RequestCommand::Classify(args),
        } => run_request_classify(args),
        Command::Compat {
            command: CompatCommand::Check(args),
        } => {
            run_compat_check(args);
            Ok(())
        }
        Command::Compat {
            command: CompatCommand::Matrix,
        } => {
            run_compat_matrix();
            Ok(())
        }
        Command::Roster {
            command: RosterCommand::Screen(args),
        } => run_roster_screen(args),
        Command::Demo(args) => run_demo(args),
    }
}
