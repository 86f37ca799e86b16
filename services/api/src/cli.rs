use crate::console::{run_assess, run_blueprint, run_wizard, AssessArgs, BlueprintArgs, WizardArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use firm_exposure::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Firm Exposure Assessment",
    about = "Run the regulatory exposure questionnaire from the terminal or over HTTP",
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
    /// Walk through the questionnaire interactively
    Wizard(WizardArgs),
    /// Score a complete answer set given as flags or a JSON file
    Assess(AssessArgs),
    /// Print the compliance blueprint with target dates
    Blueprint(BlueprintArgs),
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
        Command::Wizard(args) => run_wizard(args),
        Command::Assess(args) => run_assess(args),
        Command::Blueprint(args) => run_blueprint(args),
    }
}
