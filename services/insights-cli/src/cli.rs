use crate::assess::{run_assess, AssessArgs};
use crate::insights::{run_insights, InsightsArgs};
use crate::report::{run_agencies, run_score, ReportArgs};
use award_integrity::config::AppConfig;
use award_integrity::error::AppError;
use award_integrity::telemetry;
use clap::{Parser, Subcommand};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "award-integrity",
    about = "Score federal infrastructure awards and mine integrity insights from local exports",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score every award in a CSV or JSON export
    Score(ReportArgs),
    /// Roll scored awards up by funding agency
    Agencies(ReportArgs),
    /// Mine insight drafts and persist new ones to the insight store
    Insights(InsightsArgs),
    /// Score a single project from self-reported details
    Assess(AssessArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(environment = ?config.environment, "configuration loaded");

    match cli.command {
        Command::Score(args) => run_score(args),
        Command::Agencies(args) => run_agencies(args),
        Command::Insights(args) => run_insights(args, &config),
        Command::Assess(args) => run_assess(args),
    }
}
