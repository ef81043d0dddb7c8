mod assess;
mod cli;
mod infra;
mod insights;
mod report;

use award_integrity::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
