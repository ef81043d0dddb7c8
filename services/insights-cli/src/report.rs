use award_integrity::agencies::format_agency_currency;
use award_integrity::awards::load_raw_awards;
use award_integrity::error::AppError;
use award_integrity::scoring::{ComplianceBand, ScoreBreakdown};
use award_integrity::{aggregate_by_agency, normalize_awards, score_awards, AgencyStats, Award};
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// CSV or JSON export of raw award records
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Print JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
struct ScoredAwardView<'a> {
    id: &'a str,
    amount: f64,
    recipient: Option<&'a str>,
    funding_agency: &'a str,
    state: Option<&'a str>,
    score: ScoreBreakdown,
    band: ComplianceBand,
    band_label: &'static str,
    explanation: String,
}

pub(crate) fn load_scored_awards(path: &Path) -> Result<Vec<Award>, AppError> {
    let raw = load_raw_awards(path)?;
    let awards = score_awards(normalize_awards(&raw));
    info!(path = %path.display(), awards = awards.len(), "loaded and scored awards");
    Ok(awards)
}

pub(crate) fn run_score(args: ReportArgs) -> Result<(), AppError> {
    let awards = load_scored_awards(&args.input)?;

    if args.json {
        let views: Vec<ScoredAwardView<'_>> = awards.iter().filter_map(score_view).collect();
        print_json(&views)?;
    } else {
        print!("{}", render_score_table(&awards));
    }
    Ok(())
}

pub(crate) fn run_agencies(args: ReportArgs) -> Result<(), AppError> {
    let awards = load_scored_awards(&args.input)?;
    let stats = aggregate_by_agency(&awards);

    if args.json {
        print_json(&stats)?;
    } else {
        print!("{}", render_agency_table(&stats));
    }
    Ok(())
}

fn score_view(award: &Award) -> Option<ScoredAwardView<'_>> {
    let score = award.score?;
    let band = score.band();
    Some(ScoredAwardView {
        id: &award.id,
        amount: award.amount,
        recipient: award.recipient.as_deref(),
        funding_agency: award.agency_bucket(),
        state: award.state.as_deref(),
        score,
        band,
        band_label: band.label(),
        explanation: score.explanation(),
    })
}

pub(crate) fn render_score_table(awards: &[Award]) -> String {
    let mut out = format!(
        "{:<20} {:<28} {:>14} {:>5} {:>5} {:>5} {:>5}  {}\n",
        "Award", "Agency", "Amount", "Env", "Comp", "Mod", "Total", "Band"
    );
    for award in awards {
        let Some(score) = award.score else {
            continue;
        };
        out.push_str(&format!(
            "{:<20} {:<28} {:>14.2} {:>5} {:>5} {:>5} {:>5}  {}\n",
            truncate(&award.id, 20),
            truncate(award.agency_bucket(), 28),
            award.amount,
            score.environmental,
            score.competitive_bidding,
            score.modification_auth,
            score.total,
            score.band().label(),
        ));
    }
    out
}

pub(crate) fn render_agency_table(stats: &[AgencyStats]) -> String {
    let mut out = format!(
        "{:<36} {:>10} {:>8} {:>6} {:>6} {:>6} {:>6}\n",
        "Agency", "Spending", "Projects", "Avg", "Green", "Yellow", "Red"
    );
    for entry in stats {
        out.push_str(&format!(
            "{:<36} {:>10} {:>8} {:>6} {:>6} {:>6} {:>6}\n",
            truncate(&entry.agency_name, 36),
            format_agency_currency(entry.total_spending),
            entry.project_count,
            entry.avg_score,
            entry.score_distribution.green,
            entry.score_distribution.yellow,
            entry.score_distribution.red,
        ));
    }
    out
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let mut shortened: String = value.chars().take(width.saturating_sub(1)).collect();
        shortened.push('~');
        shortened
    }
}
