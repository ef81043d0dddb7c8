use crate::infra::parse_date;
use crate::report::print_json;
use award_integrity::assessment::{
    benchmarks, compare_to_benchmark, score_self_assessment, AwardKind, BenchmarkComparison,
    CompetitionType, FederalAgency, SelfAssessmentInput, SelfAssessmentScore,
};
use award_integrity::error::AppError;
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Funding agency slug, e.g. department-of-transportation
    #[arg(long)]
    pub(crate) agency: FederalAgency,
    /// competitive, sole_source, or follow-on
    #[arg(long)]
    pub(crate) competition: CompetitionType,
    /// Total federal funding in dollars
    #[arg(long)]
    pub(crate) funding: f64,
    /// grant, contract, loan, or direct_payment
    #[arg(long, default_value = "grant")]
    pub(crate) award_type: AwardKind,
    #[arg(long, default_value = "Untitled project")]
    pub(crate) project_name: String,
    /// Period of performance start (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) start: Option<NaiveDate>,
    /// Period of performance end (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) end: Option<NaiveDate>,
    /// Date the environmental review was completed (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) review_date: Option<NaiveDate>,
    /// Print JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
struct AssessmentView<'a> {
    project_name: &'a str,
    #[serde(flatten)]
    score: &'a SelfAssessmentScore,
    benchmark: BenchmarkComparison,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let json = args.json;
    let input = to_input(args);
    let score = score_self_assessment(&input);
    let benchmark = compare_to_benchmark(score.scores.total);

    if json {
        print_json(&AssessmentView {
            project_name: &input.project_name,
            score: &score,
            benchmark,
        })?;
    } else {
        print!("{}", render_assessment(&input, &score, &benchmark));
    }
    Ok(())
}

fn to_input(args: AssessArgs) -> SelfAssessmentInput {
    SelfAssessmentInput {
        project_name: args.project_name,
        agency: args.agency,
        award_type: args.award_type,
        start_date: args.start,
        end_date: args.end,
        environmental_review_date: args.review_date,
        bid_solicitation_date: None,
        last_modification_date: None,
        total_funding_amount: args.funding,
        competition_type: args.competition,
    }
}

fn render_assessment(
    input: &SelfAssessmentInput,
    score: &SelfAssessmentScore,
    benchmark: &BenchmarkComparison,
) -> String {
    let scores = &score.scores;
    let mut out = format!(
        "{} ({})\nTotal {} - {}\n  Environmental review  {:>3}\n  Competitive bidding   {:>3}\n  Modification auth     {:>3}\n{}\n",
        input.project_name,
        input.agency.label(),
        scores.total,
        score.rating,
        scores.environmental,
        scores.competitive_bidding,
        scores.modification_auth,
        score.breakdown,
    );
    out.push_str(&format!(
        "Benchmark: {} points {} the public average of {} (~{}th percentile)\n",
        benchmark.difference,
        benchmark.band.label(),
        benchmarks().average_score,
        benchmark.percentile,
    ));
    if !score.recommendations.is_empty() {
        out.push_str("Recommendations:\n");
        for recommendation in &score.recommendations {
            out.push_str(&format!("  - {recommendation}\n"));
        }
    }
    out
}
