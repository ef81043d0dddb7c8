use crate::infra::{parse_date, parse_threshold, JsonFileInsightStore, StaticAwardSource};
use award_integrity::config::AppConfig;
use award_integrity::error::AppError;
use award_integrity::insights::job::{InsightJob, InsightJobConfig, JobReport};
use award_integrity::insights::InsightDraft;
use chrono::{NaiveDate, Utc};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct InsightsArgs {
    /// CSV or JSON export of raw award records
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// JSON insight store (defaults to INSIGHTS_STORE_PATH)
    #[arg(long)]
    pub(crate) store: Option<PathBuf>,
    /// Month-over-month threshold percent (defaults to INSIGHTS_THRESHOLD_PERCENT)
    #[arg(long, value_parser = parse_threshold)]
    pub(crate) threshold: Option<f64>,
    /// Analysis period start (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) period_start: Option<NaiveDate>,
    /// Analysis period end (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) period_end: Option<NaiveDate>,
    /// Print drafts without writing to the store
    #[arg(long)]
    pub(crate) dry_run: bool,
}

pub(crate) fn run_insights(args: InsightsArgs, config: &AppConfig) -> Result<(), AppError> {
    let source = Arc::new(StaticAwardSource::from_path(&args.input)?);
    let store_path = args
        .store
        .clone()
        .unwrap_or_else(|| config.insights.store_path.clone());
    let store = Arc::new(JsonFileInsightStore::new(store_path));
    let job = InsightJob::new(source, store, job_config(&args, config));

    let now = Utc::now();
    if args.dry_run {
        let preview = job.preview(now.date_naive())?;
        print!("{}", render_drafts(&preview.drafts));
        return Ok(());
    }

    let report = job.run(now)?;
    println!("{}", render_report(&report));
    Ok(())
}

fn job_config(args: &InsightsArgs, config: &AppConfig) -> InsightJobConfig {
    let mut options = config.insights.insight_options();
    if let Some(threshold) = args.threshold {
        options.threshold_percent = threshold;
    }
    options.period_start = args.period_start;
    options.period_end = args.period_end;

    InsightJobConfig {
        fetch: config.insights.fetch_policy(),
        options,
    }
}

fn render_drafts(drafts: &[InsightDraft]) -> String {
    if drafts.is_empty() {
        return "No insight drafts for this window.\n".to_string();
    }

    let mut out = String::new();
    for draft in drafts {
        out.push_str(&format!(
            "[{}] {} ({:?} trigger, {:?} risk{})\n  {}\n  fingerprint {}\n",
            draft.kind,
            draft.title,
            draft.trigger_type,
            draft.risk_level,
            if draft.auto_publish_eligible {
                ", auto-publish"
            } else {
                ""
            },
            draft.summary,
            draft.fingerprint,
        ));
    }
    out
}

fn render_report(report: &JobReport) -> String {
    let mut line = format!(
        "Created {} insight drafts, skipped {} existing, from {} awards",
        report.created, report.skipped, report.total_awards
    );
    if report.truncated {
        line.push_str(" (award corpus incomplete)");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use award_integrity::insights::mine_insights;
    use award_integrity::{Award, InsightOptions};

    #[test]
    fn empty_preview_says_so() {
        assert_eq!(render_drafts(&[]), "No insight drafts for this window.\n");
    }

    #[test]
    fn drafts_render_kind_and_fingerprint() {
        let mut award = Award::new("a", 100.0);
        award.funding_agency = Some("Department of Energy".to_string());
        let drafts = mine_insights(&[award], &InsightOptions::default());

        let rendered = render_drafts(&drafts);
        assert!(rendered.contains("[spending_concentration]"));
        assert!(rendered.contains("auto-publish"));
        assert!(rendered.contains(drafts[0].fingerprint.as_str()));
    }

    #[test]
    fn report_flags_truncation() {
        let report = JobReport {
            created: 2,
            skipped: 1,
            total_awards: 1000,
            truncated: true,
        };
        assert!(render_report(&report).ends_with("(award corpus incomplete)"));
    }
}
