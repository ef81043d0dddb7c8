//! Insight mining over a frozen, scored award window.
//!
//! Detectors are independent; any of them may emit nothing. Every draft carries a
//! deterministic [`Fingerprint`] so a store can drop repeats across scheduled runs.

pub mod detectors;
mod fingerprint;
pub mod job;
pub mod store;
mod views;

pub use detectors::{
    InsightDetector, MonthOverMonthDetector, OutlierDetector, SpendingConcentrationDetector,
};
pub use fingerprint::Fingerprint;
pub use views::{
    AgencyShare, AnalysisPeriod, EvidenceRecord, InsightDraft, InsightEvidence, InsightKind,
    InsightMetrics, InsightOptions, RiskLevel, TriggerType,
};

use crate::awards::Award;
use chrono::{NaiveDate, Utc};
use tracing::debug;

/// Maximum supporting records attached to a single draft.
pub const EVIDENCE_SAMPLE_LIMIT: usize = 5;

/// Awards and resolved settings shared by every detector in one run.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisWindow<'a> {
    pub awards: &'a [Award],
    pub period: AnalysisPeriod,
    pub threshold_percent: f64,
}

impl<'a> AnalysisWindow<'a> {
    pub fn new(awards: &'a [Award], options: &InsightOptions) -> Self {
        Self {
            awards,
            period: resolve_period(awards, options),
            threshold_percent: options.threshold_percent,
        }
    }

    pub(crate) fn period_parts(&self) -> [String; 2] {
        [self.period.start.to_string(), self.period.end.to_string()]
    }
}

/// Explicit bounds win; otherwise the earliest and latest award start dates, then today.
fn resolve_period(awards: &[Award], options: &InsightOptions) -> AnalysisPeriod {
    let today = options.today.unwrap_or_else(|| Utc::now().date_naive());
    let dates = awards.iter().filter_map(|award| award.start_date);
    let earliest: Option<NaiveDate> = dates.clone().min();
    let latest: Option<NaiveDate> = dates.max();

    AnalysisPeriod {
        start: options.period_start.or(earliest).unwrap_or(today),
        end: options.period_end.or(latest).unwrap_or(today),
    }
}

/// Ordered set of detectors run against one window.
pub struct InsightMiner {
    detectors: Vec<Box<dyn InsightDetector>>,
}

impl InsightMiner {
    pub fn new(detectors: Vec<Box<dyn InsightDetector>>) -> Self {
        Self { detectors }
    }

    /// Outliers, then spending concentration, then month-over-month.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(OutlierDetector),
            Box::new(SpendingConcentrationDetector),
            Box::new(MonthOverMonthDetector),
        ])
    }

    pub fn mine(&self, awards: &[Award], options: &InsightOptions) -> Vec<InsightDraft> {
        let window = AnalysisWindow::new(awards, options);
        let mut drafts = Vec::new();

        for detector in &self.detectors {
            if !detector.enable(&window) {
                debug!(detector = detector.name(), "detector skipped");
                continue;
            }
            let emitted = detector.detect(&window);
            debug!(detector = detector.name(), drafts = emitted.len(), "detector finished");
            drafts.extend(emitted);
        }

        drafts
    }
}

impl Default for InsightMiner {
    fn default() -> Self {
        Self::standard()
    }
}

/// Runs the standard detectors over already scored awards.
pub fn mine_insights(awards: &[Award], options: &InsightOptions) -> Vec<InsightDraft> {
    InsightMiner::standard().mine(awards, options)
}

pub(crate) fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dated(id: &str, date: Option<NaiveDate>) -> Award {
        let mut award = Award::new(id, 1.0);
        award.start_date = date;
        award
    }

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("valid date")
    }

    #[test]
    fn period_spans_award_start_dates() {
        let awards = vec![
            dated("a", Some(date("2024-03-10"))),
            dated("b", None),
            dated("c", Some(date("2024-01-02"))),
        ];
        let window = AnalysisWindow::new(&awards, &InsightOptions::default());
        assert_eq!(window.period.start, date("2024-01-02"));
        assert_eq!(window.period.end, date("2024-03-10"));
    }

    #[test]
    fn period_falls_back_to_today_without_dates() {
        let awards = vec![dated("a", None)];
        let options = InsightOptions {
            today: Some(date("2025-06-30")),
            ..InsightOptions::default()
        };
        let window = AnalysisWindow::new(&awards, &options);
        assert_eq!(window.period.start, date("2025-06-30"));
        assert_eq!(window.period.end, date("2025-06-30"));
    }

    #[test]
    fn explicit_bounds_override_each_side_independently() {
        let awards = vec![dated("a", Some(date("2024-02-01")))];
        let options = InsightOptions {
            period_start: Some(date("2024-01-01")),
            ..InsightOptions::default()
        };
        let window = AnalysisWindow::new(&awards, &options);
        assert_eq!(window.period.start, date("2024-01-01"));
        assert_eq!(window.period.end, date("2024-02-01"));
    }

    #[test]
    fn empty_window_emits_nothing() {
        assert!(mine_insights(&[], &InsightOptions::default()).is_empty());
    }
}
