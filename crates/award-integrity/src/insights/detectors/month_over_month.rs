use super::InsightDetector;
use crate::insights::{
    round_to_hundredths, AnalysisWindow, Fingerprint, InsightDraft, InsightEvidence, InsightKind,
    InsightMetrics, RiskLevel, TriggerType,
};
use chrono::Datelike;
use std::collections::BTreeMap;

/// Compares spend in the two most recent calendar months present in the window.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonthOverMonthDetector;

impl InsightDetector for MonthOverMonthDetector {
    fn detect(&self, window: &AnalysisWindow<'_>) -> Vec<InsightDraft> {
        let mut totals: BTreeMap<(i32, u32), f64> = BTreeMap::new();
        for award in window.awards {
            if let Some(date) = award.start_date {
                *totals.entry((date.year(), date.month())).or_insert(0.0) += award.amount;
            }
        }

        let month_count = totals.len();
        let mut recent = totals.into_iter().rev();
        let (Some((current_key, current_total)), Some((previous_key, previous_total))) =
            (recent.next(), recent.next())
        else {
            return Vec::new();
        };

        if previous_total == 0.0 && current_total == 0.0 {
            return Vec::new();
        }

        let percent_change = percent_change(previous_total, current_total);
        let trigger_type = if percent_change.abs() >= window.threshold_percent {
            TriggerType::Threshold
        } else {
            TriggerType::Cadence
        };
        let direction = if percent_change >= 0.0 {
            "increase"
        } else {
            "decrease"
        };

        let previous_month = month_key(previous_key);
        let current_month = month_key(current_key);
        let kind = InsightKind::MonthOverMonthChange;
        let [start, end] = window.period_parts();
        let fingerprint = Fingerprint::from_parts([
            kind.as_str().to_string(),
            start,
            end,
            previous_month.clone(),
            current_month.clone(),
            format!("{percent_change:.2}"),
        ]);

        vec![InsightDraft {
            kind,
            title: kind.title().to_string(),
            summary: format!(
                "Spending shows a {:.1}% {direction} from {previous_month} to {current_month}.",
                percent_change.abs()
            ),
            metrics: InsightMetrics::MonthOverMonth {
                previous_month,
                current_month,
                previous_total,
                current_total,
                percent_change: round_to_hundredths(percent_change),
                threshold_percent: window.threshold_percent,
            },
            evidence: InsightEvidence::MonthCount { month_count },
            trigger_type,
            risk_level: RiskLevel::Medium,
            auto_publish_eligible: false,
            fingerprint,
            period_start: Some(window.period.start),
            period_end: Some(window.period.end),
        }]
    }

    fn name(&self) -> &'static str {
        "month_over_month"
    }
}

/// Growth from a zero month counts as +100%.
pub fn percent_change(previous_total: f64, current_total: f64) -> f64 {
    if previous_total == 0.0 {
        100.0
    } else {
        (current_total - previous_total) / previous_total * 100.0
    }
}

fn month_key((year, month): (i32, u32)) -> String {
    format!("{year:04}-{month:02}")
}
