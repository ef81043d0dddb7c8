use super::InsightDetector;
use crate::insights::{
    round_to_hundredths, AgencyShare, AnalysisWindow, Fingerprint, InsightDraft, InsightEvidence,
    InsightKind, InsightMetrics, RiskLevel, TriggerType,
};
use std::collections::BTreeMap;

const TOP_AGENCY_COUNT: usize = 3;

/// Reports how much of the period's spend the largest funding agencies hold.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpendingConcentrationDetector;

impl InsightDetector for SpendingConcentrationDetector {
    fn detect(&self, window: &AnalysisWindow<'_>) -> Vec<InsightDraft> {
        let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
        for award in window.awards {
            *totals.entry(award.agency_bucket()).or_insert(0.0) += award.amount;
        }

        let total_spending: f64 = totals.values().sum();
        if total_spending <= 0.0 {
            return Vec::new();
        }

        let mut ranked: Vec<(&str, f64)> = totals.into_iter().collect();
        ranked.sort_by(|left, right| right.1.total_cmp(&left.1));

        let top_agencies: Vec<AgencyShare> = ranked
            .into_iter()
            .take(TOP_AGENCY_COUNT)
            .map(|(name, amount)| AgencyShare {
                name: name.to_string(),
                amount,
                share: round_to_hundredths(amount / total_spending * 100.0),
            })
            .collect();

        let top_share: f64 = top_agencies.iter().map(|agency| agency.share).sum();
        let top_agency_names: Vec<String> =
            top_agencies.iter().map(|agency| agency.name.clone()).collect();

        let mut sorted_names = top_agency_names.clone();
        sorted_names.sort();
        let kind = InsightKind::SpendingConcentration;
        let [start, end] = window.period_parts();
        let fingerprint =
            Fingerprint::from_parts([kind.as_str().to_string(), start, end, sorted_names.join(",")]);

        vec![InsightDraft {
            kind,
            title: kind.title().to_string(),
            summary: format!(
                "Top agencies account for {top_share:.1}% of total spending in this period."
            ),
            metrics: InsightMetrics::Concentration {
                total_spending,
                top_agencies,
            },
            evidence: InsightEvidence::TopAgencies { top_agency_names },
            trigger_type: TriggerType::Cadence,
            risk_level: RiskLevel::Low,
            auto_publish_eligible: RiskLevel::Low.auto_publishable(),
            fingerprint,
            period_start: Some(window.period.start),
            period_end: Some(window.period.end),
        }]
    }

    fn name(&self) -> &'static str {
        "spending_concentration"
    }
}
