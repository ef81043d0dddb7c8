use super::InsightDetector;
use crate::awards::Award;
use crate::insights::{
    AnalysisWindow, EvidenceRecord, Fingerprint, InsightDraft, InsightEvidence, InsightKind,
    InsightMetrics, RiskLevel, TriggerType, EVIDENCE_SAMPLE_LIMIT,
};

/// Scored awards required before the tails are meaningful.
pub const MIN_SCORED_AWARDS: usize = 10;

/// Flags the bottom and top 5% of scored awards.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlierDetector;

impl InsightDetector for OutlierDetector {
    fn enable(&self, window: &AnalysisWindow<'_>) -> bool {
        window
            .awards
            .iter()
            .filter(|award| award.score.is_some())
            .count()
            >= MIN_SCORED_AWARDS
    }

    fn detect(&self, window: &AnalysisWindow<'_>) -> Vec<InsightDraft> {
        let mut scored: Vec<(&Award, u8)> = window
            .awards
            .iter()
            .filter_map(|award| award.total_score().map(|score| (award, score)))
            .collect();
        if scored.len() < MIN_SCORED_AWARDS {
            return Vec::new();
        }
        scored.sort_by_key(|(_, score)| *score);

        let slice_size = slice_size(scored.len());
        // Ten or more records keep the two tails disjoint.
        debug_assert!(slice_size * 2 <= scored.len());

        let low = &scored[..slice_size];
        let high = &scored[scored.len() - slice_size..];

        vec![
            outlier_draft(window, InsightKind::ScoreOutliersLow, low, slice_size),
            outlier_draft(window, InsightKind::ScoreOutliersHigh, high, slice_size),
        ]
    }

    fn name(&self) -> &'static str {
        "score_outliers"
    }
}

/// 5% of the sample, at least one record.
pub fn slice_size(scored: usize) -> usize {
    (scored / 20).max(1)
}

fn outlier_draft(
    window: &AnalysisWindow<'_>,
    kind: InsightKind,
    slice: &[(&Award, u8)],
    slice_size: usize,
) -> InsightDraft {
    let scores = slice.iter().map(|(_, score)| *score);
    let min_score = scores.clone().min().unwrap_or(0);
    let max_score = scores.max().unwrap_or(0);

    let (percentile, summary) = match kind {
        InsightKind::ScoreOutliersLow => (
            5,
            format!("Bottom {slice_size} projects fall below typical integrity scores in this period."),
        ),
        _ => (
            95,
            format!("Top {slice_size} projects exceed typical integrity scores in this period."),
        ),
    };

    let sample = slice
        .iter()
        .take(EVIDENCE_SAMPLE_LIMIT)
        .map(|(award, score)| EvidenceRecord {
            id: award.id.clone(),
            amount: award.amount,
            score: *score,
            recipient: award.recipient.clone(),
            funding_agency: award.funding_agency.clone(),
        })
        .collect();

    let [start, end] = window.period_parts();
    let fingerprint =
        Fingerprint::from_parts([kind.as_str().to_string(), start, end, slice_size.to_string()]);

    InsightDraft {
        kind,
        title: kind.title().to_string(),
        summary,
        metrics: InsightMetrics::Outliers {
            percentile,
            count: slice.len(),
            min_score,
            max_score,
        },
        evidence: InsightEvidence::Sample { sample },
        trigger_type: TriggerType::Cadence,
        risk_level: RiskLevel::Medium,
        auto_publish_eligible: false,
        fingerprint,
        period_start: Some(window.period.start),
        period_end: Some(window.period.end),
    }
}
