use super::fingerprint::Fingerprint;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    ScoreOutliersLow,
    ScoreOutliersHigh,
    SpendingConcentration,
    MonthOverMonthChange,
}

impl InsightKind {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::ScoreOutliersLow,
            Self::ScoreOutliersHigh,
            Self::SpendingConcentration,
            Self::MonthOverMonthChange,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ScoreOutliersLow => "score_outliers_low",
            Self::ScoreOutliersHigh => "score_outliers_high",
            Self::SpendingConcentration => "spending_concentration",
            Self::MonthOverMonthChange => "month_over_month_change",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::ScoreOutliersLow => "Low integrity score outliers",
            Self::ScoreOutliersHigh => "High integrity score outliers",
            Self::SpendingConcentration => "Spending concentration by agency",
            Self::MonthOverMonthChange => "Month-over-month spending change",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a draft was produced by the routine schedule or by crossing a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    Cadence,
    Threshold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Only low-risk findings may be published without review.
    pub const fn auto_publishable(self) -> bool {
        matches!(self, Self::Low)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightDraft {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub summary: String,
    pub metrics: InsightMetrics,
    pub evidence: InsightEvidence,
    pub trigger_type: TriggerType,
    pub risk_level: RiskLevel,
    pub auto_publish_eligible: bool,
    pub fingerprint: Fingerprint,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
}

/// Structured facts behind a draft; the shape follows the draft's kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InsightMetrics {
    MonthOverMonth {
        previous_month: String,
        current_month: String,
        previous_total: f64,
        current_total: f64,
        percent_change: f64,
        threshold_percent: f64,
    },
    Concentration {
        total_spending: f64,
        top_agencies: Vec<AgencyShare>,
    },
    Outliers {
        percentile: u8,
        count: usize,
        min_score: u8,
        max_score: u8,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgencyShare {
    pub name: String,
    pub amount: f64,
    /// Percent of the period's total spend, two decimals.
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InsightEvidence {
    Sample { sample: Vec<EvidenceRecord> },
    TopAgencies { top_agency_names: Vec<String> },
    MonthCount { month_count: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceRecord {
    pub id: String,
    pub amount: f64,
    pub score: u8,
    pub recipient: Option<String>,
    pub funding_agency: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsightOptions {
    /// Absolute percent change at which a month-over-month draft becomes threshold-triggered.
    pub threshold_percent: f64,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    /// Fallback period bound when no award carries a start date. Defaults to the UTC date.
    pub today: Option<NaiveDate>,
}

impl Default for InsightOptions {
    fn default() -> Self {
        Self {
            threshold_percent: 25.0,
            period_start: None,
            period_end: None,
            today: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalysisPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}
