//! Canonical award records and the loaders that produce them from loosely-typed input.

mod normalizer;
mod parser;
pub mod source;

pub use normalizer::{normalize_award, normalize_awards};
pub use parser::{load_raw_awards, read_raw_awards, RawAwardError, RawAwardFormat};

use crate::scoring::ScoreBreakdown;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Aggregation bucket used when an award carries no funding agency.
pub const UNKNOWN_AGENCY: &str = "Unknown";

/// A single award as fetched from the upstream feed: free-form field names and values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawAward(pub Map<String, Value>);

impl RawAward {
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for RawAward {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

/// Federal assistance award type codes carried by the spending feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AwardTypeCode {
    FormulaGrant,
    ProjectGrant,
    CooperativeAgreement,
    DirectLoan,
}

impl AwardTypeCode {
    /// Accepts a bare code (`"B"`) or a labelled value ending in `(B)`.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        let code = match trimmed.strip_suffix(')') {
            Some(head) => head.rsplit_once('(').map(|(_, code)| code.trim())?,
            None => trimmed,
        };

        match code.to_ascii_uppercase().as_str() {
            "A" => Some(Self::FormulaGrant),
            "B" => Some(Self::ProjectGrant),
            "C" => Some(Self::CooperativeAgreement),
            "D" => Some(Self::DirectLoan),
            _ => None,
        }
    }

    pub const fn code(self) -> char {
        match self {
            Self::FormulaGrant => 'A',
            Self::ProjectGrant => 'B',
            Self::CooperativeAgreement => 'C',
            Self::DirectLoan => 'D',
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FormulaGrant => "Formula Grant",
            Self::ProjectGrant => "Project Grant",
            Self::CooperativeAgreement => "Cooperative Agreement",
            Self::DirectLoan => "Direct Loan",
        }
    }
}

/// Canonical award shape shared by the scorer, the aggregator, and the insight miner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Award {
    pub id: String,
    pub amount: f64,
    pub score: Option<ScoreBreakdown>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub recipient: Option<String>,
    pub funding_agency: Option<String>,
    pub awarding_agency: Option<String>,
    pub state: Option<String>,
    pub description: Option<String>,
    pub award_type: Option<AwardTypeCode>,
}

impl Award {
    pub fn new(id: impl Into<String>, amount: f64) -> Self {
        Self {
            id: id.into(),
            amount,
            score: None,
            start_date: None,
            end_date: None,
            recipient: None,
            funding_agency: None,
            awarding_agency: None,
            state: None,
            description: None,
            award_type: None,
        }
    }

    pub fn total_score(&self) -> Option<u8> {
        self.score.map(|score| score.total)
    }

    /// Funding agency name, or [`UNKNOWN_AGENCY`] when absent.
    pub fn agency_bucket(&self) -> &str {
        self.funding_agency.as_deref().unwrap_or(UNKNOWN_AGENCY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn award_type_accepts_bare_and_labelled_codes() {
        assert_eq!(AwardTypeCode::parse("B"), Some(AwardTypeCode::ProjectGrant));
        assert_eq!(AwardTypeCode::parse(" a "), Some(AwardTypeCode::FormulaGrant));
        assert_eq!(
            AwardTypeCode::parse("COOPERATIVE AGREEMENT (C)"),
            Some(AwardTypeCode::CooperativeAgreement)
        );
        assert_eq!(AwardTypeCode::parse("Grant"), None);
        assert_eq!(AwardTypeCode::parse("(Z)"), None);
    }

    #[test]
    fn agency_bucket_defaults_to_unknown() {
        let mut award = Award::new("1", 10.0);
        assert_eq!(award.agency_bucket(), UNKNOWN_AGENCY);
        award.funding_agency = Some("Department of Energy".to_string());
        assert_eq!(award.agency_bucket(), "Department of Energy");
    }
}
