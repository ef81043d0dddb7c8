//! Procedural compliance scoring.
//!
//! Three fixed rules each produce an integer in `0..=100`; the total is their
//! weighted sum rounded half-up. Weights are integer percentages so the
//! rounding is exact rather than subject to floating point drift.

mod rules;

pub use rules::{competitive_bidding, environmental_review, modification_authorization};
pub(crate) use rules::{duration_days, duration_score};

use crate::awards::Award;
use serde::Serialize;

/// The three procedural compliance factors scored for every award.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceFactor {
    EnvironmentalReview,
    CompetitiveBidding,
    ModificationAuthorization,
}

impl ComplianceFactor {
    pub const fn ordered() -> [Self; 3] {
        [
            Self::EnvironmentalReview,
            Self::CompetitiveBidding,
            Self::ModificationAuthorization,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::EnvironmentalReview => "Environmental Review",
            Self::CompetitiveBidding => "Competitive Bidding",
            Self::ModificationAuthorization => "Modification Authorization",
        }
    }

    pub const fn citation(self) -> &'static str {
        match self {
            Self::EnvironmentalReview => "42 U.S.C. \u{a7}4321 et seq. (NEPA); 2 CFR 200.329",
            Self::CompetitiveBidding => "2 CFR 200.319 (Competition); 2 CFR 200.400",
            Self::ModificationAuthorization => {
                "2 CFR 200.309 (Period of Performance); 2 CFR 200.403-405"
            }
        }
    }
}

/// Factor weights as integer percentages summing to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreWeights {
    pub environmental: u8,
    pub competitive_bidding: u8,
    pub modification_auth: u8,
}

/// Weights applied to public award records.
pub const AWARD_WEIGHTS: ScoreWeights = ScoreWeights {
    environmental: 35,
    competitive_bidding: 35,
    modification_auth: 30,
};

/// Weights applied to self-reported assessments.
pub const SELF_ASSESSMENT_WEIGHTS: ScoreWeights = ScoreWeights {
    environmental: 40,
    competitive_bidding: 35,
    modification_auth: 25,
};

impl ScoreWeights {
    pub const fn for_factor(&self, factor: ComplianceFactor) -> u8 {
        match factor {
            ComplianceFactor::EnvironmentalReview => self.environmental,
            ComplianceFactor::CompetitiveBidding => self.competitive_bidding,
            ComplianceFactor::ModificationAuthorization => self.modification_auth,
        }
    }

    /// `round(e*we + c*wc + m*wm)` with half-up rounding, computed in integers.
    pub fn weighted_total(&self, environmental: u8, competitive_bidding: u8, modification_auth: u8) -> u8 {
        debug_assert_eq!(
            u32::from(self.environmental)
                + u32::from(self.competitive_bidding)
                + u32::from(self.modification_auth),
            100
        );
        let weighted = u32::from(environmental) * u32::from(self.environmental)
            + u32::from(competitive_bidding) * u32::from(self.competitive_bidding)
            + u32::from(modification_auth) * u32::from(self.modification_auth);
        ((weighted + 50) / 100).min(100) as u8
    }
}

/// Component scores and their weighted total. The total is always derived from the components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub environmental: u8,
    pub competitive_bidding: u8,
    pub modification_auth: u8,
    pub total: u8,
}

impl ScoreBreakdown {
    pub fn weighted(
        environmental: u8,
        competitive_bidding: u8,
        modification_auth: u8,
        weights: &ScoreWeights,
    ) -> Self {
        let environmental = environmental.min(100);
        let competitive_bidding = competitive_bidding.min(100);
        let modification_auth = modification_auth.min(100);
        Self {
            environmental,
            competitive_bidding,
            modification_auth,
            total: weights.weighted_total(environmental, competitive_bidding, modification_auth),
        }
    }

    pub const fn component(&self, factor: ComplianceFactor) -> u8 {
        match factor {
            ComplianceFactor::EnvironmentalReview => self.environmental,
            ComplianceFactor::CompetitiveBidding => self.competitive_bidding,
            ComplianceFactor::ModificationAuthorization => self.modification_auth,
        }
    }

    /// Per-factor audit trail for display next to the total.
    pub fn components(&self, weights: &ScoreWeights) -> Vec<ScoreComponent> {
        ComplianceFactor::ordered()
            .into_iter()
            .map(|factor| ScoreComponent {
                factor,
                label: factor.label(),
                citation: factor.citation(),
                score: self.component(factor),
                weight: weights.for_factor(factor),
                note: self.note(factor),
            })
            .collect()
    }

    pub fn band(&self) -> ComplianceBand {
        ComplianceBand::from_score(self.total)
    }

    pub fn explanation(&self) -> String {
        ComplianceFactor::ordered()
            .into_iter()
            .map(|factor| self.note(factor))
            .collect::<Vec<_>>()
            .join(". ")
    }

    fn note(&self, factor: ComplianceFactor) -> &'static str {
        match factor {
            ComplianceFactor::EnvironmentalReview if self.environmental >= 80 => {
                "Infrastructure project with likely NEPA review"
            }
            ComplianceFactor::EnvironmentalReview => "Standard review process expected",
            ComplianceFactor::CompetitiveBidding if self.competitive_bidding >= 70 => {
                "Competitive award process"
            }
            ComplianceFactor::CompetitiveBidding => "Non-competitive or formula-based allocation",
            ComplianceFactor::ModificationAuthorization if self.modification_auth >= 70 => {
                "Proper period of performance defined"
            }
            ComplianceFactor::ModificationAuthorization => "Limited oversight period",
        }
    }
}

/// Discrete contribution to a score, allowing transparent audits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreComponent {
    pub factor: ComplianceFactor,
    pub label: &'static str,
    pub citation: &'static str,
    pub score: u8,
    pub weight: u8,
    pub note: &'static str,
}

/// Dashboard colour band for a total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceBand {
    Green,
    Yellow,
    Red,
}

impl ComplianceBand {
    pub const fn from_score(score: u8) -> Self {
        if score >= 80 {
            Self::Green
        } else if score >= 60 {
            Self::Yellow
        } else {
            Self::Red
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Green => "High Compliance",
            Self::Yellow => "Medium Compliance",
            Self::Red => "Low Compliance",
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Self::Green => "#22c55e",
            Self::Yellow => "#eab308",
            Self::Red => "#ef4444",
        }
    }
}

/// Scores a public award record.
pub fn compute_score(award: &Award) -> ScoreBreakdown {
    ScoreBreakdown::weighted(
        environmental_review(award),
        competitive_bidding(award),
        modification_authorization(award),
        &AWARD_WEIGHTS,
    )
}

/// Attaches a fresh breakdown to every award, replacing any previous score.
pub fn score_awards(awards: Vec<Award>) -> Vec<Award> {
    awards
        .into_iter()
        .map(|mut award| {
            award.score = Some(compute_score(&award));
            award
        })
        .collect()
}
