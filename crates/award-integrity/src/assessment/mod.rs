//! Private self-assessment scoring for user-submitted project details.
//!
//! Mirrors the public award scorer's three-rule shape but reads a small form
//! instead of the spending feed, applies [`SELF_ASSESSMENT_WEIGHTS`], and adds
//! narrative feedback plus a coarse benchmark comparison.

mod benchmark;
mod narrative;
mod rules;

pub use benchmark::{
    benchmarks, compare_to_benchmark, BenchmarkBand, BenchmarkComparison, BenchmarkPosition,
    Benchmarks,
};
pub use rules::{competition_score, environmental_score, modification_score};

use crate::scoring::{ScoreBreakdown, SELF_ASSESSMENT_WEIGHTS};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Funding agencies offered on the assessment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FederalAgency {
    DepartmentOfTransportation,
    DepartmentOfEnergy,
    DepartmentOfHousingUrbanDevelopment,
    DepartmentOfCommerce,
    DepartmentOfAgriculture,
    EnvironmentalProtectionAgency,
    DepartmentOfInterior,
    FederalHighwayAdministration,
    FederalTransitAdministration,
    Other,
}

impl FederalAgency {
    pub const fn all() -> [Self; 10] {
        [
            Self::DepartmentOfTransportation,
            Self::DepartmentOfEnergy,
            Self::DepartmentOfHousingUrbanDevelopment,
            Self::DepartmentOfCommerce,
            Self::DepartmentOfAgriculture,
            Self::EnvironmentalProtectionAgency,
            Self::DepartmentOfInterior,
            Self::FederalHighwayAdministration,
            Self::FederalTransitAdministration,
            Self::Other,
        ]
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::DepartmentOfTransportation => "department-of-transportation",
            Self::DepartmentOfEnergy => "department-of-energy",
            Self::DepartmentOfHousingUrbanDevelopment => "department-of-housing-urban-development",
            Self::DepartmentOfCommerce => "department-of-commerce",
            Self::DepartmentOfAgriculture => "department-of-agriculture",
            Self::EnvironmentalProtectionAgency => "environmental-protection-agency",
            Self::DepartmentOfInterior => "department-of-interior",
            Self::FederalHighwayAdministration => "federal-highway-administration",
            Self::FederalTransitAdministration => "federal-transit-administration",
            Self::Other => "other",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::DepartmentOfTransportation => "Department of Transportation (DOT)",
            Self::DepartmentOfEnergy => "Department of Energy (DOE)",
            Self::DepartmentOfHousingUrbanDevelopment => {
                "Department of Housing and Urban Development (HUD)"
            }
            Self::DepartmentOfCommerce => "Department of Commerce (DOC)",
            Self::DepartmentOfAgriculture => "Department of Agriculture (USDA)",
            Self::EnvironmentalProtectionAgency => "Environmental Protection Agency (EPA)",
            Self::DepartmentOfInterior => "Department of Interior (DOI)",
            Self::FederalHighwayAdministration => "Federal Highway Administration (FHWA)",
            Self::FederalTransitAdministration => "Federal Transit Administration (FTA)",
            Self::Other => "Other Federal Agency",
        }
    }

    /// Agencies whose infrastructure awards typically require NEPA review.
    pub const fn is_nepa_relevant(self) -> bool {
        !matches!(self, Self::Other)
    }
}

impl FromStr for FederalAgency {
    type Err = UnknownOption;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Self::all()
            .into_iter()
            .find(|agency| agency.slug().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownOption::new("agency", value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AwardKind {
    Grant,
    Contract,
    Loan,
    DirectPayment,
}

impl FromStr for AwardKind {
    type Err = UnknownOption;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "grant" => Ok(Self::Grant),
            "contract" => Ok(Self::Contract),
            "loan" => Ok(Self::Loan),
            "direct_payment" | "direct-payment" => Ok(Self::DirectPayment),
            other => Err(UnknownOption::new("award type", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompetitionType {
    #[serde(rename = "competitive")]
    Competitive,
    #[serde(rename = "sole_source")]
    SoleSource,
    #[serde(rename = "follow-on")]
    FollowOn,
}

impl FromStr for CompetitionType {
    type Err = UnknownOption;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "competitive" => Ok(Self::Competitive),
            "sole_source" | "sole-source" => Ok(Self::SoleSource),
            "follow-on" | "follow_on" => Ok(Self::FollowOn),
            other => Err(UnknownOption::new("competition type", other)),
        }
    }
}

/// A form value outside the fixed option lists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {field} '{value}'")]
pub struct UnknownOption {
    pub field: &'static str,
    pub value: String,
}

impl UnknownOption {
    fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

/// User-submitted project details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelfAssessmentInput {
    pub project_name: String,
    pub agency: FederalAgency,
    pub award_type: AwardKind,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub environmental_review_date: Option<NaiveDate>,
    #[serde(default)]
    pub bid_solicitation_date: Option<NaiveDate>,
    #[serde(default)]
    pub last_modification_date: Option<NaiveDate>,
    pub total_funding_amount: f64,
    pub competition_type: CompetitionType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComplianceRating {
    #[serde(rename = "High Compliance")]
    High,
    #[serde(rename = "Medium Compliance")]
    Medium,
    #[serde(rename = "Low Compliance")]
    Low,
}

impl ComplianceRating {
    pub fn from_total(total: u8) -> Self {
        let thresholds = benchmarks();
        if total >= thresholds.high_compliance_threshold {
            Self::High
        } else if total >= thresholds.medium_compliance_threshold {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High Compliance",
            Self::Medium => "Medium Compliance",
            Self::Low => "Low Compliance",
        }
    }
}

impl fmt::Display for ComplianceRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelfAssessmentScore {
    #[serde(flatten)]
    pub scores: ScoreBreakdown,
    pub rating: ComplianceRating,
    pub breakdown: String,
    pub recommendations: Vec<String>,
}

pub fn score_self_assessment(input: &SelfAssessmentInput) -> SelfAssessmentScore {
    let scores = ScoreBreakdown::weighted(
        environmental_score(input),
        competition_score(input),
        modification_score(input),
        &SELF_ASSESSMENT_WEIGHTS,
    );

    SelfAssessmentScore {
        scores,
        rating: ComplianceRating::from_total(scores.total),
        breakdown: narrative::breakdown(input, &scores),
        recommendations: narrative::recommendations(input, &scores),
    }
}
