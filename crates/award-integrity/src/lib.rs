//! Procedural compliance scoring and insight mining for federal infrastructure awards.
//!
//! Raw award records flow through [`awards::normalize_awards`], are scored with
//! [`scoring::compute_score`], and then feed both the dashboard aggregation in
//! [`agencies`] and the batch insight miner in [`insights`].

pub mod agencies;
pub mod assessment;
pub mod awards;
pub mod config;
pub mod error;
pub mod insights;
pub mod scoring;
pub mod telemetry;

pub use agencies::{aggregate_by_agency, AgencyStats, ScoreDistribution};
pub use assessment::{
    compare_to_benchmark, score_self_assessment, SelfAssessmentInput, SelfAssessmentScore,
};
pub use awards::{normalize_awards, Award, RawAward};
pub use insights::{mine_insights, InsightDraft, InsightOptions};
pub use scoring::{compute_score, score_awards, ScoreBreakdown};
