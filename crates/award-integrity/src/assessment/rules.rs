use super::{CompetitionType, SelfAssessmentInput};
use crate::scoring::{duration_days, duration_score};

const NEPA_REVIEW_FUNDING_FLOOR: f64 = 100_000.0;

/// Environmental review: a documented review date scores highest; a large
/// NEPA-agency award without one is flagged low.
pub fn environmental_score(input: &SelfAssessmentInput) -> u8 {
    let nepa_agency = input.agency.is_nepa_relevant();

    if input.environmental_review_date.is_some() {
        return if nepa_agency { 90 } else { 80 };
    }

    if nepa_agency && input.total_funding_amount >= NEPA_REVIEW_FUNDING_FLOOR {
        return 55;
    }

    65
}

pub fn competition_score(input: &SelfAssessmentInput) -> u8 {
    match input.competition_type {
        CompetitionType::Competitive => 85,
        CompetitionType::SoleSource => 40,
        CompetitionType::FollowOn => 60,
    }
}

/// Period of performance. A missing start date scores 45 even when an end date is given.
pub fn modification_score(input: &SelfAssessmentInput) -> u8 {
    match (input.start_date, input.end_date) {
        (None, _) => 45,
        (Some(start), Some(end)) => duration_score(duration_days(start, end)),
        (Some(_), None) => 65,
    }
}
