use super::{CompetitionType, FederalAgency, SelfAssessmentInput};
use crate::scoring::{duration_days, ScoreBreakdown};

const MAJOR_AWARD_FLOOR: f64 = 100_000.0;

pub(super) fn breakdown(input: &SelfAssessmentInput, scores: &ScoreBreakdown) -> String {
    let environmental = if scores.environmental >= 80 {
        "Project from agency with likely NEPA requirements"
    } else {
        "Environmental review status unclear"
    };

    let competition = match input.competition_type {
        CompetitionType::Competitive => "Competitive procurement process",
        CompetitionType::SoleSource => "Non-competitive (sole source) award",
        CompetitionType::FollowOn => "Follow-on or non-competitive award",
    };

    let period = if input.end_date.is_some() {
        "Defined period of performance"
    } else {
        "No end date provided"
    };

    format!("{environmental}. {competition}. {period}.")
}

pub(super) fn recommendations(input: &SelfAssessmentInput, scores: &ScoreBreakdown) -> Vec<String> {
    let mut recommendations = Vec::new();

    if scores.environmental < 70
        && input.environmental_review_date.is_none()
        && input.total_funding_amount >= MAJOR_AWARD_FLOOR
        && matches!(
            input.agency,
            FederalAgency::DepartmentOfTransportation | FederalAgency::EnvironmentalProtectionAgency
        )
    {
        recommendations.push(
            "Consider documenting your NEPA environmental review status - required for major federal awards"
                .to_string(),
        );
    }

    if scores.competitive_bidding < 60 {
        match input.competition_type {
            CompetitionType::SoleSource => recommendations.push(
                "Document the justification for sole-source procurement per 2 CFR 200.320"
                    .to_string(),
            ),
            CompetitionType::FollowOn => recommendations.push(
                "Ensure follow-on awards have proper justification and are not avoiding competition"
                    .to_string(),
            ),
            CompetitionType::Competitive => {}
        }
    }

    if input.end_date.is_none() {
        recommendations.push(
            "Define a clear period of performance end date for proper grant management"
                .to_string(),
        );
    }

    if let (Some(start), Some(end)) = (input.start_date, input.end_date) {
        if scores.modification_auth < 60 && duration_days(start, end) < 365 {
            recommendations.push(
                "Consider a longer period of performance for infrastructure projects (typically 1-5 years)"
                    .to_string(),
            );
        }
    }

    if scores.environmental < 60 || scores.competitive_bidding < 50 || scores.modification_auth < 50
    {
        recommendations.push(
            "Review federal requirements at https://www.ecfr.gov (2 CFR 200) for compliance guidance"
                .to_string(),
        );
    }

    if scores.environmental >= 80 && scores.competitive_bidding >= 80 && scores.modification_auth >= 80
    {
        recommendations
            .push("Your project appears to meet key procedural compliance indicators".to_string());
    }

    recommendations
}
