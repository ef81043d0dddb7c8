use crate::awards::{Award, AwardTypeCode};
use chrono::NaiveDate;

// Terms indicating construction or infrastructure work that typically triggers NEPA review.
const INFRASTRUCTURE_KEYWORDS: &[&str] = &[
    "highway",
    "bridge",
    "road",
    "transportation",
    "transit",
    "water",
    "sewer",
    "wastewater",
    "storm",
    "flood",
    "energy",
    "power",
    "grid",
    "renewable",
    "solar",
    "wind",
    "building",
    "construction",
    "facility",
    "infrastructure",
    "environmental",
    "cleanup",
    "remediation",
];

const COMPETITIVE_KEYWORDS: &[&str] = &["competitive", "solicitation", "request for proposal", "rfp"];
const NON_COMPETITIVE_KEYWORDS: &[&str] =
    &["formula", "direct allocation", "block grant", "entitlement"];
const STATE_LOCAL_RECIPIENT_PATTERNS: &[&str] =
    &["county", "city of", "town of", "state of", "municipality"];

/// Environmental review indicator: 85 when the description or awarding agency
/// names infrastructure work, 60 otherwise.
pub fn environmental_review(award: &Award) -> u8 {
    let description = lowercase(award.description.as_deref());
    let awarding_agency = lowercase(award.awarding_agency.as_deref());

    let infrastructure = INFRASTRUCTURE_KEYWORDS
        .iter()
        .any(|keyword| description.contains(keyword) || awarding_agency.contains(keyword));

    if infrastructure {
        85
    } else {
        60
    }
}

/// Competition indicator keyed off the award type code, then description
/// keywords, then recipient naming patterns.
pub fn competitive_bidding(award: &Award) -> u8 {
    if let Some(code) = award.award_type {
        return match code {
            AwardTypeCode::ProjectGrant => 85,
            AwardTypeCode::FormulaGrant => 50,
            AwardTypeCode::CooperativeAgreement => 70,
            AwardTypeCode::DirectLoan => 65,
        };
    }

    let description = lowercase(award.description.as_deref());
    if contains_any(&description, COMPETITIVE_KEYWORDS) {
        return 80;
    }
    if contains_any(&description, NON_COMPETITIVE_KEYWORDS) {
        return 45;
    }

    let recipient = lowercase(award.recipient.as_deref());
    if contains_any(&recipient, STATE_LOCAL_RECIPIENT_PATTERNS) {
        return 55;
    }

    60
}

/// Period-of-performance indicator. Rewards a 1-6 year duration band.
pub fn modification_authorization(award: &Award) -> u8 {
    match (award.start_date, award.end_date) {
        (None, None) => 50,
        (Some(start), Some(end)) => duration_score(duration_days(start, end)),
        _ => 65,
    }
}

pub(crate) fn duration_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Shared duration banding for both scoring variants.
pub(crate) fn duration_score(days: i64) -> u8 {
    if (365..=2190).contains(&days) {
        85
    } else if days < 30 {
        55
    } else {
        75
    }
}

fn lowercase(value: Option<&str>) -> String {
    value.unwrap_or_default().to_lowercase()
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
