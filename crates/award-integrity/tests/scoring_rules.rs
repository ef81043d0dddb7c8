//! Scoring behaviour through the public normalize-then-score pipeline.

use award_integrity::awards::AwardTypeCode;
use award_integrity::scoring::{ComplianceBand, ScoreBreakdown, AWARD_WEIGHTS, SELF_ASSESSMENT_WEIGHTS};
use award_integrity::{compute_score, normalize_awards, score_awards, RawAward};
use serde_json::json;

fn raw(value: serde_json::Value) -> RawAward {
    serde_json::from_value(value).expect("raw award object")
}

#[test]
fn loosely_typed_records_normalize_one_to_one() {
    let records = vec![
        raw(json!({
            "Award ID": "FAIN-1",
            "Award Amount": "$1,250,000.00",
            "Start Date": "2024-02-01",
            "End Date": "not a date",
            "Funding Agency": "Department of Transportation",
            "award_type_code": "PROJECT GRANT (B)"
        })),
        raw(json!({ "award_id": 42, "award_amount": -5 })),
        raw(json!({})),
    ];

    let awards = normalize_awards(&records);
    assert_eq!(awards.len(), 3);

    assert_eq!(awards[0].id, "FAIN-1");
    assert_eq!(awards[0].amount, 1_250_000.0);
    assert!(awards[0].start_date.is_some());
    assert!(awards[0].end_date.is_none());
    assert_eq!(awards[0].award_type, Some(AwardTypeCode::ProjectGrant));
    assert!(awards[0].score.is_none());

    assert_eq!(awards[1].id, "42");
    assert_eq!(awards[1].amount, 0.0);

    assert_eq!(awards[2].id, "");
    assert_eq!(awards[2].agency_bucket(), "Unknown");
}

#[test]
fn infrastructure_project_grant_with_multi_year_term_scores_green() {
    let awards = score_awards(normalize_awards(&[raw(json!({
        "Award ID": "FAIN-2",
        "Award Amount": 4_000_000,
        "Description": "Replace the Elm Street bridge deck",
        "award_type_code": "B",
        "Start Date": "2023-06-01",
        "End Date": "2026-05-31"
    }))]));

    let score = awards[0].score.expect("scored");
    assert_eq!(score.environmental, 85);
    assert_eq!(score.competitive_bidding, 85);
    assert_eq!(score.modification_auth, 85);
    assert_eq!(score.total, 85);
    assert_eq!(score.band(), ComplianceBand::Green);
}

#[test]
fn record_without_signals_scores_neutral_defaults() {
    let awards = normalize_awards(&[raw(json!({ "Award ID": "bare" }))]);
    let score = compute_score(&awards[0]);

    assert_eq!(score.environmental, 60);
    assert_eq!(score.competitive_bidding, 60);
    assert_eq!(score.modification_auth, 50);
    assert_eq!(score.total, 57);
    assert_eq!(score.band(), ComplianceBand::Red);
}

#[test]
fn total_is_rounded_weighted_sum_for_every_component_combination() {
    for weights in [AWARD_WEIGHTS, SELF_ASSESSMENT_WEIGHTS] {
        for environmental in (0..=100).step_by(5) {
            for competitive in (0..=100).step_by(5) {
                for modification in (0..=100).step_by(5) {
                    let breakdown =
                        ScoreBreakdown::weighted(environmental, competitive, modification, &weights);
                    let expected = (f64::from(environmental) * f64::from(weights.environmental)
                        + f64::from(competitive) * f64::from(weights.competitive_bidding)
                        + f64::from(modification) * f64::from(weights.modification_auth))
                        / 100.0;
                    assert_eq!(f64::from(breakdown.total), (expected + 1e-9).round());
                }
            }
        }
    }
}

#[test]
fn known_weighting_fixtures_hold() {
    assert_eq!(ScoreBreakdown::weighted(85, 85, 85, &AWARD_WEIGHTS).total, 85);
    assert_eq!(ScoreBreakdown::weighted(90, 85, 85, &SELF_ASSESSMENT_WEIGHTS).total, 87);
}

#[test]
fn explanation_mentions_each_factor() {
    let score = ScoreBreakdown::weighted(85, 45, 75, &AWARD_WEIGHTS);
    assert_eq!(
        score.explanation(),
        "Infrastructure project with likely NEPA review. Non-competitive or formula-based allocation. Proper period of performance defined"
    );
    let components = score.components(&AWARD_WEIGHTS);
    assert_eq!(components.len(), 3);
    assert_eq!(components.iter().map(|c| u32::from(c.weight)).sum::<u32>(), 100);
}
