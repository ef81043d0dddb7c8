//! Self-assessment scoring and benchmark comparison.

use award_integrity::assessment::{
    benchmarks, compare_to_benchmark, score_self_assessment, AwardKind, BenchmarkBand,
    BenchmarkPosition, CompetitionType, ComplianceRating, FederalAgency, SelfAssessmentInput,
};
use chrono::NaiveDate;

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("valid date")
}

fn input() -> SelfAssessmentInput {
    SelfAssessmentInput {
        project_name: "Riverside Transit Hub".to_string(),
        agency: FederalAgency::FederalTransitAdministration,
        award_type: AwardKind::Grant,
        start_date: Some(date("2024-01-01")),
        end_date: Some(date("2027-12-31")),
        environmental_review_date: Some(date("2023-09-15")),
        bid_solicitation_date: Some(date("2023-10-01")),
        last_modification_date: None,
        total_funding_amount: 12_000_000.0,
        competition_type: CompetitionType::Competitive,
    }
}

#[test]
fn documented_competitive_project_rates_high() {
    let score = score_self_assessment(&input());

    assert_eq!(score.scores.environmental, 90);
    assert_eq!(score.scores.competitive_bidding, 85);
    assert_eq!(score.scores.modification_auth, 85);
    assert_eq!(score.scores.total, 87);
    assert_eq!(score.rating, ComplianceRating::High);
    assert_eq!(
        score.breakdown,
        "Project from agency with likely NEPA requirements. Competitive procurement process. Defined period of performance."
    );
    assert_eq!(
        score.recommendations,
        vec!["Your project appears to meet key procedural compliance indicators".to_string()]
    );
}

#[test]
fn sole_source_always_scores_forty_for_competition() {
    for agency in FederalAgency::all() {
        let mut form = input();
        form.agency = agency;
        form.competition_type = CompetitionType::SoleSource;
        form.end_date = None;
        form.total_funding_amount = 10.0;

        let score = score_self_assessment(&form);
        assert_eq!(score.scores.competitive_bidding, 40);
        assert!(score
            .recommendations
            .iter()
            .any(|text| text.contains("2 CFR 200.320")));
    }
}

#[test]
fn follow_on_awards_sit_on_the_justification_boundary() {
    let mut form = input();
    form.agency = FederalAgency::DepartmentOfEnergy;
    form.start_date = Some(date("2024-01-01"));
    form.end_date = Some(date("2027-01-01"));
    form.total_funding_amount = 500_000.0;
    form.competition_type = CompetitionType::FollowOn;

    let score = score_self_assessment(&form);
    assert_eq!(score.scores.competitive_bidding, 60);
    assert!(score.recommendations.is_empty());
}

#[test]
fn large_nepa_award_without_review_is_flagged() {
    let mut form = input();
    form.agency = FederalAgency::DepartmentOfTransportation;
    form.environmental_review_date = None;
    form.total_funding_amount = 100_000.0;

    let score = score_self_assessment(&form);
    assert_eq!(score.scores.environmental, 55);
    assert!(score
        .recommendations
        .iter()
        .any(|text| text.contains("NEPA environmental review status")));
    assert!(score
        .recommendations
        .iter()
        .any(|text| text.contains("https://www.ecfr.gov")));
}

#[test]
fn environmental_rule_covers_remaining_branches() {
    let mut form = input();
    form.agency = FederalAgency::Other;
    assert_eq!(score_self_assessment(&form).scores.environmental, 80);

    form.environmental_review_date = None;
    assert_eq!(score_self_assessment(&form).scores.environmental, 65);

    form.agency = FederalAgency::DepartmentOfEnergy;
    form.total_funding_amount = 99_999.0;
    assert_eq!(score_self_assessment(&form).scores.environmental, 65);
}

#[test]
fn modification_rule_tracks_dates() {
    let mut form = input();
    form.start_date = None;
    assert_eq!(score_self_assessment(&form).scores.modification_auth, 45);

    form.start_date = Some(date("2024-01-01"));
    form.end_date = None;
    let open_ended = score_self_assessment(&form);
    assert_eq!(open_ended.scores.modification_auth, 65);
    assert!(open_ended.breakdown.ends_with("No end date provided."));

    form.end_date = Some(date("2024-01-20"));
    let short = score_self_assessment(&form);
    assert_eq!(short.scores.modification_auth, 55);
    assert!(short
        .recommendations
        .iter()
        .any(|text| text.contains("longer period of performance")));
}

#[test]
fn rating_thresholds_follow_benchmarks() {
    let thresholds = benchmarks();
    assert_eq!(thresholds.average_score, 68);
    assert_eq!(thresholds.high_compliance_threshold, 75);
    assert_eq!(thresholds.medium_compliance_threshold, 50);

    let mut form = input();
    form.competition_type = CompetitionType::SoleSource;
    form.start_date = None;
    form.environmental_review_date = None;
    form.agency = FederalAgency::Other;
    let score = score_self_assessment(&form);
    // 65 * 0.40 + 40 * 0.35 + 45 * 0.25 = 51.25
    assert_eq!(score.scores.total, 51);
    assert_eq!(score.rating, ComplianceRating::Medium);
}

#[test]
fn benchmark_comparison_reports_direction_and_distance() {
    let above = compare_to_benchmark(85);
    assert_eq!(above.difference, 17);
    assert_eq!(above.comparison, BenchmarkPosition::Above);
    assert_eq!(above.band, BenchmarkBand::FarAbove);
    assert_eq!(above.percentile, 90);

    let average = compare_to_benchmark(70);
    assert_eq!(average.comparison, BenchmarkPosition::Average);
    assert_eq!(average.percentile, 50);

    let below = compare_to_benchmark(60);
    assert_eq!(below.comparison, BenchmarkPosition::Below);
    assert_eq!(below.band, BenchmarkBand::Below);
    assert_eq!(below.difference, 8);
    assert_eq!(below.percentile, 25);
}

#[test]
fn form_payload_deserializes_from_wire_names() {
    let form: SelfAssessmentInput = serde_json::from_value(serde_json::json!({
        "project_name": "Canal lock rehab",
        "agency": "department-of-interior",
        "award_type": "direct_payment",
        "start_date": "2024-04-01",
        "total_funding_amount": 500000.0,
        "competition_type": "follow-on"
    }))
    .expect("deserialize form");

    assert_eq!(form.agency, FederalAgency::DepartmentOfInterior);
    assert_eq!(form.award_type, AwardKind::DirectPayment);
    assert_eq!(form.competition_type, CompetitionType::FollowOn);
    assert!(form.end_date.is_none());

    let value = serde_json::to_value(score_self_assessment(&form)).expect("serialize");
    assert_eq!(value["rating"], "Medium Compliance");
    assert!(value["total"].is_number());
}
