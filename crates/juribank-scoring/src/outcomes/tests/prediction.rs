use std::collections::BTreeMap;
use std::sync::Arc;

use super::common::*;
use crate::outcomes::domain::{CaseCategory, CaseDescription, Complexity, EvidenceQuality};
use crate::outcomes::error::{ScoringError, ValidationError};
use crate::outcomes::factors::RiskFactorTable;
use crate::outcomes::prediction::{PredictionEngine, RiskLevel, ScoringWeights, DISCLAIMER};
use crate::outcomes::statistics::{CategoryStatistics, CompensationBand};
use crate::outcomes::store::ScoringTables;

fn sample_descriptions() -> Vec<CaseDescription> {
    let table = RiskFactorTable::standard();
    let positives: Vec<String> = table.positive_factors().map(|f| f.name.clone()).collect();
    let negatives: Vec<String> = table.negative_factors().map(|f| f.name.clone()).collect();

    let mut descriptions = Vec::new();
    for category in CaseCategory::ALL {
        for evidence in EvidenceQuality::ALL {
            for months in [0, 6, 12, 24, 72, 73, 240] {
                for (positive_count, negative_count) in [(0, 0), (3, 0), (0, 3), (7, 0), (0, 7), (2, 2)] {
                    let mut description = CaseDescription::new(category)
                        .with_evidence(evidence)
                        .with_months_since_incident(months);
                    description
                        .positive_factors
                        .extend(positives.iter().take(positive_count).cloned());
                    description
                        .negative_factors
                        .extend(negatives.iter().take(negative_count).cloned());
                    descriptions.push(description);
                }
            }
        }
    }
    descriptions
}

#[test]
fn ppi_neutral_case_matches_published_rate() {
    let engine = reference_engine();

    let prediction = engine
        .generate_prediction(&neutral_case(CaseCategory::Ppi))
        .expect("ppi scores");

    assert_close(prediction.success_probability, 0.891, 0.001);
    assert_close(prediction.breakdown.unclamped, 0.909 * 0.98, 1e-12);
    assert_eq!(prediction.breakdown.evidence_multiplier, 1.0);
    assert_eq!(prediction.breakdown.time_multiplier, 0.98);
    assert_eq!(prediction.disclaimer, DISCLAIMER);
}

#[test]
fn probability_stays_within_bounds() {
    let engine = reference_engine();
    for description in sample_descriptions() {
        let prediction = engine.generate_prediction(&description).expect("valid case scores");
        assert!(
            (0.05..=0.95).contains(&prediction.success_probability),
            "{description:?} produced {}",
            prediction.success_probability
        );
    }
}

#[test]
fn estimate_ranges_contain_their_point_values() {
    let engine = reference_engine();
    for description in sample_descriptions() {
        for claim in [None, Some(0.0), Some(250.0), Some(1_000_000.0)] {
            let mut description = description.clone();
            description.claim_amount = claim;
            let prediction = engine.generate_prediction(&description).expect("valid case scores");

            let compensation = &prediction.compensation_estimate;
            assert!(compensation.range.minimum <= compensation.expected);
            assert!(compensation.expected <= compensation.range.maximum);

            let timeline = &prediction.timeline_estimate;
            assert!(timeline.range.minimum <= timeline.weeks);
            assert!(timeline.weeks <= timeline.range.maximum);
            assert_eq!(timeline.milestones.len(), 4);
            assert_eq!(
                timeline.milestones.last().map(|milestone| milestone.weeks),
                Some(timeline.weeks)
            );
        }
    }
}

#[test]
fn identical_inputs_give_identical_predictions() {
    let engine = reference_engine();
    let description = CaseDescription::new(CaseCategory::MortgageIssues)
        .with_positive("financial-hardship")
        .with_negative("contributory-negligence")
        .with_evidence(EvidenceQuality::Good)
        .with_claim_amount(12_500.0);

    let first = engine.generate_prediction(&description).expect("scores");
    let second = engine.generate_prediction(&description).expect("scores");

    assert_eq!(first, second);
}

#[test]
fn known_positive_factors_never_lower_probability() {
    let engine = reference_engine();
    let table = RiskFactorTable::standard();
    for category in CaseCategory::ALL {
        for evidence in EvidenceQuality::ALL {
            let base = CaseDescription::new(category).with_evidence(evidence);
            let before = engine.generate_prediction(&base).expect("scores");
            for factor in table.positive_factors() {
                let after = engine
                    .generate_prediction(&base.clone().with_positive(factor.name.clone()))
                    .expect("scores");
                assert!(
                    after.success_probability >= before.success_probability,
                    "{} lowered {category}",
                    factor.name
                );
            }
        }
    }
}

#[test]
fn known_negative_factors_never_raise_probability() {
    let engine = reference_engine();
    let table = RiskFactorTable::standard();
    for category in CaseCategory::ALL {
        for evidence in EvidenceQuality::ALL {
            let base = CaseDescription::new(category)
                .with_evidence(evidence)
                .with_positive("documented-bank-error");
            let before = engine.generate_prediction(&base).expect("scores");
            for factor in table.negative_factors() {
                let after = engine
                    .generate_prediction(&base.clone().with_negative(factor.name.clone()))
                    .expect("scores");
                assert!(
                    after.success_probability <= before.success_probability,
                    "{} raised {category}",
                    factor.name
                );
            }
        }
    }
}

#[test]
fn time_decay_switches_after_seventy_two_months() {
    let engine = reference_engine();

    let at_limit = engine
        .generate_prediction(&neutral_case(CaseCategory::BankCharges).with_months_since_incident(72))
        .expect("scores");
    let past_limit = engine
        .generate_prediction(&neutral_case(CaseCategory::BankCharges).with_months_since_incident(73))
        .expect("scores");

    assert_eq!(at_limit.breakdown.time_multiplier, 0.88);
    assert_eq!(past_limit.breakdown.time_multiplier, 0.30);
    assert_close(past_limit.success_probability, 0.869 * 0.30, 1e-12);
    assert!(past_limit
        .risk_assessment
        .risks
        .iter()
        .any(|risk| risk.contains("73 months")));
}

#[test]
fn missing_months_default_to_a_year() {
    let engine = reference_engine();
    let prediction = engine
        .generate_prediction(&CaseDescription::new(CaseCategory::Ppi))
        .expect("scores");
    assert_eq!(prediction.breakdown.months_since_incident, 12);
    assert_eq!(prediction.breakdown.time_multiplier, 0.98);
}

#[test]
fn oversized_claims_are_rejected_for_every_category() {
    let engine = reference_engine();
    for category in CaseCategory::ALL {
        let error = engine
            .generate_prediction(&CaseDescription::new(category).with_claim_amount(1_500_000.0))
            .expect_err("claim above the maximum");
        assert!(matches!(
            error,
            ScoringError::Validation(ValidationError::InvalidClaimAmount { amount, .. }) if amount == 1_500_000.0
        ));
    }
}

#[test]
fn negative_and_non_finite_claims_are_rejected() {
    let engine = reference_engine();
    for amount in [-1.0, f64::NAN, f64::INFINITY] {
        let error = engine
            .generate_prediction(&CaseDescription::new(CaseCategory::Ppi).with_claim_amount(amount))
            .expect_err("invalid claim");
        assert!(error.is_validation());
    }
    for amount in [0.0, 1_000_000.0] {
        engine
            .generate_prediction(&CaseDescription::new(CaseCategory::Ppi).with_claim_amount(amount))
            .expect("boundary claim accepted");
    }
}

#[test]
fn categories_missing_from_the_tables_are_unsupported() {
    let mut statistics = BTreeMap::new();
    statistics.insert(CaseCategory::Ppi, CategoryStatistics::reference(CaseCategory::Ppi));
    let engine = PredictionEngine::new(
        Arc::new(ScoringTables::new(statistics, RiskFactorTable::standard())),
        ScoringWeights::default(),
    );

    let error = engine
        .generate_prediction(&CaseDescription::new(CaseCategory::InvestmentAdvice))
        .expect_err("category has no statistics");

    assert_eq!(
        error,
        ScoringError::Validation(ValidationError::UnsupportedCaseType {
            case_type: "investment-advice".to_string(),
        })
    );
}

#[test]
fn unknown_factor_names_are_ignored() {
    let engine = reference_engine();
    let plain = engine
        .generate_prediction(&neutral_case(CaseCategory::PackagedAccount))
        .expect("scores");
    let drifted = engine
        .generate_prediction(
            &neutral_case(CaseCategory::PackagedAccount)
                .with_positive("bank-was-rude")
                .with_negative("documented-bank-error"),
        )
        .expect("scores");

    assert_eq!(plain.success_probability, drifted.success_probability);
    assert_eq!(plain.case_strength, drifted.case_strength);
    assert_eq!(
        drifted.ignored_factors,
        vec!["bank-was-rude", "documented-bank-error"]
    );
}

#[test]
fn strong_cases_land_in_the_high_band_but_never_exceptional() {
    let engine = reference_engine();
    let description = CaseDescription::new(CaseCategory::InvestmentAdvice)
        .with_evidence(EvidenceQuality::Excellent)
        .with_positive("mis-selling-evidence")
        .with_positive("vulnerable-customer")
        .with_positive("ombudsman-precedent");

    let prediction = engine.generate_prediction(&description).expect("scores");

    assert_close(prediction.case_strength, 0.9, 1e-12);
    assert_eq!(prediction.compensation_estimate.band, CompensationBand::High);
    assert_eq!(prediction.compensation_estimate.expected, 69_500);

    for description in sample_descriptions() {
        let prediction = engine.generate_prediction(&description).expect("scores");
        assert_ne!(
            prediction.compensation_estimate.band,
            CompensationBand::Exceptional
        );
    }
}

#[test]
fn realistic_ppi_claim_scores_end_to_end() {
    let engine = reference_engine();
    let description = ppi_submission()
        .into_description(today())
        .expect("submission validates");

    let prediction = engine.generate_prediction(&description).expect("scores");

    assert_eq!(prediction.success_probability, 0.95);
    assert!(prediction.breakdown.unclamped > 0.95);
    assert_close(prediction.case_strength, 0.67, 1e-9);
    assert_eq!(prediction.compensation_estimate.band, CompensationBand::Medium);
    assert_eq!(prediction.compensation_estimate.expected, 4_010);
    assert_eq!(prediction.compensation_estimate.range.minimum, 2_000);
    assert_eq!(prediction.compensation_estimate.range.maximum, 5_000);
    assert_eq!(prediction.compensation_estimate.recoverable_maximum, Some(4_800));
    assert_eq!(prediction.timeline_estimate.weeks, 12);
    assert_eq!(prediction.risk_assessment.level, RiskLevel::Medium);
    assert!(prediction.summary().starts_with("ppi: 95% estimated success"));
}

#[test]
fn small_claims_leave_the_expected_amount_unchanged() {
    let engine = reference_engine();
    let unclaimed = engine
        .generate_prediction(&neutral_case(CaseCategory::Ppi))
        .expect("scores");
    let claimed = engine
        .generate_prediction(&neutral_case(CaseCategory::Ppi).with_claim_amount(900.0))
        .expect("scores");

    assert_eq!(unclaimed.compensation_estimate.expected, 1_250);
    assert_eq!(claimed.compensation_estimate.expected, 1_250);
    assert_eq!(
        claimed.compensation_estimate.range,
        unclaimed.compensation_estimate.range
    );
    assert_eq!(claimed.compensation_estimate.recoverable_maximum, Some(900));
}

#[test]
fn evidence_tiers_set_multiplier_and_strength() {
    let engine = reference_engine();
    let expected = [
        (EvidenceQuality::VeryPoor, 0.70, 0.2),
        (EvidenceQuality::Poor, 0.85, 0.35),
        (EvidenceQuality::Medium, 1.00, 0.5),
        (EvidenceQuality::Good, 1.05, 0.65),
        (EvidenceQuality::Excellent, 1.15, 0.8),
    ];

    for (evidence, multiplier, strength) in expected {
        let description = neutral_case(CaseCategory::BankCharges).with_evidence(evidence);
        let prediction = engine.generate_prediction(&description).expect("scores");

        assert_close(prediction.breakdown.evidence_multiplier, multiplier, 1e-12);
        assert_close(prediction.case_strength, strength, 1e-12);
        assert_close(
            prediction.breakdown.unclamped,
            0.869 * multiplier * 0.98,
            1e-12,
        );
    }
    assert_eq!(expected.map(|(evidence, _, _)| evidence), EvidenceQuality::ALL);
}

#[test]
fn complexity_defaults_follow_the_category() {
    let engine = reference_engine();

    let defaulted = engine
        .generate_prediction(&CaseDescription::new(CaseCategory::InvestmentAdvice))
        .expect("scores");
    let explicit = engine
        .generate_prediction(
            &CaseDescription::new(CaseCategory::InvestmentAdvice).with_complexity(Complexity::High),
        )
        .expect("scores");
    let simple = engine
        .generate_prediction(
            &CaseDescription::new(CaseCategory::InvestmentAdvice).with_complexity(Complexity::Low),
        )
        .expect("scores");

    assert_eq!(defaulted.timeline_estimate, explicit.timeline_estimate);
    assert!(simple.timeline_estimate.weeks < defaulted.timeline_estimate.weeks);
}
