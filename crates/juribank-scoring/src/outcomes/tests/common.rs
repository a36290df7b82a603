use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::outcomes::domain::{CaseCategory, CaseDescription, EvidenceQuality};
use crate::outcomes::intake::CaseSubmission;
use crate::outcomes::prediction::{PredictionEngine, ScoringWeights};
use crate::outcomes::service::OutcomeService;
use crate::outcomes::store::{ScoringTables, StatisticsStore};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date")
}

pub(super) fn reference_engine() -> PredictionEngine {
    PredictionEngine::new(Arc::new(ScoringTables::reference()), ScoringWeights::default())
}

pub(super) fn reference_service() -> OutcomeService {
    OutcomeService::new(
        Arc::new(StatisticsStore::new(ScoringTables::reference())),
        ScoringWeights::default(),
    )
}

/// A neutral case: no factors, medium evidence, incident a year ago.
pub(super) fn neutral_case(category: CaseCategory) -> CaseDescription {
    CaseDescription::new(category)
        .with_evidence(EvidenceQuality::Medium)
        .with_months_since_incident(12)
}

pub(super) fn ppi_submission() -> CaseSubmission {
    CaseSubmission {
        case_type: "ppi".to_string(),
        positive_factors: vec![
            "mis-selling-evidence".to_string(),
            "complete-paper-trail".to_string(),
        ],
        negative_factors: vec!["informed-consent-given".to_string()],
        evidence_quality: Some("good".to_string()),
        complexity: None,
        claim_amount: Some(4_800.0),
        bank_name: Some("Lloyds".to_string()),
        months_since_incident: Some(18),
        incident_date: None,
    }
}

pub(super) fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} +/- {tolerance}, got {actual}"
    );
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
