use chrono::NaiveDate;

use super::domain::CaseCategory;

/// Caller input that cannot be scored. Always surfaced, never retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("unsupported case type '{case_type}'")]
    UnsupportedCaseType { case_type: String },
    #[error("claim amount {amount} must lie between 0 and {maximum}")]
    InvalidClaimAmount { amount: f64, maximum: f64 },
    #[error("incident date {incident_date} is after {today}")]
    IncidentInFuture {
        incident_date: NaiveDate,
        today: NaiveDate,
    },
    #[error("unknown evidence quality '{value}'")]
    UnknownEvidenceQuality { value: String },
    #[error("unknown complexity '{value}'")]
    UnknownComplexity { value: String },
}

/// Broken fixture or setup data. Fatal at startup rather than per request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DataError {
    #[error("cannot aggregate statistics from an empty corpus")]
    EmptyCorpus,
    #[error("corpus mixes categories: expected {expected}, found {found}")]
    MixedCategories {
        expected: CaseCategory,
        found: CaseCategory,
    },
    #[error("risk factor '{name}' has weight {weight}; weights must be non-zero and within [-1, 1]")]
    InvalidFactorWeight { name: String, weight: f64 },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Data(#[from] DataError),
}

impl ScoringError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ScoringError::Validation(_))
    }
}
