//! Case outcome scoring: historical corpus, category statistics and the
//! prediction engine that turns a case description into an estimate.

pub mod corpus;
pub mod domain;
pub mod error;
pub mod factors;
pub mod intake;
pub mod prediction;
pub mod router;
pub mod service;
pub mod statistics;
pub mod store;

#[cfg(test)]
mod tests;

pub use corpus::{
    generate_category_cases, read_records, write_records, CorpusImportError, HistoricalCorpus,
};
pub use domain::{CaseCategory, CaseDescription, CaseRecord, Complexity, EvidenceQuality};
pub use error::{DataError, ScoringError, ValidationError};
pub use factors::{RiskFactor, RiskFactorTable};
pub use intake::CaseSubmission;
pub use prediction::{
    CompensationEstimate, Prediction, PredictionEngine, RiskAssessment, RiskLevel,
    ScoringWeights, TimelineEstimate, DISCLAIMER,
};
pub use router::outcome_router;
pub use service::{CategorySummary, OutcomeService, RefreshReport};
pub use statistics::{
    aggregate_statistics, CategoryStatistics, CompensationBand, CompensationRange,
    CompensationRanges,
};
pub use store::{ScoringTables, StatisticsSource, StatisticsStore};
