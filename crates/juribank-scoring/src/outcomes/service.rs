use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::domain::CaseCategory;
use super::error::{ScoringError, ValidationError};
use super::intake::CaseSubmission;
use super::prediction::{Prediction, PredictionEngine, ScoringWeights};
use super::statistics::CategoryStatistics;
use super::store::{ScoringTables, StatisticsSource, StatisticsStore};

/// Service composing the statistics store with the scoring rubric.
pub struct OutcomeService {
    store: Arc<StatisticsStore>,
    weights: ScoringWeights,
}

/// Headline numbers for one category, for listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: CaseCategory,
    pub label: String,
    pub total_cases: u32,
    pub success_rate: f64,
    pub median_compensation: u32,
    pub average_timeframe_weeks: u32,
}

impl From<&CategoryStatistics> for CategorySummary {
    fn from(statistics: &CategoryStatistics) -> Self {
        Self {
            category: statistics.category,
            label: statistics.category.label().to_string(),
            total_cases: statistics.total_cases,
            success_rate: statistics.success_rate,
            median_compensation: statistics.median_compensation,
            average_timeframe_weeks: statistics.average_timeframe_weeks,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshReport {
    pub source: StatisticsSource,
    pub categories: Vec<CategorySummary>,
}

impl OutcomeService {
    pub fn new(store: Arc<StatisticsStore>, weights: ScoringWeights) -> Self {
        Self { store, weights }
    }

    /// Builds the tables for `source` and wraps them in a fresh store.
    pub fn from_source(
        source: &StatisticsSource,
        weights: ScoringWeights,
    ) -> Result<Self, ScoringError> {
        let tables = ScoringTables::build(source)?;
        info!(?source, "scoring tables built");
        Ok(Self::new(Arc::new(StatisticsStore::new(tables)), weights))
    }

    pub fn store(&self) -> &Arc<StatisticsStore> {
        &self.store
    }

    /// Engine bound to the current snapshot.
    pub fn engine(&self) -> PredictionEngine {
        PredictionEngine::new(self.store.snapshot(), self.weights.clone())
    }

    pub fn predict(
        &self,
        submission: CaseSubmission,
        today: NaiveDate,
    ) -> Result<Prediction, ScoringError> {
        let result = submission
            .into_description(today)
            .map_err(ScoringError::from)
            .and_then(|description| self.engine().generate_prediction(&description));

        match &result {
            Ok(prediction) => debug!(
                case_type = %prediction.case_type,
                probability = prediction.success_probability,
                ignored = prediction.ignored_factors.len(),
                "prediction generated"
            ),
            Err(error) => warn!(%error, "case rejected"),
        }

        result
    }

    pub fn statistics(&self, category: CaseCategory) -> Result<CategoryStatistics, ScoringError> {
        self.store
            .snapshot()
            .statistics(category)
            .cloned()
            .ok_or_else(|| {
                ValidationError::UnsupportedCaseType {
                    case_type: category.slug().to_string(),
                }
                .into()
            })
    }

    pub fn categories(&self) -> Vec<CategorySummary> {
        self.store
            .snapshot()
            .all_statistics()
            .map(CategorySummary::from)
            .collect()
    }

    /// Rebuilds the tables and swaps them in. Readers mid-request keep their snapshot.
    pub fn refresh(&self, source: StatisticsSource) -> Result<RefreshReport, ScoringError> {
        let tables = ScoringTables::build(&source)?;
        let categories = tables.all_statistics().map(CategorySummary::from).collect();
        self.store.replace(tables);
        info!(?source, "scoring tables replaced");

        Ok(RefreshReport { source, categories })
    }
}
