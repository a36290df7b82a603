use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use super::corpus::HistoricalCorpus;
use super::domain::CaseCategory;
use super::error::ScoringError;
use super::factors::RiskFactorTable;
use super::statistics::CategoryStatistics;

/// Where the category statistics come from at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum StatisticsSource {
    /// Published headline rates, no corpus.
    Reference,
    /// Aggregates of a freshly generated corpus.
    Synthetic {
        cases_per_category: usize,
        seed: Option<u64>,
    },
}

impl Default for StatisticsSource {
    fn default() -> Self {
        StatisticsSource::Synthetic {
            cases_per_category: 500,
            seed: None,
        }
    }
}

/// Immutable statistics and factor vocabulary consumed by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringTables {
    statistics: BTreeMap<CaseCategory, CategoryStatistics>,
    factors: RiskFactorTable,
}

impl ScoringTables {
    pub fn new(
        statistics: BTreeMap<CaseCategory, CategoryStatistics>,
        factors: RiskFactorTable,
    ) -> Self {
        Self {
            statistics,
            factors,
        }
    }

    pub fn reference() -> Self {
        let statistics = CaseCategory::ALL
            .into_iter()
            .map(|category| (category, CategoryStatistics::reference(category)))
            .collect();
        Self::new(statistics, RiskFactorTable::standard())
    }

    pub fn from_corpus(
        corpus: &HistoricalCorpus,
        factors: RiskFactorTable,
    ) -> Result<Self, ScoringError> {
        Ok(Self::new(corpus.statistics()?, factors))
    }

    pub fn build(source: &StatisticsSource) -> Result<Self, ScoringError> {
        match source {
            StatisticsSource::Reference => Ok(Self::reference()),
            StatisticsSource::Synthetic {
                cases_per_category,
                seed,
            } => {
                let corpus = HistoricalCorpus::synthetic(*cases_per_category, *seed);
                Self::from_corpus(&corpus, RiskFactorTable::standard())
            }
        }
    }

    pub fn statistics(&self, category: CaseCategory) -> Option<&CategoryStatistics> {
        self.statistics.get(&category)
    }

    pub fn all_statistics(&self) -> impl Iterator<Item = &CategoryStatistics> {
        self.statistics.values()
    }

    pub fn factors(&self) -> &RiskFactorTable {
        &self.factors
    }
}

/// Current tables behind a copy-on-write swap.
///
/// Readers clone the `Arc` and keep a consistent snapshot for as long as they
/// need it; `replace` installs a new table set without touching the old one.
#[derive(Debug)]
pub struct StatisticsStore {
    current: RwLock<Arc<ScoringTables>>,
}

impl StatisticsStore {
    pub fn new(tables: ScoringTables) -> Self {
        Self {
            current: RwLock::new(Arc::new(tables)),
        }
    }

    pub fn snapshot(&self) -> Arc<ScoringTables> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Installs `tables`, returning the snapshot it replaced.
    pub fn replace(&self, tables: ScoringTables) -> Arc<ScoringTables> {
        let next = Arc::new(tables);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }
}
