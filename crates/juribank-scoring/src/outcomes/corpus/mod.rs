//! Synthetic historical case corpus and its CSV archive format.

mod archive;
mod generator;
pub mod profiles;

pub use archive::{read_records, write_records, CorpusImportError};
pub use generator::{generate_category_cases, generate_seeded};
pub use profiles::CategoryProfile;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::domain::{CaseCategory, CaseRecord};
use super::error::ScoringError;
use super::statistics::{aggregate_statistics, CategoryStatistics};

/// Historical cases grouped by category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoricalCorpus {
    cases: BTreeMap<CaseCategory, Vec<CaseRecord>>,
}

impl HistoricalCorpus {
    /// Generates `cases_per_category` synthetic cases for every category.
    pub fn generate<R>(cases_per_category: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let cases = CaseCategory::ALL
            .into_iter()
            .map(|category| {
                (
                    category,
                    generate_category_cases(category, cases_per_category, rng),
                )
            })
            .collect();
        Self { cases }
    }

    /// Generates from a seeded generator, or from entropy when `seed` is absent.
    pub fn synthetic(cases_per_category: usize, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::generate(cases_per_category, &mut rng)
    }

    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = CaseRecord>,
    {
        let mut cases: BTreeMap<CaseCategory, Vec<CaseRecord>> = BTreeMap::new();
        for record in records {
            cases.entry(record.category).or_default().push(record);
        }
        Self { cases }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CorpusImportError> {
        read_records(reader).map(Self::from_records)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CorpusImportError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn cases(&self, category: CaseCategory) -> &[CaseRecord] {
        self.cases
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn records(&self) -> impl Iterator<Item = &CaseRecord> {
        self.cases.values().flatten()
    }

    pub fn categories(&self) -> impl Iterator<Item = CaseCategory> + '_ {
        self.cases.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.cases.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Aggregates every category present in the corpus.
    pub fn statistics(&self) -> Result<BTreeMap<CaseCategory, CategoryStatistics>, ScoringError> {
        self.cases
            .iter()
            .map(|(category, cases)| Ok((*category, aggregate_statistics(cases)?)))
            .collect()
    }
}
