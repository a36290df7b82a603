use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::error::{DataError, ScoringError};

/// Named circumstance with a signed influence on predicted success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub name: String,
    pub weight: f64,
    pub description: String,
}

impl RiskFactor {
    pub fn new(name: impl Into<String>, weight: f64, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weight,
            description: description.into(),
        }
    }
}

const STANDARD_FACTORS: &[(&str, f64, &str)] = &[
    (
        "documented-bank-error",
        0.8,
        "Written evidence that the bank made an error",
    ),
    (
        "mis-selling-evidence",
        0.75,
        "Evidence the product was mis-sold or unsuitable",
    ),
    (
        "vulnerable-customer",
        0.7,
        "Customer was in vulnerable circumstances at the time",
    ),
    (
        "ombudsman-precedent",
        0.65,
        "Similar complaints have been upheld by the Financial Ombudsman",
    ),
    (
        "complete-paper-trail",
        0.6,
        "Statements, letters and call notes have been kept",
    ),
    (
        "financial-hardship",
        0.5,
        "Charges or losses caused demonstrable financial hardship",
    ),
    (
        "within-time-limits",
        0.4,
        "Complaint raised well within the six-year limit",
    ),
    (
        "outside-time-limits",
        -0.9,
        "Complaint may fall outside the statutory time limits",
    ),
    (
        "insufficient-evidence",
        -0.7,
        "Little documentation supports the complaint",
    ),
    (
        "contributory-negligence",
        -0.6,
        "Customer actions contributed to the loss",
    ),
    (
        "informed-consent-given",
        -0.55,
        "Customer signed terms explaining the product or charge",
    ),
    (
        "previous-complaint-rejected",
        -0.5,
        "An earlier complaint on the same issue was rejected",
    ),
    (
        "charges-already-refunded",
        -0.45,
        "Some charges have already been refunded",
    ),
    (
        "signed-waiver",
        -0.4,
        "Customer signed a waiver or full and final settlement",
    ),
];

/// Global factor vocabulary, partitioned by the sign of each weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactorTable {
    positive: BTreeMap<String, RiskFactor>,
    negative: BTreeMap<String, RiskFactor>,
}

impl RiskFactorTable {
    pub fn standard() -> Self {
        let mut positive = BTreeMap::new();
        let mut negative = BTreeMap::new();
        for (name, weight, description) in STANDARD_FACTORS {
            let factor = RiskFactor::new(*name, *weight, *description);
            if *weight > 0.0 {
                positive.insert(factor.name.clone(), factor);
            } else {
                negative.insert(factor.name.clone(), factor);
            }
        }
        Self { positive, negative }
    }

    /// Builds a custom vocabulary. Weights must be finite, non-zero and within [-1, 1].
    pub fn from_factors<I>(factors: I) -> Result<Self, ScoringError>
    where
        I: IntoIterator<Item = RiskFactor>,
    {
        let mut positive = BTreeMap::new();
        let mut negative = BTreeMap::new();

        for factor in factors {
            let weight = factor.weight;
            if !weight.is_finite() || weight == 0.0 || !(-1.0..=1.0).contains(&weight) {
                return Err(DataError::InvalidFactorWeight {
                    name: factor.name,
                    weight,
                }
                .into());
            }
            if weight > 0.0 {
                negative.remove(&factor.name);
                positive.insert(factor.name.clone(), factor);
            } else {
                positive.remove(&factor.name);
                negative.insert(factor.name.clone(), factor);
            }
        }

        Ok(Self { positive, negative })
    }

    pub fn positive(&self, name: &str) -> Option<&RiskFactor> {
        self.positive.get(name)
    }

    pub fn negative(&self, name: &str) -> Option<&RiskFactor> {
        self.negative.get(name)
    }

    pub fn positive_factors(&self) -> impl Iterator<Item = &RiskFactor> {
        self.positive.values()
    }

    pub fn negative_factors(&self) -> impl Iterator<Item = &RiskFactor> {
        self.negative.values()
    }

    pub fn len(&self) -> usize {
        self.positive.len() + self.negative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up the caller's factor names. A name only counts on the side it was
    /// supplied for; everything else is reported as unknown.
    pub fn resolve<'a>(
        &'a self,
        positive_names: &BTreeSet<String>,
        negative_names: &BTreeSet<String>,
    ) -> MatchedFactors<'a> {
        let mut matched = MatchedFactors::default();

        for name in positive_names {
            match self.positive(name) {
                Some(factor) => matched.positive.push(factor),
                None => matched.unknown.push(name.clone()),
            }
        }
        for name in negative_names {
            match self.negative(name) {
                Some(factor) => matched.negative.push(factor),
                None => matched.unknown.push(name.clone()),
            }
        }

        matched
    }
}

impl Default for RiskFactorTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Known factors present on a case, borrowed from the table.
#[derive(Debug, Default, Clone)]
pub struct MatchedFactors<'a> {
    pub positive: Vec<&'a RiskFactor>,
    pub negative: Vec<&'a RiskFactor>,
    pub unknown: Vec<String>,
}

impl MatchedFactors<'_> {
    /// Sum of every matched weight, signs included.
    pub fn weight_sum(&self) -> f64 {
        self.positive
            .iter()
            .chain(self.negative.iter())
            .map(|factor| factor.weight)
            .sum()
    }
}
