use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::corpus::profiles::CategoryProfile;
use super::domain::{CaseCategory, CaseRecord};
use super::error::{DataError, ScoringError};

/// Allowed drift when checking that band probabilities sum to one.
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompensationBand {
    Low,
    Medium,
    High,
    Exceptional,
}

impl CompensationBand {
    pub const ALL: [CompensationBand; 4] = [
        CompensationBand::Low,
        CompensationBand::Medium,
        CompensationBand::High,
        CompensationBand::Exceptional,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            CompensationBand::Low => "low",
            CompensationBand::Medium => "medium",
            CompensationBand::High => "high",
            CompensationBand::Exceptional => "exceptional",
        }
    }
}

/// Inclusive payout range in whole pounds plus its share of upheld cases.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompensationRange {
    pub min: u32,
    pub max: u32,
    pub probability: f64,
}

impl CompensationRange {
    pub const fn new(min: u32, max: u32, probability: f64) -> Self {
        Self {
            min,
            max,
            probability,
        }
    }

    pub fn contains(&self, amount: u32) -> bool {
        (self.min..=self.max).contains(&amount)
    }

    pub fn midpoint(&self) -> f64 {
        (f64::from(self.min) + f64::from(self.max)) / 2.0
    }
}

/// Ordered partition of payouts into the four compensation bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensationRanges {
    pub low: CompensationRange,
    pub medium: CompensationRange,
    pub high: CompensationRange,
    pub exceptional: CompensationRange,
}

impl CompensationRanges {
    pub fn band(&self, band: CompensationBand) -> &CompensationRange {
        match band {
            CompensationBand::Low => &self.low,
            CompensationBand::Medium => &self.medium,
            CompensationBand::High => &self.high,
            CompensationBand::Exceptional => &self.exceptional,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (CompensationBand, &CompensationRange)> {
        CompensationBand::ALL
            .into_iter()
            .map(move |band| (band, self.band(band)))
    }

    pub fn probability_total(&self) -> f64 {
        self.iter().map(|(_, range)| range.probability).sum()
    }

    pub fn is_normalized(&self) -> bool {
        (self.probability_total() - 1.0).abs() <= PROBABILITY_TOLERANCE
    }

    /// Band an amount falls into. Amounts outside every band snap to the nearest end.
    pub fn band_for(&self, amount: u32) -> CompensationBand {
        if let Some((band, _)) = self.iter().find(|(_, range)| range.contains(amount)) {
            return band;
        }
        if amount < self.low.min {
            CompensationBand::Low
        } else {
            CompensationBand::Exceptional
        }
    }

    /// Same bounds, probabilities replaced by observed shares.
    fn with_probabilities(&self, shares: [f64; 4]) -> Self {
        let [low, medium, high, exceptional] = shares;
        Self {
            low: CompensationRange::new(self.low.min, self.low.max, low),
            medium: CompensationRange::new(self.medium.min, self.medium.max, medium),
            high: CompensationRange::new(self.high.min, self.high.max, high),
            exceptional: CompensationRange::new(
                self.exceptional.min,
                self.exceptional.max,
                exceptional,
            ),
        }
    }

    /// Interpolated median of the banded distribution.
    pub(crate) fn median_estimate(&self) -> f64 {
        let mut cumulative = 0.0;
        for (_, range) in self.iter() {
            if range.probability <= 0.0 {
                continue;
            }
            if cumulative + range.probability >= 0.5 {
                let share = (0.5 - cumulative) / range.probability;
                return f64::from(range.min) + f64::from(range.max - range.min) * share;
            }
            cumulative += range.probability;
        }
        f64::from(self.exceptional.max)
    }

    pub(crate) fn mean_estimate(&self) -> f64 {
        self.iter()
            .map(|(_, range)| range.midpoint() * range.probability)
            .sum()
    }
}

/// Aggregate view of one category's historical cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStatistics {
    pub category: CaseCategory,
    pub total_cases: u32,
    pub successful_cases: u32,
    pub success_rate: f64,
    pub average_compensation: u32,
    pub median_compensation: u32,
    pub average_timeframe_weeks: u32,
    pub strong_factors: BTreeSet<String>,
    pub weak_factors: BTreeSet<String>,
    pub compensation_ranges: CompensationRanges,
}

impl CategoryStatistics {
    /// Published headline figures for a category, used when no corpus is loaded.
    /// Rates are expressed over a thousand cases so they stay exact.
    pub fn reference(category: CaseCategory) -> Self {
        const REFERENCE_CASES: u32 = 1000;

        let profile = CategoryProfile::for_category(category);
        let successful_cases = (profile.success_rate * f64::from(REFERENCE_CASES)).round() as u32;
        let ranges = profile.compensation_ranges.clone();

        Self {
            category,
            total_cases: REFERENCE_CASES,
            successful_cases,
            success_rate: f64::from(successful_cases) / f64::from(REFERENCE_CASES),
            average_compensation: ranges.mean_estimate().round() as u32,
            median_compensation: ranges.median_estimate().round() as u32,
            average_timeframe_weeks: profile.average_timeframe_weeks,
            strong_factors: profile.strong_factor_set(),
            weak_factors: profile.weak_factor_set(),
            compensation_ranges: ranges,
        }
    }
}

/// Reduces a single category's cases to its statistics.
///
/// Compensation figures cover upheld cases only. Band probabilities are the
/// observed share of upheld cases per band, falling back to the category
/// profile when nothing was upheld.
pub fn aggregate_statistics(cases: &[CaseRecord]) -> Result<CategoryStatistics, ScoringError> {
    let first = cases.first().ok_or(DataError::EmptyCorpus)?;
    let category = first.category;

    if let Some(stray) = cases.iter().find(|case| case.category != category) {
        return Err(DataError::MixedCategories {
            expected: category,
            found: stray.category,
        }
        .into());
    }

    let profile = CategoryProfile::for_category(category);
    let total_cases = cases.len() as u32;

    let mut payouts: Vec<u32> = cases
        .iter()
        .filter(|case| case.success)
        .map(|case| case.compensation)
        .collect();
    payouts.sort_unstable();
    let successful_cases = payouts.len() as u32;

    let average_compensation = if payouts.is_empty() {
        0
    } else {
        let total: u64 = payouts.iter().map(|amount| u64::from(*amount)).sum();
        (total as f64 / payouts.len() as f64).round() as u32
    };

    let median_compensation = median(&payouts);

    let total_weeks: u64 = cases.iter().map(|case| u64::from(case.timeframe_weeks)).sum();
    let average_timeframe_weeks = ((total_weeks as f64 / f64::from(total_cases)).round() as u32).max(1);

    let compensation_ranges = if payouts.is_empty() {
        profile.compensation_ranges.clone()
    } else {
        let mut counts = [0u32; 4];
        for amount in &payouts {
            let band = profile.compensation_ranges.band_for(*amount);
            counts[band as usize] += 1;
        }
        let shares = counts.map(|count| f64::from(count) / f64::from(successful_cases));
        profile.compensation_ranges.with_probabilities(shares)
    };

    Ok(CategoryStatistics {
        category,
        total_cases,
        successful_cases,
        success_rate: f64::from(successful_cases) / f64::from(total_cases),
        average_compensation,
        median_compensation,
        average_timeframe_weeks,
        strong_factors: profile.strong_factor_set(),
        weak_factors: profile.weak_factor_set(),
        compensation_ranges,
    })
}

fn median(sorted: &[u32]) -> u32 {
    match sorted.len() {
        0 => 0,
        len if len % 2 == 1 => sorted[len / 2],
        len => {
            let lower = u64::from(sorted[len / 2 - 1]);
            let upper = u64::from(sorted[len / 2]);
            ((lower + upper) as f64 / 2.0).round() as u32
        }
    }
}
