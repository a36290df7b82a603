use std::collections::BTreeSet;

use crate::outcomes::domain::{CaseCategory, Complexity};
use crate::outcomes::statistics::{CompensationRange, CompensationRanges};

/// Generator parameters and vocabulary for one claim category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryProfile {
    pub category: CaseCategory,
    pub success_rate: f64,
    pub compensation_ranges: CompensationRanges,
    pub average_timeframe_weeks: u32,
    pub default_complexity: Complexity,
    pub strong_factors: &'static [&'static str],
    pub weak_factors: &'static [&'static str],
}

impl CategoryProfile {
    pub fn for_category(category: CaseCategory) -> Self {
        match category {
            CaseCategory::BankCharges => Self {
                category,
                success_rate: 0.869,
                compensation_ranges: ranges(
                    (50, 500, 0.45),
                    (500, 1_500, 0.35),
                    (1_500, 5_000, 0.15),
                    (5_000, 15_000, 0.05),
                ),
                average_timeframe_weeks: 8,
                default_complexity: Complexity::Low,
                strong_factors: &[
                    "documented-bank-error",
                    "financial-hardship",
                    "complete-paper-trail",
                ],
                weak_factors: &["charges-already-refunded", "informed-consent-given"],
            },
            CaseCategory::Ppi => Self {
                category,
                success_rate: 0.909,
                compensation_ranges: ranges(
                    (500, 2_000, 0.30),
                    (2_000, 5_000, 0.40),
                    (5_000, 12_000, 0.22),
                    (12_000, 40_000, 0.08),
                ),
                average_timeframe_weeks: 12,
                default_complexity: Complexity::Medium,
                strong_factors: &[
                    "mis-selling-evidence",
                    "complete-paper-trail",
                    "ombudsman-precedent",
                ],
                weak_factors: &["informed-consent-given", "previous-complaint-rejected"],
            },
            CaseCategory::PackagedAccount => Self {
                category,
                success_rate: 0.697,
                compensation_ranges: ranges(
                    (100, 800, 0.40),
                    (800, 2_000, 0.35),
                    (2_000, 4_500, 0.20),
                    (4_500, 10_000, 0.05),
                ),
                average_timeframe_weeks: 10,
                default_complexity: Complexity::Medium,
                strong_factors: &["mis-selling-evidence", "vulnerable-customer"],
                weak_factors: &["informed-consent-given", "signed-waiver"],
            },
            CaseCategory::InvestmentAdvice => Self {
                category,
                success_rate: 0.622,
                compensation_ranges: ranges(
                    (1_000, 5_000, 0.35),
                    (5_000, 20_000, 0.35),
                    (20_000, 75_000, 0.22),
                    (75_000, 250_000, 0.08),
                ),
                average_timeframe_weeks: 26,
                default_complexity: Complexity::High,
                strong_factors: &[
                    "mis-selling-evidence",
                    "vulnerable-customer",
                    "ombudsman-precedent",
                ],
                weak_factors: &[
                    "contributory-negligence",
                    "signed-waiver",
                    "informed-consent-given",
                ],
            },
            CaseCategory::MortgageIssues => Self {
                category,
                success_rate: 0.641,
                compensation_ranges: ranges(
                    (500, 3_000, 0.40),
                    (3_000, 10_000, 0.33),
                    (10_000, 30_000, 0.20),
                    (30_000, 100_000, 0.07),
                ),
                average_timeframe_weeks: 20,
                default_complexity: Complexity::High,
                strong_factors: &[
                    "documented-bank-error",
                    "financial-hardship",
                    "vulnerable-customer",
                ],
                weak_factors: &["contributory-negligence", "outside-time-limits"],
            },
        }
    }

    pub fn strong_factor_set(&self) -> BTreeSet<String> {
        self.strong_factors.iter().map(|name| name.to_string()).collect()
    }

    pub fn weak_factor_set(&self) -> BTreeSet<String> {
        self.weak_factors.iter().map(|name| name.to_string()).collect()
    }
}

fn ranges(
    low: (u32, u32, f64),
    medium: (u32, u32, f64),
    high: (u32, u32, f64),
    exceptional: (u32, u32, f64),
) -> CompensationRanges {
    let range = |(min, max, probability): (u32, u32, f64)| CompensationRange::new(min, max, probability);
    CompensationRanges {
        low: range(low),
        medium: range(medium),
        high: range(high),
        exceptional: range(exceptional),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcomes::factors::RiskFactorTable;

    #[test]
    fn every_profile_is_well_formed() {
        let factors = RiskFactorTable::standard();
        for category in CaseCategory::ALL {
            let profile = CategoryProfile::for_category(category);
            assert!(profile.compensation_ranges.is_normalized(), "{category}");
            assert!(profile.average_timeframe_weeks > 0);
            for (_, range) in profile.compensation_ranges.iter() {
                assert!(range.min < range.max);
            }
            assert!(profile
                .strong_factors
                .iter()
                .all(|name| factors.positive(name).is_some()));
            assert!(profile
                .weak_factors
                .iter()
                .all(|name| factors.negative(name).is_some()));
        }
    }
}
