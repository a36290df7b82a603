use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::profiles::CategoryProfile;
use crate::outcomes::domain::{CaseCategory, CaseRecord, Complexity, EvidenceQuality};
use crate::outcomes::statistics::{CompensationBand, CompensationRanges};

const BANKS: &[&str] = &[
    "Barclays",
    "HSBC",
    "Lloyds",
    "NatWest",
    "Santander",
    "Nationwide",
    "TSB",
    "Halifax",
    "Metro Bank",
    "Co-operative Bank",
];

/// Share of rejected complaints that still end with a goodwill payment.
const GOODWILL_RATE: f64 = 0.3;

const UPHELD_EVIDENCE: [(EvidenceQuality, f64); 5] = [
    (EvidenceQuality::VeryPoor, 0.02),
    (EvidenceQuality::Poor, 0.08),
    (EvidenceQuality::Medium, 0.30),
    (EvidenceQuality::Good, 0.38),
    (EvidenceQuality::Excellent, 0.22),
];

const REJECTED_EVIDENCE: [(EvidenceQuality, f64); 5] = [
    (EvidenceQuality::VeryPoor, 0.15),
    (EvidenceQuality::Poor, 0.30),
    (EvidenceQuality::Medium, 0.35),
    (EvidenceQuality::Good, 0.15),
    (EvidenceQuality::Excellent, 0.05),
];

/// Produces `count` synthetic cases for a category from the supplied random source.
///
/// Each case draws its outcome independently from the category's success rate.
/// Upheld cases take a payout from the banded ranges, weighted by the band
/// probabilities; rejected cases mostly receive nothing.
pub fn generate_category_cases<R>(
    category: CaseCategory,
    count: usize,
    rng: &mut R,
) -> Vec<CaseRecord>
where
    R: Rng + ?Sized,
{
    let profile = CategoryProfile::for_category(category);
    (0..count)
        .map(|index| generate_case(&profile, index, rng))
        .collect()
}

/// Reproducible variant of [`generate_category_cases`].
pub fn generate_seeded(category: CaseCategory, count: usize, seed: u64) -> Vec<CaseRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_category_cases(category, count, &mut rng)
}

fn generate_case<R>(profile: &CategoryProfile, index: usize, rng: &mut R) -> CaseRecord
where
    R: Rng + ?Sized,
{
    let success = rng.gen_bool(profile.success_rate);
    let compensation = if success {
        let band = pick_weighted(rng, &band_weights(&profile.compensation_ranges));
        let range = profile.compensation_ranges.band(band);
        rng.gen_range(range.min..=range.max)
    } else if rng.gen_bool(GOODWILL_RATE) {
        let low = &profile.compensation_ranges.low;
        rng.gen_range(low.min..=low.min + (low.max - low.min) / 2)
    } else {
        0
    };

    let evidence_quality = if success {
        pick_weighted(rng, &UPHELD_EVIDENCE)
    } else {
        pick_weighted(rng, &REJECTED_EVIDENCE)
    };

    let complexity = pick_weighted(rng, &complexity_weights(profile.default_complexity));
    let complexity_multiplier = match complexity {
        Complexity::Low => 0.8,
        Complexity::Medium => 1.0,
        Complexity::High => 1.4,
    };
    let jitter = rng.gen_range(0.7..1.3);
    let timeframe_weeks =
        ((f64::from(profile.average_timeframe_weeks) * complexity_multiplier * jitter).round()
            as u32)
            .max(1);

    let (strong_count, weak_count) = if success {
        (rng.gen_range(1..=2), rng.gen_range(0..=1))
    } else {
        (rng.gen_range(0..=1), rng.gen_range(1..=2))
    };
    let factors = profile
        .strong_factors
        .choose_multiple(rng, strong_count)
        .chain(profile.weak_factors.choose_multiple(rng, weak_count))
        .map(|name| name.to_string())
        .collect();

    let bank_name = BANKS[rng.gen_range(0..BANKS.len())].to_string();

    CaseRecord {
        id: format!("{}-{:05}", profile.category.code(), index + 1),
        category: profile.category,
        bank_name,
        success,
        compensation,
        timeframe_weeks,
        evidence_quality,
        complexity,
        factors,
    }
}

fn band_weights(ranges: &CompensationRanges) -> [(CompensationBand, f64); 4] {
    CompensationBand::ALL.map(|band| (band, ranges.band(band).probability))
}

fn complexity_weights(usual: Complexity) -> [(Complexity, f64); 3] {
    Complexity::ALL.map(|complexity| {
        let weight = if complexity == usual { 0.6 } else { 0.2 };
        (complexity, weight)
    })
}

fn pick_weighted<R, T>(rng: &mut R, weighted: &[(T, f64)]) -> T
where
    R: Rng + ?Sized,
    T: Copy,
{
    let total: f64 = weighted.iter().map(|(_, weight)| weight).sum();
    let mut roll = rng.gen::<f64>() * total;
    for (value, weight) in weighted {
        if roll < *weight {
            return *value;
        }
        roll -= weight;
    }
    weighted[weighted.len() - 1].0
}
