use serde::{Deserialize, Serialize};

use super::config::StrengthWeights;
use crate::outcomes::domain::EvidenceQuality;
use crate::outcomes::statistics::{CategoryStatistics, CompensationBand};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EstimateConfidence {
    Low,
    Medium,
    High,
}

impl EstimateConfidence {
    fn lowered(self) -> Self {
        match self {
            EstimateConfidence::High => EstimateConfidence::Medium,
            EstimateConfidence::Medium | EstimateConfidence::Low => EstimateConfidence::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountRange {
    pub minimum: u32,
    pub maximum: u32,
}

/// Expected redress in whole pounds, always within `range`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensationEstimate {
    pub expected: u32,
    pub range: AmountRange,
    pub band: CompensationBand,
    pub confidence: EstimateConfidence,
    /// Upper bound of the band capped by the amount claimed. Informational;
    /// `expected` and `range` ignore the claim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recoverable_maximum: Option<u32>,
}

/// Scalar in `[floor, ceiling]` summarising evidence and factor balance.
pub(crate) fn case_strength(
    evidence: EvidenceQuality,
    positive_count: usize,
    negative_count: usize,
    weights: &StrengthWeights,
) -> f64 {
    let raw = weights.base
        + weights.evidence_offsets.for_quality(evidence)
        + weights.per_positive_factor * positive_count as f64
        - weights.per_negative_factor * negative_count as f64;
    raw.clamp(weights.floor, weights.ceiling)
}

/// Live scoring only ever picks low, medium or high; the exceptional band
/// exists for corpus generation.
pub(crate) fn select_band(strength: f64, weights: &StrengthWeights) -> CompensationBand {
    if strength > weights.high_band_threshold {
        CompensationBand::High
    } else if strength > weights.medium_band_threshold {
        CompensationBand::Medium
    } else {
        CompensationBand::Low
    }
}

pub(crate) fn estimate_compensation(
    statistics: &CategoryStatistics,
    strength: f64,
    claim_amount: Option<f64>,
    weights: &StrengthWeights,
) -> CompensationEstimate {
    let band = select_band(strength, weights);
    let range = statistics.compensation_ranges.band(band);

    let expected =
        (f64::from(range.min) + f64::from(range.max - range.min) * strength).round() as u32;
    let recoverable_maximum = claim_amount.map(|claim| range.max.min(claim.round() as u32));

    let mut confidence = if strength >= 0.7 {
        EstimateConfidence::High
    } else if strength >= 0.4 {
        EstimateConfidence::Medium
    } else {
        EstimateConfidence::Low
    };
    if statistics.total_cases < weights.thin_history_cases {
        confidence = confidence.lowered();
    }

    CompensationEstimate {
        expected,
        range: AmountRange {
            minimum: range.min,
            maximum: range.max,
        },
        band,
        confidence,
        recoverable_maximum,
    }
}
