use serde::{Deserialize, Serialize};

use super::config::ProbabilityWeights;
use crate::outcomes::domain::EvidenceQuality;
use crate::outcomes::factors::MatchedFactors;

/// Intermediate values behind a success probability, kept for audit output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityBreakdown {
    pub base_rate: f64,
    pub factor_adjustment: f64,
    pub evidence_multiplier: f64,
    pub time_multiplier: f64,
    pub months_since_incident: u32,
    pub unclamped: f64,
}

pub(crate) fn success_probability(
    base_rate: f64,
    factors: &MatchedFactors<'_>,
    evidence: EvidenceQuality,
    months_since_incident: Option<u32>,
    weights: &ProbabilityWeights,
) -> (f64, ProbabilityBreakdown) {
    let factor_adjustment = factors.weight_sum() * weights.factor_scale;
    let evidence_multiplier = weights.evidence_multipliers.for_quality(evidence);
    let months = months_since_incident.unwrap_or(weights.default_months_since_incident);
    let time_multiplier = weights.time_multiplier(months);

    let unclamped = (base_rate + factor_adjustment) * evidence_multiplier * time_multiplier;
    let probability = unclamped.clamp(weights.floor, weights.ceiling);

    let breakdown = ProbabilityBreakdown {
        base_rate,
        factor_adjustment,
        evidence_multiplier,
        time_multiplier,
        months_since_incident: months,
        unclamped,
    };

    (probability, breakdown)
}
