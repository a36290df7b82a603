use serde::{Deserialize, Serialize};

use crate::outcomes::domain::EvidenceQuality;

/// Rubric constants driving the prediction engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub max_claim_amount: f64,
    pub probability: ProbabilityWeights,
    pub strength: StrengthWeights,
    pub timeline: TimelineWeights,
    pub risk: RiskWeights,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            max_claim_amount: 1_000_000.0,
            probability: ProbabilityWeights::default(),
            strength: StrengthWeights::default(),
            timeline: TimelineWeights::default(),
            risk: RiskWeights::default(),
        }
    }
}

/// One value per evidence tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvidenceScale {
    pub very_poor: f64,
    pub poor: f64,
    pub medium: f64,
    pub good: f64,
    pub excellent: f64,
}

impl EvidenceScale {
    pub fn for_quality(&self, quality: EvidenceQuality) -> f64 {
        match quality {
            EvidenceQuality::VeryPoor => self.very_poor,
            EvidenceQuality::Poor => self.poor,
            EvidenceQuality::Medium => self.medium,
            EvidenceQuality::Good => self.good,
            EvidenceQuality::Excellent => self.excellent,
        }
    }
}

/// Multiplier applied while the incident is at most `max_months` old.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayStep {
    pub max_months: u32,
    pub multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityWeights {
    pub factor_scale: f64,
    pub evidence_multipliers: EvidenceScale,
    /// Ascending by `max_months`.
    pub time_decay: Vec<DecayStep>,
    /// Applied past the last step; reflects limitation risk.
    pub time_barred_multiplier: f64,
    pub default_months_since_incident: u32,
    pub floor: f64,
    pub ceiling: f64,
}

impl ProbabilityWeights {
    pub fn time_multiplier(&self, months_since_incident: u32) -> f64 {
        self.time_decay
            .iter()
            .find(|step| months_since_incident <= step.max_months)
            .map(|step| step.multiplier)
            .unwrap_or(self.time_barred_multiplier)
    }
}

impl Default for ProbabilityWeights {
    fn default() -> Self {
        Self {
            factor_scale: 0.1,
            evidence_multipliers: EvidenceScale {
                very_poor: 0.70,
                poor: 0.85,
                medium: 1.00,
                good: 1.05,
                excellent: 1.15,
            },
            time_decay: vec![
                DecayStep {
                    max_months: 6,
                    multiplier: 1.00,
                },
                DecayStep {
                    max_months: 12,
                    multiplier: 0.98,
                },
                DecayStep {
                    max_months: 24,
                    multiplier: 0.95,
                },
                DecayStep {
                    max_months: 72,
                    multiplier: 0.88,
                },
            ],
            time_barred_multiplier: 0.30,
            default_months_since_incident: 12,
            floor: 0.05,
            ceiling: 0.95,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthWeights {
    pub base: f64,
    pub evidence_offsets: EvidenceScale,
    pub per_positive_factor: f64,
    pub per_negative_factor: f64,
    pub floor: f64,
    pub ceiling: f64,
    /// Strength above this selects the high band.
    pub high_band_threshold: f64,
    /// Strength above this selects the medium band.
    pub medium_band_threshold: f64,
    /// Fewer historical cases than this lowers estimate confidence one step.
    pub thin_history_cases: u32,
}

impl Default for StrengthWeights {
    fn default() -> Self {
        Self {
            base: 0.5,
            evidence_offsets: EvidenceScale {
                very_poor: -0.3,
                poor: -0.15,
                medium: 0.0,
                good: 0.15,
                excellent: 0.3,
            },
            per_positive_factor: 0.05,
            per_negative_factor: 0.08,
            floor: 0.1,
            ceiling: 0.9,
            high_band_threshold: 0.8,
            medium_band_threshold: 0.6,
            thin_history_cases: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineWeights {
    pub high_complexity: f64,
    pub low_complexity: f64,
    pub excellent_evidence: f64,
    pub poor_evidence: f64,
    pub range_floor: f64,
    pub range_ceiling: f64,
}

impl Default for TimelineWeights {
    fn default() -> Self {
        Self {
            high_complexity: 1.4,
            low_complexity: 0.8,
            excellent_evidence: 0.9,
            poor_evidence: 1.3,
            range_floor: 0.75,
            range_ceiling: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskWeights {
    pub base: f64,
    pub factor_scale: f64,
    pub low_risk_threshold: f64,
    pub medium_risk_threshold: f64,
    pub high_risk_threshold: f64,
    pub seek_advice_below: f64,
    pub proceed_above: f64,
    pub time_barred_after_months: u32,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            base: 0.5,
            factor_scale: 0.2,
            low_risk_threshold: 0.7,
            medium_risk_threshold: 0.5,
            high_risk_threshold: 0.3,
            seek_advice_below: 0.4,
            proceed_above: 0.7,
            time_barred_after_months: 72,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_decay_boundaries() {
        let weights = ProbabilityWeights::default();
        assert_eq!(weights.time_multiplier(0), 1.00);
        assert_eq!(weights.time_multiplier(6), 1.00);
        assert_eq!(weights.time_multiplier(7), 0.98);
        assert_eq!(weights.time_multiplier(12), 0.98);
        assert_eq!(weights.time_multiplier(24), 0.95);
        assert_eq!(weights.time_multiplier(72), 0.88);
        assert_eq!(weights.time_multiplier(73), 0.30);
    }

    #[test]
    fn weights_round_trip_through_json() {
        let weights = ScoringWeights::default();
        let json = serde_json::to_string(&weights).expect("serialize");
        let parsed: ScoringWeights = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, weights);
    }
}
