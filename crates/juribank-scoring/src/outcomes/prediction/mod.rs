mod compensation;
mod config;
mod probability;
mod risk;
mod timeline;

pub use compensation::{AmountRange, CompensationEstimate, EstimateConfidence};
pub use config::{
    DecayStep, EvidenceScale, ProbabilityWeights, RiskWeights, ScoringWeights, StrengthWeights,
    TimelineWeights,
};
pub use probability::ProbabilityBreakdown;
pub use risk::{RiskAssessment, RiskLevel};
pub use timeline::{Milestone, TimelineEstimate, WeekRange};

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::corpus::CategoryProfile;
use super::domain::{CaseCategory, CaseDescription};
use super::error::{ScoringError, ValidationError};
use super::store::ScoringTables;

pub const DISCLAIMER: &str = "This estimate is generated from synthetic historical data for \
educational purposes only. It is not legal or financial advice.";

/// Stateless engine applying the scoring rubric to a case description.
///
/// Holds an immutable snapshot of the statistics tables; the same input
/// always produces the same prediction.
#[derive(Debug, Clone)]
pub struct PredictionEngine {
    tables: Arc<ScoringTables>,
    weights: ScoringWeights,
}

impl PredictionEngine {
    pub fn new(tables: Arc<ScoringTables>, weights: ScoringWeights) -> Self {
        Self { tables, weights }
    }

    pub fn generate_prediction(
        &self,
        description: &CaseDescription,
    ) -> Result<Prediction, ScoringError> {
        let category = description.case_type;
        let statistics = self.tables.statistics(category).ok_or_else(|| {
            ValidationError::UnsupportedCaseType {
                case_type: category.slug().to_string(),
            }
        })?;

        if let Some(amount) = description.claim_amount {
            if !amount.is_finite() || amount < 0.0 || amount > self.weights.max_claim_amount {
                return Err(ValidationError::InvalidClaimAmount {
                    amount,
                    maximum: self.weights.max_claim_amount,
                }
                .into());
            }
        }

        let factors = self
            .tables
            .factors()
            .resolve(&description.positive_factors, &description.negative_factors);
        let evidence = description.evidence_quality;

        let (success_probability, breakdown) = probability::success_probability(
            statistics.success_rate,
            &factors,
            evidence,
            description.months_since_incident,
            &self.weights.probability,
        );

        let case_strength = compensation::case_strength(
            evidence,
            factors.positive.len(),
            factors.negative.len(),
            &self.weights.strength,
        );
        let compensation_estimate = compensation::estimate_compensation(
            statistics,
            case_strength,
            description.claim_amount,
            &self.weights.strength,
        );

        let complexity = description
            .complexity
            .unwrap_or_else(|| CategoryProfile::for_category(category).default_complexity);
        let timeline_estimate = timeline::estimate_timeline(
            statistics.average_timeframe_weeks,
            complexity,
            evidence,
            &self.weights.timeline,
        );

        let risk_assessment = risk::assess_risk(
            &factors,
            evidence,
            breakdown.months_since_incident,
            &self.weights.risk,
        );

        Ok(Prediction {
            case_type: category,
            success_probability,
            case_strength,
            breakdown,
            compensation_estimate,
            timeline_estimate,
            risk_assessment,
            ignored_factors: factors.unknown,
            disclaimer: DISCLAIMER.to_string(),
        })
    }
}

/// Structured estimate returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub case_type: CaseCategory,
    pub success_probability: f64,
    pub case_strength: f64,
    pub breakdown: ProbabilityBreakdown,
    pub compensation_estimate: CompensationEstimate,
    pub timeline_estimate: TimelineEstimate,
    pub risk_assessment: RiskAssessment,
    /// Factor names that were not in the vocabulary and had no effect.
    pub ignored_factors: Vec<String>,
    pub disclaimer: String,
}

impl Prediction {
    pub fn summary(&self) -> String {
        let compensation = &self.compensation_estimate;
        format!(
            "{}: {:.0}% estimated success, expected £{} (£{}-£{}), about {} weeks, {} risk",
            self.case_type,
            self.success_probability * 100.0,
            compensation.expected,
            compensation.range.minimum,
            compensation.range.maximum,
            self.timeline_estimate.weeks,
            self.risk_assessment.level.label()
        )
    }
}
