use serde::{Deserialize, Serialize};

use super::config::RiskWeights;
use crate::outcomes::domain::EvidenceQuality;
use crate::outcomes::factors::MatchedFactors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::VeryHigh => "very-high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub score: f64,
    pub strengths: Vec<String>,
    pub risks: Vec<String>,
    pub recommendations: Vec<String>,
}

pub(crate) fn assess_risk(
    factors: &MatchedFactors<'_>,
    evidence: EvidenceQuality,
    months_since_incident: u32,
    weights: &RiskWeights,
) -> RiskAssessment {
    let score = weights.base + factors.weight_sum() * weights.factor_scale;

    let level = if score >= weights.low_risk_threshold {
        RiskLevel::Low
    } else if score >= weights.medium_risk_threshold {
        RiskLevel::Medium
    } else if score >= weights.high_risk_threshold {
        RiskLevel::High
    } else {
        RiskLevel::VeryHigh
    };

    let mut strengths: Vec<String> = factors
        .positive
        .iter()
        .map(|factor| factor.description.clone())
        .collect();
    if matches!(evidence, EvidenceQuality::Good | EvidenceQuality::Excellent) {
        strengths.push(format!("Evidence quality rated {evidence}"));
    }

    let mut risks: Vec<String> = factors
        .negative
        .iter()
        .map(|factor| factor.description.clone())
        .collect();
    if evidence.is_weak() {
        risks.push(format!("Evidence quality rated {evidence}"));
    }
    let time_barred = months_since_incident > weights.time_barred_after_months;
    if time_barred {
        risks.push(format!(
            "Incident was {months_since_incident} months ago and may be outside time limits"
        ));
    }

    let mut recommendations = Vec::new();
    if score < weights.seek_advice_below {
        recommendations
            .push("Seek professional advice before submitting a formal complaint".to_string());
    }
    if score > weights.proceed_above {
        recommendations.push(
            "Your case has strong indicators: proceed with a formal complaint to your bank"
                .to_string(),
        );
    }
    if evidence.is_weak() {
        recommendations.push(
            "Gather bank statements, letters and call notes to strengthen your evidence"
                .to_string(),
        );
    }
    if time_barred {
        recommendations.push(
            "Check whether the three-years-from-awareness rule still allows a complaint"
                .to_string(),
        );
    }
    if recommendations.is_empty() {
        recommendations.push(
            "Submit a formal complaint to your bank and allow eight weeks for a final response"
                .to_string(),
        );
    }

    RiskAssessment {
        level,
        score,
        strengths,
        risks,
        recommendations,
    }
}
