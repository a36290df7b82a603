use serde::{Deserialize, Serialize};

use super::config::TimelineWeights;
use crate::outcomes::domain::{Complexity, EvidenceQuality};

const MILESTONES: [(f64, &str, &str); 4] = [
    (
        0.15,
        "complaint-acknowledged",
        "Bank acknowledges the formal complaint",
    ),
    (
        0.45,
        "final-response",
        "Bank issues its final response or the eight-week deadline passes",
    ),
    (
        0.70,
        "ombudsman-review",
        "Financial Ombudsman Service assesses the complaint",
    ),
    (1.00, "resolution", "Redress agreed and paid"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub stage: String,
    pub weeks: u32,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekRange {
    pub minimum: u32,
    pub maximum: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEstimate {
    pub weeks: u32,
    pub range: WeekRange,
    pub milestones: Vec<Milestone>,
}

pub(crate) fn estimate_timeline(
    average_weeks: u32,
    complexity: Complexity,
    evidence: EvidenceQuality,
    weights: &TimelineWeights,
) -> TimelineEstimate {
    let mut span = f64::from(average_weeks.max(1));
    span *= match complexity {
        Complexity::High => weights.high_complexity,
        Complexity::Low => weights.low_complexity,
        Complexity::Medium => 1.0,
    };
    span *= match evidence {
        EvidenceQuality::Excellent => weights.excellent_evidence,
        EvidenceQuality::Poor => weights.poor_evidence,
        _ => 1.0,
    };

    let weeks = (span.round() as u32).max(1);
    let minimum = ((span * weights.range_floor).floor() as u32).clamp(1, weeks);
    let maximum = ((span * weights.range_ceiling).ceil() as u32).max(weeks);

    let milestones = MILESTONES
        .iter()
        .map(|(fraction, stage, description)| Milestone {
            stage: stage.to_string(),
            weeks: ((f64::from(weeks) * fraction).round() as u32).max(1),
            description: description.to_string(),
        })
        .collect();

    TimelineEstimate {
        weeks,
        range: WeekRange { minimum, maximum },
        milestones,
    }
}
