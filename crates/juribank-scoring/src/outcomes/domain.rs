use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// UK consumer banking-dispute categories covered by the scoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseCategory {
    BankCharges,
    Ppi,
    PackagedAccount,
    InvestmentAdvice,
    MortgageIssues,
}

impl CaseCategory {
    pub const ALL: [CaseCategory; 5] = [
        CaseCategory::BankCharges,
        CaseCategory::Ppi,
        CaseCategory::PackagedAccount,
        CaseCategory::InvestmentAdvice,
        CaseCategory::MortgageIssues,
    ];

    /// Wire identifier, matching the serde representation.
    pub const fn slug(self) -> &'static str {
        match self {
            CaseCategory::BankCharges => "bank-charges",
            CaseCategory::Ppi => "ppi",
            CaseCategory::PackagedAccount => "packaged-account",
            CaseCategory::InvestmentAdvice => "investment-advice",
            CaseCategory::MortgageIssues => "mortgage-issues",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            CaseCategory::BankCharges => "Bank charges",
            CaseCategory::Ppi => "Payment protection insurance",
            CaseCategory::PackagedAccount => "Packaged bank account",
            CaseCategory::InvestmentAdvice => "Investment advice",
            CaseCategory::MortgageIssues => "Mortgage issues",
        }
    }

    /// Short prefix used for synthetic case identifiers.
    pub const fn code(self) -> &'static str {
        match self {
            CaseCategory::BankCharges => "BC",
            CaseCategory::Ppi => "PPI",
            CaseCategory::PackagedAccount => "PA",
            CaseCategory::InvestmentAdvice => "IA",
            CaseCategory::MortgageIssues => "MI",
        }
    }
}

impl fmt::Display for CaseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for CaseCategory {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_token(raw);
        CaseCategory::ALL
            .into_iter()
            .find(|category| category.slug() == normalized)
            .ok_or_else(|| ValidationError::UnsupportedCaseType {
                case_type: raw.trim().to_string(),
            })
    }
}

/// How well documented a claimant's case is.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum EvidenceQuality {
    VeryPoor,
    Poor,
    #[default]
    Medium,
    Good,
    Excellent,
}

impl EvidenceQuality {
    pub const ALL: [EvidenceQuality; 5] = [
        EvidenceQuality::VeryPoor,
        EvidenceQuality::Poor,
        EvidenceQuality::Medium,
        EvidenceQuality::Good,
        EvidenceQuality::Excellent,
    ];

    pub const fn slug(self) -> &'static str {
        match self {
            EvidenceQuality::VeryPoor => "very-poor",
            EvidenceQuality::Poor => "poor",
            EvidenceQuality::Medium => "medium",
            EvidenceQuality::Good => "good",
            EvidenceQuality::Excellent => "excellent",
        }
    }

    /// Intake parsing: anything unrecognised falls back to `Medium`.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.parse().ok()).unwrap_or_default()
    }

    pub const fn is_weak(self) -> bool {
        matches!(self, EvidenceQuality::VeryPoor | EvidenceQuality::Poor)
    }
}

impl fmt::Display for EvidenceQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for EvidenceQuality {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_token(raw);
        EvidenceQuality::ALL
            .into_iter()
            .find(|quality| quality.slug() == normalized)
            .ok_or_else(|| ValidationError::UnknownEvidenceQuality {
                value: raw.trim().to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    pub const ALL: [Complexity; 3] = [Complexity::Low, Complexity::Medium, Complexity::High];

    pub const fn slug(self) -> &'static str {
        match self {
            Complexity::Low => "low",
            Complexity::Medium => "medium",
            Complexity::High => "high",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Complexity {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_token(raw);
        Complexity::ALL
            .into_iter()
            .find(|complexity| complexity.slug() == normalized)
            .ok_or_else(|| ValidationError::UnknownComplexity {
                value: raw.trim().to_string(),
            })
    }
}

/// Typed description of a claimant's case, ready for scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseDescription {
    pub case_type: CaseCategory,
    #[serde(default)]
    pub positive_factors: BTreeSet<String>,
    #[serde(default)]
    pub negative_factors: BTreeSet<String>,
    #[serde(default)]
    pub evidence_quality: EvidenceQuality,
    /// `None` defers to the category's usual complexity.
    #[serde(default)]
    pub complexity: Option<Complexity>,
    #[serde(default)]
    pub claim_amount: Option<f64>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub months_since_incident: Option<u32>,
}

impl CaseDescription {
    pub fn new(case_type: CaseCategory) -> Self {
        Self {
            case_type,
            positive_factors: BTreeSet::new(),
            negative_factors: BTreeSet::new(),
            evidence_quality: EvidenceQuality::default(),
            complexity: None,
            claim_amount: None,
            bank_name: None,
            months_since_incident: None,
        }
    }

    pub fn with_positive(mut self, factor: impl Into<String>) -> Self {
        self.positive_factors.insert(factor.into());
        self
    }

    pub fn with_negative(mut self, factor: impl Into<String>) -> Self {
        self.negative_factors.insert(factor.into());
        self
    }

    pub fn with_evidence(mut self, quality: EvidenceQuality) -> Self {
        self.evidence_quality = quality;
        self
    }

    pub fn with_complexity(mut self, complexity: Complexity) -> Self {
        self.complexity = Some(complexity);
        self
    }

    pub fn with_claim_amount(mut self, amount: f64) -> Self {
        self.claim_amount = Some(amount);
        self
    }

    pub fn with_months_since_incident(mut self, months: u32) -> Self {
        self.months_since_incident = Some(months);
        self
    }
}

/// One labeled historical case, synthetic or imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub id: String,
    pub category: CaseCategory,
    pub bank_name: String,
    pub success: bool,
    /// Redress paid, in whole pounds. Zero for most unsuccessful cases.
    pub compensation: u32,
    pub timeframe_weeks: u32,
    pub evidence_quality: EvidenceQuality,
    pub complexity: Complexity,
    pub factors: Vec<String>,
}

pub(crate) fn normalize_token(raw: &str) -> String {
    raw.trim()
        .to_ascii_lowercase()
        .chars()
        .map(|ch| if ch == '_' || ch == ' ' { '-' } else { ch })
        .collect()
}
