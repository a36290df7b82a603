use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::domain::{CaseCategory, CaseDescription, Complexity, EvidenceQuality};
use super::error::ValidationError;

/// Case details as a caller submits them, before any validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseSubmission {
    pub case_type: String,
    #[serde(default)]
    pub positive_factors: Vec<String>,
    #[serde(default)]
    pub negative_factors: Vec<String>,
    #[serde(default)]
    pub evidence_quality: Option<String>,
    #[serde(default)]
    pub complexity: Option<String>,
    #[serde(default)]
    pub claim_amount: Option<f64>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub months_since_incident: Option<u32>,
    /// Used to derive `months_since_incident` when that is absent.
    #[serde(default)]
    pub incident_date: Option<NaiveDate>,
}

impl CaseSubmission {
    pub fn new(case_type: impl Into<String>) -> Self {
        Self {
            case_type: case_type.into(),
            ..Self::default()
        }
    }

    /// Validates the submission into a typed description.
    ///
    /// The case type must be known. Unrecognised evidence or complexity values
    /// fall back to their defaults. `today` anchors the incident-date
    /// calculation so the conversion stays deterministic.
    pub fn into_description(self, today: NaiveDate) -> Result<CaseDescription, ValidationError> {
        let case_type: CaseCategory = self.case_type.parse()?;

        let months_since_incident = match (self.months_since_incident, self.incident_date) {
            (Some(months), _) => Some(months),
            (None, Some(incident_date)) => Some(months_between(incident_date, today)?),
            (None, None) => None,
        };

        let complexity = self
            .complexity
            .as_deref()
            .and_then(|raw| raw.parse::<Complexity>().ok());

        let bank_name = self
            .bank_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        Ok(CaseDescription {
            case_type,
            positive_factors: clean_names(self.positive_factors),
            negative_factors: clean_names(self.negative_factors),
            evidence_quality: EvidenceQuality::parse_lenient(self.evidence_quality.as_deref()),
            complexity,
            claim_amount: self.claim_amount,
            bank_name,
            months_since_incident,
        })
    }
}

fn clean_names(names: Vec<String>) -> std::collections::BTreeSet<String> {
    names
        .into_iter()
        .map(|name| name.trim().to_ascii_lowercase())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Whole calendar months from `incident_date` to `today`.
fn months_between(incident_date: NaiveDate, today: NaiveDate) -> Result<u32, ValidationError> {
    if incident_date > today {
        return Err(ValidationError::IncidentInFuture {
            incident_date,
            today,
        });
    }

    let mut months = (today.year() - incident_date.year()) * 12
        + today.month() as i32
        - incident_date.month() as i32;
    if today.day() < incident_date.day() {
        months -= 1;
    }
    Ok(months.max(0) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn counts_whole_months() {
        assert_eq!(months_between(date(2020, 1, 15), date(2020, 1, 31)).unwrap(), 0);
        assert_eq!(months_between(date(2020, 1, 15), date(2020, 2, 14)).unwrap(), 0);
        assert_eq!(months_between(date(2020, 1, 15), date(2020, 2, 15)).unwrap(), 1);
        assert_eq!(months_between(date(2019, 1, 1), date(2025, 1, 1)).unwrap(), 72);
        assert_eq!(months_between(date(2019, 1, 1), date(2025, 2, 1)).unwrap(), 73);
    }

    #[test]
    fn rejects_future_incidents() {
        let error = months_between(date(2026, 1, 1), date(2025, 1, 1)).unwrap_err();
        assert!(matches!(error, ValidationError::IncidentInFuture { .. }));
    }
}
