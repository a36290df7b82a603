use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::outcomes::domain::{CaseCategory, CaseRecord};
use crate::outcomes::error::ValidationError;

const FACTOR_SEPARATOR: char = ';';

#[derive(Debug, thiserror::Error)]
pub enum CorpusImportError {
    #[error("failed to read corpus file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid corpus CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("corpus row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: ValidationError,
    },
}

/// Flat CSV shape of a [`CaseRecord`].
#[derive(Debug, Serialize, Deserialize)]
struct CaseRow {
    id: String,
    category: String,
    bank_name: String,
    success: bool,
    compensation: u32,
    timeframe_weeks: u32,
    evidence_quality: String,
    complexity: String,
    #[serde(default)]
    factors: String,
}

impl From<&CaseRecord> for CaseRow {
    fn from(record: &CaseRecord) -> Self {
        Self {
            id: record.id.clone(),
            category: record.category.slug().to_string(),
            bank_name: record.bank_name.clone(),
            success: record.success,
            compensation: record.compensation,
            timeframe_weeks: record.timeframe_weeks,
            evidence_quality: record.evidence_quality.slug().to_string(),
            complexity: record.complexity.slug().to_string(),
            factors: record.factors.join(&FACTOR_SEPARATOR.to_string()),
        }
    }
}

impl CaseRow {
    fn into_record(self) -> Result<CaseRecord, ValidationError> {
        let category: CaseCategory = self.category.parse()?;
        let factors = self
            .factors
            .split(FACTOR_SEPARATOR)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        Ok(CaseRecord {
            id: self.id,
            category,
            bank_name: self.bank_name,
            success: self.success,
            compensation: self.compensation,
            timeframe_weeks: self.timeframe_weeks.max(1),
            evidence_quality: self.evidence_quality.parse()?,
            complexity: self.complexity.parse()?,
            factors,
        })
    }
}

pub fn write_records<W: Write>(writer: W, records: &[CaseRecord]) -> Result<(), CorpusImportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(CaseRow::from(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn read_records<R: Read>(reader: R) -> Result<Vec<CaseRecord>, CorpusImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, row) in csv_reader.deserialize::<CaseRow>().enumerate() {
        let row = row?;
        let record = row
            .into_record()
            .map_err(|source| CorpusImportError::Row {
                row: index + 1,
                source,
            })?;
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcomes::domain::{Complexity, EvidenceQuality};

    #[test]
    fn reads_factor_lists_and_aliases() {
        let csv = "id,category,bank_name,success,compensation,timeframe_weeks,evidence_quality,complexity,factors\n\
                   BC-1,bank_charges,HSBC,true,420,6,Very Poor,low,documented-bank-error; financial-hardship\n";

        let records = read_records(csv.as_bytes()).expect("csv parses");

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.category, CaseCategory::BankCharges);
        assert_eq!(record.evidence_quality, EvidenceQuality::VeryPoor);
        assert_eq!(record.complexity, Complexity::Low);
        assert_eq!(
            record.factors,
            vec!["documented-bank-error", "financial-hardship"]
        );
    }

    #[test]
    fn reports_row_number_for_unknown_category() {
        let csv = "id,category,bank_name,success,compensation,timeframe_weeks,evidence_quality,complexity,factors\n\
                   X-1,ppi,HSBC,true,900,10,good,medium,\n\
                   X-2,car-finance,HSBC,false,0,10,good,medium,\n";

        let error = read_records(csv.as_bytes()).expect_err("unknown category rejected");

        match error {
            CorpusImportError::Row { row, source } => {
                assert_eq!(row, 2);
                assert!(matches!(source, ValidationError::UnsupportedCaseType { .. }));
            }
            other => panic!("expected row error, got {other:?}"),
        }
    }
}
