//! CSV import and export of the historical corpus.

use juribank_scoring::outcomes::{
    read_records, write_records, CaseCategory, CorpusImportError, HistoricalCorpus, RiskFactorTable,
    ScoringTables,
};

const SAMPLE: &str = "\
id,category,bank_name,success,compensation,timeframe_weeks,evidence_quality,complexity,factors
BC-00001,bank-charges,Barclays,true,420,7,good,low,documented-bank-error;financial-hardship
BC-00002,bank-charges,HSBC,false,0,9,poor,medium,insufficient-evidence
BC-00003,bank-charges,TSB,true,1800,12,excellent,high,complete-paper-trail
PPI-00001,ppi,Lloyds,true,3200,14,medium,medium,mis-selling-evidence
";

#[test]
fn sample_archive_aggregates_per_category() {
    let corpus = HistoricalCorpus::from_reader(SAMPLE.as_bytes()).expect("sample imports");
    let statistics = corpus.statistics().expect("statistics aggregate");

    let bank_charges = &statistics[&CaseCategory::BankCharges];
    assert_eq!(bank_charges.total_cases, 3);
    assert_eq!(bank_charges.successful_cases, 2);
    assert_eq!(bank_charges.median_compensation, 1110);
    assert_eq!(bank_charges.average_timeframe_weeks, 9);

    let ppi = &statistics[&CaseCategory::Ppi];
    assert_eq!(ppi.success_rate, 1.0);
    assert_eq!(ppi.average_compensation, 3200);

    assert_eq!(
        corpus.categories().collect::<Vec<_>>(),
        vec![CaseCategory::BankCharges, CaseCategory::Ppi]
    );
}

#[test]
fn imported_archive_only_scores_its_categories() {
    let corpus = HistoricalCorpus::from_reader(SAMPLE.as_bytes()).expect("sample imports");
    let tables =
        ScoringTables::from_corpus(&corpus, RiskFactorTable::standard()).expect("tables build");

    assert!(tables.statistics(CaseCategory::Ppi).is_some());
    assert!(tables.statistics(CaseCategory::MortgageIssues).is_none());
}

#[test]
fn exported_corpus_reimports_unchanged() {
    let corpus = HistoricalCorpus::synthetic(40, Some(17));
    let records: Vec<_> = corpus.records().cloned().collect();

    let mut buffer = Vec::new();
    write_records(&mut buffer, &records).expect("export succeeds");
    let reimported = HistoricalCorpus::from_reader(buffer.as_slice()).expect("import succeeds");

    assert_eq!(reimported, corpus);
    assert_eq!(read_records(buffer.as_slice()).expect("rows parse").len(), 200);
}

#[test]
fn malformed_rows_report_their_position() {
    let broken = SAMPLE.replace("PPI-00001,ppi", "PPI-00001,car-finance");

    let error = HistoricalCorpus::from_reader(broken.as_bytes()).expect_err("bad category");

    assert!(matches!(error, CorpusImportError::Row { row: 4, .. }));
}

#[test]
fn missing_files_surface_io_errors() {
    let error = HistoricalCorpus::from_path("/nonexistent/juribank/cases.csv")
        .expect_err("missing file");
    assert!(matches!(error, CorpusImportError::Io(_)));
}
