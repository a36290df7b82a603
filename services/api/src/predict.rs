use crate::infra::{parse_date, statistics_source};
use chrono::{Local, NaiveDate};
use clap::Args;
use juribank_scoring::error::AppError;
use juribank_scoring::outcomes::{
    write_records, CaseRecord, CaseSubmission, HistoricalCorpus, OutcomeService, Prediction,
    ScoringWeights,
};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

const DEFAULT_CASES_PER_CATEGORY: usize = 500;

#[derive(Args, Debug)]
pub(crate) struct SourceArgs {
    /// Score against the published reference rates instead of a generated corpus
    #[arg(long)]
    pub(crate) reference: bool,
    /// Synthetic cases generated per category
    #[arg(long, default_value_t = DEFAULT_CASES_PER_CATEGORY)]
    pub(crate) cases_per_category: usize,
    /// Seed for a reproducible corpus
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    /// JSON file holding a case submission
    #[arg(long, value_name = "FILE", conflicts_with = "case_type")]
    pub(crate) case: Option<PathBuf>,
    /// Case category, e.g. ppi or bank-charges
    #[arg(long, required_unless_present = "case")]
    pub(crate) case_type: Option<String>,
    /// Positive factor name (repeatable)
    #[arg(long, value_name = "FACTOR")]
    pub(crate) positive: Vec<String>,
    /// Negative factor name (repeatable)
    #[arg(long, value_name = "FACTOR")]
    pub(crate) negative: Vec<String>,
    /// Evidence quality: very-poor, poor, medium, good or excellent
    #[arg(long)]
    pub(crate) evidence: Option<String>,
    /// Case complexity: low, medium or high
    #[arg(long)]
    pub(crate) complexity: Option<String>,
    /// Amount claimed in pounds
    #[arg(long)]
    pub(crate) claim_amount: Option<f64>,
    #[arg(long)]
    pub(crate) bank: Option<String>,
    /// Months since the incident
    #[arg(long)]
    pub(crate) months: Option<u32>,
    /// Incident date (YYYY-MM-DD), used when --months is absent
    #[arg(long, value_parser = parse_date)]
    pub(crate) incident_date: Option<NaiveDate>,
    /// Evaluation date (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    /// Print the full prediction as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl PredictArgs {
    fn flag_submission(&self) -> CaseSubmission {
        CaseSubmission {
            case_type: self.case_type.clone().unwrap_or_default(),
            positive_factors: self.positive.clone(),
            negative_factors: self.negative.clone(),
            evidence_quality: self.evidence.clone(),
            complexity: self.complexity.clone(),
            claim_amount: self.claim_amount,
            bank_name: self.bank.clone(),
            months_since_incident: self.months,
            incident_date: self.incident_date,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct CorpusExportArgs {
    /// Destination CSV file; stdout when omitted
    #[arg(long, value_name = "FILE")]
    pub(crate) output: Option<PathBuf>,
    #[arg(long, default_value_t = DEFAULT_CASES_PER_CATEGORY)]
    pub(crate) cases_per_category: usize,
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

#[derive(Args, Debug)]
pub(crate) struct CorpusStatsArgs {
    /// CSV corpus to aggregate instead of generating one
    #[arg(long, value_name = "FILE")]
    pub(crate) input: Option<PathBuf>,
    #[arg(long, default_value_t = DEFAULT_CASES_PER_CATEGORY)]
    pub(crate) cases_per_category: usize,
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Print statistics as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let submission = match &args.case {
        Some(path) => load_submission(path)?,
        None => args.flag_submission(),
    };

    let source = statistics_source(
        args.source.reference,
        args.source.cases_per_category,
        args.source.seed,
    );
    let service = OutcomeService::from_source(&source, ScoringWeights::default())?;
    let prediction = service.predict(submission, today)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&prediction)?);
    } else {
        println!("{}", render_prediction(&prediction));
    }
    Ok(())
}

pub(crate) fn run_corpus_export(args: CorpusExportArgs) -> Result<(), AppError> {
    let corpus = HistoricalCorpus::synthetic(args.cases_per_category, args.seed);
    let records: Vec<CaseRecord> = corpus.records().cloned().collect();

    match args.output {
        Some(path) => {
            write_records(File::create(&path)?, &records)?;
            info!(cases = records.len(), path = %path.display(), "corpus exported");
        }
        None => write_records(std::io::stdout().lock(), &records)?,
    }
    Ok(())
}

pub(crate) fn run_corpus_stats(args: CorpusStatsArgs) -> Result<(), AppError> {
    let corpus = match &args.input {
        Some(path) => HistoricalCorpus::from_path(path)?,
        None => HistoricalCorpus::synthetic(args.cases_per_category, args.seed),
    };
    let statistics = corpus.statistics()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&statistics)?);
        return Ok(());
    }

    println!("Corpus statistics ({} cases)", corpus.len());
    for stats in statistics.values() {
        println!(
            "- {}: {}/{} upheld ({:.1}%) | median £{} | mean £{} | ~{} weeks",
            stats.category.label(),
            stats.successful_cases,
            stats.total_cases,
            stats.success_rate * 100.0,
            stats.median_compensation,
            stats.average_compensation,
            stats.average_timeframe_weeks
        );
        for (band, range) in stats.compensation_ranges.iter() {
            println!(
                "    {:<11} £{}-£{} ({:.0}%)",
                band.label(),
                range.min,
                range.max,
                range.probability * 100.0
            );
        }
    }
    Ok(())
}

fn load_submission(path: &Path) -> Result<CaseSubmission, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn render_prediction(prediction: &Prediction) -> String {
    let mut lines = vec![prediction.summary()];

    let breakdown = &prediction.breakdown;
    lines.push(format!(
        "Probability: base {:.3} + factors {:+.3}, evidence x{:.2}, time x{:.2} ({} months)",
        breakdown.base_rate,
        breakdown.factor_adjustment,
        breakdown.evidence_multiplier,
        breakdown.time_multiplier,
        breakdown.months_since_incident
    ));

    let compensation = &prediction.compensation_estimate;
    lines.push(format!(
        "Compensation: {} band, strength {:.2}, {:?} confidence",
        compensation.band.label(),
        prediction.case_strength,
        compensation.confidence
    ));
    if let Some(recoverable) = compensation.recoverable_maximum {
        lines.push(format!("Recoverable up to £{recoverable} of the amount claimed"));
    }

    lines.push("Timeline:".to_string());
    for milestone in &prediction.timeline_estimate.milestones {
        lines.push(format!(
            "  - week {:>3}: {}",
            milestone.weeks, milestone.description
        ));
    }

    let risk = &prediction.risk_assessment;
    for (heading, entries) in [
        ("Strengths", &risk.strengths),
        ("Risks", &risk.risks),
        ("Recommendations", &risk.recommendations),
    ] {
        if entries.is_empty() {
            continue;
        }
        lines.push(format!("{heading}:"));
        lines.extend(entries.iter().map(|entry| format!("  - {entry}")));
    }

    if !prediction.ignored_factors.is_empty() {
        lines.push(format!(
            "Ignored factors: {}",
            prediction.ignored_factors.join(", ")
        ));
    }

    lines.push(prediction.disclaimer.clone());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use juribank_scoring::outcomes::{PredictionEngine, ScoringTables};
    use std::sync::Arc;

    fn sample_args() -> PredictArgs {
        PredictArgs {
            case: None,
            case_type: Some("ppi".to_string()),
            positive: vec!["mis-selling-evidence".to_string()],
            negative: Vec::new(),
            evidence: Some("good".to_string()),
            complexity: None,
            claim_amount: Some(3_000.0),
            bank: Some("Lloyds".to_string()),
            months: Some(10),
            incident_date: None,
            today: None,
            source: SourceArgs {
                reference: true,
                cases_per_category: DEFAULT_CASES_PER_CATEGORY,
                seed: None,
            },
            json: false,
        }
    }

    #[test]
    fn flags_map_onto_a_submission() {
        let submission = sample_args().flag_submission();
        assert_eq!(submission.case_type, "ppi");
        assert_eq!(submission.positive_factors, vec!["mis-selling-evidence"]);
        assert_eq!(submission.claim_amount, Some(3_000.0));
        assert_eq!(submission.months_since_incident, Some(10));
    }

    #[test]
    fn submissions_load_from_json_files() {
        let path = std::env::temp_dir().join(format!("juribank-case-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"case_type":"bank-charges","evidence_quality":"poor"}"#)
            .expect("fixture written");

        let submission = load_submission(&path).expect("submission loads");
        std::fs::remove_file(&path).ok();

        assert_eq!(submission.case_type, "bank-charges");
        assert_eq!(submission.evidence_quality.as_deref(), Some("poor"));
    }

    #[test]
    fn rendered_prediction_includes_summary_and_disclaimer() {
        let engine = PredictionEngine::new(
            Arc::new(ScoringTables::reference()),
            ScoringWeights::default(),
        );
        let today = NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date");
        let description = sample_args()
            .flag_submission()
            .into_description(today)
            .expect("valid submission");
        let prediction = engine.generate_prediction(&description).expect("scores");

        let rendered = render_prediction(&prediction);

        assert!(rendered.starts_with("ppi: "));
        assert!(rendered.contains("Timeline:"));
        assert!(rendered.contains("week  12"));
        assert!(rendered.ends_with(&prediction.disclaimer));
    }
}
