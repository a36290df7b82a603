use chrono::NaiveDate;
use juribank_scoring::outcomes::StatisticsSource;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn statistics_source(
    reference: bool,
    cases_per_category: usize,
    seed: Option<u64>,
) -> StatisticsSource {
    if reference {
        StatisticsSource::Reference
    } else {
        StatisticsSource::Synthetic {
            cases_per_category,
            seed,
        }
    }
}
