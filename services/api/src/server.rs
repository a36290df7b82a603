use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_outcome_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use juribank_scoring::config::AppConfig;
use juribank_scoring::error::AppError;
use juribank_scoring::outcomes::{OutcomeService, ScoringWeights};
use juribank_scoring::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let outcome_service = Arc::new(OutcomeService::from_source(
        &config.statistics,
        ScoringWeights::default(),
    )?);

    let app = with_outcome_routes(outcome_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "juribank scoring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
