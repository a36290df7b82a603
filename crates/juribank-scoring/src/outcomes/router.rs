use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::domain::CaseCategory;
use super::error::ScoringError;
use super::intake::CaseSubmission;
use super::prediction::DISCLAIMER;
use super::service::OutcomeService;
use super::store::StatisticsSource;

/// Largest corpus a refresh request may ask for, per category.
const MAX_REFRESH_CASES: usize = 20_000;

/// Router builder exposing prediction and statistics endpoints.
pub fn outcome_router(service: Arc<OutcomeService>) -> Router {
    Router::new()
        .route("/api/v1/predictions", post(predict_handler))
        .route("/api/v1/categories", get(categories_handler))
        .route(
            "/api/v1/categories/:category/statistics",
            get(statistics_handler),
        )
        .route("/api/v1/corpus/refresh", post(refresh_handler))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RefreshRequest {
    #[serde(default)]
    pub(crate) reference: bool,
    #[serde(default)]
    pub(crate) cases_per_category: Option<usize>,
    #[serde(default)]
    pub(crate) seed: Option<u64>,
}

pub(crate) async fn predict_handler(
    State(service): State<Arc<OutcomeService>>,
    axum::Json(submission): axum::Json<CaseSubmission>,
) -> Response {
    let today = Local::now().date_naive();
    match service.predict(submission, today) {
        Ok(prediction) => (StatusCode::OK, axum::Json(prediction)).into_response(),
        Err(error) => scoring_error_response(error),
    }
}

pub(crate) async fn categories_handler(
    State(service): State<Arc<OutcomeService>>,
) -> Response {
    (StatusCode::OK, axum::Json(service.categories())).into_response()
}

pub(crate) async fn statistics_handler(
    State(service): State<Arc<OutcomeService>>,
    Path(category): Path<String>,
) -> Response {
    let lookup = category
        .parse::<CaseCategory>()
        .map_err(ScoringError::from)
        .and_then(|category| service.statistics(category));

    match lookup {
        Ok(statistics) => (StatusCode::OK, axum::Json(statistics)).into_response(),
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn refresh_handler(
    State(service): State<Arc<OutcomeService>>,
    axum::Json(request): axum::Json<RefreshRequest>,
) -> Response {
    let source = if request.reference {
        StatisticsSource::Reference
    } else {
        let cases_per_category = request.cases_per_category.unwrap_or(500);
        if cases_per_category == 0 || cases_per_category > MAX_REFRESH_CASES {
            let payload = json!({
                "error": format!("cases_per_category must be between 1 and {MAX_REFRESH_CASES}"),
            });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
        StatisticsSource::Synthetic {
            cases_per_category,
            seed: request.seed,
        }
    };

    // Corpus generation is CPU-bound; keep it off the async workers.
    let outcome = tokio::task::spawn_blocking(move || service.refresh(source)).await;

    match outcome {
        Ok(Ok(report)) => (StatusCode::OK, axum::Json(report)).into_response(),
        Ok(Err(error)) => scoring_error_response(error),
        Err(join_error) => {
            error!(%join_error, "corpus refresh task failed");
            let payload = json!({ "error": "corpus refresh did not complete" });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

/// Validation failures come back with the disclaimer so a UI can show a
/// fallback message instead of an estimate.
fn scoring_error_response(error: ScoringError) -> Response {
    let status = if error.is_validation() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    let kind = if error.is_validation() {
        "validation"
    } else {
        "data"
    };
    let payload = json!({
        "error": error.to_string(),
        "kind": kind,
        "disclaimer": DISCLAIMER,
    });
    (status, axum::Json(payload)).into_response()
}
