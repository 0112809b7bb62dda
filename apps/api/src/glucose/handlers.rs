//! Axum route handlers for the Glucose API.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::glucose::dashboard::DashboardConfig;
use crate::glucose::loader::load;
use crate::glucose::normalizer::{normalize, DuplicatePolicy, GlucoseSeries, SeriesSummary};
use crate::glucose::sample::SAMPLE_WEEK_CSV;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SeriesResponse {
    pub series: GlucoseSeries,
    pub summary: SeriesSummary,
    pub duplicate_policy: DuplicatePolicy,
}

/// GET /api/v1/glucose/sample
pub async fn handle_sample_csv(State(state): State<AppState>) -> Response {
    let disposition = format!(
        "attachment; filename=\"{}\"",
        state.config.dashboard.sample_filename
    );
    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        SAMPLE_WEEK_CSV,
    )
        .into_response()
}

/// POST /api/v1/glucose/series
///
/// Raw CSV body → time-ordered series for charting. Malformed rows reject the
/// whole upload; there is no partial result.
pub async fn handle_series(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SeriesResponse>, AppError> {
    let policy = state.config.duplicate_policy;
    let samples = load(&body)?;
    let parsed = samples.len();
    let series = normalize(samples, policy)?;
    info!(
        "Normalized glucose upload: {} rows parsed, {} kept ({:?})",
        parsed,
        series.len(),
        policy
    );

    let summary = series.summary();
    Ok(Json(SeriesResponse {
        series,
        summary,
        duplicate_policy: policy,
    }))
}

/// GET /api/v1/glucose/dashboard
pub async fn handle_dashboard(State(state): State<AppState>) -> Json<DashboardConfig> {
    Json(state.config.dashboard.clone())
}
