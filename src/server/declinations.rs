use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};

use crate::models::{compute_declinations, DateInput, DateInputError, DeclinationResponse};

use super::error::{ApiError, ApiResult};
use super::AppState;

/// First `date` value of the query string, if the query could be decoded at all
fn date_param(query: Result<Query<Vec<(String, String)>>, QueryRejection>) -> Option<String> {
    let Query(pairs) = query.ok()?;
    pairs
        .into_iter()
        .find(|(key, _)| key == "date")
        .map(|(_, value)| value)
}

/// Declinations of all cataloged bodies at UT 00:00 of `?date=YYYY-MM-DD`
pub async fn get_declinations(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<Json<DeclinationResponse>> {
    let raw = date_param(query).ok_or(DateInputError::Missing)?;
    let date = DateInput::parse(&raw)?;

    let ephemeris = Arc::clone(&state.ephemeris);
    let declinations =
        tokio::task::spawn_blocking(move || compute_declinations(ephemeris.as_ref(), &date))
            .await
            .map_err(|e| ApiError::Computation(e.to_string()))??;

    tracing::info!(
        date = %raw,
        tjd = declinations.julian_day,
        bodies = declinations.results.len(),
        "Computed declinations"
    );

    Ok(Json(declinations.into_response(raw)))
}

/// CORS preflight, answered before any validation
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
