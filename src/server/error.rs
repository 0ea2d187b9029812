use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::ephemeris::EphemerisError;
use crate::models::DateInputError;

/// Message returned for every kind of invalid date input
pub const DATE_HINT: &str =
    "Bitte \"date=YYYY-MM-DD\" angeben (1900–2050). Beispiel: ?date=2026-01-13";

pub enum ApiError {
    Validation(DateInputError),
    Computation(String),
    NotFound,
}

impl From<DateInputError> for ApiError {
    fn from(e: DateInputError) -> Self {
        ApiError::Validation(e)
    }
}

impl From<EphemerisError> for ApiError {
    fn from(e: EphemerisError) -> Self {
        ApiError::Computation(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(e) => {
                tracing::debug!(reason = %e, "Rejected date input");
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new(DATE_HINT)),
                )
                    .into_response()
            }
            ApiError::Computation(msg) => {
                tracing::error!(error = %msg, "Declination calculation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(&msg)),
                )
                    .into_response()
            }
            ApiError::NotFound => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Not found"))).into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: &str) -> Self {
        ErrorResponse {
            ok: false,
            error: error.to_string(),
        }
    }
}
