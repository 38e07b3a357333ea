use analytics::AnalyticsError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Converts our custom `AppError` into an HTTP response.
///
/// Pipeline errors are all recoverable at this boundary: an empty filter
/// result becomes a "no data" response the frontend renders as a message,
/// and a bad selection becomes a 400 rather than a crash.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Analytics(AnalyticsError::EmptyResult(_)) => (
                StatusCode::NOT_FOUND,
                "No data for the selected filters".to_string(),
            ),
            AppError::Analytics(AnalyticsError::NotEnoughData(_)) => {
                (StatusCode::NOT_FOUND, "The dataset is empty".to_string())
            }
            AppError::Analytics(AnalyticsError::InvalidRankingConfig(message)) => {
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Analytics(err) => {
                tracing::error!(error = ?err, "Analytics error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred during aggregation".to_string(),
                )
            }
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
