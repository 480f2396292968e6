use axum::{http::StatusCode, response::IntoResponse};
use service_core::error::AppError;

use crate::services::render_metrics;

pub async fn metrics() -> Result<impl IntoResponse, AppError> {
    let body = render_metrics().ok_or_else(|| {
        AppError::ServiceUnavailable("metrics recorder not initialized".to_string())
    })?;

    Ok((
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        body,
    ))
}
