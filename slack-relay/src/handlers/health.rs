use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::models::StatusResponse;
use crate::startup::AppState;

/// `GET /`: static liveness payload.
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse::running(&state.config.service_name))
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": StatusResponse::running(&state.config.service_name).status,
        "service": "slack-relay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
