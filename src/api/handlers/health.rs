//! # Health Handler

use axum::{extract::State, Json};

use crate::{models::HealthResponse, services::AppState};

/// Health check
///
/// # Endpoint
/// `GET /health`
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database_ok = state.db.health_check().await.is_ok();

    Json(HealthResponse::healthy(database_ok))
}
