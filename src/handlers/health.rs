use std::sync::Arc;
use axum::{extract::State, Json};
use crate::models::{HealthResponse, HomeResponse};
use crate::state::AppState;
use tracing::debug;

/// Landing endpoint
pub async fn home(State(state): State<Arc<AppState>>) -> Json<HomeResponse> {
    Json(HomeResponse {
        message: "Welcome to the classroom sync API. Create a class, then connect over WebSocket.".to_string(),
        status: "ONLINE".to_string(),
        active_classes: state.registry.active_count(),
    })
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    debug!("Health check requested");
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Server is running".to_string(),
    })
}
