use crate::{
    models::{CloseClassRequest, CloseClassResponse},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::debug;

/// Close a class. Closing an unknown class code also succeeds.
///
/// No password is asked for: whoever knows the class code can close it.
pub async fn class_close(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CloseClassRequest>,
) -> (StatusCode, Json<CloseClassResponse>) {
    if !state.registry.close(&request.class_id) {
        debug!("Close requested for unknown class {}", request.class_id);
    }
    (StatusCode::OK, Json(CloseClassResponse { success: true }))
}
