use crate::{
    models::{ClassKind, CreateClassRequest, CreateClassResponse, ErrorResponse},
    state::AppState,
    ws::classroom::ClassError,
};
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::error;

/// Create a class and hand back its class code
pub async fn class_create(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateClassRequest>,
) -> Result<(StatusCode, Json<CreateClassResponse>), (StatusCode, Json<ErrorResponse>)> {
    if request.password.is_empty() {
        return Err(ErrorResponse::reply(
            StatusCode::BAD_REQUEST,
            "A class password is required",
        ));
    }

    let kind = ClassKind::from_class_type(request.class_type.as_deref());
    match state.registry.create(&request.password, kind) {
        Ok(class_id) => Ok((
            StatusCode::OK,
            Json(CreateClassResponse {
                success: true,
                class_id,
            }),
        )),
        Err(e @ ClassError::ClassIdExhausted(_)) => {
            error!("Failed to create {} class: {}", kind, e);
            Err(ErrorResponse::reply(StatusCode::SERVICE_UNAVAILABLE, e.to_string()))
        }
        Err(e) => {
            error!("Failed to create {} class: {}", kind, e);
            Err(ErrorResponse::reply(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}
