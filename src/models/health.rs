use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// API response for health check
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// API response for the landing route
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HomeResponse {
    pub message: String,
    pub status: String,
    pub active_classes: u64,
}
