use utoipa::OpenApi;
use crate::models::*;

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
#[allow(dead_code)]
pub async fn health_check_doc() {}

/// Create a class
#[utoipa::path(
    post,
    path = "/class/create",
    request_body = CreateClassRequest,
    responses(
        (status = 200, description = "Class created", body = CreateClassResponse),
        (status = 400, description = "Missing password", body = ErrorResponse),
        (status = 503, description = "No unused class code available", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn class_create_doc() {}

/// Close a class
#[utoipa::path(
    post,
    path = "/class/close",
    request_body = CloseClassRequest,
    responses(
        (status = 200, description = "Class closed, or was not open", body = CloseClassResponse)
    )
)]
#[allow(dead_code)]
pub async fn class_close_doc() {}

/// Message counters and resource usage
#[utoipa::path(
    get,
    path = "/metrics",
    responses(
        (status = 200, description = "Current metrics", body = MetricsResponse),
        (status = 401, description = "Missing or wrong admin credentials")
    )
)]
#[allow(dead_code)]
pub async fn metrics_doc() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check_doc,
        class_create_doc,
        class_close_doc,
        metrics_doc,
    ),
    components(
        schemas(
            HealthResponse,
            CreateClassRequest,
            CreateClassResponse,
            CloseClassRequest,
            CloseClassResponse,
            MetricsResponse,
            ErrorResponse,
            ClassKind
        )
    ),
    tags(
        (name = "api", description = "Classroom sync API")
    )
)]
pub struct ApiDoc;
