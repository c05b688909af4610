use crate::{
    config::Config,
    docs::ApiDoc,
    handlers::{class_close, class_create, health_check, home, metrics},
    routes::auth_middleware::admin_auth,
    state::AppState,
    websocket::websocket_handler,
};
use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create the full application router
pub fn create_routes(state: Arc<AppState>) -> Router {
    let admin_routes = Router::<Arc<AppState>>::new()
        .route("/metrics", get(metrics))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .route_layer(middleware::from_fn_with_state(state.clone(), admin_auth)); // Applies to all routes added above

    Router::<Arc<AppState>>::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .route("/class/create", post(class_create))
        .route("/class/close", post(class_close))
        .route("/codeshare/connect", get(websocket_handler))
        .route("/pollshare/connect", get(websocket_handler))
        .route("/ws/connect", get(websocket_handler))
        .merge(admin_routes)
        .layer(cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    match config.cors_origins.as_deref() {
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .filter_map(|origin| HeaderValue::from_str(origin).ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
        None => CorsLayer::permissive(),
    }
}
