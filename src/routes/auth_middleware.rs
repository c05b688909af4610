use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::auth::basic::get_basic_credentials;
use crate::auth::password::constant_time_eq;
use crate::state::AppState;

/// Guard admin-only routes with HTTP Basic credentials from the config
pub async fn admin_auth(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {

    // 1. Without a configured admin password nobody gets in
    let Some(expected_password) = state.config.admin_password.as_deref() else {
        error!("Admin password not configured, rejecting {}", req.uri().path());
        return unauthorized();
    };

    // 2. Get the credentials from the request
    let creds = match get_basic_credentials(req.headers()) {
        Ok(creds) => creds,
        Err(e) => {
            info!("Admin route {} rejected: {}", req.uri().path(), e);
            return unauthorized();
        }
    };

    // 3. Compare both parts in full before deciding
    let user_ok = constant_time_eq(creds.username.as_bytes(), state.config.admin_username.as_bytes());
    let pass_ok = constant_time_eq(creds.password.as_bytes(), expected_password.as_bytes());
    if !(user_ok & pass_ok) {
        warn!("Incorrect admin credentials for {}", req.uri().path());
        return unauthorized();
    }

    next.run(req).await
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Basic")],
        "Incorrect username or password",
    )
        .into_response()
}
