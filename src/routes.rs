//! Router assembly: public routes, protected routes, and shared layers.

use crate::auth::{api as auth_api, auth_guard, require_admin, AuthState};
use crate::contact;
use crate::content::{api as content_api, ContentState};
use crate::middleware::request_logging;
use crate::models::Config;
use axum::{
    http::{HeaderValue, StatusCode, Uri},
    middleware,
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use serde::Serialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

/// Build the full application router.
pub fn create_router(
    auth_state: AuthState,
    content_state: ContentState,
    config: &Config,
) -> Router {
    // Auth routes: login is public, logout and profile require a token.
    let auth_public = Router::new()
        .route("/api/auth/login", post(auth_api::login))
        .with_state(auth_state.clone());

    let auth_protected = Router::new()
        .route("/api/auth/logout", post(auth_api::logout))
        .route("/api/auth/profile", get(auth_api::profile))
        .route_layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_guard,
        ))
        .with_state(auth_state.clone());

    // Content reads are public.
    let content_public = Router::new()
        .route("/api/projects", get(content_api::list_projects))
        .route("/api/projects/:id", get(content_api::get_project))
        .route("/api/skills", get(content_api::list_skills))
        .route("/api/skills/:id", get(content_api::get_skill))
        .with_state(content_state.clone());

    // Content mutations require authentication and the admin role.
    // Layer order matters: the guard runs first, then the role gate.
    let content_protected = Router::new()
        .route("/api/projects", post(content_api::create_project))
        .route(
            "/api/projects/:id",
            put(content_api::update_project).delete(content_api::delete_project),
        )
        .route("/api/skills", post(content_api::create_skill))
        .route(
            "/api/skills/:id",
            put(content_api::update_skill).delete(content_api::delete_skill),
        )
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(auth_state, auth_guard))
        .with_state(content_state);

    let misc = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/contact", post(contact::send_contact));

    Router::new()
        .merge(auth_public)
        .merge(auth_protected)
        .merge(content_public)
        .merge(content_protected)
        .merge(misc)
        .fallback(not_found)
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(config))
}

/// CORS restricted to the configured client origin; permissive when no
/// origin is configured (local development).
fn cors_layer(config: &Config) -> CorsLayer {
    match config
        .client_url
        .as_deref()
        .and_then(|origin| origin.parse::<HeaderValue>().ok())
    {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::permissive(),
    }
}

#[derive(Serialize)]
struct HealthResponse {
    success: bool,
    message: &'static str,
    version: &'static str,
}

/// Health check endpoint - GET /api/health
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: "Server is running",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Catch-all for unknown routes.
async fn not_found(uri: Uri) -> impl IntoResponse {
    let body = Json(json!({
        "success": false,
        "error": format!("Route {} not found", uri.path()),
    }));

    (StatusCode::NOT_FOUND, body)
}
