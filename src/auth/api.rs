//! Authentication endpoints: login, logout, profile.

use crate::auth::{
    jwt::JwtHandler,
    middleware::current_admin,
    models::{AdminProfile, LoginRequest, LoginResponse, ProfileResponse},
    password,
    store::AdminStore,
};
use crate::models::MessageResponse;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Shared auth state
#[derive(Clone)]
pub struct AuthState {
    pub admin_store: Arc<AdminStore>,
    pub jwt_handler: Arc<JwtHandler>,
}

impl AuthState {
    pub fn new(admin_store: Arc<AdminStore>, jwt_handler: Arc<JwtHandler>) -> Self {
        Self {
            admin_store,
            jwt_handler,
        }
    }
}

/// Login endpoint - POST /api/auth/login
pub async fn login(
    State(state): State<AuthState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthApiError> {
    let email = payload.email.trim().to_lowercase();
    let password = payload.password;

    // Validated before any store access.
    if email.is_empty() || password.is_empty() {
        return Err(AuthApiError::MissingCredentials);
    }

    info!("🔐 Login attempt: {}", email);

    // Unknown email and wrong password produce the same error so the
    // endpoint cannot be used to enumerate accounts.
    let admin = state
        .admin_store
        .get_by_email(&email)
        .map_err(AuthApiError::Internal)?
        .ok_or(AuthApiError::InvalidCredentials)?;

    if !password::verify_password(&password, &admin.password_hash) {
        warn!("❌ Failed login attempt: {}", email);
        return Err(AuthApiError::InvalidCredentials);
    }

    // Best effort; a failed write must not block token issuance.
    if let Err(e) = state.admin_store.touch_last_login(&admin.id) {
        warn!("Failed to record last login for {}: {}", email, e);
    }

    let token = state
        .jwt_handler
        .issue(&admin.id)
        .map_err(AuthApiError::Internal)?;

    info!("✅ Login successful: {}", email);

    Ok(Json(LoginResponse {
        success: true,
        token,
        admin: AdminProfile::from_admin(&admin),
    }))
}

/// Logout endpoint - POST /api/auth/logout (protected)
///
/// Tokens are stateless with no server-side revocation list, so logout is
/// an acknowledgement; the client discards its token.
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse::new("Logged out successfully"))
}

/// Profile endpoint - GET /api/auth/profile (protected)
pub async fn profile(
    State(state): State<AuthState>,
    req: Request,
) -> Result<Json<ProfileResponse>, AuthApiError> {
    let current = current_admin(&req).ok_or(AuthApiError::Unauthorized)?;

    // Re-read so the response reflects the stored record, not the
    // snapshot taken when the token was verified.
    let admin = state
        .admin_store
        .get_by_id(&current.id)
        .map_err(AuthApiError::Internal)?
        .ok_or(AuthApiError::AdminNotFound)?;

    Ok(Json(ProfileResponse {
        success: true,
        admin: AdminProfile::detailed(&admin),
    }))
}

/// Auth API errors
#[derive(Debug)]
pub enum AuthApiError {
    MissingCredentials,
    InvalidCredentials,
    Unauthorized,
    AdminNotFound,
    Internal(anyhow::Error),
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthApiError::MissingCredentials => (
                StatusCode::BAD_REQUEST,
                "Please provide email and password",
            ),
            AuthApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials")
            }
            AuthApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Not authorized to access this route",
            ),
            AuthApiError::AdminNotFound => (StatusCode::NOT_FOUND, "Admin not found"),
            AuthApiError::Internal(err) => {
                error!("Auth API internal error: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server Error")
            }
        };

        let body = Json(json!({
            "success": false,
            "error": message,
        }));

        (status, body).into_response()
    }
}
