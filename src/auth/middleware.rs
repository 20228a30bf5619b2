//! Route protection: bearer-token guard and role gate.

use crate::auth::{api::AuthState, jwt::TokenError, models::AdminUser};
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

/// Resolved admin identity, attached to request extensions by
/// [`auth_guard`]. Downstream handlers consume this instead of
/// re-verifying the token.
#[derive(Debug, Clone)]
pub struct CurrentAdmin(pub AdminUser);

/// Guard for protected routes.
///
/// Extracts `Authorization: Bearer <token>`, validates signature and
/// expiry, re-confirms the subject still exists in the store, and attaches
/// the resolved record to the request. Each failure maps to a distinct
/// client-visible error.
pub async fn auth_guard(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthGuardError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|t| t.to_string())
        .ok_or(AuthGuardError::MissingToken)?;

    let claims = state.jwt_handler.validate(&token).map_err(|e| match e {
        TokenError::Expired => AuthGuardError::TokenExpired,
        TokenError::Invalid => AuthGuardError::InvalidToken,
    })?;

    let admin_id =
        Uuid::parse_str(&claims.sub).map_err(|_| AuthGuardError::InvalidToken)?;

    // A deleted admin invalidates every outstanding token.
    let admin = state
        .admin_store
        .get_by_id(&admin_id)
        .map_err(AuthGuardError::Internal)?
        .ok_or(AuthGuardError::AdminGone)?;

    req.extensions_mut().insert(CurrentAdmin(admin));

    Ok(next.run(req).await)
}

/// Role gate, layered after [`auth_guard`]. Authenticated but
/// under-privileged requests fail here with 403, distinct from the
/// guard's 401s.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AuthGuardError> {
    match req.extensions().get::<CurrentAdmin>() {
        Some(current) if current.0.role.as_str() == "admin" => Ok(next.run(req).await),
        _ => Err(AuthGuardError::Forbidden),
    }
}

/// Fetch the identity attached by the guard.
pub fn current_admin(req: &Request) -> Option<&AdminUser> {
    req.extensions().get::<CurrentAdmin>().map(|c| &c.0)
}

/// Guard failures
#[derive(Debug)]
pub enum AuthGuardError {
    MissingToken,
    InvalidToken,
    TokenExpired,
    AdminGone,
    Forbidden,
    Internal(anyhow::Error),
}

impl IntoResponse for AuthGuardError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthGuardError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "Not authorized to access this route",
            ),
            AuthGuardError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
            AuthGuardError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                "Token expired. Please login again.",
            ),
            AuthGuardError::AdminGone => {
                (StatusCode::UNAUTHORIZED, "Admin user no longer exists")
            }
            AuthGuardError::Forbidden => (
                StatusCode::FORBIDDEN,
                "Access denied. Admin privileges required.",
            ),
            AuthGuardError::Internal(err) => {
                error!("Auth guard internal error: {:#}", err);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::AdminRole;
    use axum::body::Body;
    use chrono::Utc;

    fn sample_admin() -> AdminUser {
        AdminUser {
            id: Uuid::new_v4(),
            email: "a@x.com".to_string(),
            password_hash: String::new(),
            name: "Admin".to_string(),
            role: AdminRole::Admin,
            last_login_at: None,
            created_at: Utc::now().to_rfc3339(),
        }
    }

    #[test]
    fn test_guard_error_status_codes() {
        assert_eq!(
            AuthGuardError::MissingToken.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthGuardError::InvalidToken.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthGuardError::TokenExpired.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthGuardError::AdminGone.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthGuardError::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AuthGuardError::Internal(anyhow::anyhow!("boom"))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_current_admin_roundtrip() {
        let mut req = Request::new(Body::empty());
        assert!(current_admin(&req).is_none());

        let admin = sample_admin();
        req.extensions_mut().insert(CurrentAdmin(admin.clone()));

        let resolved = current_admin(&req).unwrap();
        assert_eq!(resolved.id, admin.id);
        assert_eq!(resolved.email, "a@x.com");
    }
}
