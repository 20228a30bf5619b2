//! Authentication data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Admin credential record. In practice exactly one of these exists per
/// deployment; the bootstrap task enforces that, not the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // bcrypt hash - never serialize
    pub name: String,
    pub role: AdminRole,
    pub last_login_at: Option<String>,
    pub created_at: String,
}

/// The single role this system knows. Kept as an enum so the wire format
/// stays the literal `"admin"` and the role gate has something to check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AdminRole {
    #[serde(rename = "admin")]
    Admin,
}

impl AdminRole {
    pub fn as_str(&self) -> &str {
        "admin"
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(AdminRole::Admin),
            _ => None,
        }
    }
}

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // subject (admin id)
    pub iat: usize,
    pub exp: usize, // expiration timestamp
}

/// Login request body. Fields default to empty so missing keys surface as
/// a validation error instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub admin: AdminProfile,
}

/// Profile response
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub admin: AdminProfile,
}

/// Redacted admin view (no hash)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: AdminRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<String>,
}

impl AdminProfile {
    /// Shape returned by login: identity fields only.
    pub fn from_admin(admin: &AdminUser) -> Self {
        Self {
            id: admin.id.to_string(),
            email: admin.email.clone(),
            name: admin.name.clone(),
            role: admin.role,
            last_login_at: None,
        }
    }

    /// Shape returned by the profile endpoint, including the last login.
    pub fn detailed(admin: &AdminUser) -> Self {
        Self {
            last_login_at: admin.last_login_at.clone(),
            ..Self::from_admin(admin)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_admin() -> AdminUser {
        AdminUser {
            id: Uuid::new_v4(),
            email: "a@x.com".to_string(),
            password_hash: "hash".to_string(),
            name: "Admin".to_string(),
            role: AdminRole::Admin,
            last_login_at: Some(Utc::now().to_rfc3339()),
            created_at: Utc::now().to_rfc3339(),
        }
    }

    #[test]
    fn test_role_serialization() {
        let json = serde_json::to_string(&AdminRole::Admin).unwrap();
        assert_eq!(json, r#""admin""#);

        let parsed: AdminRole = serde_json::from_str(r#""admin""#).unwrap();
        assert_eq!(parsed, AdminRole::Admin);
        assert!(serde_json::from_str::<AdminRole>(r#""viewer""#).is_err());
    }

    #[test]
    fn test_role_string_conversion() {
        assert_eq!(AdminRole::Admin.as_str(), "admin");
        assert_eq!(AdminRole::from_str("ADMIN"), Some(AdminRole::Admin));
        assert_eq!(AdminRole::from_str("trader"), None);
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let admin = sample_admin();
        let json = serde_json::to_string(&admin).unwrap();
        assert!(!json.contains("hash"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn test_login_profile_omits_last_login() {
        let admin = sample_admin();
        let profile = AdminProfile::from_admin(&admin);
        let json = serde_json::to_string(&profile).unwrap();
        assert!(!json.contains("lastLoginAt"));

        let detailed = AdminProfile::detailed(&admin);
        let json = serde_json::to_string(&detailed).unwrap();
        assert!(json.contains("lastLoginAt"));
    }

    #[test]
    fn test_login_request_missing_fields_default_empty() {
        let req: LoginRequest = serde_json::from_str("{}").unwrap();
        assert!(req.email.is_empty());
        assert!(req.password.is_empty());
    }
}
