use serde::Serialize;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub port: u16,
    pub client_url: Option<String>,
    pub jwt_secret: String,
    pub jwt_expire: String,
    pub admin_email: String,
    pub admin_password: String,
    pub admin_name: String,
}

impl Config {
    pub fn from_env() -> Self {
        let database_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| "./portfolio.db".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .unwrap_or(5000);

        let client_url = std::env::var("CLIENT_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            "dev-secret-change-in-production-minimum-32-characters".to_string()
        });

        let jwt_expire = std::env::var("JWT_EXPIRE").unwrap_or_else(|_| "1d".to_string());

        let admin_email =
            std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string());

        let admin_password =
            std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "changeme-admin-123".to_string());

        let admin_name =
            std::env::var("ADMIN_NAME").unwrap_or_else(|_| "Portfolio Admin".to_string());

        Self {
            database_path,
            port,
            client_url,
            jwt_secret,
            jwt_expire,
            admin_email,
            admin_password,
            admin_name,
        }
    }
}

/// Generic success envelope for endpoints that only return a message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Lightweight email shape check: one `@`, non-empty local part, and a
/// domain containing a dot. Matches what the admin and contact inputs
/// accept; full RFC validation is deliberately not attempted.
pub fn is_email_shaped(value: &str) -> bool {
    let value = value.trim();
    if value.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && tld.len() >= 2 && !domain.contains('@')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shape_accepts_common_addresses() {
        assert!(is_email_shaped("a@x.com"));
        assert!(is_email_shaped("first.last@sub.domain.io"));
        assert!(is_email_shaped("  padded@host.org  "));
    }

    #[test]
    fn test_email_shape_rejects_malformed() {
        assert!(!is_email_shaped(""));
        assert!(!is_email_shaped("no-at-sign"));
        assert!(!is_email_shaped("@host.com"));
        assert!(!is_email_shaped("user@"));
        assert!(!is_email_shaped("user@host"));
        assert!(!is_email_shaped("user@host."));
        assert!(!is_email_shaped("two words@host.com"));
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_env();
        assert!(config.port > 0);
        assert!(!config.jwt_expire.is_empty());
        assert!(!config.admin_email.is_empty());
    }
}
