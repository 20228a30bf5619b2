//! Startup task that guarantees the configured admin credential exists.

use crate::auth::{password, store::AdminStore};
use crate::models::Config;
use std::sync::Arc;
use tracing::{error, info};

/// Ensure the configured admin record exists and can be logged into with
/// the configured password. Configuration wins over the stored hash, so a
/// password changed between deploys is rotated here.
///
/// Idempotent: running twice with the same configuration leaves the
/// record untouched.
pub fn ensure_admin(store: &AdminStore, config: &Config) -> anyhow::Result<()> {
    info!("🔍 Checking for admin user...");

    match store.get_by_email(&config.admin_email)? {
        None => {
            let hash = password::hash_password(&config.admin_password)?;
            let admin = store.create(&config.admin_email, &hash, &config.admin_name)?;
            info!("✅ Admin user created: {}", admin.email);
        }
        Some(admin) => {
            if password::verify_password(&config.admin_password, &admin.password_hash) {
                info!("ℹ️  Admin user already exists");
            } else {
                info!("ℹ️  Updating admin password to match configuration");
                let hash = password::hash_password(&config.admin_password)?;
                store.update_password_hash(&admin.id, &hash)?;
                info!("✅ Admin password updated");
            }
        }
    }

    Ok(())
}

/// Fire-and-forget wrapper for server startup. Bootstrap failure is
/// logged and swallowed; public routes are served either way.
pub fn spawn(store: Arc<AdminStore>, config: Config) {
    tokio::spawn(async move {
        if let Err(e) = ensure_admin(&store, &config) {
            error!("❌ Admin bootstrap failed: {:#}", e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn test_config(email: &str, password: &str) -> Config {
        Config {
            database_path: String::new(),
            port: 0,
            client_url: None,
            jwt_secret: "s".to_string(),
            jwt_expire: "1d".to_string(),
            admin_email: email.to_string(),
            admin_password: password.to_string(),
            admin_name: "Test Admin".to_string(),
        }
    }

    fn create_test_store() -> (AdminStore, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let store = AdminStore::new(temp_file.path().to_str().unwrap()).unwrap();
        (store, temp_file)
    }

    #[test]
    fn test_bootstrap_creates_single_admin() {
        let (store, _temp) = create_test_store();
        let config = test_config("a@x.com", "P1-password");

        ensure_admin(&store, &config).unwrap();
        assert_eq!(store.count().unwrap(), 1);

        let admin = store.get_by_email("a@x.com").unwrap().unwrap();
        assert!(password::verify_password("P1-password", &admin.password_hash));
    }

    #[test]
    fn test_bootstrap_is_idempotent() {
        let (store, _temp) = create_test_store();
        let config = test_config("a@x.com", "P1-password");

        ensure_admin(&store, &config).unwrap();
        let first = store.get_by_email("a@x.com").unwrap().unwrap();

        ensure_admin(&store, &config).unwrap();
        assert_eq!(store.count().unwrap(), 1);

        let second = store.get_by_email("a@x.com").unwrap().unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.password_hash, second.password_hash);
    }

    #[test]
    fn test_bootstrap_rotates_changed_password() {
        let (store, _temp) = create_test_store();

        ensure_admin(&store, &test_config("a@x.com", "P1-password")).unwrap();
        ensure_admin(&store, &test_config("a@x.com", "P2-password")).unwrap();

        assert_eq!(store.count().unwrap(), 1);
        let admin = store.get_by_email("a@x.com").unwrap().unwrap();
        assert!(password::verify_password("P2-password", &admin.password_hash));
        assert!(!password::verify_password("P1-password", &admin.password_hash));
    }

    #[test]
    fn test_bootstrap_surfaces_bad_email_as_error() {
        let (store, _temp) = create_test_store();
        let config = test_config("not-an-email", "P1-password");

        // The caller logs and swallows this; it must not create a record.
        assert!(ensure_admin(&store, &config).is_err());
        assert_eq!(store.count().unwrap(), 0);
    }
}
