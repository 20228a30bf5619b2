//! Admin credential storage backed by SQLite.

use crate::auth::models::{AdminRole, AdminUser};
use crate::models::is_email_shaped;
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, Row};
use tracing::info;
use uuid::Uuid;

/// Credential store. Opens a connection per operation, which is cheap for
/// SQLite and keeps the store `Send + Sync` without pooling.
pub struct AdminStore {
    db_path: String,
}

impl AdminStore {
    /// Create the store and initialize its schema.
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS admin_users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                name TEXT NOT NULL,
                role TEXT NOT NULL,
                last_login_at TEXT,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    /// Look up by email, including the password hash. This is the only
    /// read that surfaces the hash; it backs login and bootstrap.
    pub fn get_by_email(&self, email: &str) -> Result<Option<AdminUser>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, email, password_hash, name, role, last_login_at, created_at
             FROM admin_users WHERE email = ?1",
        )?;

        let result = stmt.query_row(params![email.trim().to_lowercase()], Self::row_to_admin);

        match result {
            Ok(admin) => Ok(Some(admin)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Look up by id with the hash projected out. Token resolution never
    /// needs the hash, so it never leaves the row here.
    pub fn get_by_id(&self, id: &Uuid) -> Result<Option<AdminUser>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, email, name, role, last_login_at, created_at
             FROM admin_users WHERE id = ?1",
        )?;

        let result = stmt.query_row(params![id.to_string()], |row| {
            let role_str: String = row.get(3)?;
            Ok(AdminUser {
                id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap(),
                email: row.get(1)?,
                password_hash: String::new(),
                name: row.get(2)?,
                role: AdminRole::from_str(&role_str).unwrap_or(AdminRole::Admin),
                last_login_at: row.get(4)?,
                created_at: row.get(5)?,
            })
        });

        match result {
            Ok(admin) => Ok(Some(admin)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Create a new admin credential from an already-hashed password.
    pub fn create(&self, email: &str, password_hash: &str, name: &str) -> Result<AdminUser> {
        let email = email.trim().to_lowercase();
        if !is_email_shaped(&email) {
            anyhow::bail!("Invalid admin email: {}", email);
        }

        let admin = AdminUser {
            id: Uuid::new_v4(),
            email,
            password_hash: password_hash.to_string(),
            name: name.trim().to_string(),
            role: AdminRole::Admin,
            last_login_at: None,
            created_at: Utc::now().to_rfc3339(),
        };

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO admin_users (id, email, password_hash, name, role, last_login_at, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                admin.id.to_string(),
                admin.email,
                admin.password_hash,
                admin.name,
                admin.role.as_str(),
                admin.last_login_at,
                admin.created_at,
            ],
        )
        .context("Failed to insert admin user")?;

        info!("✅ Created admin user: {}", admin.email);

        Ok(admin)
    }

    /// Replace the stored hash, used when configuration rotates the
    /// admin password.
    pub fn update_password_hash(&self, id: &Uuid, password_hash: &str) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        let rows = conn.execute(
            "UPDATE admin_users SET password_hash = ?1 WHERE id = ?2",
            params![password_hash, id.to_string()],
        )?;

        if rows == 0 {
            anyhow::bail!("Admin user not found");
        }

        Ok(())
    }

    /// Record a successful login. Callers treat failure as non-fatal.
    pub fn touch_last_login(&self, id: &Uuid) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "UPDATE admin_users SET last_login_at = ?1 WHERE id = ?2",
            params![Utc::now().to_rfc3339(), id.to_string()],
        )?;

        Ok(())
    }

    /// Number of stored credentials. Only tests and diagnostics care.
    pub fn count(&self) -> Result<i64> {
        let conn = Connection::open(&self.db_path)?;
        let count =
            conn.query_row("SELECT COUNT(*) FROM admin_users", [], |row| row.get(0))?;
        Ok(count)
    }

    fn row_to_admin(row: &Row) -> rusqlite::Result<AdminUser> {
        let role_str: String = row.get(4)?;
        Ok(AdminUser {
            id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap(),
            email: row.get(1)?,
            password_hash: row.get(2)?,
            name: row.get(3)?,
            role: AdminRole::from_str(&role_str).unwrap_or(AdminRole::Admin),
            last_login_at: row.get(5)?,
            created_at: row.get(6)?,
        })
    }
}
