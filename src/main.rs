//! Portfolio backend server.
//!
//! Single-admin content API: JWT-protected project and skill management
//! with public read-only routes and a contact form.

use anyhow::{Context, Result};
use portfolio_backend::{
    auth::{bootstrap, AdminStore, AuthState, JwtHandler},
    content::{ContentState, ContentStore},
    models::Config,
    routes,
};
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    load_env();
    init_tracing();

    let config = Config::from_env();

    info!("🚀 Portfolio backend starting");

    let admin_store = Arc::new(
        AdminStore::new(&config.database_path).context("Failed to open admin store")?,
    );
    let content_store = Arc::new(
        ContentStore::new(&config.database_path).context("Failed to open content store")?,
    );
    let jwt_handler = Arc::new(JwtHandler::new(
        config.jwt_secret.clone(),
        &config.jwt_expire,
    ));

    info!("📊 Database initialized at: {}", config.database_path);

    let auth_state = AuthState::new(admin_store.clone(), jwt_handler);

    // Best-effort seed of the admin credential; public routes are served
    // even if this fails.
    bootstrap::spawn(admin_store, config.clone());

    let app = routes::create_router(auth_state, ContentState::new(content_store), &config);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("🎯 API server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Initialize tracing with env-filter overrides.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portfolio_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_env() {
    // Standard dotenv search (cwd + parents), then the crate directory so
    // running from elsewhere still picks up the local .env.
    let _ = dotenv::dotenv();

    let manifest_env = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
    if manifest_env.exists() {
        let _ = dotenv::from_path(&manifest_env);
    }
}
