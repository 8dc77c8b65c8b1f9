use axum::extract::FromRef;
use shared_types::AppError;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::sync::{Arc, OnceLock};

use crate::store::{DataStore, PgStore};

/// Shared store handle.
pub type SharedStore = Arc<dyn DataStore>;

/// Shared application state passed to Axum handlers via `State`.
/// Derives `FromRef` so handlers can extract `State<SharedStore>` directly.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub store: SharedStore,
}

/// Store used by server functions. Installed at startup; created lazily
/// from `DATABASE_URL` otherwise.
static STORE: OnceLock<SharedStore> = OnceLock::new();

/// Create a PostgreSQL pool from environment variables.
/// Uses `connect_lazy` so no connections open until the first query.
pub fn create_pool() -> Result<Pool<Postgres>, AppError> {
    // Load .env file if present (ignored in production where env vars are set directly).
    let _ = dotenvy::dotenv();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| AppError::configuration("DATABASE_URL must be set"))?;

    let max_connections: u32 = std::env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);

    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect_lazy(&database_url)
        .map_err(|e| AppError::configuration(format!("Invalid DATABASE_URL: {e}")))
}

/// Run embedded migrations against the given pool.
pub async fn run_migrations(pool: &Pool<Postgres>) -> Result<(), AppError> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| AppError::transient(format!("Failed to run database migrations: {e}")))
}

/// Make `store` the process-wide store. Returns `false` when one is
/// already installed.
pub fn install_store(store: SharedStore) -> bool {
    STORE.set(store).is_ok()
}

/// The process-wide store, creating a PostgreSQL store on first use.
pub fn get_store() -> Result<SharedStore, AppError> {
    if let Some(store) = STORE.get() {
        return Ok(store.clone());
    }
    let store: SharedStore = Arc::new(PgStore::new(create_pool()?));
    Ok(STORE.get_or_init(|| store).clone())
}
