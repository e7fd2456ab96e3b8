// src/config/storage.rs
// DOCUMENTATION: Storage backend initialization
// PURPOSE: Build the storage engine selected by HBNB_TYPE_STORAGE

use crate::config::env::{STORAGE_DB, STORAGE_FILE};
use crate::config::Config;
use crate::db::{DbStorage, FileStorage, Storage};
use crate::errors::PlacesError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::sync::Arc;
use std::time::Duration;

/// Initialize the configured storage engine
/// DOCUMENTATION: Called once during application startup in main.rs
/// The returned handle is shared by every handler and the search resolver
pub async fn init_storage(config: &Config) -> Result<Arc<dyn Storage>, PlacesError> {
    match config.storage_type.as_str() {
        STORAGE_FILE => {
            log::info!("Using file storage: {}", config.storage_file);
            let storage = FileStorage::open(&config.storage_file).await?;
            Ok(Arc::new(storage))
        }
        STORAGE_DB => {
            let pool = init_db_pool(config)
                .await
                .map_err(|e| PlacesError::DatabaseError(e.to_string()))?;
            Ok(Arc::new(DbStorage::new(pool)))
        }
        other => Err(PlacesError::InvalidInput(format!(
            "Unknown storage type: {}",
            other
        ))),
    }
}

/// Initialize PostgreSQL connection pool
/// DOCUMENTATION: Creates connection pool with optimal settings
pub async fn init_db_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    log::info!("Initializing database pool: {}", config.database_url);

    let pool = PgPoolOptions::new()
        // Maximum concurrent connections
        .max_connections(config.db_max_connections)
        // Timeout waiting for connection from pool
        .acquire_timeout(Duration::from_secs(config.db_connection_timeout))
        // Connection idle timeout (5 minutes)
        .idle_timeout(Duration::from_secs(300))
        // Connection lifetime (30 minutes before recycle)
        .max_lifetime(Duration::from_secs(1800))
        .connect(&config.database_url)
        .await?;

    // Verify connection works
    sqlx::query("SELECT 1").execute(&pool).await?;

    log::info!("Database pool initialized successfully");
    Ok(pool)
}
