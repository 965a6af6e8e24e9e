//! Infrastructure Database Layer
//!
//! PostgreSQL adapter for the entity store port. Each collection is a table
//! of JSONB documents; the adapter keeps all SQL out of the domain layer.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, DatabaseConfig, PgEntityStore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/insurance")).await?;
//! infra_db::run_migrations(&pool).await?;
//! let users: PgEntityStore<User> = PgEntityStore::new(pool);
//! ```

pub mod error;
pub mod pool;
pub mod store;

pub use pool::{create_pool, create_pool_from_url, DatabaseConfig, DatabasePool};
pub use store::PgEntityStore;

use core_kernel::StoreError;

/// Applies the embedded schema migrations.
///
/// # Errors
///
/// Returns `StoreError::Query` if a migration fails to apply
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), StoreError> {
    tracing::info!("Running database migrations");
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))
}
