//! # Registrar DB
//!
//! The record store behind the Registrar API.
//!
//! - [`RecordStore`]: the operations the HTTP layer and services depend on
//! - [`PgRecordStore`]: PostgreSQL via SQLx; multi-row writes run in one transaction
//! - [`MemoryRecordStore`]: an in-process store where every operation holds one lock
//!
//! # Example
//!
//! ```ignore
//! use registrar_db::{init_db_pool, PgRecordStore, RecordStore};
//!
//! let pool = init_db_pool(&database_url).await?;
//! let store: Arc<dyn RecordStore> = Arc::new(PgRecordStore::new(pool));
//! ```

pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

pub use error::StoreError;
pub use memory::MemoryRecordStore;
pub use postgres::PgRecordStore;
pub use store::{Account, RecordStore};

pub use sqlx::PgPool;

/// Connects to PostgreSQL.
///
/// The returned pool is cheaply cloneable and should be created once at
/// startup.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Applies the migrations embedded from `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
