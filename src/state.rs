use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use registrar_auth::SessionManager;
use registrar_cache::{CacheConfig, MemoryTokenStore, RedisCache, TokenStore};
use registrar_config::{CorsConfig, ServerConfig, SessionConfig, StoreBackend};
use registrar_db::{MemoryRecordStore, PgRecordStore, RecordStore, init_db_pool, run_migrations};
use tracing::{info, warn};

use crate::demo::{DEMO_ADMIN_USERNAME, DEMO_LECTURER_EMAIL, DEMO_STUDENT_CODE, seed_memory_store};

/// Everything a handler needs, passed explicitly through the router.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub sessions: SessionManager,
    pub cors_config: CorsConfig,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("sessions", &self.sessions)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        store: Arc<dyn RecordStore>,
        tokens: Arc<dyn TokenStore>,
        session_config: SessionConfig,
        cors_config: CorsConfig,
    ) -> Self {
        Self {
            store,
            sessions: SessionManager::new(tokens, session_config),
            cors_config,
        }
    }
}

pub async fn init_app_state(server_config: &ServerConfig) -> anyhow::Result<AppState> {
    let session_config = SessionConfig::from_env();
    let cors_config = CorsConfig::from_env();

    let (store, tokens): (Arc<dyn RecordStore>, Arc<dyn TokenStore>) =
        match server_config.store_backend {
            StoreBackend::Postgres => {
                let database_url =
                    std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
                let pool = tokio::time::timeout(Duration::from_secs(10), init_db_pool(&database_url))
                    .await
                    .context("timed out connecting to the database")?
                    .context("failed to connect to the database")?;
                run_migrations(&pool)
                    .await
                    .context("failed to run migrations")?;

                let cache_config = CacheConfig::from_env();
                let cache = RedisCache::new(&cache_config.redis_url)
                    .await
                    .context("failed to connect to Redis")?;

                info!("Using PostgreSQL record store and Redis session store");
                (Arc::new(PgRecordStore::new(pool)), Arc::new(cache))
            }
            StoreBackend::Memory => {
                let store = MemoryRecordStore::new();
                let demo = seed_memory_store(&store, Utc::now())
                    .await
                    .context("failed to seed the in-memory store")?;
                warn!("Using in-memory stores; all data is lost on shutdown");
                info!(
                    admin = DEMO_ADMIN_USERNAME,
                    lecturer = DEMO_LECTURER_EMAIL,
                    student = DEMO_STUDENT_CODE,
                    session_offering_id = %demo.session_offering_id,
                    "Seeded demo accounts"
                );
                (Arc::new(store), Arc::new(MemoryTokenStore::new()))
            }
        };

    Ok(AppState::new(store, tokens, session_config, cors_config))
}
