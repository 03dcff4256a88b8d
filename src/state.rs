use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::jwt::JwtKeys;
use crate::config::AppConfig;
use crate::db;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub keys: JwtKeys,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let db = db::connect(&config.database_url).await?;
        Ok(Self::from_parts(db, Arc::new(config)))
    }

    /// State backed by a throwaway in-memory store.
    pub async fn in_memory(config: AppConfig) -> anyhow::Result<Self> {
        let db = db::connect_in_memory().await?;
        Ok(Self::from_parts(db, Arc::new(config)))
    }

    pub fn from_parts(db: SqlitePool, config: Arc<AppConfig>) -> Self {
        let keys = JwtKeys::from_config(&config.jwt);
        Self { db, config, keys }
    }
}
