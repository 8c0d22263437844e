use std::sync::Arc;

use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

use crate::{auth::session::SessionStore, config::Config, db::schema, storage::AssetStore};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub sessions: SessionStore,
    pub assets: AssetStore,
}

pub type SharedAppState = Arc<AppState>;

impl AppState {
    pub async fn init(config: Config) -> Result<Self, anyhow::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(config.database.connect_options())
            .await?;

        if config.application.run_migration {
            tracing::info!("Running schema migration...");
            schema::migrate(&pool, &config.admin).await?;
        }

        let assets = AssetStore::new(&config.storage.upload_dir)?;

        Ok(AppState {
            pool,
            config,
            sessions: SessionStore::new(),
            assets,
        })
    }
}
