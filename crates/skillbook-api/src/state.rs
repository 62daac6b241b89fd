//! Application state wiring the service to its storage.
//!
//! `SkillService` is generic over the session provider; AppState pins it to
//! the SQLite implementation. The provider is handed in explicitly, so tests
//! build an AppState over a throwaway database instead of overriding anything
//! global.

use std::sync::Arc;

use skillbook_core::service::skill::SkillService;
use skillbook_infra::sqlite::pool::DatabasePool;
use skillbook_infra::sqlite::session::SqliteSessionProvider;
use skillbook_types::config::{PaginationConfig, ServiceConfig};

/// Concrete service type pinned to the SQLite session provider.
pub type ConcreteSkillService = SkillService<SqliteSessionProvider>;

/// Shared application state, used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub skill_service: Arc<ConcreteSkillService>,
    pub pagination: PaginationConfig,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Connect to the configured database and wire the service.
    pub async fn init(config: &ServiceConfig) -> anyhow::Result<Self> {
        let db_pool = DatabasePool::new(&config.database_url).await?;
        tracing::info!(url = %config.database_url, "database ready");
        Ok(Self::from_pool(db_pool, config.pagination.clone()))
    }

    /// Wire the service over an already opened pool.
    pub fn from_pool(db_pool: DatabasePool, pagination: PaginationConfig) -> Self {
        let provider = SqliteSessionProvider::new(db_pool.clone());
        Self {
            skill_service: Arc::new(SkillService::new(provider)),
            pagination,
            db_pool,
        }
    }
}
