mod migration;
mod sql;

use async_trait::async_trait;
use folio_error::{init::InitContextError, storage::StorageError, FolioResult};
use folio_models::{settings::Settings, DbManager};
use sea_orm::DatabaseConnection;
use sql::sqlite;
use std::sync::Arc;
use tracing::{info, instrument};

pub use migration::{Migrator, MigratorTrait};

/// Global database manager struct
pub struct FolioDbManager {
    db_conn: Option<DatabaseConnection>,
}

impl FolioDbManager {
    /// Wrap an already-open connection, e.g. an in-memory database in tests.
    pub fn from_connection(db_conn: DatabaseConnection) -> Self {
        Self {
            db_conn: Some(db_conn),
        }
    }
}

#[async_trait]
impl DbManager for FolioDbManager {
    #[inline]
    #[instrument(name = "init-db-manager", skip_all)]
    async fn init(settings: &Settings) -> FolioResult<Arc<Self>, InitContextError> {
        let db_conn = {
            let db = sqlite::init_db(&settings.db.sqlite).await.map_err(|e| {
                InitContextError::Primitive(format!("Failed to init SQLite database: {e}"))
            })?;

            Migrator::up(&db, None).await.map_err(|e| {
                InitContextError::Primitive(format!("Failed to migrate SQLite database: {e}"))
            })?;

            db
        };

        info!("Database manager initialized successfully");
        Ok(Arc::new(FolioDbManager::from_connection(db_conn)))
    }

    #[inline]
    fn get_connection(&self) -> FolioResult<DatabaseConnection, StorageError> {
        self.db_conn
            .as_ref()
            .ok_or(StorageError::StorageUnavailable)
            .cloned()
    }

    #[inline]
    #[instrument(name = "db_close", skip_all)]
    async fn close(&self) -> FolioResult<()> {
        info!("Closing database connections...");
        if let Some(db) = &self.db_conn {
            db.clone().close().await?;
        }
        info!("Database connections closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_models::entities::prelude::{SiteConfig, User};
    use sea_orm::{ConnectOptions, Database, EntityTrait, PaginatorTrait};

    async fn memory_db() -> DatabaseConnection {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1);
        Database::connect(opts).await.unwrap()
    }

    #[tokio::test]
    async fn migration_creates_schema_and_seeds_singleton_config() {
        let db = memory_db().await;
        Migrator::up(&db, None).await.unwrap();

        let configs = SiteConfig::find().all(&db).await.unwrap();
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].id, 1);
        assert!(!configs[0].maintenance_mode);
        assert_eq!(User::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn migration_round_trips() {
        let db = memory_db().await;
        Migrator::up(&db, None).await.unwrap();
        Migrator::down(&db, None).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        assert_eq!(SiteConfig::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn manager_hands_out_its_connection() {
        let manager = FolioDbManager::from_connection(memory_db().await);
        assert!(manager.get_connection().is_ok());
        manager.close().await.unwrap();
    }
}
