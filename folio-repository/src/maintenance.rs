use crate::{SiteConfigRepository, UserRepository};
use async_trait::async_trait;
use folio_error::FolioResult;
use folio_models::{entities::prelude::UserModel, maintenance::MaintenanceSource};
use sea_orm::DatabaseConnection;

/// Maintenance flag and user lookups backed by the site database.
#[derive(Clone)]
pub struct SiteMaintenanceSource {
    db: DatabaseConnection,
}

impl SiteMaintenanceSource {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MaintenanceSource for SiteMaintenanceSource {
    async fn maintenance_mode(&self) -> FolioResult<bool> {
        Ok(SiteConfigRepository::maintenance_mode(&self.db).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> FolioResult<Option<UserModel>> {
        Ok(UserRepository::find_by_email(email, &self.db).await?)
    }
}
