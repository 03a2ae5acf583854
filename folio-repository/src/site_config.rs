use folio_error::{storage::StorageError, StorageResult};
use folio_models::{
    constants::SITE_CONFIG_SINGLETON_ID,
    domain::prelude::{NewSiteConfigWithId, UpdateSiteConfig},
    entities::prelude::{SiteConfig, SiteConfigModel},
    enums::common::EntityType,
};
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, IntoActiveModel, Set};
use tracing::{info, instrument};

/// Access to the singleton configuration row (id = 1).
pub struct SiteConfigRepository;

impl SiteConfigRepository {
    pub async fn get<C>(db: &C) -> StorageResult<Option<SiteConfigModel>>
    where
        C: ConnectionTrait,
    {
        Ok(SiteConfig::find_by_id(SITE_CONFIG_SINGLETON_ID).one(db).await?)
    }

    /// Returns the singleton, inserting it with defaults when absent.
    ///
    /// Concurrent creators race on the fixed primary key; the loser re-reads the
    /// winner's row.
    #[instrument(name = "site-config-get-or-create", skip_all)]
    pub async fn get_or_create<C>(db: &C) -> StorageResult<SiteConfigModel>
    where
        C: ConnectionTrait,
    {
        if let Some(config) = Self::get(db).await? {
            return Ok(config);
        }

        match NewSiteConfigWithId::default()
            .into_active_model()
            .insert(db)
            .await
        {
            Ok(config) => {
                info!("Created default site configuration");
                Ok(config)
            }
            Err(e) => match StorageError::from_db(e, "site config") {
                StorageError::Conflict(_) => Self::get(db)
                    .await?
                    .ok_or_else(|| StorageError::EntityNotFound(EntityType::SiteConfig.to_string())),
                other => Err(other),
            },
        }
    }

    pub async fn maintenance_mode<C>(db: &C) -> StorageResult<bool>
    where
        C: ConnectionTrait,
    {
        Ok(Self::get_or_create(db).await?.maintenance_mode)
    }

    #[instrument(name = "site-config-update", skip_all)]
    pub async fn update<C>(changes: UpdateSiteConfig, db: &C) -> StorageResult<SiteConfigModel>
    where
        C: ConnectionTrait,
    {
        let current = Self::get_or_create(db).await?;
        let mut active = current.clone().into_active_model();
        changes.apply(&mut active);
        if !active.is_changed() {
            return Ok(current);
        }
        Ok(active.update(db).await?)
    }

    /// Flips the maintenance flag. A `None` message keeps the stored one.
    #[instrument(name = "site-config-maintenance", skip(message, db))]
    pub async fn set_maintenance<C>(
        enabled: bool,
        message: Option<String>,
        db: &C,
    ) -> StorageResult<SiteConfigModel>
    where
        C: ConnectionTrait,
    {
        let mut active = Self::get_or_create(db).await?.into_active_model();
        active.maintenance_mode = Set(enabled);
        if let Some(message) = message {
            active.maintenance_message = Set(Some(message).filter(|m| !m.trim().is_empty()));
        }
        let config = active.update(db).await?;
        info!(enabled, "Maintenance mode changed");
        Ok(config)
    }
}
