use crate::{fetch_page, publication_stats, search_condition};
use folio_error::{storage::StorageError, StorageResult};
use folio_models::{
    domain::prelude::{search_term, PageWithStats, ServicePageParams, StatusStats, UpdateService},
    entities::prelude::{Service, ServiceActiveModel, ServiceColumn, ServiceModel},
    enums::common::{EntityType, PublicationStatus},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, Order,
    QueryFilter, QueryOrder, QueryTrait, Set,
};
use tracing::instrument;

const CONFLICT: &str = "service slug";

pub struct ServiceRepository;

impl ServiceRepository {
    #[instrument(name = "service-create", skip_all)]
    pub async fn create<C>(service: ServiceActiveModel, db: &C) -> StorageResult<ServiceModel>
    where
        C: ConnectionTrait,
    {
        service
            .insert(db)
            .await
            .map_err(|e| StorageError::from_db(e, CONFLICT))
    }

    #[instrument(name = "service-update", skip_all, fields(id = changes.id))]
    pub async fn update<C>(changes: UpdateService, db: &C) -> StorageResult<ServiceModel>
    where
        C: ConnectionTrait,
    {
        let current = Self::require(changes.id, db).await?;
        let mut active = current.clone().into_active_model();
        changes.apply(&mut active);
        if !active.is_changed() {
            return Ok(current);
        }
        active
            .update(db)
            .await
            .map_err(|e| StorageError::from_db(e, CONFLICT))
    }

    pub async fn change_status<C>(
        id: i32,
        status: PublicationStatus,
        db: &C,
    ) -> StorageResult<ServiceModel>
    where
        C: ConnectionTrait,
    {
        let mut active = Self::require(id, db).await?.into_active_model();
        active.status = Set(status);
        Ok(active.update(db).await?)
    }

    pub async fn delete<C>(id: i32, db: &C) -> StorageResult<()>
    where
        C: ConnectionTrait,
    {
        let res = Service::delete_by_id(id).exec(db).await?;
        if res.rows_affected == 0 {
            return Err(StorageError::EntityNotFound(EntityType::Service.to_string()));
        }
        Ok(())
    }

    pub async fn find_by_id<C>(id: i32, db: &C) -> StorageResult<Option<ServiceModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Service::find_by_id(id).one(db).await?)
    }

    pub async fn page<C>(
        params: &ServicePageParams,
        db: &C,
    ) -> StorageResult<PageWithStats<ServiceModel, StatusStats>>
    where
        C: ConnectionTrait,
    {
        let query = Service::find()
            .apply_if(search_term(&params.search), |q, term| {
                q.filter(search_condition(
                    &term,
                    &[
                        ServiceColumn::Title,
                        ServiceColumn::Slug,
                        ServiceColumn::Summary,
                    ],
                ))
            })
            .apply_if(params.status, |q, status| {
                q.filter(ServiceColumn::Status.eq(status))
            })
            .order_by(ServiceColumn::SortOrder, Order::Asc)
            .order_by(ServiceColumn::Id, Order::Asc);

        Ok(PageWithStats {
            page: fetch_page(query, &params.page, db).await?,
            stats: publication_stats::<Service, _>(ServiceColumn::Status, db).await?,
        })
    }

    /// Published services in display order.
    pub async fn find_published<C>(db: &C) -> StorageResult<Vec<ServiceModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Service::find()
            .filter(ServiceColumn::Status.eq(PublicationStatus::Published))
            .order_by_asc(ServiceColumn::SortOrder)
            .order_by_asc(ServiceColumn::Title)
            .all(db)
            .await?)
    }

    async fn require<C>(id: i32, db: &C) -> StorageResult<ServiceModel>
    where
        C: ConnectionTrait,
    {
        Self::find_by_id(id, db)
            .await?
            .ok_or_else(|| StorageError::EntityNotFound(EntityType::Service.to_string()))
    }
}
