use crate::{fetch_page, publication_stats, search_condition};
use folio_error::{storage::StorageError, StorageResult};
use folio_models::{
    domain::prelude::{
        search_term, PageWithStats, StatusStats, TechnologyPageParams, UpdateTechnology,
    },
    entities::prelude::{Technology, TechnologyActiveModel, TechnologyColumn, TechnologyModel},
    enums::common::{EntityType, PublicationStatus},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, Order,
    QueryFilter, QueryOrder, QueryTrait, Set,
};
use tracing::instrument;

// Both `name` and `slug` are unique.
const CONFLICT: &str = "technology name or slug";

pub struct TechnologyRepository;

impl TechnologyRepository {
    #[instrument(name = "technology-create", skip_all)]
    pub async fn create<C>(
        technology: TechnologyActiveModel,
        db: &C,
    ) -> StorageResult<TechnologyModel>
    where
        C: ConnectionTrait,
    {
        technology
            .insert(db)
            .await
            .map_err(|e| StorageError::from_db(e, CONFLICT))
    }

    #[instrument(name = "technology-update", skip_all, fields(id = changes.id))]
    pub async fn update<C>(changes: UpdateTechnology, db: &C) -> StorageResult<TechnologyModel>
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
    ) -> StorageResult<TechnologyModel>
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
        let res = Technology::delete_by_id(id).exec(db).await?;
        if res.rows_affected == 0 {
            return Err(StorageError::EntityNotFound(
                EntityType::Technology.to_string(),
            ));
        }
        Ok(())
    }

    pub async fn find_by_id<C>(id: i32, db: &C) -> StorageResult<Option<TechnologyModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Technology::find_by_id(id).one(db).await?)
    }

    pub async fn page<C>(
        params: &TechnologyPageParams,
        db: &C,
    ) -> StorageResult<PageWithStats<TechnologyModel, StatusStats>>
    where
        C: ConnectionTrait,
    {
        let query = Technology::find()
            .apply_if(search_term(&params.search), |q, term| {
                q.filter(search_condition(
                    &term,
                    &[TechnologyColumn::Name, TechnologyColumn::Category],
                ))
            })
            .apply_if(params.status, |q, status| {
                q.filter(TechnologyColumn::Status.eq(status))
            })
            .apply_if(search_term(&params.category), |q, category| {
                q.filter(TechnologyColumn::Category.eq(category))
            })
            .order_by(TechnologyColumn::Category, Order::Asc)
            .order_by(TechnologyColumn::SortOrder, Order::Asc)
            .order_by(TechnologyColumn::Name, Order::Asc);

        Ok(PageWithStats {
            page: fetch_page(query, &params.page, db).await?,
            stats: publication_stats::<Technology, _>(TechnologyColumn::Status, db).await?,
        })
    }

    /// Published technologies grouped by category.
    pub async fn find_published<C>(db: &C) -> StorageResult<Vec<TechnologyModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Technology::find()
            .filter(TechnologyColumn::Status.eq(PublicationStatus::Published))
            .order_by_asc(TechnologyColumn::Category)
            .order_by_asc(TechnologyColumn::SortOrder)
            .order_by_asc(TechnologyColumn::Name)
            .all(db)
            .await?)
    }

    async fn require<C>(id: i32, db: &C) -> StorageResult<TechnologyModel>
    where
        C: ConnectionTrait,
    {
        Self::find_by_id(id, db)
            .await?
            .ok_or_else(|| StorageError::EntityNotFound(EntityType::Technology.to_string()))
    }
}
