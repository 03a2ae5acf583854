use crate::{fetch_page, publication_stats, search_condition};
use folio_error::{storage::StorageError, StorageResult};
use folio_models::{
    domain::prelude::{
        search_term, PageWithStats, PortfolioPageParams, StatusStats, UpdatePortfolio,
    },
    entities::prelude::{Portfolio, PortfolioActiveModel, PortfolioColumn, PortfolioModel},
    enums::common::{EntityType, PublicationStatus},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, Order,
    QueryFilter, QueryOrder, QueryTrait, Set,
};
use tracing::instrument;

const CONFLICT: &str = "portfolio slug";

pub struct PortfolioRepository;

impl PortfolioRepository {
    #[instrument(name = "portfolio-create", skip_all)]
    pub async fn create<C>(item: PortfolioActiveModel, db: &C) -> StorageResult<PortfolioModel>
    where
        C: ConnectionTrait,
    {
        item.insert(db)
            .await
            .map_err(|e| StorageError::from_db(e, CONFLICT))
    }

    #[instrument(name = "portfolio-update", skip_all, fields(id = changes.id))]
    pub async fn update<C>(changes: UpdatePortfolio, db: &C) -> StorageResult<PortfolioModel>
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
    ) -> StorageResult<PortfolioModel>
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
        let res = Portfolio::delete_by_id(id).exec(db).await?;
        if res.rows_affected == 0 {
            return Err(StorageError::EntityNotFound(
                EntityType::Portfolio.to_string(),
            ));
        }
        Ok(())
    }

    pub async fn find_by_id<C>(id: i32, db: &C) -> StorageResult<Option<PortfolioModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Portfolio::find_by_id(id).one(db).await?)
    }

    pub async fn page<C>(
        params: &PortfolioPageParams,
        db: &C,
    ) -> StorageResult<PageWithStats<PortfolioModel, StatusStats>>
    where
        C: ConnectionTrait,
    {
        let query = Portfolio::find()
            .apply_if(search_term(&params.search), |q, term| {
                q.filter(search_condition(
                    &term,
                    &[
                        PortfolioColumn::Title,
                        PortfolioColumn::Client,
                        PortfolioColumn::Summary,
                        PortfolioColumn::Category,
                    ],
                ))
            })
            .apply_if(params.status, |q, status| {
                q.filter(PortfolioColumn::Status.eq(status))
            })
            .apply_if(params.featured, |q, featured| {
                q.filter(PortfolioColumn::Featured.eq(featured))
            })
            .apply_if(search_term(&params.category), |q, category| {
                q.filter(PortfolioColumn::Category.eq(category))
            })
            .order_by(PortfolioColumn::SortOrder, Order::Asc)
            .order_by(PortfolioColumn::Id, Order::Desc);

        Ok(PageWithStats {
            page: fetch_page(query, &params.page, db).await?,
            stats: publication_stats::<Portfolio, _>(PortfolioColumn::Status, db).await?,
        })
    }

    /// Published projects, optionally only the featured ones.
    pub async fn find_published<C>(
        featured: Option<bool>,
        db: &C,
    ) -> StorageResult<Vec<PortfolioModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Portfolio::find()
            .filter(PortfolioColumn::Status.eq(PublicationStatus::Published))
            .apply_if(featured, |q, featured| {
                q.filter(PortfolioColumn::Featured.eq(featured))
            })
            .order_by_asc(PortfolioColumn::SortOrder)
            .order_by_desc(PortfolioColumn::CompletedAt)
            .order_by_desc(PortfolioColumn::Id)
            .all(db)
            .await?)
    }

    async fn require<C>(id: i32, db: &C) -> StorageResult<PortfolioModel>
    where
        C: ConnectionTrait,
    {
        Self::find_by_id(id, db)
            .await?
            .ok_or_else(|| StorageError::EntityNotFound(EntityType::Portfolio.to_string()))
    }
}
