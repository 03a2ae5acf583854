//! SeaORM queries for every persisted entity.
//!
//! Repositories are stateless; each call takes the connection (or transaction)
//! it should run on.

pub mod blog_comment;
pub mod blog_post;
pub mod maintenance;
pub mod portfolio;
pub mod service;
pub mod site_config;
pub mod technology;
pub mod testimonial;
pub mod user;

pub use blog_comment::BlogCommentRepository;
pub use blog_post::BlogPostRepository;
pub use maintenance::SiteMaintenanceSource;
pub use portfolio::PortfolioRepository;
pub use service::ServiceRepository;
pub use site_config::SiteConfigRepository;
pub use technology::TechnologyRepository;
pub use testimonial::TestimonialRepository;
pub use user::UserRepository;

use folio_error::StorageResult;
use folio_models::{
    domain::prelude::{PageParams, PageResult, StatusStats},
    enums::common::PublicationStatus,
};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, FromQueryResult, PaginatorTrait,
    QuerySelect, Select,
};

#[derive(Debug, FromQueryResult)]
struct PublicationCount {
    status: PublicationStatus,
    count: i64,
}

/// Counts rows of `E` per publication status, ignoring any list filter.
pub(crate) async fn publication_stats<E, C>(column: E::Column, db: &C) -> StorageResult<StatusStats>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let rows = E::find()
        .select_only()
        .column(column)
        .column_as(column.count(), "count")
        .group_by(column)
        .into_model::<PublicationCount>()
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .fold(StatusStats::default(), |mut stats, row| {
            stats.record(row.status, row.count as u64);
            stats
        }))
}

/// Runs `select` as one page of `params`.
pub(crate) async fn fetch_page<E, C>(
    select: Select<E>,
    params: &PageParams,
    db: &C,
) -> StorageResult<PageResult<E::Model>>
where
    E: EntityTrait,
    E::Model: Send + Sync,
    C: ConnectionTrait,
{
    let (page, page_size) = (params.page(), params.page_size());
    let total = select.clone().count(db).await?;
    let records = select
        .paginate(db, page_size as u64)
        .fetch_page((page - 1) as u64)
        .await?;

    Ok(PageResult::new(records, total, page, page_size))
}

/// `LIKE %term%` over any of `columns`.
pub(crate) fn search_condition<T: ColumnTrait>(term: &str, columns: &[T]) -> Condition {
    columns
        .iter()
        .fold(Condition::any(), |cond, col| cond.add(col.contains(term)))
}
