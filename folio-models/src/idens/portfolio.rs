use crate::{
    enums::common::PublicationStatus,
    initializer::{FolioInitializer, InitContext},
};
use folio_macros::UnseedableInitializer;
use sea_orm::{DatabaseBackend, DeriveIden};
use sea_orm_migration::{prelude::*, schema::pk_auto};

#[derive(DeriveIden, UnseedableInitializer)]
#[unseedable(meta(
    order = super::INIT_PORTFOLIO_ORDER,
    create_table = create_portfolio_table,
    create_indexes = create_portfolio_indexes
))]
pub enum Portfolio {
    Table,
    Id,
    Title,
    Slug,
    Client,
    Category,
    Summary,
    Content,
    CoverImage,
    ProjectUrl,
    Tags,
    Featured,
    SortOrder,
    Status,
    CompletedAt,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

fn create_portfolio_table(_backend: DatabaseBackend) -> TableCreateStatement {
    Table::create()
        .table(Portfolio::Table)
        .if_not_exists()
        .col(pk_auto(Portfolio::Id))
        .col(ColumnDef::new(Portfolio::Title).string_len(200).not_null())
        .col(ColumnDef::new(Portfolio::Slug).string_len(200).not_null())
        .col(ColumnDef::new(Portfolio::Client).string_len(200))
        .col(ColumnDef::new(Portfolio::Category).string_len(100).not_null())
        .col(ColumnDef::new(Portfolio::Summary).string_len(500).not_null())
        .col(ColumnDef::new(Portfolio::Content).text())
        .col(ColumnDef::new(Portfolio::CoverImage).string_len(500))
        .col(ColumnDef::new(Portfolio::ProjectUrl).string_len(500))
        .col(
            ColumnDef::new(Portfolio::Tags)
                .json()
                .not_null()
                .default("[]"),
        )
        .col(
            ColumnDef::new(Portfolio::Featured)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(
            ColumnDef::new(Portfolio::SortOrder)
                .integer()
                .not_null()
                .default(0),
        )
        .col(
            ColumnDef::new(Portfolio::Status)
                .string_len(16)
                .not_null()
                .default(PublicationStatus::Draft),
        )
        .col(ColumnDef::new(Portfolio::CompletedAt).date())
        .col(ColumnDef::new(Portfolio::CreatedBy).integer())
        .col(
            ColumnDef::new(Portfolio::CreatedAt)
                .timestamp()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(Portfolio::UpdatedAt)
                .timestamp()
                .default(Expr::current_timestamp()),
        )
        .to_owned()
}

fn create_portfolio_indexes(_: DatabaseBackend) -> Option<Vec<IndexCreateStatement>> {
    Some(vec![
        Index::create()
            .name("ux_portfolio_slug")
            .table(Portfolio::Table)
            .col(Portfolio::Slug)
            .unique()
            .to_owned(),
        Index::create()
            .name("idx_portfolio_status_featured")
            .table(Portfolio::Table)
            .col(Portfolio::Status)
            .col(Portfolio::Featured)
            .to_owned(),
    ])
}
