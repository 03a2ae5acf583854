use crate::{
    enums::common::PublicationStatus,
    initializer::{FolioInitializer, InitContext},
};
use folio_macros::UnseedableInitializer;
use sea_orm::{DatabaseBackend, DeriveIden};
use sea_orm_migration::{prelude::*, schema::pk_auto};

#[derive(DeriveIden, UnseedableInitializer)]
#[unseedable(meta(
    order = super::INIT_TECHNOLOGY_ORDER,
    create_table = create_technology_table,
    create_indexes = create_technology_indexes
))]
pub enum Technology {
    Table,
    Id,
    Name,
    Slug,
    Category,
    IconUrl,
    WebsiteUrl,
    Proficiency,
    SortOrder,
    Status,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

fn create_technology_table(_backend: DatabaseBackend) -> TableCreateStatement {
    Table::create()
        .table(Technology::Table)
        .if_not_exists()
        .col(pk_auto(Technology::Id))
        .col(ColumnDef::new(Technology::Name).string_len(100).not_null())
        .col(ColumnDef::new(Technology::Slug).string_len(100).not_null())
        .col(ColumnDef::new(Technology::Category).string_len(50).not_null())
        .col(ColumnDef::new(Technology::IconUrl).string_len(500))
        .col(ColumnDef::new(Technology::WebsiteUrl).string_len(500))
        .col(
            ColumnDef::new(Technology::Proficiency)
                .small_integer()
                .not_null()
                .default(0)
                .comment("0..=100"),
        )
        .col(
            ColumnDef::new(Technology::SortOrder)
                .integer()
                .not_null()
                .default(0),
        )
        .col(
            ColumnDef::new(Technology::Status)
                .string_len(16)
                .not_null()
                .default(PublicationStatus::Draft),
        )
        .col(ColumnDef::new(Technology::CreatedBy).integer())
        .col(
            ColumnDef::new(Technology::CreatedAt)
                .timestamp()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(Technology::UpdatedAt)
                .timestamp()
                .default(Expr::current_timestamp()),
        )
        .to_owned()
}

fn create_technology_indexes(_: DatabaseBackend) -> Option<Vec<IndexCreateStatement>> {
    Some(vec![
        Index::create()
            .name("ux_technology_name")
            .table(Technology::Table)
            .col(Technology::Name)
            .unique()
            .to_owned(),
        Index::create()
            .name("ux_technology_slug")
            .table(Technology::Table)
            .col(Technology::Slug)
            .unique()
            .to_owned(),
    ])
}
