use crate::{
    enums::common::PublicationStatus,
    initializer::{FolioInitializer, InitContext},
};
use folio_macros::UnseedableInitializer;
use sea_orm::{DatabaseBackend, DeriveIden};
use sea_orm_migration::{prelude::*, schema::pk_auto};

#[derive(DeriveIden, UnseedableInitializer)]
#[unseedable(meta(
    order = super::INIT_SERVICE_ORDER,
    create_table = create_service_table,
    create_indexes = create_service_indexes
))]
pub enum Service {
    Table,
    Id,
    Title,
    Slug,
    Summary,
    Content,
    Icon,
    Features,
    SortOrder,
    Status,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

fn create_service_table(_backend: DatabaseBackend) -> TableCreateStatement {
    Table::create()
        .table(Service::Table)
        .if_not_exists()
        .col(pk_auto(Service::Id))
        .col(ColumnDef::new(Service::Title).string_len(200).not_null())
        .col(ColumnDef::new(Service::Slug).string_len(200).not_null())
        .col(ColumnDef::new(Service::Summary).string_len(500).not_null())
        .col(ColumnDef::new(Service::Content).text())
        .col(ColumnDef::new(Service::Icon).string_len(100))
        .col(
            ColumnDef::new(Service::Features)
                .json()
                .not_null()
                .default("[]")
                .comment("JSON list of feature bullets"),
        )
        .col(
            ColumnDef::new(Service::SortOrder)
                .integer()
                .not_null()
                .default(0),
        )
        .col(
            ColumnDef::new(Service::Status)
                .string_len(16)
                .not_null()
                .default(PublicationStatus::Draft),
        )
        .col(ColumnDef::new(Service::CreatedBy).integer())
        .col(
            ColumnDef::new(Service::CreatedAt)
                .timestamp()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(Service::UpdatedAt)
                .timestamp()
                .default(Expr::current_timestamp()),
        )
        .to_owned()
}

fn create_service_indexes(_: DatabaseBackend) -> Option<Vec<IndexCreateStatement>> {
    Some(vec![
        Index::create()
            .name("ux_service_slug")
            .table(Service::Table)
            .col(Service::Slug)
            .unique()
            .to_owned(),
        Index::create()
            .name("idx_service_status")
            .table(Service::Table)
            .col(Service::Status)
            .to_owned(),
    ])
}
