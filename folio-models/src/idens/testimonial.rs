use crate::{
    enums::common::{PublicationStatus, TestimonialStatus},
    initializer::{FolioInitializer, InitContext},
};
use folio_macros::UnseedableInitializer;
use sea_orm::{DatabaseBackend, DeriveIden};
use sea_orm_migration::{prelude::*, schema::pk_auto};

#[derive(DeriveIden, UnseedableInitializer)]
#[unseedable(meta(
    order = super::INIT_TESTIMONIAL_ORDER,
    create_table = create_testimonial_table,
    create_indexes = create_testimonial_indexes
))]
pub enum Testimonial {
    Table,
    Id,
    ClientName,
    ClientEmail,
    ClientCompany,
    ClientPosition,
    Content,
    Rating,
    Token,
    Status,
    PublicationStatus,
    ReminderCount,
    LastReminderAt,
    SubmittedAt,
    ApprovedAt,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

fn create_testimonial_table(_backend: DatabaseBackend) -> TableCreateStatement {
    Table::create()
        .table(Testimonial::Table)
        .if_not_exists()
        .col(pk_auto(Testimonial::Id))
        .col(
            ColumnDef::new(Testimonial::ClientName)
                .string_len(100)
                .not_null(),
        )
        .col(
            ColumnDef::new(Testimonial::ClientEmail)
                .string_len(255)
                .not_null(),
        )
        .col(ColumnDef::new(Testimonial::ClientCompany).string_len(100))
        .col(ColumnDef::new(Testimonial::ClientPosition).string_len(100))
        .col(
            ColumnDef::new(Testimonial::Content)
                .text()
                .not_null()
                .default(""),
        )
        .col(ColumnDef::new(Testimonial::Rating).small_integer())
        .col(
            ColumnDef::new(Testimonial::Token)
                .string_len(128)
                .not_null()
                .comment("secret of the client form link"),
        )
        .col(
            ColumnDef::new(Testimonial::Status)
                .string_len(16)
                .not_null()
                .default(TestimonialStatus::Pending),
        )
        .col(
            ColumnDef::new(Testimonial::PublicationStatus)
                .string_len(16)
                .not_null()
                .default(PublicationStatus::Draft),
        )
        .col(
            ColumnDef::new(Testimonial::ReminderCount)
                .integer()
                .not_null()
                .default(0),
        )
        .col(ColumnDef::new(Testimonial::LastReminderAt).timestamp())
        .col(ColumnDef::new(Testimonial::SubmittedAt).timestamp())
        .col(ColumnDef::new(Testimonial::ApprovedAt).timestamp())
        .col(ColumnDef::new(Testimonial::CreatedBy).integer())
        .col(
            ColumnDef::new(Testimonial::CreatedAt)
                .timestamp()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(Testimonial::UpdatedAt)
                .timestamp()
                .default(Expr::current_timestamp()),
        )
        .to_owned()
}

fn create_testimonial_indexes(_: DatabaseBackend) -> Option<Vec<IndexCreateStatement>> {
    Some(vec![
        Index::create()
            .name("ux_testimonial_token")
            .table(Testimonial::Table)
            .col(Testimonial::Token)
            .unique()
            .to_owned(),
        Index::create()
            .name("idx_testimonial_status")
            .table(Testimonial::Table)
            .col(Testimonial::Status)
            .col(Testimonial::PublicationStatus)
            .to_owned(),
    ])
}
