use super::user::User;
use crate::{
    enums::common::PublicationStatus,
    initializer::{FolioInitializer, InitContext},
};
use folio_macros::UnseedableInitializer;
use sea_orm::{DatabaseBackend, DeriveIden};
use sea_orm_migration::{prelude::*, schema::pk_auto};

#[derive(DeriveIden, UnseedableInitializer)]
#[unseedable(meta(
    order = super::INIT_BLOG_POST_ORDER,
    create_table = create_blog_post_table,
    create_indexes = create_blog_post_indexes
))]
pub enum BlogPost {
    Table,
    Id,
    Title,
    Slug,
    Excerpt,
    Content,
    CoverImage,
    Tags,
    AuthorId,
    Status,
    PublishedAt,
    CreatedAt,
    UpdatedAt,
}

fn create_blog_post_table(_backend: DatabaseBackend) -> TableCreateStatement {
    Table::create()
        .table(BlogPost::Table)
        .if_not_exists()
        .col(pk_auto(BlogPost::Id))
        .col(ColumnDef::new(BlogPost::Title).string_len(200).not_null())
        .col(ColumnDef::new(BlogPost::Slug).string_len(200).not_null())
        .col(ColumnDef::new(BlogPost::Excerpt).string_len(500).not_null())
        .col(ColumnDef::new(BlogPost::Content).text().not_null())
        .col(ColumnDef::new(BlogPost::CoverImage).string_len(500))
        .col(
            ColumnDef::new(BlogPost::Tags)
                .json()
                .not_null()
                .default("[]"),
        )
        .col(ColumnDef::new(BlogPost::AuthorId).integer())
        .col(
            ColumnDef::new(BlogPost::Status)
                .string_len(16)
                .not_null()
                .default(PublicationStatus::Draft),
        )
        .col(
            ColumnDef::new(BlogPost::PublishedAt)
                .timestamp()
                .comment("first transition to PUBLISHED"),
        )
        .col(
            ColumnDef::new(BlogPost::CreatedAt)
                .timestamp()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(BlogPost::UpdatedAt)
                .timestamp()
                .default(Expr::current_timestamp()),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_blog_post_author")
                .from(BlogPost::Table, BlogPost::AuthorId)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::SetNull),
        )
        .to_owned()
}

fn create_blog_post_indexes(_: DatabaseBackend) -> Option<Vec<IndexCreateStatement>> {
    Some(vec![
        Index::create()
            .name("ux_blog_post_slug")
            .table(BlogPost::Table)
            .col(BlogPost::Slug)
            .unique()
            .to_owned(),
        Index::create()
            .name("idx_blog_post_status_published_at")
            .table(BlogPost::Table)
            .col(BlogPost::Status)
            .col(BlogPost::PublishedAt)
            .to_owned(),
    ])
}
