use super::blog_post::BlogPost;
use crate::initializer::{FolioInitializer, InitContext};
use folio_macros::UnseedableInitializer;
use sea_orm::{DatabaseBackend, DeriveIden};
use sea_orm_migration::{prelude::*, schema::pk_auto};

#[derive(DeriveIden, UnseedableInitializer)]
#[unseedable(meta(
    order = super::INIT_BLOG_COMMENT_ORDER,
    create_table = create_blog_comment_table,
    create_indexes = create_blog_comment_indexes
))]
pub enum BlogComment {
    Table,
    Id,
    PostId,
    AuthorName,
    AuthorEmail,
    Content,
    Rating,
    IsApproved,
    CreatedAt,
    UpdatedAt,
}

fn create_blog_comment_table(_backend: DatabaseBackend) -> TableCreateStatement {
    Table::create()
        .table(BlogComment::Table)
        .if_not_exists()
        .col(pk_auto(BlogComment::Id))
        .col(ColumnDef::new(BlogComment::PostId).integer().not_null())
        .col(
            ColumnDef::new(BlogComment::AuthorName)
                .string_len(100)
                .not_null(),
        )
        .col(
            ColumnDef::new(BlogComment::AuthorEmail)
                .string_len(255)
                .not_null(),
        )
        .col(ColumnDef::new(BlogComment::Content).text().not_null())
        .col(
            ColumnDef::new(BlogComment::Rating)
                .small_integer()
                .not_null()
                .check(Expr::col(BlogComment::Rating).between(1, 5)),
        )
        .col(
            ColumnDef::new(BlogComment::IsApproved)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(
            ColumnDef::new(BlogComment::CreatedAt)
                .timestamp()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(BlogComment::UpdatedAt)
                .timestamp()
                .default(Expr::current_timestamp()),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_blog_comment_post")
                .from(BlogComment::Table, BlogComment::PostId)
                .to(BlogPost::Table, BlogPost::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn create_blog_comment_indexes(_: DatabaseBackend) -> Option<Vec<IndexCreateStatement>> {
    Some(vec![Index::create()
        .name("idx_blog_comment_post_approved")
        .table(BlogComment::Table)
        .col(BlogComment::PostId)
        .col(BlogComment::IsApproved)
        .to_owned()])
}
