use crate::{
    enums::common::UserRole,
    initializer::{FolioInitializer, InitContext},
};
use folio_macros::UnseedableInitializer;
use sea_orm::{DatabaseBackend, DeriveIden};
use sea_orm_migration::{prelude::*, schema::pk_auto};

/// Accounts are provisioned at startup from configuration, not seeded here.
#[derive(DeriveIden, UnseedableInitializer)]
#[unseedable(meta(
    order = super::INIT_USER_ORDER,
    create_table = create_user_table,
    create_indexes = create_user_indexes
))]
pub enum User {
    Table,
    Id,
    Email,
    Name,
    Password,
    Role,
    IsActive,
    LastLoginAt,
    CreatedAt,
    UpdatedAt,
}

fn create_user_table(_backend: DatabaseBackend) -> TableCreateStatement {
    Table::create()
        .table(User::Table)
        .if_not_exists()
        .col(pk_auto(User::Id))
        .col(ColumnDef::new(User::Email).string_len(255).not_null())
        .col(ColumnDef::new(User::Name).string_len(100).not_null())
        .col(
            ColumnDef::new(User::Password)
                .string_len(255)
                .not_null()
                .comment("bcrypt hash"),
        )
        .col(
            ColumnDef::new(User::Role)
                .string_len(16)
                .not_null()
                .default(UserRole::User)
                .comment("ADMIN | EDITOR | USER"),
        )
        .col(
            ColumnDef::new(User::IsActive)
                .boolean()
                .not_null()
                .default(true),
        )
        .col(ColumnDef::new(User::LastLoginAt).timestamp())
        .col(
            ColumnDef::new(User::CreatedAt)
                .timestamp()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(User::UpdatedAt)
                .timestamp()
                .default(Expr::current_timestamp()),
        )
        .to_owned()
}

fn create_user_indexes(_: DatabaseBackend) -> Option<Vec<IndexCreateStatement>> {
    Some(vec![Index::create()
        .name("ux_user_email")
        .table(User::Table)
        .col(User::Email)
        .unique()
        .to_owned()])
}
