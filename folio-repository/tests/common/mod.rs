#![allow(dead_code)]

use folio_models::{
    entities::prelude::{UserActiveModel, UserModel},
    enums::common::UserRole,
};
use folio_repository::UserRepository;
use folio_storage::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, Set};

/// Fresh in-memory database with the full schema.
pub async fn setup_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    // One connection, otherwise every pooled connection sees its own empty database.
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub async fn insert_user(db: &DatabaseConnection, email: &str, role: UserRole) -> UserModel {
    UserRepository::create(
        UserActiveModel {
            email: Set(email.to_string()),
            name: Set("Test User".into()),
            password: Set("not-a-real-hash".into()),
            role: Set(role),
            is_active: Set(true),
            ..Default::default()
        },
        db,
    )
    .await
    .unwrap()
}
