mod common;

use common::{insert_user, setup_db};
use folio_models::{
    domain::prelude::UserPageParams, entities::prelude::UserActiveModel, enums::common::UserRole,
    maintenance::MaintenanceSource,
};
use folio_repository::{SiteMaintenanceSource, UserRepository};
use sea_orm::Set;

#[tokio::test]
async fn email_is_unique_and_lookup_ignores_case() {
    let db = setup_db().await;
    insert_user(&db, "admin@example.com", UserRole::Admin).await;

    let duplicate = UserActiveModel {
        email: Set("admin@example.com".into()),
        name: Set("Other".into()),
        password: Set("x".into()),
        role: Set(UserRole::User),
        is_active: Set(true),
        ..Default::default()
    };
    let err = UserRepository::create(duplicate, &db).await.unwrap_err();
    assert_eq!(err.to_string(), "user email already exists");

    let found = UserRepository::find_by_email(" Admin@Example.COM ", &db)
        .await
        .unwrap();
    assert!(found.is_some());

    let source = SiteMaintenanceSource::new(db.clone());
    assert!(source
        .find_user_by_email("admin@example.com")
        .await
        .unwrap()
        .unwrap()
        .is_active_admin());
}

#[tokio::test]
async fn status_role_and_listing() {
    let db = setup_db().await;
    let admin = insert_user(&db, "admin@example.com", UserRole::Admin).await;
    let editor = insert_user(&db, "editor@example.com", UserRole::Editor).await;
    assert_eq!(UserRepository::count_active_admins(&db).await.unwrap(), 1);

    let promoted = UserRepository::change_role(editor.id, UserRole::Admin, &db)
        .await
        .unwrap();
    assert_eq!(promoted.role, UserRole::Admin);
    let disabled = UserRepository::change_status(admin.id, false, &db)
        .await
        .unwrap();
    assert!(!disabled.is_active);
    assert_eq!(UserRepository::count_active_admins(&db).await.unwrap(), 1);

    UserRepository::touch_last_login(editor.id, &db).await.unwrap();
    let editor = UserRepository::find_by_id(editor.id, &db)
        .await
        .unwrap()
        .unwrap();
    assert!(editor.last_login_at.is_some());

    let params = UserPageParams {
        is_active: Some(true),
        ..Default::default()
    };
    let page = UserRepository::page(&params, &db).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.records[0].email, "editor@example.com");
}
