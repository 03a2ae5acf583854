use folio_common::{FolioError, JwtIdentityProvider};
use folio_models::{
    domain::prelude::{NewUser, UserPageParams},
    enums::common::UserRole,
    settings::{BootstrapAdmin, Jwt},
    IdentityProvider,
};
use folio_repository::UserRepository;
use folio_storage::{Migrator, MigratorTrait};
use folio_utils::jwt::encode_jwt;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

async fn setup_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

fn jwt() -> Jwt {
    Jwt {
        secret: "test-secret".into(),
        expire: 3600,
        issuer: "folio-test".into(),
    }
}

fn new_user(email: &str, role: UserRole, is_active: bool) -> NewUser {
    NewUser {
        email: email.into(),
        name: "Jane".into(),
        password: "correct-horse".into(),
        role,
        is_active,
    }
}

#[tokio::test]
async fn login_issues_a_session_for_the_user_email() {
    let db = setup_db().await;
    let provider = JwtIdentityProvider::new(jwt(), db.clone());
    let user = provider
        .create_user(new_user("Jane@Example.com", UserRole::Admin, true))
        .await
        .unwrap();
    assert_eq!(user.email, "jane@example.com");
    assert_ne!(user.password, "correct-horse");

    let login = provider
        .login("jane@example.com", "correct-horse")
        .await
        .unwrap();
    assert_eq!(login.user.id, user.id);
    assert!(login.expires_at > chrono::Utc::now().timestamp());

    let session = provider.session(&login.token).unwrap();
    assert_eq!(session.email, "jane@example.com");
    assert_eq!(session.user_id, Some(user.id));

    let stored = UserRepository::find_by_id(user.id, &db).await.unwrap().unwrap();
    assert!(stored.last_login_at.is_some());
}

#[tokio::test]
async fn wrong_password_and_inactive_users_are_rejected_alike() {
    let db = setup_db().await;
    let provider = JwtIdentityProvider::new(jwt(), db);
    provider
        .create_user(new_user("active@example.com", UserRole::User, true))
        .await
        .unwrap();
    provider
        .create_user(new_user("gone@example.com", UserRole::Admin, false))
        .await
        .unwrap();

    for (email, password) in [
        ("active@example.com", "wrong-password"),
        ("gone@example.com", "correct-horse"),
        ("nobody@example.com", "correct-horse"),
    ] {
        let err = provider.login(email, password).await.unwrap_err();
        assert!(
            matches!(&err, FolioError::IdentityError(msg) if msg == "invalid email or password"),
            "{email}: {err}"
        );
    }
}

#[tokio::test]
async fn tokens_from_other_issuers_or_secrets_are_invalid() {
    let db = setup_db().await;
    let provider = JwtIdentityProvider::new(jwt(), db.clone());
    let user = provider
        .create_user(new_user("jane@example.com", UserRole::Admin, true))
        .await
        .unwrap();
    let (token, _) = provider.issue(&user).unwrap();

    let other_secret = JwtIdentityProvider::new(
        Jwt {
            secret: "another-secret".into(),
            ..jwt()
        },
        db.clone(),
    );
    assert!(other_secret.session(&token).is_err());

    let other_issuer = JwtIdentityProvider::new(
        Jwt {
            issuer: "someone-else".into(),
            ..jwt()
        },
        db,
    );
    assert!(other_issuer.session(&token).is_err());

    assert!(matches!(
        provider.session("not-a-token"),
        Err(FolioError::IdentityError(_))
    ));
}

#[tokio::test]
async fn expired_tokens_are_invalid() {
    let db = setup_db().await;
    let provider = JwtIdentityProvider::new(jwt(), db);
    let mut claims = folio_models::domain::prelude::Claims::new(
        "folio-test".into(),
        1,
        "jane@example.com".into(),
        3600,
    );
    claims.exp = chrono::Utc::now().timestamp() - 3600;
    let token = encode_jwt(&claims, b"test-secret", None).unwrap();
    assert!(provider.session(&token).is_err());
}

#[tokio::test]
async fn duplicate_emails_conflict() {
    let db = setup_db().await;
    let provider = JwtIdentityProvider::new(jwt(), db);
    provider
        .create_user(new_user("jane@example.com", UserRole::User, true))
        .await
        .unwrap();
    let err = provider
        .create_user(new_user("JANE@example.com", UserRole::User, true))
        .await
        .unwrap_err();
    assert!(matches!(err, FolioError::StorageError(e) if e.is_conflict()));
}

#[tokio::test]
async fn bootstrap_admin_is_created_once() {
    let db = setup_db().await;
    let provider = JwtIdentityProvider::new(jwt(), db.clone());
    let admin = BootstrapAdmin {
        enabled: true,
        email: "owner@example.com".into(),
        name: "Owner".into(),
        password: "bootstrap-pass".into(),
    };
    provider.ensure_bootstrap_admin(&admin).await.unwrap();
    provider.ensure_bootstrap_admin(&admin).await.unwrap();

    let users = provider.list_users(&UserPageParams::default()).await.unwrap();
    assert_eq!(users.total, 1);
    assert_eq!(users.records[0].role, UserRole::Admin);
    assert!(provider
        .login("owner@example.com", "bootstrap-pass")
        .await
        .is_ok());
}

#[tokio::test]
async fn disabled_bootstrap_creates_nobody() {
    let db = setup_db().await;
    let provider = JwtIdentityProvider::new(jwt(), db.clone());
    let admin = BootstrapAdmin {
        enabled: false,
        ..Default::default()
    };
    provider.ensure_bootstrap_admin(&admin).await.unwrap();
    assert_eq!(UserRepository::count_active_admins(&db).await.unwrap(), 0);
}
