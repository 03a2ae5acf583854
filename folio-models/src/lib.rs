pub mod constants;
pub mod domain;
pub mod entities;
pub mod enums;
mod idens;
pub mod initializer;
pub mod mail;
pub mod maintenance;
pub mod settings;
pub mod web;

use crate::{
    domain::prelude::{LoginResponse, NewUser, PageResult, Session, UserInfo, UserPageParams},
    entities::prelude::UserModel,
    mail::MailMessage,
};
use async_trait::async_trait;
use downcast_rs::{impl_downcast, DowncastSync};
use folio_error::{init::InitContextError, storage::StorageError, FolioResult};
use sea_orm::DatabaseConnection;
use settings::Settings;
use std::sync::Arc;

impl_downcast!(sync WebServer);
impl_downcast!(sync DbManager);
impl_downcast!(sync IdentityProvider);
impl_downcast!(sync Mailer);

/// Database lifecycle: connect, hand out connections, close.
#[async_trait]
pub trait DbManager: DowncastSync + Send + Sync + 'static {
    /// Connects and brings the schema up to date.
    async fn init(settings: &Settings) -> FolioResult<Arc<Self>, InitContextError>
    where
        Self: Sized;

    fn get_connection(&self) -> FolioResult<DatabaseConnection, StorageError>;

    async fn close(&self) -> FolioResult<()>;
}

/// HTTP server lifecycle.
#[async_trait]
pub trait WebServer: DowncastSync + Send + Sync + 'static {
    async fn init(
        settings: &Settings,
        db_manager: Arc<dyn DbManager>,
        identity: Arc<dyn IdentityProvider>,
        mailer: Arc<dyn Mailer>,
    ) -> FolioResult<Arc<Self>, InitContextError>
    where
        Self: Sized;

    async fn stop(&self) -> FolioResult<()>;
}

/// Session issuer and user directory.
///
/// Tokens identify the caller by email; the role and active flag always come
/// from the local `user` table.
#[async_trait]
pub trait IdentityProvider: DowncastSync + Send + Sync + 'static {
    /// Validates a session token. Invalid or expired tokens are errors.
    fn session(&self, token: &str) -> FolioResult<Session>;

    /// Issues a session token for `user`, returning the token and its expiry (unix seconds).
    fn issue(&self, user: &UserModel) -> FolioResult<(String, i64)>;

    /// Verifies credentials of an active user and issues a session.
    async fn login(&self, email: &str, password: &str) -> FolioResult<LoginResponse>;

    /// Provisions a user; the password is stored hashed.
    async fn create_user(&self, user: NewUser) -> FolioResult<UserModel>;

    async fn list_users(&self, params: &UserPageParams) -> FolioResult<PageResult<UserInfo>>;
}

/// Outgoing mail transport.
#[async_trait]
pub trait Mailer: DowncastSync + Send + Sync + 'static {
    async fn send(&self, message: MailMessage) -> FolioResult<()>;
}
