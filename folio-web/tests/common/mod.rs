#![allow(dead_code)]

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web::Data,
    App, Error,
};
use async_trait::async_trait;
use folio_common::{FolioError, JwtIdentityProvider};
use folio_models::{
    domain::prelude::NewUser, enums::common::UserRole, mail::MailMessage, settings::Settings,
    IdentityProvider, Mailer,
};
use folio_storage::{Migrator, MigratorTrait};
use folio_web::{configure_app, AppState, MaintenanceGate};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

pub const ADMIN_EMAIL: &str = "admin@example.com";

/// Mailer that keeps every message and can be told to fail.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<MailMessage>>,
    pub failing: AtomicBool,
}

impl RecordingMailer {
    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: MailMessage) -> Result<(), FolioError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(FolioError::MailError("mail api unavailable".into()));
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

pub struct TestContext {
    pub db: DatabaseConnection,
    pub identity: Arc<JwtIdentityProvider>,
    pub mailer: Arc<RecordingMailer>,
    pub state: Data<AppState>,
}

impl TestContext {
    pub async fn new() -> Self {
        let settings = Settings::default();
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(opts).await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        let identity = Arc::new(JwtIdentityProvider::new(
            settings.auth.jwt.clone(),
            db.clone(),
        ));
        let mailer = Arc::new(RecordingMailer::default());
        let state = Data::new(AppState::new(
            &settings,
            db.clone(),
            identity.clone(),
            mailer.clone(),
        ));
        Self {
            db,
            identity,
            mailer,
            state,
        }
    }

    /// Creates a user and returns a bearer token for it.
    pub async fn user_token(&self, email: &str, role: UserRole, is_active: bool) -> (i32, String) {
        let user = self
            .identity
            .create_user(NewUser {
                email: email.into(),
                name: "Test User".into(),
                password: "correct-horse".into(),
                role,
                is_active,
            })
            .await
            .unwrap();
        let (token, _) = self.identity.issue(&user).unwrap();
        (user.id, token)
    }

    pub async fn admin_token(&self) -> String {
        self.user_token(ADMIN_EMAIL, UserRole::Admin, true).await.1
    }

    /// The full application behind the maintenance gate.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody>,
            Error = Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.state.clone())
            .wrap(MaintenanceGate)
            .configure(|cfg| configure_app(cfg, "/api"))
    }

    /// Routes only, without the gate middleware.
    pub fn ungated_app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody>,
            Error = Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.state.clone())
            .configure(|cfg| configure_app(cfg, "/api"))
    }
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}
