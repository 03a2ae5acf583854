//! Web server module for the Folio application
mod api;
mod middleware;

pub use middleware::{
    auth::AdminAuthentication, maintenance::MaintenanceGate, AdminIdentity, RequestContext,
    SiteAccess,
};

use actix_web::{
    dev::{Server, ServerHandle},
    middleware::{Compress, Logger, NormalizePath},
    web::{self, Data},
    App, HttpServer,
};
use async_trait::async_trait;
use folio_error::{init::InitContextError, FolioError, FolioResult};
use folio_models::{
    maintenance::MaintenancePolicy,
    settings::{Auth, Settings},
    DbManager, IdentityProvider, Mailer, WebServer,
};
use folio_repository::SiteMaintenanceSource;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, instrument};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    identity: Arc<dyn IdentityProvider>,
    mailer: Arc<dyn Mailer>,
    policy: MaintenancePolicy,
    auth: Auth,
    /// Public base URL used in outgoing links.
    site_url: String,
}

impl AppState {
    pub fn new(
        settings: &Settings,
        db: DatabaseConnection,
        identity: Arc<dyn IdentityProvider>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            db,
            identity,
            mailer,
            policy: MaintenancePolicy::from(settings),
            auth: settings.auth.clone(),
            site_url: settings.mail.site_url.clone(),
        }
    }

    #[inline]
    pub(crate) fn maintenance_source(&self) -> SiteMaintenanceSource {
        SiteMaintenanceSource::new(self.db.clone())
    }
}

/// Registers every route: `/health` at the root and the JSON API under `router_prefix`.
pub fn configure_app(cfg: &mut web::ServiceConfig, router_prefix: &str) {
    cfg.configure(api::configure_root_routes)
        .service(web::scope(router_prefix).configure(api::configure_routes));
}

/// FolioWebServer handles the web server initialization and management
#[derive(Clone)]
pub struct FolioWebServer {
    /// Server handle for graceful shutdown
    server: Arc<Mutex<Option<ServerHandle>>>,
}

impl FolioWebServer {
    /// Create and configure the HTTP server
    fn create_server(settings: &Settings, state: AppState) -> FolioResult<Server> {
        let addr = format!("{}:{}", settings.web.host, settings.web.port);
        let router_prefix = settings.web.router_prefix.clone();
        let worker_count = settings.web.get_worker_count();
        let cors_config = settings.web.cors.clone();

        let server = HttpServer::new(move || {
            App::new()
                .app_data(Data::new(state.clone()))
                .wrap(MaintenanceGate)
                .wrap(middleware::cors::middleware(&cors_config))
                .wrap(Logger::default())
                .wrap(Compress::default())
                .wrap(NormalizePath::trim())
                .configure(|cfg| configure_app(cfg, &router_prefix))
        })
        .workers(worker_count)
        .bind(&addr)
        .map_err(|e| FolioError::from(format!("Failed to bind HTTP server to {addr}: {e}")))?;

        info!(%addr, workers = worker_count, "HTTP server bound");
        Ok(server.run())
    }
}

#[async_trait]
impl WebServer for FolioWebServer {
    #[inline]
    #[instrument(name = "init-web-server", skip_all)]
    /// Initialize and start the web server
    async fn init(
        settings: &Settings,
        db_manager: Arc<dyn DbManager>,
        identity: Arc<dyn IdentityProvider>,
        mailer: Arc<dyn Mailer>,
    ) -> FolioResult<Arc<Self>, InitContextError> {
        let db = db_manager.get_connection().map_err(|e| {
            InitContextError::Primitive(format!("Database unavailable for web server: {e}"))
        })?;
        let state = AppState::new(settings, db, identity, mailer);
        let server = Self::create_server(settings, state).map_err(|e| {
            InitContextError::Primitive(format!("Failed to create web server: {e}"))
        })?;
        let server_handle = server.handle();

        // Spawn server task
        tokio::spawn(async move {
            if let Err(e) = server.await {
                error!(error=%e, "Web server failed to start");
            }
        });

        Ok(Arc::new(FolioWebServer {
            server: Arc::new(Mutex::new(Some(server_handle))),
        }))
    }

    #[inline]
    #[instrument(name = "web-server-stop", skip_all)]
    /// Gracefully stop the web server
    async fn stop(&self) -> FolioResult<()> {
        info!("Stopping web server...");
        let mut server_guard = self.server.lock().await;
        if let Some(handle) = server_guard.take() {
            handle.stop(true).await;
        }
        info!("Web server stopped");

        Ok(())
    }
}
