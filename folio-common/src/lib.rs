//! Folio application context.
//!
//! Owns the process-wide components (settings, logger, database, identity,
//! mailer, web server), wires them together at startup and tears them down
//! on shutdown signals.
pub mod identity;
mod logger;
pub mod mailer;

pub use folio_error::{FolioError, FolioResult};
pub use identity::JwtIdentityProvider;
pub use logger::{parse_filter, Logger};
pub use mailer::{mailer_from_settings, HttpMailer, LogMailer};

use folio_models::{
    constants::{DATA_DIR, LOG_DIR},
    settings::Settings,
    DbManager, IdentityProvider, Mailer, WebServer,
};
use once_cell::sync::OnceCell;
use std::{
    future::Future,
    path::Path,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};
#[cfg(windows)]
use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio_util::{sync::CancellationToken, task::TaskTracker};
use tracing::{info, instrument, span, Level};

static APP_CONTEXT: OnceCell<RwLock<FolioAppContext>> = OnceCell::new();

pub struct FolioAppContext {
    /// Global settings
    settings: Option<Settings>,
    /// Global logger
    logger: Logger,
    /// Database manager
    db_manager: Option<Arc<dyn DbManager>>,
    /// Session issuer and user directory
    identity: Option<Arc<dyn IdentityProvider>>,
    /// Outgoing mail transport
    mailer: Option<Arc<dyn Mailer>>,
    /// Web server
    web_server: Option<Arc<dyn WebServer>>,
    /// Flag to prevent duplicate shutdowns
    shutting_down: AtomicBool,
    /// Shutdown token
    shutdown_token: CancellationToken,
}

impl FolioAppContext {
    #[inline]
    pub async fn instance() -> FolioResult<RwLockReadGuard<'static, FolioAppContext>> {
        Ok(APP_CONTEXT
            .get()
            .ok_or(FolioError::from("FolioAppContext is not initialized"))?
            .read()
            .await)
    }

    #[inline]
    pub async fn instance_mut() -> FolioResult<RwLockWriteGuard<'static, FolioAppContext>> {
        Ok(APP_CONTEXT
            .get()
            .ok_or(FolioError::from("FolioAppContext is not initialized"))?
            .write()
            .await)
    }

    /// Initializes the global application context.
    ///
    /// Settings are loaded first so the runtime directory is applied before the
    /// logger opens `./logs`. Components are then started in dependency order:
    /// database, identity provider (which seeds the bootstrap admin), mailer and
    /// finally the web server.
    pub async fn init<D, W>(config: String) -> FolioResult<()>
    where
        D: DbManager + 'static,
        W: WebServer + 'static,
    {
        let settings = Settings::new(config)?;

        apply_runtime_dir(&settings.general.runtime_dir)?;
        ensure_runtime_directories()?;

        let mut logger = Logger::new(settings.general.log_level.clone());
        logger.initialize()?;

        let span = span!(Level::INFO, "init-app");
        let _guard = span.enter();

        let mut ctx = FolioAppContext {
            shutting_down: AtomicBool::new(false),
            shutdown_token: CancellationToken::new(),
            logger,
            settings: Some(settings),
            db_manager: None,
            identity: None,
            mailer: None,
            web_server: None,
        };

        // Initiates DBManager
        ctx.init_db_manager::<D>().await?;

        // Initiates identity provider
        ctx.init_identity().await?;

        // Initiates mailer
        ctx.init_mailer()?;

        // Initiates Web Server
        ctx.init_web_server::<W>().await?;

        APP_CONTEXT
            .set(RwLock::new(ctx))
            .map_err(|_| FolioError::from("Failed to set FolioAppContext"))?;
        Ok(())
    }

    async fn init_db_manager<D: DbManager + 'static>(&mut self) -> FolioResult<()> {
        self.db_manager = Some(D::init(self.settings()?).await?);
        info!("Database initialized successfully.");
        Ok(())
    }

    #[instrument(name = "init-identity", skip(self))]
    async fn init_identity(&mut self) -> FolioResult<()> {
        let settings = self.settings()?.clone();
        let db = self.db_manager()?.get_connection()?;
        let provider = JwtIdentityProvider::new(settings.auth.jwt.clone(), db);
        provider
            .ensure_bootstrap_admin(&settings.auth.bootstrap_admin)
            .await?;
        self.identity = Some(Arc::new(provider));
        info!("Identity provider initialized successfully.");
        Ok(())
    }

    fn init_mailer(&mut self) -> FolioResult<()> {
        self.mailer = Some(mailer_from_settings(&self.settings()?.mail)?);
        info!("Mailer initialized successfully.");
        Ok(())
    }

    async fn init_web_server<W: WebServer + 'static>(&mut self) -> FolioResult<()> {
        self.web_server = Some(
            W::init(
                self.settings()?,
                self.db_manager()?,
                self.identity()?,
                self.mailer()?,
            )
            .await?,
        );
        info!("Web server initialized successfully.");
        Ok(())
    }

    #[inline]
    /// Gets a reference to the settings
    pub fn settings(&self) -> FolioResult<&Settings> {
        self.settings
            .as_ref()
            .ok_or(FolioError::from("Settings not initialized"))
    }

    #[inline]
    pub fn db_manager(&self) -> FolioResult<Arc<dyn DbManager>> {
        self.db_manager
            .as_ref()
            .ok_or(FolioError::from("Database manager not initialized"))
            .map(Arc::clone)
    }

    #[inline]
    pub fn identity(&self) -> FolioResult<Arc<dyn IdentityProvider>> {
        self.identity
            .as_ref()
            .ok_or(FolioError::from("Identity provider not initialized"))
            .map(Arc::clone)
    }

    #[inline]
    pub fn mailer(&self) -> FolioResult<Arc<dyn Mailer>> {
        self.mailer
            .as_ref()
            .ok_or(FolioError::from("Mailer not initialized"))
            .map(Arc::clone)
    }

    #[inline]
    pub fn web_server(&self) -> FolioResult<Arc<dyn WebServer>> {
        self.web_server
            .as_ref()
            .ok_or(FolioError::from("Web server not initialized"))
            .map(Arc::clone)
    }

    #[inline]
    pub fn log_level(&self) -> &str {
        self.logger.get_level()
    }

    /// Replaces the active `tracing` filter directive.
    #[inline]
    pub fn change_log_level(&mut self, directive: &str) -> FolioResult<()> {
        self.logger.set_level(directive)
    }

    /// Requests a shutdown as if a termination signal had been received.
    pub fn request_shutdown(&self) {
        self.shutdown_token.cancel();
    }

    /// Blocks until a shutdown signal arrives, then stops every component.
    pub async fn run(&self) -> FolioResult<()> {
        self.listen_for_shutdown(async { self.graceful_shutdown().await })
            .await
    }

    async fn listen_for_shutdown<F>(&self, shutdown_fn: F) -> FolioResult<()>
    where
        F: Future<Output = FolioResult<()>>,
    {
        let shutdown_token = self.shutdown_token.clone();

        #[cfg(unix)]
        {
            let mut sigterm = signal(SignalKind::terminate())?;
            let mut sigint = signal(SignalKind::interrupt())?;
            let mut sighup = signal(SignalKind::hangup())?;
            let mut sigquit = signal(SignalKind::quit())?;

            tokio::select! {
                _ = sigterm.recv() => {
                    info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    info!("Received SIGINT signal");
                }
                _ = sighup.recv() => {
                    info!("Received SIGHUP signal");
                }
                _ = sigquit.recv() => {
                    info!("Received SIGQUIT signal");
                }
                _ = shutdown_token.cancelled() => {}
            }
        }

        #[cfg(windows)]
        {
            tokio::select! {
                _ = ctrl_c() => {
                    info!("Received ctrl-c signal");
                }
                _ = shutdown_token.cancelled() => {}
            }
        }

        shutdown_fn.await
    }

    #[inline]
    #[instrument(name = "graceful-shutdown", skip_all)]
    /// Stops the web server, then closes the database.
    pub async fn graceful_shutdown(&self) -> FolioResult<()> {
        if self.shutting_down.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        info!("Starting graceful shutdown...");

        // In-flight requests may still need the database.
        if let Some(web_server) = &self.web_server {
            let _ = web_server.stop().await;
        }

        let tracker = TaskTracker::new();
        if let Some(db_manager) = &self.db_manager {
            let db_manager = Arc::clone(db_manager);
            tracker.spawn(async move {
                let _ = db_manager.close().await;
            });
        }

        tracker.close();
        tracker.wait().await;

        info!("Graceful shutdown completed");
        Ok(())
    }
}

/// Switches the working directory so `./data` and `./logs` resolve under `runtime_dir`.
fn apply_runtime_dir(runtime_dir: &str) -> FolioResult<()> {
    let dir = runtime_dir.trim();
    if dir.is_empty() || dir == "." {
        return Ok(());
    }

    std::fs::create_dir_all(dir)
        .map_err(|e| FolioError::from(format!("Failed to create runtime_dir {}: {}", dir, e)))?;

    std::env::set_current_dir(dir).map_err(|e| {
        FolioError::from(format!(
            "Failed to set current_dir to runtime_dir {}: {}",
            dir, e
        ))
    })?;

    Ok(())
}

fn ensure_runtime_directories() -> FolioResult<()> {
    for dir in [DATA_DIR, LOG_DIR] {
        std::fs::create_dir_all(Path::new(dir)).map_err(|e| {
            FolioError::from(format!("Failed to create directory {}: {}", dir, e))
        })?;
    }
    Ok(())
}
