use crate::constants::{DATA_DIR, DEFAULT_MAINTENANCE_PATH, ENV_PREFIX};
use config::{Config, File};
use folio_error::FolioResult;
use serde::{self, Deserialize};
use std::{ops::Deref, sync::Arc};
use sysinfo::System;

#[derive(Debug, Clone)]
pub struct Settings(Arc<Inner>);

impl Deref for Settings {
    type Target = Inner;
    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl Settings {
    pub fn new(config_path: String) -> FolioResult<Self> {
        let builder = Config::builder()
            .add_source(File::with_name(config_path.as_str()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("web.cors.whitelist.origins")
                    .with_list_parse_key("web.cors.whitelist.methods")
                    .with_list_parse_key("web.cors.whitelist.headers")
                    .with_list_parse_key("maintenance.exempt_prefixes"),
            );
        let inner: Inner = builder.build()?.try_deserialize()?;
        Ok(Self(Arc::new(inner)))
    }
}

impl From<Inner> for Settings {
    fn from(inner: Inner) -> Self {
        Self(Arc::new(inner))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Inner::default().into()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Inner {
    #[serde(default)]
    pub general: General,
    #[serde(default)]
    pub web: Web,
    #[serde(default)]
    pub auth: Auth,
    #[serde(default)]
    pub db: Db,
    #[serde(default)]
    pub maintenance: Maintenance,
    #[serde(default)]
    pub mail: Mail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct General {
    /// Runtime root directory; relative paths (`./data`, `./logs`) resolve from here.
    ///
    /// Override with `FOLIO__GENERAL__RUNTIME_DIR=/var/lib/folio`.
    #[serde(default = "General::runtime_dir_default")]
    pub runtime_dir: String,
    /// Initial `tracing` filter directive, e.g. `info` or `folio_web=debug,info`.
    #[serde(default = "General::log_level_default")]
    pub log_level: String,
}

impl Default for General {
    fn default() -> Self {
        General {
            runtime_dir: General::runtime_dir_default(),
            log_level: General::log_level_default(),
        }
    }
}

impl General {
    fn runtime_dir_default() -> String {
        ".".into()
    }

    fn log_level_default() -> String {
        "info".into()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Web {
    #[serde(default = "Web::router_prefix_default")]
    pub router_prefix: String,
    #[serde(default = "Web::host_default")]
    pub host: String,
    #[serde(default = "Web::port_default")]
    pub port: u16,
    #[serde(default = "Web::workers_default")]
    pub workers: i32,
    #[serde(default)]
    pub cors: Cors,
}

impl Default for Web {
    fn default() -> Self {
        Web {
            router_prefix: Web::router_prefix_default(),
            host: Web::host_default(),
            port: Web::port_default(),
            workers: Web::workers_default(),
            cors: Default::default(),
        }
    }
}

impl Web {
    fn router_prefix_default() -> String {
        "/api".into()
    }

    fn port_default() -> u16 {
        8080
    }

    fn host_default() -> String {
        "0.0.0.0".into()
    }

    fn workers_default() -> i32 {
        0
    }

    /// `0` uses one worker per CPU; a negative value divides the CPU count.
    pub fn get_worker_count(&self) -> usize {
        match self.workers {
            0 => System::new_all().cpus().len().max(1),
            n if n > 0 => n as usize,
            n => std::cmp::max(
                1,
                (System::new_all().cpus().len() as i32 / n.abs()) as usize,
            ),
        }
    }
}

#[derive(Default, Debug, Clone, Deserialize)]
pub struct Cors {
    #[serde(default)]
    pub mode: CorsMode,
    #[serde(default)]
    pub whitelist: Whitelist,
}

#[derive(Default, Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorsMode {
    #[default]
    AllowAll,
    Whitelist,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Whitelist {
    #[serde(default = "Whitelist::origins_default")]
    pub origins: Vec<String>,
    #[serde(default = "Whitelist::methods_default")]
    pub methods: Vec<String>,
    #[serde(default = "Whitelist::headers_default")]
    pub headers: Vec<String>,
    #[serde(default = "Whitelist::credentials_default")]
    pub credentials: bool,
}

impl Default for Whitelist {
    fn default() -> Self {
        Whitelist {
            origins: Whitelist::origins_default(),
            methods: Whitelist::methods_default(),
            headers: Whitelist::headers_default(),
            credentials: Whitelist::credentials_default(),
        }
    }
}

impl Whitelist {
    fn origins_default() -> Vec<String> {
        vec!["*".into()]
    }

    fn methods_default() -> Vec<String> {
        ["GET", "POST", "PUT", "PATCH", "DELETE"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn headers_default() -> Vec<String> {
        vec!["Content-Type".into(), "Authorization".into()]
    }

    fn credentials_default() -> bool {
        true
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Auth {
    #[serde(default)]
    pub jwt: Jwt,
    /// Cookie carrying the session token for browser clients.
    #[serde(default = "Auth::cookie_name_default")]
    pub cookie_name: String,
    #[serde(default = "Auth::cookie_secure_default")]
    pub cookie_secure: bool,
    #[serde(default)]
    pub bootstrap_admin: BootstrapAdmin,
}

impl Default for Auth {
    fn default() -> Self {
        Auth {
            jwt: Default::default(),
            cookie_name: Auth::cookie_name_default(),
            cookie_secure: Auth::cookie_secure_default(),
            bootstrap_admin: Default::default(),
        }
    }
}

impl Auth {
    fn cookie_name_default() -> String {
        "folio_session".into()
    }

    fn cookie_secure_default() -> bool {
        false
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Jwt {
    #[serde(default = "Jwt::secret_default")]
    pub secret: String,
    /// Token lifetime in seconds.
    #[serde(default = "Jwt::expire_default")]
    pub expire: i64,
    #[serde(default = "Jwt::issuer_default")]
    pub issuer: String,
}

impl Default for Jwt {
    fn default() -> Self {
        Jwt {
            secret: Jwt::secret_default(),
            expire: Jwt::expire_default(),
            issuer: Jwt::issuer_default(),
        }
    }
}

impl Jwt {
    fn secret_default() -> String {
        "folio".into()
    }

    fn expire_default() -> i64 {
        86_400
    }

    fn issuer_default() -> String {
        "folio".into()
    }
}

/// Admin account provisioned on first start when no user with that email exists.
#[derive(Debug, Clone, Deserialize)]
pub struct BootstrapAdmin {
    #[serde(default = "BootstrapAdmin::enabled_default")]
    pub enabled: bool,
    #[serde(default = "BootstrapAdmin::email_default")]
    pub email: String,
    #[serde(default = "BootstrapAdmin::name_default")]
    pub name: String,
    #[serde(default = "BootstrapAdmin::password_default")]
    pub password: String,
}

impl Default for BootstrapAdmin {
    fn default() -> Self {
        BootstrapAdmin {
            enabled: BootstrapAdmin::enabled_default(),
            email: BootstrapAdmin::email_default(),
            name: BootstrapAdmin::name_default(),
            password: BootstrapAdmin::password_default(),
        }
    }
}

impl BootstrapAdmin {
    fn enabled_default() -> bool {
        true
    }

    fn email_default() -> String {
        "admin@example.com".into()
    }

    fn name_default() -> String {
        "Administrator".into()
    }

    fn password_default() -> String {
        "change-me-now".into()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Db {
    #[serde(default)]
    pub sqlite: Sqlite,
}

/// FolioDbConfig describes where the database lives and how to reach it.
pub trait FolioDbConfig: Send + Sync {
    /// Returns the database file path.
    fn db_path(&self) -> String;

    /// Generates a URL for the database connection.
    fn to_url(&self) -> String;

    /// Returns the directory containing the database file.
    fn db_dir(&self) -> String;
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sqlite {
    #[serde(default = "Sqlite::path_default")]
    pub path: String,
    #[serde(default = "Sqlite::timeout_default")]
    pub timeout: u64,
    #[serde(default = "Sqlite::idle_timeout_default")]
    pub idle_timeout: u64,
    #[serde(default = "Sqlite::max_lifetime_default")]
    pub max_lifetime: u64,
    #[serde(default = "Sqlite::max_connections_default")]
    pub max_connections: u32,
    #[serde(default = "Sqlite::auto_create_default")]
    pub auto_create: bool,
}

impl Default for Sqlite {
    fn default() -> Self {
        Sqlite {
            path: Sqlite::path_default(),
            timeout: Sqlite::timeout_default(),
            idle_timeout: Sqlite::idle_timeout_default(),
            max_lifetime: Sqlite::max_lifetime_default(),
            max_connections: Sqlite::max_connections_default(),
            auto_create: Sqlite::auto_create_default(),
        }
    }
}

impl FolioDbConfig for Sqlite {
    fn db_path(&self) -> String {
        self.path.clone()
    }

    fn to_url(&self) -> String {
        if self.auto_create {
            // mode=rwc creates the file when missing
            format!("sqlite:{}/{}?mode=rwc", DATA_DIR, self.path)
        } else {
            format!("sqlite:{}/{}", DATA_DIR, self.path)
        }
    }

    fn db_dir(&self) -> String {
        DATA_DIR.into()
    }
}

impl Sqlite {
    fn path_default() -> String {
        "folio.db".into()
    }

    fn timeout_default() -> u64 {
        5000
    }

    fn idle_timeout_default() -> u64 {
        60000
    }

    fn max_lifetime_default() -> u64 {
        1_800_000
    }

    fn max_connections_default() -> u32 {
        16
    }

    fn auto_create_default() -> bool {
        true
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Maintenance {
    /// Page visitors are redirected to while maintenance mode is on.
    #[serde(default = "Maintenance::page_path_default")]
    pub page_path: String,
    /// Path prefixes that bypass the gate. Matching is per path segment.
    ///
    /// The page path and the `auth`, `admin` and `maintenance` scopes under
    /// `web.router_prefix` are always added on top of this list.
    #[serde(default = "Maintenance::exempt_prefixes_default")]
    pub exempt_prefixes: Vec<String>,
}

impl Default for Maintenance {
    fn default() -> Self {
        Maintenance {
            page_path: Maintenance::page_path_default(),
            exempt_prefixes: Maintenance::exempt_prefixes_default(),
        }
    }
}

impl Maintenance {
    fn page_path_default() -> String {
        DEFAULT_MAINTENANCE_PATH.into()
    }

    fn exempt_prefixes_default() -> Vec<String> {
        [
            DEFAULT_MAINTENANCE_PATH,
            "/login",
            "/admin",
            "/static",
            "/assets",
            "/favicon.ico",
            "/robots.txt",
            "/health",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Mail {
    /// When disabled, outgoing mail is written to the log instead of being sent.
    #[serde(default = "Mail::enabled_default")]
    pub enabled: bool,
    /// HTTP endpoint accepting `{from, to, subject, text}` JSON.
    #[serde(default = "Mail::endpoint_default")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "Mail::from_default")]
    pub from: String,
    /// Public base URL used to build links inside emails.
    #[serde(default = "Mail::site_url_default")]
    pub site_url: String,
    #[serde(default = "Mail::timeout_ms_default")]
    pub timeout_ms: u64,
}

impl Default for Mail {
    fn default() -> Self {
        Mail {
            enabled: Mail::enabled_default(),
            endpoint: Mail::endpoint_default(),
            api_key: String::new(),
            from: Mail::from_default(),
            site_url: Mail::site_url_default(),
            timeout_ms: Mail::timeout_ms_default(),
        }
    }
}

impl Mail {
    fn enabled_default() -> bool {
        false
    }

    fn endpoint_default() -> String {
        "https://api.resend.com/emails".into()
    }

    fn from_default() -> String {
        "Folio <no-reply@example.com>".into()
    }

    fn site_url_default() -> String {
        "http://localhost:3000".into()
    }

    fn timeout_ms_default() -> u64 {
        10_000
    }
}
