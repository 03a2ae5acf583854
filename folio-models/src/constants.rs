// Global constants shared across the folio crates

/// The default configuration file name for the application.
/// It is loaded at startup unless `--config` or `FOLIO_CONFIG` points elsewhere.
pub const DEFAULT_CONFIG_FILE_NAME: &str = "folio.toml";

/// Environment prefix for configuration overrides, e.g. `FOLIO__WEB__PORT=8080`.
pub const ENV_PREFIX: &str = "FOLIO";

pub const BEARER_TOKEN: &str = "Bearer";

/// Primary key of the one and only `site_config` row.
pub const SITE_CONFIG_SINGLETON_ID: i32 = 1;

/// Where visitors are sent while maintenance mode is on.
pub const DEFAULT_MAINTENANCE_PATH: &str = "/maintenance";

pub const DATA_DIR: &str = "./data";
pub const LOG_DIR: &str = "./logs";
