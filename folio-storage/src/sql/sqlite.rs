use folio_error::FolioResult;
use folio_models::settings::{FolioDbConfig, Sqlite};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::{info, instrument, log::LevelFilter};

/// Open the SQLite pool described by `config`, creating the data directory first.
///
/// sqlx enables `foreign_keys` on every pooled connection, which the
/// `blog_comment -> blog_post` cascade relies on.
#[instrument(name = "init_sqlite_db", skip_all)]
pub async fn init_db(config: &Sqlite) -> FolioResult<DatabaseConnection> {
    tokio::fs::create_dir_all(config.db_dir()).await?;
    let database_url = config.to_url();

    let mut opts = ConnectOptions::new(&database_url);
    opts.connect_timeout(Duration::from_millis(config.timeout))
        .idle_timeout(Duration::from_millis(config.idle_timeout))
        .max_lifetime(Duration::from_millis(config.max_lifetime))
        .max_connections(config.max_connections);

    #[cfg(debug_assertions)]
    {
        opts.sqlx_logging(true)
            .sqlx_logging_level(LevelFilter::Debug);
    }
    #[cfg(not(debug_assertions))]
    {
        opts.sqlx_logging(false)
            .sqlx_logging_level(LevelFilter::Off);
    }

    info!(
        "Connecting to SQLite database at: {} (auto_create: {})",
        config.db_path(),
        config.auto_create
    );

    let db = Database::connect(opts).await?;
    info!("Successfully connected to SQLite database");

    Ok(db)
}
