use clap::Parser;
use folio_common::FolioAppContext;
use folio_error::{FolioError, FolioResult};
use folio_models::constants::DEFAULT_CONFIG_FILE_NAME;
use folio_storage::FolioDbManager;
use folio_web::FolioWebServer;
use std::{env::current_dir, path::PathBuf};

/// Folio - marketing site backend
///
/// Serves the public content API, the admin CMS API and the maintenance
/// gate in front of both.
#[derive(Parser)]
#[command(name = "folio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Folio", long_about = None)]
struct Cli {
    /// Sets a custom config file with full path
    ///
    /// If not specified, the server will look for 'folio.toml'
    /// in the current working directory.
    #[arg(short, long, env = "FOLIO_CONFIG")]
    config: Option<PathBuf>,
}

/// Loads the configuration, initializes the application context and serves
/// until a shutdown signal arrives.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> FolioResult<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(p) => p,
        None => {
            let dir = current_dir()
                .map_err(|e| FolioError::from(format!("Failed to get current directory: {e}")))?;
            dir.join(DEFAULT_CONFIG_FILE_NAME)
        }
    };

    FolioAppContext::init::<FolioDbManager, FolioWebServer>(
        config_path.to_string_lossy().to_string(),
    )
    .await?;

    FolioAppContext::instance().await?.run().await
}
