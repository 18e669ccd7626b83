use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use textile_db::Db;
use textile_service::ReadingService;
use textile_store::UploadStore;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "textile-server")]
struct Cli {
    /// YAML config file; defaults to configs/config.{APP_ENV}.yaml
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = match cli.config {
        Some(path) => textile_server::config::Config::load_from(&path),
        None => textile_server::config::Config::load(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cfg.log_level.clone())),
        )
        .init();

    tokio::fs::create_dir_all(&cfg.upload_dir).await?;
    info!("upload directory: {}", cfg.upload_dir.display());

    let db = Db::open(&cfg.database_path)?;
    info!("database ready at {}", cfg.database_path.display());

    let store = UploadStore::new(&cfg.upload_dir);
    let service = ReadingService::new(db, store, cfg.file_url_prefix.clone());

    let listener = TcpListener::bind(&cfg.server_address).await?;
    info!("textile-server listening on http://{}", listener.local_addr()?);

    textile_server::serve(listener, service).await
}
