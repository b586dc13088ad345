//! Timesheet export HTTP server.
//!
//! # Environment Variables
//!
//! - `CONFIG_DIR`: directory holding `export.yaml` (default: ./config)
//! - `DATA_DIR`: directory holding the table CSVs and `templates/` (default: ./data)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use timesheet_export::api::{create_router, AppState};
use timesheet_export::config::ConfigLoader;
use timesheet_export::storage::DirectoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    let config_dir = env::var("CONFIG_DIR").unwrap_or_else(|_| "./config".to_string());
    let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string());

    let config = ConfigLoader::load(&config_dir)?;
    info!(config_dir = %config_dir, "Settings loaded");

    let storage = DirectoryStore::new(&data_dir);
    info!(data_dir = %data_dir, "Reading tables from directory");

    let app = create_router(AppState::new(config, storage));

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
