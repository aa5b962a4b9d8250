//! # chartsheet-server
//!
//! HTTP server for the chartsheet API.

use anyhow::{Context, Result};
use chartsheet_core::sheet::{UploadLimits, DEFAULT_MAX_BYTES};
use chartsheet_core::{FileStore, MemoryStore, Uploader};
use chartsheet_server::{create_router, AppState};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// chartsheet HTTP server
#[derive(Parser)]
#[command(name = "chartsheet-server", version, about)]
struct Args {
    /// Address to listen on
    #[arg(long, env = "CHARTSHEET_ADDR", default_value = "0.0.0.0:3000")]
    addr: String,

    /// Largest accepted upload in bytes
    #[arg(long, env = "CHARTSHEET_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_BYTES)]
    max_upload_bytes: u64,

    /// Keep the session on disk in this directory instead of in memory
    #[arg(long, env = "CHARTSHEET_STORE_DIR")]
    store_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let uploader = Uploader::new(UploadLimits::default().with_max_bytes(args.max_upload_bytes));
    let state = match &args.store_dir {
        Some(dir) => {
            let store = FileStore::open(dir)
                .with_context(|| format!("Failed to open session directory: {}", dir.display()))?;
            AppState::new(uploader, store)
        }
        None => AppState::new(uploader, MemoryStore::new()),
    };
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&args.addr)
        .await
        .with_context(|| format!("Failed to bind {}", args.addr))?;
    tracing::info!(addr = %args.addr, "chartsheet-server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
