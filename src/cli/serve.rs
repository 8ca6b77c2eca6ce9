use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerConfig;
use crate::server;

/// Execute the serve command. Blocks until Ctrl-C.
pub fn run_serve(bind: Option<String>, database: Option<String>) -> Result<()> {
    let config = ServerConfig::load(bind, database)?;
    let db = config.database.open()?;
    info!(database = %config.database, "Opened note store");

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let listener = TcpListener::bind(config.bind)
            .await
            .with_context(|| format!("Failed to bind {}", config.bind))?;
        server::serve(listener, db, server::shutdown_signal()).await
    })
}
