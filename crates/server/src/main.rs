//! FitRec HTTP server.
//!
//! Reads its configuration from the environment and serves the meal,
//! workout and prediction routes.

use anyhow::Result;
use tracing::info;

use server::ServerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    server::init_tracing();

    info!("Starting FitRec server");
    let config = ServerConfig::from_env()?;

    server::serve(config).await
}
