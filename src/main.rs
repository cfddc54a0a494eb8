mod analysis;
mod app;
mod config;
mod domain;
mod http;
mod infrastructure;
mod ocr;
mod service;

use anyhow::Result;
use infrastructure::{logging, shutdown};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_config()?;
    logging::init_tracing(&config.logging)?;

    let shutdown = shutdown::Shutdown::new();
    shutdown::install_signal_handlers(shutdown.clone());

    let app = app::SentinelApp::initialize(config, shutdown).await?;
    app.run().await
}
