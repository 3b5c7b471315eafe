use anyhow::Context;
use clap::Parser;
use gradebook_gateway::app::server;
use gradebook_gateway::utils::{logger, validation::Validate};
use gradebook_gateway::{AppState, CliConfig};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();
    let config = cli.load().context("failed to load configuration")?;

    logger::init_logger(cli.verbose, config.logging.level.as_deref(), config.logging.json);

    tracing::info!("Starting gradebook-gateway {}", env!("CARGO_PKG_VERSION"));
    if cli.verbose {
        tracing::debug!("Server config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        return Err(e.into());
    }

    let (host, port) = config.listen_addr();
    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("failed to bind {}:{}", host, port))?;

    let state = AppState::in_memory(&config.service);
    server::run(listener, state).await?;

    Ok(())
}
