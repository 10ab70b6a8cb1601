//! Conqueror server binary.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use conqueror_server::{App, ServerConfig, DEFAULT_LOG_FILTER};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Authoritative server for Conqueror", long_about = None)]
struct Args {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Seed for the combat RNG
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds between input ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Milliseconds a full selection stays visible before it resolves
    #[arg(long)]
    reveal_ms: Option<u64>,
}

impl Args {
    fn into_config(self) -> Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => ServerConfig::default(),
        };
        if let Some(bind) = self.bind {
            config.bind_address = bind;
        }
        if let Some(seed) = self.seed {
            config.game.seed = Some(seed);
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if let Some(reveal_ms) = self.reveal_ms {
            config.reveal_delay_ms = reveal_ms;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Args::parse().into_config()?;
    let app = App::bind(&config)
        .await
        .context("Failed to start server")?;

    info!(
        "Conqueror server v{} listening on {}",
        env!("CARGO_PKG_VERSION"),
        app.local_addr()
    );

    app.run(async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("shutdown requested"),
            Err(err) => {
                warn!(%err, "failed to listen for ctrl-c, running until killed");
                std::future::pending::<()>().await;
            }
        }
    })
    .await;

    Ok(())
}
