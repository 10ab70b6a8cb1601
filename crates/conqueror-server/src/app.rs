//! Wiring: config in, running server out.

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use conqueror_core::{Game, GameError};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::config::{ConfigError, ServerConfig};
use crate::session::{Session, TickLoop};
use crate::transport::{Server, TransportError};

/// Startup error types
#[derive(Debug, Error)]
pub enum StartError {
    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The match could not be created.
    #[error(transparent)]
    Game(#[from] GameError),
    /// The listener could not be opened.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// A bound server with its match and tick loop, ready to run.
#[derive(Debug)]
pub struct App {
    server: Server,
    session: Session,
    tick_loop: TickLoop,
    tick_interval: Duration,
}

impl App {
    /// Validates `config`, creates the match and binds the listener.
    ///
    /// # Errors
    ///
    /// Returns [`StartError`] if any of those steps fail.
    pub async fn bind(config: &ServerConfig) -> Result<Self, StartError> {
        config.validate()?;
        let game = Game::new(config.game.clone())?;
        let (session, tick_loop) = Session::new(game, config.reveal_delay());
        let server = Server::bind(config.bind_address, session.clone()).await?;
        info!(
            width = config.game.width,
            height = config.game.height,
            tick_ms = config.tick_interval_ms,
            reveal_ms = config.reveal_delay_ms,
            "match ready"
        );
        Ok(Self {
            server,
            session,
            tick_loop,
            tick_interval: config.tick_interval(),
        })
    }

    /// Address the server is listening on.
    #[must_use]
    pub fn local_addr(&self) -> SocketAddr {
        self.server.local_addr()
    }

    /// Handle to the running match.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Serves connections and ticks the match until `shutdown` completes.
    pub async fn run(self, shutdown: impl Future<Output = ()>) {
        let (stop_tx, mut stop_rx) = watch::channel(());
        let ticker = tokio::spawn(self.tick_loop.run(self.tick_interval, async move {
            // Resolves once the sender is dropped.
            let _ = stop_rx.changed().await;
        }));

        self.server.run(shutdown).await;
        drop(stop_tx);
        if let Err(err) = ticker.await {
            warn!(%err, "tick loop task failed");
        }
    }
}
