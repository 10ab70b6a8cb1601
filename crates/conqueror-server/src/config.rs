//! Server configuration

use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use conqueror_core::{GameConfig, GameError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8000;
/// Default tick interval: 100 ticks per second.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 10;
/// Default time a full selection stays visible before it resolves.
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 500;

/// Server configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind the server
    pub bind_address: SocketAddr,
    /// Milliseconds between ticks of the input loop
    pub tick_interval_ms: u64,
    /// Milliseconds a full selection is shown before resolution (0 disables)
    pub reveal_delay_ms: u64,
    /// Match settings
    pub game: GameConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            reveal_delay_ms: DEFAULT_REVEAL_DELAY_MS,
            game: GameConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Tick interval as a [`Duration`].
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Reveal delay as a [`Duration`].
    #[must_use]
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    /// Loads a JSON config file. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`] if the file
    /// cannot be read or is not valid JSON for this type.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks that the server can run with these settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroTick`] for a zero tick interval and
    /// [`ConfigError::Game`] if the match settings are invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        self.game.validate()?;
        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The config file is not valid JSON for [`ServerConfig`].
    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        /// File that was parsed.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
    /// The tick interval is zero.
    #[error("tick interval must be at least 1 ms")]
    ZeroTick,
    /// The match settings are invalid.
    #[error(transparent)]
    Game(#[from] GameError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_server() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address.to_string(), "127.0.0.1:8000");
        assert_eq!(config.tick_interval(), Duration::from_millis(10));
        assert_eq!(config.reveal_delay(), Duration::from_millis(500));
        assert_eq!(config.game, GameConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: ServerConfig =
            serde_json::from_str(r#"{"reveal_delay_ms": 0, "game": {"seed": 5}}"#).unwrap();
        assert_eq!(config.reveal_delay(), Duration::ZERO);
        assert_eq!(config.game.seed, Some(5));
        assert_eq!(config.game.width, 10);
        assert_eq!(config.tick_interval_ms, DEFAULT_TICK_INTERVAL_MS);
    }

    #[test]
    fn zero_tick_rejected() {
        let config = ServerConfig {
            tick_interval_ms: 0,
            ..ServerConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTick)));
    }

    #[test]
    fn invalid_game_rejected() {
        let mut config = ServerConfig::default();
        config.game.width = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Game(_))));
    }

    #[test]
    fn file_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "conqueror-config-{}.json",
            std::process::id()
        ));
        let mut config = ServerConfig::default();
        config.game.seed = Some(11);
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = ServerConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ServerConfig::from_file("/nonexistent/conqueror.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/conqueror.json"));
    }
}
