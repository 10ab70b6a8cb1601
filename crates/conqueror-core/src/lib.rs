//! # Conqueror Core
//!
//! Authoritative game-state engine for Conqueror, a two-player territory
//! capture game played on a fixed grid against a neutral Bot faction.
//!
//! The crate owns the rules and nothing else. Rendering, transport and
//! process bootstrap live in other crates and only see [`GameSnapshot`]s.
//!
//! ## Architecture
//!
//! - **Board**: fixed grid of [`Tile`]s plus derived queries (ownership,
//!   territorial power, winner)
//! - **Resolver**: adjacency and the power-weighted combat lottery
//! - **Selection**: the two-slot selection queue and the
//!   `Reject | Swap | Combat` decision
//! - **Game**: the aggregate that ties them together, tracks turn order,
//!   first-attack bonuses and the status message
//!
//! ## Usage
//!
//! ```
//! use conqueror_core::{Faction, Game, GameConfig, SelectionOutcome, TileCoord};
//!
//! let mut game = Game::new(GameConfig::seeded(7)).unwrap();
//!
//! // Player1 attacks the Bot tile next to its base; the first attack always wins.
//! game.select(TileCoord::new(0, 0));
//! let outcome = game.select(TileCoord::new(1, 0));
//!
//! assert!(matches!(outcome, SelectionOutcome::Combat(_)));
//! assert_eq!(game.turn(), Faction::Player2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod board;
pub mod config;
pub mod error;
pub mod event;
pub mod faction;
pub mod game;
pub mod resolver;
pub mod selection;
pub mod snapshot;
pub mod status;
pub mod tile;

#[cfg(test)]
mod tests;

pub use board::Board;
pub use config::GameConfig;
pub use error::{GameError, GameResult};
pub use event::CombatEvent;
pub use faction::{Faction, FactionSet};
pub use game::{Game, SelectionOutcome};
pub use resolver::{CombatReport, CombatRoll};
pub use selection::{IllegalSelection, SelectionAction, SelectionQueue};
pub use snapshot::{BoardSnapshot, GameSnapshot, StatusSnapshot, TileSnapshot};
pub use tile::{Tile, TileCoord, CAPTURE_THRESHOLD, MAX_HEALTH};
