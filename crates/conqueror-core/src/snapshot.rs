//! Read-only views of the game for display clients.
//!
//! A [`GameSnapshot`] is a self-contained copy of everything a thin client
//! needs to draw a frame: every tile's owner and health, the pending
//! selection, the status message, whose turn it is, and the scores. It is
//! taken under the same exclusion as input resolution, so it never shows a
//! half-applied move.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::faction::Faction;
use crate::tile::{Tile, TileCoord};

/// One tile as seen by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileSnapshot {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
    /// Owning faction.
    pub owner: Faction,
    /// Current health.
    pub health: f64,
}

impl From<&Tile> for TileSnapshot {
    fn from(tile: &Tile) -> Self {
        Self {
            x: tile.coord().x,
            y: tile.coord().y,
            owner: tile.owner(),
            health: tile.health(),
        }
    }
}

/// The whole board, row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Board width in tiles.
    pub width: u32,
    /// Board height in tiles.
    pub height: u32,
    /// Tiles in row-major order.
    pub tiles: Vec<TileSnapshot>,
}

impl BoardSnapshot {
    /// Copies the state of `board`.
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        Self {
            width: board.width(),
            height: board.height(),
            tiles: board.tiles().map(TileSnapshot::from).collect(),
        }
    }

    /// Returns the tile at `coord`, if on the board.
    #[must_use]
    pub fn tile(&self, coord: TileCoord) -> Option<&TileSnapshot> {
        if coord.x >= self.width || coord.y >= self.height {
            return None;
        }
        self.tiles
            .get(coord.y as usize * self.width as usize + coord.x as usize)
    }

    /// Number of tiles owned by `faction`.
    #[must_use]
    pub fn team_count(&self, faction: Faction) -> usize {
        self.tiles.iter().filter(|t| t.owner == faction).count()
    }
}

/// Status line data: message, turn and first-attack usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// Multi-line status message.
    pub message: String,
    /// Faction whose turn it is.
    pub turn: Faction,
    /// Whether each human faction has spent its first-attack bonus.
    pub has_attacked: BTreeMap<Faction, bool>,
}

/// A complete, consistent view of a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Board state.
    pub board: BoardSnapshot,
    /// Pending selection, in selection order.
    pub queue: Vec<TileCoord>,
    /// Message, turn and first-attack flags.
    pub status: StatusSnapshot,
    /// Tiles held by each faction.
    pub scores: BTreeMap<Faction, usize>,
    /// Winning faction, once decided.
    pub winner: Option<Faction>,
    /// Number of swaps and attacks executed so far.
    pub moves: u64,
}
