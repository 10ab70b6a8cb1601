//! Territorial power: the per-tile multiplier used in combat odds.
//!
//! Bot tiles defend harder the closer they sit to the centre of the board,
//! in three tiers. Human tiles draw power from the size of their empire,
//! scaled by an attrition modifier that rewards holding your own home
//! quadrant and penalises occupying the opponent's.

use crate::error::GameResult;
use crate::faction::Faction;
use crate::tile::{Tile, TileCoord};

use super::Board;

/// Attrition multiplier for a tile held inside its owner's home quadrant.
pub const HOME_ADVANTAGE: f64 = 1.6;

/// Attrition multiplier for a tile held inside the opponent's home quadrant.
pub const AWAY_PENALTY: f64 = 0.625;

impl Board {
    /// Returns the faction whose home quadrant contains `coord`.
    ///
    /// `Player1` owns the top-left quarter (`x < W/2`, `y < H/2`), `Player2`
    /// the bottom-right quarter (`x >= W/2`, `y >= H/2`). The other two
    /// quarters belong to nobody.
    #[must_use]
    pub fn home_quadrant(&self, coord: TileCoord) -> Option<Faction> {
        let (half_w, half_h) = (self.width / 2, self.height / 2);
        if coord.x < half_w && coord.y < half_h {
            Some(Faction::Player1)
        } else if coord.x >= half_w && coord.y >= half_h {
            Some(Faction::Player2)
        } else {
            None
        }
    }

    /// Attrition multiplier for a human-held tile.
    #[must_use]
    pub fn attrition_modifier(&self, tile: &Tile) -> f64 {
        match self.home_quadrant(tile.coord()) {
            Some(home) if home == tile.owner() => HOME_ADVANTAGE,
            Some(_) => AWAY_PENALTY,
            None => 1.0,
        }
    }

    /// Defensive tier (1, 2 or 3) of a Bot tile at `coord`.
    ///
    /// Distances are measured per axis from the real-valued board centre.
    /// Tiles more than two cells out on both axes score 1, more than one cell
    /// out on both axes score 2, everything nearer the centre scores 3.
    #[must_use]
    pub fn bot_tier(&self, coord: TileCoord) -> u8 {
        let cx = f64::from(self.width - 1) / 2.0;
        let cy = f64::from(self.height - 1) / 2.0;
        let dx = (f64::from(coord.x) - cx).abs();
        let dy = (f64::from(coord.y) - cy).abs();

        if dx > 2.0 && dy > 2.0 {
            1
        } else if dx > 1.0 && dy > 1.0 {
            2
        } else {
            3
        }
    }

    /// Territorial power of the tile at `coord`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfBounds`](crate::GameError::OutOfBounds) if
    /// `coord` is off the board.
    #[allow(clippy::cast_precision_loss)]
    pub fn territorial_power(&self, coord: TileCoord) -> GameResult<f64> {
        let tile = self.tile(coord)?;
        let owner = tile.owner();
        if owner == Faction::Bot {
            return Ok(f64::from(self.bot_tier(coord)));
        }
        Ok(self.team_count(owner) as f64 * self.attrition_modifier(tile))
    }
}
