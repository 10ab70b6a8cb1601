//! Match configuration.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};
use crate::tile::TileCoord;

/// Default board width in tiles.
pub const DEFAULT_GRID_WIDTH: u32 = 10;
/// Default board height in tiles.
pub const DEFAULT_GRID_HEIGHT: u32 = 10;
/// Default edge length of a tile in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 60;
/// Tile count at which a faction's attack range grows from 1 to 2.
pub const DEFAULT_EXTENDED_RANGE_THRESHOLD: usize = 35;

/// Configuration for a [`Game`](crate::Game).
///
/// # Example
///
/// ```
/// use conqueror_core::{GameConfig, TileCoord};
///
/// let config = GameConfig::default();
/// assert_eq!(config.cell_at_pixel(125, 61), Some(TileCoord::new(2, 1)));
/// assert_eq!(config.cell_at_pixel(600, 10), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board width in tiles.
    pub width: u32,
    /// Board height in tiles.
    pub height: u32,
    /// Edge length of a tile in pixels, used to map input positions to cells.
    pub tile_size: u32,
    /// Owned-tile count at which attacks reach Manhattan distance 2.
    pub extended_range_threshold: usize,
    /// Seed for the combat RNG; `None` draws one from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            tile_size: DEFAULT_TILE_SIZE,
            extended_range_threshold: DEFAULT_EXTENDED_RANGE_THRESHOLD,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Default configuration with a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Checks that the configuration describes a playable board.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfig`] for zero dimensions, a board with
    /// fewer than two cells (the bases would collide) or a zero tile size.
    pub fn validate(&self) -> GameResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GameError::InvalidConfig(format!(
                "board dimensions must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if u64::from(self.width) * u64::from(self.height) < 2 {
            return Err(GameError::InvalidConfig(
                "board needs at least two cells for the player bases".into(),
            ));
        }
        if self.tile_size == 0 {
            return Err(GameError::InvalidConfig("tile size must be non-zero".into()));
        }
        Ok(())
    }

    /// Window extent in pixels as `(width, height)`.
    #[must_use]
    pub fn pixel_extent(&self) -> (u64, u64) {
        (
            u64::from(self.width) * u64::from(self.tile_size),
            u64::from(self.height) * u64::from(self.tile_size),
        )
    }

    /// Maps a pixel position to the cell under it.
    ///
    /// Positions left of or above the board, or past its far edges, map to
    /// `None`.
    #[must_use]
    pub fn cell_at_pixel(&self, px: i64, py: i64) -> Option<TileCoord> {
        if self.tile_size == 0 {
            return None;
        }
        let size = i64::from(self.tile_size);
        let x = u32::try_from(px.checked_div(size)?).ok()?;
        let y = u32::try_from(py.checked_div(size)?).ok()?;
        if px < 0 || py < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(TileCoord::new(x, y))
    }
}
