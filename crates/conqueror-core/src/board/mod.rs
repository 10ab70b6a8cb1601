//! Board module: the fixed grid of tiles.
//!
//! The board is created once per match and mutated in place. Tiles are stored
//! row-major in a flat `Vec`, so every scan (team tiles, counts, snapshots)
//! visits cells in the same deterministic order.
//!
//! # Layout
//!
//! All cells start as `Bot` territory except the two bases:
//! - `Player1` at the top-left corner `(0, 0)`
//! - `Player2` at the bottom-right corner `(width - 1, height - 1)`
//!
//! # Example
//!
//! ```
//! use conqueror_core::{Board, Faction, TileCoord};
//!
//! let board = Board::new(10, 10).unwrap();
//! assert_eq!(board.tile(TileCoord::new(0, 0)).unwrap().owner(), Faction::Player1);
//! assert_eq!(board.tile(TileCoord::new(9, 9)).unwrap().owner(), Faction::Player2);
//! assert_eq!(board.team_count(Faction::Bot), 98);
//! assert_eq!(board.winner(), None);
//! ```

mod power;

pub use power::{AWAY_PENALTY, HOME_ADVANTAGE};

use crate::error::{GameError, GameResult};
use crate::faction::Faction;
use crate::tile::{Tile, TileCoord, CAPTURE_THRESHOLD, MAX_HEALTH};

/// Fixed-size grid of tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl Board {
    /// Creates a board with the two player bases in opposite corners.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfig`] if either dimension is zero or the
    /// board has a single cell.
    pub fn new(width: u32, height: u32) -> GameResult<Self> {
        if width == 0 || height == 0 || (width == 1 && height == 1) {
            return Err(GameError::InvalidConfig(format!(
                "cannot build a {width}x{height} board with two bases"
            )));
        }

        let tiles = (0..height)
            .flat_map(|y| (0..width).map(move |x| Tile::new(TileCoord::new(x, y), Faction::Bot)))
            .collect();
        let mut board = Self {
            width,
            height,
            tiles,
        };

        let p1_base = board.player1_base();
        let p2_base = board.player2_base();
        board.tile_mut(p1_base)?.set_owner(Faction::Player1);
        board.tile_mut(p2_base)?.set_owner(Faction::Player2);
        Ok(board)
    }

    /// Board width in tiles.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Board height in tiles.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Base cell of `Player1`.
    #[must_use]
    pub const fn player1_base(&self) -> TileCoord {
        TileCoord::new(0, 0)
    }

    /// Base cell of `Player2`.
    #[must_use]
    pub const fn player2_base(&self) -> TileCoord {
        TileCoord::new(self.width - 1, self.height - 1)
    }

    /// Returns true if `coord` is on the board.
    #[must_use]
    pub const fn contains(&self, coord: TileCoord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    fn index(&self, coord: TileCoord) -> GameResult<usize> {
        if !self.contains(coord) {
            return Err(GameError::OutOfBounds {
                x: coord.x,
                y: coord.y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(coord.y as usize * self.width as usize + coord.x as usize)
    }

    /// Returns the tile at `coord`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfBounds`] if `coord` is off the board.
    pub fn tile(&self, coord: TileCoord) -> GameResult<&Tile> {
        let idx = self.index(coord)?;
        Ok(&self.tiles[idx])
    }

    /// Returns the tile at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfBounds`] if the coordinates are off the board.
    pub fn get_tile(&self, x: u32, y: u32) -> GameResult<&Tile> {
        self.tile(TileCoord::new(x, y))
    }

    pub(crate) fn tile_mut(&mut self, coord: TileCoord) -> GameResult<&mut Tile> {
        let idx = self.index(coord)?;
        Ok(&mut self.tiles[idx])
    }

    /// Returns mutable references to two distinct tiles.
    ///
    /// Returns `Ok(None)` when `a == b`.
    pub(crate) fn pair_mut(
        &mut self,
        a: TileCoord,
        b: TileCoord,
    ) -> GameResult<Option<(&mut Tile, &mut Tile)>> {
        let ia = self.index(a)?;
        let ib = self.index(b)?;
        if ia == ib {
            return Ok(None);
        }
        let (lo, hi) = (ia.min(ib), ia.max(ib));
        let (head, tail) = self.tiles.split_at_mut(hi);
        let (first, second) = (&mut head[lo], &mut tail[0]);
        if ia < ib {
            Ok(Some((first, second)))
        } else {
            Ok(Some((second, first)))
        }
    }

    /// Places a tile state directly, for scenario setup.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfBounds`] for an off-board coordinate and
    /// [`GameError::InvalidHealth`] unless
    /// `CAPTURE_THRESHOLD < health <= MAX_HEALTH`.
    pub fn place(&mut self, coord: TileCoord, owner: Faction, health: f64) -> GameResult<()> {
        if !(health > CAPTURE_THRESHOLD && health <= MAX_HEALTH) {
            return Err(GameError::InvalidHealth(health));
        }
        let tile = self.tile_mut(coord)?;
        tile.set_owner(owner);
        tile.set_health(health);
        Ok(())
    }

    /// Iterates over all tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Returns the tiles owned by `faction`, row-major.
    #[must_use]
    pub fn team_tiles(&self, faction: Faction) -> Vec<&Tile> {
        self.tiles.iter().filter(|t| t.owner() == faction).collect()
    }

    /// Number of tiles owned by `faction`.
    #[must_use]
    pub fn team_count(&self, faction: Faction) -> usize {
        self.tiles.iter().filter(|t| t.owner() == faction).count()
    }

    /// Returns the winning human faction once the other holds no tiles.
    ///
    /// `None` while both `Player1` and `Player2` own at least one tile. The
    /// Bot's holdings never matter.
    #[must_use]
    pub fn winner(&self) -> Option<Faction> {
        let p1_alive = self.tiles.iter().any(|t| t.owner() == Faction::Player1);
        let p2_alive = self.tiles.iter().any(|t| t.owner() == Faction::Player2);
        match (p1_alive, p2_alive) {
            (true, true) => None,
            (true, false) => Some(Faction::Player1),
            (false, _) => Some(Faction::Player2),
        }
    }
}
