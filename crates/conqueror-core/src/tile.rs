//! Tile module: the single board cell.
//!
//! A tile has an immutable coordinate, an owning [`Faction`] and a health
//! value. Health lives in `(CAPTURE_THRESHOLD, MAX_HEALTH]` whenever a tile is
//! observable: any hit that would leave it at or below the threshold captures
//! the tile in the same call, restoring full health under the new owner.
//!
//! # Example
//!
//! ```
//! use conqueror_core::{Faction, Tile, TileCoord, MAX_HEALTH};
//!
//! let tile = Tile::new(TileCoord::new(3, 4), Faction::Bot);
//! assert_eq!(tile.to_string(), "Bot (3, 4)");
//! assert!((tile.health() - MAX_HEALTH).abs() < f64::EPSILON);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::faction::Faction;

/// Full health of a tile, in engine units.
pub const MAX_HEALTH: f64 = 80.0;

/// Health at or below which a tile is captured.
pub const CAPTURE_THRESHOLD: f64 = 10.0;

/// Clamps a raw health value into `[0, MAX_HEALTH]`, snapping anything at or
/// below [`CAPTURE_THRESHOLD`] to exactly zero.
///
/// # Example
///
/// ```
/// use conqueror_core::tile::snap_health;
///
/// assert!((snap_health(40.0) - 40.0).abs() < f64::EPSILON);
/// assert!(snap_health(10.0).abs() < f64::EPSILON);
/// assert!((snap_health(120.0) - 80.0).abs() < f64::EPSILON);
/// ```
#[must_use]
pub fn snap_health(raw: f64) -> f64 {
    let clamped = raw.clamp(0.0, MAX_HEALTH);
    if clamped <= CAPTURE_THRESHOLD {
        0.0
    } else {
        clamped
    }
}

/// Grid coordinate of a tile.
///
/// Coordinates are ordered row-major (`y` first, then `x`), which is the
/// iteration order of every board query.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    /// Column, counted from the left edge.
    pub x: u32,
    /// Row, counted from the top edge.
    pub y: u32,
}

impl TileCoord {
    /// Creates a coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to `other`.
    #[must_use]
    pub const fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl Ord for TileCoord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for TileCoord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileCoord({}, {})", self.x, self.y)
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(u32, u32)> for TileCoord {
    fn from((x, y): (u32, u32)) -> Self {
        Self::new(x, y)
    }
}

/// A tile as it appears in messages: owner plus coordinate.
///
/// Captured before a mutation so messages can name the tile as it was.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLabel {
    /// Owner at the time the label was taken.
    pub owner: Faction,
    /// Tile coordinate.
    pub coord: TileCoord,
}

impl fmt::Display for TileLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.owner, self.coord)
    }
}

/// Result of a single hit on a tile.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Hit {
    /// Damage dealt before snapping.
    pub damage: f64,
    /// Health left on the tile after the hit (full health after a capture).
    pub remaining: f64,
    /// Whether the hit captured the tile.
    pub captured: bool,
}

/// A single board cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    coord: TileCoord,
    owner: Faction,
    health: f64,
}

impl Tile {
    /// Creates a tile at full health.
    #[must_use]
    pub fn new(coord: TileCoord, owner: Faction) -> Self {
        Self {
            coord,
            owner,
            health: MAX_HEALTH,
        }
    }

    /// Returns the tile coordinate.
    #[must_use]
    pub const fn coord(&self) -> TileCoord {
        self.coord
    }

    /// Returns the owning faction.
    #[must_use]
    pub const fn owner(&self) -> Faction {
        self.owner
    }

    /// Returns current health.
    #[must_use]
    pub fn health(&self) -> f64 {
        self.health
    }

    /// Returns the owner/coordinate label used in messages.
    #[must_use]
    pub const fn label(&self) -> TileLabel {
        TileLabel {
            owner: self.owner,
            coord: self.coord,
        }
    }

    pub(crate) fn set_owner(&mut self, owner: Faction) {
        self.owner = owner;
    }

    pub(crate) fn set_health(&mut self, health: f64) {
        self.health = health;
    }

    /// Applies a losing-side hit dealt by `winner`.
    ///
    /// Damage is half the current health scaled by the faction-pair modifier.
    /// If the result snaps to zero, ownership passes to `winner` and health
    /// resets to [`MAX_HEALTH`] before returning.
    pub(crate) fn receive_attack(&mut self, winner: Faction) -> Hit {
        let modifier = Faction::damage_modifier(winner, self.owner);
        let damage = (self.health / 2.0) * modifier;
        let remaining = snap_health(self.health - damage);

        if remaining > 0.0 {
            self.health = remaining;
            Hit {
                damage,
                remaining,
                captured: false,
            }
        } else {
            self.owner = winner;
            self.health = MAX_HEALTH;
            Hit {
                damage,
                remaining: MAX_HEALTH,
                captured: true,
            }
        }
    }

    /// Exchanges health values with `other`, leaving ownership untouched.
    pub(crate) fn swap_health(&mut self, other: &mut Tile) {
        std::mem::swap(&mut self.health, &mut other.health);
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.label().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn coords_order_row_major() {
        let mut coords = vec![
            TileCoord::new(1, 1),
            TileCoord::new(0, 1),
            TileCoord::new(2, 0),
        ];
        coords.sort();
        assert_eq!(
            coords,
            vec![TileCoord::new(2, 0), TileCoord::new(0, 1), TileCoord::new(1, 1)]
        );
    }

    #[test]
    fn manhattan_distance_is_symmetric() {
        let a = TileCoord::new(2, 5);
        let b = TileCoord::new(4, 4);
        assert_eq!(a.manhattan_distance(b), 3);
        assert_eq!(b.manhattan_distance(a), 3);
    }

    #[test]
    fn snap_clamps_and_zeroes() {
        assert!(approx(snap_health(-5.0), 0.0));
        assert!(approx(snap_health(10.5), 10.5));
        assert!(approx(snap_health(9.99), 0.0));
        assert!(approx(snap_health(200.0), MAX_HEALTH));
    }

    #[test]
    fn bot_tile_halves_under_human_attack() {
        let mut tile = Tile::new(TileCoord::new(1, 0), Faction::Bot);
        let hit = tile.receive_attack(Faction::Player1);
        assert!(!hit.captured);
        assert!(approx(hit.damage, 40.0));
        assert!(approx(tile.health(), 40.0));
        assert_eq!(tile.owner(), Faction::Bot);
    }

    #[test]
    fn bot_tile_captured_on_third_hit() {
        let mut tile = Tile::new(TileCoord::new(1, 0), Faction::Bot);
        tile.receive_attack(Faction::Player1); // 40
        tile.receive_attack(Faction::Player1); // 20
        let hit = tile.receive_attack(Faction::Player1); // 10 -> snap
        assert!(hit.captured);
        assert_eq!(tile.owner(), Faction::Player1);
        assert!(approx(tile.health(), MAX_HEALTH));
    }

    #[test]
    fn human_versus_human_captures_in_one_hit() {
        let mut tile = Tile::new(TileCoord::new(9, 9), Faction::Player2);
        let hit = tile.receive_attack(Faction::Player1);
        assert!(hit.captured);
        assert_eq!(tile.owner(), Faction::Player1);
        assert!(approx(tile.health(), MAX_HEALTH));
    }

    #[test]
    fn bot_hits_back_at_half_strength() {
        let mut tile = Tile::new(TileCoord::new(0, 0), Faction::Player1);
        tile.receive_attack(Faction::Bot);
        assert!(approx(tile.health(), 60.0));
    }

    #[test]
    fn swap_exchanges_health_only() {
        let mut a = Tile::new(TileCoord::new(0, 0), Faction::Player1);
        let mut b = Tile::new(TileCoord::new(0, 1), Faction::Player1);
        a.set_health(30.0);
        a.swap_health(&mut b);
        assert!(approx(a.health(), MAX_HEALTH));
        assert!(approx(b.health(), 30.0));
        assert_eq!(a.coord(), TileCoord::new(0, 0));
    }

    #[test]
    fn display_names_owner_and_coord() {
        let tile = Tile::new(TileCoord::new(9, 9), Faction::Player2);
        assert_eq!(tile.to_string(), "Player2 (9, 9)");
    }
}
