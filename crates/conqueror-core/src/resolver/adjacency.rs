//! Reach between tiles.
//!
//! Tiles interact within Manhattan distance 1. Once a faction owns at least
//! the configured threshold of tiles (35 by default) its reach grows to 2.

use crate::board::Board;
use crate::faction::Faction;
use crate::tile::TileCoord;

/// Reach of a faction below the extended-range threshold.
pub const BASE_ATTACK_RANGE: u32 = 1;

/// Reach of a faction at or above the extended-range threshold.
pub const EXTENDED_ATTACK_RANGE: u32 = 2;

/// Manhattan reach of `faction` on `board`.
#[must_use]
pub fn attack_range(board: &Board, faction: Faction, threshold: usize) -> u32 {
    if board.team_count(faction) >= threshold {
        EXTENDED_ATTACK_RANGE
    } else {
        BASE_ATTACK_RANGE
    }
}

/// Returns true if `target` is within the reach of `from`'s owner.
///
/// Both coordinates are assumed to be on the board; off-board input yields
/// `false`.
#[must_use]
pub fn in_range(board: &Board, from: TileCoord, target: TileCoord, threshold: usize) -> bool {
    let Ok(tile) = board.tile(from) else {
        return false;
    };
    if !board.contains(target) {
        return false;
    }
    from.manhattan_distance(target) <= attack_range(board, tile.owner(), threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_EXTENDED_RANGE_THRESHOLD;

    const THRESHOLD: usize = DEFAULT_EXTENDED_RANGE_THRESHOLD;

    #[test]
    fn orthogonal_neighbours_are_in_range() {
        let board = Board::new(10, 10).unwrap();
        let origin = TileCoord::new(0, 0);
        assert!(in_range(&board, origin, TileCoord::new(1, 0), THRESHOLD));
        assert!(in_range(&board, origin, TileCoord::new(0, 1), THRESHOLD));
    }

    #[test]
    fn diagonals_are_out_of_base_range() {
        let board = Board::new(10, 10).unwrap();
        assert!(!in_range(&board, TileCoord::new(0, 0), TileCoord::new(1, 1), THRESHOLD));
        assert!(!in_range(&board, TileCoord::new(0, 0), TileCoord::new(2, 0), THRESHOLD));
    }

    #[test]
    fn large_empire_reaches_two() {
        let mut board = Board::new(10, 10).unwrap();
        // Give Player1 rows 0..=3 minus one cell: 39 tiles.
        for y in 0..4 {
            for x in 0..10 {
                if (x, y) != (9, 3) {
                    board.place(TileCoord::new(x, y), Faction::Player1, 80.0).unwrap();
                }
            }
        }
        assert!(board.team_count(Faction::Player1) >= THRESHOLD);
        assert_eq!(attack_range(&board, Faction::Player1, THRESHOLD), EXTENDED_ATTACK_RANGE);
        assert!(in_range(&board, TileCoord::new(0, 3), TileCoord::new(1, 4), THRESHOLD));
        assert!(in_range(&board, TileCoord::new(0, 3), TileCoord::new(0, 5), THRESHOLD));
        assert!(!in_range(&board, TileCoord::new(0, 3), TileCoord::new(0, 6), THRESHOLD));
    }

    #[test]
    fn threshold_is_inclusive() {
        let board = Board::new(10, 10).unwrap();
        assert_eq!(attack_range(&board, Faction::Player1, 1), EXTENDED_ATTACK_RANGE);
        assert_eq!(attack_range(&board, Faction::Player1, 2), BASE_ATTACK_RANGE);
    }

    #[test]
    fn off_board_is_never_in_range() {
        let board = Board::new(10, 10).unwrap();
        assert!(!in_range(&board, TileCoord::new(9, 9), TileCoord::new(10, 9), THRESHOLD));
        assert!(!in_range(&board, TileCoord::new(10, 9), TileCoord::new(9, 9), THRESHOLD));
    }
}
