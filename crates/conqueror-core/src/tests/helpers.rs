//! Factories for boards and games used across the test suites.

use rand::rngs::mock::StepRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::board::Board;
use crate::config::GameConfig;
use crate::faction::Faction;
use crate::game::{Game, SelectionOutcome};
use crate::tile::TileCoord;

// =============================================================================
// Boards
// =============================================================================

/// Builds a `width` x `height` board and applies `placements` on top of the
/// default layout.
pub fn board_with(width: u32, height: u32, placements: &[((u32, u32), Faction, f64)]) -> Board {
    let mut board = Board::new(width, height).unwrap();
    for &(coord, owner, health) in placements {
        board.place(coord.into(), owner, health).unwrap();
    }
    board
}

// =============================================================================
// Games
// =============================================================================

/// Default 10x10 match with a fixed seed.
pub fn seeded_game(seed: u64) -> Game {
    Game::new(GameConfig::seeded(seed)).unwrap()
}

/// Match on `board` with a seeded ChaCha8 stream.
pub fn game_on(board: Board, seed: u64) -> Game {
    Game::from_board(
        GameConfig::seeded(seed),
        board,
        ChaCha8Rng::seed_from_u64(seed),
    )
    .unwrap()
}

/// Match on `board` whose lottery draws are always 0.0, so attackers win
/// every weighted roll they have any power in.
pub fn attacker_favoured_game(board: Board) -> Game<StepRng> {
    Game::from_board(GameConfig::default(), board, StepRng::new(0, 0)).unwrap()
}

/// Match on `board` whose lottery draws sit just below 1.0, so defenders win
/// every weighted roll they have any power in.
pub fn defender_favoured_game(board: Board) -> Game<StepRng> {
    Game::from_board(GameConfig::default(), board, StepRng::new(u64::MAX, 0)).unwrap()
}

// =============================================================================
// Input
// =============================================================================

/// Selects `first` then `second`, returning the outcome of the second.
pub fn play<R: rand::RngCore>(
    game: &mut Game<R>,
    first: (u32, u32),
    second: (u32, u32),
) -> SelectionOutcome {
    game.select(TileCoord::from(first));
    game.select(TileCoord::from(second))
}

/// A fixed opening where both players chew through the Bot next to their
/// bases, alternating turns.
pub fn scripted_opening() -> Vec<((u32, u32), (u32, u32))> {
    vec![
        ((0, 0), (1, 0)),
        ((9, 9), (8, 9)),
        ((0, 0), (0, 1)),
        ((9, 9), (9, 8)),
        ((0, 0), (1, 0)),
        ((9, 9), (8, 9)),
        ((0, 0), (0, 1)),
        ((9, 9), (9, 8)),
        ((0, 0), (1, 0)),
        ((9, 9), (8, 9)),
        ((0, 0), (0, 1)),
        ((9, 9), (9, 8)),
    ]
}

/// Health of the tile at `(x, y)`.
pub fn health_at<R: rand::RngCore>(game: &Game<R>, x: u32, y: u32) -> f64 {
    game.board().get_tile(x, y).unwrap().health()
}

/// Owner of the tile at `(x, y)`.
pub fn owner_at<R: rand::RngCore>(game: &Game<R>, x: u32, y: u32) -> Faction {
    game.board().get_tile(x, y).unwrap().owner()
}

/// Float comparison for health and power values.
pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
