//! Error types for the game engine.
//!
//! Nothing here is fatal to a match. Out-of-bounds input is inert and bad
//! configuration is caught before a [`Game`](crate::Game) exists. Illegal
//! selections are not errors at all; they are reported as
//! [`IllegalSelection`](crate::IllegalSelection) outcomes.

use thiserror::Error;

/// Errors returned by fallible engine operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    /// A coordinate lies outside the board.
    #[error("tile ({x}, {y}) is outside the {width}x{height} board")]
    OutOfBounds {
        /// Requested column.
        x: u32,
        /// Requested row.
        y: u32,
        /// Board width.
        width: u32,
        /// Board height.
        height: u32,
    },

    /// A stored health value would break the tile health invariant.
    #[error("health {0} must be above the capture threshold and at most the maximum")]
    InvalidHealth(f64),

    /// The game configuration cannot produce a playable board.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used across the crate.
pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_message_names_coordinates() {
        let err = GameError::OutOfBounds {
            x: 12,
            y: 3,
            width: 10,
            height: 10,
        };
        assert_eq!(err.to_string(), "tile (12, 3) is outside the 10x10 board");
    }
}
