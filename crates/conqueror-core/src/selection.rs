//! Selection module: the two-slot queue and the decision it feeds.
//!
//! Players act by selecting two tiles in a row. The first is the acting
//! tile, the second its target. Once both slots are filled the pair is
//! classified exactly once into a [`SelectionAction`]:
//!
//! | Facts about the pair                          | Action            |
//! |-----------------------------------------------|-------------------|
//! | same tile twice                               | `Reject(SelfPair)` |
//! | acting tile owned by Bot                      | `Reject(BotAttacker)` |
//! | acting tile's owner is not on turn            | `Reject(WrongTurn)` |
//! | target out of reach                           | `Reject(NotAdjacent)` |
//! | same owner, in reach                          | `Swap`            |
//! | different owner, in reach                     | `Combat`          |
//!
//! The checks run in that order, so a wrong-turn pair is reported as such
//! even when it is also out of reach.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::Board;
use crate::error::GameResult;
use crate::faction::Faction;
use crate::resolver::in_range;
use crate::tile::TileCoord;

/// Why a full selection was thrown away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum IllegalSelection {
    /// The same tile was selected twice.
    #[error("cannot target the selected tile itself")]
    SelfPair,
    /// The acting tile belongs to the Bot, which never initiates.
    #[error("bot tiles cannot attack")]
    BotAttacker,
    /// The acting tile's owner is not the faction on turn.
    #[error("Not your turn!")]
    WrongTurn {
        /// Faction whose turn it is.
        expected: Faction,
        /// Owner of the acting tile.
        actual: Faction,
    },
    /// The target is outside the acting faction's reach.
    #[error("target is out of reach")]
    NotAdjacent,
}

impl IllegalSelection {
    /// Returns true if the rejection is announced in the status message.
    ///
    /// Only wrong-turn selections are; the rest are dropped silently.
    #[must_use]
    pub const fn is_announced(&self) -> bool {
        matches!(self, Self::WrongTurn { .. })
    }
}

/// What a full selection resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionAction {
    /// Clear the queue without touching the board.
    Reject(IllegalSelection),
    /// Exchange health between two tiles of the same faction.
    Swap,
    /// Attack a hostile tile.
    Combat,
}

/// Classifies a full selection.
///
/// # Errors
///
/// Returns [`GameError::OutOfBounds`](crate::GameError::OutOfBounds) if
/// either coordinate is off the board.
pub fn classify(
    board: &Board,
    turn: Faction,
    first: TileCoord,
    second: TileCoord,
    extended_range_threshold: usize,
) -> GameResult<SelectionAction> {
    let actor = board.tile(first)?.owner();
    let target = board.tile(second)?.owner();

    if first == second {
        return Ok(SelectionAction::Reject(IllegalSelection::SelfPair));
    }
    if actor == Faction::Bot {
        return Ok(SelectionAction::Reject(IllegalSelection::BotAttacker));
    }
    if actor != turn {
        return Ok(SelectionAction::Reject(IllegalSelection::WrongTurn {
            expected: turn,
            actual: actor,
        }));
    }
    if !in_range(board, first, second, extended_range_threshold) {
        return Ok(SelectionAction::Reject(IllegalSelection::NotAdjacent));
    }
    if actor == target {
        Ok(SelectionAction::Swap)
    } else {
        Ok(SelectionAction::Combat)
    }
}

/// Pending selections, capacity two.
///
/// # Example
///
/// ```
/// use conqueror_core::{SelectionQueue, TileCoord};
///
/// let mut queue = SelectionQueue::new();
/// assert!(!queue.push(TileCoord::new(0, 0)));
/// assert!(queue.push(TileCoord::new(1, 0)));
/// assert_eq!(queue.take_pair(), Some((TileCoord::new(0, 0), TileCoord::new(1, 0))));
/// assert!(queue.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionQueue {
    slots: Vec<TileCoord>,
}

impl SelectionQueue {
    /// Capacity of the queue.
    pub const CAPACITY: usize = 2;

    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::with_capacity(Self::CAPACITY),
        }
    }

    /// Adds a selection, returning true once the queue is full.
    ///
    /// Pushing onto a full queue is ignored.
    pub fn push(&mut self, coord: TileCoord) -> bool {
        if self.slots.len() < Self::CAPACITY {
            self.slots.push(coord);
        }
        self.is_full()
    }

    /// Returns true when both slots are filled.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.slots.len() == Self::CAPACITY
    }

    /// Returns true when no tile is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of selected tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Selected tiles in selection order.
    #[must_use]
    pub fn as_slice(&self) -> &[TileCoord] {
        &self.slots
    }

    /// Empties the queue, returning the pair if it was full.
    pub fn take_pair(&mut self) -> Option<(TileCoord, TileCoord)> {
        let pair = match self.slots.as_slice() {
            [first, second] => Some((*first, *second)),
            _ => None,
        };
        if pair.is_some() {
            self.slots.clear();
        }
        pair
    }

    /// Empties the queue.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
