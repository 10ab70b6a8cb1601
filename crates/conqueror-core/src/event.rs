//! Combat events.
//!
//! The combat resolver records what happened as a list of [`CombatEvent`]s
//! rather than writing status text directly. The game turns them into the
//! status message; tests and the server can inspect them as data.
//!
//! Each event's `Display` output is the exact line shown to players.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tile::TileLabel;

/// Something that happened while resolving one attack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// The attacker spent its faction's guaranteed first-attack win.
    FirstAttack {
        /// Attacking tile.
        attacker: TileLabel,
    },
    /// Net powers were compared for the weighted lottery.
    PowerCompared {
        /// Attacking tile.
        attacker: TileLabel,
        /// Attacker's territorial power times health.
        attacker_net: f64,
        /// Defending tile.
        defender: TileLabel,
        /// Defender's territorial power times health.
        defender_net: f64,
    },
    /// The lottery was decided.
    Victory {
        /// Winning tile.
        winner: TileLabel,
        /// Winner's share of the combined net power, in percent.
        chance: f64,
    },
    /// The losing tile dropped to zero health and changed hands.
    Captured {
        /// Winning tile.
        winner: TileLabel,
        /// Losing tile, labelled with its owner before the capture.
        loser: TileLabel,
    },
}

impl CombatEvent {
    /// Returns true if the event starts a fresh status message rather than
    /// appending to the previous one.
    #[must_use]
    pub const fn starts_message(&self) -> bool {
        matches!(self, Self::FirstAttack { .. } | Self::PowerCompared { .. })
    }
}

impl fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstAttack { attacker } => write!(f, "{attacker} wins the first attack!"),
            Self::PowerCompared {
                attacker,
                attacker_net,
                defender,
                defender_net,
            } => write!(
                f,
                "{attacker} net power: {attacker_net:.2}, {defender} net power: {defender_net:.2}"
            ),
            Self::Victory { winner, chance } => {
                write!(f, "{winner} wins with {chance:.2}% chance!")
            }
            Self::Captured { winner, loser } => write!(f, "{winner} captured {loser}!"),
        }
    }
}
