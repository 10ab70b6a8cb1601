//! Ownership tags for tiles.
//!
//! There are exactly three factions: the two human players and the neutral
//! Bot that owns every unclaimed tile. Bot tiles can be attacked but never
//! initiate an attack, and Bot never takes a turn.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A tile owner.
///
/// # Example
///
/// ```
/// use conqueror_core::Faction;
///
/// assert!(Faction::Player1.is_human());
/// assert!(!Faction::Bot.is_human());
/// assert_eq!(Faction::Player1.rival(), Faction::Player2);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Faction {
    /// First human player, based in the top-left corner.
    Player1,
    /// Second human player, based in the bottom-right corner.
    Player2,
    /// Neutral faction owning all unclaimed territory.
    Bot,
}

/// Damage multipliers keyed by `[winner][loser]`, indexed with [`Faction::index`].
///
/// Human conflict is the most lethal; the Bot hits back at half strength and
/// tiles never damage their own faction.
pub const DAMAGE_MODIFIERS: [[f64; 3]; 3] = [
    // loser:  Player1, Player2, Bot
    [0.0, 2.0, 1.0], // winner Player1
    [2.0, 0.0, 1.0], // winner Player2
    [0.5, 0.5, 0.0], // winner Bot
];

impl Faction {
    /// The two factions that take turns.
    pub const HUMANS: [Faction; 2] = [Faction::Player1, Faction::Player2];

    /// All factions in table order.
    pub const ALL: [Faction; 3] = [Faction::Player1, Faction::Player2, Faction::Bot];

    /// Returns the row/column of this faction in [`DAMAGE_MODIFIERS`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Player1 => 0,
            Self::Player2 => 1,
            Self::Bot => 2,
        }
    }

    /// Returns true for `Player1` and `Player2`.
    #[must_use]
    pub const fn is_human(self) -> bool {
        !matches!(self, Self::Bot)
    }

    /// Returns the opposing human faction. Bot has no rival and maps to itself.
    #[must_use]
    pub const fn rival(self) -> Self {
        match self {
            Self::Player1 => Self::Player2,
            Self::Player2 => Self::Player1,
            Self::Bot => Self::Bot,
        }
    }

    /// Looks up the damage multiplier applied to `loser` when `winner` wins.
    #[must_use]
    pub fn damage_modifier(winner: Self, loser: Self) -> f64 {
        DAMAGE_MODIFIERS[winner.index()][loser.index()]
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player1 => write!(f, "Player1"),
            Self::Player2 => write!(f, "Player2"),
            Self::Bot => write!(f, "Bot"),
        }
    }
}

bitflags::bitflags! {
    /// A set of factions, used to track which first-attack bonuses are spent.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct FactionSet: u8 {
        /// `Player1` is in the set.
        const PLAYER1 = 1 << 0;
        /// `Player2` is in the set.
        const PLAYER2 = 1 << 1;
        /// `Bot` is in the set.
        const BOT = 1 << 2;
    }
}

impl From<Faction> for FactionSet {
    fn from(faction: Faction) -> Self {
        match faction {
            Faction::Player1 => Self::PLAYER1,
            Faction::Player2 => Self::PLAYER2,
            Faction::Bot => Self::BOT,
        }
    }
}

impl FactionSet {
    /// Returns true if `faction` is a member.
    #[must_use]
    pub fn has(self, faction: Faction) -> bool {
        self.contains(Self::from(faction))
    }

    /// Adds `faction`, returning true if it was not already present.
    pub fn mark(&mut self, faction: Faction) -> bool {
        let flag = Self::from(faction);
        let fresh = !self.contains(flag);
        self.insert(flag);
        fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::float_cmp)]
    fn damage_table_matches_rules() {
        use Faction::{Bot, Player1, Player2};

        assert_eq!(Faction::damage_modifier(Player1, Bot), 1.0);
        assert_eq!(Faction::damage_modifier(Player2, Bot), 1.0);
        assert_eq!(Faction::damage_modifier(Bot, Player1), 0.5);
        assert_eq!(Faction::damage_modifier(Bot, Player2), 0.5);
        assert_eq!(Faction::damage_modifier(Player1, Player2), 2.0);
        assert_eq!(Faction::damage_modifier(Player2, Player1), 2.0);
        for faction in Faction::ALL {
            assert_eq!(Faction::damage_modifier(faction, faction), 0.0);
        }
    }

    #[test]
    fn rival_swaps_humans_only() {
        assert_eq!(Faction::Player1.rival(), Faction::Player2);
        assert_eq!(Faction::Player2.rival(), Faction::Player1);
        assert_eq!(Faction::Bot.rival(), Faction::Bot);
    }

    #[test]
    fn faction_set_mark_reports_first_insert() {
        let mut set = FactionSet::empty();
        assert!(set.mark(Faction::Player1));
        assert!(!set.mark(Faction::Player1));
        assert!(set.has(Faction::Player1));
        assert!(!set.has(Faction::Player2));
    }

    #[test]
    fn faction_serializes_as_name() {
        let json = serde_json::to_string(&Faction::Player2).unwrap();
        assert_eq!(json, "\"Player2\"");
    }
}
