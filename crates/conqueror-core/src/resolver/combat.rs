//! Combat resolver: first-attack override, weighted lottery, damage and
//! capture.
//!
//! # Processing Order
//!
//! 1. If the attacker's faction still holds its first-attack bonus, the
//!    attacker wins outright and the bonus is spent
//! 2. Otherwise each side's net power is `territorial_power * health`, and a
//!    uniform draw in `[0, attacker_net + defender_net)` decides the winner:
//!    the attacker wins iff the draw lands below `attacker_net`
//! 3. The loser takes `(health / 2) * DAMAGE_MODIFIERS[(winner, loser)]`
//! 4. If that leaves the loser at or below the capture threshold, the loser
//!    joins the winner's faction at full health
//!
//! Note that the defender can win. When it does, the attacking tile is the
//! one that takes damage and can be captured.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::Board;
use crate::error::GameResult;
use crate::event::CombatEvent;
use crate::faction::FactionSet;
use crate::tile::{TileCoord, TileLabel};

/// How the winner of an attack was decided.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CombatRoll {
    /// The attacker spent its faction's guaranteed first-attack win.
    FirstAttack,
    /// The power-weighted lottery was drawn.
    Weighted {
        /// Attacker's territorial power times health.
        attacker_net: f64,
        /// Defender's territorial power times health.
        defender_net: f64,
        /// Uniform draw in `[0, attacker_net + defender_net)`.
        draw: f64,
    },
}

impl CombatRoll {
    /// Returns true if the attacker won.
    #[must_use]
    pub fn attacker_won(&self) -> bool {
        match *self {
            Self::FirstAttack => true,
            Self::Weighted {
                attacker_net, draw, ..
            } => draw < attacker_net,
        }
    }

    /// Attacker's win probability, in `[0, 1]`.
    #[must_use]
    pub fn attacker_chance(&self) -> f64 {
        match *self {
            Self::FirstAttack => 1.0,
            Self::Weighted {
                attacker_net,
                defender_net,
                ..
            } => win_probability(attacker_net, defender_net),
        }
    }

    /// Defender's win probability, in `[0, 1]`.
    #[must_use]
    pub fn defender_chance(&self) -> f64 {
        match *self {
            Self::FirstAttack => 0.0,
            Self::Weighted {
                attacker_net,
                defender_net,
                ..
            } => win_probability(defender_net, attacker_net),
        }
    }
}

/// Probability that a side with `own` net power beats one with `other`.
#[must_use]
pub fn win_probability(own: f64, other: f64) -> f64 {
    let total = own + other;
    if total > 0.0 {
        own / total
    } else {
        0.0
    }
}

/// Everything that happened during one attack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatReport {
    /// Attacking tile as it was before the attack.
    pub attacker: TileLabel,
    /// Defending tile as it was before the attack.
    pub defender: TileLabel,
    /// How the winner was decided.
    pub roll: CombatRoll,
    /// Damage dealt to the loser before snapping.
    pub damage: f64,
    /// Loser's health after the attack (full health if captured).
    pub loser_health: f64,
    /// Whether the loser changed hands.
    pub captured: bool,
    /// Events in the order they happened.
    pub events: Vec<CombatEvent>,
}

impl CombatReport {
    /// Returns true if the attacker won.
    #[must_use]
    pub fn attacker_won(&self) -> bool {
        self.roll.attacker_won()
    }

    /// The winning tile, labelled as it was before the attack.
    #[must_use]
    pub fn winner(&self) -> TileLabel {
        if self.attacker_won() {
            self.attacker
        } else {
            self.defender
        }
    }

    /// The losing tile, labelled as it was before the attack.
    #[must_use]
    pub fn loser(&self) -> TileLabel {
        if self.attacker_won() {
            self.defender
        } else {
            self.attacker
        }
    }
}

/// Resolver for attacks between hostile tiles.
///
/// # Example
///
/// ```
/// use conqueror_core::{Board, Faction, FactionSet, TileCoord};
/// use conqueror_core::resolver::CombatResolver;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut board = Board::new(10, 10).unwrap();
/// let mut spent = FactionSet::empty();
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
///
/// let report = CombatResolver::new()
///     .resolve(&mut board, &mut spent, TileCoord::new(0, 0), TileCoord::new(1, 0), &mut rng)
///     .unwrap();
///
/// assert!(report.attacker_won());
/// assert!(spent.has(Faction::Player1));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CombatResolver;

impl CombatResolver {
    /// Creates a new combat resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Net power of the tile at `coord`: territorial power times health.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfBounds`](crate::GameError::OutOfBounds) if
    /// `coord` is off the board.
    pub fn net_power(board: &Board, coord: TileCoord) -> GameResult<f64> {
        let health = board.tile(coord)?.health();
        Ok(board.territorial_power(coord)? * health)
    }

    /// Draws the weighted lottery between two net powers.
    pub fn roll<R: Rng + ?Sized>(attacker_net: f64, defender_net: f64, rng: &mut R) -> CombatRoll {
        let draw = rng.gen::<f64>() * (attacker_net + defender_net);
        CombatRoll::Weighted {
            attacker_net,
            defender_net,
            draw,
        }
    }

    /// Resolves an attack from `attacker` on `defender`, mutating `board`.
    ///
    /// `spent_first_attacks` records which factions have used their
    /// guaranteed win; the attacker's faction is added if it had not.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfBounds`](crate::GameError::OutOfBounds) if
    /// either coordinate is off the board. The board is untouched in that case.
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        board: &mut Board,
        spent_first_attacks: &mut FactionSet,
        attacker: TileCoord,
        defender: TileCoord,
        rng: &mut R,
    ) -> GameResult<CombatReport> {
        let attacker_label = board.tile(attacker)?.label();
        let defender_label = board.tile(defender)?.label();
        let mut events = Vec::with_capacity(3);

        let roll = if attacker_label.owner.is_human()
            && spent_first_attacks.mark(attacker_label.owner)
        {
            events.push(CombatEvent::FirstAttack {
                attacker: attacker_label,
            });
            CombatRoll::FirstAttack
        } else {
            let attacker_net = Self::net_power(board, attacker)?;
            let defender_net = Self::net_power(board, defender)?;
            let roll = Self::roll(attacker_net, defender_net, rng);
            events.push(CombatEvent::PowerCompared {
                attacker: attacker_label,
                attacker_net,
                defender: defender_label,
                defender_net,
            });
            let (winner, chance) = if roll.attacker_won() {
                (attacker_label, roll.attacker_chance())
            } else {
                (defender_label, roll.defender_chance())
            };
            events.push(CombatEvent::Victory {
                winner,
                chance: chance * 100.0,
            });
            roll
        };

        let (winner, loser) = if roll.attacker_won() {
            (attacker_label, defender_label)
        } else {
            (defender_label, attacker_label)
        };
        let hit = board.tile_mut(loser.coord)?.receive_attack(winner.owner);
        debug!(
            winner = %winner,
            loser = %loser,
            damage = hit.damage,
            remaining = hit.remaining,
            "combat damage applied"
        );

        if hit.captured {
            info!(winner = %winner, loser = %loser, "tile captured");
            events.push(CombatEvent::Captured { winner, loser });
        }

        Ok(CombatReport {
            attacker: attacker_label,
            defender: defender_label,
            roll,
            damage: hit.damage,
            loser_health: hit.remaining,
            captured: hit.captured,
            events,
        })
    }
}
