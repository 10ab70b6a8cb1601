//! Resolver module: the rules that turn a validated tile pair into a board
//! mutation.
//!
//! Resolution is split in two:
//! - [`adjacency`]: whether a tile can reach another (range grows with the
//!   size of the attacker's empire)
//! - [`CombatResolver`]: first-attack override, the power-weighted lottery,
//!   damage and capture
//!
//! # Invariants
//!
//! - Resolvers never leave a tile at or below the capture threshold; a hit
//!   that would do so transfers ownership and restores full health in the
//!   same call
//! - Given the same board, flags and RNG state, resolution is deterministic
//! - Resolvers do not validate turn order or faction legality; callers route
//!   only hostile, adjacent, human-initiated pairs here

pub mod adjacency;
mod combat;

pub use adjacency::{attack_range, in_range, BASE_ATTACK_RANGE, EXTENDED_ATTACK_RANGE};
pub use combat::{win_probability, CombatReport, CombatResolver, CombatRoll};
