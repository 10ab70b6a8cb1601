//! Cross-module tests for the match engine.
//!
//! - **Scenario tests**: hand-built boards that pin exact outcomes
//! - **Determinism tests**: same seed and same input give the same match
//! - **Invariant tests**: property checks over random selection sequences
//!
//! # Test Structure
//!
//! - `scenarios.rs`: end-to-end selections through [`Game`](crate::Game)
//! - `determinism.rs`: seeded replays and lottery convergence
//! - `invariants.rs`: proptest suites for health, turn and winner rules
//! - `helpers.rs`: board and game factories

mod helpers;

pub use helpers::*;
