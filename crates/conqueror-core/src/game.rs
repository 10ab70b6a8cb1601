//! Game module: the authoritative match aggregate.
//!
//! [`Game`] owns every piece of mutable match state: the board, the
//! selection queue, whose turn it is, which first-attack bonuses are spent,
//! the status message and the combat RNG. All input flows through it:
//!
//! 1. **ENQUEUE**: a selection is pushed onto the queue (or ignored if it is
//!    off the board, or short-circuited once the match is over)
//! 2. **CLASSIFY**: a full queue is drained and classified once into
//!    `Reject | Swap | Combat`
//! 3. **APPLY**: the swap or combat mutates the board, the status message is
//!    rewritten, and the turn passes to the other player
//!
//! The split between enqueue and resolve lets a front end show both selected
//! tiles before the result lands. [`Game::select`] does both in one call.
//!
//! # Determinism
//!
//! Combat draws come from the injected RNG (ChaCha8 by default). Two games
//! built from the same config and seed, fed the same selections, produce
//! identical snapshots.
//!
//! # Example
//!
//! ```
//! use conqueror_core::{Faction, Game, GameConfig, SelectionOutcome, TileCoord};
//!
//! let mut game = Game::new(GameConfig::seeded(42)).unwrap();
//!
//! // Selecting a Player2 tile on Player1's turn is rejected without mutation.
//! game.select(TileCoord::new(9, 9));
//! let outcome = game.select(TileCoord::new(8, 9));
//! assert!(matches!(outcome, SelectionOutcome::Rejected(_)));
//! assert_eq!(game.turn(), Faction::Player1);
//! assert_eq!(game.message(), "Not your turn!");
//! ```

use std::collections::BTreeMap;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::GameResult;
use crate::faction::{Faction, FactionSet};
use crate::resolver::{CombatReport, CombatResolver};
use crate::selection::{classify, IllegalSelection, SelectionAction, SelectionQueue};
use crate::snapshot::{BoardSnapshot, GameSnapshot, StatusSnapshot};
use crate::status::StatusMessage;
use crate::tile::{TileCoord, TileLabel};

/// What a single selection did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectionOutcome {
    /// Off-board input; nothing changed.
    Ignored,
    /// The tile was queued as the first of a pair.
    Pending(TileCoord),
    /// The queue is full and waiting for [`Game::resolve_pending`].
    Ready,
    /// The pair was thrown away without touching the board.
    Rejected(IllegalSelection),
    /// Two tiles of the same faction exchanged health.
    Swapped {
        /// First selected tile.
        first: TileLabel,
        /// Second selected tile.
        second: TileLabel,
    },
    /// An attack was resolved.
    Combat(CombatReport),
    /// The match is already decided; nothing changed.
    GameOver(Faction),
}

impl SelectionOutcome {
    /// Returns true if the selection executed a swap or an attack.
    #[must_use]
    pub const fn is_executed(&self) -> bool {
        matches!(self, Self::Swapped { .. } | Self::Combat(_))
    }
}

/// The authoritative state of one match.
#[derive(Debug, Clone)]
pub struct Game<R = ChaCha8Rng> {
    config: GameConfig,
    board: Board,
    queue: SelectionQueue,
    turn: Faction,
    spent_first_attacks: FactionSet,
    message: StatusMessage,
    resolver: CombatResolver,
    rng: R,
    moves: u64,
}

impl Game<ChaCha8Rng> {
    /// Starts a match from `config`, seeding ChaCha8 from `config.seed` or
    /// from OS entropy when no seed is set.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfig`](crate::GameError::InvalidConfig)
    /// if the configuration does not describe a playable board.
    pub fn new(config: GameConfig) -> GameResult<Self> {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: RngCore> Game<R> {
    /// Starts a match with a caller-supplied random source.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfig`](crate::GameError::InvalidConfig)
    /// if the configuration does not describe a playable board.
    pub fn with_rng(config: GameConfig, rng: R) -> GameResult<Self> {
        config.validate()?;
        let board = Board::new(config.width, config.height)?;
        Ok(Self::assemble(config, board, rng))
    }

    /// Starts a match on a prepared board, for scenarios and tests.
    ///
    /// The config's dimensions are overwritten with the board's.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfig`](crate::GameError::InvalidConfig)
    /// if the remaining settings are invalid.
    pub fn from_board(mut config: GameConfig, board: Board, rng: R) -> GameResult<Self> {
        config.width = board.width();
        config.height = board.height();
        config.validate()?;
        Ok(Self::assemble(config, board, rng))
    }

    fn assemble(config: GameConfig, board: Board, rng: R) -> Self {
        info!(
            width = config.width,
            height = config.height,
            seed = ?config.seed,
            "match started"
        );
        Self {
            config,
            board,
            queue: SelectionQueue::new(),
            turn: Faction::Player1,
            spent_first_attacks: FactionSet::empty(),
            message: StatusMessage::default(),
            resolver: CombatResolver::new(),
            rng,
            moves: 0,
        }
    }

    /// Match configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Pending selections.
    #[must_use]
    pub fn queue(&self) -> &SelectionQueue {
        &self.queue
    }

    /// Faction whose turn it is.
    #[must_use]
    pub fn turn(&self) -> Faction {
        self.turn
    }

    /// Current status message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Winner, once one human faction has no tiles left.
    #[must_use]
    pub fn winner(&self) -> Option<Faction> {
        self.board.winner()
    }

    /// Returns true if `faction` still holds its guaranteed first-attack win.
    #[must_use]
    pub fn first_attack_available(&self, faction: Faction) -> bool {
        faction.is_human() && !self.spent_first_attacks.has(faction)
    }

    /// Number of swaps and attacks executed so far.
    #[must_use]
    pub fn moves(&self) -> u64 {
        self.moves
    }

    /// Handles a click at pixel position `(px, py)` and resolves the queue if
    /// it fills.
    pub fn click(&mut self, px: i64, py: i64) -> SelectionOutcome {
        let outcome = self.enqueue_pixel(px, py);
        self.finish(outcome)
    }

    /// Selects the tile at `coord` and resolves the queue if it fills.
    pub fn select(&mut self, coord: TileCoord) -> SelectionOutcome {
        let outcome = self.enqueue(coord);
        self.finish(outcome)
    }

    fn finish(&mut self, outcome: SelectionOutcome) -> SelectionOutcome {
        if matches!(outcome, SelectionOutcome::Ready) {
            self.resolve_pending().unwrap_or(outcome)
        } else {
            outcome
        }
    }

    /// Queues the tile under pixel position `(px, py)` without resolving.
    pub fn enqueue_pixel(&mut self, px: i64, py: i64) -> SelectionOutcome {
        if let Some(winner) = self.game_over_guard() {
            return SelectionOutcome::GameOver(winner);
        }
        match self.config.cell_at_pixel(px, py) {
            Some(coord) => self.enqueue(coord),
            None => {
                debug!(px, py, "click outside the board ignored");
                SelectionOutcome::Ignored
            }
        }
    }

    /// Queues `coord` without resolving.
    ///
    /// Returns [`SelectionOutcome::Ready`] once two tiles are queued.
    pub fn enqueue(&mut self, coord: TileCoord) -> SelectionOutcome {
        if let Some(winner) = self.game_over_guard() {
            return SelectionOutcome::GameOver(winner);
        }
        if !self.board.contains(coord) {
            debug!(%coord, "selection outside the board ignored");
            return SelectionOutcome::Ignored;
        }
        if self.queue.push(coord) {
            SelectionOutcome::Ready
        } else {
            SelectionOutcome::Pending(coord)
        }
    }

    /// Drains and resolves a full queue. Returns `None` if fewer than two
    /// tiles are queued.
    pub fn resolve_pending(&mut self) -> Option<SelectionOutcome> {
        let (first, second) = self.queue.take_pair()?;
        Some(self.resolve_pair(first, second))
    }

    /// Classifies the queued pair without resolving it.
    ///
    /// `None` until two tiles are queued.
    #[must_use]
    pub fn pending_action(&self) -> Option<SelectionAction> {
        let &[first, second] = self.queue.as_slice() else {
            return None;
        };
        classify(
            &self.board,
            self.turn,
            first,
            second,
            self.config.extended_range_threshold,
        )
        .ok()
    }

    fn game_over_guard(&mut self) -> Option<Faction> {
        let winner = self.board.winner()?;
        self.queue.clear();
        self.message.set(format!("Game over! Winner: {winner}"));
        Some(winner)
    }

    fn resolve_pair(&mut self, first: TileCoord, second: TileCoord) -> SelectionOutcome {
        let action = match classify(
            &self.board,
            self.turn,
            first,
            second,
            self.config.extended_range_threshold,
        ) {
            Ok(action) => action,
            Err(err) => {
                warn!(%err, "dropping unresolvable selection");
                return SelectionOutcome::Ignored;
            }
        };

        let outcome = match action {
            SelectionAction::Reject(reason) => {
                debug!(%first, %second, ?reason, "selection rejected");
                if reason.is_announced() {
                    self.message.set(reason.to_string());
                }
                return SelectionOutcome::Rejected(reason);
            }
            SelectionAction::Swap => match self.swap(first, second) {
                Ok(outcome) => outcome,
                Err(err) => {
                    warn!(%err, "swap failed");
                    return SelectionOutcome::Ignored;
                }
            },
            SelectionAction::Combat => match self.attack(first, second) {
                Ok(report) => SelectionOutcome::Combat(report),
                Err(err) => {
                    warn!(%err, "attack failed");
                    return SelectionOutcome::Ignored;
                }
            },
        };

        self.moves += 1;
        self.turn = self.turn.rival();
        outcome
    }

    fn swap(&mut self, first: TileCoord, second: TileCoord) -> GameResult<SelectionOutcome> {
        let Some((a, b)) = self.board.pair_mut(first, second)? else {
            return Ok(SelectionOutcome::Rejected(IllegalSelection::SelfPair));
        };
        a.swap_health(b);
        let (first, second) = (a.label(), b.label());
        self.message.set(format!(
            "{} swapped tiles {first} and {second}!",
            first.owner
        ));
        debug!(%first, %second, "health swapped");
        Ok(SelectionOutcome::Swapped { first, second })
    }

    fn attack(&mut self, attacker: TileCoord, defender: TileCoord) -> GameResult<CombatReport> {
        let report = self.resolver.resolve(
            &mut self.board,
            &mut self.spent_first_attacks,
            attacker,
            defender,
            &mut self.rng,
        )?;

        for event in &report.events {
            if event.starts_message() {
                self.message.set(event.to_string());
            } else {
                self.message.append(event.to_string());
            }
        }
        info!(
            attacker = %report.attacker,
            defender = %report.defender,
            attacker_won = report.attacker_won(),
            captured = report.captured,
            "attack resolved"
        );

        if let Some(winner) = self.board.winner() {
            info!(%winner, "match decided");
            self.message.set(format!("Game over! Winner: {winner}"));
        }
        Ok(report)
    }

    /// Message, turn and first-attack flags.
    #[must_use]
    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            message: self.message.as_str().to_owned(),
            turn: self.turn,
            has_attacked: Faction::HUMANS
                .iter()
                .map(|&f| (f, self.spent_first_attacks.has(f)))
                .collect(),
        }
    }

    /// Takes a consistent copy of everything a display client needs.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        let scores: BTreeMap<Faction, usize> = Faction::ALL
            .iter()
            .map(|&f| (f, self.board.team_count(f)))
            .collect();

        GameSnapshot {
            board: BoardSnapshot::from_board(&self.board),
            queue: self.queue.as_slice().to_vec(),
            status: self.status(),
            scores,
            winner: self.board.winner(),
            moves: self.moves,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::INITIAL_MESSAGE;
    use crate::tile::MAX_HEALTH;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    mod creation_tests {
        use super::*;

        #[test]
        fn new_game_starts_with_player1() {
            let game = Game::new(GameConfig::seeded(1)).unwrap();
            assert_eq!(game.turn(), Faction::Player1);
            assert_eq!(game.message(), INITIAL_MESSAGE);
            assert!(game.queue().is_empty());
            assert!(game.first_attack_available(Faction::Player1));
            assert!(game.first_attack_available(Faction::Player2));
            assert!(!game.first_attack_available(Faction::Bot));
            assert_eq!(game.moves(), 0);
        }

        #[test]
        fn invalid_config_rejected() {
            let config = GameConfig {
                tile_size: 0,
                ..GameConfig::default()
            };
            assert!(Game::new(config).is_err());
        }

        #[test]
        fn from_board_adopts_board_dimensions() {
            let board = Board::new(4, 3).unwrap();
            let game = Game::from_board(GameConfig::seeded(1), board, ChaCha8Rng::seed_from_u64(1))
                .unwrap();
            assert_eq!(game.config().width, 4);
            assert_eq!(game.config().height, 3);
        }
    }

    mod enqueue_tests {
        use super::*;

        #[test]
        fn first_selection_is_pending() {
            let mut game = Game::new(GameConfig::seeded(1)).unwrap();
            let outcome = game.select(TileCoord::new(0, 0));
            assert_eq!(outcome, SelectionOutcome::Pending(TileCoord::new(0, 0)));
            assert_eq!(game.queue().as_slice(), &[TileCoord::new(0, 0)]);
        }

        #[test]
        fn enqueue_reports_ready_without_resolving() {
            let mut game = Game::new(GameConfig::seeded(1)).unwrap();
            game.enqueue(TileCoord::new(0, 0));
            assert_eq!(game.enqueue(TileCoord::new(1, 0)), SelectionOutcome::Ready);
            assert_eq!(game.queue().len(), 2);
            assert_eq!(game.turn(), Faction::Player1);

            let outcome = game.resolve_pending().unwrap();
            assert!(outcome.is_executed());
            assert!(game.queue().is_empty());
            assert!(game.resolve_pending().is_none());
        }

        #[test]
        fn click_maps_pixels_to_tiles() {
            let mut game = Game::new(GameConfig::seeded(1)).unwrap();
            assert_eq!(
                game.click(30, 30),
                SelectionOutcome::Pending(TileCoord::new(0, 0))
            );
            let outcome = game.click(90, 10);
            assert!(matches!(outcome, SelectionOutcome::Combat(_)));
        }

        #[test]
        fn pending_action_classifies_without_resolving() {
            let mut game = Game::new(GameConfig::seeded(1)).unwrap();
            assert_eq!(game.pending_action(), None);
            game.enqueue(TileCoord::new(0, 0));
            assert_eq!(game.pending_action(), None);
            game.enqueue(TileCoord::new(1, 0));
            let before = game.snapshot();
            assert_eq!(game.pending_action(), Some(SelectionAction::Combat));
            assert_eq!(game.snapshot(), before);

            game.resolve_pending();
            game.enqueue(TileCoord::new(9, 9));
            game.enqueue(TileCoord::new(5, 5));
            assert_eq!(
                game.pending_action(),
                Some(SelectionAction::Reject(IllegalSelection::NotAdjacent))
            );
        }

        #[test]
        fn status_matches_snapshot() {
            let mut game = Game::new(GameConfig::seeded(1)).unwrap();
            game.select(TileCoord::new(0, 0));
            game.select(TileCoord::new(1, 0));
            let status = game.status();
            assert_eq!(status, game.snapshot().status);
            assert_eq!(status.turn, Faction::Player2);
            assert!(status.has_attacked[&Faction::Player1]);
        }

        #[test]
        fn click_outside_board_is_inert() {
            let mut game = Game::new(GameConfig::seeded(1)).unwrap();
            let before = game.snapshot();
            assert_eq!(game.click(600, 10), SelectionOutcome::Ignored);
            assert_eq!(game.click(-5, 10), SelectionOutcome::Ignored);
            assert_eq!(game.select(TileCoord::new(10, 0)), SelectionOutcome::Ignored);
            assert_eq!(game.snapshot(), before);
        }
    }

    mod resolution_tests {
        use super::*;

        #[test]
        fn first_attack_on_bot_halves_it() {
            let mut game = Game::new(GameConfig::seeded(3)).unwrap();
            game.select(TileCoord::new(0, 0));
            let outcome = game.select(TileCoord::new(1, 0));

            let SelectionOutcome::Combat(report) = outcome else {
                panic!("expected combat, got {outcome:?}");
            };
            assert!(report.attacker_won());
            assert!(!report.captured);
            assert!(approx(game.board().get_tile(1, 0).unwrap().health(), 40.0));
            assert_eq!(game.message(), "Player1 (0, 0) wins the first attack!");
            assert_eq!(game.turn(), Faction::Player2);
            assert!(!game.first_attack_available(Faction::Player1));
            assert_eq!(game.moves(), 1);
        }

        #[test]
        fn silent_rejections_keep_message() {
            let mut game = Game::new(GameConfig::seeded(3)).unwrap();
            game.select(TileCoord::new(1, 0));
            let outcome = game.select(TileCoord::new(0, 0));
            assert_eq!(
                outcome,
                SelectionOutcome::Rejected(IllegalSelection::BotAttacker)
            );
            assert_eq!(game.message(), INITIAL_MESSAGE);
            assert!(game.queue().is_empty());
        }

        #[test]
        fn swap_message_names_both_tiles() {
            let mut board = Board::new(10, 10).unwrap();
            board.place(TileCoord::new(0, 1), Faction::Player1, 30.0).unwrap();
            let mut game =
                Game::from_board(GameConfig::seeded(3), board, ChaCha8Rng::seed_from_u64(3))
                    .unwrap();

            game.select(TileCoord::new(0, 0));
            let outcome = game.select(TileCoord::new(0, 1));

            assert!(matches!(outcome, SelectionOutcome::Swapped { .. }));
            assert_eq!(
                game.message(),
                "Player1 swapped tiles Player1 (0, 0) and Player1 (0, 1)!"
            );
            assert!(approx(game.board().get_tile(0, 0).unwrap().health(), 30.0));
            assert!(approx(game.board().get_tile(0, 1).unwrap().health(), MAX_HEALTH));
            // Swaps do not spend the first-attack bonus.
            assert!(game.first_attack_available(Faction::Player1));
        }

        #[test]
        fn snapshot_reports_scores_and_flags() {
            let mut game = Game::new(GameConfig::seeded(3)).unwrap();
            game.select(TileCoord::new(0, 0));
            game.select(TileCoord::new(1, 0));
            game.select(TileCoord::new(9, 9));

            let snapshot = game.snapshot();
            assert_eq!(snapshot.queue, vec![TileCoord::new(9, 9)]);
            assert_eq!(snapshot.status.turn, Faction::Player2);
            assert!(snapshot.status.has_attacked[&Faction::Player1]);
            assert!(!snapshot.status.has_attacked[&Faction::Player2]);
            assert_eq!(snapshot.scores[&Faction::Player1], 1);
            assert_eq!(snapshot.scores[&Faction::Bot], 98);
            assert_eq!(snapshot.winner, None);
            assert_eq!(snapshot.moves, 1);
        }
    }
}
