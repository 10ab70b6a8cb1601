//! Session: the shared match handle and the tick loop that feeds it.
//!
//! # Processing Order
//!
//! Connections never touch the game directly. They push [`InputEvent`]s onto
//! a bounded channel and read snapshots through the shared handle. Once per
//! tick the [`TickLoop`]:
//!
//! 1. Resolves a pending selection whose reveal delay has elapsed
//! 2. Drains queued input in arrival order, taking the game lock once per
//!    event
//! 3. Stops draining as soon as a swap or attack is selected and a reveal
//!    delay is configured, so the full queue stays visible to pollers until
//!    it resolves on a later tick. Rejected pairs are cleared at once.
//!
//! # Invariants
//!
//! - Input is applied strictly in arrival order
//! - A snapshot never observes a half-applied event
//! - With a zero reveal delay a full selection resolves in the same lock
//!   acquisition that filled it
//! - At most [`INPUT_CAPACITY`] events wait between ticks; further input is
//!   refused with [`SessionError::Full`]

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use conqueror_core::{
    BoardSnapshot, Game, GameSnapshot, SelectionAction, SelectionOutcome, StatusSnapshot,
    TileCoord,
};
use thiserror::Error;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, Mutex};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Input events buffered between ticks.
pub const INPUT_CAPACITY: usize = 256;

/// Match state shared between connections and the tick loop.
pub type SharedGame = Arc<Mutex<Game>>;

/// Player input waiting for the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A click at a pixel position.
    Click {
        /// Pixels from the left edge.
        x: i64,
        /// Pixels from the top edge.
        y: i64,
    },
    /// A direct tile selection.
    Select(TileCoord),
}

/// Session error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The tick loop has shut down.
    #[error("tick loop is no longer accepting input")]
    Closed,
    /// Too much input is waiting for the next tick.
    #[error("input queue is full")]
    Full,
}

/// Cloneable handle used by connections.
#[derive(Debug, Clone)]
pub struct Session {
    game: SharedGame,
    input: mpsc::Sender<InputEvent>,
}

impl Session {
    /// Wraps `game` and returns the handle plus the loop that drives it.
    #[must_use]
    pub fn new(game: Game, reveal_delay: Duration) -> (Self, TickLoop) {
        let game = Arc::new(Mutex::new(game));
        let (input, receiver) = mpsc::channel(INPUT_CAPACITY);
        let session = Self {
            game: Arc::clone(&game),
            input,
        };
        let tick_loop = TickLoop {
            game,
            input: receiver,
            reveal_delay,
            pending_until: None,
        };
        (session, tick_loop)
    }

    /// Queues input for the next tick.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Closed`] once the tick loop has stopped and
    /// [`SessionError::Full`] while [`INPUT_CAPACITY`] events are waiting.
    pub fn submit(&self, event: InputEvent) -> Result<(), SessionError> {
        self.input.try_send(event).map_err(|err| match err {
            TrySendError::Full(_) => SessionError::Full,
            TrySendError::Closed(_) => SessionError::Closed,
        })
    }

    /// Shared game handle.
    #[must_use]
    pub fn game(&self) -> &SharedGame {
        &self.game
    }

    /// Full snapshot of the match.
    pub async fn snapshot(&self) -> GameSnapshot {
        self.game.lock().await.snapshot()
    }

    /// Current board.
    pub async fn board(&self) -> BoardSnapshot {
        BoardSnapshot::from_board(self.game.lock().await.board())
    }

    /// Pending selection in selection order.
    pub async fn queue(&self) -> Vec<TileCoord> {
        self.game.lock().await.queue().as_slice().to_vec()
    }

    /// Message, turn and first-attack flags.
    pub async fn status(&self) -> StatusSnapshot {
        self.game.lock().await.status()
    }
}

/// Drains input into the game on a fixed interval.
#[derive(Debug)]
pub struct TickLoop {
    game: SharedGame,
    input: mpsc::Receiver<InputEvent>,
    reveal_delay: Duration,
    pending_until: Option<Instant>,
}

impl TickLoop {
    /// Returns true while a full selection is waiting out its reveal delay.
    #[must_use]
    pub fn is_revealing(&self) -> bool {
        self.pending_until.is_some()
    }

    /// Runs one tick at time `now`, returning the number of input events
    /// applied.
    pub async fn tick(&mut self, now: Instant) -> usize {
        if let Some(deadline) = self.pending_until {
            if now < deadline {
                return 0;
            }
            self.pending_until = None;
            if let Some(outcome) = self.game.lock().await.resolve_pending() {
                log_outcome(&outcome);
            }
        }

        let mut applied = 0;
        while let Ok(event) = self.input.try_recv() {
            applied += 1;
            let mut game = self.game.lock().await;
            let outcome = match event {
                InputEvent::Click { x, y } => game.enqueue_pixel(x, y),
                InputEvent::Select(coord) => game.enqueue(coord),
            };
            if !matches!(outcome, SelectionOutcome::Ready) {
                log_outcome(&outcome);
                continue;
            }
            let executes = matches!(
                game.pending_action(),
                Some(SelectionAction::Swap | SelectionAction::Combat)
            );
            if executes && !self.reveal_delay.is_zero() {
                self.pending_until = Some(now + self.reveal_delay);
                break;
            }
            if let Some(outcome) = game.resolve_pending() {
                log_outcome(&outcome);
            }
        }
        applied
    }

    /// Ticks every `interval` until `shutdown` completes.
    pub async fn run(mut self, interval: Duration, shutdown: impl Future<Output = ()>) {
        let mut ticker = time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);
        info!(?interval, reveal_delay = ?self.reveal_delay, "tick loop started");

        loop {
            tokio::select! {
                now = ticker.tick() => {
                    self.tick(now).await;
                }
                () = &mut shutdown => break,
            }
        }
        info!("tick loop stopped");
    }
}

fn log_outcome(outcome: &SelectionOutcome) {
    match outcome {
        SelectionOutcome::Swapped { first, second } => {
            info!(%first, %second, "swap applied");
        }
        SelectionOutcome::Combat(report) => {
            info!(
                attacker = %report.attacker,
                defender = %report.defender,
                captured = report.captured,
                "attack applied"
            );
        }
        SelectionOutcome::GameOver(winner) => debug!(%winner, "input after game over"),
        other => debug!(?other, "input handled"),
    }
}
