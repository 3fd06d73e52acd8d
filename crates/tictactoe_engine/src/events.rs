//! Collaborator capabilities used by the engine.
//!
//! The engine never knows concrete listener or input types. It notifies
//! [`GameObserver`]s and flips per-cell input flags through an
//! [`InputBinding`].

use super::{Cell, Move, Outcome};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::warn;

/// Receives game notifications.
///
/// All methods default to doing nothing.
pub trait GameObserver {
    /// A new game began. Fired after the board is reset and before any AI
    /// move is computed.
    fn on_game_started(&mut self) {}

    /// A move was applied to the board.
    fn on_move(&mut self, _mv: &Move) {}

    /// The game finished. Fired once per game.
    fn on_outcome(&mut self, _outcome: Outcome) {}
}

/// Per-cell input enablement owned by the input layer.
pub trait InputBinding {
    /// Marks `cell` as accepting or refusing input.
    fn set_enabled(&mut self, cell: Cell, enabled: bool);
}

/// Input binding for callers without per-cell input state.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl InputBinding for NoInput {
    fn set_enabled(&mut self, _cell: Cell, _enabled: bool) {}
}

/// Notification sent over a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// See [`GameObserver::on_game_started`].
    Started,
    /// See [`GameObserver::on_move`].
    MoveMade(Move),
    /// See [`GameObserver::on_outcome`].
    Finished(Outcome),
}

/// Forwards notifications to a channel receiver.
///
/// A dropped receiver is logged and otherwise ignored; the game carries on.
impl GameObserver for mpsc::UnboundedSender<GameEvent> {
    fn on_game_started(&mut self) {
        forward(self, GameEvent::Started);
    }

    fn on_move(&mut self, mv: &Move) {
        forward(self, GameEvent::MoveMade(*mv));
    }

    fn on_outcome(&mut self, outcome: Outcome) {
        forward(self, GameEvent::Finished(outcome));
    }
}

fn forward(tx: &mpsc::UnboundedSender<GameEvent>, event: GameEvent) {
    if tx.send(event).is_err() {
        warn!(?event, "Event receiver dropped");
    }
}
