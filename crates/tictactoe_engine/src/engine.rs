//! Turn sequencing, terminal detection and AI moves.
//!
//! The engine owns the one live board. Mutations happen only through
//! [`GameEngine::submit_player_move`], [`GameEngine::submit_ai_move`] and
//! [`GameEngine::play_ai_turn`], in the order
//! move -> terminal check -> (AI move -> terminal check).

use super::config::{AiScheduling, EngineConfig};
use super::error::{EngineError, IllegalMoveReason};
use super::events::{GameObserver, InputBinding, NoInput};
use super::invariants::{BoardInvariants, InvariantSet, describe};
use super::search::{Minimax, MoveSearch, Role};
use super::{Board, Cell, Mark, MarkAssignment, Move, Outcome, Side, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

/// How many times a stale search result is re-derived before giving up.
pub const MAX_SEARCH_ATTEMPTS: usize = 3;

/// Where the game is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No game has been started.
    NotStarted,
    /// Waiting for the human player.
    PlayerTurn,
    /// The AI side is to move.
    AiTurn,
    /// The game finished. Only a new game leaves this phase.
    Ended(Outcome),
}

impl Phase {
    fn turn_of(side: Side) -> Self {
        match side {
            Side::Player => Phase::PlayerTurn,
            Side::Ai => Phase::AiTurn,
        }
    }
}

/// Game orchestrator: validates moves, tracks turns and drives the AI.
pub struct GameEngine<S = Minimax> {
    config: EngineConfig,
    search: S,
    board: Board,
    phase: Phase,
    ai_enabled: bool,
    history: Vec<Move>,
    observers: Vec<Box<dyn GameObserver>>,
    input: Box<dyn InputBinding>,
}

impl GameEngine<Minimax> {
    /// Creates an engine that plays the AI with full minimax.
    #[instrument]
    pub fn new(config: EngineConfig) -> Self {
        Self::with_search(config, Minimax)
    }
}

impl Default for GameEngine<Minimax> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl<S: MoveSearch> GameEngine<S> {
    /// Creates an engine that picks AI moves with `search`.
    pub fn with_search(config: EngineConfig, search: S) -> Self {
        Self {
            config,
            search,
            board: Board::new(),
            phase: Phase::NotStarted,
            ai_enabled: false,
            history: Vec::new(),
            observers: Vec::new(),
            input: Box::new(NoInput),
        }
    }

    /// Registers an observer for start, move and outcome notifications.
    pub fn subscribe(&mut self, observer: impl GameObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Replaces the per-cell input binding.
    pub fn bind_input(&mut self, input: impl InputBinding + 'static) {
        self.input = Box::new(input);
    }

    // ─────────────────────────────────────────────────────────────
    //  Game lifecycle
    // ─────────────────────────────────────────────────────────────

    /// Starts a new game on an empty board.
    ///
    /// Observers see `on_game_started` before any AI move. If the AI opens
    /// and is enabled with immediate scheduling, its first move is played
    /// before this returns.
    #[instrument(skip(self))]
    pub fn start_game(&mut self, ai_enabled: bool) -> Result<(), EngineError> {
        self.reset(Board::new(), ai_enabled);
        info!(
            player = %self.marks().player(),
            ai = %self.marks().ai(),
            first = %self.config.first_mover(),
            "Game started"
        );

        self.phase = Phase::turn_of(*self.config.first_mover());
        self.maybe_auto_play()
    }

    /// Starts a game from a mid-game position with the player to move.
    ///
    /// The position must be non-terminal, satisfy the board invariants, and
    /// have the AI at most one mark ahead of the player.
    #[instrument(skip(self, board), fields(board = %board))]
    pub fn start_from(&mut self, board: Board, ai_enabled: bool) -> Result<(), EngineError> {
        BoardInvariants::check_all(&board)
            .map_err(|violations| EngineError::InvalidPosition(describe(&violations)))?;

        if super::rules::is_terminal(&board) {
            return Err(EngineError::InvalidPosition(
                "position is already finished".to_string(),
            ));
        }

        let marks = self.marks();
        let lead = board.count(marks.ai()) as isize - board.count(marks.player()) as isize;
        if !(0..=1).contains(&lead) {
            return Err(EngineError::InvalidPosition(
                "it is not the player's move in this position".to_string(),
            ));
        }

        self.reset(board, ai_enabled);
        self.phase = Phase::PlayerTurn;
        info!("Game resumed from position");
        Ok(())
    }

    fn reset(&mut self, board: Board, ai_enabled: bool) {
        self.board = board;
        self.history.clear();
        self.ai_enabled = ai_enabled;
        self.phase = Phase::NotStarted;

        for observer in &mut self.observers {
            observer.on_game_started();
        }
        for cell in Cell::ALL {
            self.input.set_enabled(cell, self.board.is_empty(cell));
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Moves
    // ─────────────────────────────────────────────────────────────

    /// Places the player's mark at `(row, col)`.
    ///
    /// On success the move is applied and terminal-checked; with an enabled
    /// AI and immediate scheduling the AI reply is applied too. A rejected
    /// move leaves the engine untouched.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` for coordinates outside the board, `IllegalMove` when
    /// the game is not in the player's turn or the cell is taken. An
    /// `InvariantViolation` from the AI reply leaves the player's move in
    /// place and the engine in [`Phase::AiTurn`].
    #[instrument(skip(self))]
    pub fn submit_player_move(&mut self, row: usize, col: usize) -> Result<(), EngineError> {
        let cell = Cell::from_coords(row, col).ok_or(EngineError::OutOfBounds { row, col })?;
        self.check_legal(Side::Player, cell)?;

        self.apply(Side::Player, cell);
        self.advance(Side::Player)
    }

    /// Places the AI's mark at `(row, col)` on behalf of a second human.
    ///
    /// Only valid when the AI is disabled for this game.
    #[instrument(skip(self))]
    pub fn submit_ai_move(&mut self, row: usize, col: usize) -> Result<(), EngineError> {
        let cell = Cell::from_coords(row, col).ok_or(EngineError::OutOfBounds { row, col })?;
        if self.ai_enabled {
            return Err(IllegalMoveReason::AiControlled.into());
        }
        self.check_legal(Side::Ai, cell)?;

        self.apply(Side::Ai, cell);
        self.advance(Side::Ai)
    }

    /// Computes and applies the AI's move.
    ///
    /// Called by the engine itself with immediate scheduling, and by the
    /// caller when scheduling is deferred. A search result naming an occupied
    /// cell is never applied: the search is re-run against the current board
    /// up to [`MAX_SEARCH_ATTEMPTS`] times.
    #[instrument(skip(self))]
    pub fn play_ai_turn(&mut self) -> Result<Cell, EngineError> {
        self.check_turn(Side::Ai)?;
        if !self.ai_enabled {
            return Err(IllegalMoveReason::AiDisabled.into());
        }

        let marks = self.marks();
        for attempt in 1..=MAX_SEARCH_ATTEMPTS {
            let result = self.search.search(&self.board, Role::Minimizer, marks);
            let Some(cell) = result.best else {
                error!(board = %self.board, "Search found no move on an unfinished board");
                return Err(EngineError::InvariantViolation(
                    "search returned no move for a non-terminal position".to_string(),
                ));
            };

            if !self.board.is_empty(cell) {
                warn!(attempt, %cell, "Search chose an occupied cell, re-deriving");
                continue;
            }

            debug!(%cell, score = result.score, "AI selected move");
            self.apply(Side::Ai, cell);
            self.advance(Side::Ai)?;
            return Ok(cell);
        }

        error!(attempts = MAX_SEARCH_ATTEMPTS, "Search kept choosing occupied cells");
        Err(EngineError::InvariantViolation(format!(
            "search chose an occupied cell {} times",
            MAX_SEARCH_ATTEMPTS
        )))
    }

    fn check_turn(&self, side: Side) -> Result<(), EngineError> {
        let reason = match self.phase {
            Phase::NotStarted => IllegalMoveReason::GameNotStarted,
            Phase::Ended(_) => IllegalMoveReason::GameOver,
            phase if phase == Phase::turn_of(side) => return Ok(()),
            _ => IllegalMoveReason::NotYourTurn,
        };
        Err(reason.into())
    }

    fn check_legal(&self, side: Side, cell: Cell) -> Result<(), EngineError> {
        self.check_turn(side)?;
        if !self.board.is_empty(cell) {
            return Err(IllegalMoveReason::Occupied(cell).into());
        }
        Ok(())
    }

    fn apply(&mut self, side: Side, cell: Cell) {
        let mark = self.mark_of(side);
        let mv = Move::new(cell, mark);

        self.board.set_cell(cell, Square::Occupied(mark));
        self.history.push(mv);
        self.input.set_enabled(cell, false);
        debug!(%side, %mv, "Move applied");

        debug_assert!(
            BoardInvariants::check_all(&self.board).is_ok(),
            "board invariants violated after {mv}"
        );

        for observer in &mut self.observers {
            observer.on_move(&mv);
        }
    }

    /// Terminal check after `mover` played, then hand the turn over.
    fn advance(&mut self, mover: Side) -> Result<(), EngineError> {
        if let Some(outcome) = self.terminal_outcome() {
            self.finish(outcome);
            return Ok(());
        }

        self.phase = Phase::turn_of(mover.opponent());
        self.maybe_auto_play()
    }

    fn maybe_auto_play(&mut self) -> Result<(), EngineError> {
        let auto = self.phase == Phase::AiTurn
            && self.ai_enabled
            && *self.config.ai_scheduling() == AiScheduling::Immediate;
        if auto {
            self.play_ai_turn()?;
        }
        Ok(())
    }

    fn terminal_outcome(&self) -> Option<Outcome> {
        let marks = self.marks();
        if self.board.has_line(marks.player()) {
            Some(Outcome::PlayerWins)
        } else if self.board.has_line(marks.ai()) {
            Some(Outcome::AiWins)
        } else if self.board.is_full() {
            Some(Outcome::Draw)
        } else {
            None
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.phase = Phase::Ended(outcome);
        for cell in Cell::ALL {
            self.input.set_enabled(cell, false);
        }
        info!(%outcome, moves = self.history.len(), "Game over");

        for observer in &mut self.observers {
            observer.on_outcome(outcome);
        }
    }

    fn mark_of(&self, side: Side) -> Mark {
        match side {
            Side::Player => self.marks().player(),
            Side::Ai => self.marks().ai(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// The live board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Outcome of a finished game.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// True while waiting for the human player.
    pub fn is_player_turn(&self) -> bool {
        self.phase == Phase::PlayerTurn
    }

    /// True once a line or a full board ended the game.
    pub fn game_ended(&self) -> bool {
        matches!(self.phase, Phase::Ended(_))
    }

    /// Whether the engine plays the AI side in this game.
    pub fn ai_enabled(&self) -> bool {
        self.ai_enabled
    }

    /// Mark assignment for this engine.
    pub fn marks(&self) -> MarkAssignment {
        self.config.marks()
    }

    /// Configuration the engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Moves applied since the game started.
    pub fn history(&self) -> &[Move] {
        &self.history
    }
}

impl<S> std::fmt::Debug for GameEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("config", &self.config)
            .field("board", &self.board)
            .field("phase", &self.phase)
            .field("ai_enabled", &self.ai_enabled)
            .field("history", &self.history)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
