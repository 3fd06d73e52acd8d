//! Tic-tac-toe engine with a perfect-play minimax opponent.
//!
//! # Architecture
//!
//! - **Board**: 3x3 grid of squares with line, fullness and empty-cell queries
//! - **Search**: exhaustive minimax scoring player lines `+10`, AI lines `-10`
//! - **Engine**: turn state machine that applies player moves, runs the
//!   search for the AI and reports outcomes to observers
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{EngineConfig, GameEngine, Phase};
//!
//! # fn example() -> Result<(), tictactoe_engine::EngineError> {
//! let mut engine = GameEngine::new(EngineConfig::default());
//! engine.start_game(true)?;
//! engine.submit_player_move(1, 1)?;
//!
//! // The AI has already answered.
//! assert_eq!(engine.history().len(), 2);
//! assert_eq!(engine.phase(), Phase::PlayerTurn);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cell;
mod config;
mod engine;
mod error;
mod events;
pub mod invariants;
pub mod rules;
mod search;
mod types;

// Crate-level exports - Board model
pub use cell::{BOARD_SIZE, Cell};
pub use types::{Board, Mark, MarkAssignment, Move, Outcome, ParseBoardError, Side, Square};

// Crate-level exports - Search
pub use search::{
    DRAW_SCORE, LOSS_SCORE, Minimax, MoveSearch, Role, SearchResult, SearchStats, WIN_SCORE,
    minimax, minimax_with_stats,
};

// Crate-level exports - Engine
pub use config::{AiScheduling, EngineConfig};
pub use engine::{GameEngine, MAX_SEARCH_ATTEMPTS, Phase};
pub use error::{EngineError, IllegalMoveReason};
pub use events::{GameEvent, GameObserver, InputBinding, NoInput};
