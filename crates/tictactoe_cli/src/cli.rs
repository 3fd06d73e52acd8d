//! Command-line interface for the tictactoe binary.

use clap::{Parser, Subcommand, ValueEnum};
use tictactoe_engine::{Mark, Side};

/// Tic-tac-toe against a perfect-play minimax opponent
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Play or analyze 3x3 tic-tac-toe", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game on the terminal
    Play {
        /// Two humans share the terminal; the engine does not move for O
        #[arg(long)]
        no_ai: bool,

        /// Let the AI make the opening move
        #[arg(long)]
        ai_first: bool,

        /// Mark for the human player (x or o)
        #[arg(short, long)]
        mark: Option<Mark>,

        /// Compute AI moves on the next tick instead of inside the player's move
        #[arg(long)]
        deferred: bool,
    },

    /// Run the minimax search on a position and print the best move
    Analyze {
        /// Board such as "X__/_O_/___" (X, O, and _ for empty)
        board: String,

        /// Side to move in the position
        #[arg(long, value_enum, default_value_t = ToMove::Ai)]
        to_move: ToMove,

        /// Mark held by the human player (x or o)
        #[arg(short, long)]
        mark: Option<Mark>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Side to move for `analyze`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToMove {
    /// The human player.
    Player,
    /// The AI.
    Ai,
}

impl ToMove {
    /// Engine side for this choice.
    pub fn side(self) -> Side {
        match self {
            ToMove::Player => Side::Player,
            ToMove::Ai => Side::Ai,
        }
    }
}
