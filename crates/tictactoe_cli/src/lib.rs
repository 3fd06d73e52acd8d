//! Terminal front end for the tic-tac-toe engine.
//!
//! # Architecture
//!
//! - **Config**: `tictactoe.toml` with `[game]` and `[log]` tables
//! - **Terminal**: line-based play loop fed by engine events
//! - **Analyze**: one-shot minimax report for a given position

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod analyze;
pub mod cli;
mod config;
mod terminal;

pub use analyze::{Analysis, analyze, compact};
pub use config::{
    AppConfig, ConfigError, DEFAULT_CONFIG_FILE, DEFAULT_LOG_FILTER, GameSettings, LogSettings,
};
pub use terminal::{CellFlags, InputCommand, TerminalSession, parse_input};
