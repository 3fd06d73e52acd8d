//! Tic-tac-toe on the terminal.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use std::io;
use tictactoe_cli::cli::{Cli, Command, ToMove};
use tictactoe_cli::{AppConfig, TerminalSession, analyze};
use tictactoe_engine::{AiScheduling, Board, Mark, MarkAssignment, Side};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log().filter())),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Play {
            no_ai,
            ai_first,
            mark,
            deferred,
        } => run_play(config, no_ai, ai_first, mark, deferred),
        Command::Analyze {
            board,
            to_move,
            mark,
            json,
        } => run_analyze(&config, &board, to_move, mark, json),
    }
}

/// Run an interactive game; flags override the config file.
#[instrument(skip(config))]
fn run_play(
    config: AppConfig,
    no_ai: bool,
    ai_first: bool,
    mark: Option<Mark>,
    deferred: bool,
) -> Result<()> {
    let mut engine = config.game().engine().clone();
    if let Some(mark) = mark {
        engine = engine.with_player_mark(mark);
    }
    if ai_first {
        engine = engine.with_first_mover(Side::Ai);
    }
    if deferred {
        engine = engine.with_ai_scheduling(AiScheduling::Deferred);
    }
    let ai_enabled = *config.game().ai_enabled() && !no_ai;

    info!(ai_enabled, ?engine, "Starting terminal game");
    let stdin = io::stdin();
    let outcome = TerminalSession::new(engine, stdin.lock(), io::stdout()).run(ai_enabled)?;
    info!(?outcome, "Game closed");
    Ok(())
}

/// Print the search result for a position.
#[instrument(skip(config))]
fn run_analyze(
    config: &AppConfig,
    board: &str,
    to_move: ToMove,
    mark: Option<Mark>,
    json: bool,
) -> Result<()> {
    let board: Board = board.parse()?;
    let player = mark.unwrap_or(*config.game().engine().player_mark());
    let analysis = analyze(&board, to_move.side(), MarkAssignment::new(player))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        println!("{}\n", board);
        println!("{}", analysis);
    }
    Ok(())
}
