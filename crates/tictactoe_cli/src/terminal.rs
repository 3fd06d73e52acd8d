//! Line-based terminal play.
//!
//! The engine reports through a [`GameEvent`] channel and tracks which cells
//! accept input through [`CellFlags`]; this module only reads lines, renders
//! events and forwards moves.

use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;

use anyhow::Result;
use tictactoe_engine::{
    Cell, EngineConfig, EngineError, GameEngine, GameEvent, InputBinding, Outcome, Phase,
};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

const HELP: &str = "\
Enter a move as:
  row col     zero-based, e.g. \"1 1\" or \"2,0\"
  1-9         keypad number, left to right, top to bottom
  label       e.g. \"center\" or \"top left\"
  q           quit";

/// A parsed line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    /// Place a mark.
    Place(Cell),
    /// Show the input formats.
    Help,
    /// Leave the game.
    Quit,
}

/// Parses one input line, or `None` if it is not understood.
pub fn parse_input(line: &str) -> Option<InputCommand> {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => return Some(InputCommand::Quit),
        "h" | "help" | "?" => return Some(InputCommand::Help),
        _ => {}
    }

    let parts: Vec<&str> = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();
    if let [row, col] = parts.as_slice() {
        if let (Ok(row), Ok(col)) = (row.parse::<usize>(), col.parse::<usize>()) {
            return Cell::from_coords(row, col).map(InputCommand::Place);
        }
    }

    Cell::from_label_or_number(line).map(InputCommand::Place)
}

/// Cell input flags shared between the engine and the terminal.
#[derive(Debug, Clone, Default)]
pub struct CellFlags(Rc<RefCell<[bool; 9]>>);

impl CellFlags {
    /// Whether `cell` currently accepts input.
    pub fn is_enabled(&self, cell: Cell) -> bool {
        self.0.borrow()[cell.index()]
    }
}

impl InputBinding for CellFlags {
    fn set_enabled(&mut self, cell: Cell, enabled: bool) {
        self.0.borrow_mut()[cell.index()] = enabled;
    }
}

/// One interactive game over a reader and a writer.
pub struct TerminalSession<R, W> {
    engine: GameEngine,
    events: mpsc::UnboundedReceiver<GameEvent>,
    cells: CellFlags,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalSession<R, W> {
    /// Wires a fresh engine to the given streams.
    pub fn new(config: EngineConfig, input: R, output: W) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        let cells = CellFlags::default();

        let mut engine = GameEngine::new(config);
        engine.subscribe(tx);
        engine.bind_input(cells.clone());

        Self {
            engine,
            events,
            cells,
            input,
            output,
        }
    }

    /// Plays until the game ends, the player quits or input runs out.
    ///
    /// Returns the outcome of a finished game, `None` otherwise.
    #[instrument(skip(self))]
    pub fn run(&mut self, ai_enabled: bool) -> Result<Option<Outcome>> {
        self.engine.start_game(ai_enabled)?;
        self.render_events()?;

        loop {
            if let Some(outcome) = self.engine.outcome() {
                info!(%outcome, moves = self.engine.history().len(), "Session finished");
                return Ok(Some(outcome));
            }

            // Deferred scheduling leaves the AI turn for us to drive.
            if self.engine.phase() == Phase::AiTurn && self.engine.ai_enabled() {
                self.engine.play_ai_turn()?;
                self.render_events()?;
                continue;
            }

            write!(self.output, "{} > ", self.prompt())?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                debug!("Input closed");
                writeln!(self.output)?;
                return Ok(None);
            }

            match parse_input(&line) {
                Some(InputCommand::Quit) => return Ok(None),
                Some(InputCommand::Help) => writeln!(self.output, "{}", HELP)?,
                Some(InputCommand::Place(cell)) => self.place(cell)?,
                None => writeln!(self.output, "Unrecognized move {:?}; type \"help\"", line.trim())?,
            }
        }
    }

    fn prompt(&self) -> String {
        let marks = self.engine.marks();
        match self.engine.phase() {
            Phase::AiTurn => format!("Player 2 ({})", marks.ai()),
            _ => format!("Your move ({})", marks.player()),
        }
    }

    fn place(&mut self, cell: Cell) -> Result<()> {
        if !self.cells.is_enabled(cell) {
            writeln!(self.output, "{} is not available", cell)?;
            return Ok(());
        }

        let (row, col) = cell.coords();
        let submitted = if self.engine.phase() == Phase::AiTurn {
            self.engine.submit_ai_move(row, col)
        } else {
            self.engine.submit_player_move(row, col)
        };

        match submitted {
            Ok(()) => self.render_events(),
            Err(EngineError::IllegalMove(reason)) => {
                writeln!(self.output, "{}", reason)?;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn render_events(&mut self) -> Result<()> {
        let mut changed = false;
        while let Ok(event) = self.events.try_recv() {
            match event {
                GameEvent::Started => {
                    let marks = self.engine.marks();
                    writeln!(self.output, "New game: you are {}, the opponent is {}", marks.player(), marks.ai())?;
                    changed = true;
                }
                GameEvent::MoveMade(mv) => {
                    writeln!(self.output, "{}", mv)?;
                    changed = true;
                }
                GameEvent::Finished(outcome) => {
                    writeln!(self.output, "{}", self.engine.board())?;
                    writeln!(self.output, "Game over: {}", outcome)?;
                    changed = false;
                }
            }
        }
        if changed {
            writeln!(self.output, "{}", self.engine.board())?;
        }
        Ok(())
    }
}
