//! Line-oriented console front end.
//!
//! Reads one command per line, applies it to a [`GameSession`], and writes
//! the board and short guidance messages back.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use lepegeto_rules::{MoveError, Position, StageError};
use tracing::{debug, info, instrument, warn};

use crate::config::AppConfig;
use crate::save::{load_game, save_game};
use crate::session::{GameSession, SessionError, TurnOutcome};

/// One line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `select R C`: stage a piece.
    Select(Position),
    /// `target R C`: stage a destination.
    Target(Position),
    /// `clear`: drop staged pieces and targets.
    Clear,
    /// `end`: commit the staged move.
    End,
    /// `reset`: start a new game with the same players.
    Reset,
    /// `board`: print the board.
    Board,
    /// `save PATH`
    Save(PathBuf),
    /// `load PATH`
    Load(PathBuf),
    /// `concede`: the player to move gives up.
    Concede,
    /// `scores`: list recorded results.
    Scores,
    /// `help`
    Help,
    /// `quit`
    Quit,
}

/// Why a line could not be read as a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ParseError {
    /// The line was blank.
    #[display("Type a command, or 'help'")]
    Empty,
    /// The first word is not a command.
    #[display("Unknown command '{}'", _0)]
    Unknown(String),
    /// The command needs more arguments.
    #[display("Usage: {}", _0)]
    Usage(&'static str),
    /// A coordinate is not a whole number.
    #[display("'{}' is not a number", _0)]
    BadNumber(String),
}

impl std::error::Error for ParseError {}

const HELP: &str = "\
Commands:
  select R C   pick one of your pieces
  target R C   pick where a picked piece goes
  clear        drop everything picked this turn
  end          make the move
  board        show the board
  concede      give the game to your opponent
  reset        start over
  save PATH    save the game
  load PATH    load a saved game
  scores       show the fastest wins
  help         show this list
  quit         leave
Move two pieces one step in the same direction. Targets pair with pieces in the order picked.";

impl Command {
    /// Parses one input line. Words are separated by whitespace and command
    /// names are case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] describing what is wrong with the line.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(ParseError::Empty);
        };
        let rest: Vec<&str> = words.collect();

        match head.to_ascii_lowercase().as_str() {
            "select" | "s" => Ok(Self::Select(cell(&rest, "select R C")?)),
            "target" | "t" => Ok(Self::Target(cell(&rest, "target R C")?)),
            "clear" => Ok(Self::Clear),
            "end" => Ok(Self::End),
            "reset" => Ok(Self::Reset),
            "board" => Ok(Self::Board),
            "save" => Ok(Self::Save(path(&rest, "save PATH")?)),
            "load" => Ok(Self::Load(path(&rest, "load PATH")?)),
            "concede" | "yield" => Ok(Self::Concede),
            "scores" => Ok(Self::Scores),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }
}

fn cell(args: &[&str], usage: &'static str) -> Result<Position, ParseError> {
    let [row, col] = args else {
        return Err(ParseError::Usage(usage));
    };
    let number = |word: &str| {
        word.parse::<i32>()
            .map_err(|_| ParseError::BadNumber(word.to_string()))
    };
    Ok(Position::new(number(row)?, number(col)?))
}

fn path(args: &[&str], usage: &'static str) -> Result<PathBuf, ParseError> {
    match args {
        [] => Err(ParseError::Usage(usage)),
        words => Ok(PathBuf::from(words.join(" "))),
    }
}

/// Short message shown to the player for a rejected command.
pub fn guidance(err: &SessionError) -> String {
    let message = match err {
        SessionError::Stage(StageError::NotOwned(_)) => "Not yours to command, that one!",
        SessionError::Stage(StageError::AlreadySelected(_)) => "You've already selected that one",
        SessionError::Stage(StageError::SelectionFull) => "You shall not select more!",
        SessionError::Stage(StageError::NotFree(_)) => "You shall not go there!",
        SessionError::Stage(StageError::AlreadyTargeted(_)) => "You've already moved that one!",
        SessionError::Stage(StageError::GhostsFull) => "You shall not move more!",
        SessionError::Move(MoveError::IncompleteMove { .. }) => "Please, make your moves!",
        SessionError::Move(MoveError::InvalidMove) => "Invalid move! Try something else!",
        other => return other.to_string(),
    };
    message.to_string()
}

/// Drives a [`GameSession`] from a line reader.
pub struct Console<R, W> {
    input: R,
    output: W,
    session: GameSession,
    config: AppConfig,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Creates a console over `session`.
    pub fn new(input: R, output: W, session: GameSession, config: AppConfig) -> Self {
        Self {
            input,
            output,
            session,
            config,
        }
    }

    /// The session being played.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Consumes the console, returning the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Reads commands until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if reading input or writing output fails. Game
    /// errors are reported to the player and do not end the loop.
    #[instrument(skip(self))]
    pub fn run(&mut self) -> std::io::Result<()> {
        info!("Console started");
        writeln!(self.output, "{}", self.session.state())?;
        let mut line = String::new();
        loop {
            self.prompt()?;
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                debug!("End of input");
                break;
            }
            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(ParseError::Empty) => continue,
                Err(e) => {
                    writeln!(self.output, "{e}")?;
                    continue;
                }
            };
            if command == Command::Quit {
                break;
            }
            self.execute(command)?;
        }
        info!("Console stopped");
        Ok(())
    }

    fn prompt(&mut self) -> std::io::Result<()> {
        if self.session.finish().is_some() {
            write!(self.output, "game over> ")?;
        } else {
            let player = self.session.state().current_player();
            write!(self.output, "{} ({player})> ", self.session.current_name())?;
        }
        self.output.flush()
    }

    /// Applies one command and reports the result.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if writing output fails.
    #[instrument(skip(self))]
    pub fn execute(&mut self, command: Command) -> std::io::Result<()> {
        match command {
            Command::Select(cell) => {
                let result = self.session.select(cell);
                self.report(result)
            }
            Command::Target(cell) => {
                let result = self.session.target(cell);
                self.report(result)
            }
            Command::Clear => {
                self.session.clear_selection();
                writeln!(self.output, "Selection cleared")
            }
            Command::End => self.end_turn(),
            Command::Reset => {
                self.session.reset();
                writeln!(self.output, "{}", self.session.state())
            }
            Command::Board => self.show_board(),
            Command::Save(path) => self.save(path),
            Command::Load(path) => self.load(path),
            Command::Concede => match self.session.concede() {
                Ok(winner) => {
                    let name = self.session.names().name_of(winner).to_string();
                    writeln!(self.output, "{name} wins!")
                }
                Err(e) => self.complain(&e),
            },
            Command::Scores => self.scores(),
            Command::Help => writeln!(self.output, "{HELP}"),
            Command::Quit => Ok(()),
        }
    }

    fn report(&mut self, result: Result<(), SessionError>) -> std::io::Result<()> {
        match result {
            Ok(()) => self.show_staging(),
            Err(e) => self.complain(&e),
        }
    }

    fn complain(&mut self, err: &SessionError) -> std::io::Result<()> {
        debug!(error = %err, "Command rejected");
        writeln!(self.output, "{}", guidance(err))
    }

    fn show_staging(&mut self) -> std::io::Result<()> {
        let state = self.session.state();
        let list = |cells: Vec<Position>| {
            cells
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        };
        let selected = list(state.selected());
        let ghosts = list(state.ghosts());
        writeln!(self.output, "Selected: [{selected}]  Targets: [{ghosts}]")
    }

    fn show_board(&mut self) -> std::io::Result<()> {
        let turns = self.session.state().turn_count();
        writeln!(self.output, "Turn {turns}")?;
        writeln!(self.output, "{}", self.session.state())
    }

    fn end_turn(&mut self) -> std::io::Result<()> {
        match self.session.end_turn() {
            Ok(TurnOutcome::Continue { .. }) => self.show_board(),
            Ok(TurnOutcome::Won(winner)) => {
                self.show_board()?;
                let name = self.session.names().name_of(winner).to_string();
                let turns = self.session.state().turn_count();
                writeln!(self.output, "{name} wins in {turns} turns!")
            }
            Err(SessionError::Results(e)) => {
                self.show_board()?;
                writeln!(self.output, "Game over, but the result was not saved: {e}")
            }
            Err(e) => self.complain(&e),
        }
    }

    fn save(&mut self, path: PathBuf) -> std::io::Result<()> {
        let path = self.config.save_path(path);
        match save_game(&path, &self.session.saved()) {
            Ok(()) => writeln!(self.output, "Saved to {}", path.display()),
            Err(e) => {
                warn!(error = %e, "Save failed");
                writeln!(self.output, "{e}")
            }
        }
    }

    fn load(&mut self, path: PathBuf) -> std::io::Result<()> {
        let path = self.config.save_path(path);
        match load_game(&path) {
            Ok(saved) => {
                self.session.restore(saved);
                writeln!(self.output, "Loaded {}", path.display())?;
                self.show_board()
            }
            Err(e) => {
                warn!(error = %e, "Load failed");
                writeln!(self.output, "{e}")
            }
        }
    }

    fn scores(&mut self) -> std::io::Result<()> {
        let Some(results) = self.session.results() else {
            return writeln!(self.output, "No results store attached");
        };
        match results.list_results() {
            Ok(rows) if rows.is_empty() => writeln!(self.output, "No games recorded yet"),
            Ok(rows) => {
                for row in rows.iter().take(10) {
                    writeln!(
                        self.output,
                        "{:>4}  {:<12} {} vs {}  {}",
                        row.steps(),
                        row.winner(),
                        row.player1(),
                        row.player2(),
                        row.created().format("%Y-%m-%d %H:%M"),
                    )?;
                }
                Ok(())
            }
            Err(e) => writeln!(self.output, "{e}"),
        }
    }
}
