use std::io::{self, BufRead, Write};

use crate::error::SessionError;
use crate::game::{GameResult, GameSession, HumanCommand, Side};
use crate::scores::Scores;

use super::app::outcome_message;

/// Line-based front-end: prints the board and reads commands from a reader.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn print_instructions(&mut self) -> io::Result<()> {
        writeln!(self.output, "\nWelcome to Connect Four!")?;
        writeln!(self.output, "How to play:")?;
        writeln!(self.output, "  Players take turns dropping tokens into columns 1-7.")?;
        writeln!(
            self.output,
            "  Connect four in a row (horizontal, vertical, or diagonal) to win."
        )?;
        writeln!(self.output, "  Type 'u' to undo the last move, 's' for a suggestion, 'q' to quit.")?;
        writeln!(self.output, "  Scores are tracked across games.\n")
    }

    /// Play one session to the end. Returns `None` if the human quit or the
    /// input ran out.
    pub fn play(&mut self, session: &mut GameSession) -> io::Result<Option<GameResult>> {
        writeln!(
            self.output,
            "You are {}, AI is {} ({} difficulty)",
            session.human_symbol(),
            session.automated_symbol(),
            session.difficulty()
        )?;

        loop {
            writeln!(self.output, "\n{}\n", session.board())?;

            if let Some(result) = session.result() {
                writeln!(self.output, "{}", outcome_message(result))?;
                return Ok(Some(result));
            }

            match session.active_side() {
                Side::Automated => {
                    writeln!(self.output, "AI is thinking...")?;
                    if let Some(mv) = session.play_automated().map_err(io::Error::other)? {
                        writeln!(self.output, "AI played column {}", mv.column + 1)?;
                    }
                }
                Side::Human => {
                    if !self.human_turn(session)? {
                        return Ok(None);
                    }
                }
            }
        }
    }

    /// Handle one line of human input. Returns false when the human is done.
    fn human_turn(&mut self, session: &mut GameSession) -> io::Result<bool> {
        write!(
            self.output,
            "Enter your move (1-7), 's' for suggestion, or 'u' to undo: "
        )?;
        self.output.flush()?;

        let Some(line) = self.read_line()? else {
            return Ok(false);
        };
        let command = match line.parse::<HumanCommand>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(self.output, "{e}")?;
                return Ok(true);
            }
        };

        match command {
            HumanCommand::Quit => return Ok(false),
            HumanCommand::Drop(col) => {
                if let Err(e) = session.play_human(col) {
                    writeln!(self.output, "Invalid move: {e}. Try again.")?;
                }
            }
            HumanCommand::Suggest => match session.suggest() {
                Ok(Some(col)) => writeln!(self.output, "AI suggests column {}", col + 1)?,
                Ok(None) => writeln!(self.output, "No moves available.")?,
                Err(e) => writeln!(self.output, "{e}")?,
            },
            HumanCommand::Undo => match session.undo() {
                Ok(_) => writeln!(self.output, "Undo successful!")?,
                Err(SessionError::EmptyHistory(_)) => writeln!(self.output, "No moves to undo.")?,
                Err(e) => writeln!(self.output, "{e}")?,
            },
        }
        Ok(true)
    }

    pub fn print_scores(&mut self, scores: Scores) -> io::Result<()> {
        writeln!(
            self.output,
            "Score: {} wins, {} losses, {} ties",
            scores.wins, scores.losses, scores.ties
        )
    }

    /// Returns true only for an explicit yes.
    pub fn ask_play_again(&mut self) -> io::Result<bool> {
        write!(self.output, "Do you want to play again? (y/n): ")?;
        self.output.flush()?;
        Ok(self
            .read_line()?
            .is_some_and(|line| line.trim().eq_ignore_ascii_case("y")))
    }

    /// Next line of input, `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
