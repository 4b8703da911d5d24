// crates/scrabble-cli/src/commands.rs

use std::path::PathBuf;

use scrabble_core::{Move, ParseError};
use thiserror::Error;

/// One line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Validate and commit a move, e.g. `play H8C H9A H10T`.
    Play(Move),
    /// Score a move without committing it.
    Check(Move),
    Board,
    Rack,
    Scores,
    /// Write a snapshot; optional target directory.
    Save(Option<PathBuf>),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command {0:?}, type `help` for the list")]
    Unknown(String),
    #[error("`{0}` needs at least one placement, e.g. `{0} H8C H9A`")]
    MissingPlacements(&'static str),
    #[error(transparent)]
    Placement(#[from] ParseError),
}

pub const HELP: &str = "\
Commands:
  play <placements>   lay tiles, e.g. `play H8C H9A H10T` (lowercase = blank)
  check <placements>  show what a move would score without playing it
  board               show the board
  rack                show your rack
  scores              show the scores
  save [dir]          save the game as JSON
  help                this text
  quit                leave the game";

/// Parse one input line. Empty lines are `Ok(None)`.
///
/// A line that starts with a placement is shorthand for `play`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };

    let cmd = match word.to_ascii_lowercase().as_str() {
        "play" | "p" => Command::Play(parse_placements("play", rest)?),
        "check" | "c" => Command::Check(parse_placements("check", rest)?),
        "board" | "b" | "v" => Command::Board,
        "rack" | "r" => Command::Rack,
        "scores" | "score" => Command::Scores,
        "save" | "s" => Command::Save((!rest.is_empty()).then(|| PathBuf::from(rest))),
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => match Move::parse(line) {
            Ok(mv) if !mv.is_empty() => Command::Play(mv),
            _ => return Err(CommandError::Unknown(word.to_string())),
        },
    };
    Ok(Some(cmd))
}

fn parse_placements(name: &'static str, rest: &str) -> Result<Move, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingPlacements(name));
    }
    Ok(Move::parse(rest)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_accepts_spaces_or_commas() {
        let spaced = parse_command("play H8C H9A H10T").unwrap().unwrap();
        let commas = parse_command("p H8C,H9A,H10T").unwrap().unwrap();
        assert_eq!(spaced, commas);
        match spaced {
            Command::Play(mv) => assert_eq!(mv.placements.len(), 3),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn bare_placements_mean_play() {
        let cmd = parse_command("H8C H9a").unwrap().unwrap();
        assert_eq!(cmd, Command::Play(Move::parse("H8C,H9a").unwrap()));
    }

    #[test]
    fn simple_commands_and_aliases() {
        assert_eq!(parse_command("board").unwrap(), Some(Command::Board));
        assert_eq!(parse_command("V").unwrap(), Some(Command::Board));
        assert_eq!(parse_command("rack").unwrap(), Some(Command::Rack));
        assert_eq!(parse_command("scores").unwrap(), Some(Command::Scores));
        assert_eq!(parse_command("q").unwrap(), Some(Command::Quit));
        assert_eq!(parse_command("   ").unwrap(), None);
    }

    #[test]
    fn save_takes_an_optional_directory() {
        assert_eq!(parse_command("save").unwrap(), Some(Command::Save(None)));
        assert_eq!(
            parse_command("save /tmp/games").unwrap(),
            Some(Command::Save(Some(PathBuf::from("/tmp/games"))))
        );
    }

    #[test]
    fn errors_name_the_problem() {
        assert_eq!(
            parse_command("play").unwrap_err(),
            CommandError::MissingPlacements("play")
        );
        assert!(matches!(
            parse_command("dance now").unwrap_err(),
            CommandError::Unknown(w) if w == "dance"
        ));
        assert!(matches!(
            parse_command("play Z9A").unwrap_err(),
            CommandError::Placement(_)
        ));
    }
}
