use std::str::FromStr;

use crate::error::CommandParseError;

use super::board::COLS;

/// What the human can ask for on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumanCommand {
    /// Drop into a 0-based column.
    Drop(usize),
    Suggest,
    Undo,
    Quit,
}

impl FromStr for HumanCommand {
    type Err = CommandParseError;

    /// Columns are typed 1-based, as shown on screen.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_ascii_lowercase();
        match input.as_str() {
            "s" => Ok(HumanCommand::Suggest),
            "u" => Ok(HumanCommand::Undo),
            "q" => Ok(HumanCommand::Quit),
            other => match other.parse::<usize>() {
                Ok(n) if (1..=COLS).contains(&n) => Ok(HumanCommand::Drop(n - 1)),
                _ => Err(CommandParseError(s.trim().to_string())),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_columns_one_based() {
        assert_eq!("1".parse::<HumanCommand>(), Ok(HumanCommand::Drop(0)));
        assert_eq!(" 7\n".parse::<HumanCommand>(), Ok(HumanCommand::Drop(6)));
    }

    #[test]
    fn parses_letters_case_insensitively() {
        assert_eq!("s".parse::<HumanCommand>(), Ok(HumanCommand::Suggest));
        assert_eq!("U".parse::<HumanCommand>(), Ok(HumanCommand::Undo));
        assert_eq!(" q ".parse::<HumanCommand>(), Ok(HumanCommand::Quit));
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["0", "8", "abc", "", "-1", "3.5"] {
            assert!(bad.parse::<HumanCommand>().is_err(), "{bad:?} should not parse");
        }
    }
}
