//! Yes/no confirmation prompts
//!
//! Commands never read stdin directly. They ask a [`Confirm`] implementation,
//! which the CLI picks from the `--yes` and `--no-interaction` flags.

use std::io::{BufRead, IsTerminal, Write};

use colored::Colorize;

use crate::common::Result;

/// Asks the operator a yes/no question
pub trait Confirm {
    /// Ask `question`; an empty answer means `default`
    fn confirm(&self, question: &str, default: bool) -> Result<bool>;

    /// Whether a person can answer, which also decides whether child
    /// processes get our stdin
    fn is_interactive(&self) -> bool;
}

/// Reads answers from the terminal
///
/// Falls back to the default answer when stdin is not a terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl Confirm for TerminalPrompt {
    fn confirm(&self, question: &str, default: bool) -> Result<bool> {
        if !self.is_interactive() {
            tracing::debug!(question, default, "stdin is not a terminal, using default answer");
            return Ok(default);
        }

        let hint = if default { "[Y/n]" } else { "[y/N]" };
        let stdin = std::io::stdin();
        loop {
            print!("{} {} ", question.yellow(), hint);
            std::io::stdout().flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                return Ok(default);
            }
            match parse_answer(&line, default) {
                Some(answer) => return Ok(answer),
                None => println!("Please answer yes or no."),
            }
        }
    }

    fn is_interactive(&self) -> bool {
        std::io::stdin().is_terminal()
    }
}

/// Always gives the same answer
#[derive(Debug, Clone, Copy)]
pub enum FixedAnswer {
    /// Answer yes to everything (`--yes`)
    Yes,
    /// Answer no to everything
    No,
    /// Take each question's default (`--no-interaction`)
    Default,
}

impl Confirm for FixedAnswer {
    fn confirm(&self, question: &str, default: bool) -> Result<bool> {
        let answer = match self {
            FixedAnswer::Yes => true,
            FixedAnswer::No => false,
            FixedAnswer::Default => default,
        };
        tracing::info!("{} {}", question, if answer { "yes" } else { "no" });
        Ok(answer)
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

fn parse_answer(line: &str, default: bool) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer("\n", true), Some(true));
        assert_eq!(parse_answer("", false), Some(false));
        assert_eq!(parse_answer("Y\n", false), Some(true));
        assert_eq!(parse_answer(" no ", true), Some(false));
        assert_eq!(parse_answer("maybe", true), None);
    }

    #[test]
    fn test_fixed_answers() {
        assert!(FixedAnswer::Yes.confirm("q?", false).unwrap());
        assert!(!FixedAnswer::No.confirm("q?", true).unwrap());
        assert!(FixedAnswer::Default.confirm("q?", true).unwrap());
        assert!(!FixedAnswer::Default.confirm("q?", false).unwrap());
        assert!(!FixedAnswer::Yes.is_interactive());
    }
}
