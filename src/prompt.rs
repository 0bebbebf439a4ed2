//! Interactive prompts
//!
//! Steps ask questions through [`Prompter`] so the orchestrator can run
//! against a terminal, against fixed defaults (`--yes`), or against
//! scripted answers in tests.

use colored::Colorize;
use std::io::{self, BufRead, Write};
use tracing::warn;

use crate::error::SetupError;

pub trait Prompter {
    /// Free text with a default used on empty input.
    fn text(&mut self, message: &str, default: &str) -> Result<String, SetupError>;

    /// Yes/no question.
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool, SetupError>;

    /// Pick one of `options`; returns its index. `options` is never empty.
    fn select(&mut self, message: &str, options: &[String]) -> Result<usize, SetupError>;
}

/// Reads answers from stdin. End of input counts as cancellation.
pub struct TerminalPrompter<R: BufRead> {
    input: R,
}

impl TerminalPrompter<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self {
            input: io::stdin().lock(),
        }
    }
}

impl<R: BufRead> TerminalPrompter<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    fn read_answer(&mut self) -> Result<String, SetupError> {
        io::stdout().flush().map_err(|_| SetupError::UserAbort)?;
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => Err(SetupError::UserAbort),
            Ok(_) => Ok(line.trim().to_string()),
        }
    }
}

impl<R: BufRead> Prompter for TerminalPrompter<R> {
    fn text(&mut self, message: &str, default: &str) -> Result<String, SetupError> {
        if default.is_empty() {
            print!("{} {}: ", "?".cyan(), message);
        } else {
            print!("{} {} ({}): ", "?".cyan(), message, default.dimmed());
        }
        let answer = self.read_answer()?;
        Ok(if answer.is_empty() {
            default.to_string()
        } else {
            answer
        })
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool, SetupError> {
        let hint = if default { "Y/n" } else { "y/N" };
        print!("{} {} [{}]: ", "?".cyan(), message, hint);
        let answer = self.read_answer()?.to_lowercase();
        Ok(match answer.as_str() {
            "" => default,
            "y" | "yes" => true,
            _ => false,
        })
    }

    fn select(&mut self, message: &str, options: &[String]) -> Result<usize, SetupError> {
        println!("{} {}", "?".cyan(), message);
        for (i, option) in options.iter().enumerate() {
            println!("  {}) {}", i + 1, option);
        }
        loop {
            print!("  Choice [1-{}]: ", options.len());
            let answer = self.read_answer()?;
            match answer.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(n - 1),
                _ => println!("  {}", "Please enter one of the listed numbers.".yellow()),
            }
        }
    }
}

/// Accepts every default without asking. Selections take the first option.
#[derive(Debug, Default)]
pub struct DefaultsPrompter;

impl Prompter for DefaultsPrompter {
    fn text(&mut self, message: &str, default: &str) -> Result<String, SetupError> {
        println!("{} {} {}", "?".cyan(), message, default.dimmed());
        Ok(default.to_string())
    }

    fn confirm(&mut self, _message: &str, default: bool) -> Result<bool, SetupError> {
        Ok(default)
    }

    fn select(&mut self, message: &str, options: &[String]) -> Result<usize, SetupError> {
        if options.len() > 1 {
            warn!(choice = %options[0], "{message}: picking the first of {} options", options.len());
        }
        Ok(0)
    }
}
