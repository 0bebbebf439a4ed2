//! Scripted runner for unit tests

use std::cell::RefCell;

use super::{CommandOutcome, CommandRunner, CommandSpec};

/// Answers commands by prefix match on the displayed command line.
/// Unmatched commands succeed with empty output.
#[derive(Default)]
pub(crate) struct ScriptedRunner {
    rules: Vec<(String, CommandOutcome)>,
    calls: RefCell<Vec<CommandSpec>>,
}

impl ScriptedRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn ok(mut self, prefix: &str, stdout: &str) -> Self {
        self.rules
            .push((prefix.to_string(), CommandOutcome::Ok(stdout.to_string())));
        self
    }

    pub(crate) fn err(mut self, prefix: &str, message: &str) -> Self {
        self.rules
            .push((prefix.to_string(), CommandOutcome::Err(message.to_string())));
        self
    }

    pub(crate) fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }

    pub(crate) fn lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.display_line()).collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, command: &CommandSpec) -> CommandOutcome {
        self.calls.borrow_mut().push(command.clone());
        let line = command.display_line();
        self.rules
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map(|(_, outcome)| outcome.clone())
            .unwrap_or_else(|| CommandOutcome::Ok(String::new()))
    }
}
