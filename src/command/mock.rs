use crate::command::{CommandRunner, ShellCommand};
use crate::error::{DocsBuildError, Result};
use std::cell::RefCell;
use std::collections::HashSet;

/// Command runner for testing without spawning processes
///
/// Records every command it is asked to run. Failures are scripted per
/// command line; every other command succeeds with no output.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    failures: HashSet<String>,
    history: RefCell<Vec<ShellCommand>>,
}

impl RecordingRunner {
    /// Create a runner where every command succeeds with no output
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a command line exit unsuccessfully
    pub fn fail_on(&mut self, line: impl Into<String>) {
        self.failures.insert(line.into());
    }

    /// Every command run so far, in order
    pub fn commands(&self) -> Vec<ShellCommand> {
        self.history.borrow().clone()
    }

    /// Command lines run so far, in order
    pub fn lines(&self) -> Vec<String> {
        self.history
            .borrow()
            .iter()
            .map(|c| c.line.clone())
            .collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &ShellCommand) -> Result<Option<String>> {
        self.history.borrow_mut().push(command.clone());

        if self.failures.contains(&command.line) {
            return Err(DocsBuildError::Command {
                command: command.line.clone(),
                code: 1,
            });
        }

        Ok(None)
    }
}
