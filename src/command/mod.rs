//! External command execution
//!
//! Every collaborator (site generator, API doc generator, packaging tool)
//! is invoked as a shell command line through the [CommandRunner] trait.
//! Commands always carry an explicit working directory; nothing changes the
//! process-wide current directory.
//!
//! - [ShellRunner]: runs commands through the platform shell
//! - [RecordingRunner]: records commands and returns scripted results, for tests

pub mod mock;
pub mod shell;

pub use mock::RecordingRunner;
pub use shell::ShellRunner;

use crate::error::Result;
use std::path::{Path, PathBuf};

/// How a command's output is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Capture stdout and return it trimmed
    Capture,
    /// Inherit the terminal; nothing is returned
    Stream,
}

/// A shell command line bound to the directory it runs in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    pub line: String,
    pub cwd: PathBuf,
    pub mode: OutputMode,
}

impl ShellCommand {
    /// A command whose trimmed stdout is returned
    pub fn capture(line: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        ShellCommand {
            line: line.into(),
            cwd: cwd.into(),
            mode: OutputMode::Capture,
        }
    }

    /// A command attached to the terminal (long-running servers, builds)
    pub fn stream(line: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        ShellCommand {
            line: line.into(),
            cwd: cwd.into(),
            mode: OutputMode::Stream,
        }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }
}

/// Runs shell commands on behalf of the builder
pub trait CommandRunner {
    /// Run a command and wait for it to finish
    ///
    /// # Returns
    /// * `Ok(Some(stdout))` - Captured, trimmed, non-empty stdout
    /// * `Ok(None)` - Streamed command, or captured command with no output
    /// * `Err(DocsBuildError::Command)` - Command exited unsuccessfully
    fn run(&self, command: &ShellCommand) -> Result<Option<String>>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(&self, command: &ShellCommand) -> Result<Option<String>> {
        (**self).run(command)
    }
}

impl<T: CommandRunner + ?Sized> CommandRunner for Box<T> {
    fn run(&self, command: &ShellCommand) -> Result<Option<String>> {
        (**self).run(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_command_constructors() {
        let captured = ShellCommand::capture("zip -r out.zip docs", "/repo");
        assert_eq!(captured.mode, OutputMode::Capture);
        assert_eq!(captured.cwd(), Path::new("/repo"));

        let streamed = ShellCommand::stream("yarn start", "/repo/docs");
        assert_eq!(streamed.mode, OutputMode::Stream);
        assert_eq!(streamed.line, "yarn start");
    }
}
