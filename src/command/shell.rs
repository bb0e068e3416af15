use crate::command::{CommandRunner, OutputMode, ShellCommand};
use crate::error::{DocsBuildError, Result};
use crate::ui;
use std::process::{Command, Stdio};
use tracing::debug;

/// Runs command lines through `sh -c` (or `cmd /C` on Windows)
///
/// The command line is echoed before it runs. Captured stdout is echoed
/// back once the command finishes; stderr always goes to the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        ShellRunner
    }

    fn command(line: &str) -> Command {
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(line);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(line);
            cmd
        }
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &ShellCommand) -> Result<Option<String>> {
        ui::display_command(&command.line);
        debug!(cwd = %command.cwd.display(), mode = ?command.mode, "running command");

        let mut cmd = Self::command(&command.line);
        cmd.current_dir(&command.cwd);

        let spawn_error = |source| DocsBuildError::Spawn {
            command: command.line.clone(),
            source,
        };

        match command.mode {
            OutputMode::Stream => {
                let status = cmd.status().map_err(spawn_error)?;
                if !status.success() {
                    return Err(DocsBuildError::Command {
                        command: command.line.clone(),
                        code: status.code().unwrap_or(-1),
                    });
                }
                Ok(None)
            }
            OutputMode::Capture => {
                let output = cmd
                    .stdin(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .output()
                    .map_err(spawn_error)?;

                let stdout = String::from_utf8_lossy(&output.stdout);
                if !stdout.is_empty() {
                    print!("{}", stdout);
                }

                if !output.status.success() {
                    return Err(DocsBuildError::Command {
                        command: command.line.clone(),
                        code: output.status.code().unwrap_or(-1),
                    });
                }

                let trimmed = stdout.trim();
                if trimmed.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(trimmed.to_string()))
                }
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_capture_returns_trimmed_stdout() {
        let dir = TempDir::new().unwrap();
        let out = ShellRunner::new()
            .run(&ShellCommand::capture("echo '  hello  '", dir.path()))
            .unwrap();
        assert_eq!(out, Some("hello".to_string()));
    }

    #[test]
    fn test_capture_empty_output_is_none() {
        let dir = TempDir::new().unwrap();
        let out = ShellRunner::new()
            .run(&ShellCommand::capture("true", dir.path()))
            .unwrap();
        assert_eq!(out, None);
    }

    #[test]
    fn test_runs_in_given_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "here").unwrap();
        let out = ShellRunner::new()
            .run(&ShellCommand::capture("cat marker.txt", dir.path()))
            .unwrap();
        assert_eq!(out, Some("here".to_string()));
    }

    #[test]
    fn test_failure_names_command() {
        let dir = TempDir::new().unwrap();
        let err = ShellRunner::new()
            .run(&ShellCommand::capture("exit 3", dir.path()))
            .unwrap_err();
        match err {
            DocsBuildError::Command { command, code } => {
                assert_eq!(command, "exit 3");
                assert_eq!(code, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_stream_failure() {
        let dir = TempDir::new().unwrap();
        let err = ShellRunner::new()
            .run(&ShellCommand::stream("false", dir.path()))
            .unwrap_err();
        assert_eq!(err.command(), Some("false"));
    }

    #[test]
    fn test_missing_directory_fails_to_spawn() {
        let err = ShellRunner::new()
            .run(&ShellCommand::capture("true", "/nonexistent/path/for/docs-builder"))
            .unwrap_err();
        assert!(matches!(err, DocsBuildError::Spawn { .. }));
    }
}
