//! Child-process execution.
//!
//! [`SystemCommandRunner`] starts the program directly (no shell) with the
//! terminal's stdin, stdout, and stderr inherited, so `qrencode` draws
//! straight onto the terminal and `adb` prints its own success or failure
//! messages.  The call blocks until the child exits.
//!
//! `mock` provides a recording runner for tests.

pub mod mock;

use std::process::{Command, Stdio};

use adb_pair_core::CommandSpec;
use tracing::debug;

use crate::application::command_runner::{CommandError, CommandOutcome, CommandRunner};

/// Runs commands as real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    /// Creates a new runner.
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, command: &CommandSpec) -> Result<CommandOutcome, CommandError> {
        debug!("spawning `{command}`");
        let status = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| CommandError::Spawn {
                program: command.program.clone(),
                source,
            })?;

        Ok(CommandOutcome {
            exit_code: status.code(),
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_returns_spawn_error() {
        // Arrange
        let runner = SystemCommandRunner::new();
        let cmd = CommandSpec::new("adb-pair-test-program-that-does-not-exist", ["x"]);

        // Act
        let result = runner.run(&cmd);

        // Assert
        match result {
            Err(CommandError::Spawn { program, .. }) => {
                assert_eq!(program, "adb-pair-test-program-that-does-not-exist");
            }
            other => panic!("expected spawn error, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_program_reports_zero_exit() {
        let outcome = SystemCommandRunner::new()
            .run(&CommandSpec::new("true", Vec::<String>::new()))
            .expect("`true` must start");
        assert!(outcome.success());
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program_is_an_outcome_not_an_error() {
        let outcome = SystemCommandRunner::new()
            .run(&CommandSpec::new("false", Vec::<String>::new()))
            .expect("`false` must start");
        assert_eq!(outcome.exit_code, Some(1));
    }

    #[cfg(unix)]
    #[test]
    fn test_arguments_are_passed_without_a_shell() {
        // `sh -c 'exit $#' _ a;b c` exits with the argument count (2): the
        // semicolon is not interpreted by a shell on our side.
        let outcome = SystemCommandRunner::new()
            .run(&CommandSpec::new("sh", ["-c", "exit $#", "_", "a;b", "c"]))
            .expect("`sh` must start");
        assert_eq!(outcome.exit_code, Some(2));
    }
}
