//! Port for running external commands.
//!
//! Every command adb-pair runs (`qrencode`, `adb pair`, `adb devices -l`) is
//! an interactive tool that prints its own diagnostics to the shared
//! terminal.  Callers therefore go through [`run_and_forget`]: the command is
//! run to completion, unusual outcomes are logged, and nothing is propagated.

use adb_pair_core::CommandSpec;
use thiserror::Error;
use tracing::{debug, warn};

/// Error type for command execution.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The program could not be started (not found, not executable, ...).
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// How a finished child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Exit code, or `None` when the child was terminated by a signal.
    pub exit_code: Option<i32>,
}

impl CommandOutcome {
    /// Outcome of a child that exited with `code`.
    pub fn exited(code: i32) -> Self {
        Self {
            exit_code: Some(code),
        }
    }

    /// Returns `true` when the child exited with status 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs a command synchronously with the terminal's stdin/stdout/stderr.
///
/// Implementations block the calling thread until the child exits.
pub trait CommandRunner: Send + Sync {
    /// Runs `command` to completion.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Spawn`] if the program cannot be started.
    /// A non-zero exit is *not* an error; it is reported in the outcome.
    fn run(&self, command: &CommandSpec) -> Result<CommandOutcome, CommandError>;
}

/// Runs `command` and discards the result.
///
/// Spawn failures are logged at `warn`, non-zero exits at `debug`.
pub fn run_and_forget(runner: &dyn CommandRunner, command: &CommandSpec) {
    match runner.run(command) {
        Ok(outcome) if outcome.success() => debug!("`{command}` finished"),
        Ok(outcome) => debug!("`{command}` exited with {:?}", outcome.exit_code),
        Err(e) => warn!("{e}"),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Mutex;

    struct ScriptedRunner {
        calls: Mutex<Vec<CommandSpec>>,
        result: fn() -> Result<CommandOutcome, CommandError>,
    }

    impl CommandRunner for ScriptedRunner {
        fn run(&self, command: &CommandSpec) -> Result<CommandOutcome, CommandError> {
            self.calls.lock().unwrap().push(command.clone());
            (self.result)()
        }
    }

    #[test]
    fn test_outcome_success_only_for_zero() {
        assert!(CommandOutcome::exited(0).success());
        assert!(!CommandOutcome::exited(1).success());
        assert!(!CommandOutcome { exit_code: None }.success());
    }

    #[test]
    fn test_run_and_forget_runs_command_once() {
        // Arrange
        let runner = ScriptedRunner {
            calls: Mutex::new(Vec::new()),
            result: || Ok(CommandOutcome::exited(0)),
        };
        let cmd = CommandSpec::new("adb", ["devices", "-l"]);

        // Act
        run_and_forget(&runner, &cmd);

        // Assert
        assert_eq!(*runner.calls.lock().unwrap(), vec![cmd]);
    }

    #[test]
    fn test_run_and_forget_swallows_non_zero_exit() {
        let runner = ScriptedRunner {
            calls: Mutex::new(Vec::new()),
            result: || Ok(CommandOutcome::exited(1)),
        };

        // Must return normally.
        run_and_forget(&runner, &CommandSpec::new("adb", ["pair", "h:1", "0"]));

        assert_eq!(runner.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_run_and_forget_swallows_spawn_failure() {
        let runner = ScriptedRunner {
            calls: Mutex::new(Vec::new()),
            result: || {
                Err(CommandError::Spawn {
                    program: "qrencode".to_string(),
                    source: io::Error::new(io::ErrorKind::NotFound, "not found"),
                })
            },
        };

        run_and_forget(&runner, &CommandSpec::new("qrencode", ["x"]));

        assert_eq!(runner.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_spawn_error_message_names_program() {
        let err = CommandError::Spawn {
            program: "adb".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(
            err.to_string(),
            "failed to start `adb`: No such file or directory"
        );
    }
}
