//! Mock command runner for unit testing.
//!
//! The real runner starts `qrencode` and `adb`, which are usually not
//! installed on build machines and would draw on the test output.  The
//! `RecordingCommandRunner` pushes every command into a `Mutex<Vec<...>>`
//! instead, so assertions can inspect exactly what would have been run and in
//! what order.
//!
//! # Usage in tests
//!
//! ```ignore
//! let runner = Arc::new(RecordingCommandRunner::new());
//! let uc = PairDeviceUseCase::new(runner.clone(), "adb", creds);
//!
//! uc.pair(&announcement);
//!
//! assert_eq!(runner.commands()[0].argv(), vec!["adb", "pair", "192.168.1.5:5555", "123456"]);
//! ```

use std::io;
use std::sync::Mutex;

use adb_pair_core::CommandSpec;

use crate::application::command_runner::{CommandError, CommandOutcome, CommandRunner};

/// A runner that records commands without starting any process.
#[derive(Debug, Default)]
pub struct RecordingCommandRunner {
    /// Every command passed to `run`, in call order.
    pub recorded: Mutex<Vec<CommandSpec>>,
    /// Exit code reported for every command (`0` by default).
    pub exit_code: i32,
    /// When `true`, every call returns [`CommandError::Spawn`] after recording.
    pub should_fail: bool,
}

impl RecordingCommandRunner {
    /// Runner whose commands all succeed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner whose commands all exit with `code`.
    pub fn with_exit_code(code: i32) -> Self {
        Self {
            exit_code: code,
            ..Self::default()
        }
    }

    /// Runner whose programs can never be started.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Snapshot of the recorded commands.
    pub fn commands(&self) -> Vec<CommandSpec> {
        self.recorded.lock().unwrap().clone()
    }
}

impl CommandRunner for RecordingCommandRunner {
    fn run(&self, command: &CommandSpec) -> Result<CommandOutcome, CommandError> {
        self.recorded.lock().unwrap().push(command.clone());
        if self.should_fail {
            return Err(CommandError::Spawn {
                program: command.program.clone(),
                source: io::Error::new(io::ErrorKind::NotFound, "mock failure"),
            });
        }
        Ok(CommandOutcome::exited(self.exit_code))
    }
}
