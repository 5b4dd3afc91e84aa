//! PairDeviceUseCase: runs `adb pair` for a resolved advertisement.
//!
//! One call is one attempt.  There are no retries and no deduplication: if
//! the operator scans the code twice, or two phones pair at once, each
//! add-event produces its own independent `adb pair` run.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use adb_pair_core::{pair_command, CommandSpec, PairingCredentials, ServiceAnnouncement};
use tracing::info;

use super::command_runner::{run_and_forget, CommandRunner};

/// The Pair Device use case.
pub struct PairDeviceUseCase {
    runner: Arc<dyn CommandRunner>,
    adb_program: String,
    credentials: Arc<PairingCredentials>,
    attempts: AtomicUsize,
}

impl PairDeviceUseCase {
    /// Creates the use case with the debug-bridge program and shared credentials.
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        adb_program: impl Into<String>,
        credentials: Arc<PairingCredentials>,
    ) -> Self {
        Self {
            runner,
            adb_program: adb_program.into(),
            credentials,
            attempts: AtomicUsize::new(0),
        }
    }

    /// The `adb pair` command for `announcement`.
    pub fn command_for(&self, announcement: &ServiceAnnouncement) -> CommandSpec {
        pair_command(&self.adb_program, announcement, &self.credentials)
    }

    /// Echoes and runs `adb pair` once.  The outcome is left to `adb`'s own
    /// terminal output.
    pub fn pair(&self, announcement: &ServiceAnnouncement) {
        let command = self.command_for(announcement);
        let attempt = self.attempts.fetch_add(1, Ordering::Relaxed) + 1;
        info!(attempt, pair_target = %announcement.pair_target(), "running adb pair");
        println!("{command}");
        run_and_forget(self.runner.as_ref(), &command);
    }

    /// Number of `pair` runs started so far.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::Relaxed)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
