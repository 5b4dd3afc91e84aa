//! PresentQrUseCase: shows the pairing QR code on the terminal.
//!
//! The payload comes from [`PairingCredentials::qr_payload`]; rendering is
//! delegated to an external program (`qrencode --type UTF8`).  If the renderer
//! is missing, a warning is logged and the session continues.

use std::sync::Arc;

use adb_pair_core::{qr_render_command, CommandSpec, PairingCredentials};
use tracing::debug;

use super::command_runner::{run_and_forget, CommandRunner};

/// The Present QR use case.
pub struct PresentQrUseCase {
    runner: Arc<dyn CommandRunner>,
    qr_program: String,
    credentials: Arc<PairingCredentials>,
}

impl PresentQrUseCase {
    /// Creates the use case with the renderer program and shared credentials.
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        qr_program: impl Into<String>,
        credentials: Arc<PairingCredentials>,
    ) -> Self {
        Self {
            runner,
            qr_program: qr_program.into(),
            credentials,
        }
    }

    /// The command that renders the code.
    pub fn command(&self) -> CommandSpec {
        qr_render_command(&self.qr_program, &self.credentials)
    }

    /// Renders the QR code, ignoring renderer failures.
    pub fn present(&self) {
        let command = self.command();
        debug!(payload = %self.credentials.qr_payload(), "rendering pairing QR code");
        run_and_forget(self.runner.as_ref(), &command);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::process::mock::RecordingCommandRunner;

    #[test]
    fn test_present_runs_renderer_with_payload() {
        // Arrange
        let runner = Arc::new(RecordingCommandRunner::new());
        let creds = Arc::new(PairingCredentials::new("lab", "246810"));
        let uc = PresentQrUseCase::new(runner.clone(), "qrencode", creds);

        // Act
        uc.present();

        // Assert
        let commands = runner.commands();
        assert_eq!(commands.len(), 1);
        assert_eq!(
            commands[0].argv(),
            vec!["qrencode", "--type", "UTF8", "WIFI:T:ADB;S:lab;P:246810;;"]
        );
    }

    #[test]
    fn test_present_uses_configured_renderer() {
        let runner = Arc::new(RecordingCommandRunner::new());
        let uc = PresentQrUseCase::new(
            runner.clone(),
            "/usr/local/bin/qrencode",
            Arc::new(PairingCredentials::default()),
        );

        uc.present();

        assert_eq!(runner.commands()[0].program, "/usr/local/bin/qrencode");
    }

    #[test]
    fn test_present_survives_missing_renderer() {
        // Arrange: the runner reports that the program cannot be started
        let runner = Arc::new(RecordingCommandRunner::failing());
        let creds = Arc::new(PairingCredentials::default());
        let uc = PresentQrUseCase::new(runner.clone(), "qrencode", creds);

        // Act: must not panic
        uc.present();

        // Assert: exactly one attempt, no retry
        assert_eq!(runner.commands().len(), 1);
    }
}
