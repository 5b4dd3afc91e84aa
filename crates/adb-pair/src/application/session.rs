//! SessionController: owns the lifetime of one pairing session.
//!
//! # Sequence
//!
//! 1. Render the QR code ([`PresentQrUseCase`]).
//! 2. Print the two instruction lines for the phone's settings screen.
//! 3. Open a discovery session for the pairing service type.
//! 4. Register the [`PairingListener`] with it.
//! 5. Wait for the operator (one line of input, end of input, or Ctrl+C).
//! 6. Close the discovery session, then run `adb devices -l`.
//!
//! Step 6 runs on every exit path: normal return, a failed wait, a panic in
//! the wait, or the `run` future being dropped.  The session is held by a
//! [`SessionGuard`], which closes it exactly once, and `run` wraps that guard
//! in a teardown guard whose `Drop` closes the session and then lists devices.

use std::future::Future;
use std::io;
use std::sync::Arc;

use adb_pair_core::{devices_command, PairingCredentials};
use thiserror::Error;
use tracing::{info, warn};

use super::command_runner::{run_and_forget, CommandRunner};
use super::discovery::{
    DiscoveryBackend, DiscoveryError, DiscoveryListener, DiscoverySession, PairingListener,
};
use super::pair_device::PairDeviceUseCase;
use super::present_qr::PresentQrUseCase;
use crate::domain::SessionConfig;

/// Instruction lines printed under the QR code.
pub const INSTRUCTIONS: [&str; 2] = [
    "Scan QR code to pair new devices.",
    "[Developer options]-[Wireless debugging]-[Pair device with QR code]",
];

/// Prompt shown while waiting for the operator.
pub const EXIT_PROMPT: &str = "Press enter to exit...";

/// Why the wait for the operator ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitSignal {
    /// A line was entered.
    Enter,
    /// Standard input was closed.
    EndOfInput,
    /// Ctrl+C was pressed.
    Interrupted,
}

/// Error type for session orchestration.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Discovery could not be started.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    /// Waiting for operator input failed.
    #[error("failed waiting for operator input: {0}")]
    Input(#[source] io::Error),
}

/// Closes a discovery session exactly once.
pub struct SessionGuard<S: DiscoverySession> {
    session: Option<S>,
}

impl<S: DiscoverySession> SessionGuard<S> {
    /// Takes ownership of an open session.
    pub fn new(session: S) -> Self {
        Self {
            session: Some(session),
        }
    }

    /// Returns `true` until the session has been closed.
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Closes the session.  Later calls (and the eventual drop) do nothing.
    pub fn close(&mut self) {
        if let Some(mut session) = self.session.take() {
            match session.close() {
                Ok(()) => info!("discovery session closed"),
                Err(e) => warn!("{e}"),
            }
        }
    }
}

impl<S: DiscoverySession> Drop for SessionGuard<S> {
    fn drop(&mut self) {
        self.close();
    }
}

/// Orchestrates QR presentation, discovery, and teardown.
pub struct SessionController<B: DiscoveryBackend> {
    config: SessionConfig,
    runner: Arc<dyn CommandRunner>,
    backend: B,
    presenter: PresentQrUseCase,
    pairer: Arc<PairDeviceUseCase>,
    listener: Arc<PairingListener>,
}

impl<B: DiscoveryBackend> SessionController<B> {
    /// Wires the use cases together.  Both the presenter and the pairing
    /// invoker read the same credentials.
    pub fn new(config: SessionConfig, runner: Arc<dyn CommandRunner>, backend: B) -> Self {
        let credentials: Arc<PairingCredentials> = Arc::new(config.credentials.clone());
        let presenter = PresentQrUseCase::new(
            Arc::clone(&runner),
            config.qr_program.clone(),
            Arc::clone(&credentials),
        );
        let pairer = Arc::new(PairDeviceUseCase::new(
            Arc::clone(&runner),
            config.adb_program.clone(),
            credentials,
        ));
        let listener = Arc::new(PairingListener::new(Arc::clone(&pairer)));

        Self {
            config,
            runner,
            backend,
            presenter,
            pairer,
            listener,
        }
    }

    /// The listener registered with the discovery session.
    pub fn listener(&self) -> &Arc<PairingListener> {
        &self.listener
    }

    /// Number of `adb pair` runs so far.
    pub fn pair_attempts(&self) -> usize {
        self.pairer.attempts()
    }

    /// Steps 1-4: QR code, instructions, discovery session, listener.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Discovery`] if the discovery session cannot be opened.
    pub fn start(&self) -> Result<SessionGuard<B::Session>, SessionError> {
        self.presenter.present();
        for line in INSTRUCTIONS {
            println!("{line}");
        }

        self.listener.activate();
        let listener: Arc<dyn DiscoveryListener> = self.listener.clone();
        let session = self.backend.open(&self.config.service_type, listener)?;
        info!(service_type = %self.config.service_type, "browsing for pairing services");

        Ok(SessionGuard::new(session))
    }

    /// Runs `adb devices -l`.
    pub fn list_devices(&self) {
        run_and_forget(self.runner.as_ref(), &devices_command(&self.config.adb_program));
    }

    /// Runs a whole session, using `wait` to block until the operator is done.
    ///
    /// The discovery session is closed and the device list printed even when
    /// `wait` fails; the wait error is returned afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Discovery`] if discovery cannot be started (in
    /// which case nothing is torn down or listed), or [`SessionError::Input`]
    /// if `wait` fails.
    pub async fn run<W, Fut>(&self, wait: W) -> Result<ExitSignal, SessionError>
    where
        W: FnOnce() -> Fut,
        Fut: Future<Output = io::Result<ExitSignal>>,
    {
        let mut teardown = Teardown {
            controller: self,
            guard: Some(self.start()?),
        };

        println!("{EXIT_PROMPT}\n");
        let waited = wait().await;

        teardown.finish();

        let signal = waited.map_err(SessionError::Input)?;
        info!(?signal, "operator ended the session");
        Ok(signal)
    }
}

/// Closes the session and then lists devices, once, from `finish` or `Drop`.
struct Teardown<'a, B: DiscoveryBackend> {
    controller: &'a SessionController<B>,
    guard: Option<SessionGuard<B::Session>>,
}

impl<B: DiscoveryBackend> Teardown<'_, B> {
    fn finish(&mut self) {
        if let Some(mut guard) = self.guard.take() {
            guard.close();
            self.controller.list_devices();
            info!(attempts = self.controller.pair_attempts(), "pairing session finished");
        }
    }
}

impl<B: DiscoveryBackend> Drop for Teardown<'_, B> {
    fn drop(&mut self) {
        self.finish();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
