//! Discovery ports and the listener that reacts to pairing advertisements.
//!
//! # Event flow
//!
//! ```text
//! DiscoveryBackend::open(service_type, listener)   -> DiscoverySession
//!        │  (background thread owned by the backend)
//!        ├─ service added   -> listener.on_service_added(resolver, type, name)
//!        │                       └─ resolver.resolve(type, name)
//!        │                            ├─ Some(announcement) -> PairDeviceUseCase::pair
//!        │                            └─ None               -> print diagnostic, stop
//!        └─ service removed -> listener.on_service_removed(resolver, type, name)
//! DiscoverySession::close()
//! ```
//!
//! Callbacks run on the backend's thread, concurrently with the foreground
//! task that waits for the operator.  They never return errors and never
//! panic on a failed resolution.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use adb_pair_core::ServiceAnnouncement;
use thiserror::Error;
use tracing::{debug, warn};

use super::pair_device::PairDeviceUseCase;
use super::session::EXIT_PROMPT;

/// Error type for discovery sessions.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The discovery daemon could not be started.
    #[error("failed to start discovery daemon: {0}")]
    Daemon(String),
    /// Browsing for the service type could not be started.
    #[error("failed to browse for {service_type}: {reason}")]
    Browse {
        service_type: String,
        reason: String,
    },
    /// The session could not be shut down cleanly.
    #[error("failed to close discovery session: {0}")]
    Close(String),
}

/// Looks up the full details of a discovered service.
pub trait ServiceResolver {
    /// Returns the resolved announcement for `name`, or `None` if it is not
    /// (or no longer) available.
    fn resolve(&self, service_type: &str, name: &str) -> Option<ServiceAnnouncement>;
}

/// Receives add/remove notifications from a discovery session.
pub trait DiscoveryListener: Send + Sync {
    /// A service instance of `service_type` appeared on the network.
    fn on_service_added(&self, resolver: &dyn ServiceResolver, service_type: &str, name: &str);

    /// A service instance of `service_type` disappeared from the network.
    fn on_service_removed(&self, resolver: &dyn ServiceResolver, service_type: &str, name: &str);
}

/// A running discovery session.  Closed once, by the session guard.
pub trait DiscoverySession: Send {
    /// Stops browsing and releases the session's resources.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Close`] if the underlying daemon reports a failure.
    fn close(&mut self) -> Result<(), DiscoveryError>;
}

/// Opens discovery sessions.
pub trait DiscoveryBackend {
    /// Session type produced by this backend.
    type Session: DiscoverySession;

    /// Starts browsing for `service_type` and delivers events to `listener`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Daemon`] or [`DiscoveryError::Browse`] when
    /// discovery cannot be started.
    fn open(
        &self,
        service_type: &str,
        listener: Arc<dyn DiscoveryListener>,
    ) -> Result<Self::Session, DiscoveryError>;
}

/// Lifecycle of a [`PairingListener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    /// Not yet registered with a discovery session.
    Idle,
    /// Registered and handling events.  Final state.
    Active,
}

/// Listener that pairs every device whose advertisement resolves.
pub struct PairingListener {
    pairer: Arc<PairDeviceUseCase>,
    active: AtomicBool,
}

impl PairingListener {
    /// Creates an idle listener that forwards resolved services to `pairer`.
    pub fn new(pairer: Arc<PairDeviceUseCase>) -> Self {
        Self {
            pairer,
            active: AtomicBool::new(false),
        }
    }

    /// Marks the listener as registered.  Idempotent.
    pub fn activate(&self) {
        self.active.store(true, Ordering::Release);
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ListenerState {
        if self.active.load(Ordering::Acquire) {
            ListenerState::Active
        } else {
            ListenerState::Idle
        }
    }

    fn accepts(&self, event: &str, name: &str) -> bool {
        match self.state() {
            ListenerState::Active => true,
            ListenerState::Idle => {
                warn!("dropping {event} event for {name}: listener not registered");
                false
            }
        }
    }
}

impl DiscoveryListener for PairingListener {
    fn on_service_added(&self, resolver: &dyn ServiceResolver, service_type: &str, name: &str) {
        if !self.accepts("add", name) {
            return;
        }

        let Some(announcement) = resolver.resolve(service_type, name) else {
            debug!(service_type, instance = name, "service resolution returned nothing");
            println!("get_service_info failed");
            return;
        };

        println!("Service {name} added.");
        println!("service info: {announcement}\n");
        self.pairer.pair(&announcement);
    }

    fn on_service_removed(&self, _resolver: &dyn ServiceResolver, service_type: &str, name: &str) {
        if !self.accepts("remove", name) {
            return;
        }

        debug!(service_type, instance = name, "service removed");
        println!("Service {name} removed.");
        println!("{EXIT_PROMPT}\n");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
