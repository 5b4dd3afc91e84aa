//! Multicast DNS discovery backed by the `mdns-sd` crate.
//!
//! [`MdnsDiscovery::open`] starts an mDNS daemon, browses for the pairing
//! service type, and spawns two named threads:
//!
//! - `adb-pair-mdns` drains daemon events, keeps the [`ResolvedServices`]
//!   table current, and forwards first sightings and removals as notices;
//! - `adb-pair-callbacks` turns notices into [`DiscoveryListener`] calls.
//!
//! | mdns-sd event              | Event thread                    | Callback thread      |
//! |----------------------------|---------------------------------|----------------------|
//! | `ServiceFound` (new name)  | notice `Added`                  | `on_service_added`   |
//! | `ServiceFound` (announced) | ignored                         |                      |
//! | `ServiceResolved`          | cached, waiting resolvers woken |                      |
//! | `ServiceRemoved`           | evicted, notice `Removed`       | `on_service_removed` |
//! | `SearchStopped`            | thread exits                    | drains, then exits   |
//!
//! The resolver handed to `on_service_added` waits up to
//! [`RESOLVE_TIMEOUT`] for the daemon to resolve the service.  A phone that
//! is found but never resolves therefore reaches the listener's resolution
//! failure branch.  Callbacks run on their own thread so that waiting does
//! not stall the event thread that delivers the resolution.
//!
//! # Closing
//!
//! [`MdnsSession::close`] closes the table (releasing waiting resolvers and
//! muting further callbacks), stops the browse, shuts the daemon down, and
//! joins both threads.  A callback that is still running (for example an
//! `adb pair` child) is waited for, so no callback outlives the session.

pub mod convert;
pub mod registry;

use std::collections::HashSet;
use std::ops::ControlFlow;
use std::sync::{mpsc, Arc};
use std::thread::JoinHandle;
use std::time::Duration;

use adb_pair_core::ServiceAnnouncement;
use mdns_sd::{ServiceDaemon, ServiceEvent};
use tracing::{debug, info, warn};

use crate::application::discovery::{
    DiscoveryBackend, DiscoveryError, DiscoveryListener, DiscoverySession, ServiceResolver,
};

use self::convert::announcement_from_resolved;
use self::registry::{AwaitResolution, ResolvedServices};

/// How long `on_service_added` may wait for the daemon to resolve a service.
pub const RESOLVE_TIMEOUT: Duration = Duration::from_secs(3);

/// Opens mDNS browse sessions on the standard mDNS port.
#[derive(Debug, Clone, Copy)]
pub struct MdnsDiscovery {
    resolve_timeout: Duration,
}

impl Default for MdnsDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

impl MdnsDiscovery {
    /// Creates a backend that waits [`RESOLVE_TIMEOUT`] per resolution.
    pub fn new() -> Self {
        Self {
            resolve_timeout: RESOLVE_TIMEOUT,
        }
    }
}

impl DiscoveryBackend for MdnsDiscovery {
    type Session = MdnsSession;

    fn open(
        &self,
        service_type: &str,
        listener: Arc<dyn DiscoveryListener>,
    ) -> Result<MdnsSession, DiscoveryError> {
        let daemon = ServiceDaemon::new().map_err(|e| DiscoveryError::Daemon(e.to_string()))?;

        let receiver = daemon.browse(service_type).map_err(|e| DiscoveryError::Browse {
            service_type: service_type.to_string(),
            reason: e.to_string(),
        })?;

        let services = ResolvedServices::default();
        let (notices_tx, notices_rx) = mpsc::channel();

        let resolver = AwaitResolution::new(services.clone(), self.resolve_timeout);
        let callback_services = services.clone();
        let callback_thread = std::thread::Builder::new()
            .name("adb-pair-callbacks".to_string())
            .spawn(move || {
                deliver_loop(notices_rx, &callback_services, &resolver, listener.as_ref())
            });
        let callback_thread = match callback_thread {
            Ok(handle) => handle,
            Err(e) => return Err(abandon(&daemon, "callback", &e)),
        };

        let mut browse = Browse::new(services.clone(), notices_tx);
        let event_thread = std::thread::Builder::new()
            .name("adb-pair-mdns".to_string())
            .spawn(move || {
                event_loop(std::iter::from_fn(|| receiver.recv().ok()), &mut browse)
            });
        let event_thread = match event_thread {
            // The failed closure dropped the notice sender, which ends the
            // callback thread.
            Ok(handle) => handle,
            Err(e) => return Err(abandon(&daemon, "event", &e)),
        };

        debug!("mDNS daemon browsing for {service_type}");
        Ok(MdnsSession {
            daemon,
            service_type: service_type.to_string(),
            services,
            threads: Some((event_thread, callback_thread)),
        })
    }
}

fn abandon(daemon: &ServiceDaemon, thread: &str, error: &std::io::Error) -> DiscoveryError {
    let _ = daemon.shutdown();
    DiscoveryError::Daemon(format!("failed to spawn mDNS {thread} thread: {error}"))
}

/// A running mDNS browse.
pub struct MdnsSession {
    daemon: ServiceDaemon,
    service_type: String,
    services: ResolvedServices,
    threads: Option<(JoinHandle<()>, JoinHandle<()>)>,
}

impl DiscoverySession for MdnsSession {
    fn close(&mut self) -> Result<(), DiscoveryError> {
        self.services.close();
        let stopped = self.daemon.stop_browse(&self.service_type);
        let shut_down = self.daemon.shutdown();

        if let Some((event_thread, callback_thread)) = self.threads.take() {
            // Either call succeeding guarantees the event channel ends, and
            // the callback thread follows once the event thread is gone.
            if stopped.is_ok() || shut_down.is_ok() {
                for handle in [event_thread, callback_thread] {
                    if handle.join().is_err() {
                        warn!("mDNS worker thread panicked");
                    }
                }
            } else {
                warn!("mDNS daemon unreachable; leaving worker threads detached");
            }
        }

        stopped.map_err(|e| DiscoveryError::Close(format!("stop browse: {e}")))?;
        shut_down.map_err(|e| DiscoveryError::Close(format!("shutdown: {e}")))?;
        Ok(())
    }
}

/// Work handed from the event thread to the callback thread.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Notice {
    Added { service_type: String, name: String },
    Removed { service_type: String, name: String },
}

/// Event-thread state.
struct Browse {
    services: ResolvedServices,
    /// Names already announced with `Added` and not yet removed.
    announced: HashSet<String>,
    notices: mpsc::Sender<Notice>,
}

impl Browse {
    fn new(services: ResolvedServices, notices: mpsc::Sender<Notice>) -> Self {
        Self {
            services,
            announced: HashSet::new(),
            notices,
        }
    }

    fn notify(&self, notice: Notice) {
        if self.notices.send(notice).is_err() {
            debug!("callback thread gone; notice dropped");
        }
    }

    /// Routes one daemon event.
    fn dispatch(&mut self, event: ServiceEvent) -> ControlFlow<()> {
        match event {
            ServiceEvent::SearchStarted(ty) => debug!("search started: {ty}"),
            ServiceEvent::ServiceFound(service_type, name) => {
                if self.announced.insert(name.clone()) {
                    self.notify(Notice::Added { service_type, name });
                } else {
                    debug!("service seen again: {name}");
                }
            }
            ServiceEvent::ServiceResolved(info) => {
                self.record_resolved(announcement_from_resolved(&info));
            }
            ServiceEvent::ServiceRemoved(service_type, name) => {
                self.services.remove(&name);
                self.announced.remove(&name);
                self.notify(Notice::Removed { service_type, name });
            }
            ServiceEvent::SearchStopped(ty) => {
                debug!("search stopped: {ty}");
                return ControlFlow::Break(());
            }
            _ => {}
        }
        ControlFlow::Continue(())
    }

    fn record_resolved(&self, announcement: ServiceAnnouncement) {
        debug!(
            pair_target = %announcement.pair_target(),
            "service resolved: {}", announcement.name
        );
        self.services.insert(announcement);
    }
}

/// Body of the event thread.
fn event_loop(events: impl IntoIterator<Item = ServiceEvent>, browse: &mut Browse) {
    for event in events {
        if browse.dispatch(event).is_break() {
            break;
        }
    }
    info!("mDNS event loop stopped");
}

/// Body of the callback thread.  Ends when the event thread drops its sender.
fn deliver_loop(
    notices: mpsc::Receiver<Notice>,
    services: &ResolvedServices,
    resolver: &dyn ServiceResolver,
    listener: &dyn DiscoveryListener,
) {
    for notice in notices {
        if services.is_closed() {
            debug!("session closed; dropping {notice:?}");
            continue;
        }
        match notice {
            Notice::Added { service_type, name } => {
                listener.on_service_added(resolver, &service_type, &name);
            }
            Notice::Removed { service_type, name } => {
                listener.on_service_removed(services, &service_type, &name);
            }
        }
    }
    info!("mDNS callback loop stopped");
}

// ── Tests ─────────────────────────────────────────────────────────────────────
