//! In-memory table of resolved pairing services.
//!
//! Written by the mDNS event thread, read by listener callbacks through the
//! [`ServiceResolver`] port.  A callback may run before the daemon has
//! resolved the service it was told about, so [`AwaitResolution`] waits on a
//! condition variable until the entry appears, the timeout passes, or the
//! table is closed.

use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use adb_pair_core::ServiceAnnouncement;

use crate::application::discovery::ServiceResolver;

#[derive(Debug, Default)]
struct Table {
    services: HashMap<String, ServiceAnnouncement>,
    closed: bool,
}

#[derive(Debug, Default)]
struct Shared {
    table: Mutex<Table>,
    changed: Condvar,
}

/// Resolved services keyed by full instance name.  Cheap to clone; clones
/// share the same table.
///
/// [`ServiceResolver::resolve`] on the table itself is an immediate lookup.
#[derive(Debug, Default, Clone)]
pub struct ResolvedServices {
    shared: Arc<Shared>,
}

impl ResolvedServices {
    fn table(&self) -> MutexGuard<'_, Table> {
        self.shared.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores `announcement`, replacing any earlier entry with the same name,
    /// and wakes waiting resolvers.
    ///
    /// Returns `true` if the name was not present before (a new service).
    pub fn insert(&self, announcement: ServiceAnnouncement) -> bool {
        let is_new = self
            .table()
            .services
            .insert(announcement.name.clone(), announcement)
            .is_none();
        self.shared.changed.notify_all();
        is_new
    }

    /// Forgets `name`, returning the last known announcement.
    pub fn remove(&self, name: &str) -> Option<ServiceAnnouncement> {
        self.table().services.remove(name)
    }

    /// Number of services currently known.
    pub fn len(&self) -> usize {
        self.table().services.len()
    }

    /// Returns `true` if no service is known.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Marks the table closed and wakes every waiting resolver.  Idempotent.
    pub fn close(&self) {
        self.table().closed = true;
        self.shared.changed.notify_all();
    }

    /// Returns `true` once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.table().closed
    }

    /// Returns the entry for `name`, waiting up to `timeout` for it to be
    /// inserted.  Returns early with `None` if the table is closed.
    pub fn wait_for(&self, name: &str, timeout: Duration) -> Option<ServiceAnnouncement> {
        let table = self.table();
        let (table, _timed_out) = self
            .shared
            .changed
            .wait_timeout_while(table, timeout, |t| {
                !t.closed && !t.services.contains_key(name)
            })
            .unwrap_or_else(PoisonError::into_inner);
        table.services.get(name).cloned()
    }
}

impl ServiceResolver for ResolvedServices {
    fn resolve(&self, _service_type: &str, name: &str) -> Option<ServiceAnnouncement> {
        self.table().services.get(name).cloned()
    }
}

/// Resolver that gives the daemon up to `timeout` to resolve a service.
#[derive(Debug, Clone)]
pub struct AwaitResolution {
    services: ResolvedServices,
    timeout: Duration,
}

impl AwaitResolution {
    /// Waits on `services` for at most `timeout` per lookup.
    pub fn new(services: ResolvedServices, timeout: Duration) -> Self {
        Self { services, timeout }
    }
}

impl ServiceResolver for AwaitResolution {
    fn resolve(&self, _service_type: &str, name: &str) -> Option<ServiceAnnouncement> {
        self.services.wait_for(name, self.timeout)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
