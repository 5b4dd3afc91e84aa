//! Resolved pairing-service advertisements.

use std::fmt;

/// A `_adb-tls-pairing._tcp` service that has been resolved to a reachable
/// address and port.
///
/// Instances only live for the duration of a discovery callback; nothing is
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceAnnouncement {
    /// Full mDNS instance name, e.g. `adb-R58M123-AbCdEf._adb-tls-pairing._tcp.local.`.
    pub name: String,
    /// Address passed to `adb pair`: an IP literal or a host name.
    pub server: String,
    /// Pairing port advertised by the device.
    pub port: u16,
    /// Host name from the SRV record, kept for display.
    pub host_name: String,
}

impl ServiceAnnouncement {
    /// Creates an announcement whose host name equals `server`.
    pub fn new(name: impl Into<String>, server: impl Into<String>, port: u16) -> Self {
        let server = server.into();
        Self {
            name: name.into(),
            host_name: server.clone(),
            server,
            port,
        }
    }

    /// Returns the `<server>:<port>` argument for `adb pair`.  The server
    /// string is used verbatim.
    pub fn pair_target(&self) -> String {
        format!("{}:{}", self.server, self.port)
    }
}

impl fmt::Display for ServiceAnnouncement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (host={}, server={}, port={})",
            self.name, self.host_name, self.server, self.port
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
