//! Session configuration.
//!
//! [`SessionConfig`] is built once at startup from the config file and the
//! command line, then handed to the session controller.  The controller shares
//! one copy of the credentials between the QR presenter and the pairing
//! invoker, so the code shown in the QR is the code passed to `adb pair`.

use adb_pair_core::{
    PairingCredentials, DEFAULT_ADB_PROGRAM, DEFAULT_QR_PROGRAM, PAIRING_SERVICE_TYPE,
};

/// All runtime settings of one pairing session.
///
/// # Example
///
/// ```rust
/// use adb_pair::domain::SessionConfig;
///
/// let cfg = SessionConfig::default();
/// assert_eq!(cfg.adb_program, "adb");
/// assert_eq!(cfg.credentials.qr_payload(), "WIFI:T:ADB;S:debug;P:123456;;");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Network name and pairing code.
    pub credentials: PairingCredentials,
    /// Debug-bridge executable used for `pair` and `devices -l`.
    pub adb_program: String,
    /// Terminal QR renderer executable.
    pub qr_program: String,
    /// mDNS service type to browse for.
    pub service_type: String,
}

impl Default for SessionConfig {
    /// | Field          | Default                          |
    /// |----------------|----------------------------------|
    /// | credentials    | `debug` / `123456`               |
    /// | adb_program    | `adb`                            |
    /// | qr_program     | `qrencode`                       |
    /// | service_type   | `_adb-tls-pairing._tcp.local.`   |
    fn default() -> Self {
        Self {
            credentials: PairingCredentials::default(),
            adb_program: DEFAULT_ADB_PROGRAM.to_string(),
            qr_program: DEFAULT_QR_PROGRAM.to_string(),
            service_type: PAIRING_SERVICE_TYPE.to_string(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
