//! Domain layer for adb-pair.
//!
//! Pure configuration types with no dependencies on I/O.  The pairing
//! entities themselves (`PairingCredentials`, `ServiceAnnouncement`) live in
//! `adb-pair-core`.

pub mod config;

pub use config::SessionConfig;
