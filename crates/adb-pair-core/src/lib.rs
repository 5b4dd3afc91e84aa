//! # adb-pair-core
//!
//! Shared library for adb-pair containing the pairing credentials, the QR
//! payload format, the discovered-service model, and the pure builders for
//! every external command the tool runs.
//!
//! It has zero dependencies on OS APIs, network sockets, or child processes.
//!
//! # How wireless debug pairing works (for beginners)
//!
//! Android 11 and later can pair with a host over Wi-Fi.  When the user picks
//! *Pair device with QR code* on the phone, the camera scans a code that
//! carries a network name and a one-time password.  The phone then advertises
//! a `_adb-tls-pairing._tcp` service on the local network via multicast DNS.
//! The host watches for that advertisement and runs `adb pair host:port code`
//! with the same password that was in the QR code.
//!
//! This crate defines:
//!
//! - **`domain`** – [`PairingCredentials`] (the network name and password
//!   shared by the QR code and the `pair` command) and
//!   [`ServiceAnnouncement`] (what the phone advertised).
//!
//! - **`command`** – [`CommandSpec`] plus the builders that turn the domain
//!   types into argument lists for `qrencode` and `adb`.

pub mod command;
pub mod domain;

pub use command::{devices_command, pair_command, qr_render_command, CommandSpec};
pub use domain::announcement::ServiceAnnouncement;
pub use domain::credentials::PairingCredentials;

/// mDNS service type advertised by a device waiting for a pairing request.
pub const PAIRING_SERVICE_TYPE: &str = "_adb-tls-pairing._tcp.local.";

/// Default debug-bridge executable, resolved through `PATH`.
pub const DEFAULT_ADB_PROGRAM: &str = "adb";

/// Default terminal QR renderer, resolved through `PATH`.
pub const DEFAULT_QR_PROGRAM: &str = "qrencode";
