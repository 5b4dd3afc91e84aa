//! Application layer use cases for adb-pair.
//!
//! Use cases in this layer depend on traits (ports) rather than concrete
//! implementations, so tests can drive them without a phone, a network, or
//! the `adb` binary.
//!
//! # Sub-modules
//!
//! - **`command_runner`** – The [`CommandRunner`](command_runner::CommandRunner)
//!   port and the fire-and-forget helper every caller uses.
//!
//! - **`present_qr`** – Renders the pairing QR code.
//!
//! - **`discovery`** – Discovery ports (`DiscoveryBackend`, `DiscoverySession`,
//!   `ServiceResolver`, `DiscoveryListener`) and the
//!   [`PairingListener`](discovery::PairingListener) that reacts to advertisements.
//!
//! - **`pair_device`** – Runs `adb pair` for a resolved advertisement.
//!
//! - **`session`** – Orchestrates startup, the wait for the operator, and
//!   guaranteed teardown.

pub mod command_runner;
pub mod discovery;
pub mod pair_device;
pub mod present_qr;
pub mod session;
