//! adb-pair library crate.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # Architecture
//!
//! ```text
//! [adb-pair]
//!   ├── domain/           SessionConfig (no I/O)
//!   ├── application/      Use cases and the ports they depend on:
//!   │                       present_qr, discovery listener, pair_device, session
//!   └── infrastructure/
//!         ├── process/    Child-process runner (std::process)
//!         ├── mdns/       Discovery session backed by mdns-sd
//!         ├── terminal    Wait for Enter / Ctrl+C
//!         └── storage/    TOML config file
//! ```
//!
//! # Layer rules
//!
//! - `domain` depends on `adb-pair-core` only.
//! - `application` depends on `domain` and on traits it defines itself
//!   (`CommandRunner`, `DiscoveryBackend`, ...); it never spawns processes or
//!   opens sockets.
//! - `infrastructure` implements those traits and may depend on every layer.

/// Domain layer: runtime configuration of a pairing session.
pub mod domain;

/// Application layer: QR presentation, discovery handling, pairing, session lifecycle.
pub mod application;

/// Infrastructure layer: processes, mDNS, terminal input, config storage.
pub mod infrastructure;
