//! Infrastructure layer for adb-pair.
//!
//! Contains OS-facing adapters: child processes, multicast DNS, terminal
//! input, and file-system storage.
//!
//! **Dependency rule**: this layer may depend on `application`, `domain`, and
//! `adb_pair_core`, but MUST NOT be imported by the `application` or domain
//! layers (tests excepted).

pub mod mdns;
pub mod process;
pub mod storage;
pub mod terminal;
