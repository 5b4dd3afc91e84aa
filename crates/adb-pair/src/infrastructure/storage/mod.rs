//! Storage infrastructure: configuration file persistence.
//!
//! The `config` sub-module reads the optional TOML file that overrides the
//! built-in pairing credentials and tool paths, and writes a starter file for
//! `--init-config`.

pub mod config;
