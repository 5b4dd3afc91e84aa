//! adb-pair: pair Android devices for wireless debugging by QR code.
//!
//! Renders a `WIFI:T:ADB;...` QR code in the terminal, browses the local
//! network for `_adb-tls-pairing._tcp` advertisements, and runs
//! `adb pair <server>:<port> <code>` for every phone that scans the code.
//! Pressing Enter (or Ctrl+C) stops discovery and prints `adb devices -l`.
//!
//! # Usage
//!
//! ```text
//! adb-pair [OPTIONS]
//!
//! Options:
//!   --network-name <NAME>   Name shown in the QR code        [default: debug]
//!   --pairing-code <CODE>   Pairing code in the QR code      [default: 123456]
//!   --adb <PATH>            adb executable                   [default: adb]
//!   --qrencode <PATH>       qrencode executable              [default: qrencode]
//!   --config <FILE>         Config file to read
//!   --init-config           Write the effective config to the config file and exit
//! ```
//!
//! # Settings precedence
//!
//! Command-line flag, then environment variable, then config file, then the
//! built-in default.
//!
//! | Variable                | Overrides              |
//! |-------------------------|------------------------|
//! | `ADB_PAIR_NETWORK_NAME` | `pairing.network_name` |
//! | `ADB_PAIR_CODE`         | `pairing.pairing_code` |
//! | `ADB_PAIR_ADB`          | `tools.adb`            |
//! | `ADB_PAIR_QRENCODE`     | `tools.qrencode`       |
//! | `ADB_PAIR_CONFIG`       | config file location   |
//!
//! Diagnostics go to stderr through `tracing`; `RUST_LOG` takes precedence
//! over `general.log_level`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use adb_pair::application::session::SessionController;
use adb_pair::infrastructure::mdns::MdnsDiscovery;
use adb_pair::infrastructure::process::SystemCommandRunner;
use adb_pair::infrastructure::storage::config::{
    config_file_path, load_config_from, save_config_to, AppConfig,
};
use adb_pair::infrastructure::terminal::wait_for_exit;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Pair Android devices for wireless debugging by scanning a QR code.
#[derive(Debug, Parser)]
#[command(
    name = "adb-pair",
    about = "Pair Android devices for wireless debugging by QR code",
    version
)]
struct Cli {
    /// Network name encoded in the QR code.
    #[arg(long, env = "ADB_PAIR_NETWORK_NAME")]
    network_name: Option<String>,

    /// Pairing code encoded in the QR code and passed to `adb pair`.
    #[arg(long, env = "ADB_PAIR_CODE")]
    pairing_code: Option<String>,

    /// Path or name of the adb executable.
    #[arg(long, env = "ADB_PAIR_ADB")]
    adb: Option<String>,

    /// Path or name of the qrencode executable.
    #[arg(long, env = "ADB_PAIR_QRENCODE")]
    qrencode: Option<String>,

    /// Config file to use instead of the platform default.
    #[arg(long, env = "ADB_PAIR_CONFIG")]
    config: Option<PathBuf>,

    /// Write the effective configuration to the config file and exit.
    #[arg(long)]
    init_config: bool,
}

impl Cli {
    /// Resolves the config file location.
    fn config_path(&self) -> anyhow::Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => config_file_path()
                .context("no --config given and no platform config directory"),
        }
    }

    /// Applies flag and environment overrides on top of the file settings.
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(name) = &self.network_name {
            config.pairing.network_name = name.clone();
        }
        if let Some(code) = &self.pairing_code {
            config.pairing.pairing_code = code.clone();
        }
        if let Some(adb) = &self.adb {
            config.tools.adb = adb.clone();
        }
        if let Some(qrencode) = &self.qrencode {
            config.tools.qrencode = qrencode.clone();
        }
    }
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config_path()?;
    let mut app_config = load_config_from(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    cli.apply_overrides(&mut app_config);

    init_tracing(&app_config.general.log_level);
    debug!(path = %config_path.display(), "configuration loaded");

    if cli.init_config {
        save_config_to(&config_path, &app_config)
            .with_context(|| format!("failed to write {}", config_path.display()))?;
        println!("Wrote {}", config_path.display());
        return Ok(());
    }

    let controller = SessionController::new(
        app_config.to_session_config(),
        Arc::new(SystemCommandRunner),
        MdnsDiscovery::new(),
    );

    let signal = controller
        .run(wait_for_exit)
        .await
        .context("pairing session failed")?;

    info!(?signal, attempts = controller.pair_attempts(), "adb-pair exiting");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
