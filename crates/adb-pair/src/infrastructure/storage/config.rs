//! TOML-based configuration for adb-pair.
//!
//! Reads `AppConfig` from the platform-appropriate config file:
//! - Windows:  `%APPDATA%\adb-pair\config.toml`
//! - Linux:    `$XDG_CONFIG_HOME/adb-pair/config.toml` or `~/.config/adb-pair/config.toml`
//! - macOS:    `~/Library/Application Support/adb-pair/config.toml`
//!
//! The file is optional.  When it does not exist every field takes its
//! built-in default, which reproduces the stock behaviour:
//!
//! ```toml
//! [pairing]
//! network_name = "debug"
//! pairing_code = "123456"
//!
//! [tools]
//! adb = "adb"
//! qrencode = "qrencode"
//!
//! [general]
//! log_level = "warn"
//! ```
//!
//! Every section and field may be omitted; `#[serde(default)]` fills the gaps.

use std::path::{Path, PathBuf};

use adb_pair_core::{
    PairingCredentials, DEFAULT_ADB_PROGRAM, DEFAULT_QR_PROGRAM, PAIRING_SERVICE_TYPE,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::SessionConfig;

/// Directory name under the platform config base directory.
const APP_DIR: &str = "adb-pair";

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Network name and pairing code shown in the QR code.
    #[serde(default)]
    pub pairing: PairingCredentials,
    /// External programs.
    #[serde(default)]
    pub tools: ToolsConfig,
    /// Miscellaneous settings.
    #[serde(default)]
    pub general: GeneralConfig,
}

/// Paths (or `PATH` names) of the external programs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolsConfig {
    /// Debug-bridge executable.
    #[serde(default = "default_adb")]
    pub adb: String,
    /// Terminal QR renderer.
    #[serde(default = "default_qrencode")]
    pub qrencode: String,
}

/// General behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneralConfig {
    /// `tracing` level used when `RUST_LOG` is unset: `"error"`, `"warn"`,
    /// `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_adb() -> String {
    DEFAULT_ADB_PROGRAM.to_string()
}
fn default_qrencode() -> String {
    DEFAULT_QR_PROGRAM.to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            adb: default_adb(),
            qrencode: default_qrencode(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Converts the stored settings into the runtime session configuration.
    pub fn to_session_config(&self) -> SessionConfig {
        SessionConfig {
            credentials: self.pairing.clone(),
            adb_program: self.tools.adb.clone(),
            qr_program: self.tools.qrencode.clone(),
            service_type: PAIRING_SERVICE_TYPE.to_string(),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the default config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the file
/// does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Writes `config` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config_to(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves the platform config base directory joined with `adb-pair`.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join(APP_DIR))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join(APP_DIR))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join(APP_DIR)
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("adb_pair_test_{}", Uuid::new_v4()))
    }

    // ── AppConfig defaults ────────────────────────────────────────────────────

    #[test]
    fn test_app_config_default_matches_stock_behaviour() {
        // Arrange / Act
        let cfg = AppConfig::default();

        // Assert
        assert_eq!(cfg.pairing.network_name, "debug");
        assert_eq!(cfg.pairing.pairing_code, "123456");
        assert_eq!(cfg.tools.adb, "adb");
        assert_eq!(cfg.tools.qrencode, "qrencode");
        assert_eq!(cfg.general.log_level, "warn");
    }

    #[test]
    fn test_to_session_config_copies_fields() {
        // Arrange
        let mut cfg = AppConfig::default();
        cfg.pairing.pairing_code = "111222".to_string();
        cfg.tools.adb = "/opt/sdk/adb".to_string();

        // Act
        let session = cfg.to_session_config();

        // Assert
        assert_eq!(session.credentials.pairing_code, "111222");
        assert_eq!(session.adb_program, "/opt/sdk/adb");
        assert_eq!(session.qr_program, "qrencode");
        assert_eq!(session.service_type, PAIRING_SERVICE_TYPE);
    }

    #[test]
    fn test_default_app_config_yields_default_session_config() {
        assert_eq!(AppConfig::default().to_session_config(), SessionConfig::default());
    }

    // ── TOML parsing ──────────────────────────────────────────────────────────

    #[test]
    fn test_deserialize_empty_toml_uses_defaults() {
        let cfg: AppConfig = toml::from_str("").expect("deserialize empty");
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_deserialize_partial_pairing_overrides_defaults() {
        // Arrange
        let toml_str = r#"
[pairing]
pairing_code = "908070"
"#;

        // Act
        let cfg: AppConfig = toml::from_str(toml_str).expect("deserialize partial");

        // Assert
        assert_eq!(cfg.pairing.pairing_code, "908070");
        // Unspecified fields keep their defaults
        assert_eq!(cfg.pairing.network_name, "debug");
        assert_eq!(cfg.tools.adb, "adb");
    }

    #[test]
    fn test_deserialize_tools_section() {
        let toml_str = r#"
[tools]
adb = "C:\\Android\\platform-tools\\adb.exe"
"#;
        let cfg: AppConfig = toml::from_str(toml_str).expect("deserialize tools");
        assert_eq!(cfg.tools.adb, r"C:\Android\platform-tools\adb.exe");
        assert_eq!(cfg.tools.qrencode, "qrencode");
    }

    #[test]
    fn test_deserialize_invalid_toml_returns_error() {
        let result: Result<AppConfig, toml::de::Error> = toml::from_str("[[[ not valid toml");
        assert!(result.is_err());
    }

    // ── load / save ───────────────────────────────────────────────────────────

    #[test]
    fn test_load_config_from_missing_file_returns_default() {
        // Arrange
        let path = temp_dir().join("config.toml");

        // Act
        let cfg = load_config_from(&path).expect("missing file is not an error");

        // Assert
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_save_and_load_config_round_trip() {
        // Arrange
        let dir = temp_dir();
        let path = dir.join("nested").join("config.toml");
        let mut cfg = AppConfig::default();
        cfg.pairing.network_name = "bench".to_string();
        cfg.general.log_level = "debug".to_string();

        // Act
        save_config_to(&path, &cfg).expect("save");
        let loaded = load_config_from(&path).expect("load");

        // Assert
        assert_eq!(loaded, cfg);

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_config_from_malformed_file_is_parse_error() {
        // Arrange
        let dir = temp_dir();
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[pairing\nnetwork_name = ").unwrap();

        // Act
        let result = load_config_from(&path);

        // Assert
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_config_from_directory_is_io_error() {
        let dir = temp_dir();
        std::fs::create_dir_all(&dir).unwrap();

        let result = load_config_from(&dir);

        assert!(matches!(result, Err(ConfigError::Io { .. })));
        std::fs::remove_dir_all(&dir).ok();
    }

    // ── config path formation ─────────────────────────────────────────────────

    #[test]
    fn test_config_file_path_ends_with_app_dir_and_file_name() {
        if let Ok(path) = config_file_path() {
            assert!(
                path.ends_with("adb-pair/config.toml") || path.ends_with(r"adb-pair\config.toml"),
                "unexpected config path {}",
                path.display()
            );
        }
        // NoPlatformConfigDir is acceptable in a stripped CI environment.
    }
}
