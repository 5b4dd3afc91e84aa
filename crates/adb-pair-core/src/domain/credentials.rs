//! Pairing credentials and the Wi-Fi QR payload.
//!
//! The phone's QR scanner expects the Wi-Fi network configuration format
//! popularised by ZXing, with the security type set to `ADB`:
//!
//! ```text
//! WIFI:T:ADB;S:<network_name>;P:<pairing_code>;;
//! ```
//!
//! The same `pairing_code` must later be passed to `adb pair`.  Both the QR
//! presenter and the pairing invoker therefore read one shared
//! [`PairingCredentials`] value instead of separate constants.

use serde::{Deserialize, Serialize};

/// Characters with a structural meaning inside a Wi-Fi QR payload.
const RESERVED: [char; 5] = ['\\', ';', ',', ':', '"'];

/// The network name and one-time password used for a pairing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingCredentials {
    /// Name shown by the phone while pairing (the `S:` field).
    #[serde(default = "default_network_name")]
    pub network_name: String,
    /// Password the phone presents to `adb pair` (the `P:` field).
    #[serde(default = "default_pairing_code")]
    pub pairing_code: String,
}

fn default_network_name() -> String {
    "debug".to_string()
}

fn default_pairing_code() -> String {
    "123456".to_string()
}

impl Default for PairingCredentials {
    /// `debug` / `123456`.
    fn default() -> Self {
        Self {
            network_name: default_network_name(),
            pairing_code: default_pairing_code(),
        }
    }
}

impl PairingCredentials {
    /// Creates credentials from a network name and pairing code.
    pub fn new(network_name: impl Into<String>, pairing_code: impl Into<String>) -> Self {
        Self {
            network_name: network_name.into(),
            pairing_code: pairing_code.into(),
        }
    }

    /// Builds the text encoded in the pairing QR code.
    ///
    /// Reserved characters (`\ ; , : "`) inside either field are escaped with
    /// a backslash.  Values without reserved characters are emitted verbatim.
    pub fn qr_payload(&self) -> String {
        format!(
            "WIFI:T:ADB;S:{};P:{};;",
            escape_field(&self.network_name),
            escape_field(&self.pairing_code)
        )
    }
}

/// Backslash-escapes every reserved character in `value`.
fn escape_field(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if RESERVED.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_credentials_match_stock_values() {
        // Arrange / Act
        let creds = PairingCredentials::default();

        // Assert
        assert_eq!(creds.network_name, "debug");
        assert_eq!(creds.pairing_code, "123456");
    }

    #[test]
    fn test_qr_payload_for_default_credentials() {
        let creds = PairingCredentials::default();
        assert_eq!(creds.qr_payload(), "WIFI:T:ADB;S:debug;P:123456;;");
    }

    #[test]
    fn test_qr_payload_embeds_plain_values_verbatim() {
        // Arrange
        let creds = PairingCredentials::new("lab-bench_02", "Xy7 9!");

        // Act
        let payload = creds.qr_payload();

        // Assert
        assert_eq!(payload, "WIFI:T:ADB;S:lab-bench_02;P:Xy7 9!;;");
    }

    #[test]
    fn test_qr_payload_escapes_reserved_characters() {
        // Arrange: every reserved character appears once
        let creds = PairingCredentials::new(r#"a;b:c"#, r#"1,2"3\4"#);

        // Act
        let payload = creds.qr_payload();

        // Assert
        assert_eq!(payload, r#"WIFI:T:ADB;S:a\;b\:c;P:1\,2\"3\\4;;"#);
    }

    #[test]
    fn test_qr_payload_with_empty_fields() {
        // No validation is applied; empty values produce empty fields.
        let creds = PairingCredentials::new("", "");
        assert_eq!(creds.qr_payload(), "WIFI:T:ADB;S:;P:;;");
    }

    #[test]
    fn test_escape_field_keeps_non_ascii_text() {
        assert_eq!(escape_field("café"), "café");
    }
}
