//! Domain entities for wireless debug pairing.
//!
//! - **`credentials`** – the network name and pairing code, plus the QR
//!   payload derived from them.
//! - **`announcement`** – a resolved `_adb-tls-pairing` advertisement and the
//!   `host:port` target derived from it.

pub mod announcement;
pub mod credentials;
