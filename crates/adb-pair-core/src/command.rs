//! Construction of the external commands run during a pairing session.
//!
//! Every command is described as a [`CommandSpec`]: a program plus an
//! argument list.  No shell is involved, so values such as the pairing code
//! are passed to the child process exactly as given.
//!
//! | Builder               | Resulting command                               |
//! |-----------------------|-------------------------------------------------|
//! | [`qr_render_command`] | `qrencode --type UTF8 WIFI:T:ADB;S:..;P:..;;`    |
//! | [`pair_command`]      | `adb pair <server>:<port> <pairing_code>`        |
//! | [`devices_command`]   | `adb devices -l`                                 |

use std::fmt;

use crate::domain::{announcement::ServiceAnnouncement, credentials::PairingCredentials};

/// An external program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program name (looked up through `PATH`) or path to an executable.
    pub program: String,
    /// Arguments passed to the program, in order.
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Creates a command from a program and its arguments.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the full argument vector, program first.
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

impl fmt::Display for CommandSpec {
    /// Space-joined argument vector, for echoing to the terminal.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.argv().join(" "))
    }
}

/// `<qr_program> --type UTF8 <payload>`: renders the pairing QR code as
/// Unicode block characters on the terminal.
pub fn qr_render_command(qr_program: &str, credentials: &PairingCredentials) -> CommandSpec {
    CommandSpec::new(
        qr_program,
        ["--type".to_string(), "UTF8".to_string(), credentials.qr_payload()],
    )
}

/// `<adb> pair <server>:<port> <pairing_code>`.
pub fn pair_command(
    adb_program: &str,
    announcement: &ServiceAnnouncement,
    credentials: &PairingCredentials,
) -> CommandSpec {
    CommandSpec::new(
        adb_program,
        [
            "pair".to_string(),
            announcement.pair_target(),
            credentials.pairing_code.clone(),
        ],
    )
}

/// `<adb> devices -l`: lists attached devices so the operator can confirm
/// that pairing succeeded.
pub fn devices_command(adb_program: &str) -> CommandSpec {
    CommandSpec::new(adb_program, ["devices", "-l"])
}

// ── Tests ─────────────────────────────────────────────────────────────────────
