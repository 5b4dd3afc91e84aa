//! Waiting for the operator to end the session.
//!
//! The session ends on the first of:
//!
//! - a line on standard input (its content is ignored),
//! - end of input (stdin closed, e.g. `adb-pair < /dev/null`),
//! - Ctrl+C.
//!
//! Stdin is read on a detached, named std thread and the result is handed
//! over through a oneshot channel.  `tokio::io::stdin` is not used: its
//! blocking read would keep the runtime alive after Ctrl+C until the operator
//! pressed Enter.

use std::io::{self, BufRead};

use tokio::sync::oneshot;
use tracing::info;

use crate::application::session::ExitSignal;

/// Reads one line from `reader` and classifies the result.
///
/// # Errors
///
/// Propagates read errors from `reader`.
pub fn read_exit_signal<R: BufRead>(reader: &mut R) -> io::Result<ExitSignal> {
    let mut line = String::new();
    let read = reader.read_line(&mut line)?;
    Ok(if read == 0 {
        ExitSignal::EndOfInput
    } else {
        ExitSignal::Enter
    })
}

/// Waits for Enter, end of input, or Ctrl+C.
///
/// # Errors
///
/// Returns an error if the stdin thread cannot be spawned, if reading stdin
/// fails, or if the Ctrl+C handler cannot be installed.
pub async fn wait_for_exit() -> io::Result<ExitSignal> {
    let (tx, rx) = oneshot::channel();

    std::thread::Builder::new()
        .name("adb-pair-stdin".to_string())
        .spawn(move || {
            let result = read_exit_signal(&mut io::stdin().lock());
            // The receiver is gone when Ctrl+C won the race.
            let _ = tx.send(result);
        })?;

    tokio::select! {
        read = rx => read.unwrap_or_else(|_| {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdin reader stopped"))
        }),
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("received Ctrl+C");
            Ok(ExitSignal::Interrupted)
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
