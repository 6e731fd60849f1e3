//! Signal bridge: translates the hosting panel's synthetic interrupt line
//! into a real SIGINT.
//!
//! Panels in this hosting domain deliver no OS signals to the container
//! payload at all; when the user presses stop, the panel writes a sentinel
//! line on the process's stdin instead. The bridge watches the line stream,
//! forwards ordinary console input to the supervised child, and converts the
//! sentinel into a SIGINT aimed at the supervisor itself, which the
//! supervisor then propagates to the child's whole process group.

use std::io::{self, BufRead};
use std::sync::mpsc::Sender;

use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use tracing::debug;

/// Sentinel contract (strict): a line requests interruption iff it is exactly
/// `EGG_SIGNAL_SIGINT` or exactly `^C` (the literal caret + C pair some panel
/// versions emit). No prefix or suffix matching.
pub const INTERRUPT_SENTINELS: [&str; 2] = ["EGG_SIGNAL_SIGINT", "^C"];

pub fn is_interrupt_sentinel(line: &str) -> bool {
    INTERRUPT_SENTINELS.contains(&line)
}

/// Read newline-delimited input until EOF or the interrupt sentinel.
///
/// Ordinary lines go to `relay` unmodified and in order. On the sentinel the
/// bridge stops reading, invokes `raise` (without forwarding the line) and
/// returns; `Err` is only ever the raise failure, which the caller must treat
/// as fatal since supervisory control cannot be recovered without the signal.
/// Read errors and EOF both end the loop quietly; dropping `relay` closes the
/// downstream channel so no more input lines will ever arrive.
pub fn run_bridge<R, F>(input: R, relay: Sender<String>, raise: F) -> io::Result<()>
where
    R: BufRead,
    F: FnOnce() -> nix::Result<()>,
{
    for line in input.lines() {
        let Ok(line) = line else {
            break;
        };
        if is_interrupt_sentinel(&line) {
            debug!("interrupt sentinel received on stdin");
            return raise().map_err(io::Error::from);
        }
        if relay.send(line).is_err() {
            // Receiver gone: the child's stdin task ended first.
            break;
        }
    }
    Ok(())
}

/// Default raise action: deliver SIGINT to this process. The supervisor's
/// termination listener picks it up and interrupts the child's process group.
pub fn raise_self_interrupt() -> nix::Result<()> {
    signal::kill(Pid::this(), Signal::SIGINT)
}
