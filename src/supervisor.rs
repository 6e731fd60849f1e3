//! Process supervisor: spawn, stdio bridging, signal translation, and
//! coordinated shutdown of the single supervised child.
//!
//! The child is started as the leader of its own session so the whole
//! process group can be signaled with one negative-pid kill. Lifecycle:
//! NotStarted → Running (three stream copiers + termination listener) →
//! Terminating (group SIGINT, at most once) → Exited (output drained, status
//! collected, completion notification sent).

use std::io::{self, Write};
use std::os::unix::process::{CommandExt, ExitStatusExt};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;

use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use tracing::{debug, error};

use crate::config::RunnerConfig;
use crate::errors::exit_code_for_io_error;

/// Deliver SIGINT to the child's whole process group. ESRCH means the group
/// is already gone and is not an error.
fn interrupt_group(pgid: i32) -> nix::Result<()> {
    match signal::kill(Pid::from_raw(-pgid), Signal::SIGINT) {
        Err(nix::errno::Errno::ESRCH) => Ok(()),
        other => other,
    }
}

/// Success means a zero exit or death by the one authorized interrupt.
fn exit_ok(status: &ExitStatus) -> bool {
    status.success() || status.signal() == Some(Signal::SIGINT as i32)
}

/// Fixed user-facing failure message, with the support contact included only
/// when one is configured.
fn report_failure(support_link: &str) {
    println!("Uh oh! I seem to have run into an error!");
    if !support_link.is_empty() {
        println!("Please contact support at {support_link}");
    }
}

/// Run the supervised child to completion.
///
/// Fatal conditions (spawn failure, stdio loss, abnormal child exit) are
/// resolved here: user-facing message, logged cause, process halt. The only
/// signal that crosses this boundary is exactly one completion notification
/// on `notify` once the child has exited cleanly.
pub fn run_supervisor(cfg: &RunnerConfig, input: Receiver<String>, notify: Sender<()>) {
    let cmdline = if cfg.script_args.trim().is_empty() {
        cfg.script.clone()
    } else {
        format!("{} {}", cfg.script, cfg.script_args)
    };

    let mut cmd = Command::new("/bin/bash");
    cmd.arg("-c").arg(&cmdline);
    cmd.stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    // New session: the child leads its own process group (pgid == pid), so
    // descendants it spawns are reachable with a single negative-pid kill.
    unsafe {
        cmd.pre_exec(|| {
            nix::unistd::setsid().map_err(io::Error::from)?;
            Ok(())
        });
    }

    // The listener is installed before spawn; a pending flag closes the
    // window where an interrupt could arrive while the pgid is still unknown.
    let pgid_slot = Arc::new(AtomicI32::new(0));
    let pending = Arc::new(AtomicBool::new(false));
    let delivered = Arc::new(AtomicBool::new(false));
    {
        let pgid_slot = Arc::clone(&pgid_slot);
        let pending = Arc::clone(&pending);
        let delivered = Arc::clone(&delivered);
        let support_link = cfg.support_link.clone();
        if let Err(e) = ctrlc::set_handler(move || {
            let pgid = pgid_slot.load(Ordering::SeqCst);
            if pgid == 0 {
                pending.store(true, Ordering::SeqCst);
                return;
            }
            // Interrupt requests after the first are no-ops.
            if delivered.swap(true, Ordering::SeqCst) {
                return;
            }
            if let Err(err) = interrupt_group(pgid) {
                report_failure(&support_link);
                error!(%err, "failed to interrupt child process group");
                std::process::exit(1);
            }
        }) {
            report_failure(&cfg.support_link);
            error!(%e, "failed to install termination listener");
            std::process::exit(1);
        }
    }

    let mut child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => {
            report_failure(&cfg.support_link);
            error!(%e, "failed to spawn child");
            std::process::exit(exit_code_for_io_error(&e) as i32);
        }
    };

    let pgid = child.id() as i32;
    pgid_slot.store(pgid, Ordering::SeqCst);
    debug!(pid = pgid, "child spawned as session leader");
    if pending.load(Ordering::SeqCst)
        && !delivered.swap(true, Ordering::SeqCst)
        && interrupt_group(pgid).is_err()
    {
        report_failure(&cfg.support_link);
        error!("failed to interrupt child process group");
        std::process::exit(1);
    }

    let (Some(mut child_stdin), Some(mut child_stdout), Some(mut child_stderr)) =
        (child.stdin.take(), child.stdout.take(), child.stderr.take())
    else {
        report_failure(&cfg.support_link);
        error!("child stdio pipes missing after spawn");
        std::process::exit(1);
    };

    // Byte-for-byte passthrough of the child's output streams.
    let out_handle = std::thread::spawn(move || {
        let _ = io::copy(&mut child_stdout, &mut io::stdout());
    });
    let err_handle = std::thread::spawn(move || {
        let _ = io::copy(&mut child_stderr, &mut io::stderr());
    });

    // Input relay: single reader of the bridge channel. Each line gets its
    // trailing newline restored. When the channel closes the handle drops,
    // closing the child's stdin.
    {
        let support_link = cfg.support_link.clone();
        std::thread::spawn(move || {
            for line in input {
                if let Err(e) = writeln!(child_stdin, "{line}") {
                    report_failure(&support_link);
                    error!(%e, "failed to forward input line to child");
                    std::process::exit(1);
                }
            }
        });
    }

    // Drain both output streams before collecting the exit status so no
    // child output is lost or reordered relative to process exit.
    let _ = out_handle.join();
    let _ = err_handle.join();

    match child.wait() {
        Ok(status) if exit_ok(&status) => {
            debug!(?status, "child exited cleanly");
        }
        Ok(status) => {
            report_failure(&cfg.support_link);
            error!(?status, "child exited abnormally");
            std::process::exit(status.code().unwrap_or(1));
        }
        Err(e) => {
            report_failure(&cfg.support_link);
            error!(%e, "failed to collect child exit status");
            std::process::exit(exit_code_for_io_error(&e) as i32);
        }
    }

    let _ = notify.send(());
}
