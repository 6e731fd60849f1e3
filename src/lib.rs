//! egg-runner: supervisor for hosted game servers, bots and voice servers.
//!
//! The hosting panel cannot deliver OS signals to the container payload; it
//! writes a sentinel line on stdin instead. This crate bridges that line
//! protocol to real signals, pipes the child's stdio through untouched, and
//! can mirror a remote git repository into the working directory as a
//! symlink overlay before the child starts.
//!
//! Components:
//! - [`bridge`]: stdin line loop, sentinel detection, self-directed SIGINT.
//! - [`supervisor`]: child lifecycle, stream copying, process-group
//!   interrupt propagation, exit-status policy.
//! - [`overlay`]: staging clone management, symlink materialization, orphan
//!   reconciliation against commit history.
//! - [`convert`] / [`config`]: legacy marker migration and the YAML software
//!   config.
//! - [`seccomp`] / [`hwinfo`]: one-shot startup collaborators (syscall
//!   denial, hardware summary).

pub mod bridge;
pub mod color;
pub mod config;
pub mod convert;
pub mod errors;
pub mod hwinfo;
pub mod overlay;
pub mod seccomp;
pub mod supervisor;
pub mod ui;
pub mod util;

pub use color::{
    color_enabled_stderr, color_enabled_stdout, log_error_stderr, log_info_stderr,
    log_warn_stderr, paint, set_color_mode, ColorMode,
};
pub use errors::exit_code_for_io_error;
