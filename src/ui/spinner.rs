//! Animated stderr progress line for long-running startup steps.
//!
//! Renders a spinner frame in front of a fixed title while work is in
//! flight, then replaces the line with a colored resolution message.
//! Animation runs only on a TTY and can be switched off with
//! EGG_RUNNER_SPINNER=0; non-animated runs print just the resolution line.

use std::io::Write;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

pub struct Spinner {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
    animated: bool,
}

fn spinner_frames(ascii: bool) -> &'static [&'static str] {
    if ascii {
        &["- ", "\\ ", "| ", "/ "]
    } else {
        &["▀ ", " ▀", " ▄", "▄ "]
    }
}

fn animation_enabled() -> bool {
    let tty = atty::is(atty::Stream::Stderr);
    let disabled = std::env::var("EGG_RUNNER_SPINNER").ok().as_deref() == Some("0");
    tty && !disabled
}

impl Spinner {
    pub fn start(title: &str) -> Self {
        let animated = animation_enabled();
        if !animated {
            return Self {
                stop: None,
                handle: None,
                animated,
            };
        }
        let ascii = std::env::var("EGG_RUNNER_ASCII").ok().as_deref() == Some("1");
        let frames = spinner_frames(ascii);
        let title = title.to_string();
        let use_err = crate::color_enabled_stderr();
        let (tx, rx) = mpsc::channel();
        let handle = std::thread::spawn(move || {
            let mut i = 0usize;
            loop {
                let frame = crate::paint(use_err, "\x1b[38;5;69m", frames[i % frames.len()]);
                eprint!("\r{} {}", frame, title);
                let _ = std::io::stderr().flush();
                i += 1;
                match rx.recv_timeout(Duration::from_millis(120)) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });
        Self {
            stop: Some(tx),
            handle: Some(handle),
            animated,
        }
    }

    fn resolve(mut self, code: &str, msg: &str) {
        if let Some(tx) = self.stop.take() {
            let _ = tx.send(());
        }
        if let Some(h) = self.handle.take() {
            let _ = h.join();
        }
        let use_err = crate::color_enabled_stderr();
        if self.animated {
            // Erase the in-flight frame line before printing the resolution
            eprint!("\r\x1b[2K");
        }
        eprintln!("{}", crate::paint(use_err, code, msg));
    }

    pub fn success(self, msg: &str) {
        self.resolve("\x1b[1m\x1b[38;5;36m", msg);
    }

    pub fn error(self, msg: &str) {
        self.resolve("\x1b[1m\x1b[38;5;210m", msg);
    }
}
