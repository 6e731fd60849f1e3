use std::io;
use std::path::Path;
use std::process::ExitCode;
use std::sync::mpsc;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use egg_runner::config;
use egg_runner::overlay::{OverlaySync, RemoteSpec, DEFAULT_STAGING_DIR};
use egg_runner::ui::spinner::Spinner;
use egg_runner::{bridge, convert, hwinfo, seccomp, supervisor};

mod cli;
use cli::Cli;

fn main() -> ExitCode {
    let args = Cli::parse();
    if let Some(mode) = args.color {
        egg_runner::set_color_mode(mode);
    }

    // .env first so GIT_* and EGG_RUNNER_* values are visible below
    let _ = dotenvy::dotenv();

    let use_err = egg_runner::color_enabled_stderr();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_ansi(use_err)
        .init();

    let cfg = args.runner_config();

    let Some(home) = home::home_dir() else {
        egg_runner::log_error_stderr(use_err, "egg-runner: cannot determine home directory");
        return ExitCode::from(1);
    };

    let config_file = config::config_path(&home);
    if !config_file.exists() {
        convert::convert_legacy_config(&home);
    }
    let software = match config::load_software_config(&config_file) {
        Ok(c) => c,
        Err(e) => {
            egg_runner::log_error_stderr(use_err, &format!("egg-runner: {e}"));
            error!(%e, "failed to load software config");
            return ExitCode::from(1);
        }
    };

    // Overlay sync runs to completion before the child spawns. It only
    // applies to repo-deployed bot software with a configured remote.
    let repo_url = std::env::var("GIT_REPO").unwrap_or_default();
    if software.software.software_type.starts_with("discord_") && !repo_url.is_empty() {
        if let Err(e) = sync_overlay(&repo_url, &home) {
            egg_runner::log_error_stderr(use_err, &format!("egg-runner: {e:#}"));
            error!(cause = %format!("{e:#}"), "repository overlay sync failed");
            return ExitCode::from(1);
        }
    }

    // Panel consoles keep scrollback between restarts; start clean. The
    // sequence carries no newline, so flush past the line buffer.
    print!("\x1b[H\x1b[2J");
    let _ = io::Write::flush(&mut io::stdout());

    if cfg.show_hw_info {
        hwinfo::print_summary();
    }

    // Installed after the sync so git itself is never filtered, and before
    // the spawn so the child process group inherits it.
    if cfg.anti_disk_fill {
        if let Err(e) = seccomp::install_anti_disk_fill() {
            egg_runner::log_error_stderr(use_err, &format!("egg-runner: {e:#}"));
            error!(cause = %format!("{e:#}"), "failed to install anti-disk-fill filter");
            return ExitCode::from(1);
        }
    }

    // Input relay: bridge writes, the child-stdin copier reads.
    let (input_tx, input_rx) = mpsc::channel::<String>();
    // Completion notification: supervisor writes once, main reads once.
    let (notify_tx, notify_rx) = mpsc::channel::<()>();

    std::thread::spawn(move || {
        let stdin = io::stdin().lock();
        if let Err(e) = bridge::run_bridge(stdin, input_tx, bridge::raise_self_interrupt) {
            // Without the self-signal there is no way to regain supervisory
            // control; stopping here is the only safe option.
            error!(%e, "failed to deliver interrupt to supervisor");
            std::process::exit(1);
        }
    });

    std::thread::spawn(move || supervisor::run_supervisor(&cfg, input_rx, notify_tx));

    // Fatal supervisor paths halt the process directly; the only way to get
    // here is the single completion notification.
    match notify_rx.recv() {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::from(1),
    }
}

fn sync_overlay(repo_url: &str, home: &Path) -> anyhow::Result<()> {
    let branch = std::env::var("GIT_BRANCH").ok();
    let token = std::env::var("GIT_PAT").ok();
    let staging = std::env::var("EGG_RUNNER_STAGING_DIR")
        .unwrap_or_else(|_| DEFAULT_STAGING_DIR.to_string());

    let sp = Spinner::start("Grabbing git repo");
    let result = RemoteSpec::new(repo_url, branch.as_deref(), token.as_deref())
        .map(|remote| OverlaySync::new(remote, staging, home))
        .and_then(|sync| sync.run());
    match result {
        Ok(_) => {
            sp.success("Grabbed git repo");
            Ok(())
        }
        Err(e) => {
            sp.error("Could not grab git repo");
            Err(e)
        }
    }
}
