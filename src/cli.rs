use clap::Parser;

use egg_runner::config::RunnerConfig;
use egg_runner::ColorMode;

#[derive(Parser, Debug)]
#[command(
    name = "egg-runner",
    version,
    about = "Supervise a hosted server process: bridge panel stdin signals, pipe stdio, and optionally overlay a git repository onto the working directory."
)]
pub(crate) struct Cli {
    /// Path of the executable to supervise, e.g. /home/container/start.sh
    #[arg(long, default_value = "")]
    pub(crate) script: String,

    /// Argument string appended after the script path, e.g. "--enable-something"
    #[arg(long = "script-args", default_value = "")]
    pub(crate) script_args: String,

    /// Support contact included in failure messages, e.g. https://example.com
    #[arg(long = "support-link", default_value = "")]
    pub(crate) support_link: String,

    /// Deny the disk-filling fallocate syscall for the whole process tree
    #[arg(
        long = "anti-disk-fill",
        default_value_t = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        action = clap::ArgAction::Set
    )]
    pub(crate) anti_disk_fill: bool,

    /// Print a one-time hardware summary before the child starts
    #[arg(long = "show-hw-info")]
    pub(crate) show_hw_info: bool,

    /// Colorize output: auto|always|never
    #[arg(long = "color", value_enum)]
    pub(crate) color: Option<ColorMode>,
}

impl Cli {
    pub(crate) fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            script: self.script.clone(),
            script_args: self.script_args.clone(),
            support_link: self.support_link.clone(),
            anti_disk_fill: self.anti_disk_fill,
            show_hw_info: self.show_hw_info,
        }
    }
}
