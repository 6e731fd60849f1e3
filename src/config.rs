//! Startup configuration.
//!
//! Two layers: `RunnerConfig`, the immutable per-run settings built once from
//! the CLI and handed to each component at construction (no component reads
//! process-global flag state), and `SoftwareConfig`, the YAML software
//! selection persisted in the server's home directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "egg_runner_config.yml";

/// Immutable per-run configuration.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Path of the executable/script handed to `/bin/bash -c`.
    pub script: String,
    /// Extra argument string appended verbatim after the script path.
    pub script_args: String,
    /// Support contact included in failure messages when non-empty.
    pub support_link: String,
    /// Install the fallocate-denying seccomp filter before spawning.
    pub anti_disk_fill: bool,
    /// Print the one-time hardware summary at startup.
    pub show_hw_info: bool,
}

/// Software selection persisted at `~/egg_runner_config.yml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftwareConfig {
    #[serde(default)]
    pub software: Software,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Software {
    #[serde(rename = "type", default)]
    pub software_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub java_version: Option<String>,
}

pub fn config_path(home: &Path) -> PathBuf {
    home.join(CONFIG_FILE_NAME)
}

/// Load the software config, creating an empty file when missing. An empty
/// file parses to defaults so a fresh install starts with no software type.
pub fn load_software_config(path: &Path) -> io::Result<SoftwareConfig> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            fs::File::create(path)?;
            String::new()
        }
        Err(e) => return Err(e),
    };
    if contents.trim().is_empty() {
        return Ok(SoftwareConfig::default());
    }
    serde_yaml::from_str(&contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
