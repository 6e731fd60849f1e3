//! One-shot conversion of legacy marker files into the YAML software config.
//!
//! Earlier releases encoded the selected software as a marker file dropped in
//! the server's home directory. When no `egg_runner_config.yml` exists yet,
//! the markers are translated into the config and the consumed files removed.
//! Conversion problems are warnings, never fatal: the runner still starts and
//! the user can recreate the config by hand.

use std::fs;
use std::path::Path;

use crate::config::{config_path, Software, SoftwareConfig};

/// Marker file → (software type, java version). `config.yml` needs content
/// inspection and is handled separately; unknown names map to None.
pub(crate) fn marker_mapping(name: &str) -> Option<(&'static str, Option<&'static str>)> {
    match name {
        "velocity.toml" => Some(("mc_proxy_velocity", Some("17.0.7-tem"))),
        "waterfall.yml" => Some(("mc_proxy_waterfall", Some("17.0.7-tem"))),
        "insurgency.server" => Some(("steam_insurgency", None)),
        "njsbot.server" => Some(("discord_nodejs", None)),
        "nodemonnjsbot.server" => Some(("discord_nodejsnodemon", None)),
        "pybot.server" => Some(("discord_python", None)),
        "phpbot.server" => Some(("discord_php", None)),
        "java8" => Some(("", Some("8.0.382-tem"))),
        "java11" => Some(("", Some("11.0.20-tem"))),
        "java17" => Some(("", Some("17.0.8-tem"))),
        "bedrock_server" => Some(("mc_bedrock_vanilla", None)),
        "PocketMine-MP.phar" => Some(("mc_bedrock_pmmp", None)),
        "fabric-server-launch.jar" => Some(("mc_java_fabric", Some("17.0.8-tem"))),
        "unix_args.txt" => Some(("mc_java_forge", Some("17.0.8-tem"))),
        "Cuberite.server" => Some(("mc_java_cuberite", None)),
        "magma.yml" => Some(("mc_java_magma", None)),
        "Lavalink.jar" => Some(("voice_lavalink", None)),
        "TeaSpeakServer" => Some(("voice_teaspeak", None)),
        "ts3server" => Some(("voice_teamspeak3", None)),
        _ => None,
    }
}

fn software(software_type: &str, java_version: Option<&str>) -> SoftwareConfig {
    SoftwareConfig {
        software: Software {
            software_type: software_type.to_string(),
            java_version: java_version.map(|v| v.to_string()),
        },
    }
}

fn warn_convert_failed(use_err: bool) {
    crate::log_warn_stderr(
        use_err,
        "Uh oh! I couldn't convert the old config... You can recreate egg_runner_config.yml by hand.",
    );
}

/// Scan `home` for legacy marker files and write the equivalent YAML config.
/// Consumed markers are deleted; `config.yml` is only inspected. When several
/// markers are present the last one in directory order wins, matching the
/// legacy converter.
pub fn convert_legacy_config(home: &Path) {
    let use_err = crate::color_enabled_stderr();
    eprintln!(
        "{}",
        crate::paint(
            use_err,
            "\x1b[1m\x1b[38;5;220m",
            "Converting old config, this may take a bit..."
        )
    );

    let entries = match fs::read_dir(home) {
        Ok(e) => e,
        Err(_) => {
            warn_convert_failed(use_err);
            return;
        }
    };

    let mut new_config: Option<SoftwareConfig> = None;

    for entry in entries.flatten() {
        let name_os = entry.file_name();
        let Some(name) = name_os.to_str() else {
            continue;
        };
        if name == "config.yml" {
            // BungeeCord installs carried a config.yml; its replacement runs
            // on the waterfall proxy type. The file stays in place.
            match fs::read_to_string(home.join(name)) {
                Ok(s) => {
                    if s.lines().any(|l| l.contains("bungeecord")) {
                        new_config = Some(software("mc_proxy_waterfall", Some("17.0.7-tem")));
                    }
                }
                Err(_) => {
                    warn_convert_failed(use_err);
                    return;
                }
            }
        } else if let Some((software_type, java_version)) = marker_mapping(name) {
            new_config = Some(software(software_type, java_version));
            let _ = fs::remove_file(home.join(name));
        }
    }

    let Some(cfg) = new_config else {
        return;
    };

    let data = match serde_yaml::to_string(&cfg) {
        Ok(d) => d,
        Err(_) => {
            warn_convert_failed(use_err);
            return;
        }
    };
    if fs::write(config_path(home), data).is_err() {
        warn_convert_failed(use_err);
    }
}
