//! One-time hardware summary printed before the child starts.
//!
//! Shared hosts oversubscribe; the summary gives users a quick read on what
//! their container actually sees. Printed to stdout so the panel console
//! shows it alongside the child's own output. A failed probe skips the
//! summary instead of blocking startup.

use sysinfo::System;

/// Binary-unit byte formatting (KiB/MiB/GiB...).
pub fn format_ibytes(bytes: u64) -> String {
    const UNITS: [&str; 7] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// Usage percentage with threshold coloring: ≥90% red, ≥70% amber, else green.
fn painted_percent(use_color: bool, percent: f64) -> String {
    let code = if percent >= 90.0 {
        "\x1b[3m\x1b[1m\x1b[38;5;210m"
    } else if percent >= 70.0 {
        "\x1b[3m\x1b[1m\x1b[38;5;214m"
    } else {
        "\x1b[3m\x1b[1m\x1b[38;5;34m"
    };
    crate::paint(use_color, code, &format!("({percent:.2}%)"))
}

fn percent_of(used: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        used as f64 / total as f64 * 100.0
    }
}

pub fn print_summary() {
    let mut sys = System::new();
    sys.refresh_memory();
    sys.refresh_cpu();

    let total_ram = sys.total_memory();
    if total_ram == 0 {
        // Probe failed; the summary is decoration, not a startup requirement.
        return;
    }
    let used_ram = sys.used_memory();
    let total_swap = sys.total_swap();
    let used_swap = sys.used_swap();

    let use_out = crate::color_enabled_stdout();
    println!(
        "{}",
        crate::paint(use_out, "\x1b[4m\x1b[1m\x1b[38;5;33m", "Hardware Information:")
    );

    if let Some(cpu) = sys.cpus().first() {
        println!(
            "  {}",
            crate::paint(
                use_out,
                "\x1b[38;5;33m",
                &format!("CPU Model: {}", cpu.brand())
            )
        );
    }

    println!(
        "  {} {}",
        crate::paint(
            use_out,
            "\x1b[38;5;33m",
            &format!(
                "RAM Usage: {} / {}",
                format_ibytes(used_ram),
                format_ibytes(total_ram)
            )
        ),
        painted_percent(use_out, percent_of(used_ram, total_ram))
    );
    println!(
        "  {} {}",
        crate::paint(
            use_out,
            "\x1b[38;5;33m",
            &format!(
                "Swap Usage: {} / {}",
                format_ibytes(used_swap),
                format_ibytes(total_swap)
            )
        ),
        painted_percent(use_out, percent_of(used_swap, total_swap))
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_ibytes_small_values_stay_bytes() {
        assert_eq!(format_ibytes(0), "0 B");
        assert_eq!(format_ibytes(1023), "1023 B");
    }

    #[test]
    fn format_ibytes_scales_units() {
        assert_eq!(format_ibytes(1024), "1.0 KiB");
        assert_eq!(format_ibytes(1536), "1.5 KiB");
        assert_eq!(format_ibytes(8 * 1024 * 1024 * 1024), "8.0 GiB");
    }

    #[test]
    fn percent_of_empty_total_is_zero() {
        assert_eq!(percent_of(5, 0), 0.0);
        assert_eq!(percent_of(1, 2), 50.0);
    }
}
