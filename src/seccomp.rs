//! Anti-disk-fill syscall filter.
//!
//! Hosted plans meter disk; a payload can fill the volume with one fallocate
//! call faster than the panel reacts. The filter default-allows everything
//! and kills the process on fallocate. It is installed once at startup with
//! TSYNC so every thread carries it, and the bash child inherits it across
//! exec (no-new-privs is set by the loader).

#[cfg(target_os = "linux")]
pub fn install_anti_disk_fill() -> anyhow::Result<()> {
    use anyhow::{anyhow, Context};
    use seccompiler::{
        apply_filter_all_threads, BpfProgram, SeccompAction, SeccompFilter, SeccompRule,
        TargetArch,
    };
    use std::collections::BTreeMap;

    let mut rules: BTreeMap<i64, Vec<SeccompRule>> = BTreeMap::new();
    // No argument rules: every fallocate invocation matches.
    rules.insert(libc::SYS_fallocate, vec![]);

    let arch = TargetArch::try_from(std::env::consts::ARCH)
        .map_err(|_| anyhow!("unsupported architecture: {}", std::env::consts::ARCH))?;
    let filter = SeccompFilter::new(
        rules,
        SeccompAction::Allow,
        SeccompAction::KillProcess,
        arch,
    )
    .context("failed to build seccomp filter")?;
    let bpf: BpfProgram = filter
        .try_into()
        .context("failed to compile seccomp filter")?;
    apply_filter_all_threads(&bpf).context("failed to apply seccomp filter")?;
    tracing::debug!("anti-disk-fill seccomp filter installed");
    Ok(())
}

#[cfg(not(target_os = "linux"))]
pub fn install_anti_disk_fill() -> anyhow::Result<()> {
    // seccomp is Linux-only; other hosts run unfiltered.
    tracing::warn!("anti-disk-fill filter unavailable on this platform");
    Ok(())
}
