use std::path::Path;
use std::process::{Command, Output, Stdio};

/// Run a git command with optional -C <repo>. Returns Output on invocation success.
pub fn git(repo: Option<&Path>, args: &[&str]) -> std::io::Result<Output> {
    let mut cmd = Command::new("git");
    if let Some(r) = repo {
        cmd.arg("-C").arg(r);
    }
    for a in args {
        cmd.arg(a);
    }
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    cmd.output()
}

/// Run a git command and capture trimmed stdout as UTF-8 String on success.
pub fn git_stdout_str(repo: Option<&Path>, args: &[&str]) -> Option<String> {
    git(repo, args).ok().and_then(|o| {
        if o.status.success() {
            Some(String::from_utf8_lossy(&o.stdout).trim().to_string())
        } else {
            None
        }
    })
}

/// Run a git command, requiring success. Captured stderr is folded into the
/// error message so fatal sync paths can report the underlying git failure.
pub fn git_checked(repo: Option<&Path>, args: &[&str]) -> std::io::Result<Output> {
    let out = git(repo, args)?;
    if out.status.success() {
        Ok(out)
    } else {
        let detail = String::from_utf8_lossy(&out.stderr).trim().to_string();
        Err(std::io::Error::other(format!(
            "git {} failed: {}",
            args.join(" "),
            if detail.is_empty() {
                out.status.to_string()
            } else {
                detail
            }
        )))
    }
}
