use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Pid file that lives exactly as long as this value.
///
/// Dropping the guard removes the file, so a startup error that returns
/// early through `?` cannot leave a stale pid behind for `reqwall reload`.
#[derive(Debug)]
pub struct PidFileGuard {
    path: PathBuf,
    pid: u32,
}

impl PidFileGuard {
    /// Write the current process PID to `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let pid = write_pid(&path)?;
        Ok(Self { path, pid })
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for PidFileGuard {
    fn drop(&mut self) {
        remove_pid(&self.path);
    }
}

fn write_pid(path: &Path) -> Result<u32> {
    let pid = std::process::id();
    fs::write(path, format!("{pid}\n"))
        .with_context(|| format!("failed to write pid file {}", path.display()))?;
    Ok(pid)
}

/// Remove a pid file (best-effort).
fn remove_pid(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        tracing::debug!(error = %e, pid_file = %path.display(), "pid file not removed");
    }
}
