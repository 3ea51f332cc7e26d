use anyhow::{Context, Result};
use nix::sys::signal::{Signal, kill};
use nix::unistd::Pid;
use std::fs;
use std::path::Path;

/// Ask a running filter to re-read its configuration and rules.
pub fn run<P: AsRef<Path>>(pid_file: P) -> Result<()> {
    let pid_file = pid_file.as_ref();

    let contents = fs::read_to_string(pid_file)
        .with_context(|| format!("failed to read pid file {}", pid_file.display()))?;

    let pid: i32 = contents
        .trim()
        .parse()
        .with_context(|| format!("invalid pid file contents in {}", pid_file.display()))?;

    let pid = Pid::from_raw(pid);

    kill(pid, Signal::SIGHUP).with_context(|| format!("failed to send SIGHUP to pid {}", pid))?;

    println!("Sent SIGHUP to reqwall (pid {})", pid);

    Ok(())
}
