use crate::conf::{RuntimeConfig, load_rules, validate_config};
use crate::filter::FilterStats;
use crate::runtime::{build_runtime_state, reload_runtime_state};
use crate::server::dispatch::{SessionEnd, SessionLimits, run_session};
use crate::server::nfqueue::NfQueue;
use crate::server::pid::PidFileGuard;
use crate::server::reload::ReloadHandle;
use anyhow::{Context, Result, bail};
use arc_swap::ArcSwap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Run one filtering session with the given configuration.
///
/// `config_path` is re-read on SIGHUP; `None` keeps the built-in defaults
/// and reloads only the rule file.
///
/// Startup order:
/// 1. Reject configurations with validation errors
/// 2. Build the initial snapshot (fail-open on rule load failure)
/// 3. Start the control plane (SIGHUP reloads, ctrl-c shutdown)
/// 4. Bind the packet queue; failure here is fatal
/// 5. Dispatch until the session deadline or shutdown
pub fn run(config_path: Option<PathBuf>, rules_override: Option<PathBuf>, config: RuntimeConfig) -> Result<()> {
    use tokio::runtime::Builder;

    //--------------------------------------------------------------------------
    // Configuration errors are fatal, rule file errors are not
    //--------------------------------------------------------------------------
    let rules_for_validation = load_rules(&config.rules_path()).unwrap_or_default();
    let report = validate_config(&config, &rules_for_validation);
    for issue in &report.warnings {
        tracing::warn!(origin = %issue.origin, "{}", issue.message);
    }
    if report.has_errors() {
        for issue in &report.errors {
            tracing::error!(origin = %issue.origin, "{}", issue.message);
        }
        bail!("invalid configuration ({} errors)", report.errors.len());
    }

    // Attempt to write pid file (best-effort); removed on every return path
    let _pid_file = config.server.pid_file.as_ref().and_then(|pid_file| {
        match PidFileGuard::create(pid_file) {
            Ok(guard) => {
                tracing::info!(pid = guard.pid(), pid_file = %guard.path().display(), "pid file written");
                Some(guard)
            }
            Err(e) => {
                tracing::warn!(error = %e, pid_file = %pid_file.display(), "failed to write pid file; continuing");
                None
            }
        }
    });

    // Build initial runtime state (reloadable)
    let state = Arc::new(ArcSwap::from_pointee(build_runtime_state(&config)));

    // Control-plane runtime (signals + reload only)
    let control_rt = Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .context("failed to build control-plane Tokio runtime")?;

    // Reload wiring
    let reload = ReloadHandle::new();

    // Spawn signal handler
    control_rt.spawn({
        let reload = reload.clone();
        async move {
            if let Err(e) = reload.install_signal_handler().await {
                tracing::error!(error = %e, "SIGHUP handler failed; reloads disabled");
            }
        }
    });

    // Spawn reload loop
    control_rt.spawn({
        let mut reload_rx = reload.subscribe();
        let state = state.clone();
        let config_path = config_path.clone();

        async move {
            tracing::info!("Reload loop started");

            while reload_rx.changed().await.is_ok() {
                tracing::info!("Reload requested");

                match reload_runtime_state(config_path.as_deref(), rules_override.as_deref(), &state) {
                    Ok(_) => tracing::info!("reload successful"),
                    Err(e) => tracing::error!(error = %e, "reload failed; keeping current rules"),
                }
            }
        }
    });

    // Shutdown on ctrl-c
    let shutdown = Arc::new(AtomicBool::new(false));
    ctrlc::set_handler({
        let shutdown = shutdown.clone();
        move || {
            tracing::info!("shutdown requested");
            shutdown.store(true, Ordering::Relaxed);
        }
    })?;

    //--------------------------------------------------------------------------
    // Hard fail: queue setup
    //--------------------------------------------------------------------------
    let mut queue = NfQueue::open(&config.queue).context("packet queue setup failed")?;

    let session = match config.server.session_secs {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };
    let limits = SessionLimits::new(
        session,
        Duration::from_millis(config.queue.verdict_timeout_ms),
        Duration::from_micros(config.queue.idle_backoff_us),
    );

    tracing::info!(
        queue = config.queue.num,
        session_secs = config.server.session_secs,
        "filtering session started"
    );

    let stats = FilterStats::new();
    let end = run_session(&mut queue, &state, &limits, &shutdown, &stats);
    log_session_end(end, &stats);

    // Dropping the control plane stops the signal and reload tasks.
    control_rt.shutdown_background();

    Ok(())
}

fn log_session_end(end: SessionEnd, stats: &FilterStats) {
    let s = stats.snapshot();
    let reason = match end {
        SessionEnd::DeadlineElapsed => "deadline elapsed",
        SessionEnd::Shutdown => "shutdown requested",
    };

    tracing::info!(
        reason,
        packets = s.packets,
        accepted = s.accepted,
        dropped = s.dropped,
        not_http = s.not_http,
        malformed = s.malformed,
        "filtering session ended"
    );
}
