use crate::harness::queue::MemoryQueue;
use crate::harness::{CapturedEvent, init_test_tracing};
use arc_swap::ArcSwap;
use reqwall_core::conf::{load_config, resolve_config_file};
use reqwall_core::filter::{Decision, FilterStats, FilterStatsSnapshot};
use reqwall_core::rules::Verdict;
use reqwall_core::runtime::{ReloadError, RuntimeState, build_runtime_state, reload_runtime_state};
use reqwall_core::server::{SessionEnd, SessionLimits, run_session};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;
use tempfile::TempDir;

/// Handle to a filter snapshot built from a fixture config directory.
///
/// The fixture is copied into a private temp directory first, so tests may
/// rewrite rules and reload without affecting each other.
pub struct TestFilter {
    dir: TempDir,
    state: Arc<ArcSwap<RuntimeState>>,
    stats: FilterStats,
}

impl TestFilter {
    pub fn start(fixture: &str) -> Self {
        // Initialize tracing (this must happen first).
        init_test_tracing(events());

        let fixture_dir = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("fixtures")
            .join("config")
            .join(fixture);

        assert!(
            fixture_dir.exists(),
            "fixture config directory does not exist: {:?}",
            fixture_dir
        );

        let dir = tempfile::tempdir().expect("failed to create temp dir");
        for entry in fs::read_dir(&fixture_dir).expect("failed to read fixture dir") {
            let entry = entry.expect("failed to read fixture entry");
            fs::copy(entry.path(), dir.path().join(entry.file_name()))
                .expect("failed to copy fixture file");
        }

        let cfg = load_config(dir.path()).expect("failed to load fixture config");

        // Wrap in ArcSwap (matches production shape)
        let state = Arc::new(ArcSwap::from_pointee(build_runtime_state(&cfg)));

        Self {
            dir,
            state,
            stats: FilterStats::new(),
        }
    }

    pub fn config_dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_file(&self) -> PathBuf {
        resolve_config_file(self.dir.path())
    }

    pub fn evaluate(&self, frame: &[u8]) -> Decision {
        self.state.load().evaluate(frame, &self.stats)
    }

    pub fn verdict(&self, frame: &[u8]) -> Verdict {
        self.evaluate(frame).verdict
    }

    /// Push `frames` through a full dispatch session and collect the verdicts.
    pub fn run_session(&self, frames: Vec<Vec<u8>>) -> Vec<Verdict> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let mut queue = MemoryQueue::new(frames, shutdown.clone());
        let limits = SessionLimits::new(
            Some(Duration::from_secs(5)),
            Duration::from_millis(15),
            Duration::ZERO,
        );

        let end = run_session(&mut queue, &self.state, &limits, &shutdown, &self.stats);
        assert_eq!(end, SessionEnd::Shutdown, "session hit its deadline");

        queue.verdicts().to_vec()
    }

    pub fn write_rules(&self, json: &str) {
        fs::write(self.state.load().rules_path.clone(), json).expect("failed to write rules");
    }

    pub fn write_config(&self, hcl: &str) {
        fs::write(self.config_file(), hcl).expect("failed to write config");
    }

    pub fn reload(&self) -> Result<(), ReloadError> {
        reload_runtime_state(Some(&self.config_file()), None, &self.state)
    }

    pub fn rule_count(&self) -> usize {
        self.state.load().filter.rules().len()
    }

    pub fn stats(&self) -> FilterStatsSnapshot {
        self.stats.snapshot()
    }

    /// Captured events that mention this filter's config directory.
    pub fn events(&self) -> Vec<CapturedEvent> {
        let needle = self.dir.path().display().to_string();
        events()
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.mentions(&needle))
            .cloned()
            .collect()
    }
}

static EVENTS: OnceLock<Arc<Mutex<Vec<CapturedEvent>>>> = OnceLock::new();

fn events() -> Arc<Mutex<Vec<CapturedEvent>>> {
    EVENTS
        .get_or_init(|| Arc::new(Mutex::new(Vec::new())))
        .clone()
}
