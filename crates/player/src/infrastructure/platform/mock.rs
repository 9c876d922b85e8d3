//! Deterministic platform doubles for tests.
//!
//! Timers resolve immediately, randomness replays a fixed sequence and
//! assets/widgets answer from in-memory tables. Thread-safe via atomics so
//! the doubles can sit inside the `Platform` container.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::NaiveTime;

use crate::ports::outbound::platform::{
    AssetProbe, LocalBoxFuture, RandomProvider, SleepProvider, TimeProvider, WidgetHost,
};
use crate::state::Platform;

/// Fixed clock
#[derive(Clone)]
pub struct FixedTimeProvider {
    pub time: NaiveTime,
}

impl Default for FixedTimeProvider {
    fn default() -> Self {
        Self {
            time: NaiveTime::from_hms_opt(12, 30, 0).unwrap_or_default(),
        }
    }
}

impl TimeProvider for FixedTimeProvider {
    fn local_time(&self) -> NaiveTime {
        self.time
    }
}

/// Fixed random provider for deterministic testing.
///
/// Returns values from a provided sequence, cycling if needed.
#[derive(Debug, Clone)]
pub struct FixedRandomProvider {
    values: Arc<Vec<u64>>,
    index: Arc<AtomicUsize>,
}

impl FixedRandomProvider {
    /// Create a new FixedRandomProvider with the given sequence of values.
    pub fn new(values: Vec<u64>) -> Self {
        let values = if values.is_empty() { vec![0] } else { values };
        Self {
            values: Arc::new(values),
            index: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a FixedRandomProvider that always returns the same value.
    pub fn constant(value: u64) -> Self {
        Self::new(vec![value])
    }

    fn next_value(&self) -> u64 {
        let idx = self.index.fetch_add(1, Ordering::SeqCst);
        self.values[idx % self.values.len()]
    }
}

impl RandomProvider for FixedRandomProvider {
    fn random_range(&self, min: u64, max: u64) -> u64 {
        // Clamp to the requested range
        self.next_value().clamp(min.min(max), max.max(min))
    }

    fn random_index(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_value() as usize) % len
    }
}

type SleepHook = Arc<dyn Fn(usize, u64) + Send + Sync>;

/// Sleep that completes after a single yield to the scheduler.
///
/// Records every requested duration. An optional hook runs on each call
/// with the call index and duration, which lets a test act "while" a
/// sequence is suspended.
#[derive(Clone, Default)]
pub struct InstantSleepProvider {
    calls: Arc<Mutex<Vec<u64>>>,
    hook: Option<SleepHook>,
}

impl InstantSleepProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hook(hook: impl Fn(usize, u64) + Send + Sync + 'static) -> Self {
        Self {
            calls: Arc::default(),
            hook: Some(Arc::new(hook)),
        }
    }

    /// Durations requested so far, in call order
    pub fn calls(&self) -> Vec<u64> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl SleepProvider for InstantSleepProvider {
    fn sleep_ms(&self, ms: u64) -> LocalBoxFuture<()> {
        let index = match self.calls.lock() {
            Ok(mut calls) => {
                calls.push(ms);
                calls.len() - 1
            }
            Err(_) => 0,
        };
        if let Some(hook) = &self.hook {
            hook(index, ms);
        }
        Box::pin(tokio::task::yield_now())
    }
}

/// Asset probe answering from a fixed set of paths
#[derive(Clone, Default)]
pub struct StaticAssetProbe {
    present: Arc<HashSet<String>>,
    probes: Arc<AtomicUsize>,
}

impl StaticAssetProbe {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            present: Arc::new(paths.into_iter().map(Into::into).collect()),
            probes: Arc::default(),
        }
    }

    /// How many existence checks were made
    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }
}

impl AssetProbe for StaticAssetProbe {
    fn exists(&self, path: &str) -> LocalBoxFuture<bool> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        let found = self.present.contains(path);
        Box::pin(async move { found })
    }
}

/// Widget host whose API becomes available after a number of checks
#[derive(Clone, Default)]
pub struct ScriptedWidgetHost {
    /// `None`: never available
    ready_after_checks: Option<usize>,
    script_present: bool,
    inject_result: bool,
    checks: Arc<AtomicUsize>,
    activations: Arc<AtomicUsize>,
    injections: Arc<AtomicUsize>,
}

impl ScriptedWidgetHost {
    /// A host where the script never loads
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// A host whose API is usable immediately
    pub fn ready() -> Self {
        Self {
            ready_after_checks: Some(0),
            ..Self::default()
        }
    }

    /// Script tag already present; API appears after `checks` availability checks
    pub fn loading(checks: usize) -> Self {
        Self {
            ready_after_checks: Some(checks),
            script_present: true,
            ..Self::default()
        }
    }

    pub fn with_inject_result(mut self, loaded: bool) -> Self {
        self.inject_result = loaded;
        self
    }

    pub fn activations(&self) -> usize {
        self.activations.load(Ordering::SeqCst)
    }

    pub fn injections(&self) -> usize {
        self.injections.load(Ordering::SeqCst)
    }

    pub fn checks(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }
}

impl WidgetHost for ScriptedWidgetHost {
    fn api_available(&self) -> bool {
        let seen = self.checks.fetch_add(1, Ordering::SeqCst);
        match self.ready_after_checks {
            Some(after) => seen >= after,
            None => false,
        }
    }

    fn script_present(&self, _url: &str) -> bool {
        self.script_present
    }

    fn inject_script(&self, _url: &str) -> LocalBoxFuture<bool> {
        self.injections.fetch_add(1, Ordering::SeqCst);
        let loaded = self.inject_result;
        Box::pin(async move { loaded })
    }

    fn activate_embeds(&self) {
        self.activations.fetch_add(1, Ordering::SeqCst);
    }
}

/// Test platform: instant sleeps, fixed randomness, no assets, no widget
pub fn create_test_platform() -> Platform {
    test_platform_with(
        InstantSleepProvider::new(),
        FixedRandomProvider::constant(0),
        StaticAssetProbe::default(),
        ScriptedWidgetHost::unavailable(),
    )
}

pub fn test_platform_with<A: AssetProbe, W: WidgetHost>(
    sleep: InstantSleepProvider,
    random: FixedRandomProvider,
    assets: A,
    widgets: W,
) -> Platform {
    Platform::new(FixedTimeProvider::default(), sleep, random, assets, widgets)
}
