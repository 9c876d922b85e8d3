//! Desktop platform implementations
//!
//! Provides platform-specific implementations for desktop using
//! tokio timers, the rand crate and the local filesystem.

use std::path::PathBuf;

use chrono::{Local, NaiveTime};

use crate::ports::outbound::platform::{
    AssetProbe, LocalBoxFuture, RandomProvider, SleepProvider, TimeProvider, WidgetHost,
};
use crate::state::Platform;

/// Desktop time provider using the local timezone
#[derive(Clone, Default)]
pub struct DesktopTimeProvider;

impl TimeProvider for DesktopTimeProvider {
    fn local_time(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// Desktop random provider using rand crate
#[derive(Clone, Default)]
pub struct DesktopRandomProvider;

impl RandomProvider for DesktopRandomProvider {
    fn random_range(&self, min: u64, max: u64) -> u64 {
        use rand::Rng;
        if min >= max {
            return min;
        }
        rand::thread_rng().gen_range(min..=max)
    }

    fn random_index(&self, len: usize) -> usize {
        use rand::Rng;
        if len == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..len)
    }
}

/// Desktop sleep provider using tokio timer
#[derive(Clone, Default)]
pub struct DesktopSleepProvider;

impl SleepProvider for DesktopSleepProvider {
    fn sleep_ms(&self, ms: u64) -> LocalBoxFuture<()> {
        Box::pin(async move {
            tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
        })
    }
}

/// Asset probe backed by files under an asset root directory
#[derive(Clone)]
pub struct FsAssetProbe {
    root: PathBuf,
}

impl FsAssetProbe {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetProbe for FsAssetProbe {
    fn exists(&self, path: &str) -> LocalBoxFuture<bool> {
        let full = self.root.join(path.trim_start_matches('/'));
        Box::pin(async move {
            match tokio::fs::metadata(&full).await {
                Ok(meta) => meta.is_file(),
                Err(e) => {
                    tracing::debug!("Asset not available at {:?}: {}", full, e);
                    false
                }
            }
        })
    }
}

/// Desktop widget host
///
/// There is no script runtime on desktop, so the widget API never becomes
/// available and embeds always take the direct-source fallback.
#[derive(Clone, Default)]
pub struct DesktopWidgetHost;

impl WidgetHost for DesktopWidgetHost {
    fn api_available(&self) -> bool {
        false
    }

    fn script_present(&self, _url: &str) -> bool {
        false
    }

    fn inject_script(&self, url: &str) -> LocalBoxFuture<bool> {
        tracing::debug!("No script runtime on desktop; skipping {}", url);
        Box::pin(async { false })
    }

    fn activate_embeds(&self) {
        // No-op on desktop - embeds are activated by the direct-source fallback
    }
}

/// Create platform services for desktop
pub fn create_platform(asset_root: impl Into<PathBuf>) -> Platform {
    Platform::new(
        DesktopTimeProvider,
        DesktopSleepProvider,
        DesktopRandomProvider,
        FsAssetProbe::new(asset_root),
        DesktopWidgetHost,
    )
}
