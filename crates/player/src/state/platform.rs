//! Platform DI Container
//!
//! This module provides the `Platform` struct - a dependency injection container
//! that aggregates all platform-specific service implementations behind port traits.
//!
//! The Platform struct lives outside the ports layer because:
//! 1. It's a concrete implementation (DI container with Arc<dyn> fields)
//! 2. It contains type erasure logic (*Dyn traits and blanket impls)
//! 3. The ports layer should only contain pure interface definitions
//!
//! Usage:
//! - Created by `create_platform()` in infrastructure/platform/desktop.rs
//!   or assembled from test doubles
//! - Cloned into every playback service and into Dioxus context

use std::sync::Arc;

use chrono::NaiveTime;

use crate::ports::outbound::{
    AssetProbe, LocalBoxFuture, RandomProvider, SleepProvider, TimeProvider, WidgetHost,
};

/// Unified platform services container
#[derive(Clone)]
pub struct Platform {
    time: Arc<dyn TimeProviderDyn>,
    sleep: Arc<dyn SleepProviderDyn>,
    random: Arc<dyn RandomProviderDyn>,
    assets: Arc<dyn AssetProbe>,
    widgets: Arc<dyn WidgetHost>,
}

// =============================================================================
// Dynamic trait versions for Arc storage (need Send + Sync for Dioxus context)
// =============================================================================

trait TimeProviderDyn: Send + Sync {
    fn local_time(&self) -> NaiveTime;
}

trait SleepProviderDyn: Send + Sync {
    fn sleep_ms(&self, ms: u64) -> LocalBoxFuture<()>;
}

trait RandomProviderDyn: Send + Sync {
    fn random_range(&self, min: u64, max: u64) -> u64;
    fn random_index(&self, len: usize) -> usize;
}

// =============================================================================
// Blanket implementations - convert port traits to dyn-safe wrappers
// =============================================================================

impl<T: TimeProvider + Send + Sync> TimeProviderDyn for T {
    fn local_time(&self) -> NaiveTime {
        TimeProvider::local_time(self)
    }
}

impl<T: SleepProvider + Send + Sync> SleepProviderDyn for T {
    fn sleep_ms(&self, ms: u64) -> LocalBoxFuture<()> {
        SleepProvider::sleep_ms(self, ms)
    }
}

impl<T: RandomProvider + Send + Sync> RandomProviderDyn for T {
    fn random_range(&self, min: u64, max: u64) -> u64 {
        RandomProvider::random_range(self, min, max)
    }
    fn random_index(&self, len: usize) -> usize {
        RandomProvider::random_index(self, len)
    }
}

impl Platform {
    /// Create a new Platform from individual providers
    pub fn new<T, S, R, A, W>(time: T, sleep: S, random: R, assets: A, widgets: W) -> Self
    where
        T: TimeProvider + Send + Sync,
        S: SleepProvider + Send + Sync,
        R: RandomProvider + Send + Sync,
        A: AssetProbe,
        W: WidgetHost,
    {
        Self {
            time: Arc::new(time),
            sleep: Arc::new(sleep),
            random: Arc::new(random),
            assets: Arc::new(assets),
            widgets: Arc::new(widgets),
        }
    }

    /// Local wall-clock time of day
    pub fn local_time(&self) -> NaiveTime {
        self.time.local_time()
    }

    /// Sleep for the specified number of milliseconds
    pub fn sleep_ms(&self, ms: u64) -> LocalBoxFuture<()> {
        self.sleep.sleep_ms(ms)
    }

    /// Generate random u64 in range [min, max] (inclusive)
    pub fn random_range(&self, min: u64, max: u64) -> u64 {
        self.random.random_range(min, max)
    }

    /// Generate random index in range [0, len); 0 for empty ranges
    pub fn random_index(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.random.random_index(len)
    }

    /// Check whether an asset path can be displayed
    pub fn asset_exists(&self, path: &str) -> LocalBoxFuture<bool> {
        self.assets.exists(path)
    }

    /// The embeddable widget host
    pub fn widgets(&self) -> &Arc<dyn WidgetHost> {
        &self.widgets
    }
}
