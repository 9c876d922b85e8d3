//! Platform abstraction ports
//!
//! These traits abstract platform-specific operations so that:
//! 1. Playback and session code remains platform-agnostic
//! 2. Platform-specific code is isolated in infrastructure
//! 3. Code becomes easily testable with deterministic implementations
//!
//! NOTE: The `Platform` struct (DI container) that aggregates these traits
//! lives in `state/platform.rs`. Ports layer contains only trait definitions.

use std::{future::Future, pin::Pin};

use chrono::NaiveTime;

/// Boxed future returned by platform operations.
///
/// Not `Send`: playback runs on a single-threaded scheduler.
pub type LocalBoxFuture<T> = Pin<Box<dyn Future<Output = T> + 'static>>;

/// Time operations abstraction
pub trait TimeProvider: Clone + 'static {
    /// Wall-clock time of day in the local timezone (status bar clock)
    fn local_time(&self) -> NaiveTime;
}

/// Async sleep abstraction
///
/// Every delay of a playback sequence goes through here, which is what
/// makes sequences suspendable and testable without real timers.
pub trait SleepProvider: Clone + 'static {
    fn sleep_ms(&self, ms: u64) -> LocalBoxFuture<()>;
}

/// Random number generation abstraction
pub trait RandomProvider: Clone + 'static {
    /// Generate random u64 in range [min, max] (inclusive)
    fn random_range(&self, min: u64, max: u64) -> u64;

    /// Generate random index in range [0, len)
    fn random_index(&self, len: usize) -> usize;
}

/// Existence check for display assets addressed by path
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait AssetProbe: Send + Sync + 'static {
    /// Resolves to `true` when the asset can be displayed
    fn exists(&self, path: &str) -> LocalBoxFuture<bool>;
}

/// Host for the third-party embeddable form widget
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait WidgetHost: Send + Sync + 'static {
    /// Whether the widget API is loaded and usable
    fn api_available(&self) -> bool;

    /// Whether a script element for `url` was already added
    fn script_present(&self, url: &str) -> bool;

    /// Add the script element; resolves to whether it loaded
    fn inject_script(&self, url: &str) -> LocalBoxFuture<bool>;

    /// Ask the widget API to activate every pending embed
    fn activate_embeds(&self);
}
