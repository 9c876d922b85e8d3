//! Platform-specific implementations
//!
//! This module provides the implementations of the platform abstraction
//! traits defined in ports/outbound/platform.rs.

mod desktop;

#[cfg(any(test, feature = "testing"))]
pub mod mock;

pub use desktop::{
    create_platform, DesktopRandomProvider, DesktopSleepProvider, DesktopTimeProvider,
    DesktopWidgetHost, FsAssetProbe,
};
