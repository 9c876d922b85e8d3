//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters and view
//! state must implement, allowing application services to drive playback
//! without depending on concrete implementations.

pub mod platform;
pub mod view;

pub use platform::{
    AssetProbe, LocalBoxFuture, RandomProvider, SleepProvider, TimeProvider, WidgetHost,
};
pub use view::{ChatShellPort, ChatStatus, FragmentId, Screen, ThreadViewPort};

#[cfg(any(test, feature = "testing"))]
pub use platform::{MockAssetProbe, MockWidgetHost};
#[cfg(any(test, feature = "testing"))]
pub use view::MockThreadViewPort;
