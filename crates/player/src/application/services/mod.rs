//! Application services
//!
//! Each service wraps one concern of a playback run and holds a clone of
//! the `Platform`:
//! - `playback_service` - runs scripts step by step under a sequence token
//! - `asset_service` - resolves image paths once per session
//! - `embed_service` - loads the form widget and activates embeds

pub mod asset_service;
pub mod embed_service;
pub mod playback_service;

pub use asset_service::AssetResolver;
pub use embed_service::{EmbedActivation, EmbedLoader, WidgetStatus};
pub use playback_service::{PlaybackOutcome, StepPlayer};
