//! Mărțișor Player crate.
//!
//! Sequenced chat playback on top of `martisor-domain`: ports, platform
//! adapters, the experience session and the screen state. The Dioxus
//! desktop shell is behind the `desktop` feature.

pub mod application;
pub mod infrastructure;
pub mod ports;
pub mod runner;
pub mod state;
pub mod ui;

pub use application::{Experience, PlayerConfig};
pub use state::Platform;
pub use ui::presentation::state::ExperienceState;

#[cfg(feature = "desktop")]
pub use ui::app;
