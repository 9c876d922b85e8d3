//! Application layer: configuration, services and the experience session

pub mod config;
pub mod services;
pub mod session;


pub use config::{ConfigError, PlayerConfig, WidgetConfig};
pub use session::{Experience, IntroTask, Playback};
