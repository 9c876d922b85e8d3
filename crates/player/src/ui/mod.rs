//! User interface
//!
//! `presentation::state` is always built; the Dioxus shell needs the
//! `desktop` feature.

pub mod presentation;

#[cfg(feature = "desktop")]
mod app;

#[cfg(feature = "desktop")]
pub use app::app;
