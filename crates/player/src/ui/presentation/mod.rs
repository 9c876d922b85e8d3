//! Presentation layer - screen state and Dioxus components

#[cfg(feature = "desktop")]
pub mod components;
pub mod state;
