//! Presentation state
//!
//! `ExperienceState` is the renderer-independent screen model; the Dioxus
//! components and the headless runner both read it.

mod experience_state;

pub use experience_state::{ExperienceSnapshot, ExperienceState, Fragment, RenderedFragment};
