//! Embedded form widget loader
//!
//! The RSVP form is a third-party embed that stays blank until the widget
//! script activates it. Loading never blocks playback and never fails
//! loudly: when the script cannot be used the embeds get their source
//! assigned directly.

use std::sync::Arc;

use martisor_domain::content::TALLY_SCRIPT_URL;
use martisor_domain::{SequenceRegistry, SequenceToken};

use crate::application::config::WidgetConfig;
use crate::ports::outbound::ThreadViewPort;
use crate::state::Platform;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetStatus {
    Ready,
    Unavailable,
}

/// What `load_embeds` ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedActivation {
    /// The widget API activated the embeds
    Widget,
    /// Sources assigned directly to this many embeds
    DirectSource(usize),
    /// The sequence moved on while the script was loading
    Stale,
}

#[derive(Clone)]
pub struct EmbedLoader {
    platform: Platform,
    view: Arc<dyn ThreadViewPort>,
    sequences: SequenceRegistry,
    config: WidgetConfig,
}

impl EmbedLoader {
    pub fn new(
        platform: Platform,
        view: Arc<dyn ThreadViewPort>,
        sequences: SequenceRegistry,
        config: WidgetConfig,
    ) -> Self {
        Self {
            platform,
            view,
            sequences,
            config,
        }
    }

    /// Make sure the widget script is loaded, if it can be.
    pub async fn ensure_loaded(&self) -> WidgetStatus {
        let host = self.platform.widgets();
        if host.api_available() {
            return WidgetStatus::Ready;
        }

        if host.script_present(TALLY_SCRIPT_URL) {
            // Someone else added the script; wait for it to finish loading
            for _ in 0..self.config.max_polls() {
                self.platform.sleep_ms(self.config.poll_interval_ms).await;
                if host.api_available() {
                    return WidgetStatus::Ready;
                }
            }
            tracing::warn!("Widget script present but never became ready");
            return WidgetStatus::Unavailable;
        }

        if host.inject_script(TALLY_SCRIPT_URL).await && host.api_available() {
            WidgetStatus::Ready
        } else {
            tracing::warn!(url = TALLY_SCRIPT_URL, "Widget script failed to load");
            WidgetStatus::Unavailable
        }
    }

    /// Activate pending embeds for the sequence identified by `token`.
    pub async fn load_embeds(&self, token: SequenceToken) -> EmbedActivation {
        let status = self.ensure_loaded().await;
        if !self.sequences.is_current(token) {
            tracing::debug!(token = %token, "Skipping embed activation for stale sequence");
            return EmbedActivation::Stale;
        }

        match status {
            WidgetStatus::Ready => {
                self.platform.widgets().activate_embeds();
                EmbedActivation::Widget
            }
            WidgetStatus::Unavailable => self.assign_sources(),
        }
    }

    /// Activate without loading anything, for content rendered at once
    pub fn activate_now(&self) -> EmbedActivation {
        let host = self.platform.widgets();
        if host.api_available() {
            host.activate_embeds();
            EmbedActivation::Widget
        } else {
            self.assign_sources()
        }
    }

    fn assign_sources(&self) -> EmbedActivation {
        let activated = self.view.activate_pending_embeds();
        tracing::debug!(activated, "Assigned embed sources directly");
        EmbedActivation::DirectSource(activated)
    }
}
