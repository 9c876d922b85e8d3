//! Playback steps
//!
//! A step is one atomic unit of a sequence: a typing pause, a silent pause,
//! or a message insert. Visible steps carry everything the view needs to
//! render them.

use serde::Serialize;

use crate::thread::ThreadKind;

/// Inclusive millisecond range for a randomized delay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DelayRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DelayRange {
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    pub const fn fixed(ms: u64) -> Self {
        Self::new(ms, ms)
    }

    /// Draw a delay using the injected `pick(min, max)`.
    ///
    /// The result is clamped into the range whatever `pick` returns.
    pub fn sample(&self, pick: impl FnOnce(u64, u64) -> u64) -> u64 {
        let (lo, hi) = if self.min_ms <= self.max_ms {
            (self.min_ms, self.max_ms)
        } else {
            (self.max_ms, self.min_ms)
        };
        if lo == hi {
            return lo;
        }
        pick(lo, hi).clamp(lo, hi)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Incoming,
    Outgoing,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Incoming => "incoming",
            Direction::Outgoing => "outgoing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextMessage {
    pub direction: Direction,
    /// Trusted inline markup from the scripted content
    pub html: String,
    pub time_text: Option<String>,
}

impl TextMessage {
    pub fn incoming(html: impl Into<String>) -> Self {
        Self {
            direction: Direction::Incoming,
            html: html.into(),
            time_text: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoMessage {
    pub direction: Direction,
    pub src: String,
    pub caption: Option<String>,
    /// Opens in a new tab when the photo is clicked
    pub href: Option<String>,
    pub time_text: Option<String>,
}

impl PhotoMessage {
    pub fn incoming(src: impl Into<String>) -> Self {
        Self {
            direction: Direction::Incoming,
            src: src.into(),
            caption: None,
            href: None,
            time_text: None,
        }
    }

    pub fn outgoing(src: impl Into<String>) -> Self {
        Self {
            direction: Direction::Outgoing,
            ..Self::incoming(src)
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }
}

/// Third-party form embedded in a bubble.
///
/// `src` is held back until the widget script activates the embed or the
/// loader falls back to assigning it directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedMessage {
    pub title: String,
    pub src: String,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Step {
    /// Show the typing indicator for a sampled duration
    Typing(DelayRange),
    /// Wait without any visible change
    Pause(DelayRange),
    Text(TextMessage),
    Photo(PhotoMessage),
    Embed(EmbedMessage),
}

impl Step {
    /// Whether the step leaves a message in the thread
    pub fn is_visible(&self) -> bool {
        matches!(self, Step::Text(_) | Step::Photo(_) | Step::Embed(_))
    }

    /// Whether the step appends the popup link the widget script wires up
    pub fn carries_popup_link(&self) -> bool {
        matches!(self, Step::Text(text) if text.html.contains(crate::content::POPUP_LINK_MARKER))
    }
}

/// Ordered steps for one thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub thread: ThreadKind,
    pub steps: Vec<Step>,
}

impl Script {
    pub fn new(thread: ThreadKind) -> Self {
        Self {
            thread,
            steps: Vec::new(),
        }
    }

    pub fn push(&mut self, step: Step) -> &mut Self {
        self.steps.push(step);
        self
    }

    /// Visible steps in playback order, as shown once the thread completed
    pub fn final_content(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(|s| s.is_visible())
    }

    pub fn visible_count(&self) -> usize {
        self.final_content().count()
    }

    /// Whether the embedded form widget must be activated after playback
    pub fn uses_widget(&self) -> bool {
        self.steps
            .iter()
            .any(|step| matches!(step, Step::Embed(_)) || step.carries_popup_link())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_clamps_out_of_range_picks() {
        let range = DelayRange::new(200, 500);
        assert_eq!(range.sample(|_, _| 10), 200);
        assert_eq!(range.sample(|_, _| 9_000), 500);
        assert_eq!(range.sample(|lo, hi| (lo + hi) / 2), 350);
    }

    #[test]
    fn test_sample_skips_rng_for_fixed_delay() {
        let range = DelayRange::fixed(900);
        assert_eq!(range.sample(|_, _| panic!("rng must not be consulted")), 900);
    }

    #[test]
    fn test_sample_tolerates_inverted_bounds() {
        let range = DelayRange::new(800, 100);
        assert_eq!(range.sample(|lo, hi| {
            assert!(lo <= hi);
            hi
        }), 800);
    }

    #[test]
    fn test_final_content_keeps_only_visible_steps_in_order() {
        let mut script = Script::new(ThreadKind::History);
        script
            .push(Step::Typing(DelayRange::new(1, 2)))
            .push(Step::Photo(PhotoMessage::incoming("a.png")))
            .push(Step::Pause(DelayRange::new(1, 2)))
            .push(Step::Text(TextMessage::incoming("one")))
            .push(Step::Typing(DelayRange::new(1, 2)))
            .push(Step::Text(TextMessage::incoming("two")));

        let visible: Vec<_> = script.final_content().cloned().collect();
        assert_eq!(
            visible,
            vec![
                Step::Photo(PhotoMessage::incoming("a.png")),
                Step::Text(TextMessage::incoming("one")),
                Step::Text(TextMessage::incoming("two")),
            ]
        );
        assert!(!script.uses_widget());
    }
}
