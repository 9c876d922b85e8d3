//! Conversation threads and their playback lifecycle
//!
//! A thread moves `NotStarted -> Playing -> Completed`. Navigating away
//! mid-playback moves it `Playing -> Cancelled`, and the next attempt rewinds
//! it to `NotStarted` before playing again. `Completed` only goes back to
//! `NotStarted` through a full reset.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::DomainError;

/// Which scripted conversation a chat opens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadKind {
    Event,
    Art,
    History,
    Rsvp,
    Support,
    /// Filler chats with a single canned message
    Generic,
}

impl ThreadKind {
    /// Thread kinds that carry a script and a completion flag
    pub const SCRIPTED: [ThreadKind; 5] = [
        ThreadKind::Event,
        ThreadKind::Art,
        ThreadKind::History,
        ThreadKind::Rsvp,
        ThreadKind::Support,
    ];

    pub fn is_scripted(self) -> bool {
        !matches!(self, ThreadKind::Generic)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThreadKind::Event => "event",
            ThreadKind::Art => "art",
            ThreadKind::History => "history",
            ThreadKind::Rsvp => "rsvp",
            ThreadKind::Support => "support",
            ThreadKind::Generic => "generic",
        }
    }
}

impl fmt::Display for ThreadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThreadKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "event" => Ok(ThreadKind::Event),
            "art" => Ok(ThreadKind::Art),
            "history" => Ok(ThreadKind::History),
            "rsvp" => Ok(ThreadKind::Rsvp),
            "support" => Ok(ThreadKind::Support),
            "generic" => Ok(ThreadKind::Generic),
            other => Err(DomainError::parse(format!("unknown thread kind '{other}'"))),
        }
    }
}

/// Lifecycle phase of one scripted thread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ThreadPhase {
    #[default]
    NotStarted,
    Playing,
    Cancelled,
    Completed,
}

impl ThreadPhase {
    pub fn can_transition_to(self, next: ThreadPhase) -> bool {
        matches!(
            (self, next),
            (ThreadPhase::NotStarted, ThreadPhase::Playing)
                | (ThreadPhase::Playing, ThreadPhase::Completed)
                | (ThreadPhase::Playing, ThreadPhase::Cancelled)
                | (ThreadPhase::Cancelled, ThreadPhase::NotStarted)
        )
    }
}

/// Per-thread playback state for the lifetime of a session
#[derive(Debug, Clone, Default)]
pub struct PlaybackBook {
    phases: HashMap<ThreadKind, ThreadPhase>,
}

impl PlaybackBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self, kind: ThreadKind) -> ThreadPhase {
        self.phases.get(&kind).copied().unwrap_or_default()
    }

    pub fn is_completed(&self, kind: ThreadKind) -> bool {
        self.phase(kind) == ThreadPhase::Completed
    }

    /// Mark a thread as playing, rewinding a cancelled run first.
    pub fn begin(&mut self, kind: ThreadKind) -> Result<(), DomainError> {
        if self.phase(kind) == ThreadPhase::Cancelled {
            self.transition(kind, ThreadPhase::NotStarted)?;
        }
        self.transition(kind, ThreadPhase::Playing)
    }

    pub fn complete(&mut self, kind: ThreadKind) -> Result<(), DomainError> {
        self.transition(kind, ThreadPhase::Completed)
    }

    /// Cancel every thread that is currently playing.
    ///
    /// Returns the kinds that were cancelled.
    pub fn cancel_active(&mut self) -> Vec<ThreadKind> {
        let mut cancelled = Vec::new();
        for (kind, phase) in self.phases.iter_mut() {
            if *phase == ThreadPhase::Playing {
                *phase = ThreadPhase::Cancelled;
                cancelled.push(*kind);
            }
        }
        cancelled
    }

    /// Return every thread to `NotStarted`
    pub fn reset_all(&mut self) {
        self.phases.clear();
    }

    fn transition(&mut self, kind: ThreadKind, next: ThreadPhase) -> Result<(), DomainError> {
        if !kind.is_scripted() {
            return Err(DomainError::invalid_transition(format!(
                "{kind} has no scripted playback"
            )));
        }
        let current = self.phase(kind);
        if !current.can_transition_to(next) {
            return Err(DomainError::invalid_transition(format!(
                "{kind}: {current:?} -> {next:?}"
            )));
        }
        self.phases.insert(kind, next);
        Ok(())
    }
}
