//! Sequence tokens
//!
//! Every playback sequence captures the token that was current when it
//! started. Navigation issues a new token; a running sequence compares its
//! captured token against the current one before every visible effect and
//! silently stops once they differ. Latest wins, there is no other ordering.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Identifier of one sequence generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SequenceToken(u64);

impl SequenceToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SequenceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues sequence tokens and answers staleness checks.
///
/// Cloning yields another handle to the same counter, so a deferred task can
/// carry its own handle without borrowing the session.
#[derive(Debug, Clone, Default)]
pub struct SequenceRegistry {
    current: Arc<AtomicU64>,
}

impl SequenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate whatever sequence is running and return the new token.
    pub fn start_new_sequence(&self) -> SequenceToken {
        let next = self.current.fetch_add(1, Ordering::SeqCst).wrapping_add(1);
        SequenceToken(next)
    }

    /// Whether `token` still identifies the latest sequence.
    pub fn is_current(&self, token: SequenceToken) -> bool {
        self.current.load(Ordering::SeqCst) == token.0
    }

    pub fn current(&self) -> SequenceToken {
        SequenceToken(self.current.load(Ordering::SeqCst))
    }
}
