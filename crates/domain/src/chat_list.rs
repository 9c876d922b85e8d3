//! Chat list generation
//!
//! Filler chats draw names and time labels at random and cycle through
//! previews and avatars so the list looks varied before anything repeats.

use uuid::Uuid;

use crate::chat::{format_display_name, special_chat, ChatDescriptor, ChatId};
use crate::content::{GENERIC_AVATARS, GENERIC_BADGE, PREVIEW_OPTIONS, ROMANIAN_NAMES, TIME_OPTIONS};
use crate::shuffle::ShuffledCycle;
use crate::thread::ThreadKind;

/// One insert of the intro animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroEntry {
    Generic,
    Special(ThreadKind),
}

/// Order in which the intro prepends chats; the last one ends up on top
/// and is opened automatically.
pub const INTRO_PLAN: [IntroEntry; 6] = [
    IntroEntry::Generic,
    IntroEntry::Special(ThreadKind::Support),
    IntroEntry::Special(ThreadKind::Rsvp),
    IntroEntry::Special(ThreadKind::History),
    IntroEntry::Special(ThreadKind::Art),
    IntroEntry::Special(ThreadKind::Event),
];

#[derive(Debug, Clone)]
pub struct ChatListGenerator {
    previews: ShuffledCycle<&'static str>,
    avatars: ShuffledCycle<&'static str>,
}

impl Default for ChatListGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatListGenerator {
    pub fn new() -> Self {
        Self {
            previews: ShuffledCycle::new(PREVIEW_OPTIONS.to_vec()),
            avatars: ShuffledCycle::new(GENERIC_AVATARS.to_vec()),
        }
    }

    /// A filler chat. `pick(n)` returns an index in `0..n`.
    pub fn generic_chat(
        &mut self,
        seed: Uuid,
        pick: &mut dyn FnMut(usize) -> usize,
    ) -> ChatDescriptor {
        let name = ROMANIAN_NAMES[pick(ROMANIAN_NAMES.len()) % ROMANIAN_NAMES.len()];
        let preview = self.previews.next_item(pick).unwrap_or(PREVIEW_OPTIONS[0]);
        let time_label = TIME_OPTIONS[pick(TIME_OPTIONS.len()) % TIME_OPTIONS.len()];
        let avatar = self.avatars.next_item(pick).unwrap_or(GENERIC_AVATARS[0]);

        ChatDescriptor {
            id: ChatId::generic(seed),
            name: format_display_name(name),
            preview: preview.to_string(),
            time_label: time_label.to_string(),
            badge: Some(GENERIC_BADGE.to_string()),
            avatar: avatar.to_string(),
            thread: ThreadKind::Generic,
        }
    }

    /// Resolve an intro entry into the chat to insert
    pub fn intro_chat(
        &mut self,
        entry: IntroEntry,
        seed: Uuid,
        pick: &mut dyn FnMut(usize) -> usize,
    ) -> ChatDescriptor {
        match entry {
            IntroEntry::Special(kind) => match special_chat(kind) {
                Some(chat) => chat,
                None => self.generic_chat(seed, pick),
            },
            IntroEntry::Generic => self.generic_chat(seed, pick),
        }
    }
}

/// Body text of the single message shown in a filler chat
pub fn generic_reply(pick: &mut dyn FnMut(usize) -> usize) -> &'static str {
    PREVIEW_OPTIONS[pick(PREVIEW_OPTIONS.len()) % PREVIEW_OPTIONS.len()]
}
