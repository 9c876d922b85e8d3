//! View ports
//!
//! The playback engine never touches a renderer directly. It mutates a
//! thread container and the surrounding chat shell through these traits.
//! No call may race a `clear` without a preceding token bump; the token
//! check in the step player enforces that, the view itself does no locking
//! across calls.

use martisor_domain::{ChatDescriptor, ChatId, EmbedMessage, PhotoMessage, TextMessage, ThreadKind};
use serde::Serialize;

/// Handle to one fragment appended to the thread container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FragmentId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Screen {
    #[default]
    List,
    Chat,
}

/// Presence line under the chat title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ChatStatus {
    #[default]
    Online,
    Typing,
}

impl ChatStatus {
    pub fn label(self) -> &'static str {
        match self {
            ChatStatus::Online => "online",
            ChatStatus::Typing => "typing…",
        }
    }
}

/// The single mutable message container of the chat screen.
///
/// Every append requests a scroll to the bottom.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait ThreadViewPort: Send + Sync {
    /// Tag the container with the thread being shown
    fn set_thread(&self, thread: Option<ThreadKind>);

    /// Append the typing bubble and switch the status line to typing
    fn show_typing(&self) -> FragmentId;

    /// Remove a typing bubble and switch the status line back to online
    fn hide_typing(&self, id: FragmentId);

    fn append_text(&self, message: &TextMessage) -> FragmentId;

    fn append_photo(&self, message: &PhotoMessage) -> FragmentId;

    fn append_embed(&self, message: &EmbedMessage) -> FragmentId;

    /// Assign the source of every embed that has none yet.
    ///
    /// Returns how many embeds were activated.
    fn activate_pending_embeds(&self) -> usize;

    /// Drop every fragment
    fn clear(&self);
}

/// Everything around the thread container: header, screen, chat list, clock
pub trait ChatShellPort: Send + Sync {
    fn show_screen(&self, screen: Screen);

    fn set_header(&self, chat: &ChatDescriptor);

    fn set_status(&self, status: ChatStatus);

    fn append_row(&self, chat: ChatDescriptor);

    fn prepend_row(&self, chat: ChatDescriptor);

    fn select_row(&self, id: &ChatId);

    fn clear_rows(&self);

    fn set_clock(&self, label: String);
}
