//! Chat list entries

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::content::SPECIAL_BADGE;
use crate::thread::ThreadKind;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ChatId(String);

impl ChatId {
    /// Id for a generated filler chat, e.g. `c_3f9a0c2b71d4`
    pub fn generic(seed: Uuid) -> Self {
        let hex = seed.simple().to_string();
        Self(format!("c_{}", &hex[..12]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of the chat list. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatDescriptor {
    pub id: ChatId,
    pub name: String,
    pub preview: String,
    pub time_label: String,
    /// Unread badge text; `None` hides the badge
    pub badge: Option<String>,
    pub avatar: String,
    pub thread: ThreadKind,
}

/// The fixed chat for a scripted thread
pub fn special_chat(kind: ThreadKind) -> Option<ChatDescriptor> {
    let (name, preview, time_label, avatar) = match kind {
        ThreadKind::Event => (
            "Event Details",
            "Celebrate spring the Romanian way!",
            "12:30 PM",
            "images/a.jpg",
        ),
        ThreadKind::Art => (
            "Art Details",
            "Concept sketch + artist statement",
            "12:29 PM",
            "images/b.jpg",
        ),
        ThreadKind::History => (
            "Mărțișor History",
            "What is Mărțișor?",
            "12:28 PM",
            "images/c.jpg",
        ),
        ThreadKind::Rsvp => ("RSVP", "Tap to RSVP", "12:27 PM", "images/d.jpg"),
        ThreadKind::Support => (
            "Thank you for support",
            "Support the Art",
            "12:26 PM",
            "images/e.jpg",
        ),
        ThreadKind::Generic => return None,
    };

    Some(ChatDescriptor {
        id: ChatId(kind.as_str().to_string()),
        name: name.to_string(),
        preview: preview.to_string(),
        time_label: time_label.to_string(),
        badge: Some(SPECIAL_BADGE.to_string()),
        avatar: avatar.to_string(),
        thread: kind,
    })
}

/// "First Middle Last" -> "First L."
pub fn format_display_name(full_name: &str) -> String {
    let parts: Vec<&str> = full_name.split_whitespace().collect();
    match (parts.first(), parts.last()) {
        (Some(first), Some(last)) if parts.len() >= 2 => {
            let initial: String = last.chars().take(1).collect();
            format!("{first} {initial}.")
        }
        _ => full_name.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_display_name() {
        assert_eq!(format_display_name("Ana Popescu"), "Ana P.");
        assert_eq!(format_display_name("  Ștefan   Rusu "), "Ștefan R.");
        assert_eq!(format_display_name("Maria Ioana Nistor"), "Maria N.");
        assert_eq!(format_display_name(" Cher "), "Cher");
        assert_eq!(format_display_name(""), "");
    }

    #[test]
    fn test_special_chats_match_their_thread() {
        for kind in ThreadKind::SCRIPTED {
            let chat = special_chat(kind).expect("scripted threads have a chat");
            assert_eq!(chat.thread, kind);
            assert_eq!(chat.id.as_str(), kind.as_str());
            assert_eq!(chat.badge.as_deref(), Some("1"));
        }
        assert!(special_chat(ThreadKind::Generic).is_none());
    }

    #[test]
    fn test_generic_id_shape() {
        let id = ChatId::generic(Uuid::nil());
        assert_eq!(id.as_str(), "c_000000000000");
    }
}
