//! Chat list screen

use dioxus::prelude::*;
use martisor_domain::{ChatDescriptor, ChatId};

/// Props for the ChatList component
#[derive(Props, Clone, PartialEq)]
pub struct ChatListProps {
    pub rows: Vec<ChatDescriptor>,
    #[props(default)]
    pub selected: Option<ChatId>,
    /// Handler for when a row is clicked
    pub on_open: EventHandler<ChatDescriptor>,
    /// Handler for the replay button
    pub on_replay: EventHandler<()>,
}

#[component]
pub fn ChatList(props: ChatListProps) -> Element {
    rsx! {
        div {
            class: "chat-list-screen",

            header {
                class: "list-header",
                h1 { "Chats" }
                button {
                    class: "replay-btn",
                    title: "Replay",
                    onclick: move |_| props.on_replay.call(()),
                    "↻"
                }
            }

            ul {
                class: "chat-list",
                for chat in props.rows.iter().cloned() {
                    ChatRow {
                        key: "{chat.id}",
                        selected: props.selected.as_ref() == Some(&chat.id),
                        chat: chat.clone(),
                        on_open: props.on_open,
                    }
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct ChatRowProps {
    chat: ChatDescriptor,
    selected: bool,
    on_open: EventHandler<ChatDescriptor>,
}

#[component]
fn ChatRow(props: ChatRowProps) -> Element {
    let class = if props.selected {
        "chat-row is-entered is-selected"
    } else {
        "chat-row is-entered"
    };
    let chat = props.chat.clone();

    rsx! {
        li {
            class: "{class}",
            "data-thread": "{props.chat.thread}",
            onclick: move |_| props.on_open.call(chat.clone()),

            Avatar { src: props.chat.avatar.clone(), name: props.chat.name.clone() }

            div {
                class: "chat-row-body",
                div {
                    class: "chat-row-top",
                    span { class: "chat-name", "{props.chat.name}" }
                    span { class: "chat-time", "{props.chat.time_label}" }
                }
                div {
                    class: "chat-row-bottom",
                    span { class: "chat-preview", "{props.chat.preview}" }
                    if let Some(badge) = &props.chat.badge {
                        span { class: "chat-badge", "{badge}" }
                    }
                }
            }
        }
    }
}

/// Round avatar; shows an initial while the image fails to load
#[component]
pub fn Avatar(src: String, name: String) -> Element {
    let mut missing = use_signal(|| false);
    let initial: String = name.chars().next().map(String::from).unwrap_or_default();

    rsx! {
        div {
            class: if missing() { "avatar is-missing" } else { "avatar" },
            if missing() {
                span { class: "avatar-initial", "{initial}" }
            } else {
                img {
                    src: "{src}",
                    alt: "",
                    onerror: move |_| missing.set(true),
                }
            }
        }
    }
}
