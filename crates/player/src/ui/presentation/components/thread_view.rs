//! Chat screen: header and message thread

use dioxus::prelude::*;
use martisor_domain::{ChatDescriptor, Direction, EmbedMessage, PhotoMessage, TextMessage};

use crate::ports::outbound::ChatStatus;
use crate::ui::presentation::state::{Fragment, RenderedFragment};

use super::chat_list::Avatar;

#[derive(Props, Clone, PartialEq)]
pub struct ChatScreenProps {
    #[props(default)]
    pub header: Option<ChatDescriptor>,
    pub status: ChatStatus,
    pub fragments: Vec<RenderedFragment>,
    pub on_back: EventHandler<()>,
}

#[component]
pub fn ChatScreen(props: ChatScreenProps) -> Element {
    let (name, avatar) = props
        .header
        .as_ref()
        .map(|c| (c.name.clone(), c.avatar.clone()))
        .unwrap_or_default();
    let status = props.status.label();

    rsx! {
        div {
            class: "chat-screen",

            header {
                class: "chat-header",
                button {
                    class: "back-btn",
                    onclick: move |_| props.on_back.call(()),
                    "‹"
                }
                Avatar { key: "{avatar}", src: avatar.clone(), name: name.clone() }
                div {
                    class: "chat-title",
                    div { class: "chat-name", "{name}" }
                    div { class: "chat-status", "{status}" }
                }
            }

            div {
                id: "messages",
                class: "messages",
                for item in props.fragments.iter() {
                    FragmentView { key: "{item.id.0}", fragment: item.fragment.clone() }
                }
            }
        }
    }
}

#[component]
fn FragmentView(fragment: Fragment) -> Element {
    match fragment {
        Fragment::Typing => rsx! {
            div {
                class: "msg incoming typing",
                span { class: "dot" }
                span { class: "dot" }
                span { class: "dot" }
            }
        },
        Fragment::Text(message) => rsx! { TextBubble { message } },
        Fragment::Photo(message) => rsx! { PhotoBubble { message } },
        Fragment::Embed { message, active } => rsx! { EmbedBubble { message, active } },
    }
}

fn direction_class(direction: Direction) -> &'static str {
    match direction {
        Direction::Incoming => "msg incoming",
        Direction::Outgoing => "msg outgoing",
    }
}

#[component]
fn TextBubble(message: TextMessage) -> Element {
    rsx! {
        div {
            class: direction_class(message.direction),
            div { class: "msg-text", dangerous_inner_html: "{message.html}" }
            if let Some(time) = &message.time_text {
                span { class: "msg-time", "{time}" }
            }
        }
    }
}

#[component]
fn PhotoBubble(message: PhotoMessage) -> Element {
    let class = format!("{} photo", direction_class(message.direction));

    rsx! {
        div {
            class: "{class}",
            if let Some(href) = &message.href {
                a {
                    href: "{href}",
                    target: "_blank",
                    rel: "noopener",
                    img { class: "msg-photo", src: "{message.src}", alt: "" }
                }
            } else {
                img { class: "msg-photo", src: "{message.src}", alt: "" }
            }
            if let Some(caption) = &message.caption {
                div { class: "msg-caption", "{caption}" }
            }
        }
    }
}

#[component]
fn EmbedBubble(message: EmbedMessage, active: bool) -> Element {
    rsx! {
        div {
            class: "msg incoming embed",
            if active {
                iframe {
                    title: "{message.title}",
                    src: "{message.src}",
                    height: "{message.height}",
                    width: "100%",
                    loading: "lazy",
                }
            } else {
                iframe {
                    title: "{message.title}",
                    "data-tally-src": "{message.src}",
                    height: "{message.height}",
                    width: "100%",
                    loading: "lazy",
                }
            }
        }
    }
}
