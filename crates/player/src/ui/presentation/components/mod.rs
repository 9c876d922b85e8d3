//! Dioxus components for the phone screen

mod chat_list;
mod thread_view;

pub use chat_list::{Avatar, ChatList};
pub use thread_view::ChatScreen;
