use dioxus::prelude::*;
use martisor_domain::ChatDescriptor;

use crate::application::Experience;
use crate::ports::outbound::Screen;
use crate::ui::presentation::components::{ChatList, ChatScreen};
use crate::ui::presentation::state::ExperienceState;

const SCROLL_TO_BOTTOM: &str =
    "const m = document.getElementById('messages'); if (m) { m.scrollTop = m.scrollHeight; }";

pub fn app() -> Element {
    rsx! {
        AppRoot {}
    }
}

#[component]
fn AppRoot() -> Element {
    // Provided by the composition root (see `crates/player/src/runner.rs`).
    let experience = use_context::<Experience>();
    let state = use_context::<ExperienceState>();
    let mut revision = use_signal(|| 0u64);

    // Mirror the state's revision channel into a signal
    use_hook({
        let state = state.clone();
        move || {
            let mut rx = state.subscribe();
            spawn(async move {
                while rx.changed().await.is_ok() {
                    let current = *rx.borrow();
                    revision.set(current);
                }
            });
        }
    });

    // Kick off the clock and the intro once
    use_hook({
        let experience = experience.clone();
        move || {
            spawn(experience.start());
            spawn(async move { experience.run_clock().await });
        }
    });

    use_effect(move || {
        revision();
        document::eval(SCROLL_TO_BOTTOM);
    });

    revision();
    let snapshot = state.snapshot();
    let phone_class = match snapshot.screen {
        Screen::List => "app",
        Screen::Chat => "app show-chat",
    };

    let open = experience.clone();
    let back = experience.clone();
    let replay = experience;

    rsx! {
        div {
            class: "{phone_class}",
            "data-thread": snapshot.thread.map(|t| t.as_str()).unwrap_or_default(),

            div {
                class: "status-bar",
                span { class: "clock", "{snapshot.clock}" }
            }

            ChatList {
                rows: snapshot.rows.clone(),
                selected: snapshot.selected.clone(),
                on_open: move |chat: ChatDescriptor| {
                    if let Some(playback) = open.open_chat(&chat) {
                        spawn(async move {
                            playback.await;
                        });
                    }
                },
                on_replay: move |_| {
                    spawn(replay.reset());
                },
            }

            ChatScreen {
                header: snapshot.header.clone(),
                status: snapshot.status,
                fragments: snapshot.fragments.clone(),
                on_back: move |_| back.close_chat(),
            }
        }
    }
}
