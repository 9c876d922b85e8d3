//! Experience session: navigation between the chat list and the threads
//!
//! `Experience` is the single context object of a run. It owns the two
//! sequence registries (one for thread playback, one for the intro), the
//! per-thread playback book, the chat-list generator and the services, and
//! is cheap to clone into tasks.
//!
//! Operations that start asynchronous work do their synchronous part
//! immediately and hand back a task for the caller to drive, so a click
//! handler can update the screen before returning.

use std::sync::{Arc, Mutex, MutexGuard};

use martisor_domain::content::format_clock_label;
use martisor_domain::{
    generic_reply, script_for, ChatDescriptor, ChatListGenerator, DelayRange, PlaybackBook,
    SequenceRegistry, SequenceToken, TextMessage, ThreadKind, INTRO_PLAN,
};
use uuid::Uuid;

use crate::application::config::PlayerConfig;
use crate::application::services::{
    AssetResolver, EmbedLoader, PlaybackOutcome, StepPlayer,
};
use crate::ports::outbound::{ChatShellPort, ChatStatus, LocalBoxFuture, Screen, ThreadViewPort};
use crate::state::Platform;

/// Playback of one thread, started by `open_chat`
pub type Playback = LocalBoxFuture<PlaybackOutcome>;

/// The intro animation ending with the event thread opening
pub type IntroTask = LocalBoxFuture<()>;

const INTRO_LEAD_IN: DelayRange = DelayRange::fixed(900);
const INTRO_GAP: DelayRange = DelayRange::new(900, 1700);
const INTRO_SELECT: DelayRange = DelayRange::fixed(600);
const INTRO_OPEN: DelayRange = DelayRange::fixed(700);
const CLOCK_TICK_MS: u64 = 1000;

#[derive(Clone)]
pub struct Experience {
    config: Arc<PlayerConfig>,
    platform: Platform,
    view: Arc<dyn ThreadViewPort>,
    shell: Arc<dyn ChatShellPort>,
    threads: SequenceRegistry,
    intro: SequenceRegistry,
    book: Arc<Mutex<PlaybackBook>>,
    chats: Arc<Mutex<ChatListGenerator>>,
    player: StepPlayer,
    assets: AssetResolver,
    embeds: EmbedLoader,
}

impl Experience {
    pub fn new(
        config: PlayerConfig,
        platform: Platform,
        view: Arc<dyn ThreadViewPort>,
        shell: Arc<dyn ChatShellPort>,
    ) -> Self {
        let config = Arc::new(config);
        let threads = SequenceRegistry::new();
        let player = StepPlayer::new(
            platform.clone(),
            view.clone(),
            threads.clone(),
            config.clone(),
        );
        let embeds = EmbedLoader::new(
            platform.clone(),
            view.clone(),
            threads.clone(),
            config.widget,
        );
        Self {
            assets: AssetResolver::new(platform.clone()),
            config,
            platform,
            view,
            shell,
            threads,
            intro: SequenceRegistry::new(),
            book: Arc::default(),
            chats: Arc::default(),
            player,
            embeds,
        }
    }

    /// Populate the list and return the intro task
    pub fn start(&self) -> IntroTask {
        tracing::info!(chats = self.config.initial_chats, "Starting experience");
        self.shell.set_clock(self.clock_label());
        self.populate_initial_chats();
        self.intro()
    }

    /// Slide the special chats in one by one, then open the event thread.
    ///
    /// Starting the intro stops any previous one.
    pub fn intro(&self) -> IntroTask {
        let token = self.intro.start_new_sequence();
        let this = self.clone();
        Box::pin(async move { this.run_intro(token).await })
    }

    async fn run_intro(&self, token: SequenceToken) {
        if !self.intro_wait(token, INTRO_LEAD_IN).await {
            return;
        }

        let mut last = None;
        for (index, entry) in INTRO_PLAN.iter().enumerate() {
            if index > 0 && !self.intro_wait(token, INTRO_GAP).await {
                return;
            }
            let chat = {
                let mut pick = |n| self.platform.random_index(n);
                self.chat_list().intro_chat(*entry, Uuid::new_v4(), &mut pick)
            };
            tracing::debug!(chat = %chat.id, "Intro chat arrived");
            last = Some(chat.clone());
            self.shell.prepend_row(chat);
        }

        let Some(chat) = last else {
            return;
        };
        if !self.intro_wait(token, INTRO_SELECT).await {
            return;
        }
        self.shell.select_row(&chat.id);
        if !self.intro_wait(token, INTRO_OPEN).await {
            return;
        }

        if let Some(playback) = self.open_chat(&chat) {
            playback.await;
        }
    }

    /// Sleep, then report whether the intro is still the current one
    async fn intro_wait(&self, token: SequenceToken, delay: DelayRange) -> bool {
        self.pause(delay).await;
        let current = self.intro.is_current(token);
        if !current {
            tracing::debug!(token = %token, "Intro interrupted");
        }
        current
    }

    pub fn stop_intro(&self) {
        self.intro.start_new_sequence();
    }

    /// Show a chat.
    ///
    /// Returns the playback task when the thread has to be played.
    pub fn open_chat(&self, chat: &ChatDescriptor) -> Option<Playback> {
        self.stop_intro();
        let token = self.threads.start_new_sequence();
        let cancelled = self.book().cancel_active();
        if !cancelled.is_empty() {
            tracing::debug!(?cancelled, "Cancelled running threads");
        }
        tracing::info!(chat = %chat.id, thread = %chat.thread, token = %token, "Opening chat");

        self.shell.set_header(chat);
        self.shell.set_status(ChatStatus::Online);
        self.shell.show_screen(Screen::Chat);
        self.view.clear();
        self.view.set_thread(Some(chat.thread));

        let kind = chat.thread;
        if !kind.is_scripted() {
            let reply = {
                let mut pick = |n| self.platform.random_index(n);
                generic_reply(&mut pick)
            };
            self.view.append_text(&TextMessage::incoming(reply));
            return None;
        }

        if self.book().is_completed(kind) {
            let assets = self.assets.cached_script_assets();
            if let Some(script) = script_for(kind, &assets) {
                self.player.render_final(&script);
                if script.uses_widget() {
                    self.embeds.activate_now();
                }
            }
            return None;
        }

        if let Err(e) = self.book().begin(kind) {
            tracing::warn!(error = %e, "Could not mark thread as playing");
        }

        let this = self.clone();
        Some(Box::pin(async move { this.run_thread(token, kind).await }))
    }

    async fn run_thread(&self, token: SequenceToken, kind: ThreadKind) -> PlaybackOutcome {
        let assets = self.assets.script_assets(kind).await;
        if !self.threads.is_current(token) {
            return PlaybackOutcome::Cancelled { at_step: 0 };
        }
        let Some(script) = script_for(kind, &assets) else {
            return PlaybackOutcome::Completed;
        };

        // The popup link is wired as soon as it shows, without holding up playback
        let (popup_shown, popup_wired) = tokio::sync::oneshot::channel();
        let mut popup_shown = Some(popup_shown);
        let playback = self.player.play_observed(token, &script, move |step| {
            if step.carries_popup_link() {
                if let Some(tx) = popup_shown.take() {
                    let _ = tx.send(());
                }
            }
        });
        let wiring = async {
            if popup_wired.await.is_ok() {
                let activation = self.embeds.load_embeds(token).await;
                tracing::debug!(?activation, "Popup link wired");
            }
        };
        let (outcome, ()) = tokio::join!(playback, wiring);

        if outcome.is_completed() {
            if let Err(e) = self.book().complete(kind) {
                tracing::warn!(error = %e, "Could not mark thread as completed");
            }
            if script.uses_widget() {
                self.embeds.load_embeds(token).await;
            }
        }
        outcome
    }

    /// Back to the list. Playback of the open thread stops.
    pub fn close_chat(&self) {
        let token = self.threads.start_new_sequence();
        let cancelled = self.book().cancel_active();
        tracing::info!(token = %token, ?cancelled, "Closing chat");
        self.shell.show_screen(Screen::List);
    }

    /// Start over: fresh list, nothing played, intro again
    pub fn reset(&self) -> IntroTask {
        self.stop_intro();
        let token = self.threads.start_new_sequence();
        self.book().reset_all();
        tracing::info!(token = %token, "Resetting experience");

        self.shell.show_screen(Screen::List);
        self.shell.set_status(ChatStatus::Online);
        self.view.clear();
        self.view.set_thread(None);
        self.shell.clear_rows();
        self.populate_initial_chats();
        self.intro()
    }

    pub fn clock_label(&self) -> String {
        format_clock_label(self.platform.local_time())
    }

    /// Refresh the status-bar clock every second. Never returns.
    pub async fn run_clock(&self) {
        loop {
            self.shell.set_clock(self.clock_label());
            self.platform.sleep_ms(CLOCK_TICK_MS).await;
        }
    }

    pub fn is_completed(&self, kind: ThreadKind) -> bool {
        self.book().is_completed(kind)
    }

    fn populate_initial_chats(&self) {
        let mut pick = |n| self.platform.random_index(n);
        let mut chats = self.chat_list();
        for _ in 0..self.config.initial_chats {
            self.shell
                .append_row(chats.generic_chat(Uuid::new_v4(), &mut pick));
        }
    }

    async fn pause(&self, delay: DelayRange) {
        let sampled = delay.sample(|lo, hi| self.platform.random_range(lo, hi));
        self.platform
            .sleep_ms(self.config.scale_delay(sampled))
            .await;
    }

    fn book(&self) -> MutexGuard<'_, PlaybackBook> {
        self.book.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn chat_list(&self) -> MutexGuard<'_, ChatListGenerator> {
        self.chats.lock().unwrap_or_else(|e| e.into_inner())
    }
}
