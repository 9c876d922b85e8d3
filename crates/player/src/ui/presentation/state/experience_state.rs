//! Experience state: the in-memory chat screen
//!
//! Implements both view ports over a single snapshot. Renderers subscribe to
//! the revision channel and re-read the snapshot when it moves; the headless
//! runner serializes the snapshot as a transcript.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use martisor_domain::{
    ChatDescriptor, ChatId, EmbedMessage, PhotoMessage, TextMessage, ThreadKind,
};
use serde::Serialize;
use tokio::sync::watch;

use crate::ports::outbound::{ChatShellPort, ChatStatus, FragmentId, Screen, ThreadViewPort};

/// One bubble in the thread container
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Fragment {
    Typing,
    Text(TextMessage),
    Photo(PhotoMessage),
    Embed {
        message: EmbedMessage,
        /// Source assigned (by the widget or the direct fallback)
        active: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedFragment {
    pub id: FragmentId,
    #[serde(flatten)]
    pub fragment: Fragment,
}

/// Everything a renderer needs to draw the phone screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExperienceSnapshot {
    pub screen: Screen,
    pub header: Option<ChatDescriptor>,
    pub status: ChatStatus,
    pub thread: Option<ThreadKind>,
    pub fragments: Vec<RenderedFragment>,
    pub rows: Vec<ChatDescriptor>,
    pub selected: Option<ChatId>,
    pub clock: String,
}

impl ExperienceSnapshot {
    /// Fragments other than typing bubbles
    pub fn messages(&self) -> impl Iterator<Item = &Fragment> {
        self.fragments
            .iter()
            .map(|f| &f.fragment)
            .filter(|f| !matches!(f, Fragment::Typing))
    }

    pub fn is_typing(&self) -> bool {
        self.fragments
            .iter()
            .any(|f| matches!(f.fragment, Fragment::Typing))
    }
}

#[derive(Clone)]
pub struct ExperienceState {
    snapshot: Arc<RwLock<ExperienceSnapshot>>,
    next_fragment: Arc<AtomicU64>,
    mutations: Arc<AtomicUsize>,
    typing_shown: Arc<AtomicUsize>,
    scroll_requests: Arc<AtomicUsize>,
    revision: Arc<watch::Sender<u64>>,
}

impl Default for ExperienceState {
    fn default() -> Self {
        Self::new()
    }
}

impl ExperienceState {
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            snapshot: Arc::new(RwLock::new(ExperienceSnapshot::default())),
            next_fragment: Arc::new(AtomicU64::new(1)),
            mutations: Arc::new(AtomicUsize::new(0)),
            typing_shown: Arc::new(AtomicUsize::new(0)),
            scroll_requests: Arc::new(AtomicUsize::new(0)),
            revision: Arc::new(revision),
        }
    }

    pub fn snapshot(&self) -> ExperienceSnapshot {
        self.read().clone()
    }

    /// Receiver that changes on every update
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Mutations of the thread container so far
    pub fn mutation_count(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }

    /// Typing bubbles shown so far
    pub fn typing_count(&self) -> usize {
        self.typing_shown.load(Ordering::SeqCst)
    }

    pub fn scroll_requests(&self) -> usize {
        self.scroll_requests.load(Ordering::SeqCst)
    }

    fn read(&self) -> RwLockReadGuard<'_, ExperienceSnapshot> {
        self.snapshot.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, ExperienceSnapshot> {
        self.snapshot.write().unwrap_or_else(|e| e.into_inner())
    }

    fn update<R>(&self, f: impl FnOnce(&mut ExperienceSnapshot) -> R) -> R {
        let result = {
            let mut snapshot = self.write();
            f(&mut snapshot)
        };
        self.revision.send_modify(|rev| *rev += 1);
        result
    }

    /// Update the thread container, counting the mutation
    fn mutate_thread<R>(&self, f: impl FnOnce(&mut ExperienceSnapshot) -> R) -> R {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        self.update(f)
    }

    fn push_fragment(&self, fragment: Fragment) -> FragmentId {
        let id = FragmentId(self.next_fragment.fetch_add(1, Ordering::SeqCst));
        self.mutate_thread(|s| s.fragments.push(RenderedFragment { id, fragment }));
        self.scroll_requests.fetch_add(1, Ordering::SeqCst);
        id
    }
}

impl ThreadViewPort for ExperienceState {
    fn set_thread(&self, thread: Option<ThreadKind>) {
        self.update(|s| s.thread = thread);
    }

    fn show_typing(&self) -> FragmentId {
        self.typing_shown.fetch_add(1, Ordering::SeqCst);
        self.update(|s| s.status = ChatStatus::Typing);
        self.push_fragment(Fragment::Typing)
    }

    fn hide_typing(&self, id: FragmentId) {
        self.mutate_thread(|s| {
            s.fragments.retain(|f| f.id != id);
            s.status = ChatStatus::Online;
        });
    }

    fn append_text(&self, message: &TextMessage) -> FragmentId {
        self.push_fragment(Fragment::Text(message.clone()))
    }

    fn append_photo(&self, message: &PhotoMessage) -> FragmentId {
        self.push_fragment(Fragment::Photo(message.clone()))
    }

    fn append_embed(&self, message: &EmbedMessage) -> FragmentId {
        self.push_fragment(Fragment::Embed {
            message: message.clone(),
            active: false,
        })
    }

    fn activate_pending_embeds(&self) -> usize {
        let pending = self
            .read()
            .fragments
            .iter()
            .filter(|f| matches!(f.fragment, Fragment::Embed { active: false, .. }))
            .count();
        if pending == 0 {
            return 0;
        }
        self.mutate_thread(|s| {
            for f in s.fragments.iter_mut() {
                if let Fragment::Embed { active, .. } = &mut f.fragment {
                    *active = true;
                }
            }
        });
        pending
    }

    fn clear(&self) {
        self.mutate_thread(|s| {
            s.fragments.clear();
            s.status = ChatStatus::Online;
        });
    }
}

impl ChatShellPort for ExperienceState {
    fn show_screen(&self, screen: Screen) {
        self.update(|s| s.screen = screen);
    }

    fn set_header(&self, chat: &ChatDescriptor) {
        let chat = chat.clone();
        self.update(|s| s.header = Some(chat));
    }

    fn set_status(&self, status: ChatStatus) {
        self.update(|s| s.status = status);
    }

    fn append_row(&self, chat: ChatDescriptor) {
        self.update(|s| s.rows.push(chat));
    }

    fn prepend_row(&self, chat: ChatDescriptor) {
        self.update(|s| s.rows.insert(0, chat));
    }

    fn select_row(&self, id: &ChatId) {
        let id = id.clone();
        self.update(|s| s.selected = Some(id));
    }

    fn clear_rows(&self) {
        self.update(|s| {
            s.rows.clear();
            s.selected = None;
        });
    }

    fn set_clock(&self, label: String) {
        self.update(|s| s.clock = label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use martisor_domain::{special_chat, script::rsvp_embed};

    #[test]
    fn test_typing_bubble_round_trip_updates_status() {
        let state = ExperienceState::new();

        let id = state.show_typing();
        assert!(state.snapshot().is_typing());
        assert_eq!(state.snapshot().status, ChatStatus::Typing);

        state.hide_typing(id);
        let snapshot = state.snapshot();
        assert!(!snapshot.is_typing());
        assert_eq!(snapshot.status, ChatStatus::Online);
        assert_eq!(state.typing_count(), 1);
        assert_eq!(state.mutation_count(), 2);
    }

    #[test]
    fn test_appends_keep_order_and_request_scroll() {
        let state = ExperienceState::new();
        state.append_text(&TextMessage::incoming("first"));
        state.append_photo(&PhotoMessage::incoming("images/a.jpg"));
        state.append_text(&TextMessage::incoming("second"));

        let snapshot = state.snapshot();
        let texts: Vec<_> = snapshot
            .messages()
            .filter_map(|f| match f {
                Fragment::Text(t) => Some(t.html.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert!(matches!(snapshot.fragments[1].fragment, Fragment::Photo(_)));
        assert_eq!(state.scroll_requests(), 3);
    }

    #[test]
    fn test_activate_pending_embeds_only_counts_inactive() {
        let state = ExperienceState::new();
        assert_eq!(state.activate_pending_embeds(), 0);
        assert_eq!(state.mutation_count(), 0);

        state.append_embed(&rsvp_embed());
        assert_eq!(state.activate_pending_embeds(), 1);
        assert_eq!(state.activate_pending_embeds(), 0);
        assert!(matches!(
            state.snapshot().fragments[0].fragment,
            Fragment::Embed { active: true, .. }
        ));
    }

    #[test]
    fn test_rows_and_selection() {
        let state = ExperienceState::new();
        let event = special_chat(ThreadKind::Event).expect("event chat");
        let art = special_chat(ThreadKind::Art).expect("art chat");

        state.append_row(art.clone());
        state.prepend_row(event.clone());
        state.select_row(&event.id);

        let snapshot = state.snapshot();
        assert_eq!(snapshot.rows, vec![event.clone(), art]);
        assert_eq!(snapshot.selected, Some(event.id));

        state.clear_rows();
        assert!(state.snapshot().rows.is_empty());
        assert!(state.snapshot().selected.is_none());
    }

    #[tokio::test]
    async fn test_revision_channel_moves_on_update() {
        let state = ExperienceState::new();
        let mut rx = state.subscribe();

        state.set_clock("2:05 PM".to_string());
        rx.changed().await.expect("sender alive");
        assert_eq!(*rx.borrow(), 1);
        assert_eq!(state.snapshot().clock, "2:05 PM");
    }

    #[test]
    fn test_snapshot_serializes_fragments_with_type_tag() {
        let state = ExperienceState::new();
        state.append_text(&TextMessage::incoming("hi"));
        let json = serde_json::to_value(state.snapshot()).expect("serialize");
        assert_eq!(json["fragments"][0]["type"], "text");
        assert_eq!(json["fragments"][0]["html"], "hi");
    }
}
