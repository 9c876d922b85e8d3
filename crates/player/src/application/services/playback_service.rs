//! Scripted step player
//!
//! Runs a thread's script against the view, one step at a time. Playback is
//! cooperative: the sequence token captured at start is compared with the
//! registry before every step and after every delay, and a stale token ends
//! the run on the spot. Nothing is rolled back; whoever invalidated the
//! token owns the view from then on.

use std::sync::Arc;

use martisor_domain::{DelayRange, Script, SequenceRegistry, SequenceToken, Step};

use crate::application::config::PlayerConfig;
use crate::ports::outbound::ThreadViewPort;
use crate::state::Platform;

/// How a playback run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    Completed,
    /// The token went stale; `at_step` is the index of the step being run
    Cancelled { at_step: usize },
}

impl PlaybackOutcome {
    pub fn is_completed(self) -> bool {
        matches!(self, PlaybackOutcome::Completed)
    }
}

#[derive(Clone)]
pub struct StepPlayer {
    platform: Platform,
    view: Arc<dyn ThreadViewPort>,
    sequences: SequenceRegistry,
    config: Arc<PlayerConfig>,
}

impl StepPlayer {
    pub fn new(
        platform: Platform,
        view: Arc<dyn ThreadViewPort>,
        sequences: SequenceRegistry,
        config: Arc<PlayerConfig>,
    ) -> Self {
        Self {
            platform,
            view,
            sequences,
            config,
        }
    }

    /// Play `script` under `token`.
    pub async fn play(&self, token: SequenceToken, script: &Script) -> PlaybackOutcome {
        self.play_observed(token, script, |_| {}).await
    }

    /// Play `script` under `token`, calling `on_shown` after each message
    /// lands in the thread.
    pub async fn play_observed(
        &self,
        token: SequenceToken,
        script: &Script,
        mut on_shown: impl FnMut(&Step),
    ) -> PlaybackOutcome {
        tracing::debug!(
            thread = %script.thread,
            token = %token,
            steps = script.steps.len(),
            "Starting playback"
        );

        for (index, step) in script.steps.iter().enumerate() {
            if !self.sequences.is_current(token) {
                return self.cancelled(script, index);
            }

            match step {
                Step::Typing(range) => {
                    let bubble = self.view.show_typing();
                    self.wait(*range).await;
                    if !self.sequences.is_current(token) {
                        return self.cancelled(script, index);
                    }
                    self.view.hide_typing(bubble);
                }
                Step::Pause(range) => {
                    self.wait(*range).await;
                    if !self.sequences.is_current(token) {
                        return self.cancelled(script, index);
                    }
                }
                Step::Text(message) => {
                    self.view.append_text(message);
                    on_shown(step);
                }
                Step::Photo(message) => {
                    self.view.append_photo(message);
                    on_shown(step);
                }
                Step::Embed(message) => {
                    self.view.append_embed(message);
                    on_shown(step);
                }
            }
        }

        tracing::debug!(thread = %script.thread, token = %token, "Playback completed");
        PlaybackOutcome::Completed
    }

    /// Append the final content of `script` at once.
    ///
    /// Returns the number of fragments appended.
    pub fn render_final(&self, script: &Script) -> usize {
        let mut appended = 0;
        for step in script.final_content() {
            match step {
                Step::Text(message) => {
                    self.view.append_text(message);
                }
                Step::Photo(message) => {
                    self.view.append_photo(message);
                }
                Step::Embed(message) => {
                    self.view.append_embed(message);
                }
                Step::Typing(_) | Step::Pause(_) => continue,
            }
            appended += 1;
        }
        tracing::debug!(thread = %script.thread, appended, "Rendered final content");
        appended
    }

    async fn wait(&self, range: DelayRange) {
        let sampled = range.sample(|lo, hi| self.platform.random_range(lo, hi));
        self.platform
            .sleep_ms(self.config.scale_delay(sampled))
            .await;
    }

    fn cancelled(&self, script: &Script, at_step: usize) -> PlaybackOutcome {
        tracing::debug!(thread = %script.thread, at_step, "Playback cancelled");
        PlaybackOutcome::Cancelled { at_step }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::platform::mock::{
        test_platform_with, FixedRandomProvider, InstantSleepProvider, ScriptedWidgetHost,
        StaticAssetProbe,
    };
    use crate::ports::outbound::{FragmentId, MockThreadViewPort};
    use crate::ui::presentation::state::{ExperienceState, Fragment};
    use martisor_domain::script::{event_details, history, ScriptAssets};
    use martisor_domain::{script_for, TextMessage, ThreadKind};
    use mockall::Sequence;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn player_with(
        sleep: InstantSleepProvider,
        random: FixedRandomProvider,
        view: Arc<dyn ThreadViewPort>,
        sequences: SequenceRegistry,
    ) -> StepPlayer {
        let platform = test_platform_with(
            sleep,
            random,
            StaticAssetProbe::default(),
            ScriptedWidgetHost::unavailable(),
        );
        StepPlayer::new(platform, view, sequences, Arc::default())
    }

    fn sleep_count(script: &Script) -> usize {
        script
            .steps
            .iter()
            .filter(|s| matches!(s, Step::Typing(_) | Step::Pause(_)))
            .count()
    }

    #[tokio::test]
    async fn test_play_appends_in_step_order() {
        let view = ExperienceState::new();
        let sequences = SequenceRegistry::new();
        let player = player_with(
            InstantSleepProvider::new(),
            FixedRandomProvider::constant(0),
            Arc::new(view.clone()),
            sequences.clone(),
        );
        let script = event_details();

        let token = sequences.start_new_sequence();
        let outcome = player.play(token, &script).await;

        assert_eq!(outcome, PlaybackOutcome::Completed);
        let snapshot = view.snapshot();
        assert!(!snapshot.is_typing());
        let rendered: Vec<_> = snapshot.messages().cloned().collect();
        let expected: Vec<_> = script
            .final_content()
            .map(|step| match step {
                Step::Text(m) => Fragment::Text(m.clone()),
                Step::Photo(m) => Fragment::Photo(m.clone()),
                Step::Embed(m) => Fragment::Embed {
                    message: m.clone(),
                    active: false,
                },
                Step::Typing(_) | Step::Pause(_) => unreachable!(),
            })
            .collect();
        assert_eq!(rendered, expected);
    }

    #[tokio::test]
    async fn test_varying_delays_never_reorder_messages() {
        let assets = ScriptAssets::default();
        let draws: [&[u64]; 4] = [
            &[0, u64::MAX],
            &[u64::MAX, 0, 0],
            &[700, 5, 1_300, 90_000, 260],
            &[1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144, 233, 377, 610, 987],
        ];

        for kind in ThreadKind::SCRIPTED {
            let script = script_for(kind, &assets).expect("scripted thread");
            for values in draws {
                let played = ExperienceState::new();
                let sequences = SequenceRegistry::new();
                let sleep = InstantSleepProvider::new();
                let player = player_with(
                    sleep.clone(),
                    FixedRandomProvider::new(values.to_vec()),
                    Arc::new(played.clone()),
                    sequences.clone(),
                );

                let outcome = player.play(sequences.start_new_sequence(), &script).await;
                assert!(outcome.is_completed(), "{kind} should complete");
                assert_eq!(sleep.calls().len(), sleep_count(&script));

                let rendered = ExperienceState::new();
                player_with(
                    InstantSleepProvider::new(),
                    FixedRandomProvider::constant(0),
                    Arc::new(rendered.clone()),
                    SequenceRegistry::new(),
                )
                .render_final(&script);

                let played: Vec<_> = played.snapshot().messages().cloned().collect();
                let rendered: Vec<_> = rendered.snapshot().messages().cloned().collect();
                assert_eq!(played, rendered, "{kind} with draws {values:?}");
            }
        }
    }

    #[tokio::test]
    async fn test_observer_sees_each_message_once_in_order() {
        let view = ExperienceState::new();
        let sequences = SequenceRegistry::new();
        let player = player_with(
            InstantSleepProvider::new(),
            FixedRandomProvider::new(vec![3, 900, 40]),
            Arc::new(view),
            sequences.clone(),
        );
        let script = event_details();

        let mut shown = Vec::new();
        let outcome = player
            .play_observed(sequences.start_new_sequence(), &script, |step| {
                shown.push(step.clone())
            })
            .await;

        assert!(outcome.is_completed());
        let expected: Vec<_> = script.final_content().cloned().collect();
        assert_eq!(shown, expected);
    }

    #[tokio::test]
    async fn test_delays_are_sampled_within_range_and_scaled() {
        let sleep = InstantSleepProvider::new();
        let view = ExperienceState::new();
        let sequences = SequenceRegistry::new();
        let platform = test_platform_with(
            sleep.clone(),
            FixedRandomProvider::constant(u64::MAX),
            StaticAssetProbe::default(),
            ScriptedWidgetHost::unavailable(),
        );
        let config = PlayerConfig {
            delay_scale: 0.5,
            ..PlayerConfig::default()
        };
        let player = StepPlayer::new(
            platform,
            Arc::new(view),
            sequences.clone(),
            Arc::new(config),
        );

        let mut script = Script::new(ThreadKind::Event);
        script
            .push(Step::Typing(DelayRange::new(200, 400)))
            .push(Step::Text(TextMessage::incoming("hi")))
            .push(Step::Pause(DelayRange::fixed(300)));

        let token = sequences.start_new_sequence();
        player.play(token, &script).await;

        // Max of each range, halved
        assert_eq!(sleep.calls(), vec![200, 150]);
    }

    #[tokio::test]
    async fn test_cancel_at_any_step_stops_all_mutations() {
        let script = history();
        let sleeps = sleep_count(&script);
        assert!(sleeps > 0);

        for cancel_at in 0..sleeps {
            let view = ExperienceState::new();
            let sequences = SequenceRegistry::new();
            let bumper = sequences.clone();
            let view_in_hook = view.clone();
            let mutations_at_cancel = Arc::new(AtomicUsize::new(usize::MAX));
            let recorded = mutations_at_cancel.clone();

            let sleep = InstantSleepProvider::with_hook(move |index, _| {
                if index == cancel_at {
                    bumper.start_new_sequence();
                    recorded.store(view_in_hook.mutation_count(), Ordering::SeqCst);
                }
            });
            let player = player_with(
                sleep,
                FixedRandomProvider::constant(0),
                Arc::new(view.clone()),
                sequences.clone(),
            );

            let token = sequences.start_new_sequence();
            let outcome = player.play(token, &script).await;

            assert!(
                matches!(outcome, PlaybackOutcome::Cancelled { .. }),
                "cancel at sleep {cancel_at} should cancel"
            );
            assert_eq!(
                view.mutation_count(),
                mutations_at_cancel.load(Ordering::SeqCst),
                "no mutation after cancel at sleep {cancel_at}"
            );
        }
    }

    #[tokio::test]
    async fn test_stale_token_never_touches_view() {
        let mut view = MockThreadViewPort::new();
        view.expect_show_typing().never();
        view.expect_append_text().never();
        view.expect_append_photo().never();

        let sequences = SequenceRegistry::new();
        let player = player_with(
            InstantSleepProvider::new(),
            FixedRandomProvider::constant(0),
            Arc::new(view),
            sequences.clone(),
        );

        let stale = sequences.start_new_sequence();
        sequences.start_new_sequence();

        let outcome = player.play(stale, &history()).await;
        assert_eq!(outcome, PlaybackOutcome::Cancelled { at_step: 0 });
    }

    #[tokio::test]
    async fn test_typing_wraps_each_message() {
        let mut view = MockThreadViewPort::new();
        let mut seq = Sequence::new();
        let hidden = Arc::new(Mutex::new(Vec::new()));

        view.expect_show_typing()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| FragmentId(7));
        let hidden_log = hidden.clone();
        view.expect_hide_typing()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |id| {
                if let Ok(mut log) = hidden_log.lock() {
                    log.push(id);
                }
            });
        view.expect_append_text()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| FragmentId(8));

        let sequences = SequenceRegistry::new();
        let player = player_with(
            InstantSleepProvider::new(),
            FixedRandomProvider::constant(0),
            Arc::new(view),
            sequences.clone(),
        );

        let mut script = Script::new(ThreadKind::Art);
        script
            .push(Step::Typing(DelayRange::new(600, 1000)))
            .push(Step::Text(TextMessage::incoming("hello")));

        let outcome = player.play(sequences.start_new_sequence(), &script).await;
        assert!(outcome.is_completed());
        assert_eq!(*hidden.lock().expect("lock"), vec![FragmentId(7)]);
    }

    #[test]
    fn test_render_final_has_no_typing_and_no_delay() {
        let sleep = InstantSleepProvider::new();
        let view = ExperienceState::new();
        let player = player_with(
            sleep.clone(),
            FixedRandomProvider::constant(0),
            Arc::new(view.clone()),
            SequenceRegistry::new(),
        );
        let script = history();

        let appended = player.render_final(&script);

        assert_eq!(appended, 9);
        assert_eq!(view.typing_count(), 0);
        assert!(sleep.calls().is_empty());
        assert_eq!(view.snapshot().messages().count(), 9);
    }
}
