use std::sync::Arc;

use crate::application::{Experience, PlayerConfig};
use crate::state::Platform;
use crate::ui::presentation::state::{ExperienceSnapshot, ExperienceState};

pub struct RunnerDeps {
    pub platform: Platform,
    pub config: PlayerConfig,
}

/// Wire the experience to a fresh screen state
pub fn compose(deps: RunnerDeps) -> (Experience, ExperienceState) {
    let RunnerDeps { platform, config } = deps;
    let state = ExperienceState::new();
    let experience = Experience::new(
        config,
        platform,
        Arc::new(state.clone()),
        Arc::new(state.clone()),
    );
    (experience, state)
}

/// Launch the desktop shell
#[cfg(feature = "desktop")]
pub fn run(deps: RunnerDeps) -> anyhow::Result<()> {
    let (experience, state) = compose(deps);

    let head = format!("<style>{}</style>", load_player_css());
    let cfg = dioxus::desktop::Config::new().with_custom_head(head);

    dioxus::LaunchBuilder::new()
        .with_cfg(cfg)
        .with_context(experience)
        .with_context(state)
        .launch(crate::ui::app);
    Ok(())
}

/// Play the intro without a window and print the final screen as JSON
#[cfg(not(feature = "desktop"))]
pub fn run(deps: RunnerDeps) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let snapshot = runtime.block_on(run_headless(deps));
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

/// Run the intro to completion.
///
/// Playback futures are not `Send`; they are awaited in place on the
/// caller's thread.
pub async fn run_headless(deps: RunnerDeps) -> ExperienceSnapshot {
    let (experience, state) = compose(deps);

    experience.start().await;

    let snapshot = state.snapshot();
    tracing::info!(
        rows = snapshot.rows.len(),
        messages = snapshot.messages().count(),
        mutations = state.mutation_count(),
        "Intro finished"
    );
    snapshot
}

#[cfg(feature = "desktop")]
fn load_player_css() -> String {
    const FALLBACK_CSS: &str = "";

    let css_path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/css/player.css");
    std::fs::read_to_string(css_path).unwrap_or_else(|_| FALLBACK_CSS.to_string())
}
