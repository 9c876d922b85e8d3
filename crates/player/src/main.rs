//! Mărțișor Player - composition root binary.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use martisor_player::application::PlayerConfig;
use martisor_player::infrastructure::create_platform;
use martisor_player::runner::{run, RunnerDeps};

fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "martisor_player=debug,dioxus=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Mărțișor Player");

    let config = PlayerConfig::from_env()?;
    tracing::debug!(?config, "Loaded configuration");

    let platform = create_platform(config.asset_root.clone());
    run(RunnerDeps { platform, config })
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
