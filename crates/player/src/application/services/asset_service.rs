//! Asset path resolution with a per-session cache

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use martisor_domain::{AssetSlot, ScriptAssets, ThreadKind};

use crate::state::Platform;

/// Resolves image slots to the first candidate path that exists.
///
/// Results are cached, including the fallback for a slot where nothing was
/// found, so each slot is probed at most once.
#[derive(Clone)]
pub struct AssetResolver {
    platform: Platform,
    cache: Arc<RwLock<HashMap<AssetSlot, Option<String>>>>,
}

impl AssetResolver {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            cache: Arc::default(),
        }
    }

    pub async fn resolve(&self, slot: AssetSlot) -> Option<String> {
        if let Some(hit) = self.lookup(slot) {
            return hit;
        }

        let mut resolved = None;
        for candidate in slot.candidates() {
            if self.platform.asset_exists(candidate).await {
                resolved = Some((*candidate).to_string());
                break;
            }
        }

        let resolved = match resolved {
            Some(path) => {
                tracing::debug!(?slot, %path, "Resolved asset");
                Some(path)
            }
            None if slot.is_optional() => {
                tracing::debug!(?slot, "Optional asset not found, leaving it out");
                None
            }
            None => {
                tracing::warn!(?slot, "No asset candidate found, using fallback path");
                slot.fallback().map(str::to_string)
            }
        };

        self.store(slot, resolved.clone());
        resolved
    }

    /// The resolved value without probing; the fallback if never resolved
    pub fn cached(&self, slot: AssetSlot) -> Option<String> {
        self.lookup(slot)
            .unwrap_or_else(|| slot.fallback().map(str::to_string))
    }

    /// Resolve every slot the thread's script needs
    pub async fn script_assets(&self, kind: ThreadKind) -> ScriptAssets {
        for slot in slots_for(kind) {
            self.resolve(*slot).await;
        }
        self.cached_script_assets()
    }

    /// Script assets from the cache only
    pub fn cached_script_assets(&self) -> ScriptAssets {
        let defaults = ScriptAssets::default();
        ScriptAssets {
            concept_image: self
                .cached(AssetSlot::ConceptSketch)
                .unwrap_or(defaults.concept_image),
            art_scans: self.cached(AssetSlot::ArtScans),
            tip_jar: self.cached(AssetSlot::TipJar).unwrap_or(defaults.tip_jar),
            rci_logo: self.cached(AssetSlot::RciLogo),
            nyrg_logo: self.cached(AssetSlot::NyrgLogo),
        }
    }

    fn lookup(&self, slot: AssetSlot) -> Option<Option<String>> {
        self.cache
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&slot)
            .cloned()
    }

    fn store(&self, slot: AssetSlot, value: Option<String>) {
        self.cache
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(slot, value);
    }
}

fn slots_for(kind: ThreadKind) -> &'static [AssetSlot] {
    match kind {
        ThreadKind::Art => &[AssetSlot::ConceptSketch, AssetSlot::ArtScans],
        ThreadKind::Support => &[AssetSlot::TipJar, AssetSlot::RciLogo, AssetSlot::NyrgLogo],
        ThreadKind::Event | ThreadKind::History | ThreadKind::Rsvp | ThreadKind::Generic => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::platform::mock::{
        test_platform_with, FixedRandomProvider, InstantSleepProvider, ScriptedWidgetHost,
        StaticAssetProbe,
    };
    use crate::ports::outbound::MockAssetProbe;

    fn resolver_with(probe: StaticAssetProbe) -> AssetResolver {
        AssetResolver::new(test_platform_with(
            InstantSleepProvider::new(),
            FixedRandomProvider::constant(0),
            probe,
            ScriptedWidgetHost::unavailable(),
        ))
    }

    #[tokio::test]
    async fn test_first_existing_candidate_wins() {
        let probe = StaticAssetProbe::new(["conceptsketch.jpg", "images/conceptsketch.jpg"]);
        let resolver = resolver_with(probe);

        let path = resolver.resolve(AssetSlot::ConceptSketch).await;
        assert_eq!(path.as_deref(), Some("images/conceptsketch.jpg"));
    }

    #[tokio::test]
    async fn test_resolution_is_cached() {
        let probe = StaticAssetProbe::new(["tipjar.gif"]);
        let resolver = resolver_with(probe.clone());

        assert_eq!(
            resolver.resolve(AssetSlot::TipJar).await.as_deref(),
            Some("tipjar.gif")
        );
        let probes = probe.probe_count();
        assert_eq!(
            resolver.resolve(AssetSlot::TipJar).await.as_deref(),
            Some("tipjar.gif")
        );
        assert_eq!(probe.probe_count(), probes);
        assert_eq!(resolver.cached(AssetSlot::TipJar).as_deref(), Some("tipjar.gif"));
    }

    #[tokio::test]
    async fn test_missing_required_asset_falls_back_to_first_candidate() {
        let resolver = resolver_with(StaticAssetProbe::default());
        assert_eq!(
            resolver.resolve(AssetSlot::ConceptSketch).await.as_deref(),
            Some("images/conceptsketc.jpg")
        );
    }

    #[tokio::test]
    async fn test_missing_optional_asset_is_left_out() {
        let resolver = resolver_with(StaticAssetProbe::default());
        assert_eq!(resolver.resolve(AssetSlot::ArtScans).await, None);
        assert_eq!(resolver.resolve(AssetSlot::NyrgLogo).await, None);
    }

    #[tokio::test]
    async fn test_support_assets_probe_only_support_slots() {
        let mut probe = MockAssetProbe::new();
        probe
            .expect_exists()
            .withf(|path| path.contains("tipjar") || path.contains("romanian"))
            .returning(|path| {
                let found = path == "images/romanianculturalinstitute.jpg";
                Box::pin(async move { found })
            });

        let resolver = AssetResolver::new(test_platform_with(
            InstantSleepProvider::new(),
            FixedRandomProvider::constant(0),
            probe,
            ScriptedWidgetHost::unavailable(),
        ));

        let assets = resolver.script_assets(ThreadKind::Support).await;
        assert_eq!(assets.tip_jar, "images/tipjar.gif");
        assert_eq!(
            assets.rci_logo.as_deref(),
            Some("images/romanianculturalinstitute.jpg")
        );
        assert_eq!(assets.nyrg_logo, None);
    }

    #[test]
    fn test_cached_without_resolution_uses_fallback() {
        let resolver = resolver_with(StaticAssetProbe::default());
        let assets = resolver.cached_script_assets();
        assert_eq!(assets, ScriptAssets::default());
    }
}
