//! Script builders for the scripted threads
//!
//! Each builder lays out the exact step order and delay ranges for one
//! thread. Asset paths that need probing are passed in already resolved.

use crate::content::{
    self, ART_DETAILS_TEXTS, EVENT_DETAILS_TEXTS, EVENT_GIF, EVENT_GIF_CAPTION, HISTORY_IMAGE,
    HISTORY_TEXTS, NYRG_URL, RCI_URL, RSVP_EMBED_HEIGHT, RSVP_EMBED_TITLE, RSVP_EMBED_URL,
    SUPPORT_ARTISTS, SUPPORT_READ_MORE, SUPPORT_THANKS, SUPPORT_VENMO_LABEL, VENMO_URL,
};
use crate::step::{DelayRange, EmbedMessage, PhotoMessage, Script, Step, TextMessage};
use crate::thread::ThreadKind;

/// Asset paths resolved before a script is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptAssets {
    pub concept_image: String,
    pub art_scans: Option<String>,
    pub tip_jar: String,
    pub rci_logo: Option<String>,
    pub nyrg_logo: Option<String>,
}

impl Default for ScriptAssets {
    fn default() -> Self {
        Self {
            concept_image: content::AssetSlot::ConceptSketch
                .fallback()
                .unwrap_or_default()
                .to_string(),
            art_scans: None,
            tip_jar: content::AssetSlot::TipJar
                .fallback()
                .unwrap_or_default()
                .to_string(),
            rci_logo: None,
            nyrg_logo: None,
        }
    }
}

/// Build the script for a thread kind; `None` for generic chats.
pub fn script_for(kind: ThreadKind, assets: &ScriptAssets) -> Option<Script> {
    match kind {
        ThreadKind::Event => Some(event_details()),
        ThreadKind::Art => Some(art_details(assets)),
        ThreadKind::History => Some(history()),
        ThreadKind::Rsvp => Some(rsvp()),
        ThreadKind::Support => Some(support(assets)),
        ThreadKind::Generic => None,
    }
}

pub fn rsvp_embed() -> EmbedMessage {
    EmbedMessage {
        title: RSVP_EMBED_TITLE.to_string(),
        src: RSVP_EMBED_URL.to_string(),
        height: RSVP_EMBED_HEIGHT,
    }
}

pub fn event_details() -> Script {
    let mut script = Script::new(ThreadKind::Event);
    script
        .push(Step::Photo(
            PhotoMessage::outgoing(EVENT_GIF).with_caption(EVENT_GIF_CAPTION),
        ))
        .push(Step::Pause(DelayRange::new(220, 520)));

    for html in EVENT_DETAILS_TEXTS {
        script
            .push(Step::Typing(DelayRange::new(850, 1500)))
            .push(Step::Text(TextMessage::incoming(html)))
            .push(Step::Pause(DelayRange::new(320, 920)));
    }

    script
        .push(Step::Typing(DelayRange::new(520, 980)))
        .push(Step::Embed(rsvp_embed()));
    script
}

pub fn art_details(assets: &ScriptAssets) -> Script {
    let mut script = Script::new(ThreadKind::Art);
    script
        .push(Step::Typing(DelayRange::new(650, 1200)))
        .push(Step::Photo(PhotoMessage::incoming(&assets.concept_image)))
        .push(Step::Pause(DelayRange::new(260, 640)));

    for text in ART_DETAILS_TEXTS {
        script
            .push(Step::Typing(DelayRange::new(800, 1400)))
            .push(Step::Text(TextMessage::incoming(text)))
            .push(Step::Pause(DelayRange::new(280, 760)));
    }

    if let Some(scans) = &assets.art_scans {
        script
            .push(Step::Typing(DelayRange::new(750, 1350)))
            .push(Step::Photo(PhotoMessage::incoming(scans)));
    }
    script
}

pub fn history() -> Script {
    let mut script = Script::new(ThreadKind::History);
    script
        .push(Step::Typing(DelayRange::new(650, 1200)))
        .push(Step::Photo(PhotoMessage::incoming(HISTORY_IMAGE)))
        .push(Step::Pause(DelayRange::new(220, 520)));

    for text in HISTORY_TEXTS {
        script
            .push(Step::Typing(DelayRange::new(780, 1500)))
            .push(Step::Text(TextMessage::incoming(text)))
            .push(Step::Pause(DelayRange::new(220, 620)));
    }
    script
}

pub fn rsvp() -> Script {
    let mut script = Script::new(ThreadKind::Rsvp);
    script
        .push(Step::Typing(DelayRange::new(520, 980)))
        .push(Step::Embed(rsvp_embed()));
    script
}

pub fn support(assets: &ScriptAssets) -> Script {
    let rci = content::normalize_url(RCI_URL);
    let nyrg = content::normalize_url(NYRG_URL);
    let venmo = content::normalize_url(VENMO_URL);

    let label = |url: &str| {
        let shown = content::display_url(url);
        if shown.is_empty() {
            url.to_string()
        } else {
            shown
        }
    };

    let mut items = vec![
        Step::Text(TextMessage::incoming(SUPPORT_THANKS)),
        Step::Text(TextMessage::incoming(SUPPORT_READ_MORE)),
    ];
    if let Some(logo) = &assets.rci_logo {
        items.push(Step::Photo(PhotoMessage::incoming(logo).with_href(&rci)));
    }
    items.push(Step::Text(TextMessage::incoming(content::link_html(
        &rci,
        &label(&rci),
    ))));
    if let Some(logo) = &assets.nyrg_logo {
        items.push(Step::Photo(PhotoMessage::incoming(logo).with_href(&nyrg)));
    }
    items.push(Step::Text(TextMessage::incoming(content::link_html(
        &nyrg,
        &label(&nyrg),
    ))));
    items.push(Step::Text(TextMessage::incoming(SUPPORT_ARTISTS)));
    items.push(Step::Text(TextMessage::incoming(content::link_html(
        &venmo,
        SUPPORT_VENMO_LABEL,
    ))));
    items.push(Step::Photo(
        PhotoMessage::incoming(&assets.tip_jar).with_href(&venmo),
    ));

    let mut script = Script::new(ThreadKind::Support);
    for item in items {
        script
            .push(Step::Typing(DelayRange::new(650, 1200)))
            .push(item)
            .push(Step::Pause(DelayRange::new(240, 620)));
    }
    script
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typing_before_each_visible(script: &Script) -> bool {
        let mut seen_typing = false;
        for step in &script.steps {
            match step {
                Step::Typing(_) => seen_typing = true,
                Step::Pause(_) => {}
                _ => {
                    if !seen_typing {
                        return false;
                    }
                    seen_typing = false;
                }
            }
        }
        true
    }

    #[test]
    fn test_history_is_image_then_eight_texts() {
        let script = history();
        let visible: Vec<_> = script.final_content().collect();
        assert_eq!(visible.len(), 9);
        assert!(matches!(visible[0], Step::Photo(p) if p.src == HISTORY_IMAGE));
        for (step, expected) in visible[1..].iter().zip(HISTORY_TEXTS) {
            assert!(matches!(step, Step::Text(t) if t.html == expected));
        }
        assert!(typing_before_each_visible(&script));
    }

    #[test]
    fn test_event_opens_with_outgoing_gif_and_ends_with_embed() {
        let script = event_details();
        assert!(matches!(
            script.steps.first(),
            Some(Step::Photo(p)) if p.direction == crate::step::Direction::Outgoing
                && p.caption.as_deref() == Some(EVENT_GIF_CAPTION)
        ));
        assert!(matches!(script.steps.last(), Some(Step::Embed(_))));
        assert_eq!(script.visible_count(), 1 + EVENT_DETAILS_TEXTS.len() + 1);
        assert!(script.uses_widget());
    }

    #[test]
    fn test_event_popup_link_comes_before_the_embed() {
        let script = event_details();
        let popup = script
            .steps
            .iter()
            .position(Step::carries_popup_link)
            .expect("event thread carries the popup link");
        assert_eq!(script.steps.iter().filter(|s| s.carries_popup_link()).count(), 1);
        assert!(popup < script.steps.len() - 1);
        assert!(!history().steps.iter().any(Step::carries_popup_link));
    }

    #[test]
    fn test_art_scans_only_when_resolved() {
        let without = art_details(&ScriptAssets::default());
        assert_eq!(without.visible_count(), 4);

        let assets = ScriptAssets {
            art_scans: Some("martisor-scans.gif".to_string()),
            ..ScriptAssets::default()
        };
        let with = art_details(&assets);
        assert_eq!(with.visible_count(), 5);
        assert!(matches!(
            with.steps.last(),
            Some(Step::Photo(p)) if p.src == "martisor-scans.gif"
        ));
        assert!(typing_before_each_visible(&with));
    }

    #[test]
    fn test_support_links_are_normalized() {
        let script = support(&ScriptAssets::default());
        let texts: Vec<_> = script
            .final_content()
            .filter_map(|s| match s {
                Step::Text(t) => Some(t.html.clone()),
                _ => None,
            })
            .collect();

        assert!(texts
            .iter()
            .any(|t| t.contains(r#"href="https://rciusa.info/""#) && t.contains(">rciusa.info<")));
        assert!(texts.iter().any(|t| t.contains(SUPPORT_VENMO_LABEL)));
        assert!(matches!(
            script.final_content().last(),
            Some(Step::Photo(p)) if p.href.as_deref() == Some(VENMO_URL)
        ));
        assert!(typing_before_each_visible(&script));
    }

    #[test]
    fn test_support_includes_logos_when_resolved() {
        let assets = ScriptAssets {
            rci_logo: Some("images/romanianculturalinstitute.jpg".to_string()),
            nyrg_logo: Some("newyorkromaniansgroup.jpg".to_string()),
            ..ScriptAssets::default()
        };
        assert_eq!(
            support(&assets).visible_count(),
            support(&ScriptAssets::default()).visible_count() + 2
        );
    }

    #[test]
    fn test_generic_has_no_script() {
        assert!(script_for(ThreadKind::Generic, &ScriptAssets::default()).is_none());
        for kind in ThreadKind::SCRIPTED {
            let script = script_for(kind, &ScriptAssets::default()).expect("scripted");
            assert_eq!(script.thread, kind);
            assert!(script.visible_count() > 0);
        }
    }
}
