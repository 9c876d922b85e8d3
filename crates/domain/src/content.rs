//! Scripted copy, name pools and asset locations for the invitation.
//!
//! Pure data plus a few string helpers. Nothing here touches I/O; asset
//! paths are only candidates, the player probes them at runtime.

use chrono::{NaiveTime, Timelike};

// =============================================================================
// Embedded RSVP form
// =============================================================================

pub const TALLY_FORM_ID: &str = "KYldG7";
pub const TALLY_SCRIPT_URL: &str = "https://tally.so/widgets/embed.js";
pub const RSVP_EMBED_URL: &str = "https://tally.so/embed/KYldG7?alignLeft=1&hideTitle=1&transparentBackground=1&dynamicHeight=1";
pub const RSVP_EMBED_TITLE: &str = "RSVP to Mărțișor Event";
pub const RSVP_EMBED_HEIGHT: u32 = 356;

/// Attribute that marks the popup link the widget script wires up
pub const POPUP_LINK_MARKER: &str = "data-tally-open";

pub const RSVP_POPUP_LINK_HTML: &str = concat!(
    r##"<a class="tally-popup-link" href="#tally-open=KYldG7&tally-emoji-text=👋&tally-emoji-animation=wave" "##,
    r#"data-tally-open="KYldG7" data-tally-emoji-text="👋" data-tally-emoji-animation="wave">"#,
    "Click here for RSVP</a>"
);

// =============================================================================
// Thread copy
// =============================================================================

pub const EVENT_GIF: &str = "images/martisor.gif";
pub const EVENT_GIF_CAPTION: &str = "Happy Mărțișor!";

pub const EVENT_DETAILS_TEXTS: [&str; 6] = [
    "Celebrate spring the Romanian way!",
    "Experience the live creation of a <strong>large-scale Mărțișor</strong> — a work exploring memory.",
    "Join us for the performance, food, and community. Open to all.",
    "<strong>Sunday, March 1st @ 2:00 PM</strong>",
    "<strong>366 Devoe Street, Brooklyn</strong>",
    RSVP_POPUP_LINK_HTML,
];

pub const ART_DETAILS_TEXTS: [&str; 3] = [
    "The mărțișor is a Romanian spring tradition: a small braided token of red and white thread, exchanged on March 1st as a symbol of renewal and connection.",
    "Memory is sustained in presence and in practice. Through memory, objects and events become distorted but durational, carried by the collective, across time and place.",
    "Together we will weave a large mărțișor, strung with bead constructed of a large amalgamation of objects related to memory.",
];

pub const HISTORY_IMAGE: &str = "images/martisor-example.png";

pub const HISTORY_TEXTS: [&str; 8] = [
    "Mărțișor is an ancient Romanian celebration on March 1st marking the arrival of spring and the victory of light over winter.",
    "The name is a diminutive of Martie, literally translating to \"little March.\"",
    "The core symbol is a red and white twisted string representing the transition from the white of winter to the red vitality of spring.",
    "It was added to the UNESCO Intangible Cultural Heritage list in 2017 to preserve its historical and cultural significance.",
    "Historical roots date back over 2,000 years to Roman and Dacian times, possibly tied to the feast of the god Mars.",
    "People traditionally wear the string pinned to their clothing or around their wrist for the first 9 to 12 days of the month.",
    "In modern times, the string is usually attached to small charms like snowdrops, ladybugs, or four-leaf clovers for good luck.",
    "The tradition concludes by tying the red and white string to the branch of a flowering fruit tree to ensure health and prosperity.",
];

pub const SUPPORT_THANKS: &str =
    "Thank you to the RCI and the NYRG for their support in cultivating community for this effort";
pub const SUPPORT_READ_MORE: &str = "Read more about the organizations:";
pub const SUPPORT_ARTISTS: &str = "If you would like to support the artists that put this together (Alexia Asgari and Nicolette Casalan):";
pub const SUPPORT_VENMO_LABEL: &str = "Click here to support <3";

pub const RCI_URL: &str = "rciusa.info/";
pub const NYRG_URL: &str = "https://instagram.com/newyorkromaniangroup/";
pub const VENMO_URL: &str = "https://venmo.com/u/Alexia-Asgari";

// =============================================================================
// Chat list pools
// =============================================================================

pub const ROMANIAN_NAMES: [&str; 30] = [
    "Ana Popescu",
    "Mihai Ionescu",
    "Ioana Dumitrescu",
    "Andrei Stan",
    "Elena Marinescu",
    "Radu Petrescu",
    "Cătălina Georgescu",
    "Ștefan Rusu",
    "Cristina Matei",
    "Vlad Popa",
    "Alina Toma",
    "Bogdan Enache",
    "Teodora Ilie",
    "Daria Stoica",
    "Sorin Dobre",
    "Irina Pavel",
    "Rareș Ciobanu",
    "Bianca Șerban",
    "Dragoș Vasile",
    "Maria Nistor",
    "Nicolette Cristea",
    "Gabriel Munteanu",
    "Oana Sava",
    "Mădălina Răduț",
    "Florin Neagu",
    "Alexia A",
    "Dinu Barbu",
    "Iulia Chiriac",
    "Săndel Păun",
    "Roxana Bîrsan",
];

pub const PREVIEW_OPTIONS: [&str; 6] = [
    "Happy Mărțișor!",
    "Noroc, sănătate și multă voie bună!",
    "Happy March 1st!",
    "Happy Spring!!!",
    "Un simbol mic pentru o prietenie mare. Să ai un Martie de vis!",
    "See you at the celebration!",
];

pub const TIME_OPTIONS: [&str; 9] = [
    "11:08 AM",
    "12:44 AM",
    "9:11 AM",
    "8:33 AM",
    "Yesterday",
    "Yesterday",
    "7:02 AM",
    "6:18 AM",
    "10:29 PM",
];

pub const GENERIC_AVATARS: [&str; 7] = [
    "images/b.jpg",
    "images/c.jpg",
    "images/d.jpg",
    "images/e.jpg",
    "images/f.jpg",
    "images/g.jpg",
    "images/h.jpg",
];

pub const GENERIC_BADGE: &str = "99+";
pub const SPECIAL_BADGE: &str = "1";

// =============================================================================
// Assets with fallback locations
// =============================================================================

/// An image that may live under `images/` or at the asset root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetSlot {
    ConceptSketch,
    ArtScans,
    TipJar,
    RciLogo,
    NyrgLogo,
}

impl AssetSlot {
    /// Paths to try, in order
    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            AssetSlot::ConceptSketch => &[
                "images/conceptsketc.jpg",
                "conceptsketc.jpg",
                "images/conceptsketch.jpg",
                "conceptsketch.jpg",
            ],
            AssetSlot::ArtScans => &["images/martisor-scans.gif", "martisor-scans.gif"],
            AssetSlot::TipJar => &["images/tipjar.gif", "tipjar.gif"],
            AssetSlot::RciLogo => &[
                "images/romanianculturalinstitute.jpg",
                "romanianculturalinstitute.jpg",
            ],
            AssetSlot::NyrgLogo => &[
                "images/newyorkromaniansgroup.jpg",
                "newyorkromaniansgroup.jpg",
            ],
        }
    }

    /// Optional assets are left out when no candidate exists
    pub fn is_optional(self) -> bool {
        matches!(
            self,
            AssetSlot::ArtScans | AssetSlot::RciLogo | AssetSlot::NyrgLogo
        )
    }

    /// Value used when no candidate resolves
    pub fn fallback(self) -> Option<&'static str> {
        if self.is_optional() {
            None
        } else {
            self.candidates().first().copied()
        }
    }
}

// =============================================================================
// String helpers
// =============================================================================

/// Make a bare host/path clickable everywhere by forcing a scheme.
pub fn normalize_url(url: &str) -> String {
    let raw = url.trim();
    if raw.is_empty() {
        return String::new();
    }
    if has_http_scheme(raw) {
        return raw.to_string();
    }
    format!("https://{}", raw.trim_start_matches('/'))
}

/// URL text for a chat bubble: no scheme, no trailing slash.
pub fn display_url(url: &str) -> String {
    let raw = url.trim();
    let without_scheme = if has_http_scheme(raw) {
        match raw.find("://") {
            Some(idx) => &raw[idx + 3..],
            None => raw,
        }
    } else {
        raw
    };
    without_scheme.trim_end_matches('/').to_string()
}

fn has_http_scheme(raw: &str) -> bool {
    let lower = raw.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Anchor markup for a link bubble
pub fn link_html(href: &str, label: &str) -> String {
    format!(r#"<a href="{href}" target="_blank" rel="noopener">{label}</a>"#)
}

/// Status-bar clock label, e.g. `2:05 PM`
pub fn format_clock_label(time: NaiveTime) -> String {
    let (is_pm, hour) = time.hour12();
    let suffix = if is_pm { "PM" } else { "AM" };
    format!("{}:{:02} {}", hour, time.minute(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("rciusa.info/"), "https://rciusa.info/");
        assert_eq!(normalize_url("//example.com"), "https://example.com");
        assert_eq!(
            normalize_url("  HTTP://Example.com/a "),
            "HTTP://Example.com/a"
        );
        assert_eq!(normalize_url("   "), "");
    }

    #[test]
    fn test_display_url() {
        assert_eq!(display_url("https://rciusa.info/"), "rciusa.info");
        assert_eq!(
            display_url("https://instagram.com/newyorkromaniangroup/"),
            "instagram.com/newyorkromaniangroup"
        );
        assert_eq!(display_url("example.com//"), "example.com");
        assert_eq!(display_url(""), "");
    }

    #[test]
    fn test_format_clock_label() {
        let t = NaiveTime::from_hms_opt(14, 5, 0).expect("valid time");
        assert_eq!(format_clock_label(t), "2:05 PM");

        let midnight = NaiveTime::from_hms_opt(0, 30, 0).expect("valid time");
        assert_eq!(format_clock_label(midnight), "12:30 AM");

        let noon = NaiveTime::from_hms_opt(12, 0, 59).expect("valid time");
        assert_eq!(format_clock_label(noon), "12:00 PM");
    }

    #[test]
    fn test_asset_fallbacks() {
        assert_eq!(
            AssetSlot::ConceptSketch.fallback(),
            Some("images/conceptsketc.jpg")
        );
        assert_eq!(AssetSlot::TipJar.fallback(), Some("images/tipjar.gif"));
        assert_eq!(AssetSlot::ArtScans.fallback(), None);
        assert_eq!(AssetSlot::RciLogo.fallback(), None);
    }

    #[test]
    fn test_popup_link_carries_marker() {
        assert!(RSVP_POPUP_LINK_HTML.contains(POPUP_LINK_MARKER));
        assert!(RSVP_POPUP_LINK_HTML.contains(TALLY_FORM_ID));
        assert!(RSVP_EMBED_URL.contains(TALLY_FORM_ID));
    }
}
