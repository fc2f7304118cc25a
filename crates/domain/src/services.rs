/// Registry of known blocked-service names (§4.7).
///
/// `Settings.services_rules` entries naming anything outside this set are
/// dropped at construction time with a debug log — the registry is the
/// thing a real deployment would keep in sync with its UI's service picker.
pub const KNOWN_SERVICES: &[&str] = &[
    "facebook",
    "instagram",
    "twitter",
    "youtube",
    "tiktok",
    "netflix",
    "whatsapp",
    "snapchat",
    "reddit",
    "twitch",
];

pub fn is_known_service(name: &str) -> bool {
    KNOWN_SERVICES.iter().any(|s| s.eq_ignore_ascii_case(name))
}
