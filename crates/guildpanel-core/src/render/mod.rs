//! HTML fragments for every server collection.
//!
//! All fragments are built with `maud`, so server-supplied text is escaped
//! wherever it lands, attribute or body. Each renderer accepts an empty slice
//! and then draws its placeholder, which is what [`empty_state`] relies on.

pub mod accounts;
pub mod audit;
pub mod guild;
pub mod moderation;
pub mod permissions;
pub mod settings;
pub mod voice;
pub mod warnings;

use chrono::{DateTime, NaiveDateTime};

use crate::action::CollectionKind;

/// Placeholder markup for a collection that just lost its last item.
pub fn empty_state(kind: CollectionKind) -> String {
    match kind {
        CollectionKind::ShopItems => guild::shop_items(&[]),
        CollectionKind::KnowledgeBase => guild::knowledge_base(&[]),
        CollectionKind::Faq => guild::faq(&[]),
        CollectionKind::BotWhitelist => settings::bot_whitelist(&[]),
        CollectionKind::AiDependentChannels => settings::ai_channels(&[]),
        CollectionKind::VoiceChannels => voice::voice_channels(&[], None),
        CollectionKind::MutedUsers => moderation::muted_users(&[]),
        CollectionKind::ExemptUsers => audit::exempt_users(&[]),
        CollectionKind::ExemptChannels => audit::exempt_channels(&[]),
        CollectionKind::WarnedUsers => warnings::warned_users(&[]),
    }
}

/// First `max` characters, and whether anything was cut.
pub(crate) fn truncate_chars(text: &str, max: usize) -> (String, bool) {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max).collect();
    (head, chars.next().is_some())
}

/// Only http(s) URLs reach `src`/`href` attributes.
pub(crate) fn safe_url(url: &str) -> &str {
    let trimmed = url.trim();
    if trimmed.starts_with("https://") || trimmed.starts_with("http://") {
        trimmed
    } else {
        ""
    }
}

pub(crate) fn format_timestamp(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format("%Y-%m-%d %H:%M:%S").to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format("%Y-%m-%d %H:%M:%S").to_string();
    }
    raw.to_string()
}

pub(crate) fn format_unix_seconds(seconds: i64) -> String {
    DateTime::from_timestamp(seconds, 0).map_or_else(
        || seconds.to_string(),
        |moment| moment.format("%Y-%m-%d %H:%M UTC").to_string(),
    )
}
