use std::collections::HashSet;

use serde_json::{Value, json};

use crate::api::{ApiRequest, Endpoint, GuildResource};
use crate::error::ValidationError;

/// Live violation feed. Remembers every rendered event so replays and
/// history/stream overlap render one card per event.
#[derive(Debug, Default)]
pub struct AuditFeed {
    seen: HashSet<String>,
}

impl AuditFeed {
    /// `true` when the event has not been rendered yet.
    pub fn admit(&mut self, event_id: &str) -> bool {
        self.seen.insert(event_id.to_string())
    }

    /// History reloads clear the log container, and with it every card.
    pub fn reset(&mut self) {
        self.seen.clear();
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

pub fn join_room_payload(guild_id: &str) -> Value {
    json!({ "guild_id": guild_id })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriageAction {
    Ignore,
    Delete,
    Warn,
    WarnAndDelete,
}

impl TriageAction {
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Ignore => "audit_ignore",
            Self::Delete => "audit_delete",
            Self::Warn => "audit_warn",
            Self::WarnAndDelete => "audit_warn_and_delete",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "audit_ignore" => Some(Self::Ignore),
            "audit_delete" => Some(Self::Delete),
            "audit_warn" => Some(Self::Warn),
            "audit_warn_and_delete" => Some(Self::WarnAndDelete),
            _ => None,
        }
    }

    /// Suffix shown after "Handled:".
    pub fn handled_label(self) -> &'static str {
        self.wire_name().trim_start_matches("audit_")
    }

    pub fn button_label(self) -> &'static str {
        match self {
            Self::Ignore => "Ignore",
            Self::Delete => "Delete message",
            Self::Warn => "Warn user",
            Self::WarnAndDelete => "Warn and delete",
        }
    }

    /// Auto-deleted messages can only be followed up with a warning.
    pub fn offered(auto_deleted: bool) -> &'static [Self] {
        if auto_deleted {
            &[Self::Warn]
        } else {
            &[Self::Ignore, Self::Delete, Self::Warn, Self::WarnAndDelete]
        }
    }
}

/// Ids read off a `.violation-card`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardIds<'a> {
    pub event_id: Option<&'a str>,
    pub message_id: Option<&'a str>,
    pub channel_id: Option<&'a str>,
    pub user_id: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriageRequest {
    pub action: TriageAction,
    pub event_id: String,
    pub message_id: String,
    pub channel_id: String,
    pub target_user_id: String,
}

impl TriageRequest {
    pub fn from_card(action: &str, card: &CardIds<'_>) -> Result<Self, ValidationError> {
        let action = TriageAction::parse(action).ok_or(ValidationError::InvalidAction)?;
        let field = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(ToString::to_string)
                .ok_or(ValidationError::MissingActionOrTarget)
        };
        Ok(Self {
            action,
            event_id: field(card.event_id)?,
            message_id: field(card.message_id)?,
            channel_id: field(card.channel_id)?,
            target_user_id: field(card.user_id)?,
        })
    }

    pub fn request(&self, guild_id: &str) -> ApiRequest {
        Endpoint::guild(guild_id, GuildResource::AuditAction).post(json!({
            "action": self.action.wire_name(),
            "event_id": self.event_id,
            "message_id": self.message_id,
            "channel_id": self.channel_id,
            "target_user_id": self.target_user_id,
        }))
    }
}

pub fn exemption_removal_confirmation(target_id: &str) -> String {
    format!("Remove the exemption for ID {target_id}?")
}

pub fn is_exemption_removal(action: &str) -> bool {
    matches!(
        action,
        "action/ai_exempt_remove_user" | "action/ai_exempt_remove_channel"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn duplicate_events_are_admitted_once() {
        let mut feed = AuditFeed::default();
        assert!(feed.admit("ev-1"));
        assert!(!feed.admit("ev-1"));
        assert!(feed.admit("ev-2"));
        assert_eq!(feed.len(), 2);
        feed.reset();
        assert!(feed.is_empty());
        assert!(feed.admit("ev-1"));
    }

    #[test]
    fn offered_actions_depend_on_auto_delete() {
        assert_eq!(TriageAction::offered(true), &[TriageAction::Warn]);
        assert_eq!(
            TriageAction::offered(false),
            &[
                TriageAction::Ignore,
                TriageAction::Delete,
                TriageAction::Warn,
                TriageAction::WarnAndDelete
            ]
        );
        assert_eq!(TriageAction::WarnAndDelete.handled_label(), "warn_and_delete");
    }

    #[test]
    fn triage_posts_card_ids() {
        let card = CardIds {
            event_id: Some("ev-1"),
            message_id: Some("m-1"),
            channel_id: Some("c-1"),
            user_id: Some("u-1"),
        };
        let request = TriageRequest::from_card("audit_delete", &card)
            .expect("card is complete")
            .request("7");
        assert_eq!(request.path, "/api/guild/7/audit_action");
        assert_eq!(
            request.body,
            Some(json!({
                "action": "audit_delete",
                "event_id": "ev-1",
                "message_id": "m-1",
                "channel_id": "c-1",
                "target_user_id": "u-1"
            }))
        );
        assert_eq!(
            TriageRequest::from_card("audit_nuke", &card),
            Err(ValidationError::InvalidAction)
        );
        let partial = CardIds {
            user_id: None,
            ..card
        };
        assert_eq!(
            TriageRequest::from_card("audit_warn", &partial),
            Err(ValidationError::MissingActionOrTarget)
        );
    }

    #[test]
    fn exemption_removals_are_recognised() {
        assert!(is_exemption_removal("action/ai_exempt_remove_user"));
        assert!(!is_exemption_removal("action/kick"));
    }
}
