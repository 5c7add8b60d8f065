//! Click-to-REST commands.
//!
//! A clicked `.action-btn` declares what to do through `data-action`,
//! `data-target-id` and `data-sub-action`, falling back to the nearest
//! `data-entity-id` ancestor for the target. Those strings are validated into
//! an [`ActionCommand`] before any confirmation prompt or request.

use std::collections::HashSet;

use serde_json::{Map, Value, json};

use crate::api::{ApiRequest, Endpoint, GuildResource};
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    Prompt,
    Skip,
}

/// Relative action route such as `action/kick`. Segments are restricted so the
/// value can be appended to a guild path verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionPath(String);

impl ActionPath {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingActionOrTarget);
        }
        let valid = trimmed.split('/').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
        });
        if !valid {
            return Err(ValidationError::InvalidAction);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetId {
    Text(String),
    /// Knowledge-base entries are addressed by their 1-based position.
    Index(u64),
}

impl TargetId {
    fn to_json(&self) -> Value {
        match self {
            Self::Text(text) => Value::String(text.clone()),
            Self::Index(index) => json!(index),
        }
    }

    pub fn display(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Index(index) => index.to_string(),
        }
    }
}

/// Raw attribute values read from the clicked element.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionAttributes<'a> {
    pub action: Option<&'a str>,
    pub target_id: Option<&'a str>,
    pub entity_id: Option<&'a str>,
    pub sub_action: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionCommand {
    pub action: ActionPath,
    pub target: TargetId,
    pub sub_action: Option<String>,
}

impl ActionCommand {
    pub fn from_attributes(attrs: &ActionAttributes<'_>) -> Result<Self, ValidationError> {
        let action = present(attrs.action).ok_or(ValidationError::MissingActionOrTarget)?;
        let target = present(attrs.target_id)
            .or_else(|| present(attrs.entity_id))
            .ok_or(ValidationError::MissingActionOrTarget)?;
        let action = ActionPath::parse(action)?;
        let target = if action.as_str() == "data/kb" {
            target
                .parse::<u64>()
                .map(TargetId::Index)
                .map_err(|_| ValidationError::MissingActionOrTarget)?
        } else {
            TargetId::Text(target.to_string())
        };
        Ok(Self {
            action,
            target,
            sub_action: present(attrs.sub_action).map(ToString::to_string),
        })
    }

    pub fn confirmation_message(&self) -> String {
        let target = self.target.display();
        let phrase = match self.action.as_str() {
            "action/unmute" => Some(format!("remove the mute on user {target}")),
            "action/kick" => Some(format!("kick user {target}")),
            "action/ban" => Some(format!("ban user {target}")),
            "action/delete_role" => Some(format!("delete role {target}")),
            _ => None,
        };
        match phrase {
            Some(phrase) => format!("Are you sure you want to {phrase}?"),
            None => format!("Are you sure you want to perform this action on item {target}?"),
        }
    }

    pub fn payload(&self, reason: &str) -> Value {
        let target = self.target.to_json();
        let mut body = Map::new();
        body.insert("target_id".to_string(), target.clone());
        body.insert("reason".to_string(), Value::String(reason.to_string()));
        if let Some(sub_action) = &self.sub_action {
            body.insert("action".to_string(), Value::String(sub_action.clone()));
            match self.action.as_str() {
                "shop/action" if sub_action == "delete" => {
                    body.insert("item_slug".to_string(), target);
                }
                "data/kb" => {
                    body.insert("index".to_string(), target);
                }
                "data/faq" => {
                    body.insert("keyword".to_string(), target);
                }
                _ => {}
            }
        }
        Value::Object(body)
    }

    pub fn request(&self, guild_id: &str, reason: &str) -> ApiRequest {
        Endpoint::guild(guild_id, GuildResource::Action(self.action.as_str().to_string()))
            .post(self.payload(reason))
    }

    /// Key for the in-flight guard.
    pub fn flight_key(&self) -> String {
        format!("{}#{}", self.action.as_str(), self.target.display())
    }
}

fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

/// Entity-level lock: a second dispatch for the same entity is refused until
/// the first one finishes.
#[derive(Debug, Default)]
pub struct InFlight {
    keys: HashSet<String>,
}

impl InFlight {
    pub fn begin(&mut self, key: &str) -> bool {
        self.keys.insert(key.to_string())
    }

    pub fn finish(&mut self, key: &str) {
        self.keys.remove(key);
    }

    pub fn is_busy(&self, key: &str) -> bool {
        self.keys.contains(key)
    }
}

/// Server collections that can run empty after a removal, keyed by container id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    ShopItems,
    KnowledgeBase,
    Faq,
    BotWhitelist,
    AiDependentChannels,
    VoiceChannels,
    MutedUsers,
    ExemptUsers,
    ExemptChannels,
    WarnedUsers,
}

impl CollectionKind {
    pub const ALL: [Self; 10] = [
        Self::ShopItems,
        Self::KnowledgeBase,
        Self::Faq,
        Self::BotWhitelist,
        Self::AiDependentChannels,
        Self::VoiceChannels,
        Self::MutedUsers,
        Self::ExemptUsers,
        Self::ExemptChannels,
        Self::WarnedUsers,
    ];

    pub fn container_id(self) -> &'static str {
        match self {
            Self::ShopItems => "shop-items-table",
            Self::KnowledgeBase => "kb-list",
            Self::Faq => "faq-accordion",
            Self::BotWhitelist => "bot-whitelist",
            Self::AiDependentChannels => "ai-dep-list",
            Self::VoiceChannels => "voice-channels-grid",
            Self::MutedUsers => "muted-users-list",
            Self::ExemptUsers => "exempt-users-list",
            Self::ExemptChannels => "exempt-channels-list",
            Self::WarnedUsers => "warned-users-list",
        }
    }

    pub fn from_container_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.container_id() == id)
    }
}

/// What the shell does once the faded entity element is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalPlan {
    /// Collection whose empty-state placeholder must be drawn, at most once.
    pub empty_state: Option<CollectionKind>,
}

pub fn plan_removal(container_id: Option<&str>, remaining_children: u32) -> RemovalPlan {
    let empty_state = if remaining_children == 0 {
        container_id.and_then(CollectionKind::from_container_id)
    } else {
        None
    };
    RemovalPlan { empty_state }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn command(action: &str, target: &str, sub_action: Option<&str>) -> ActionCommand {
        ActionCommand::from_attributes(&ActionAttributes {
            action: Some(action),
            target_id: Some(target),
            entity_id: None,
            sub_action,
        })
        .expect("command should validate")
    }

    #[test]
    fn missing_action_or_target_is_rejected() {
        let error = ActionCommand::from_attributes(&ActionAttributes {
            action: Some("action/kick"),
            ..ActionAttributes::default()
        })
        .expect_err("target is required");
        assert_eq!(error, ValidationError::MissingActionOrTarget);
        assert_eq!(error.to_string(), "Error: action or target id missing.");

        let error = ActionCommand::from_attributes(&ActionAttributes {
            target_id: Some("5"),
            ..ActionAttributes::default()
        })
        .expect_err("action is required");
        assert_eq!(error, ValidationError::MissingActionOrTarget);
    }

    #[test]
    fn target_falls_back_to_entity_ancestor() {
        let command = ActionCommand::from_attributes(&ActionAttributes {
            action: Some("action/vc_kick"),
            target_id: Some(" "),
            entity_id: Some("77"),
            sub_action: None,
        })
        .expect("entity id should be used");
        assert_eq!(command.target, TargetId::Text("77".to_string()));
    }

    #[test]
    fn action_paths_reject_traversal() {
        assert_eq!(
            ActionPath::parse("../admin"),
            Err(ValidationError::InvalidAction)
        );
        assert_eq!(
            ActionPath::parse("action//kick"),
            Err(ValidationError::InvalidAction)
        );
        assert!(ActionPath::parse("settings/ai_dep").is_ok());
    }

    #[test]
    fn tailored_confirmations_for_destructive_actions() {
        assert_eq!(
            command("action/unmute", "9", None).confirmation_message(),
            "Are you sure you want to remove the mute on user 9?"
        );
        assert_eq!(
            command("action/kick", "9", None).confirmation_message(),
            "Are you sure you want to kick user 9?"
        );
        assert_eq!(
            command("action/ban", "9", None).confirmation_message(),
            "Are you sure you want to ban user 9?"
        );
        assert_eq!(
            command("action/delete_role", "3", None).confirmation_message(),
            "Are you sure you want to delete role 3?"
        );
        assert_eq!(
            command("action/vc_mute", "9", None).confirmation_message(),
            "Are you sure you want to perform this action on item 9?"
        );
    }

    #[test]
    fn payload_carries_reason_and_sub_action_fields() {
        let plain = command("action/kick", "9", None).payload("Performed from web panel");
        assert_eq!(
            plain,
            json!({"target_id": "9", "reason": "Performed from web panel"})
        );

        let shop = command("shop/action", "sword", Some("delete")).payload("r");
        assert_eq!(
            shop,
            json!({"target_id": "sword", "reason": "r", "action": "delete", "item_slug": "sword"})
        );

        let kb = command("data/kb", "2", Some("remove")).payload("r");
        assert_eq!(
            kb,
            json!({"target_id": 2, "reason": "r", "action": "remove", "index": 2})
        );

        let faq = command("data/faq", "hours", Some("remove")).payload("r");
        assert_eq!(
            faq,
            json!({"target_id": "hours", "reason": "r", "action": "remove", "keyword": "hours"})
        );
    }

    #[test]
    fn request_targets_guild_action_route() {
        let request = command("action/ban", "9", None).request("100", "r");
        assert_eq!(request.path, "/api/guild/100/action/ban");
    }

    #[test]
    fn in_flight_refuses_second_dispatch() {
        let mut guard = InFlight::default();
        let key = command("action/kick", "9", None).flight_key();
        assert!(guard.begin(&key));
        assert!(!guard.begin(&key));
        assert!(guard.is_busy(&key));
        guard.finish(&key);
        assert!(guard.begin(&key));
    }

    #[test]
    fn key_stays_busy_until_released_after_removal() {
        let mut guard = InFlight::default();
        let key = command("data/kb", "3", Some("remove")).flight_key();
        assert!(guard.begin(&key));
        // Response arrived, row still fading out.
        assert!(!guard.begin(&key));
        assert!(guard.is_busy(&key));
        guard.finish(&key);
        assert!(!guard.is_busy(&key));
    }

    #[test]
    fn removal_plan_draws_empty_state_once_for_known_containers() {
        assert_eq!(
            plan_removal(Some("kb-list"), 0).empty_state,
            Some(CollectionKind::KnowledgeBase)
        );
        assert_eq!(plan_removal(Some("kb-list"), 2).empty_state, None);
        assert_eq!(plan_removal(Some("unrelated"), 0).empty_state, None);
        assert_eq!(plan_removal(None, 0).empty_state, None);
    }
}
