//! Response bodies for the guild API.
//!
//! Snowflake ids arrive as strings from most routes and as bare integers from
//! a few older ones; [`EntityId`] accepts both.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Default)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Unsigned(u64),
            Signed(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Self(text),
            Raw::Unsigned(value) => Self(value.to_string()),
            Raw::Signed(value) => Self(value.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopItem {
    pub item_slug: String,
    pub name: String,
    #[serde(default)]
    pub price: i64,
    /// `-1` means unlimited.
    #[serde(default)]
    pub stock: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ShopResponse {
    #[serde(default)]
    pub items: Vec<ShopItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct KnowledgeBaseResponse {
    #[serde(default)]
    pub kb: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct FaqResponse {
    #[serde(default)]
    pub faq: Map<String, Value>,
}

impl FaqResponse {
    /// Keyword/answer pairs in server order.
    pub fn entries(&self) -> Vec<(String, String)> {
        self.faq
            .iter()
            .map(|(keyword, answer)| {
                let answer = match answer {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                };
                (keyword.clone(), answer)
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TopUser {
    pub username: String,
    #[serde(default)]
    pub balance: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EconomyStats {
    #[serde(default)]
    pub total_currency: i64,
    #[serde(default)]
    pub user_count: i64,
    #[serde(default)]
    pub top_users: Vec<TopUser>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct EconomyResponse {
    #[serde(default)]
    pub stats: Option<EconomyStats>,
}

/// Anything listed by id and display name: whitelisted bots, exempt users, exempt channels.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedEntity {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct BotWhitelistResponse {
    #[serde(default)]
    pub whitelist: Vec<NamedEntity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AiChannel {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AiChannelsResponse {
    #[serde(default)]
    pub channels: Vec<AiChannel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VoiceMember {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub is_muted: bool,
    #[serde(default)]
    pub is_deafened: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VoiceChannel {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub members: Vec<VoiceMember>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct VoiceStatesResponse {
    #[serde(default)]
    pub voice_channels: Vec<VoiceChannel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemberRef {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MuteRecord {
    pub user: MemberRef,
    #[serde(default)]
    pub reason: Option<String>,
    /// Unix seconds; absent or zero for permanent mutes.
    #[serde(default)]
    pub expires_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MutedUsersResponse {
    #[serde(default)]
    pub muted_users: Vec<MuteRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WarnedUser {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub warn_count: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct WarningsResponse {
    #[serde(default)]
    pub warned_users: Vec<WarnedUser>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ExemptUsersResponse {
    #[serde(default)]
    pub users: Option<Vec<NamedEntity>>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ExemptChannelsResponse {
    #[serde(default)]
    pub channels: Option<Vec<NamedEntity>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PermissionGroup {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PermissionsResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub permissions: PermissionGroups,
}

/// Permission groups keyed by role id, in the order the server sent them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PermissionGroups(Vec<(String, PermissionGroup)>);

impl PermissionGroups {
    pub fn get(&self, role_id: &str) -> Option<&PermissionGroup> {
        self.0
            .iter()
            .find(|(id, _)| id == role_id)
            .map(|(_, group)| group)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PermissionGroup)> {
        self.0.iter().map(|(id, group)| (id.as_str(), group))
    }
}

impl FromIterator<(String, PermissionGroup)> for PermissionGroups {
    fn from_iter<I: IntoIterator<Item = (String, PermissionGroup)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for PermissionGroups {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GroupsVisitor;

        impl<'de> Visitor<'de> for GroupsVisitor {
            type Value = PermissionGroups;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of role id to permission group")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut groups = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((role_id, group)) = map.next_entry::<String, PermissionGroup>()? {
                    groups.push((role_id, group));
                }
                Ok(PermissionGroups(groups))
            }
        }

        deserializer.deserialize_map(GroupsVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MemberRolesResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub roles: Option<Vec<EntityId>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccountPermissions {
    #[serde(default)]
    pub can_manage_all_guilds: bool,
    #[serde(default)]
    pub guilds: Vec<String>,
    #[serde(default)]
    pub global_permissions: Vec<String>,
    #[serde(default)]
    pub guild_specific_permissions: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubAccount {
    pub id: EntityId,
    #[serde(default)]
    pub account_name: String,
    /// Unix seconds.
    #[serde(default)]
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used_at: Option<i64>,
    #[serde(default)]
    pub permissions: AccountPermissions,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AccountsResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub accounts: Vec<SubAccount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ViolationUser {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ViolationMessage {
    pub id: EntityId,
    pub channel_id: EntityId,
    #[serde(default)]
    pub channel_name: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub jump_url: String,
}

/// One `new_violation` event, also the element type of `audit_history`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Violation {
    pub event_id: EntityId,
    #[serde(default)]
    pub auto_deleted: bool,
    pub user: ViolationUser,
    pub message: ViolationMessage,
    #[serde(default)]
    pub violation_type: String,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct AuditHistoryResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub events: Vec<Violation>,
}

/// `GET /api/stats`. Counters stay as JSON numbers so integers print without a fraction.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct GlobalStats {
    #[serde(default)]
    pub guilds: Option<Number>,
    #[serde(default)]
    pub users: Option<Number>,
    #[serde(default)]
    pub latency: Option<Number>,
    #[serde(default)]
    pub commands: Option<Number>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct InviteResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub invite_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entity_ids_accept_strings_and_integers() {
        let entity: NamedEntity =
            serde_json::from_value(json!({"id": 1_234_567_890_123_456_789_u64, "name": "bot"}))
                .expect("numeric id should decode");
        assert_eq!(entity.id.as_str(), "1234567890123456789");

        let entity: NamedEntity = serde_json::from_value(json!({"id": "42", "name": "bot"}))
            .expect("string id should decode");
        assert_eq!(entity.id, EntityId::new("42"));
    }

    #[test]
    fn faq_entries_keep_server_order() {
        let response: FaqResponse = serde_json::from_value(json!({
            "faq": {"zeta": "last letter", "alpha": "first letter"}
        }))
        .expect("faq should decode");
        let keywords: Vec<String> = response.entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keywords, vec!["zeta".to_string(), "alpha".to_string()]);
    }

    #[test]
    fn permission_groups_keep_server_order() {
        let response: PermissionsResponse = serde_json::from_str(
            r#"{"status": "success", "permissions": {
                "900": {"name": "Zeta", "permissions": ["page_moderation"]},
                "100": {"name": "Alpha", "permissions": []}
            }}"#,
        )
        .expect("permissions should decode");
        let order: Vec<&str> = response.permissions.iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec!["900", "100"]);
        assert_eq!(
            response.permissions.get("100").map(|group| group.name.as_str()),
            Some("Alpha")
        );
        assert!(response.permissions.get("5").is_none());
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let shop: ShopResponse = serde_json::from_value(json!({})).expect("shop should decode");
        assert!(shop.items.is_empty());
        let exempt: ExemptUsersResponse =
            serde_json::from_value(json!({"status": "success"})).expect("exempt should decode");
        assert!(exempt.users.is_none());
    }

    #[test]
    fn violation_decodes_nested_ids() {
        let violation: Violation = serde_json::from_value(json!({
            "event_id": "ev-1",
            "auto_deleted": true,
            "user": {"id": 5, "name": "spammer", "avatar_url": "https://cdn/a.png"},
            "message": {"id": 9, "channel_id": 8, "channel_name": "general", "content": "hi", "jump_url": "https://x"},
            "violation_type": "spam",
            "timestamp": "2024-01-01T00:00:00Z"
        }))
        .expect("violation should decode");
        assert_eq!(violation.message.channel_id.as_str(), "8");
        assert!(violation.auto_deleted);
    }
}
