use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RequestError;

pub const NO_CONTENT_MESSAGE: &str = "Operation succeeded";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A guild-scoped REST resource, relative to `/api/guild/{id}/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuildResource {
    ShopItems,
    KnowledgeBase,
    Faq,
    EconomyStats,
    BotWhitelist,
    AiDependentChannels,
    VoiceStates,
    MutedUsers,
    Warnings,
    ExemptUsers,
    ExemptChannels,
    Permissions,
    MemberRoles { member_id: String },
    FormSubmit,
    BulkAction,
    RoleCreateOrEdit,
    Backup,
    GenerateInvite,
    AuditHistory,
    AuditAction,
    /// Pre-validated action path such as `action/kick` or `shop/action`.
    Action(String),
}

impl GuildResource {
    fn suffix(&self) -> String {
        match self {
            Self::ShopItems => "shop/items".to_string(),
            Self::KnowledgeBase => "data/kb".to_string(),
            Self::Faq => "data/faq".to_string(),
            Self::EconomyStats => "economy_stats".to_string(),
            Self::BotWhitelist => "data/bot_whitelist".to_string(),
            Self::AiDependentChannels => "data/ai_dep_channels".to_string(),
            Self::VoiceStates => "voice_states".to_string(),
            Self::MutedUsers => "muted_users".to_string(),
            Self::Warnings => "warnings".to_string(),
            Self::ExemptUsers => "data/exempt_users".to_string(),
            Self::ExemptChannels => "data/exempt_channels".to_string(),
            Self::Permissions => "permissions".to_string(),
            Self::MemberRoles { member_id } => {
                format!("member/{}/roles", urlencoding::encode(member_id))
            }
            Self::FormSubmit => "form_submit".to_string(),
            Self::BulkAction => "bulk_action".to_string(),
            Self::RoleCreateOrEdit => "roles/create_or_edit".to_string(),
            Self::Backup => "backup".to_string(),
            Self::GenerateInvite => "generate_invite".to_string(),
            Self::AuditHistory => "audit_history".to_string(),
            Self::AuditAction => "audit_action".to_string(),
            Self::Action(path) => path.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Stats,
    SuperuserAccounts,
    Guild {
        guild_id: String,
        resource: GuildResource,
    },
}

impl Endpoint {
    pub fn guild(guild_id: &str, resource: GuildResource) -> Self {
        Self::Guild {
            guild_id: guild_id.to_string(),
            resource,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Stats => "/api/stats".to_string(),
            Self::SuperuserAccounts => "/api/superuser/accounts".to_string(),
            Self::Guild { guild_id, resource } => format!(
                "/api/guild/{}/{}",
                urlencoding::encode(guild_id),
                resource.suffix()
            ),
        }
    }

    pub fn get(&self) -> ApiRequest {
        ApiRequest {
            method: HttpMethod::Get,
            path: self.path(),
            body: None,
        }
    }

    pub fn post(&self, body: Value) -> ApiRequest {
        ApiRequest {
            method: HttpMethod::Post,
            path: self.path(),
            body: Some(body),
        }
    }
}

/// Browser page for a guild, used by the dashboard selector.
pub fn guild_page_path(guild_id: &str) -> Option<String> {
    let trimmed = guild_id.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(format!("/guild/{}", urlencoding::encode(trimmed)))
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
}

/// Common response shape: `status`, `message`, and whatever else the route returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiEnvelope {
    pub fn no_content() -> Self {
        Self {
            status: "success".to_string(),
            message: Some(NO_CONTENT_MESSAGE.to_string()),
            extra: Map::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    pub fn message_text(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }

    pub fn field<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.extra
            .get(key)
            .cloned()
            .and_then(|value| serde_json::from_value(value).ok())
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Error for a non-2xx status: the body's `message` when present, otherwise `HTTP error <code>`.
pub fn status_error(status: u16, body: &str) -> RequestError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("HTTP error {status}"));
    RequestError::Status { status, message }
}

pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, RequestError> {
    if !(200..=299).contains(&status) {
        return Err(status_error(status, body));
    }
    let decoded = if status == 204 {
        serde_json::to_value(ApiEnvelope::no_content()).and_then(serde_json::from_value)
    } else {
        serde_json::from_str(body)
    };
    decoded.map_err(|error| RequestError::Decode {
        message: error.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn guild_paths_encode_ids() {
        let endpoint = Endpoint::guild("12 34", GuildResource::ShopItems);
        assert_eq!(endpoint.path(), "/api/guild/12%2034/shop/items");

        let endpoint = Endpoint::guild(
            "99",
            GuildResource::MemberRoles {
                member_id: "42".to_string(),
            },
        );
        assert_eq!(endpoint.path(), "/api/guild/99/member/42/roles");
        assert_eq!(Endpoint::Stats.path(), "/api/stats");
        assert_eq!(
            Endpoint::SuperuserAccounts.path(),
            "/api/superuser/accounts"
        );
    }

    #[test]
    fn post_carries_json_body() {
        let request = Endpoint::guild("1", GuildResource::BulkAction).post(json!({"a": 1}));
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.body, Some(json!({"a": 1})));
        assert_eq!(Endpoint::Stats.get().body, None);
    }

    #[test]
    fn status_errors_prefer_body_message() {
        let error = status_error(400, r#"{"message":"Role not found"}"#);
        assert_eq!(
            error,
            RequestError::Status {
                status: 400,
                message: "Role not found".to_string()
            }
        );
        let error = status_error(502, "<html>bad gateway</html>");
        assert_eq!(error.to_string(), "HTTP error 502");
        let error = status_error(500, r#"{"message":""}"#);
        assert_eq!(error.to_string(), "HTTP error 500");
    }

    #[test]
    fn no_content_is_synthetic_success() {
        let envelope: ApiEnvelope = decode_response(204, "").expect("204 should decode");
        assert!(envelope.is_success());
        assert_eq!(envelope.message_text(), "Operation succeeded");
    }

    #[test]
    fn envelope_keeps_extra_fields() {
        let envelope: ApiEnvelope = decode_response(
            200,
            r#"{"status":"success","message":"ok","access_key":"k-1"}"#,
        )
        .expect("envelope should decode");
        assert_eq!(envelope.field::<String>("access_key").as_deref(), Some("k-1"));
        assert!(envelope.field::<String>("missing").is_none());
    }

    #[test]
    fn malformed_success_body_is_decode_error() {
        let result: Result<ApiEnvelope, _> = decode_response(200, "not json");
        assert!(matches!(result, Err(RequestError::Decode { .. })));
    }

    #[test]
    fn guild_page_path_requires_id() {
        assert_eq!(guild_page_path(" 77 ").as_deref(), Some("/guild/77"));
        assert_eq!(guild_page_path("  "), None);
    }
}
