use serde::Serialize;
use serde_json::json;

use crate::api::{ApiRequest, Endpoint, GuildResource};
use crate::error::ValidationError;
use crate::members::RoleOption;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BulkAction {
    #[serde(rename = "bulk_add_role")]
    AddRole,
    #[serde(rename = "bulk_remove_role")]
    RemoveRole,
    #[serde(rename = "bulk_kick")]
    Kick,
}

impl BulkAction {
    pub const ALL: [Self; 3] = [Self::AddRole, Self::RemoveRole, Self::Kick];

    pub fn button_id(self) -> &'static str {
        match self {
            Self::AddRole => "bulk-add-role-btn",
            Self::RemoveRole => "bulk-remove-role-btn",
            Self::Kick => "bulk-kick-btn",
        }
    }

    pub fn needs_role(self) -> bool {
        matches!(self, Self::AddRole | Self::RemoveRole)
    }

    fn verb(self) -> &'static str {
        match self {
            Self::AddRole => "grant",
            Self::RemoveRole => "remove",
            Self::Kick => "kick",
        }
    }
}

pub fn require_selection(target_ids: &[String]) -> Result<(), ValidationError> {
    if target_ids.is_empty() {
        return Err(ValidationError::NoMembersSelected);
    }
    Ok(())
}

/// Numbered role list shown in the index prompt.
pub fn role_prompt(action: BulkAction, selected: usize, roles: &[RoleOption]) -> String {
    let listing = roles
        .iter()
        .enumerate()
        .map(|(index, option)| format!("{}: {}", index + 1, option.label))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Choose the role to {} for the {selected} selected members by entering its number:\n\n{listing}",
        action.verb()
    )
}

/// Resolves the 1-based index typed into the prompt.
pub fn resolve_role_index<'a>(
    input: &str,
    roles: &'a [RoleOption],
) -> Result<&'a RoleOption, ValidationError> {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|index| index.checked_sub(1))
        .and_then(|index| roles.get(index))
        .ok_or(ValidationError::InvalidRoleIndex)
}

pub fn kick_confirmation(selected: usize) -> String {
    format!("Are you sure you want to kick the {selected} selected members? This cannot be undone!")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkRequest {
    pub action: BulkAction,
    pub target_ids: Vec<String>,
    pub role_id: Option<String>,
}

impl BulkRequest {
    pub fn request(&self, guild_id: &str) -> ApiRequest {
        Endpoint::guild(guild_id, GuildResource::BulkAction).post(json!({
            "action": self.action,
            "target_ids": self.target_ids,
            "role_id": self.role_id,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles() -> Vec<RoleOption> {
        vec![
            RoleOption {
                value: "11".to_string(),
                label: "Admin".to_string(),
            },
            RoleOption {
                value: "12".to_string(),
                label: "Member".to_string(),
            },
        ]
    }

    #[test]
    fn empty_selection_is_refused() {
        let error = require_selection(&[]).expect_err("selection is required");
        assert_eq!(error.to_string(), "Please select at least one member.");
        assert!(require_selection(&["1".to_string()]).is_ok());
    }

    #[test]
    fn role_index_is_one_based() {
        let roles = roles();
        assert_eq!(
            resolve_role_index("2", &roles).map(|option| option.value.as_str()),
            Ok("12")
        );
        assert_eq!(
            resolve_role_index("0", &roles),
            Err(ValidationError::InvalidRoleIndex)
        );
        assert_eq!(
            resolve_role_index("3", &roles),
            Err(ValidationError::InvalidRoleIndex)
        );
        assert_eq!(
            resolve_role_index("two", &roles),
            Err(ValidationError::InvalidRoleIndex)
        );
    }

    #[test]
    fn prompt_lists_roles() {
        let prompt = role_prompt(BulkAction::AddRole, 3, &roles());
        assert!(prompt.contains("grant for the 3 selected members"));
        assert!(prompt.ends_with("1: Admin\n2: Member"));
    }

    #[test]
    fn request_body_names_action() {
        let request = BulkRequest {
            action: BulkAction::Kick,
            target_ids: vec!["1".to_string(), "2".to_string()],
            role_id: None,
        }
        .request("50");
        assert_eq!(request.path, "/api/guild/50/bulk_action");
        assert_eq!(
            request.body,
            Some(json!({"action": "bulk_kick", "target_ids": ["1", "2"], "role_id": null}))
        );
    }
}
