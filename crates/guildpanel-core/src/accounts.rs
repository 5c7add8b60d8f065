use serde_json::{Value, json};

use crate::api::{ApiRequest, Endpoint};
use crate::model::AccountPermissions;

pub const COPIED_LABEL: &str = "Copied!";

/// Values read from `#sub-account-form`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountForm {
    pub account_id: String,
    pub account_name: String,
    pub can_manage_all_guilds: bool,
    pub guilds: Vec<String>,
    pub global_permissions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountCommand {
    Create {
        account_name: String,
        permissions: AccountPermissions,
    },
    Update {
        account_id: String,
        account_name: String,
        permissions: AccountPermissions,
    },
    Delete {
        account_id: String,
    },
}

impl AccountForm {
    /// An empty account id creates, anything else updates.
    pub fn into_command(self) -> AccountCommand {
        let permissions = AccountPermissions {
            can_manage_all_guilds: self.can_manage_all_guilds,
            guilds: self.guilds,
            global_permissions: self.global_permissions,
            guild_specific_permissions: Default::default(),
        };
        let account_id = self.account_id.trim().to_string();
        if account_id.is_empty() {
            AccountCommand::Create {
                account_name: self.account_name,
                permissions,
            }
        } else {
            AccountCommand::Update {
                account_id,
                account_name: self.account_name,
                permissions,
            }
        }
    }
}

impl AccountCommand {
    pub fn is_create(&self) -> bool {
        matches!(self, Self::Create { .. })
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::Create {
                account_name,
                permissions,
            } => json!({
                "action": "create",
                "account_id": "",
                "account_name": account_name,
                "permissions": permissions,
            }),
            Self::Update {
                account_id,
                account_name,
                permissions,
            } => json!({
                "action": "update",
                "account_id": account_id,
                "account_name": account_name,
                "permissions": permissions,
            }),
            Self::Delete { account_id } => json!({"action": "delete", "account_id": account_id}),
        }
    }

    pub fn request(&self) -> ApiRequest {
        Endpoint::SuperuserAccounts.post(self.to_json())
    }
}

pub fn delete_confirmation(account_name: &str) -> String {
    format!("Are you sure you want to delete account \"{account_name}\"?")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionSummary {
    AllGuilds,
    SpecificGuilds(usize),
    NoGuilds,
}

impl PermissionSummary {
    pub fn of(permissions: &AccountPermissions) -> Self {
        if permissions.can_manage_all_guilds {
            Self::AllGuilds
        } else if permissions.guilds.is_empty() {
            Self::NoGuilds
        } else {
            Self::SpecificGuilds(permissions.guilds.len())
        }
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            Self::AllGuilds => "bg-success",
            Self::SpecificGuilds(_) => "bg-info",
            Self::NoGuilds => "bg-secondary",
        }
    }

    pub fn label(self) -> String {
        match self {
            Self::AllGuilds => "Can manage all guilds".to_string(),
            Self::SpecificGuilds(count) => format!("{count} specific guilds"),
            Self::NoGuilds => "No guild access".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn form(account_id: &str) -> AccountForm {
        AccountForm {
            account_id: account_id.to_string(),
            account_name: "ops".to_string(),
            can_manage_all_guilds: false,
            guilds: vec!["1".to_string()],
            global_permissions: vec!["broadcast".to_string()],
        }
    }

    #[test]
    fn empty_id_creates() {
        let command = form("").into_command();
        assert!(command.is_create());
        assert_eq!(
            command.to_json(),
            json!({
                "action": "create",
                "account_id": "",
                "account_name": "ops",
                "permissions": {
                    "can_manage_all_guilds": false,
                    "guilds": ["1"],
                    "global_permissions": ["broadcast"],
                    "guild_specific_permissions": {}
                }
            })
        );
    }

    #[test]
    fn existing_id_updates_and_delete_targets_id() {
        let command = form("acc-9").into_command();
        assert!(!command.is_create());
        assert_eq!(command.to_json()["action"], "update");
        assert_eq!(command.to_json()["account_id"], "acc-9");

        let delete = AccountCommand::Delete {
            account_id: "acc-9".to_string(),
        };
        assert_eq!(delete.request().path, "/api/superuser/accounts");
        assert_eq!(
            delete.to_json(),
            json!({"action": "delete", "account_id": "acc-9"})
        );
    }

    #[test]
    fn summary_describes_scope() {
        let mut permissions = AccountPermissions::default();
        assert_eq!(PermissionSummary::of(&permissions), PermissionSummary::NoGuilds);
        permissions.guilds = vec!["1".to_string(), "2".to_string()];
        assert_eq!(
            PermissionSummary::of(&permissions).label(),
            "2 specific guilds"
        );
        permissions.can_manage_all_guilds = true;
        assert_eq!(
            PermissionSummary::of(&permissions).badge_class(),
            "bg-success"
        );
    }
}
