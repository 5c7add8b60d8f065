//! Guild page tab visibility and the role permission-group editor.

use serde_json::{Value, json};

use crate::api::{ApiRequest, Endpoint, GuildResource};
use crate::error::ValidationError;

/// Path fragment that marks the tickets screen, whose tab is an external link.
pub const TICKETS_PATH_MARKER: &str = "/tickets";
pub const TICKETS_TAB_PERMISSION: &str = "tab_tickets";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSpec {
    pub permission: Option<String>,
    /// Whether the nav item holds a `button.nav-link[data-bs-toggle="tab"]`.
    pub activatable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabPlan {
    pub visible: Vec<bool>,
    /// Index of the tab to activate; `None` clears every pane.
    pub activate: Option<usize>,
    pub highlight_tickets_link: bool,
}

pub fn parse_granted(raw: &str) -> Result<Vec<String>, serde_json::Error> {
    serde_json::from_str(raw)
}

pub fn plan_tabs(tabs: &[TabSpec], granted: &[String], pathname: &str) -> TabPlan {
    let visible: Vec<bool> = tabs
        .iter()
        .map(|tab| {
            tab.permission
                .as_ref()
                .is_some_and(|permission| granted.contains(permission))
        })
        .collect();
    let activate = tabs
        .iter()
        .zip(&visible)
        .position(|(tab, shown)| *shown && tab.activatable);
    let tickets_visible = tabs.iter().zip(&visible).any(|(tab, shown)| {
        *shown && tab.permission.as_deref() == Some(TICKETS_TAB_PERMISSION)
    });
    TabPlan {
        visible,
        activate,
        highlight_tickets_link: tickets_visible && pathname.contains(TICKETS_PATH_MARKER),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriState {
    pub checked: bool,
    pub indeterminate: bool,
}

/// Parent checkbox state derived from its children.
pub fn parent_state(children: &[bool]) -> TriState {
    let all = !children.is_empty() && children.iter().all(|checked| *checked);
    let some = children.iter().any(|checked| *checked);
    TriState {
        checked: all,
        indeterminate: !all && some,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionBox {
    pub value: String,
    pub checked: bool,
    pub indeterminate: bool,
}

/// Values to save; an indeterminate parent counts as selected.
pub fn selected_permissions(boxes: &[PermissionBox]) -> Vec<String> {
    boxes
        .iter()
        .filter(|checkbox| checkbox.checked || checkbox.indeterminate)
        .map(|checkbox| checkbox.value.clone())
        .collect()
}

/// The role being edited wins over the role selector.
pub fn resolve_role_id(editing: &str, selected: &str) -> Result<String, ValidationError> {
    [editing, selected]
        .into_iter()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(ToString::to_string)
        .ok_or(ValidationError::MissingRole)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionCommand {
    Save {
        role_id: String,
        permissions: Vec<String>,
    },
    Delete {
        role_id: String,
    },
}

impl PermissionCommand {
    pub fn to_json(&self) -> Value {
        match self {
            Self::Save {
                role_id,
                permissions,
            } => json!({"action": "save", "role_id": role_id, "permissions": permissions}),
            Self::Delete { role_id } => json!({"action": "delete", "role_id": role_id}),
        }
    }

    pub fn request(&self, guild_id: &str) -> ApiRequest {
        Endpoint::guild(guild_id, GuildResource::Permissions).post(self.to_json())
    }
}

pub fn badge_class(permission: &str) -> &'static str {
    if permission.starts_with("page_") {
        "bg-primary"
    } else {
        "bg-info"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tab(permission: Option<&str>, activatable: bool) -> TabSpec {
        TabSpec {
            permission: permission.map(ToString::to_string),
            activatable,
        }
    }

    #[test]
    fn granted_tabs_are_shown_and_first_button_activated() {
        let tabs = vec![
            tab(Some("tab_tickets"), false),
            tab(Some("tab_shop"), true),
            tab(Some("tab_roles"), true),
            tab(None, true),
        ];
        let granted = vec!["tab_tickets".to_string(), "tab_roles".to_string()];
        let plan = plan_tabs(&tabs, &granted, "/guild/1/tickets");
        assert_eq!(plan.visible, vec![true, false, true, false]);
        assert_eq!(plan.activate, Some(2));
        assert!(plan.highlight_tickets_link);
    }

    #[test]
    fn no_activatable_tab_clears_panes() {
        let tabs = vec![tab(Some("tab_tickets"), false), tab(Some("tab_shop"), true)];
        let plan = plan_tabs(&tabs, &["tab_tickets".to_string()], "/guild/1");
        assert_eq!(plan.activate, None);
        assert!(!plan.highlight_tickets_link);
    }

    #[test]
    fn parent_state_is_tri_state() {
        assert_eq!(
            parent_state(&[true, true]),
            TriState {
                checked: true,
                indeterminate: false
            }
        );
        assert_eq!(
            parent_state(&[true, false]),
            TriState {
                checked: false,
                indeterminate: true
            }
        );
        assert_eq!(
            parent_state(&[false, false]),
            TriState {
                checked: false,
                indeterminate: false
            }
        );
    }

    #[test]
    fn indeterminate_parents_are_saved() {
        let boxes = vec![
            PermissionBox {
                value: "page_shop".to_string(),
                checked: false,
                indeterminate: true,
            },
            PermissionBox {
                value: "shop_edit".to_string(),
                checked: true,
                indeterminate: false,
            },
            PermissionBox {
                value: "page_audit".to_string(),
                checked: false,
                indeterminate: false,
            },
        ];
        assert_eq!(
            selected_permissions(&boxes),
            vec!["page_shop".to_string(), "shop_edit".to_string()]
        );
    }

    #[test]
    fn role_id_resolution() {
        assert_eq!(resolve_role_id("5", "6"), Ok("5".to_string()));
        assert_eq!(resolve_role_id("", "6"), Ok("6".to_string()));
        assert_eq!(resolve_role_id(" ", ""), Err(ValidationError::MissingRole));
    }

    #[test]
    fn commands_serialize_with_action_tag() {
        let save = PermissionCommand::Save {
            role_id: "5".to_string(),
            permissions: vec!["page_shop".to_string()],
        };
        assert_eq!(
            save.to_json(),
            json!({"action": "save", "role_id": "5", "permissions": ["page_shop"]})
        );
        let delete = PermissionCommand::Delete {
            role_id: "5".to_string(),
        };
        assert_eq!(
            delete.request("1").body,
            Some(json!({"action": "delete", "role_id": "5"}))
        );
        assert_eq!(badge_class("page_shop"), "bg-primary");
        assert_eq!(badge_class("shop_edit"), "bg-info");
    }
}
