use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::api::{ApiRequest, Endpoint, GuildResource};

/// Forms with dedicated handlers; the generic router leaves them alone.
pub const EXCLUDED_FORMS: [&str; 7] = [
    "ticket-reply-form",
    "permission-group-form",
    "sub-account-form",
    "exempt-user-form",
    "exempt-channel-form",
    "role-editor-form",
    "department-form",
];

const ADD_ONLY_FORMS: [&str; 4] = [
    "kb-add-form",
    "faq-add-form",
    "bot-whitelist-form",
    "ai-dep-form",
];

pub const TICKET_DEPLOY_FORM_ID: &str = "ticket-settings-form-deploy";

pub fn routes_generically(form_id: &str) -> bool {
    !EXCLUDED_FORMS.contains(&form_id)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    Multi(Vec<String>),
}

impl FieldValue {
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value.as_str()),
            Self::Multi(_) => None,
        }
    }
}

/// What the shell reads off a submitted `<form>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    pub form_id: String,
    /// `FormData` entries in document order; file inputs are skipped.
    pub entries: Vec<(String, String)>,
    /// Names of `[multiple]` fields.
    pub multi_fields: Vec<String>,
    /// `data-action` of the submit button that triggered the event.
    pub submitter_action: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub form_id: String,
    pub fields: BTreeMap<String, FieldValue>,
}

impl FormSubmission {
    /// Serializes a form for `form_submit`, applying the per-form remaps.
    pub fn from_snapshot(snapshot: &FormSnapshot) -> Self {
        let mut submission = Self::plain(snapshot);
        let fields = &mut submission.fields;
        match snapshot.form_id.as_str() {
            "mute-form" => {
                if let Some(user_id) = fields.remove("user_id") {
                    fields.insert("target_id".to_string(), user_id);
                }
            }
            "balance-form" => {
                if let Some(action) = &snapshot.submitter_action {
                    fields.insert("sub_action".to_string(), FieldValue::Single(action.clone()));
                }
            }
            "edit-item-form" => {
                let editing = fields
                    .get("item_slug")
                    .and_then(FieldValue::as_single)
                    .is_some_and(|slug| !slug.is_empty());
                let action = if editing { "edit" } else { "add" };
                fields.insert("action".to_string(), FieldValue::Single(action.to_string()));
            }
            id if ADD_ONLY_FORMS.contains(&id) => {
                fields.insert("action".to_string(), FieldValue::Single("add".to_string()));
            }
            _ => {}
        }
        submission
    }

    /// Field serialization without remaps. Repeated names keep the last value
    /// unless the field is multi-select, which is always an array.
    pub fn plain(snapshot: &FormSnapshot) -> Self {
        let mut fields = BTreeMap::new();
        for (name, value) in &snapshot.entries {
            if snapshot.multi_fields.contains(name) {
                continue;
            }
            fields.insert(name.clone(), FieldValue::Single(value.clone()));
        }
        for name in &snapshot.multi_fields {
            let values = snapshot
                .entries
                .iter()
                .filter(|(entry, _)| entry == name)
                .map(|(_, value)| value.clone())
                .collect();
            fields.insert(name.clone(), FieldValue::Multi(values));
        }
        Self {
            form_id: snapshot.form_id.clone(),
            fields,
        }
    }

    pub fn with_form_id(mut self, form_id: &str) -> Self {
        self.form_id = form_id.to_string();
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        for (name, value) in &self.fields {
            let value = match value {
                FieldValue::Single(text) => Value::String(text.clone()),
                FieldValue::Multi(values) => {
                    Value::Array(values.iter().cloned().map(Value::String).collect())
                }
            };
            body.insert(name.clone(), value);
        }
        body.insert("form_id".to_string(), Value::String(self.form_id.clone()));
        Value::Object(body)
    }

    pub fn request(&self, guild_id: &str) -> ApiRequest {
        Endpoint::guild(guild_id, GuildResource::FormSubmit).post(self.to_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn snapshot(form_id: &str, entries: &[(&str, &str)], multi: &[&str]) -> FormSnapshot {
        FormSnapshot {
            form_id: form_id.to_string(),
            entries: entries
                .iter()
                .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
                .collect(),
            multi_fields: multi.iter().map(|name| (*name).to_string()).collect(),
            submitter_action: None,
        }
    }

    #[test]
    fn excluded_forms_are_not_routed() {
        for id in EXCLUDED_FORMS {
            assert!(!routes_generically(id));
        }
        assert!(routes_generically("mute-form"));
        assert!(routes_generically(""));
    }

    #[test]
    fn multi_select_is_always_an_array() {
        let none = FormSubmission::from_snapshot(&snapshot("roles-form", &[], &["roles"]));
        assert_eq!(none.field("roles"), Some(&FieldValue::Multi(vec![])));

        let one = FormSubmission::from_snapshot(&snapshot(
            "roles-form",
            &[("roles", "1")],
            &["roles"],
        ));
        assert_eq!(
            one.to_json(),
            json!({"roles": ["1"], "form_id": "roles-form"})
        );

        let many = FormSubmission::from_snapshot(&snapshot(
            "roles-form",
            &[("roles", "1"), ("note", "x"), ("roles", "2")],
            &["roles"],
        ));
        assert_eq!(
            many.to_json(),
            json!({"roles": ["1", "2"], "note": "x", "form_id": "roles-form"})
        );
    }

    #[test]
    fn mute_form_moves_user_id_to_target_id() {
        let submission = FormSubmission::from_snapshot(&snapshot(
            "mute-form",
            &[("user_id", "9"), ("duration", "10m")],
            &[],
        ));
        assert_eq!(
            submission.to_json(),
            json!({"target_id": "9", "duration": "10m", "form_id": "mute-form"})
        );
    }

    #[test]
    fn balance_form_takes_submitter_action() {
        let mut raw = snapshot("balance-form", &[("user_id", "9"), ("amount", "5")], &[]);
        raw.submitter_action = Some("remove".to_string());
        let submission = FormSubmission::from_snapshot(&raw);
        assert_eq!(
            submission.field("sub_action"),
            Some(&FieldValue::Single("remove".to_string()))
        );
    }

    #[test]
    fn edit_item_form_infers_add_or_edit() {
        let add = FormSubmission::from_snapshot(&snapshot(
            "edit-item-form",
            &[("item_slug", ""), ("name", "Sword")],
            &[],
        ));
        assert_eq!(
            add.field("action"),
            Some(&FieldValue::Single("add".to_string()))
        );
        let edit = FormSubmission::from_snapshot(&snapshot(
            "edit-item-form",
            &[("item_slug", "sword")],
            &[],
        ));
        assert_eq!(
            edit.field("action"),
            Some(&FieldValue::Single("edit".to_string()))
        );
    }

    #[test]
    fn add_only_forms_get_add_action() {
        for id in ADD_ONLY_FORMS {
            let submission = FormSubmission::from_snapshot(&snapshot(id, &[("x", "1")], &[]));
            assert_eq!(
                submission.field("action"),
                Some(&FieldValue::Single("add".to_string()))
            );
        }
    }

    #[test]
    fn ticket_deploy_renames_form() {
        let submission = FormSubmission::plain(&snapshot(
            "ticket-settings-form",
            &[("staff_role_ids", "3")],
            &["staff_role_ids"],
        ))
        .with_form_id(TICKET_DEPLOY_FORM_ID);
        let request = submission.request("1");
        assert_eq!(request.path, "/api/guild/1/form_submit");
        assert_eq!(
            request.body,
            Some(json!({"staff_role_ids": ["3"], "form_id": "ticket-settings-form-deploy"}))
        );
    }
}
