use super::*;
    use guildpanel_core::model::{PermissionGroups, PermissionsResponse};
    use guildpanel_core::permissions::{
        PermissionBox, PermissionCommand, parent_state, resolve_role_id, selected_permissions,
    };

    const SAVE_LABEL: &str = "Save permission group";
    const UPDATE_LABEL: &str = "Update permission group";
    const DELETE_CONFIRMATION: &str = "Delete this permission group?";

    pub(in crate::wasm) fn mount(guild_id: &str) {
        let Some(form) = element_by_id(PERMISSION_FORM_ID) else {
            return;
        };
        let page_names = collect_page_names();
        PERMISSIONS_STATE.with(|state| state.borrow_mut().page_names = page_names);

        listen(&form, "change", |event| {
            let Some(target) = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            let classes = target.class_list();
            if classes.contains("parent-permission") {
                for child in children_of(&target.id()) {
                    child.set_checked(target.checked());
                    child.set_indeterminate(false);
                }
            } else if classes.contains("child-permission")
                && let Some(parent) = data_attr(&target, "parent").and_then(|id| typed_by_id::<HtmlInputElement>(&id))
            {
                sync_parent(&parent);
            }
        });

        let guild = guild_id.to_string();
        listen(&form, "submit", move |event| {
            event.prevent_default();
            spawn_local(save_group(guild.clone()));
        });

        let guild = guild_id.to_string();
        listen_by_id(PERMISSION_GROUPS_LIST_ID, "click", move |event| {
            let Some(item) = event_closest(&event, ".list-group-item") else {
                return;
            };
            let role_id = data_attr(&item, "role-id").unwrap_or_default();
            if event_closest(&event, ".edit-perm-btn").is_some() {
                spawn_local(edit_group(role_id, guild.clone()));
            } else if event_closest(&event, ".delete-perm-btn").is_some() && confirm(DELETE_CONFIRMATION) {
                spawn_local(delete_group(role_id, guild.clone()));
            }
        });
        listen_by_id(CANCEL_EDIT_BUTTON_ID, "click", |_event| reset_form());

        spawn_local(refresh_groups(guild_id.to_string()));
    }

    /// Permission key to the label text of its checkbox.
    fn collect_page_names() -> BTreeMap<String, String> {
        query_document(".form-check-label")
            .iter()
            .filter_map(|label| {
                let input = element_by_id(&label.get_attribute("for")?)?;
                let text = label.text_content().unwrap_or_default();
                Some((field_value(&input), text.trim().to_string()))
            })
            .collect()
    }

    fn permission_form() -> Option<Element> {
        element_by_id(PERMISSION_FORM_ID)
    }

    fn permission_boxes() -> Vec<HtmlInputElement> {
        permission_form()
            .map(|form| query_within(&form, "input[name=\"permissions\"]"))
            .unwrap_or_default()
            .into_iter()
            .filter_map(|element| element.dyn_into::<HtmlInputElement>().ok())
            .collect()
    }

    fn children_of(parent_id: &str) -> Vec<HtmlInputElement> {
        permission_form()
            .map(|form| query_within(&form, &format!("[data-parent=\"{parent_id}\"]")))
            .unwrap_or_default()
            .into_iter()
            .filter_map(|element| element.dyn_into::<HtmlInputElement>().ok())
            .collect()
    }

    fn sync_parent(parent: &HtmlInputElement) {
        let children: Vec<bool> = children_of(&parent.id()).iter().map(HtmlInputElement::checked).collect();
        if children.is_empty() {
            return;
        }
        let state = parent_state(&children);
        parent.set_checked(state.checked);
        parent.set_indeterminate(state.indeterminate);
    }

    fn render_groups(groups: &PermissionGroups) {
        let html = PERMISSIONS_STATE
            .with(|state| render::permissions::permission_groups(groups, &state.borrow().page_names));
        set_html(PERMISSION_GROUPS_LIST_ID, &html);
    }

    fn reset_form() {
        if let Some(form) = typed_by_id::<HtmlFormElement>(PERMISSION_FORM_ID) {
            form.reset();
        }
        set_value_by_id(EDITING_ROLE_INPUT_ID, "");
        if let Some(select) = typed_by_id::<HtmlSelectElement>(PERMISSION_ROLE_SELECT_ID) {
            select.set_disabled(false);
        }
        set_text(SAVE_PERMISSION_BUTTON_ID, SAVE_LABEL);
        if let Some(cancel) = element_by_id(CANCEL_EDIT_BUTTON_ID) {
            set_display(&cancel, "none");
        }
        for checkbox in permission_boxes() {
            checkbox.set_checked(false);
            checkbox.set_indeterminate(false);
        }
    }

    async fn refresh_groups(guild_id: String) {
        let groups_request = Endpoint::guild(&guild_id, GuildResource::Permissions).get();
        if let Ok(response) = request::<PermissionsResponse>(&groups_request).await
            && response.status == "success"
        {
            render_groups(&response.permissions);
        }
    }

    /// Sends a save or delete; the reply carries the updated group map.
    async fn run_command(command: PermissionCommand, guild_id: &str, failure: &str) -> bool {
        let Ok(response) = request::<PermissionsResponse>(&command.request(guild_id)).await else {
            return false;
        };
        let message = response.message.as_deref().unwrap_or_default();
        if response.status != "success" {
            alert(&format!("{failure}: {message}"));
            return false;
        }
        alert(message);
        render_groups(&response.permissions);
        true
    }

    async fn save_group(guild_id: String) {
        let boxes: Vec<PermissionBox> = permission_boxes()
            .iter()
            .map(|checkbox| PermissionBox {
                value: checkbox.value(),
                checked: checkbox.checked(),
                indeterminate: checkbox.indeterminate(),
            })
            .collect();
        let role_id = match resolve_role_id(
            &value_by_id(EDITING_ROLE_INPUT_ID),
            &value_by_id(PERMISSION_ROLE_SELECT_ID),
        ) {
            Ok(role_id) => role_id,
            Err(error) => {
                alert(&error.to_string());
                return;
            }
        };
        let command = PermissionCommand::Save {
            role_id,
            permissions: selected_permissions(&boxes),
        };
        if run_command(command, &guild_id, "Save failed").await {
            reset_form();
        }
    }

    async fn edit_group(role_id: String, guild_id: String) {
        reset_form();
        if let Some(select) = typed_by_id::<HtmlSelectElement>(PERMISSION_ROLE_SELECT_ID) {
            select.set_value(&role_id);
            select.set_disabled(true);
        }
        set_value_by_id(EDITING_ROLE_INPUT_ID, &role_id);

        let groups_request = Endpoint::guild(&guild_id, GuildResource::Permissions).get();
        let Ok(response) = request::<PermissionsResponse>(&groups_request).await else {
            return;
        };
        let Some(group) = response.permissions.get(&role_id) else {
            tracing::warn!(%role_id, "permission group vanished before edit");
            return;
        };
        for checkbox in permission_boxes() {
            checkbox.set_checked(group.permissions.contains(&checkbox.value()));
        }
        if let Some(form) = permission_form() {
            for parent in query_within(&form, ".parent-permission") {
                if let Ok(parent) = parent.dyn_into::<HtmlInputElement>() {
                    sync_parent(&parent);
                }
            }
        }

        set_text(SAVE_PERMISSION_BUTTON_ID, UPDATE_LABEL);
        if let Some(cancel) = element_by_id(CANCEL_EDIT_BUTTON_ID) {
            set_display(&cancel, "block");
        }
        scroll_to_top();
    }

    async fn delete_group(role_id: String, guild_id: String) {
        run_command(PermissionCommand::Delete { role_id }, &guild_id, "Delete failed").await;
    }
