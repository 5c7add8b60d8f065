use super::*;
    use guildpanel_core::accounts::{AccountCommand, AccountForm, COPIED_LABEL, delete_confirmation};
    use guildpanel_core::model::{AccountsResponse, SubAccount};

    const CREATE_TITLE: &str = "Create sub-account";
    const CREATE_LABEL: &str = "Create and generate key";
    const UPDATE_LABEL: &str = "Update account permissions";
    const LOAD_FAILED_HTML: &str = "<p class=\"text-center text-danger p-3\">Failed to load the account list.</p>";

    pub(in crate::wasm) fn mount() {
        let Some(form) = element_by_id(ACCOUNT_FORM_ID) else {
            return;
        };
        ACCOUNTS_STATE.with(|state| *state.borrow_mut() = AccountsPageState::default());

        listen_by_id(ALL_GUILDS_SWITCH_ID, "change", |_event| sync_guild_selector());
        listen(&form, "submit", |event| {
            event.prevent_default();
            spawn_local(save_account());
        });
        listen_by_id(SUB_ACCOUNTS_LIST_ID, "click", |event| {
            let Some(item) = event_closest(&event, ".list-group-item") else {
                return;
            };
            if event_closest(&event, ".edit-account-btn").is_some() {
                edit_account(&item);
            } else if event_closest(&event, ".delete-account-btn").is_some() {
                let name = query_one(&item, "h5")
                    .and_then(|heading| heading.text_content())
                    .unwrap_or_default();
                let account_id = data_attr(&item, "account-id").unwrap_or_default();
                if confirm(&delete_confirmation(&name)) {
                    spawn_local(delete_account(account_id));
                }
            }
        });
        listen_by_id(CANCEL_EDIT_BUTTON_ID, "click", |_event| reset_form());
        listen_by_id(COPY_KEY_BUTTON_ID, "click", |_event| spawn_local(copy_access_key()));

        spawn_local(refresh_accounts());
    }

    fn sync_guild_selector() {
        if let Some(container) = element_by_id(GUILD_SELECT_CONTAINER_ID) {
            let all_guilds = is_checked(ALL_GUILDS_SWITCH_ID);
            set_display(&container, if all_guilds { "none" } else { "block" });
        }
    }

    fn global_permission_boxes() -> Vec<HtmlInputElement> {
        query_document("input[name=\"global_permissions\"]")
            .into_iter()
            .filter_map(|element| element.dyn_into::<HtmlInputElement>().ok())
            .collect()
    }

    fn reset_form() {
        if let Some(form) = typed_by_id::<HtmlFormElement>(ACCOUNT_FORM_ID) {
            form.reset();
        }
        set_value_by_id(ACCOUNT_ID_INPUT, "");
        set_text(SAVE_ACCOUNT_BUTTON_ID, CREATE_LABEL);
        set_text(PERMISSION_FORM_TITLE_ID, CREATE_TITLE);
        if let Some(cancel) = element_by_id(CANCEL_EDIT_BUTTON_ID) {
            set_display(&cancel, "none");
        }
        if let Some(switch) = typed_by_id::<HtmlInputElement>(ALL_GUILDS_SWITCH_ID) {
            switch.set_checked(false);
        }
        sync_guild_selector();
    }

    async fn refresh_accounts() {
        match request::<AccountsResponse>(&Endpoint::SuperuserAccounts.get()).await {
            Ok(response) if response.status == "success" => {
                set_html(SUB_ACCOUNTS_LIST_ID, &render::accounts::sub_accounts(&response.accounts));
            }
            Ok(_) => {}
            Err(_) => set_html(SUB_ACCOUNTS_LIST_ID, LOAD_FAILED_HTML),
        }
    }

    fn read_form() -> AccountForm {
        AccountForm {
            account_id: value_by_id(ACCOUNT_ID_INPUT),
            account_name: value_by_id(ACCOUNT_NAME_INPUT),
            can_manage_all_guilds: is_checked(ALL_GUILDS_SWITCH_ID),
            guilds: typed_by_id::<HtmlSelectElement>(ACCOUNT_GUILDS_SELECT_ID)
                .map(|select| selected_values(&select))
                .unwrap_or_default(),
            global_permissions: global_permission_boxes()
                .iter()
                .filter(|checkbox| checkbox.checked())
                .map(HtmlInputElement::value)
                .collect(),
        }
    }

    async fn save_account() {
        let already_saving = ACCOUNTS_STATE.with(|state| std::mem::replace(&mut state.borrow_mut().saving, true));
        if already_saving {
            tracing::debug!("account save already in flight");
            return;
        }
        let command = read_form().into_command();
        let outcome = request::<ApiEnvelope>(&command.request()).await;
        ACCOUNTS_STATE.with(|state| state.borrow_mut().saving = false);

        let Ok(envelope) = outcome else {
            return;
        };
        alert(envelope.message_text());
        if !envelope.is_success() {
            return;
        }
        if command.is_create()
            && let Some(access_key) = envelope.field::<String>("access_key")
        {
            set_text(NEW_KEY_DISPLAY_ID, &access_key);
            show_modal(NEW_KEY_MODAL_ID);
        }
        reset_form();
        refresh_accounts().await;
    }

    fn edit_account(item: &Element) {
        let account = match data_attr(item, "account-data").map(|raw| serde_json::from_str::<SubAccount>(&raw)) {
            Some(Ok(account)) => account,
            Some(Err(error)) => {
                tracing::warn!(%error, "account data unreadable");
                return;
            }
            None => return,
        };
        reset_form();
        set_text(PERMISSION_FORM_TITLE_ID, &format!("Edit account: {}", account.account_name));
        set_text(SAVE_ACCOUNT_BUTTON_ID, UPDATE_LABEL);
        if let Some(cancel) = element_by_id(CANCEL_EDIT_BUTTON_ID) {
            set_display(&cancel, "block");
        }
        set_value_by_id(ACCOUNT_ID_INPUT, account.id.as_str());
        set_value_by_id(ACCOUNT_NAME_INPUT, &account.account_name);

        let permissions = &account.permissions;
        if let Some(switch) = typed_by_id::<HtmlInputElement>(ALL_GUILDS_SWITCH_ID) {
            switch.set_checked(permissions.can_manage_all_guilds);
        }
        sync_guild_selector();
        if let Some(select) = typed_by_id::<HtmlSelectElement>(ACCOUNT_GUILDS_SELECT_ID) {
            select_values(&select, &permissions.guilds);
        }
        for checkbox in global_permission_boxes() {
            checkbox.set_checked(permissions.global_permissions.contains(&checkbox.value()));
        }
        scroll_to_top();
    }

    async fn delete_account(account_id: String) {
        let command = AccountCommand::Delete { account_id };
        let Ok(envelope) = request::<ApiEnvelope>(&command.request()).await else {
            return;
        };
        alert(envelope.message_text());
        if envelope.is_success() {
            refresh_accounts().await;
        }
    }

    async fn copy_access_key() {
        let key = element_by_id(NEW_KEY_DISPLAY_ID)
            .and_then(|display| display.text_content())
            .unwrap_or_default();
        let Some(promise) = write_clipboard(&key) else {
            tracing::warn!("clipboard unavailable");
            return;
        };
        if let Err(error) = JsFuture::from(promise).await {
            tracing::warn!(?error, "clipboard write rejected");
            return;
        }
        set_text(COPY_KEY_BUTTON_ID, COPIED_LABEL);
        sleep_ms(config().copy_feedback_ms).await;
        set_html(COPY_KEY_BUTTON_ID, COPY_KEY_LABEL_HTML);
    }
