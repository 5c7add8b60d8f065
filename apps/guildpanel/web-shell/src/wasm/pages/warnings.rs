use super::*;
    use guildpanel_core::CollectionKind;
    use guildpanel_core::ValidationError;
    use guildpanel_core::model::WarningsResponse;

    #[derive(Debug, Clone, Copy)]
    enum WarnAction {
        Issue,
        Revoke,
    }

    impl WarnAction {
        fn path(self) -> &'static str {
            match self {
                Self::Issue => "action/warn",
                Self::Revoke => "action/unwarn",
            }
        }

        fn verb(self) -> &'static str {
            match self {
                Self::Issue => "issue a warning to",
                Self::Revoke => "revoke a warning from",
            }
        }
    }

    pub(in crate::wasm) fn mount(guild_id: &str) {
        spawn_local(refresh_warnings(guild_id.to_string()));
        for (button_id, action) in [
            (ISSUE_WARN_BUTTON_ID, WarnAction::Issue),
            (REVOKE_WARN_BUTTON_ID, WarnAction::Revoke),
        ] {
            let guild = guild_id.to_string();
            listen_by_id(button_id, "click", move |_event| {
                spawn_local(run_warn_action(action, guild.clone()));
            });
        }
    }

    async fn refresh_warnings(guild_id: String) {
        load_into(
            Endpoint::guild(&guild_id, GuildResource::Warnings).get(),
            CollectionKind::WarnedUsers.container_id(),
            |response: WarningsResponse| render::warnings::warned_users(&response.warned_users),
        )
        .await;
    }

    async fn run_warn_action(action: WarnAction, guild_id: String) {
        let Some(form) = typed_by_id::<HtmlFormElement>(WARNINGS_FORM_ID) else {
            return;
        };
        let Some(user_select) = query_one(&form, "select[name=\"user_id\"]")
            .and_then(|element| element.dyn_into::<HtmlSelectElement>().ok())
        else {
            return;
        };
        let target_id = user_select.value();
        if target_id.is_empty() {
            alert(&ValidationError::MissingUser.to_string());
            return;
        }
        let reason = query_one(&form, "input[name=\"reason\"]")
            .map(|input| field_value(&input))
            .filter(|reason| !reason.is_empty())
            .unwrap_or_else(|| DEFAULT_WARN_REASON.to_string());
        let user_label = user_select
            .selected_options()
            .item(0)
            .and_then(|option| option.text_content())
            .unwrap_or_else(|| target_id.clone());
        if !confirm(&format!("Really {} {user_label}?", action.verb())) {
            return;
        }

        let warn_request = Endpoint::guild(&guild_id, GuildResource::Action(action.path().to_string()))
            .post(json!({ "target_id": target_id, "reason": reason }));
        let Ok(envelope) = request::<ApiEnvelope>(&warn_request).await else {
            return;
        };
        alert(envelope.message_text());
        if envelope.is_success() {
            form.reset();
            refresh_warnings(guild_id).await;
        }
    }
