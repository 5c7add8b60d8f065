use super::*;
    use guildpanel_core::broadcast::BroadcastRequest;
    use guildpanel_core::model::{GlobalStats, InviteResponse};
    use guildpanel_core::stats::format_number;

    const GENERATE_LABEL: &str = "Generate / refresh link";

    pub(in crate::wasm) fn mount() {
        install_job_console(
            JobKind::Broadcast,
            ConsoleControls {
                log_card: BROADCAST_LOG_CARD_ID,
                log: BROADCAST_LOG_ID,
                button: START_BROADCAST_BUTTON_ID,
                idle_icon: "fas fa-broadcast-tower",
            },
        );

        spawn_local(show_total_users());
        listen_by_id(INVITE_GUILD_SELECT_ID, "change", |_event| {
            if let Some(button) = element_by_id(GENERATE_INVITE_BUTTON_ID) {
                set_disabled(&button, value_by_id(INVITE_GUILD_SELECT_ID).is_empty());
            }
        });
        listen_by_id(BROADCAST_ALL_SWITCH_ID, "change", |_event| {
            let Some(select) = typed_by_id::<HtmlSelectElement>(TARGET_GUILDS_SELECT_ID) else {
                return;
            };
            let all_guilds = is_checked(BROADCAST_ALL_SWITCH_ID);
            select.set_disabled(all_guilds);
            if all_guilds {
                select_values(&select, &[]);
            }
        });
        listen_by_id(GENERATE_INVITE_BUTTON_ID, "click", |_event| spawn_local(generate_invite()));
        listen_by_id(BROADCAST_FORM_ID, "submit", |event| {
            event.prevent_default();
            start_broadcast();
        });
    }

    async fn show_total_users() {
        if let Ok(GlobalStats { users: Some(users), .. }) = request::<GlobalStats>(&Endpoint::Stats.get()).await {
            set_text(TOTAL_USERS_ID, &format_number(&users));
        }
    }

    async fn generate_invite() {
        let guild_id = value_by_id(INVITE_GUILD_SELECT_ID);
        let Some(button) = element_by_id(GENERATE_INVITE_BUTTON_ID) else {
            return;
        };
        if guild_id.is_empty() {
            return;
        }
        set_disabled(&button, true);
        button.set_inner_html(SPINNER_HTML);

        let invite_request = Endpoint::guild(&guild_id, GuildResource::GenerateInvite).post(json!({}));
        if let Ok(response) = request::<InviteResponse>(&invite_request).await {
            match response.invite_url.filter(|_| response.status == "success") {
                Some(url) => set_value_by_id(INVITE_LINK_DISPLAY_ID, &url),
                None => {
                    alert(&format!(
                        "Failed to generate invite link: {}",
                        response.message.unwrap_or_default()
                    ));
                    set_value_by_id(INVITE_LINK_DISPLAY_ID, "");
                }
            }
        }
        set_button_idle(&button, GENERATE_LABEL);
    }

    fn start_broadcast() {
        let Some(form) = element_by_id(BROADCAST_FORM_ID) else {
            return;
        };
        let form_field = |name: &str| {
            query_one(&form, &format!("[name=\"{name}\"]"))
                .map(|field| field_value(&field))
                .unwrap_or_default()
        };
        let broadcast = BroadcastRequest {
            confirmation: value_by_id(CONFIRMATION_INPUT_ID),
            broadcast_to_all: is_checked(BROADCAST_ALL_SWITCH_ID),
            target_guilds: typed_by_id::<HtmlSelectElement>(TARGET_GUILDS_SELECT_ID)
                .map(|select| selected_values(&select))
                .unwrap_or_default(),
            title: form_field("title"),
            message: form_field("message"),
            invite_url: value_by_id(INVITE_LINK_DISPLAY_ID),
        };
        let job = match broadcast.validate() {
            Ok(job) => job,
            Err(error) => {
                alert(&error.to_string());
                return;
            }
        };
        if !confirm(&job.final_warning()) {
            return;
        }
        match serde_json::to_value(&job) {
            Ok(payload) => start_job(payload),
            Err(error) => tracing::error!(%error, "broadcast payload could not be encoded"),
        }
    }
