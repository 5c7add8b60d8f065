use super::*;
    use guildpanel_core::CollectionKind;
    use guildpanel_core::form::TICKET_DEPLOY_FORM_ID;
    use guildpanel_core::model::{AiChannelsResponse, BotWhitelistResponse};

    const DEPLOY_CONFIRMATION: &str =
        "This saves every setting and replaces the old ticket button in the chosen channel (if any). Continue?";

    pub(in crate::wasm) fn mount(guild_id: &str) {
        let guild = guild_id.to_string();
        spawn_local(async move {
            let whitelist = load_into(
                Endpoint::guild(&guild, GuildResource::BotWhitelist).get(),
                CollectionKind::BotWhitelist.container_id(),
                |response: BotWhitelistResponse| render::settings::bot_whitelist(&response.whitelist),
            );
            let ai_channels = load_into(
                Endpoint::guild(&guild, GuildResource::AiDependentChannels).get(),
                CollectionKind::AiDependentChannels.container_id(),
                |response: AiChannelsResponse| render::settings::ai_channels(&response.channels),
            );
            futures_util::join!(whitelist, ai_channels);
        });

        let guild = guild_id.to_string();
        listen_by_id(DEPLOY_TICKET_BUTTON_ID, "click", move |_event| {
            if confirm(DEPLOY_CONFIRMATION) {
                spawn_local(deploy_ticket_panel(guild.clone()));
            }
        });
    }

    async fn deploy_ticket_panel(guild_id: String) {
        let Some(form) = typed_by_id::<HtmlFormElement>(TICKET_SETTINGS_FORM_ID) else {
            tracing::warn!("ticket settings form missing");
            return;
        };
        let mut snapshot = match form_snapshot(&form, None) {
            Ok(snapshot) => snapshot,
            Err(error) => {
                tracing::warn!(%error, "ticket settings form could not be read");
                return;
            }
        };
        if !snapshot.multi_fields.iter().any(|name| name == STAFF_ROLES_FIELD) {
            snapshot.multi_fields.push(STAFF_ROLES_FIELD.to_string());
        }
        let submission = FormSubmission::plain(&snapshot).with_form_id(TICKET_DEPLOY_FORM_ID);
        if let Ok(envelope) = request::<ApiEnvelope>(&submission.request(&guild_id)).await {
            alert(envelope.message_text());
        }
    }
