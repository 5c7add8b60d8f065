use super::*;
    use guildpanel_core::CollectionKind;
    use guildpanel_core::model::MutedUsersResponse;

    pub(in crate::wasm) fn mount(guild_id: &str) {
        let guild = guild_id.to_string();
        spawn_local(async move {
            let rendered = load_into(
                Endpoint::guild(&guild, GuildResource::MutedUsers).get(),
                CollectionKind::MutedUsers.container_id(),
                |response: MutedUsersResponse| render::moderation::muted_users(&response.muted_users),
            )
            .await;
            if rendered {
                restart_countdowns();
            }
        });
    }
