use super::*;
    use guildpanel_core::CollectionKind;
    use guildpanel_core::model::VoiceStatesResponse;

    /// Voice grid, re-rendered on every refresh tick. Rows for `owner_id`
    /// come back with their controls disabled.
    pub(in crate::wasm) fn mount(guild_id: &str, owner_id: Option<String>) {
        let guild = guild_id.to_string();
        let refresh = move || spawn_local(refresh_voice_states(guild.clone(), owner_id.clone()));
        refresh();
        every(config().voice_refresh_ms, refresh);
    }

    async fn refresh_voice_states(guild_id: String, owner_id: Option<String>) {
        load_into(
            Endpoint::guild(&guild_id, GuildResource::VoiceStates).get(),
            CollectionKind::VoiceChannels.container_id(),
            |response: VoiceStatesResponse| {
                render::voice::voice_channels(&response.voice_channels, owner_id.as_deref())
            },
        )
        .await;
    }
