use super::*;
    use guildpanel_core::backup::{RESTORE_FINAL_WARNING, RestoreRequest, download_filename};

    const CREATE_BACKUP_LABEL_HTML: &str = "<i class=\"fas fa-download\"></i> Create and download backup";

    pub(in crate::wasm) fn mount(guild_id: &str) {
        install_job_console(
            JobKind::Restore,
            ConsoleControls {
                log_card: RESTORE_LOG_CARD_ID,
                log: RESTORE_LOG_ID,
                button: RESTORE_BUTTON_ID,
                idle_icon: "fas fa-undo",
            },
        );

        let guild = guild_id.to_string();
        listen_by_id(CREATE_BACKUP_BUTTON_ID, "click", move |_event| {
            spawn_local(create_backup(guild.clone()));
        });
        let guild = guild_id.to_string();
        listen_by_id(RESTORE_FORM_ID, "submit", move |event| {
            event.prevent_default();
            spawn_local(start_restore(guild.clone()));
        });
    }

    async fn create_backup(guild_id: String) {
        let Some(button) = element_by_id(CREATE_BACKUP_BUTTON_ID) else {
            return;
        };
        set_button_busy(&button, "Generating...");
        let path = Endpoint::guild(&guild_id, GuildResource::Backup).path();
        if let Ok(backup) = download(&path).await {
            let filename = download_filename(backup.disposition.as_deref(), &guild_id);
            if let Err(error) = save_bytes(&backup.bytes, &filename) {
                tracing::error!(%error, "backup download failed");
                alert(&format!("Error while creating the backup: {error}"));
            }
        }
        set_button_idle(&button, CREATE_BACKUP_LABEL_HTML);
    }

    async fn start_restore(guild_id: String) {
        let Some(form) = element_by_id(RESTORE_FORM_ID) else {
            return;
        };
        let file = typed_by_id::<HtmlInputElement>(BACKUP_FILE_INPUT_ID)
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        let expected = query_one(&form, "code").and_then(|code| code.text_content());
        let restore = match RestoreRequest::validate(
            file.is_some(),
            &value_by_id(CONFIRMATION_PHRASE_ID),
            expected.as_deref(),
        ) {
            Ok(restore) => restore,
            Err(error) => {
                alert(&error.to_string());
                return;
            }
        };
        let Some(file) = file else {
            return;
        };
        if !confirm(RESTORE_FINAL_WARNING) {
            return;
        }

        let text = match JsFuture::from(file.text()).await {
            Ok(text) => text.as_string().unwrap_or_default(),
            Err(error) => {
                tracing::error!(?error, "backup file could not be read");
                return;
            }
        };
        match serde_json::to_value(restore.into_job(&guild_id, text)) {
            Ok(payload) => start_job(payload),
            Err(error) => tracing::error!(%error, "restore payload could not be encoded"),
        }
    }
