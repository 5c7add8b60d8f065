use super::*;
    use guildpanel_core::stats::WELCOME_FLAG_KEY;

    pub(super) fn set_boot_phase(phase: &str, detail: &str) {
        DIAGNOSTICS.with(|state| {
            let mut state = state.borrow_mut();
            state.phase = phase.to_string();
            state.detail = detail.to_string();
            if phase != "error" {
                state.last_error = None;
            }
        });
        tracing::debug!(phase, detail, "guild panel phase");
    }

    pub(super) fn set_boot_error(message: &str) {
        DIAGNOSTICS.with(|state| {
            let mut state = state.borrow_mut();
            state.phase = "error".to_string();
            state.detail = "startup failed".to_string();
            state.last_error = Some(message.to_string());
        });
        tracing::error!(message, "guild panel startup failed");
    }

    fn epoch_millis_now() -> u64 {
        js_sys::Date::now().max(0.0) as u64
    }

    /// Boots now, or on `DOMContentLoaded` while the document is still parsing.
    pub(super) fn boot_when_ready() -> Result<(), String> {
        let document = document()?;
        if document.ready_state() != "loading" {
            return boot();
        }
        let callback = Closure::once_into_js(move |_event: web_sys::Event| {
            if let Err(error) = boot() {
                set_boot_error(&error);
            }
        });
        document
            .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
            .map_err(|_| "failed to wait for DOMContentLoaded".to_string())?;
        Ok(())
    }

    fn boot() -> Result<(), String> {
        let started_at = epoch_millis_now();
        DIAGNOSTICS.with(|state| state.borrow_mut().boot_started_at_unix_ms = Some(started_at));

        let config = PanelConfig::resolve(island_text(PANEL_CONFIG_ISLAND_ID).as_deref());
        CONFIG.with(|slot| *slot.borrow_mut() = config);

        let context = PageContext::from_dataset(
            body_data("page-id").as_deref(),
            body_data("guild-id").as_deref(),
            body_data("owner-id").as_deref(),
        );
        DIAGNOSTICS.with(|state| {
            let mut state = state.borrow_mut();
            state.page_id = Some(context.page.page_id().to_string());
            state.guild_id = context.guild_id.clone();
        });

        if context.reveal_content_immediately(session_flag(WELCOME_FLAG_KEY)) {
            reveal_main_content();
        }

        mount(&context);
        let page_id = context.page.page_id().to_string();
        PAGE.with(|page| *page.borrow_mut() = Some(context));

        DIAGNOSTICS.with(|state| {
            state.borrow_mut().boot_total_latency_ms =
                Some(epoch_millis_now().saturating_sub(started_at));
        });
        set_boot_phase("ready", &format!("mounted {page_id}"));
        Ok(())
    }

    fn mount(context: &PageContext) {
        let Some(guild_id) = context.mount_guild() else {
            tracing::warn!(page = context.page.page_id(), "guild id missing; page not mounted");
            return;
        };
        if context.page.binds_common_handlers() {
            bind_common_handlers(guild_id);
        }
        match &context.page {
            PageKind::Dashboard => pages::dashboard::mount(),
            PageKind::Guild => pages::guild::mount(guild_id),
            PageKind::Settings => pages::settings::mount(guild_id),
            PageKind::ChannelControl => {
                pages::channel_control::mount(guild_id, context.owner_id.clone());
            }
            PageKind::Moderation => pages::moderation::mount(guild_id),
            PageKind::AuditCore => pages::audit_core::mount(guild_id),
            PageKind::Warnings => pages::warnings::mount(guild_id),
            PageKind::Permissions => pages::permissions::mount(guild_id),
            PageKind::SuperuserAccounts => pages::accounts::mount(),
            PageKind::Backup => pages::backup::mount(guild_id),
            PageKind::SuperuserBroadcast => pages::broadcast::mount(),
            PageKind::Announcements | PageKind::BotProfile => {
                tracing::debug!(page = context.page.page_id(), "generic handlers only");
            }
            PageKind::Tickets => tracing::debug!("tickets page runs its own script"),
            PageKind::Unknown(page_id) => {
                tracing::warn!(%page_id, "unknown page id; nothing mounted");
            }
        }
    }
