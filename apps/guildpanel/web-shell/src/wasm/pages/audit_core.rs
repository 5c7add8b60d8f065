use super::*;
    use guildpanel_core::CollectionKind;
    use guildpanel_core::audit::{
        CardIds, TriageRequest, exemption_removal_confirmation, is_exemption_removal, join_room_payload,
    };
    use guildpanel_core::model::{
        AuditHistoryResponse, ExemptChannelsResponse, ExemptUsersResponse, Violation,
    };
    use guildpanel_core::socket::{EVENT_JOIN_AUDIT_ROOM, EVENT_NEW_VIOLATION};

    pub(in crate::wasm) fn mount(guild_id: &str) {
        AUDIT_STATE.with(|state| {
            *state.borrow_mut() = AuditPageState {
                guild_id: guild_id.to_string(),
                ..AuditPageState::default()
            };
        });

        spawn_local(refresh_exemptions(guild_id.to_string()));
        for form_id in [EXEMPT_USER_FORM_ID, EXEMPT_CHANNEL_FORM_ID] {
            listen_by_id(form_id, "submit", move |event| {
                event.prevent_default();
                if let Some(form) = typed_by_id::<HtmlFormElement>(form_id) {
                    spawn_local(submit_exemption(form, audit_guild()));
                }
            });
        }
        bind_exemption_removal();

        spawn_local(load_history(guild_id.to_string()));
        connect_live_feed(guild_id);
        if let Some(container) = element_by_id(AUDIT_LOG_CONTAINER_ID) {
            listen(&container, "click", |event| {
                let Some(button) = event_closest(&event, ".action-btn") else {
                    return;
                };
                event.prevent_default();
                if let Some(card) = closest(&button, ".violation-card") {
                    spawn_local(triage(button, card, audit_guild()));
                }
            });
        }
    }

    /// Drops the live feed; the server forgets the room membership on disconnect.
    pub(in crate::wasm) fn close_audit_channel() {
        if let Some(channel) = AUDIT_CHANNEL.with(|slot| slot.borrow_mut().take()) {
            channel.close();
        }
        AUDIT_STATE.with(|state| *state.borrow_mut() = AuditPageState::default());
    }

    fn audit_guild() -> String {
        AUDIT_STATE.with(|state| state.borrow().guild_id.clone())
    }

    async fn refresh_exemptions(guild_id: String) {
        let users = request::<ExemptUsersResponse>(&Endpoint::guild(&guild_id, GuildResource::ExemptUsers).get());
        let channels =
            request::<ExemptChannelsResponse>(&Endpoint::guild(&guild_id, GuildResource::ExemptChannels).get());
        let (users, channels) = futures_util::join!(users, channels);
        if let Ok(ExemptUsersResponse { users: Some(users) }) = users {
            set_html(CollectionKind::ExemptUsers.container_id(), &render::audit::exempt_users(&users));
        }
        if let Ok(ExemptChannelsResponse {
            channels: Some(channels),
        }) = channels
        {
            set_html(
                CollectionKind::ExemptChannels.container_id(),
                &render::audit::exempt_channels(&channels),
            );
        }
    }

    async fn submit_exemption(form: HtmlFormElement, guild_id: String) {
        let snapshot = match form_snapshot(&form, None) {
            Ok(snapshot) => snapshot,
            Err(error) => {
                tracing::warn!(%error, form_id = %form.id(), "exemption form could not be read");
                return;
            }
        };
        let submission = FormSubmission::plain(&snapshot);
        let Ok(envelope) = request::<ApiEnvelope>(&submission.request(&guild_id)).await else {
            return;
        };
        alert(envelope.message_text());
        if envelope.is_success() {
            form.reset();
            refresh_exemptions(guild_id).await;
        }
    }

    fn bind_exemption_removal() {
        let Some(body) = document().ok().and_then(|document| document.body()) else {
            return;
        };
        listen(&body, "click", |event| {
            let Some(button) = event_closest(&event, ".action-btn") else {
                return;
            };
            let Some(action) = data_attr(&button, "action").filter(|action| is_exemption_removal(action)) else {
                return;
            };
            event.prevent_default();
            let target_id = data_attr(&button, "target-id").unwrap_or_default();
            if confirm(&exemption_removal_confirmation(&target_id)) {
                spawn_local(remove_exemption(action, target_id, audit_guild()));
            }
        });
    }

    async fn remove_exemption(action: String, target_id: String, guild_id: String) {
        let removal = Endpoint::guild(&guild_id, GuildResource::Action(action)).post(json!({ "target_id": target_id }));
        let Ok(envelope) = request::<ApiEnvelope>(&removal).await else {
            return;
        };
        alert(envelope.message_text());
        if envelope.is_success() {
            refresh_exemptions(guild_id).await;
        }
    }

    async fn load_history(guild_id: String) {
        let history_request = Endpoint::guild(&guild_id, GuildResource::AuditHistory).get();
        let Ok(history) = request::<AuditHistoryResponse>(&history_request).await else {
            return;
        };
        if history.events.is_empty() {
            if let Some(placeholder) = element_by_id(NO_LOGS_PLACEHOLDER_ID) {
                set_display(&placeholder, "block");
            }
            return;
        }
        if history.status != "success" {
            return;
        }
        set_html(AUDIT_LOG_CONTAINER_ID, "");
        AUDIT_STATE.with(|state| state.borrow_mut().feed.reset());
        for violation in &history.events {
            prepend_violation(violation);
        }
    }

    fn prepend_violation(violation: &Violation) {
        let Some(container) = element_by_id(AUDIT_LOG_CONTAINER_ID) else {
            return;
        };
        let fresh = AUDIT_STATE.with(|state| state.borrow_mut().feed.admit(violation.event_id.as_str()));
        if !fresh {
            return;
        }
        if let Some(placeholder) = element_by_id(NO_LOGS_PLACEHOLDER_ID) {
            set_display(&placeholder, "none");
        }
        let _ = container.insert_adjacent_html("afterbegin", &render::audit::violation_card(violation));
    }

    fn connect_live_feed(guild_id: &str) {
        let guild = guild_id.to_string();
        let opened = open_channel(move |event| match event {
            ChannelEvent::Opened => {
                tracing::info!(guild_id = %guild, "audit feed connected");
                AUDIT_CHANNEL.with(|slot| {
                    if let Some(channel) = slot.borrow().as_ref() {
                        channel.emit(EVENT_JOIN_AUDIT_ROOM, join_room_payload(&guild));
                    }
                });
            }
            ChannelEvent::Message { event, data } if event == EVENT_NEW_VIOLATION => {
                match serde_json::from_value::<Violation>(data) {
                    Ok(violation) => prepend_violation(&violation),
                    Err(error) => tracing::warn!(%error, "malformed violation event"),
                }
            }
            ChannelEvent::Message { event, .. } => tracing::debug!(%event, "ignored audit event"),
            ChannelEvent::ConnectError { message } => {
                tracing::error!(%message, "audit feed connection error");
            }
            ChannelEvent::Closed => tracing::info!("audit feed closed"),
        });
        match opened {
            Ok(channel) => AUDIT_CHANNEL.with(|slot| *slot.borrow_mut() = Some(channel)),
            Err(error) => tracing::error!(%error, "audit feed unavailable"),
        }
    }

    async fn triage(button: Element, card: Element, guild_id: String) {
        let action = data_attr(&button, "action").unwrap_or_default();
        let event_id = data_attr(&card, "event-id");
        let message_id = data_attr(&card, "message-id");
        let channel_id = data_attr(&card, "channel-id");
        let user_id = data_attr(&card, "user-id");
        let ids = CardIds {
            event_id: event_id.as_deref(),
            message_id: message_id.as_deref(),
            channel_id: channel_id.as_deref(),
            user_id: user_id.as_deref(),
        };
        let triage_request = match TriageRequest::from_card(&action, &ids) {
            Ok(triage_request) => triage_request,
            Err(error) => {
                alert(&error.to_string());
                return;
            }
        };

        let Ok(envelope) = request::<ApiEnvelope>(&triage_request.request(&guild_id)).await else {
            return;
        };
        if !envelope.is_success() {
            alert(&format!("Operation failed: {}", envelope.message_text()));
            return;
        }
        set_style(&card, "opacity", "0.5");
        set_style(&card, "border-color", "gray");
        if let Some(controls) = query_one(&card, ".d-flex.align-items-center:last-child") {
            controls.set_inner_html(&render::audit::handled_notice(triage_request.action));
        }
    }
