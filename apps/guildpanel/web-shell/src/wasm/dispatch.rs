use super::*;
    use guildpanel_core::form::routes_generically;

    /// Body-level click dispatcher for `.action-btn` and the generic form router.
    pub(super) fn bind_common_handlers(guild_id: &str) {
        let Some(body) = document().ok().and_then(|document| document.body()) else {
            tracing::warn!("document body missing; common handlers not bound");
            return;
        };

        let click_guild = guild_id.to_string();
        listen(&body, "click", move |event| {
            let Some(button) = event_closest(&event, ".action-btn") else {
                return;
            };
            event.prevent_default();
            spawn_local(dispatch_action(button, click_guild.clone(), Confirm::Prompt));
        });

        let submit_guild = guild_id.to_string();
        listen(&body, "submit", move |event| {
            let Some(form) = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlFormElement>().ok())
            else {
                return;
            };
            if !routes_generically(&form.id()) {
                return;
            }
            event.prevent_default();
            let submitter = event
                .dyn_ref::<SubmitEvent>()
                .and_then(SubmitEvent::submitter);
            spawn_local(submit_form(form, submitter, submit_guild.clone()));
        });
    }

    /// Runs the command an `.action-btn` carries. A second click on the same
    /// action and target is dropped while the first is in flight.
    pub(super) async fn dispatch_action(button: Element, guild_id: String, policy: Confirm) {
        let entity = closest(&button, "[data-entity-id]");
        let action = data_attr(&button, "action");
        let target_id = data_attr(&button, "target-id");
        let entity_id = entity.as_ref().and_then(|entity| data_attr(entity, "entity-id"));
        let sub_action = data_attr(&button, "sub-action");
        let attributes = ActionAttributes {
            action: action.as_deref(),
            target_id: target_id.as_deref(),
            entity_id: entity_id.as_deref(),
            sub_action: sub_action.as_deref(),
        };
        let command = match ActionCommand::from_attributes(&attributes) {
            Ok(command) => command,
            Err(error) => {
                alert(&error.to_string());
                return;
            }
        };
        if policy == Confirm::Prompt && !confirm(&command.confirmation_message()) {
            return;
        }

        let key = command.flight_key();
        if !IN_FLIGHT.with(|in_flight| in_flight.borrow_mut().begin(&key)) {
            tracing::debug!(%key, "action already in flight");
            return;
        }
        set_disabled(&button, true);
        let reason = config().action_reason;
        if let Ok(envelope) = request::<ApiEnvelope>(&command.request(&guild_id, &reason)).await {
            alert(envelope.message_text());
            if envelope.is_success()
                && let Some(entity) = entity
            {
                remove_entity(entity).await;
            }
        }
        // Held until the row is gone so a click during the fade is dropped.
        IN_FLIGHT.with(|in_flight| in_flight.borrow_mut().finish(&key));
        set_disabled(&button, false);
    }

    /// Fades an entity out and draws the empty state if its container is left bare.
    pub(super) async fn remove_entity(entity: Element) {
        let container = entity.parent_element();
        fade_out_and_remove(entity, config().fade_ms).await;
        let Some(container) = container else {
            return;
        };
        let id = container.id();
        let plan = plan_removal(Some(id.as_str()).filter(|id| !id.is_empty()), container.child_element_count());
        if let Some(kind) = plan.empty_state {
            container.set_inner_html(&render::empty_state(kind));
        }
    }

    async fn submit_form(form: HtmlFormElement, submitter: Option<HtmlElement>, guild_id: String) {
        let snapshot = match form_snapshot(&form, submitter.as_deref()) {
            Ok(snapshot) => snapshot,
            Err(error) => {
                tracing::warn!(%error, form_id = %form.id(), "form could not be read");
                return;
            }
        };
        let submission = FormSubmission::from_snapshot(&snapshot);
        let Ok(envelope) = request::<ApiEnvelope>(&submission.request(&guild_id)).await else {
            return;
        };
        alert(envelope.message_text());
        if !envelope.is_success() {
            return;
        }
        if let Some(modal) = closest(&form, ".modal") {
            hide_modal(&modal);
        }
        form.reset();
        reload_page();
    }
