use super::*;
    use guildpanel_core::ValidationError;
    use guildpanel_core::action::CollectionKind;
    use guildpanel_core::bulk::{
        BulkAction, BulkRequest, kick_confirmation, require_selection, resolve_role_index, role_prompt,
    };
    use guildpanel_core::chart::{
        AXIS_STROKE, BAR_FILL, BAR_STROKE, EMPTY_LEADERBOARD, LABEL_FILL, LABEL_FONT, LeaderboardChart,
    };
    use guildpanel_core::members::{ToolbarState, member_matches, partition_roles};
    use guildpanel_core::model::{
        EconomyResponse, FaqResponse, KnowledgeBaseResponse, MemberRolesResponse, ShopItem,
        ShopResponse, TopUser,
    };
    use guildpanel_core::permissions::{TabSpec, parse_granted, plan_tabs};
    use guildpanel_core::stats::format_thousands;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    pub(in crate::wasm) fn mount(guild_id: &str) {
        apply_tab_permissions();
        spawn_local(load_all(guild_id.to_string()));
        bind_member_modals(guild_id);
        bind_bulk_actions(guild_id);
        bind_member_search();
        bind_role_editor(guild_id);
    }

    fn apply_tab_permissions() {
        let (Some(tabs), Some(panes)) = (element_by_id(MANAGEMENT_TABS_ID), element_by_id(MANAGEMENT_PANES_ID)) else {
            return;
        };
        let Some(raw) = island_text(USER_PERMISSIONS_ISLAND_ID) else {
            tracing::warn!("user permission data missing; every tab stays visible");
            return;
        };
        let granted = match parse_granted(&raw) {
            Ok(granted) => granted,
            Err(error) => {
                tracing::warn!(%error, "user permission data unreadable; every tab stays visible");
                return;
            }
        };

        let items = query_within(&tabs, ".nav-item");
        let specs: Vec<TabSpec> = items
            .iter()
            .map(|item| TabSpec {
                permission: data_attr(item, "permission"),
                activatable: query_one(item, "button.nav-link[data-bs-toggle=\"tab\"]").is_some(),
            })
            .collect();
        let plan = plan_tabs(&specs, &granted, &current_pathname());

        for (item, visible) in items.iter().zip(&plan.visible) {
            set_display(item, if *visible { "" } else { "none" });
        }
        match plan
            .activate
            .and_then(|index| items.get(index))
            .and_then(|item| query_one(item, "button.nav-link[data-bs-toggle=\"tab\"]"))
        {
            Some(button) => {
                bootstrap_call("Tab", "getOrCreateInstance", &button, "show");
            }
            None => {
                for pane in query_within(&panes, ".tab-pane") {
                    let _ = pane.class_list().remove_2("show", "active");
                }
            }
        }
        if plan.highlight_tickets_link
            && let Some(link) = query_one(&tabs, "[data-permission=\"tab_tickets\"] a.nav-link")
        {
            let _ = link.class_list().add_1("active");
        }
    }

    async fn load_all(guild_id: String) {
        let shop = load_into(
            Endpoint::guild(&guild_id, GuildResource::ShopItems).get(),
            CollectionKind::ShopItems.container_id(),
            |response: ShopResponse| render::guild::shop_items(&response.items),
        );
        let knowledge_base = load_into(
            Endpoint::guild(&guild_id, GuildResource::KnowledgeBase).get(),
            CollectionKind::KnowledgeBase.container_id(),
            |response: KnowledgeBaseResponse| render::guild::knowledge_base(&response.kb),
        );
        let faq = load_into(
            Endpoint::guild(&guild_id, GuildResource::Faq).get(),
            CollectionKind::Faq.container_id(),
            |response: FaqResponse| render::guild::faq(&response.entries()),
        );
        let economy = load_economy(&guild_id);
        let (shop, knowledge_base, faq, ()) = futures_util::join!(shop, knowledge_base, faq, economy);
        tracing::debug!(shop, knowledge_base, faq, "guild collections loaded");
    }

    async fn load_economy(guild_id: &str) {
        let request_economy = Endpoint::guild(guild_id, GuildResource::EconomyStats).get();
        let Ok(EconomyResponse { stats: Some(stats) }) = request::<EconomyResponse>(&request_economy).await else {
            return;
        };
        set_text(TOTAL_CURRENCY_ID, &format_thousands(stats.total_currency));
        set_text(ECONOMY_USER_COUNT_ID, &format_thousands(stats.user_count));
        let Some(canvas) = typed_by_id::<HtmlCanvasElement>(ECONOMY_CHART_ID) else {
            tracing::debug!("leaderboard canvas missing");
            return;
        };
        if let Err(error) = draw_leaderboard(&canvas, &stats.top_users) {
            tracing::warn!(?error, "leaderboard could not be drawn");
        }
    }

    fn draw_leaderboard(canvas: &HtmlCanvasElement, top_users: &[TopUser]) -> Result<(), JsValue> {
        let width = u32::try_from(canvas.client_width()).ok().filter(|width| *width > 0);
        if let Some(width) = width {
            canvas.set_width(width);
        }
        let chart = LeaderboardChart::layout(
            top_users,
            f64::from(canvas.width()),
            f64::from(canvas.height()),
        );
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        context.clear_rect(0.0, 0.0, chart.width, chart.height);
        context.set_font(LABEL_FONT);
        context.set_text_align("center");
        context.set_fill_style_str(LABEL_FILL);
        if chart.is_empty() {
            return context.fill_text(EMPTY_LEADERBOARD, chart.width / 2.0, chart.height / 2.0);
        }

        context.set_stroke_style_str(AXIS_STROKE);
        context.set_line_width(1.0);
        context.begin_path();
        context.move_to(chart.axis_start, chart.baseline);
        context.line_to(chart.axis_end, chart.baseline);
        context.stroke();

        context.set_stroke_style_str(BAR_STROKE);
        for bar in &chart.bars {
            context.set_fill_style_str(BAR_FILL);
            context.fill_rect(bar.x, bar.y, bar.width, bar.height);
            context.stroke_rect(bar.x, bar.y, bar.width, bar.height);
            context.set_fill_style_str(LABEL_FILL);
            context.fill_text(&bar.label, bar.label_x, bar.label_y)?;
        }
        Ok(())
    }

    fn bind_member_modals(guild_id: &str) {
        let guild = guild_id.to_string();
        listen_by_id(ROLE_MODAL_ID, "show.bs.modal", move |event| {
            if let Some(trigger) = related_target(&event) {
                spawn_local(populate_role_modal(trigger, guild.clone()));
            }
        });
        listen_by_id(EDIT_ITEM_MODAL_ID, "show.bs.modal", |event| {
            if let Some(trigger) = related_target(&event) {
                populate_item_modal(&trigger);
            }
        });
    }

    fn form_select(form: &Element, name: &str) -> Option<HtmlSelectElement> {
        query_one(form, &format!("select[name=\"{name}\"]"))?
            .dyn_into::<HtmlSelectElement>()
            .ok()
    }

    fn fill_options(select: &HtmlSelectElement, roles: &[RoleOption]) {
        select.set_inner_html("");
        for role in roles {
            append_option(select, &role.label, &role.value, false);
        }
    }

    async fn populate_role_modal(trigger: Element, guild_id: String) {
        let member_id = data_attr(&trigger, "member-id").unwrap_or_default();
        let member_name = data_attr(&trigger, "member-name").unwrap_or_default();
        set_value_by_id(ROLE_MODAL_MEMBER_ID, &member_id);
        set_text(ROLE_MODAL_USERNAME_ID, &member_name);

        let Some(form) = typed_by_id::<HtmlFormElement>(MEMBER_ROLES_FORM_ID) else {
            return;
        };
        form.reset();
        let (Some(give), Some(take)) = (form_select(&form, "roles_to_give"), form_select(&form, "roles_to_take")) else {
            return;
        };
        let Some(all_roles) = role_options() else {
            tracing::error!("role option source missing");
            return;
        };
        fill_options(&give, &all_roles);
        take.set_inner_html("");
        append_option(&take, "Loading...", "", true);

        let roles_request = Endpoint::guild(&guild_id, GuildResource::MemberRoles { member_id }).get();
        let response = request::<MemberRolesResponse>(&roles_request).await;
        take.set_inner_html("");
        match response {
            Ok(MemberRolesResponse {
                status,
                roles: Some(held),
            }) if status == "success" => {
                if held.is_empty() {
                    append_option(&take, "This member has no removable roles", "", true);
                    return;
                }
                let held: Vec<String> = held.iter().map(|id| id.as_str().to_string()).collect();
                let (give_roles, take_roles) = partition_roles(&all_roles, &held);
                fill_options(&give, &give_roles);
                fill_options(&take, &take_roles);
            }
            Ok(_) => append_option(&take, "Failed to load roles", "", true),
            Err(_) => append_option(&take, "Error while loading roles", "", true),
        }
    }

    fn populate_item_modal(trigger: &Element) {
        let Some(form) = typed_by_id::<HtmlFormElement>(EDIT_ITEM_FORM_ID) else {
            return;
        };
        form.reset();
        let field = |id: &str| query_one(&form, &format!("#{id}"));
        let set_field = |id: &str, value: &str| {
            if let Some(element) = field(id) {
                set_value(&element, value);
            }
        };
        let name_input = field("item_name").and_then(|element| element.dyn_into::<HtmlInputElement>().ok());

        if data_attr(trigger, "item-is-new").as_deref() == Some("true") {
            set_text(EDIT_ITEM_MODAL_LABEL_ID, "Add new item");
            set_field("item_slug", "");
            if let Some(input) = name_input {
                input.set_read_only(false);
            }
            return;
        }

        let item = match data_attr(trigger, "item-data").map(|raw| serde_json::from_str::<ShopItem>(&raw)) {
            Some(Ok(item)) => item,
            Some(Err(error)) => {
                tracing::warn!(%error, "shop item data unreadable");
                return;
            }
            None => {
                tracing::warn!("edit button carries no item data");
                return;
            }
        };
        set_text(EDIT_ITEM_MODAL_LABEL_ID, &format!("Edit: {}", item.name));
        set_field("item_slug", &item.item_slug);
        set_field("item_name", &item.name);
        if let Some(input) = name_input {
            input.set_read_only(true);
        }
        set_field("item_price", &item.price.to_string());
        set_field("item_stock", &item.stock.to_string());
        set_field("item_description", item.description.as_deref().unwrap_or_default());
        set_field("item_role", item.role_id.as_ref().map_or("", |role| role.as_str()));
        set_field("item_purchase_message", item.purchase_message.as_deref().unwrap_or_default());
    }

    fn member_checkboxes(selector: &str) -> Vec<HtmlInputElement> {
        element_by_id(MEMBER_LIST_BODY_ID)
            .map(|body| query_within(&body, selector))
            .unwrap_or_default()
            .into_iter()
            .filter_map(|element| element.dyn_into::<HtmlInputElement>().ok())
            .collect()
    }

    fn update_toolbar() {
        let total = member_checkboxes(".member-checkbox").len() as u32;
        let selected = member_checkboxes(".member-checkbox:checked").len() as u32;
        let state = ToolbarState::from_counts(selected, total);
        set_text(BULK_SELECTED_COUNT_ID, &state.selected.to_string());
        if let Some(toolbar) = element_by_id(BULK_TOOLBAR_ID) {
            set_display(&toolbar, if state.visible { "inline-block" } else { "none" });
        }
        if let Some(select_all) = typed_by_id::<HtmlInputElement>(SELECT_ALL_MEMBERS_ID) {
            select_all.set_checked(state.select_all_checked);
            select_all.set_indeterminate(state.select_all_indeterminate);
        }
    }

    fn bind_bulk_actions(guild_id: &str) {
        listen_by_id(SELECT_ALL_MEMBERS_ID, "change", |_event| {
            let checked = is_checked(SELECT_ALL_MEMBERS_ID);
            for checkbox in member_checkboxes(".member-checkbox") {
                checkbox.set_checked(checked);
            }
            update_toolbar();
        });
        listen_by_id(MEMBER_LIST_BODY_ID, "change", |event| {
            let is_member_checkbox = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .is_some_and(|element| element.class_list().contains("member-checkbox"));
            if is_member_checkbox {
                update_toolbar();
            }
        });
        for action in BulkAction::ALL {
            let guild = guild_id.to_string();
            listen_by_id(action.button_id(), "click", move |_event| {
                spawn_local(run_bulk_action(action, guild.clone()));
            });
        }
    }

    async fn run_bulk_action(action: BulkAction, guild_id: String) {
        let target_ids: Vec<String> = member_checkboxes(".member-checkbox:checked")
            .iter()
            .map(HtmlInputElement::value)
            .collect();
        if let Err(error) = require_selection(&target_ids) {
            alert(&error.to_string());
            return;
        }

        let mut role_id = None;
        if action.needs_role() {
            let Some(roles) = role_options() else {
                alert(&ValidationError::RoleListMissing.to_string());
                return;
            };
            let Some(input) = prompt(&role_prompt(action, target_ids.len(), &roles)).filter(|input| !input.is_empty()) else {
                return;
            };
            match resolve_role_index(&input, &roles) {
                Ok(role) => role_id = Some(role.value.clone()),
                Err(error) => {
                    alert(&error.to_string());
                    return;
                }
            }
        } else if !confirm(&kick_confirmation(target_ids.len())) {
            return;
        }

        let bulk = BulkRequest {
            action,
            target_ids,
            role_id,
        };
        let Ok(envelope) = request::<ApiEnvelope>(&bulk.request(&guild_id)).await else {
            return;
        };
        alert(envelope.message_text());
        if envelope.is_success() {
            for checkbox in member_checkboxes(".member-checkbox:checked") {
                checkbox.set_checked(false);
            }
            update_toolbar();
            reload_page();
        }
    }

    fn bind_member_search() {
        listen_by_id(MEMBER_SEARCH_INPUT_ID, "input", |_event| {
            let term = value_by_id(MEMBER_SEARCH_INPUT_ID);
            let Some(body) = element_by_id(MEMBER_LIST_BODY_ID) else {
                return;
            };
            for row in query_within(&body, "tr") {
                let cells = row.children();
                let (Some(name), Some(id)) = (cells.item(1), cells.item(2)) else {
                    continue;
                };
                let shown = member_matches(
                    &name.text_content().unwrap_or_default(),
                    &id.text_content().unwrap_or_default(),
                    &term,
                );
                set_display(&row, if shown { "" } else { "none" });
            }
        });
    }

    fn bind_role_editor(guild_id: &str) {
        if element_by_id(ROLE_EDITOR_FORM_ID).is_none() {
            return;
        }
        listen_by_id(CREATE_ROLE_BUTTON_ID, "click", |_event| reset_role_editor());
        if let Some(table) = document()
            .ok()
            .and_then(|document| document.query_selector(ROLES_TABLE_SELECTOR).ok().flatten())
        {
            listen(&table, "click", |event| {
                if let Some(button) = event_closest(&event, ".edit-role-btn") {
                    open_role_editor(&button);
                }
            });
        }
        listen_by_id(ROLE_COLOR_INPUT_ID, "input", |_event| update_role_preview());
        listen_by_id(CLEAR_ALL_PERMS_ID, "change", |_event| {
            let clear = is_checked(CLEAR_ALL_PERMS_ID);
            let Some(form) = element_by_id(ROLE_EDITOR_FORM_ID) else {
                return;
            };
            for checkbox in query_within(&form, "input[name=\"permissions\"]") {
                if let Some(checkbox) = checkbox.dyn_ref::<HtmlInputElement>() {
                    checkbox.set_checked(!clear);
                }
            }
        });
        let guild = guild_id.to_string();
        listen_by_id(ROLE_EDITOR_FORM_ID, "submit", move |event| {
            event.prevent_default();
            spawn_local(save_role(guild.clone()));
        });
    }

    fn reset_role_editor() {
        if let Some(form) = typed_by_id::<HtmlFormElement>(ROLE_EDITOR_FORM_ID) {
            form.reset();
        }
        set_value_by_id(EDIT_ROLE_ID_INPUT, "");
        set_text(ROLE_EDITOR_TITLE_ID, "Create role");
        update_role_preview();
    }

    fn open_role_editor(button: &Element) {
        reset_role_editor();
        let Some(row) = closest(button, "tr") else {
            return;
        };
        let cells = row.children();
        let name = cells
            .item(0)
            .and_then(|cell| cell.text_content())
            .map(|text| text.trim().to_string())
            .unwrap_or_default();
        let color = cells
            .item(3)
            .and_then(|cell| query_one(&cell, "code"))
            .and_then(|code| code.text_content())
            .unwrap_or_default();

        set_text(ROLE_EDITOR_TITLE_ID, &format!("Edit role: {name}"));
        set_value_by_id(EDIT_ROLE_ID_INPUT, &data_attr(button, "role-id").unwrap_or_default());
        set_value_by_id(ROLE_NAME_INPUT_ID, &name);
        set_value_by_id(ROLE_COLOR_INPUT_ID, color.trim());
        update_role_preview();
        show_modal(ROLE_EDITOR_MODAL_ID);
    }

    fn update_role_preview() {
        if let Some(preview) = element_by_id(ROLE_PREVIEW_ID) {
            set_style(&preview, "background-color", &value_by_id(ROLE_COLOR_INPUT_ID));
        }
    }

    async fn save_role(guild_id: String) {
        let Some(form) = typed_by_id::<HtmlFormElement>(ROLE_EDITOR_FORM_ID) else {
            return;
        };
        let Ok(data) = FormData::new_with_form(&form) else {
            tracing::warn!("role editor form could not be read");
            return;
        };
        let button = element_by_id(SAVE_ROLE_BUTTON_ID);
        if let Some(button) = &button {
            set_button_busy(button, "Saving...");
        }
        let path = Endpoint::guild(&guild_id, GuildResource::RoleCreateOrEdit).path();
        let outcome = post_form_data(&path, data).await;
        if let Some(button) = &button {
            set_button_idle(button, "Save changes");
        }

        let Ok(envelope) = outcome else {
            return;
        };
        alert(envelope.message_text());
        if envelope.is_success() {
            if let Some(modal) = element_by_id(ROLE_EDITOR_MODAL_ID) {
                hide_modal(&modal);
            }
            reload_page();
        }
    }
