use super::*;

    pub(super) fn document() -> Result<web_sys::Document, String> {
        web_sys::window()
            .ok_or_else(|| "window is unavailable".to_string())?
            .document()
            .ok_or_else(|| "document is unavailable".to_string())
    }

    pub(super) fn element_by_id(id: &str) -> Option<Element> {
        web_sys::window()?.document()?.get_element_by_id(id)
    }

    pub(super) fn typed_by_id<T: JsCast>(id: &str) -> Option<T> {
        element_by_id(id)?.dyn_into::<T>().ok()
    }

    fn collect_elements(list: web_sys::NodeList) -> Vec<Element> {
        (0..list.length())
            .filter_map(|index| list.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    pub(super) fn query_document(selector: &str) -> Vec<Element> {
        document()
            .ok()
            .and_then(|document| document.query_selector_all(selector).ok())
            .map(collect_elements)
            .unwrap_or_default()
    }

    pub(super) fn query_within(root: &Element, selector: &str) -> Vec<Element> {
        root.query_selector_all(selector)
            .map(collect_elements)
            .unwrap_or_default()
    }

    pub(super) fn query_one(root: &Element, selector: &str) -> Option<Element> {
        root.query_selector(selector).ok().flatten()
    }

    pub(super) fn set_html(id: &str, html: &str) {
        if let Some(element) = element_by_id(id) {
            element.set_inner_html(html);
        }
    }

    pub(super) fn set_text(id: &str, text: &str) {
        if let Some(element) = element_by_id(id) {
            element.set_text_content(Some(text));
        }
    }

    pub(super) fn set_style(element: &Element, property: &str, value: &str) {
        if let Some(element) = element.dyn_ref::<HtmlElement>() {
            let _ = element.style().set_property(property, value);
        }
    }

    pub(super) fn set_display(element: &Element, value: &str) {
        set_style(element, "display", value);
    }

    pub(super) fn data_attr(element: &Element, name: &str) -> Option<String> {
        element
            .get_attribute(&format!("data-{name}"))
            .filter(|value| !value.is_empty())
    }

    pub(super) fn closest(element: &Element, selector: &str) -> Option<Element> {
        element.closest(selector).ok().flatten()
    }

    /// Nearest ancestor of the event target matching `selector`, target included.
    pub(super) fn event_closest(event: &web_sys::Event, selector: &str) -> Option<Element> {
        let target = event.target()?.dyn_into::<Element>().ok()?;
        closest(&target, selector)
    }

    /// Value of an input, select or textarea; empty for anything else.
    pub(super) fn field_value(element: &Element) -> String {
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            return input.value();
        }
        if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            return select.value();
        }
        if let Some(textarea) = element.dyn_ref::<HtmlTextAreaElement>() {
            return textarea.value();
        }
        String::new()
    }

    pub(super) fn value_by_id(id: &str) -> String {
        element_by_id(id)
            .map(|element| field_value(&element))
            .unwrap_or_default()
    }

    pub(super) fn set_value(element: &Element, value: &str) {
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        } else if let Some(textarea) = element.dyn_ref::<HtmlTextAreaElement>() {
            textarea.set_value(value);
        }
    }

    pub(super) fn set_value_by_id(id: &str, value: &str) {
        if let Some(element) = element_by_id(id) {
            set_value(&element, value);
        }
    }

    pub(super) fn is_checked(id: &str) -> bool {
        typed_by_id::<HtmlInputElement>(id).is_some_and(|input| input.checked())
    }

    pub(super) fn set_disabled(element: &Element, disabled: bool) {
        if disabled {
            let _ = element.set_attribute("disabled", "");
        } else {
            let _ = element.remove_attribute("disabled");
        }
    }

    /// Values of the selected options of a `<select multiple>`.
    pub(super) fn selected_values(select: &HtmlSelectElement) -> Vec<String> {
        let options = select.selected_options();
        (0..options.length())
            .filter_map(|index| options.item(index))
            .filter_map(|option| option.dyn_into::<HtmlOptionElement>().ok())
            .map(|option| option.value())
            .collect()
    }

    pub(super) fn select_values(select: &HtmlSelectElement, values: &[String]) {
        let options = select.options();
        for index in 0..options.length() {
            if let Some(option) = options
                .item(index)
                .and_then(|option| option.dyn_into::<HtmlOptionElement>().ok())
            {
                option.set_selected(values.contains(&option.value()));
            }
        }
    }

    /// Options of the hidden role list the guild page renders for prompts and modals.
    pub(super) fn role_options() -> Option<Vec<RoleOption>> {
        let source = typed_by_id::<HtmlSelectElement>(ALL_ROLES_SOURCE_ID)?;
        let options = source.options();
        Some(
            (0..options.length())
                .filter_map(|index| options.item(index))
                .filter_map(|option| option.dyn_into::<HtmlOptionElement>().ok())
                .map(|option| RoleOption {
                    value: option.value(),
                    label: option.text(),
                })
                .collect(),
        )
    }

    pub(super) fn append_option(
        select: &HtmlSelectElement,
        label: &str,
        value: &str,
        disabled: bool,
    ) {
        match HtmlOptionElement::new_with_text_and_value(label, value) {
            Ok(option) => {
                option.set_disabled(disabled);
                let _ = select.append_child(&option);
            }
            Err(_) => tracing::warn!(label, "failed to create select option"),
        }
    }

    pub(super) fn alert(message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    pub(super) fn confirm(message: &str) -> bool {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    pub(super) fn prompt(message: &str) -> Option<String> {
        web_sys::window()?.prompt_with_message(message).ok().flatten()
    }

    pub(super) fn reload_page() {
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    }

    pub(super) fn navigate_to(path: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(path);
        }
    }

    pub(super) fn current_pathname() -> String {
        web_sys::window()
            .and_then(|window| window.location().pathname().ok())
            .unwrap_or_else(|| "/".to_string())
    }

    pub(super) fn scroll_to_top() {
        if let Some(window) = web_sys::window() {
            let options = web_sys::ScrollToOptions::new();
            options.set_top(0.0);
            options.set_behavior(web_sys::ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        }
    }

    pub(super) fn body_data(name: &str) -> Option<String> {
        document()
            .ok()?
            .body()?
            .get_attribute(&format!("data-{name}"))
    }

    /// Text of a `<script type="application/json">` island.
    pub(super) fn island_text(id: &str) -> Option<String> {
        element_by_id(id)?
            .text_content()
            .filter(|text| !text.trim().is_empty())
    }

    fn session_storage() -> Option<web_sys::Storage> {
        web_sys::window()?.session_storage().ok().flatten()
    }

    pub(super) fn session_flag(key: &str) -> bool {
        session_storage()
            .and_then(|storage| storage.get_item(key).ok().flatten())
            .is_some_and(|value| value == "true")
    }

    pub(super) fn set_session_flag(key: &str) {
        if let Some(storage) = session_storage() {
            let _ = storage.set_item(key, "true");
        }
    }

    pub(super) fn now_unix_seconds() -> i64 {
        (js_sys::Date::now() / 1000.0).floor() as i64
    }

    /// Local wall-clock time for console lines.
    pub(super) fn clock_time() -> String {
        let date = js_sys::Date::new_0();
        let offset_minutes = date.get_timezone_offset() as i64;
        let local_ms = date.get_time() as i64 - offset_minutes * 60_000;
        chrono::DateTime::from_timestamp_millis(local_ms)
            .map(|time| time.format("%H:%M:%S").to_string())
            .unwrap_or_default()
    }

    pub(super) fn reveal_main_content() {
        if let Some(wrapper) = element_by_id(MAIN_CONTENT_ID) {
            let classes = wrapper.class_list();
            let _ = classes.remove_1("content-hidden");
            let _ = classes.add_1("content-visible");
        }
    }

    /// Snapshot of a form the way `FormData` sees it.
    pub(super) fn form_snapshot(
        form: &HtmlFormElement,
        submitter: Option<&Element>,
    ) -> Result<FormSnapshot, String> {
        let data = FormData::new_with_form(form).map_err(|_| "failed to read form data".to_string())?;
        let mut entries = Vec::new();
        if let Ok(Some(iterator)) = js_sys::try_iter(&data) {
            for item in iterator {
                let Ok(pair) = item.and_then(|item| item.dyn_into::<js_sys::Array>()) else {
                    continue;
                };
                if let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
                    entries.push((name, value));
                }
            }
        }
        let multi_fields = query_within(form, "[multiple][name]")
            .iter()
            .filter_map(|element| element.get_attribute("name"))
            .collect();
        Ok(FormSnapshot {
            form_id: form.id(),
            entries,
            multi_fields,
            submitter_action: submitter.and_then(|element| data_attr(element, "action")),
        })
    }

    /// Runs `bootstrap.<component>.<factory>(element).<method>()`.
    /// Returns `false` when Bootstrap is absent or `factory` yields no instance.
    pub(super) fn bootstrap_call(
        component: &str,
        factory: &str,
        element: &Element,
        method: &str,
    ) -> bool {
        let Some(window) = web_sys::window().map(JsValue::from) else {
            return false;
        };
        let lookup = |target: &JsValue, key: &str| {
            js_sys::Reflect::get(target, &JsValue::from_str(key))
                .ok()
                .filter(|value| !value.is_undefined() && !value.is_null())
        };
        let Some(class) = lookup(&window, "bootstrap").and_then(|bootstrap| lookup(&bootstrap, component)) else {
            return false;
        };
        let Some(factory) = lookup(&class, factory).and_then(|value| value.dyn_into::<js_sys::Function>().ok()) else {
            return false;
        };
        let Some(instance) = factory
            .call1(&class, element)
            .ok()
            .filter(|value| !value.is_undefined() && !value.is_null())
        else {
            return false;
        };
        let Some(method) = lookup(&instance, method).and_then(|value| value.dyn_into::<js_sys::Function>().ok()) else {
            return false;
        };
        method.call0(&instance).is_ok()
    }

    pub(super) fn show_modal(id: &str) {
        if let Some(modal) = element_by_id(id) {
            bootstrap_call("Modal", "getOrCreateInstance", &modal, "show");
        }
    }

    /// Hides a modal only if Bootstrap already manages it.
    pub(super) fn hide_modal(modal: &Element) {
        bootstrap_call("Modal", "getInstance", modal, "hide");
    }

    /// `relatedTarget` of a Bootstrap `show.bs.modal` event.
    pub(super) fn related_target(event: &web_sys::Event) -> Option<Element> {
        js_sys::Reflect::get(event, &JsValue::from_str("relatedTarget"))
            .ok()?
            .dyn_into::<Element>()
            .ok()
    }

    pub(super) fn set_button_busy(button: &Element, label: &str) {
        set_disabled(button, true);
        button.set_inner_html(SPINNER_HTML);
        let _ = button.append_with_str_1(&format!(" {label}"));
    }

    pub(super) fn set_button_idle(button: &Element, label_html: &str) {
        set_disabled(button, false);
        button.set_inner_html(label_html);
    }

    pub(super) fn write_clipboard(text: &str) -> Option<js_sys::Promise> {
        let navigator = web_sys::window()?.navigator();
        let clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard")).ok()?;
        let write = js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))
            .ok()?
            .dyn_into::<js_sys::Function>()
            .ok()?;
        write
            .call1(&clipboard, &JsValue::from_str(text))
            .ok()?
            .dyn_into::<js_sys::Promise>()
            .ok()
    }

    pub(super) async fn sleep_ms(millis: u32) {
        TimeoutFuture::new(millis).await;
    }

    pub(super) async fn fade_out_and_remove(element: Element, fade_ms: u32) {
        set_style(&element, "transition", &format!("opacity {fade_ms}ms ease"));
        set_style(&element, "opacity", "0");
        sleep_ms(fade_ms).await;
        element.remove();
    }
