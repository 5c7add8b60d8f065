#![allow(clippy::needless_pass_by_value)]

#[cfg(target_arch = "wasm32")]
mod wasm_constants;
#[cfg(target_arch = "wasm32")]
mod wasm_state;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;
    use std::collections::{BTreeMap, HashMap};

    use futures_util::channel::mpsc;
    use futures_util::{FutureExt, SinkExt, StreamExt, pin_mut, select};
    use gloo_net::http::{Request, Response};
    use gloo_net::websocket::{Message as WsMessage, WebSocketError, futures::WebSocket};
    use gloo_timers::callback::Interval;
    use gloo_timers::future::TimeoutFuture;
    use guildpanel_core::action::{ActionAttributes, plan_removal};
    use guildpanel_core::api::{GuildResource, decode_response, status_error};
    use guildpanel_core::console::{ControlState, SessionId};
    use guildpanel_core::members::RoleOption;
    use guildpanel_core::render;
    use guildpanel_core::socket::{ChannelEvent, SocketIoClient, SocketOutput, socket_url};
    use guildpanel_core::{
        ActionCommand, ApiEnvelope, ApiRequest, ChannelError, Confirm, ConsoleEffect, Endpoint,
        FormSnapshot, FormSubmission, HttpMethod, InFlight, JobConsole, JobKind, PageContext,
        PageKind, PanelConfig, RequestError,
    };
    use serde::Serialize;
    use serde::de::DeserializeOwned;
    use serde_json::{Value, json};
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::{JsFuture, spawn_local};
    use web_sys::{
        Element, EventTarget, FormData, HtmlElement, HtmlFormElement,
        HtmlInputElement, HtmlOptionElement, HtmlSelectElement, HtmlTextAreaElement, SubmitEvent,
    };

    use crate::wasm_constants::*;
    use crate::wasm_state::{AccountsPageState, AuditPageState, PermissionsPageState};

    mod channel;
    mod countdowns;
    mod dispatch;
    mod dom;
    mod job_console;
    mod lifecycle;
    mod network;
    mod pages;
    mod subscriptions;

    use channel::*;
    use countdowns::*;
    use dispatch::*;
    use dom::*;
    use job_console::*;
    use lifecycle::*;
    use network::*;
    use subscriptions::*;

    thread_local! {
        static DIAGNOSTICS: RefCell<BootDiagnostics> = RefCell::new(BootDiagnostics::default());
        static CONFIG: RefCell<PanelConfig> = RefCell::new(PanelConfig::default());
        static PAGE: RefCell<Option<PageContext>> = const { RefCell::new(None) };
        static SUBSCRIPTIONS: RefCell<Subscriptions> = RefCell::new(Subscriptions::default());
        static IN_FLIGHT: RefCell<InFlight> = RefCell::new(InFlight::default());
        static COUNTDOWN_TIMER: RefCell<Option<Interval>> = const { RefCell::new(None) };
        static JOB_CONSOLE: RefCell<Option<ConsoleHost>> = const { RefCell::new(None) };
        static AUDIT_CHANNEL: RefCell<Option<ChannelHandle>> = const { RefCell::new(None) };
        static AUDIT_STATE: RefCell<AuditPageState> = RefCell::new(AuditPageState::default());
        static PERMISSIONS_STATE: RefCell<PermissionsPageState> = RefCell::new(PermissionsPageState::default());
        static ACCOUNTS_STATE: RefCell<AccountsPageState> = RefCell::new(AccountsPageState::default());
    }

    #[derive(Debug, Clone, Serialize)]
    struct BootDiagnostics {
        phase: String,
        detail: String,
        page_id: Option<String>,
        guild_id: Option<String>,
        boot_started_at_unix_ms: Option<u64>,
        boot_total_latency_ms: Option<u64>,
        requests_failed: u64,
        last_error: Option<String>,
    }

    impl Default for BootDiagnostics {
        fn default() -> Self {
            Self {
                phase: "idle".to_string(),
                detail: "guild panel not started".to_string(),
                page_id: None,
                guild_id: None,
                boot_started_at_unix_ms: None,
                boot_total_latency_ms: None,
                requests_failed: 0,
                last_error: None,
            }
        }
    }

    pub(super) fn config() -> PanelConfig {
        CONFIG.with(|config| config.borrow().clone())
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
        set_boot_phase("booting", "waiting for the host document");
        if let Err(error) = boot_when_ready() {
            set_boot_error(&error);
        }
    }

    #[wasm_bindgen]
    pub fn boot_diagnostics_json() -> String {
        DIAGNOSTICS.with(|state| {
            serde_json::to_string(&*state.borrow()).unwrap_or_else(|_| {
                "{\"phase\":\"error\",\"detail\":\"diagnostics serialization failed\"}".to_string()
            })
        })
    }

    /// Drops every listener, timer and live socket owned by the mounted page.
    #[wasm_bindgen]
    pub fn teardown() {
        SUBSCRIPTIONS.with(|subscriptions| subscriptions.borrow_mut().dispose());
        stop_countdowns();
        shutdown_job_console();
        pages::close_audit_channel();
        PAGE.with(|page| page.borrow_mut().take());
        set_boot_phase("idle", "page controller torn down");
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::boot_diagnostics_json;

#[cfg(not(target_arch = "wasm32"))]
pub fn boot_diagnostics_json() -> String {
    "{\"phase\":\"native\",\"detail\":\"guild panel diagnostics only available on wasm\"}".to_string()
}
