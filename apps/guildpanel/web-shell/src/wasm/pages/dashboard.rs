use super::*;
    use guildpanel_core::api::guild_page_path;
    use guildpanel_core::model::GlobalStats;
    use guildpanel_core::stats::{
        StatCounter, WELCOME_END_DELAY_MS, WELCOME_FLAG_KEY, WELCOME_NEXT_MESSAGE_MS, WELCOME_SCRIPT,
        WELCOME_START_DELAY_MS, WELCOME_SUBLINE_DELAY_MS,
    };

    pub(in crate::wasm) fn mount() {
        if !session_flag(WELCOME_FLAG_KEY) {
            start_welcome();
        }

        spawn_local(refresh_stats());
        every(config().stats_refresh_ms, || spawn_local(refresh_stats()));

        listen_by_id(GUILD_SELECT_FORM_ID, "submit", |event| {
            event.prevent_default();
            if let Some(path) = guild_page_path(&value_by_id(GUILD_SELECTOR_ID)) {
                navigate_to(&path);
            }
        });
    }

    async fn refresh_stats() {
        let Ok(stats) = request::<GlobalStats>(&Endpoint::Stats.get()).await else {
            return;
        };
        for counter in StatCounter::ALL {
            set_text(counter.element_id(), &stats.counter_text(counter));
        }
    }

    fn start_welcome() {
        let (Some(overlay), Some(main_line), Some(sub_line)) = (
            element_by_id(WELCOME_OVERLAY_ID),
            element_by_id(WELCOME_MAIN_LINE_ID),
            element_by_id(WELCOME_SUB_LINE_ID),
        ) else {
            tracing::debug!("welcome overlay missing; revealing content");
            reveal_main_content();
            return;
        };
        let _ = overlay.class_list().add_1("visible");
        set_session_flag(WELCOME_FLAG_KEY);
        spawn_local(play_welcome(overlay, main_line, sub_line, config().typing_ms));
    }

    async fn play_welcome(overlay: Element, main_line: Element, sub_line: Element, typing_ms: u32) {
        sleep_ms(WELCOME_START_DELAY_MS).await;
        for (index, (headline, subline)) in WELCOME_SCRIPT.iter().enumerate() {
            let typed_sub = async {
                sleep_ms(WELCOME_SUBLINE_DELAY_MS).await;
                type_text(&sub_line, subline, typing_ms).await;
            };
            futures_util::join!(type_text(&main_line, headline, typing_ms), typed_sub);
            let last = index + 1 == WELCOME_SCRIPT.len();
            sleep_ms(if last {
                WELCOME_END_DELAY_MS
            } else {
                WELCOME_NEXT_MESSAGE_MS
            })
            .await;
        }

        let _ = overlay.class_list().add_1("fade-out");
        reveal_main_content();
        let faded = overlay.clone();
        listen(&overlay, "transitionend", move |_event| set_display(&faded, "none"));
    }

    async fn type_text(element: &Element, text: &str, typing_ms: u32) {
        let mut typed = String::with_capacity(text.len());
        element.set_text_content(Some(""));
        for ch in text.chars() {
            sleep_ms(typing_ms).await;
            typed.push(ch);
            element.set_text_content(Some(&typed));
        }
    }
