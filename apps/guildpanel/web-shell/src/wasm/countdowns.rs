use super::*;
    use guildpanel_core::countdown::{countdown_display, parse_expiry};

    const COUNTDOWN_SELECTOR: &str = ".countdown-timer";

    /// Replaces the page's countdown interval after the timer cells were re-rendered.
    pub(super) fn restart_countdowns() {
        stop_countdowns();
        if query_document(COUNTDOWN_SELECTOR).is_empty() {
            return;
        }
        tick_countdowns();
        let interval = Interval::new(config().countdown_tick_ms, tick_countdowns);
        COUNTDOWN_TIMER.with(|slot| *slot.borrow_mut() = Some(interval));
    }

    pub(super) fn stop_countdowns() {
        COUNTDOWN_TIMER.with(|slot| slot.borrow_mut().take());
    }

    fn tick_countdowns() {
        let now = now_unix_seconds();
        for cell in query_document(COUNTDOWN_SELECTOR) {
            let expires_at = parse_expiry(cell.get_attribute("data-expires").as_deref());
            let display = countdown_display(expires_at, now);
            cell.set_text_content(Some(display.text()));
            if display.is_expired() {
                expire_cell(&cell);
            }
        }
    }

    fn expire_cell(cell: &Element) {
        let classes = cell.class_list();
        let _ = classes.remove_1("countdown-timer");
        let _ = classes.add_1("text-success");
        let Some(row) = closest(cell, "tr") else {
            return;
        };
        let delay = config().expired_row_delay_ms;
        spawn_local(async move {
            sleep_ms(delay).await;
            remove_entity(row).await;
        });
    }
