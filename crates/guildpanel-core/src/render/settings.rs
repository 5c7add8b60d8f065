use maud::html;

use crate::model::{AiChannel, NamedEntity};

pub fn bot_whitelist(bots: &[NamedEntity]) -> String {
    html! {
        @if bots.is_empty() {
            li class="list-group-item text-muted" { "The whitelist is empty." }
        } @else {
            @for bot in bots {
                li class="list-group-item d-flex justify-content-between align-items-center" data-entity-id=(bot.id.as_str()) {
                    span { (bot.name) " (" code { (bot.id.as_str()) } ")" }
                    button class="btn btn-danger btn-sm action-btn"
                        data-action="action/bot_whitelist_remove"
                        data-target-id=(bot.id.as_str()) {
                        i class="fa-solid fa-trash" {}
                    }
                }
            }
        }
    }
    .into_string()
}

pub fn ai_channels(channels: &[AiChannel]) -> String {
    html! {
        @if channels.is_empty() {
            li class="list-group-item text-muted" { "No AI channels configured." }
        } @else {
            @for channel in channels {
                li class="list-group-item d-flex justify-content-between align-items-center" data-entity-id=(channel.id.as_str()) {
                    span { "#" (channel.name) " (model: " (channel.model) ")" }
                    button class="btn btn-danger btn-sm action-btn"
                        data-action="settings/ai_dep"
                        data-target-id=(channel.id.as_str())
                        data-sub-action="remove" {
                        i class="fa-solid fa-trash" {}
                    }
                }
            }
        }
    }
    .into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntityId;

    #[test]
    fn whitelist_rows_remove_by_id() {
        let html = bot_whitelist(&[NamedEntity {
            id: EntityId::new("555"),
            name: "Helper & Co".to_string(),
        }]);
        assert!(html.contains(r#"data-entity-id="555""#));
        assert!(html.contains(r#"data-action="action/bot_whitelist_remove""#));
        assert!(html.contains("Helper &amp; Co"));
        assert!(bot_whitelist(&[]).contains("The whitelist is empty."));
    }

    #[test]
    fn ai_channels_show_model() {
        let html = ai_channels(&[AiChannel {
            id: EntityId::new("8"),
            name: "support".to_string(),
            model: "gpt-small".to_string(),
        }]);
        assert!(html.contains("#support (model: gpt-small)"));
        assert!(html.contains(r#"data-sub-action="remove""#));
    }
}
