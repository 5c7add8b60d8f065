use maud::{Markup, html};

use crate::audit::TriageAction;
use crate::model::{NamedEntity, Violation};
use crate::render::{format_timestamp, safe_url};

pub fn exempt_users(users: &[NamedEntity]) -> String {
    exemption_list(users, "", "action/ai_exempt_remove_user", "No exempt users")
}

pub fn exempt_channels(channels: &[NamedEntity]) -> String {
    exemption_list(
        channels,
        "#",
        "action/ai_exempt_remove_channel",
        "No exempt channels",
    )
}

fn exemption_list(
    entries: &[NamedEntity],
    prefix: &str,
    action: &str,
    empty_label: &str,
) -> String {
    html! {
        @if entries.is_empty() {
            li class="list-group-item text-muted" { (empty_label) }
        } @else {
            @for entry in entries {
                li class="list-group-item d-flex justify-content-between align-items-center" data-entity-id=(entry.id.as_str()) {
                    span { (prefix) (entry.name) }
                    button class="btn btn-sm btn-outline-danger action-btn"
                        data-action=(action)
                        data-target-id=(entry.id.as_str()) {
                        i class="fa-solid fa-trash" {}
                    }
                }
            }
        }
    }
    .into_string()
}

/// One audit card. The trailing `.d-flex.align-items-center` block holds the
/// triage controls and is swapped for [`handled_notice`] once handled.
pub fn violation_card(violation: &Violation) -> String {
    let offered = TriageAction::offered(violation.auto_deleted);
    html! {
        div class="card bg-dark-2 mb-3 violation-card"
            data-event-id=(violation.event_id.as_str())
            data-message-id=(violation.message.id.as_str())
            data-channel-id=(violation.message.channel_id.as_str())
            data-user-id=(violation.user.id.as_str()) {
            div class="card-body" {
                div class="d-flex align-items-center mb-2" {
                    img src=(safe_url(&violation.user.avatar_url)) class="avatar me-3" alt="";
                    div {
                        strong { (violation.user.name) }
                        small class="text-muted d-block" {
                            "ID: "
                            a href=(safe_url(&violation.message.jump_url)) target="_blank" rel="noopener noreferrer" {
                                (violation.user.id.as_str())
                            }
                        }
                    }
                }
                p class="text-warning small mb-1" { "Violation: " (violation.violation_type) }
                p class="text-muted small" {
                    "In #" (violation.message.channel_name) " | " (format_timestamp(&violation.timestamp))
                }
                p class="message-content p-2 bg-black bg-opacity-25 rounded" { (violation.message.content) }
                hr class="my-2";
                div class="d-flex align-items-center" {
                    @if violation.auto_deleted {
                        div class="ms-auto d-flex align-items-center gap-2" {
                            span class="text-danger small" {
                                i class="fa-solid fa-trash-can" {}
                                " Deleted automatically"
                            }
                            (triage_buttons(offered))
                        }
                    } @else {
                        div class="ms-auto btn-group" { (triage_buttons(offered)) }
                    }
                }
            }
        }
    }
    .into_string()
}

fn triage_buttons(actions: &[TriageAction]) -> Markup {
    html! {
        @for action in actions {
            @let class = match action {
                TriageAction::Ignore => "btn btn-sm btn-outline-secondary action-btn",
                TriageAction::Delete => "btn btn-sm btn-outline-danger action-btn",
                TriageAction::Warn => "btn btn-sm btn-outline-warning action-btn",
                TriageAction::WarnAndDelete => "btn btn-sm btn-danger action-btn",
            };
            button class=(class) data-action=(action.wire_name()) { (action.button_label()) }
        }
    }
}

pub fn handled_notice(action: TriageAction) -> String {
    html! {
        span class="text-success small ms-auto" {
            i class="fa-solid fa-check" {}
            " Handled: " (action.handled_label())
        }
    }
    .into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntityId, ViolationMessage, ViolationUser};

    fn violation(auto_deleted: bool) -> Violation {
        Violation {
            event_id: EntityId::new("ev-1"),
            auto_deleted,
            user: ViolationUser {
                id: EntityId::new("77"),
                name: "<script>x</script>".to_string(),
                avatar_url: "https://cdn/a.png".to_string(),
            },
            message: ViolationMessage {
                id: EntityId::new("m1"),
                channel_id: EntityId::new("c1"),
                channel_name: "general".to_string(),
                content: "bad <b>words</b>".to_string(),
                jump_url: "javascript:alert(1)".to_string(),
            },
            violation_type: "profanity".to_string(),
            timestamp: "2024-03-01T10:20:30Z".to_string(),
        }
    }

    #[test]
    fn card_carries_ids_and_escapes_content() {
        let html = violation_card(&violation(false));
        assert!(html.contains(r#"data-event-id="ev-1" data-message-id="m1" data-channel-id="c1" data-user-id="77""#));
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(html.contains("bad &lt;b&gt;words&lt;/b&gt;"));
        assert!(!html.contains("javascript:"));
        assert!(html.contains("2024-03-01 10:20:30"));
        for action in TriageAction::offered(false) {
            assert!(html.contains(action.wire_name()));
        }
    }

    #[test]
    fn auto_deleted_card_only_offers_warning() {
        let html = violation_card(&violation(true));
        assert!(html.contains("Deleted automatically"));
        assert!(html.contains(r#"data-action="audit_warn""#));
        assert!(!html.contains("audit_ignore"));
        assert!(!html.contains("audit_delete"));
    }

    #[test]
    fn exemption_lists() {
        let users = [NamedEntity {
            id: EntityId::new("5"),
            name: "mod".to_string(),
        }];
        assert!(exempt_users(&users).contains(r#"data-action="action/ai_exempt_remove_user""#));
        assert!(exempt_channels(&users).contains("#mod"));
        assert!(exempt_users(&[]).contains("No exempt users"));
        assert!(exempt_channels(&[]).contains("No exempt channels"));
        assert!(handled_notice(TriageAction::WarnAndDelete).contains("Handled: warn_and_delete"));
    }
}
