use maud::html;

use crate::countdown::PENDING_LABEL;
use crate::model::MuteRecord;
use crate::render::safe_url;

/// Muted users table. Each expiry cell is a `.countdown-timer` the shell ticks.
pub fn muted_users(mutes: &[MuteRecord]) -> String {
    html! {
        @if mutes.is_empty() {
            tr { td colspan="4" class="text-center text-muted" { "No active mutes." } }
        } @else {
            @for mute in mutes {
                @let id = mute.user.id.as_str();
                tr data-entity-id=(id) {
                    td {
                        img src=(safe_url(&mute.user.avatar_url)) class="avatar" alt="";
                        " " (mute.user.name)
                    }
                    td { (mute.reason.as_deref().filter(|reason| !reason.is_empty()).unwrap_or("N/A")) }
                    td id=(format!("countdown-{id}")) class="countdown-timer"
                        data-expires=(mute.expires_at.map(|expires| expires.to_string()).unwrap_or_default()) {
                        (PENDING_LABEL)
                    }
                    td {
                        button class="btn btn-sm btn-outline-success action-btn"
                            data-action="action/unmute"
                            data-target-id=(id) {
                            "Unmute"
                        }
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
    use crate::model::{EntityId, MemberRef};

    #[test]
    fn rows_carry_countdown_cells() {
        let html = muted_users(&[
            MuteRecord {
                user: MemberRef {
                    id: EntityId::new("9"),
                    name: "noisy".to_string(),
                    avatar_url: String::new(),
                },
                reason: None,
                expires_at: Some(1_700_000_000),
            },
            MuteRecord {
                user: MemberRef {
                    id: EntityId::new("10"),
                    name: "forever".to_string(),
                    avatar_url: String::new(),
                },
                reason: Some("spam".to_string()),
                expires_at: None,
            },
        ]);
        assert!(html.contains(r#"id="countdown-9" class="countdown-timer" data-expires="1700000000""#));
        assert!(html.contains(r#"data-expires="""#));
        assert!(html.contains("N/A"));
        assert!(html.contains(r#"data-action="action/unmute" data-target-id="10""#));
        assert!(muted_users(&[]).contains("No active mutes."));
    }
}
