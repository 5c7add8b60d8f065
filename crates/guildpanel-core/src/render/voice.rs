use maud::{Markup, html};

use crate::model::{VoiceChannel, VoiceMember};
use crate::render::safe_url;

const OWNER_LOCK_TITLE: &str = "The guild owner cannot be moderated";

/// Voice channel cards. Owner rows keep their buttons but disabled; mute and
/// deafen buttons offer the inverse of the member's current state.
pub fn voice_channels(channels: &[VoiceChannel], owner_id: Option<&str>) -> String {
    html! {
        @if channels.is_empty() {
            p class="text-muted p-3" { "All voice channels are empty." }
        } @else {
            @for channel in channels {
                div class="vc-card" {
                    div class="vc-card-header" {
                        i class="fa-solid fa-volume-high" {}
                        " " (channel.name) " "
                        span { "(" (channel.members.len()) ")" }
                    }
                    div class="vc-members-list" {
                        @if channel.members.is_empty() {
                            div class="text-muted small p-2" { "This channel is empty" }
                        } @else {
                            @for member in &channel.members {
                                (voice_member(member, owner_id == Some(member.id.as_str())))
                            }
                        }
                    }
                }
            }
        }
    }
    .into_string()
}

fn voice_member(member: &VoiceMember, is_owner: bool) -> Markup {
    let id = member.id.as_str();
    let lock_title = is_owner.then_some(OWNER_LOCK_TITLE);
    let (mute_action, mute_label) = if member.is_muted {
        ("action/vc_unmute", "Unmute")
    } else {
        ("action/vc_mute", "Mute")
    };
    let (deafen_action, deafen_label) = if member.is_deafened {
        ("action/vc_undeafen", "Undeafen")
    } else {
        ("action/vc_deafen", "Deafen")
    };
    html! {
        div class="vc-member" data-entity-id=(id) {
            span {
                img src=(safe_url(&member.avatar_url)) class="avatar" alt="";
                " " (member.name) " "
                @if is_owner { i class="fa-solid fa-crown text-warning" {} " " }
                @if member.is_deafened {
                    i class="fa-solid fa-ear-deaf text-danger" {}
                } @else if member.is_muted {
                    i class="fa-solid fa-microphone-slash text-warning" {}
                }
            }
            div class="btn-group btn-group-sm" {
                button class="btn btn-outline-warning action-btn" data-action=(mute_action) data-target-id=(id)
                    disabled[is_owner] title=[lock_title] { (mute_label) }
                button class="btn btn-outline-danger action-btn" data-action=(deafen_action) data-target-id=(id)
                    disabled[is_owner] title=[lock_title] { (deafen_label) }
                button class="btn btn-outline-secondary action-btn" data-action="action/vc_kick" data-target-id=(id)
                    disabled[is_owner] title=[lock_title] { "Disconnect" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntityId;

    fn member(id: &str, muted: bool, deafened: bool) -> VoiceMember {
        VoiceMember {
            id: EntityId::new(id),
            name: format!("user-{id}"),
            avatar_url: "https://cdn/a.png".to_string(),
            is_muted: muted,
            is_deafened: deafened,
        }
    }

    #[test]
    fn toggles_pick_inverse_action() {
        let html = voice_channels(
            &[VoiceChannel {
                name: "Lounge".to_string(),
                members: vec![member("1", true, false), member("2", false, true)],
            }],
            None,
        );
        assert!(html.contains(r#"data-action="action/vc_unmute" data-target-id="1""#));
        assert!(html.contains(r#"data-action="action/vc_deafen" data-target-id="1""#));
        assert!(html.contains(r#"data-action="action/vc_mute" data-target-id="2""#));
        assert!(html.contains(r#"data-action="action/vc_undeafen" data-target-id="2""#));
        assert!(!html.contains("disabled"));
    }

    #[test]
    fn owner_controls_are_disabled() {
        let html = voice_channels(
            &[VoiceChannel {
                name: "Stage".to_string(),
                members: vec![member("42", false, false)],
            }],
            Some("42"),
        );
        assert_eq!(html.matches("disabled").count(), 3);
        assert!(html.contains("fa-crown"));
        assert!(html.contains(OWNER_LOCK_TITLE));
    }

    #[test]
    fn empty_states() {
        assert!(voice_channels(&[], None).contains("All voice channels are empty."));
        let html = voice_channels(
            &[VoiceChannel {
                name: "AFK".to_string(),
                members: vec![],
            }],
            None,
        );
        assert!(html.contains("This channel is empty"));
        assert!(html.contains("(0)"));
    }
}
